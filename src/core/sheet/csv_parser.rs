//! CSV parser for published spreadsheet exports
//!
//! The format is deliberately naive: the first line holds the field names and
//! every later line is split on bare commas. Quoted fields are not supported,
//! so a comma inside a value shifts the remaining columns of that row.

/// One spreadsheet row zipped against the header line
///
/// Holds exactly one `(header, value)` pair per header, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    /// Build a record from a split line and the header names
    ///
    /// Missing trailing values become empty strings, extra values are dropped.
    #[must_use]
    pub fn from_values(headers: &[String], values: &[&str]) -> Self {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = values.get(idx).map_or("", |v| v.trim());
                (header.clone(), value.to_string())
            })
            .collect();
        Self { fields }
    }

    /// Get a field value by exact header name
    ///
    /// When a header repeats, the rightmost column wins.
    #[must_use]
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .rfind(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(header, value)` pairs in header order
    pub fn fields(&self) -> impl DoubleEndedIterator<Item = (&str, &str)> {
        self.fields.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    /// Header names of this record, in order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(h, _)| h.as_str())
    }

    /// Number of fields (always the header count)
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parse CSV text into ordered records keyed by the header line
///
/// # Arguments
/// * `text` - Raw CSV text as served by the spreadsheet export
///
/// # Returns
/// One `RawRecord` per non-blank data line. Text with fewer than two lines
/// (no data rows) yields an empty vector.
#[must_use]
pub fn parse_csv(text: &str) -> Vec<RawRecord> {
    let lines: Vec<&str> = text.trim().split('\n').collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let headers = parse_csv_line(lines[0]);

    lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let values: Vec<&str> = line.split(',').collect();
            RawRecord::from_values(&headers, &values)
        })
        .collect()
}

/// Split a header line into trimmed field names
fn parse_csv_line(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .map(std::string::ToString::to_string)
        .collect()
}
