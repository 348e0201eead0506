//! Person model

use crate::core::sheet::RawRecord;
use serde::{Deserialize, Serialize};

/// Column names recognized in the spreadsheet, with their English aliases
pub mod columns {
    /// Identity column
    pub const ID: (&str, &str) = ("ID", "id");
    /// Generation number column
    pub const GENERATION: (&str, &str) = ("Поколение", "generation");
    /// Display name column
    pub const NAME: (&str, &str) = ("Имя", "name");
    /// Birth date column
    pub const BIRTH_DATE: (&str, &str) = ("Дата рождения", "birth date");
    /// Death date column (empty = living)
    pub const DEATH_DATE: (&str, &str) = ("Дата смерти", "death date");
    /// Photo URL column
    pub const PHOTO_URL: (&str, &str) = ("Фото URL", "photo url");
    /// Father reference column
    pub const FATHER_ID: (&str, &str) = ("Отец ID", "father id");
    /// Mother reference column
    pub const MOTHER_ID: (&str, &str) = ("Мать ID", "mother id");
    /// Spouse reference column
    pub const SPOUSE_ID: (&str, &str) = ("Супруг ID", "spouse id");
}

/// Represents one person row of the spreadsheet
///
/// Optional fields are `None` when the cell is empty. References to other
/// people hold the referenced `ID` verbatim; they are not checked here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Identity key (e.g., "12")
    pub id: String,

    /// Raw generation value, possibly empty
    pub generation: String,

    /// Display name
    pub name: Option<String>,

    /// Birth date as written in the sheet
    pub birth_date: Option<String>,

    /// Death date as written in the sheet
    pub death_date: Option<String>,

    /// Photo URL
    pub photo_url: Option<String>,

    /// `ID` of the father
    pub father_id: Option<String>,

    /// `ID` of the mother
    pub mother_id: Option<String>,

    /// `ID` of the spouse
    pub spouse_id: Option<String>,
}

impl PersonRecord {
    /// Create a record with only an identity and a generation
    #[must_use]
    pub fn new(id: impl Into<String>, generation: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            generation: generation.into(),
            ..Self::default()
        }
    }

    /// Map a raw spreadsheet row onto the typed record
    ///
    /// Columns match exactly on the Russian header or case-insensitively on
    /// the English alias. Unknown columns are ignored.
    #[must_use]
    pub fn from_raw(raw: &RawRecord) -> Self {
        let text = |column: (&str, &str)| lookup(raw, column).unwrap_or_default().to_string();
        let optional = |column: (&str, &str)| {
            lookup(raw, column)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            id: text(columns::ID),
            generation: text(columns::GENERATION),
            name: optional(columns::NAME),
            birth_date: optional(columns::BIRTH_DATE),
            death_date: optional(columns::DEATH_DATE),
            photo_url: optional(columns::PHOTO_URL),
            father_id: optional(columns::FATHER_ID),
            mother_id: optional(columns::MOTHER_ID),
            spouse_id: optional(columns::SPOUSE_ID),
        }
    }

    /// Whether the record can be placed in the tree
    ///
    /// Requires a non-empty `ID` made only of ASCII digits.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && self.id.bytes().all(|b| b.is_ascii_digit())
    }

    /// Element id of the card rendered for this person
    #[must_use]
    pub fn element_id(&self) -> String {
        element_id_for(&self.id)
    }

    /// Parent references in drawing order (father first)
    pub fn parent_ids(&self) -> impl Iterator<Item = &str> {
        [self.father_id.as_deref(), self.mother_id.as_deref()]
            .into_iter()
            .flatten()
    }

    /// Set the display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set both parent references
    #[must_use]
    pub fn with_parents(mut self, father_id: Option<&str>, mother_id: Option<&str>) -> Self {
        self.father_id = father_id.map(str::to_string);
        self.mother_id = mother_id.map(str::to_string);
        self
    }

    /// Set the spouse reference
    #[must_use]
    pub fn with_spouse(mut self, spouse_id: impl Into<String>) -> Self {
        self.spouse_id = Some(spouse_id.into());
        self
    }
}

/// Element id used for the card of the person with the given `ID`
#[must_use]
pub fn element_id_for(id: &str) -> String {
    format!("person-{id}")
}

fn lookup<'a>(raw: &'a RawRecord, (header, alias): (&str, &str)) -> Option<&'a str> {
    raw.get(header).or_else(|| {
        raw.fields()
            .rfind(|(h, _)| h.eq_ignore_ascii_case(alias))
            .map(|(_, v)| v)
    })
}
