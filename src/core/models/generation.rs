//! Generation key model

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Generation used when a record leaves the column blank
pub const DEFAULT_GENERATION: &str = "1";

/// Key of one generation band
///
/// Bands are ordered by numeric value, so "2" sorts before "10". Keys that
/// are not numbers sort after every numeric key, lexicographically among
/// themselves. See [`GenerationKey::sort_order`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationKey(String);

impl GenerationKey {
    /// Build a key from a raw generation cell
    ///
    /// The value is trimmed; an empty value falls back to [`DEFAULT_GENERATION`].
    #[must_use]
    pub fn from_cell(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self(DEFAULT_GENERATION.to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The key as written in the sheet
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Band order of two keys
    ///
    /// Equal numbers written differently ("2", "02") compare equal, so the
    /// band seen first in the sheet stays first.
    #[must_use]
    pub fn sort_order(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }

    fn numeric(&self) -> Option<f64> {
        self.0.parse::<f64>().ok().filter(|n| n.is_finite())
    }
}

impl fmt::Display for GenerationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
