//! User-visible text for cards, bands and status messages

use std::fmt;
use std::str::FromStr;

/// Display language of the rendered page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    /// Russian, matching the spreadsheet headers
    #[default]
    Ru,
    /// English
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ru" | "russian" => Ok(Self::Ru),
            "en" | "english" => Ok(Self::En),
            _ => Err(format!("Unknown locale: '{s}'")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ru => write!(f, "ru"),
            Self::En => write!(f, "en"),
        }
    }
}

/// Fixed strings used while building and reporting a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Page title
    pub title: &'static str,
    /// Prefix of each generation band label, followed by the key
    pub generation: &'static str,
    /// Shown instead of an empty name
    pub missing_name: &'static str,
    /// Shown instead of an empty birth date
    pub unknown_birth: &'static str,
    /// Shown instead of an empty death date
    pub present: &'static str,
    /// Text inside the placeholder photo
    pub no_photo: &'static str,
    /// Container message when no valid records exist
    pub no_data: &'static str,
    /// Status while the sheet is being fetched
    pub loading: &'static str,
    /// Status after a failed fetch
    pub load_failed: &'static str,
}

impl Labels {
    /// Labels for the given locale
    #[must_use]
    pub const fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Ru => Self {
                title: "Семейное древо",
                generation: "Поколение",
                missing_name: "—",
                unknown_birth: "?",
                present: "н.в.",
                no_photo: "Нет фото",
                no_data: "Нет данных.",
                loading: "Загрузка данных…",
                load_failed: "Ошибка загрузки. Проверьте подключение.",
            },
            Locale::En => Self {
                title: "Family tree",
                generation: "Generation",
                missing_name: "—",
                unknown_birth: "?",
                present: "present",
                no_photo: "No photo",
                no_data: "No data.",
                loading: "Loading data…",
                load_failed: "Load failed. Check your connection.",
            },
        }
    }

    /// Life span label: `"{birth or '?'} – {death or present}"`
    #[must_use]
    pub fn life_span(&self, birth: Option<&str>, death: Option<&str>) -> String {
        format!(
            "{} – {}",
            birth.unwrap_or(self.unknown_birth),
            death.unwrap_or(self.present)
        )
    }

    /// Band label for a generation key
    #[must_use]
    pub fn generation_label(&self, key: &str) -> String {
        format!("{} {key}", self.generation)
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_life_span_fallbacks() {
        let labels = Labels::for_locale(Locale::Ru);
        assert_eq!(labels.life_span(Some("1950"), Some("2010")), "1950 – 2010");
        assert_eq!(labels.life_span(None, None), "? – н.в.");

        let en = Labels::for_locale(Locale::En);
        assert_eq!(en.life_span(Some("1980"), None), "1980 – present");
    }

    #[test]
    fn test_generation_label() {
        assert_eq!(Labels::default().generation_label("2"), "Поколение 2");
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("RU".parse::<Locale>(), Ok(Locale::Ru));
        assert_eq!("english".parse::<Locale>(), Ok(Locale::En));
        assert!("de".parse::<Locale>().is_err());
        assert_eq!(Locale::En.to_string(), "en");
    }
}
