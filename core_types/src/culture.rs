use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::CoreTypeError;

/// Cultures the tool has localized messages for.
///
/// The `Display` form is the culture name (`de`, `pt-BR`, `zh-Hans`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize, Deserialize,
)]
pub enum Culture {
    #[strum(serialize = "cs")]
    Czech,
    #[strum(serialize = "de")]
    German,
    #[strum(serialize = "en")]
    English,
    #[strum(serialize = "es")]
    Spanish,
    #[strum(serialize = "fr")]
    French,
    #[strum(serialize = "it")]
    Italian,
    #[strum(serialize = "ja")]
    Japanese,
    #[strum(serialize = "ko")]
    Korean,
    #[strum(serialize = "pl")]
    Polish,
    #[strum(serialize = "pt-BR")]
    PortugueseBrazil,
    #[strum(serialize = "ru")]
    Russian,
    #[strum(serialize = "tr")]
    Turkish,
    #[strum(serialize = "zh-Hans")]
    ChineseSimplified,
    #[strum(serialize = "zh-Hant")]
    ChineseTraditional,
}

impl Culture {
    /// Maps a lower case language code and optional upper case region to a
    /// localized culture. Returns `None` when there is no localization.
    pub fn from_language_region(language: &str, region: Option<&str>) -> Option<Culture> {
        let culture = match language {
            "cs" => Culture::Czech,
            "de" => Culture::German,
            "en" => Culture::English,
            "es" => Culture::Spanish,
            "fr" => Culture::French,
            "it" => Culture::Italian,
            "ja" => Culture::Japanese,
            "ko" => Culture::Korean,
            "pl" => Culture::Polish,
            "pt" => match region {
                Some("BR") => Culture::PortugueseBrazil,
                _ => return None,
            },
            "ru" => Culture::Russian,
            "tr" => Culture::Turkish,
            "zh" => match region {
                Some("TW") | Some("HK") | Some("MO") | Some("HANT") => Culture::ChineseTraditional,
                _ => Culture::ChineseSimplified,
            },
            _ => return None,
        };
        Some(culture)
    }

    pub fn is_english(&self) -> bool {
        *self == Culture::English
    }
}

impl TryFrom<&str> for Culture {
    type Error = CoreTypeError;

    /// Parses a culture name such as `de`, `pt-BR` or `zh_TW`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut parts = value.split(['-', '_']);
        let language = parts
            .next()
            .map(|language| language.trim().to_ascii_lowercase())
            .unwrap_or_default();
        let region = parts.next().map(|region| region.trim().to_ascii_uppercase());
        Culture::from_language_region(&language, region.as_deref()).ok_or_else(|| {
            CoreTypeError::ConversionError(format!("No localization for culture '{}'", value))
        })
    }
}
