//! Console preparation for localized output.
//!
//! The culture is chosen from the configured UI language or the locale
//! environment variables. Any culture other than English needs UTF-8 output.
//! Rust already writes UTF-8 to Unix terminals and UTF-16 to the Windows
//! console, so preparing the console only records and logs the decision.

use core_types::Culture;
use strum_macros::Display;

/// Locale variables in lookup order.
pub const LOCALE_VARIABLES: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OutputEncoding {
    /// Keep whatever the console uses.
    #[strum(serialize = "unchanged")]
    Unchanged,
    #[strum(serialize = "UTF-8")]
    Utf8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSetup {
    pub culture: Culture,
    pub encoding: OutputEncoding,
    /// Where the culture came from, e.g. `LANG=de_DE.UTF-8`.
    pub source: Option<String>,
}

/// Selects the culture and output encoding.
///
/// `ui_language` (from the configuration file) wins over the locale variables,
/// which are read through `lookup_env` so callers and tests control the environment.
pub fn prepare_console<F>(ui_language: Option<&str>, lookup_env: F) -> ConsoleSetup
where
    F: Fn(&str) -> Option<String>,
{
    let configured = ui_language
        .filter(|value| !value.trim().is_empty())
        .map(|value| ("ui_language".to_string(), value.to_string()));
    let from_env = || {
        LOCALE_VARIABLES.into_iter().find_map(|name| {
            lookup_env(name)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (name.to_string(), value))
        })
    };

    let (culture, source) = match configured.or_else(from_env) {
        Some((name, value)) => (select_culture(&value), Some(format!("{}={}", name, value))),
        None => (Culture::English, None),
    };
    let encoding = if culture.is_english() {
        OutputEncoding::Unchanged
    } else {
        OutputEncoding::Utf8
    };

    let setup = ConsoleSetup {
        culture,
        encoding,
        source,
    };
    tracing::debug!(
        "Console culture {} (from {}), output encoding {}",
        setup.culture,
        setup.source.as_deref().unwrap_or("default"),
        setup.encoding
    );
    setup
}

/// Parses `language[_REGION][.encoding][@modifier]` and picks the localized
/// culture, falling back to English. `C` and `POSIX` select English.
pub fn select_culture(locale: &str) -> Culture {
    let locale = locale.trim();
    let without_modifier = locale.split('@').next().unwrap_or_default();
    let name = without_modifier.split('.').next().unwrap_or_default();
    if name.eq_ignore_ascii_case("C") || name.eq_ignore_ascii_case("POSIX") {
        return Culture::English;
    }
    Culture::try_from(name).unwrap_or(Culture::English)
}

/// Formats the product name and version shown by `--version` and in logs.
pub fn product_banner(name: &str, version: &str) -> String {
    format!("{} version {}", name, version)
}
