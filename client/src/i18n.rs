//! Translation lookup for user-visible messages.
//!
//! The translation tooling compiles `.po` files into one JSON table shaped
//! `{ "<lang>": { "<msgid>": "<msgstr>" } }`. The catalog picks the table of
//! the active language and falls back to the msgid itself.

#[cfg(test)]
#[path = "i18n_test.rs"]
mod i18n_test;

use std::collections::HashMap;

/// Compiled translation table shipped with the UI.
const EMBEDDED_TABLE: &str = include_str!("../i18n/translations.json");

/// Source language of every msgid.
pub const SOURCE_LANGUAGE: &str = "en";

/// Translations for one language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    language: String,
    strings: HashMap<String, String>,
}

impl Catalog {
    /// Catalog that returns every msgid unchanged.
    #[must_use]
    pub fn source() -> Self {
        Self {
            language: SOURCE_LANGUAGE.to_owned(),
            strings: HashMap::new(),
        }
    }

    /// Pick `language` out of a compiled table.
    ///
    /// A regional tag (`de-DE`) falls back to its primary subtag (`de`);
    /// unknown languages produce the source catalog.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when `table` is not a compiled translation table.
    pub fn from_table(table: &str, language: &str) -> Result<Self, serde_json::Error> {
        let mut all: HashMap<String, HashMap<String, String>> = serde_json::from_str(table)?;
        let primary = language.split(['-', '_']).next().unwrap_or(language);
        let picked = all
            .remove_entry(language)
            .or_else(|| all.remove_entry(primary));
        Ok(match picked {
            Some((language, strings)) => Self { language, strings },
            None => Self::source(),
        })
    }

    /// Catalog from the embedded table, or the source catalog if that fails.
    #[must_use]
    pub fn embedded(language: &str) -> Self {
        Self::from_table(EMBEDDED_TABLE, language).unwrap_or_else(|e| {
            log::error!("embedded translation table is invalid: {e}");
            Self::source()
        })
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translate `msgid`; untranslated and empty entries return the msgid.
    #[must_use]
    pub fn get_string(&self, msgid: &str) -> String {
        match self.strings.get(msgid) {
            Some(msgstr) if !msgstr.is_empty() => msgstr.clone(),
            _ => msgid.to_owned(),
        }
    }
}
