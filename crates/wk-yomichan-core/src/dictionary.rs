//! Yomichan dictionary types (format 3)
//!
//! Field names and the 3-element tuple shape are what the extension's
//! importer expects; serialization must not change them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Meta type tag for frequency entries
pub const FREQ_MODE: &str = "freq";

/// Dictionary format version written to `index.json`
pub const DICTIONARY_FORMAT: u8 = 3;

/// Contents of `index.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryIndex {
    pub revision: String,
    pub title: String,
    pub format: u8,
}

impl DictionaryIndex {
    /// Index whose revision is `<prefix><date>` with an ISO date
    pub fn dated(title: &str, revision_prefix: &str, date: NaiveDate) -> Self {
        Self {
            revision: format!("{revision_prefix}{}", date.format("%Y-%m-%d")),
            title: title.to_string(),
            format: DICTIONARY_FORMAT,
        }
    }
}

/// Frequency value with the label shown in the popup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub value: u32,
    #[serde(rename = "displayValue")]
    pub display_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrequencyData {
    Nested { reading: String, frequency: Frequency },
    Simple(Frequency),
}

/// One `[headword, "freq", data]` row of a term or kanji meta bank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaEntry(pub String, pub String, pub FrequencyData);

impl MetaEntry {
    pub fn freq(headword: impl Into<String>, data: FrequencyData) -> Self {
        Self(headword.into(), FREQ_MODE.to_string(), data)
    }

    pub fn headword(&self) -> &str {
        &self.0
    }

    pub fn data(&self) -> &FrequencyData {
        &self.2
    }
}
