//! WaniKani API v2 JSON structures (only the fields the pipeline reads)

use serde::Deserialize;

/// One page of a collection endpoint
#[derive(Debug, Deserialize)]
pub struct Collection<T> {
    pub data: Vec<T>,
    pub pages: Pages,
}

#[derive(Debug, Deserialize)]
pub struct Pages {
    /// Absolute URL of the following page, `null` on the last one
    #[serde(default)]
    pub next_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subject {
    pub id: u64,
    /// `kanji`, `vocabulary`, ...
    pub object: String,
    pub data: SubjectData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubjectData {
    #[serde(default)]
    pub characters: Option<String>,
    pub level: u32,
    #[serde(default)]
    pub hidden_at: Option<String>,
    #[serde(default)]
    pub readings: Vec<Reading>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Reading {
    pub reading: String,
}

impl Subject {
    pub fn is_hidden(&self) -> bool {
        self.data.hidden_at.is_some()
    }
}

#[derive(Debug, Deserialize)]
pub struct Assignment {
    pub data: AssignmentData,
}

#[derive(Debug, Deserialize)]
pub struct AssignmentData {
    pub subject_id: u64,
    #[serde(default)]
    pub passed_at: Option<String>,
}

impl Assignment {
    pub fn is_passed(&self) -> bool {
        self.data.passed_at.is_some()
    }
}
