//! WaniKani pipeline configuration

use std::path::PathBuf;

use crate::state::IncludeHidden;

pub const DEFAULT_BASE_URL: &str = "https://api.wanikani.com/v2";
pub const DEFAULT_API_REVISION: &str = "20170710";
pub const ARCHIVE_NAME: &str = "wk-yomichan-metadata.zip";
pub const DICTIONARY_TITLE: &str = "WK";
pub const REVISION_PREFIX: &str = "wk-meta-";

/// Runtime configuration for the WaniKani pipeline
#[derive(Clone)]
pub struct Config {
    /// Personal API token (v2)
    pub api_key: String,
    /// API root, without trailing slash
    pub base_url: String,
    /// Value of the `Wanikani-Revision` header
    pub api_revision: String,
    pub include_hidden: IncludeHidden,
    /// Directory that receives the archive
    pub output_dir: PathBuf,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_revision", &self.api_revision)
            .field("include_hidden", &self.include_hidden)
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_revision: DEFAULT_API_REVISION.to_string(),
            include_hidden: IncludeHidden::No,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(ARCHIVE_NAME)
    }
}
