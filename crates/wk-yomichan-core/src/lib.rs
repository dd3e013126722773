//! wk-yomichan Core - Common infrastructure for the dictionary pipeline
//!
//! This crate provides the HTTP plumbing, Yomichan dictionary types and
//! archive writer shared by the WaniKani source crate and the CLI.

pub mod archive;
pub mod dictionary;
pub mod http;
pub mod logging;
pub mod progress;

// Re-exports for convenience
pub use archive::{
    ArchiveSink, INDEX_FILE, KANJI_META_FILE, TERM_META_FILE, write_dictionary,
};
pub use dictionary::{DictionaryIndex, Frequency, FrequencyData, MetaEntry};
pub use http::{HttpError, SHARED_RUNTIME, http_client};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, fmt_num};
