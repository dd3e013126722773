//! wk-yomichan WaniKani - WaniKani subjects to Yomichan frequency metadata
//!
//! Fetches kanji and vocabulary subjects from the WaniKani API v2, filters
//! hidden items, and writes a Yomichan meta dictionary whose frequency is
//! the WaniKani level.
//!
//! # Example
//!
//! ```no_run
//! use wk_yomichan_core::ProgressContext;
//! use wk_yomichan_wanikani::{Config, IncludeHidden, run};
//!
//! let config = Config {
//!     api_key: std::env::var("WANIKANI_API_KEY").unwrap(),
//!     include_hidden: IncludeHidden::Learned,
//!     ..Default::default()
//! };
//!
//! let summary = run(&config, &ProgressContext::new()).expect("Pipeline failed");
//! println!("Wrote {}", summary.archive_path.display());
//! ```

pub mod api;
pub mod config;
pub mod filter;
pub mod hidden;
pub mod runner;
pub mod schema;
pub mod state;
pub mod transform;

// Re-exports for convenience
pub use api::{ApiClient, PageFetcher, Paged};
pub use config::Config;
pub use runner::{MetaBanks, Summary, run, run_with};
pub use state::{IncludeHidden, SubjectKind};
