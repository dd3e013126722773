//! Main runner: fetch → filter → transform → archive

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use wk_yomichan_core::{DictionaryIndex, MetaEntry, ProgressContext, fmt_num, write_dictionary};

use crate::api::{self, ApiClient, PageFetcher};
use crate::config::{ARCHIVE_NAME, Config, DICTIONARY_TITLE, REVISION_PREFIX};
use crate::filter::HiddenFilter;
use crate::state::SubjectKind;
use crate::transform::subject_to_entries;

/// Progress update interval in subjects
const UPDATE_INTERVAL: usize = 500;

/// Pipeline execution summary
#[derive(Debug)]
pub struct Summary {
    pub subjects_fetched: usize,
    pub hidden_skipped: usize,
    pub kanji_entries: usize,
    pub vocabulary_entries: usize,
    pub archive_path: PathBuf,
    pub elapsed: Duration,
}

/// Term and kanji banks in fetch order
#[derive(Debug, Default)]
pub struct MetaBanks {
    pub terms: Vec<MetaEntry>,
    pub kanji: Vec<MetaEntry>,
    pub subjects_fetched: usize,
    pub hidden_skipped: usize,
}

impl MetaBanks {
    fn push(&mut self, kind: SubjectKind, entries: Vec<MetaEntry>) {
        match kind {
            SubjectKind::Kanji => self.kanji.extend(entries),
            SubjectKind::Vocabulary => self.terms.extend(entries),
        }
    }
}

/// Run the pipeline against the live API
pub fn run(config: &Config, progress: &ProgressContext) -> Result<Summary> {
    anyhow::ensure!(!config.api_key.is_empty(), "No API key specified");
    let client = ApiClient::new(config.api_key.as_str(), config.api_revision.as_str());
    run_with(config, &client, progress)
}

/// Run the pipeline with an arbitrary transport
pub fn run_with<F: PageFetcher + ?Sized>(
    config: &Config,
    fetcher: &F,
    progress: &ProgressContext,
) -> Result<Summary> {
    let start = Instant::now();

    log::info!("Fetching and processing WaniKani subjects...");
    let banks = collect(config, fetcher, progress)?;

    log::info!("Creating archive...");
    let archive_path = write_archive(config, &banks, chrono::Local::now().date_naive())?;

    let summary = Summary {
        subjects_fetched: banks.subjects_fetched,
        hidden_skipped: banks.hidden_skipped,
        kanji_entries: banks.kanji.len(),
        vocabulary_entries: banks.terms.len(),
        archive_path,
        elapsed: start.elapsed(),
    };
    log::info!("Created file {}", summary.archive_path.display());
    Ok(summary)
}

/// Stream every subject through the filter and transformer
pub fn collect<F: PageFetcher + ?Sized>(
    config: &Config,
    fetcher: &F,
    progress: &ProgressContext,
) -> Result<MetaBanks> {
    let pb = progress.stage_line("subjects");
    pb.set_message("requesting first page...");

    let mut filter = HiddenFilter::new(config.include_hidden, fetcher, &config.base_url);
    let mut banks = MetaBanks::default();

    for subject in api::subjects(fetcher, &config.base_url, false) {
        let subject = subject.context("Failed to fetch subjects")?;
        banks.subjects_fetched += 1;
        if banks.subjects_fetched.is_multiple_of(UPDATE_INTERVAL) {
            pb.set_message(format!("{} subjects", fmt_num(banks.subjects_fetched)));
        }

        if !filter.keep(&subject)? {
            log::trace!("Skipping hidden subject {}", subject.id);
            continue;
        }
        let (kind, entries) = subject_to_entries(&subject)?;
        banks.push(kind, entries);
    }
    banks.hidden_skipped = filter.skipped();

    pb.finish_with_message(format!(
        "{} subjects ({} hidden skipped)",
        fmt_num(banks.subjects_fetched),
        fmt_num(banks.hidden_skipped)
    ));
    log::debug!(
        "{} kanji entries, {} vocabulary entries",
        banks.kanji.len(),
        banks.terms.len()
    );
    Ok(banks)
}

/// Write the three JSON banks into `<output_dir>/wk-yomichan-metadata.zip`
pub fn write_archive(config: &Config, banks: &MetaBanks, today: NaiveDate) -> Result<PathBuf> {
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;
    let index = DictionaryIndex::dated(DICTIONARY_TITLE, REVISION_PREFIX, today);
    write_dictionary(
        &config.output_dir,
        ARCHIVE_NAME,
        &index,
        &banks.terms,
        &banks.kanji,
    )
    .with_context(|| format!("Failed to write {}", config.archive_path().display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::subjects_url;
    use crate::api::testing::{FakeFetcher, collection};
    use crate::state::IncludeHidden;
    use serde_json::json;
    use tempfile::TempDir;

    const BASE: &str = "https://api.test/v2";

    fn config(dir: &TempDir, policy: IncludeHidden) -> Config {
        Config {
            api_key: "k".to_string(),
            base_url: BASE.to_string(),
            include_hidden: policy,
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn collect_splits_banks_in_order() {
        let fetcher = FakeFetcher::default().page(
            &subjects_url(BASE, false),
            collection(
                &[
                    json!({"id": 1, "object": "kanji", "data": {"characters": "日", "level": 3, "hidden_at": null}}),
                    json!({"id": 2, "object": "vocabulary", "data": {"characters": "日本", "level": 3, "hidden_at": null,
                        "readings": [{"reading": "にほん"}, {"reading": "にっぽん"}]}}),
                    json!({"id": 3, "object": "kanji", "data": {"characters": "本", "level": 2, "hidden_at": "2020"}}),
                    json!({"id": 4, "object": "kanji", "data": {"characters": "月", "level": 1, "hidden_at": null}}),
                ],
                None,
            ),
        );
        let dir = TempDir::new().unwrap();
        let banks = collect(
            &config(&dir, IncludeHidden::No),
            &fetcher,
            &ProgressContext::hidden(),
        )
        .unwrap();

        assert_eq!(banks.subjects_fetched, 4);
        assert_eq!(banks.hidden_skipped, 1);
        let kanji: Vec<_> = banks.kanji.iter().map(|e| e.headword()).collect();
        assert_eq!(kanji, vec!["日", "月"]);
        assert_eq!(banks.terms.len(), 2);
    }

    #[test]
    fn unknown_type_aborts_without_archive() {
        let fetcher = FakeFetcher::default().page(
            &subjects_url(BASE, false),
            collection(
                &[json!({"id": 1, "object": "radical", "data": {"characters": "一", "level": 1, "hidden_at": null}})],
                None,
            ),
        );
        let dir = TempDir::new().unwrap();
        let result = run_with(
            &config(&dir, IncludeHidden::Yes),
            &fetcher,
            &ProgressContext::hidden(),
        );

        assert!(result.is_err());
        assert!(!dir.path().join(ARCHIVE_NAME).exists());
    }

    #[test]
    fn run_requires_api_key() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            api_key: String::new(),
            ..config(&dir, IncludeHidden::No)
        };
        let err = run(&config, &ProgressContext::hidden()).unwrap_err();
        assert!(err.to_string().contains("No API key"));
    }

    #[test]
    fn write_archive_names_revision_by_date() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(
            &config(&dir, IncludeHidden::No),
            &MetaBanks::default(),
            NaiveDate::from_ymd_opt(2023, 11, 2).unwrap(),
        )
        .unwrap();

        let mut archive = zip::ZipArchive::new(std::fs::File::open(path).unwrap()).unwrap();
        let index: DictionaryIndex =
            serde_json::from_reader(archive.by_name("index.json").unwrap()).unwrap();
        assert_eq!(index.revision, "wk-meta-2023-11-02");
        assert_eq!(index.title, "WK");
        assert_eq!(index.format, 3);
    }
}
