//! WaniKani API client and cursor pagination

use anyhow::Context;
use serde::de::DeserializeOwned;
use wk_yomichan_core::{HttpError, SHARED_RUNTIME, http_client};

use crate::schema::{Assignment, Collection, Subject};

/// Transport seam: GET a URL and return the response body.
///
/// Implementations fail on any non-2xx status; callers never retry.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, HttpError>;
}

/// Authenticated client for the live API
pub struct ApiClient {
    api_key: String,
    revision: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(api_key: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            revision: revision.into(),
        }
    }
}

impl PageFetcher for ApiClient {
    fn fetch(&self, url: &str) -> Result<String, HttpError> {
        SHARED_RUNTIME.block_on(async {
            let resp = http_client()
                .get(url)
                .header("Wanikani-Revision", &self.revision)
                .bearer_auth(&self.api_key)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(HttpError::from_reqwest)?;
            resp.text().await.map_err(HttpError::from_reqwest)
        })
    }
}

/// Lazy sequence over every item of a paginated collection.
///
/// Follows `pages.next_url` until it is `null`. Finite and not restartable;
/// after the first error it yields nothing more.
pub struct Paged<'a, F: ?Sized, T> {
    fetcher: &'a F,
    next_url: Option<String>,
    buffered: std::vec::IntoIter<T>,
    pages_fetched: usize,
}

impl<'a, F: PageFetcher + ?Sized, T: DeserializeOwned> Paged<'a, F, T> {
    pub fn new(fetcher: &'a F, first_url: String) -> Self {
        Self {
            fetcher,
            next_url: Some(first_url),
            buffered: Vec::new().into_iter(),
            pages_fetched: 0,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    fn fetch_page(&mut self, url: &str) -> anyhow::Result<()> {
        let page_no = self.pages_fetched + 1;
        let body = match self.fetcher.fetch(url) {
            Ok(body) => body,
            Err(e) if e.is_unauthorized() => {
                return Err(e).context("API key rejected, check your WaniKani API key");
            }
            Err(e) => return Err(e).with_context(|| format!("Request for page {page_no} failed")),
        };
        let page: Collection<T> = serde_json::from_str(&body)
            .with_context(|| format!("Invalid JSON on page {page_no}"))?;
        self.pages_fetched += 1;
        log::debug!(
            "Fetched page {} ({} items, more: {})",
            self.pages_fetched,
            page.data.len(),
            page.pages.next_url.is_some()
        );
        self.next_url = page.pages.next_url;
        self.buffered = page.data.into_iter();
        Ok(())
    }
}

impl<F: PageFetcher + ?Sized, T: DeserializeOwned> Iterator for Paged<'_, F, T> {
    type Item = anyhow::Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffered.next() {
                return Some(Ok(item));
            }
            let url = self.next_url.take()?;
            if let Err(e) = self.fetch_page(&url) {
                return Some(Err(e));
            }
        }
    }
}

/// `/subjects` restricted to kanji and vocabulary
pub fn subjects_url(base_url: &str, hidden_only: bool) -> String {
    let mut url = format!(
        "{}/subjects?types=kanji,vocabulary",
        base_url.trim_end_matches('/')
    );
    if hidden_only {
        url.push_str("&hidden=true");
    }
    url
}

/// `/assignments` for the given subjects
pub fn assignments_url(base_url: &str, subject_ids: &[u64]) -> String {
    let ids: Vec<String> = subject_ids.iter().map(u64::to_string).collect();
    format!(
        "{}/assignments?subject_ids={}",
        base_url.trim_end_matches('/'),
        ids.join(",")
    )
}

pub fn subjects<'a, F: PageFetcher + ?Sized>(
    fetcher: &'a F,
    base_url: &str,
    hidden_only: bool,
) -> Paged<'a, F, Subject> {
    Paged::new(fetcher, subjects_url(base_url, hidden_only))
}

/// Assignments for `subject_ids`; no request is made for an empty list
pub fn assignments<'a, F: PageFetcher + ?Sized>(
    fetcher: &'a F,
    base_url: &str,
    subject_ids: &[u64],
) -> Option<Paged<'a, F, Assignment>> {
    if subject_ids.is_empty() {
        return None;
    }
    Some(Paged::new(fetcher, assignments_url(base_url, subject_ids)))
}
