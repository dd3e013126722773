//! Hidden-subject inclusion filter

use crate::api::PageFetcher;
use crate::hidden::{LearnedHidden, resolve_learned_hidden};
use crate::schema::Subject;
use crate::state::IncludeHidden;

/// Per-run filter context.
///
/// Holds the learned-hidden set once it has been computed; the set is only
/// fetched under [`IncludeHidden::Learned`] and only when the first hidden
/// subject shows up.
pub struct HiddenFilter<'a, F: ?Sized> {
    policy: IncludeHidden,
    fetcher: &'a F,
    base_url: &'a str,
    learned: Option<LearnedHidden>,
    skipped: usize,
}

impl<'a, F: PageFetcher + ?Sized> HiddenFilter<'a, F> {
    pub fn new(policy: IncludeHidden, fetcher: &'a F, base_url: &'a str) -> Self {
        Self {
            policy,
            fetcher,
            base_url,
            learned: None,
            skipped: 0,
        }
    }

    /// Decide whether `subject` goes into the dictionary
    pub fn keep(&mut self, subject: &Subject) -> anyhow::Result<bool> {
        let keep = match (self.policy, subject.is_hidden()) {
            (IncludeHidden::Learned, true) => self.learned_hidden()?.contains(subject.id),
            (policy, _) => includes(policy, subject, &LearnedHidden::default()),
        };
        if !keep {
            self.skipped += 1;
        }
        Ok(keep)
    }

    /// Hidden subjects rejected so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn learned_hidden(&mut self) -> anyhow::Result<&LearnedHidden> {
        let learned = match self.learned.take() {
            Some(learned) => learned,
            None => resolve_learned_hidden(self.fetcher, self.base_url)?,
        };
        Ok(self.learned.insert(learned))
    }
}

/// Policy decision with a precomputed learned set
pub fn includes(policy: IncludeHidden, subject: &Subject, learned: &LearnedHidden) -> bool {
    match policy {
        IncludeHidden::Yes => true,
        _ if !subject.is_hidden() => true,
        IncludeHidden::No => false,
        IncludeHidden::Learned => learned.contains(subject.id),
    }
}
