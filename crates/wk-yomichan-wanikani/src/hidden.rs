//! Learned-hidden resolution: hidden subjects the user has already passed

use anyhow::Context;
use rustc_hash::FxHashSet;

use crate::api::{self, PageFetcher};

/// O(1) lookup of hidden subject ids with a passed assignment
#[derive(Debug, Default, Clone)]
pub struct LearnedHidden {
    set: FxHashSet<u64>,
}

impl LearnedHidden {
    pub fn contains(&self, subject_id: u64) -> bool {
        self.set.contains(&subject_id)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

impl FromIterator<u64> for LearnedHidden {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self {
            set: iter.into_iter().collect(),
        }
    }
}

/// Fetch hidden subjects, then their assignments, keeping passed ones.
///
/// With no hidden subjects the assignment endpoint is never queried.
pub fn resolve_learned_hidden<F: PageFetcher + ?Sized>(
    fetcher: &F,
    base_url: &str,
) -> anyhow::Result<LearnedHidden> {
    log::debug!("Resolving learned hidden subjects...");
    let hidden_ids = api::subjects(fetcher, base_url, true)
        .map(|s| s.map(|s| s.id))
        .collect::<anyhow::Result<Vec<u64>>>()
        .context("Failed to fetch hidden subjects")?;

    let Some(assignments) = api::assignments(fetcher, base_url, &hidden_ids) else {
        log::debug!("No hidden subjects");
        return Ok(LearnedHidden::default());
    };

    let mut learned = FxHashSet::default();
    for assignment in assignments {
        let assignment = assignment.context("Failed to fetch hidden subject assignments")?;
        if assignment.is_passed() {
            learned.insert(assignment.data.subject_id);
        }
    }
    log::info!(
        "{} hidden subjects, {} of them learned",
        hidden_ids.len(),
        learned.len()
    );
    Ok(LearnedHidden { set: learned })
}
