//! Merges per-cell search results into one candidate list per region.

use std::collections::HashSet;

use crate::types::PlaceCandidate;

/// Keeps the first occurrence of every `place_id`, in arrival order.
///
/// Scoped to one region's search phase; create a fresh one per region.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
    candidates: Vec<PlaceCandidate>,
    duplicates: usize,
}

impl Deduplicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `candidate` unless its `place_id` was already seen.
    ///
    /// Returns `true` if the candidate was kept.
    pub fn push(&mut self, candidate: PlaceCandidate) -> bool {
        if self.seen.contains(&candidate.place_id) {
            tracing::debug!(place_id = %candidate.place_id, "dropping duplicate candidate");
            self.duplicates += 1;
            return false;
        }
        self.seen.insert(candidate.place_id.clone());
        self.candidates.push(candidate);
        true
    }

    /// Pushes every candidate and returns how many were new.
    pub fn extend<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = PlaceCandidate>,
    {
        candidates
            .into_iter()
            .map(|c| self.push(c))
            .filter(|&kept| kept)
            .count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Number of candidates dropped because their id was already seen.
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    #[must_use]
    pub fn candidates(&self) -> &[PlaceCandidate] {
        &self.candidates
    }

    #[must_use]
    pub fn into_candidates(self) -> Vec<PlaceCandidate> {
        self.candidates
    }
}

/// One-shot form of [`Deduplicator`].
pub fn dedupe_candidates<I>(candidates: I) -> Vec<PlaceCandidate>
where
    I: IntoIterator<Item = PlaceCandidate>,
{
    let mut dedup = Deduplicator::new();
    dedup.extend(candidates);
    dedup.into_candidates()
}
