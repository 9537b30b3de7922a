//! Conditional, never-overwriting writes of café records.

use cafemap_core::{record_path, Category, Region};
use cafemap_db::{DocumentPath, DocumentStore, StoreError};
use cafemap_places::{build_cafe_record, PlaceCandidate, PlaceDetail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteOutcome {
    Written,
    Skipped,
    Failed,
}

/// Writes qualifying places under `category/city/district/{name}_{place_id}`.
///
/// Existing documents are never touched, which makes re-running a region
/// safe: everything already written is skipped.
pub(crate) struct DatasetWriter<S> {
    store: S,
}

impl<S: DocumentStore> DatasetWriter<S> {
    pub(crate) fn new(store: S) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    fn path_for(
        category: Category,
        region: &Region,
        candidate: &PlaceCandidate,
    ) -> Result<DocumentPath, StoreError> {
        DocumentPath::parse(&record_path(
            category,
            region,
            &candidate.name,
            &candidate.place_id,
        ))
    }

    /// Whether the candidate already has a record in `category`.
    pub(crate) async fn exists(
        &self,
        category: Category,
        region: &Region,
        candidate: &PlaceCandidate,
    ) -> Result<bool, StoreError> {
        let path = Self::path_for(category, region, candidate)?;
        Ok(self.store.get(&path).await?.is_some())
    }

    /// Writes the record if it is absent and the place qualifies.
    ///
    /// Store failures are logged and reported as [`WriteOutcome::Failed`].
    pub(crate) async fn upsert_if_absent(
        &self,
        category: Category,
        region: &Region,
        candidate: &PlaceCandidate,
        detail: &PlaceDetail,
    ) -> WriteOutcome {
        let path = match Self::path_for(category, region, candidate) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(
                    %category,
                    place_id = %candidate.place_id,
                    error = %e,
                    "cannot build record path"
                );
                return WriteOutcome::Failed;
            }
        };

        match self.store.get(&path).await {
            Ok(Some(_)) => {
                tracing::debug!(%path, "record exists, skipping");
                return WriteOutcome::Skipped;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(%path, error = %e, "existence check failed");
                return WriteOutcome::Failed;
            }
        }

        if !category.qualifies(candidate.rating, &detail.services()) {
            return WriteOutcome::Skipped;
        }

        let record = build_cafe_record(region, candidate, detail);
        let data = match serde_json::to_value(&record) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(%path, error = %e, "failed to serialize record");
                return WriteOutcome::Failed;
            }
        };

        match self.store.set(&path, &data).await {
            Ok(()) => {
                tracing::info!(%path, "wrote record");
                WriteOutcome::Written
            }
            Err(e) => {
                tracing::warn!(%path, error = %e, "write failed");
                WriteOutcome::Failed
            }
        }
    }
}
