use std::future::Future;

use crate::{DocumentPath, StoreError};

/// Point reads and writes against a hierarchical document store.
pub trait DocumentStore {
    /// Returns the document at `path`, or `None` if it does not exist.
    fn get(
        &self,
        path: &DocumentPath,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, StoreError>> + Send;

    /// Creates or replaces the document at `path`.
    fn set(
        &self,
        path: &DocumentPath,
        data: &serde_json::Value,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Number of documents whose path starts with `prefix/`.
    fn count_under(&self, prefix: &str) -> impl Future<Output = Result<u64, StoreError>> + Send;
}
