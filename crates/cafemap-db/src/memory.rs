use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{DocumentPath, DocumentStore, StoreError};

/// In-process store used for dry runs and tests.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: Arc<Mutex<BTreeMap<String, serde_json::Value>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.docs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.lock().await.is_empty()
    }

    /// All stored paths in lexical order.
    pub async fn paths(&self) -> Vec<String> {
        self.docs.lock().await.keys().cloned().collect()
    }
}

impl DocumentStore for MemoryStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.docs.lock().await.get(path.as_str()).cloned())
    }

    async fn set(&self, path: &DocumentPath, data: &serde_json::Value) -> Result<(), StoreError> {
        self.docs
            .lock()
            .await
            .insert(path.as_str().to_string(), data.clone());
        Ok(())
    }

    async fn count_under(&self, prefix: &str) -> Result<u64, StoreError> {
        let prefix = format!("{}/", prefix.trim_end_matches('/'));
        let docs = self.docs.lock().await;
        let count = docs.keys().filter(|k| k.starts_with(&prefix)).count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }
}
