use crate::StoreError;

/// A validated document path.
///
/// Segments alternate collection / document id, so a document path always
/// has an even number of non-empty segments. The last segment is the
/// document id and everything before it is the parent collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
    full: String,
    split: usize,
}

impl DocumentPath {
    /// Parses and validates a slash-separated document path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPath`] for empty segments or an odd
    /// segment count.
    pub fn parse(path: &str) -> Result<Self, StoreError> {
        let invalid = |reason: &str| StoreError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let segments: Vec<&str> = path.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid("empty segment"));
        }
        if segments.len() % 2 != 0 {
            return Err(invalid(
                "document paths need an even number of segments (collection/doc pairs)",
            ));
        }

        let split = path.rfind('/').ok_or_else(|| invalid("missing collection"))?;
        Ok(Self {
            full: path.to_string(),
            split,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// Parent collection path, e.g. `highRatings/台北市/大安區`.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.full[..self.split]
    }

    /// Document id, the final segment.
    #[must_use]
    pub fn doc_id(&self) -> &str {
        &self.full[self.split + 1..]
    }
}

impl std::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}
