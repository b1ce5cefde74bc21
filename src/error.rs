use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum VocabError {
    /// A required field was blank. Nothing was changed.
    #[error("validation error: {0}")]
    Validation(String),
    /// The index does not address an entry in the current store.
    #[error("index {index} out of range (store has {len} entries)")]
    Index { index: usize, len: usize },
    /// The flashcard deck is empty, so there is no current card to act on.
    #[error("no card selected")]
    NoCurrentCard,
    /// The mutation was applied in memory but could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl VocabError {
    pub fn validation(message: &str) -> Self {
        Self::Validation(message.to_string())
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
