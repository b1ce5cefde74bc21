pub mod keys;
pub mod migrate;
pub mod operations;
pub mod trees;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::Db;
use thiserror::Error;

/// Local key-value medium holding the persisted session state.
#[derive(Debug)]
pub struct Store {
    db: Db,
    pub local_storage: sled::Tree,
    pub meta: sled::Tree,
    quota_bytes: usize,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("corrupt data in slot {slot}: {message}")]
    Corrupt { slot: String, message: String },
    #[error("storage quota exceeded: {needed} bytes needed, quota is {quota} bytes")]
    QuotaExceeded { needed: usize, quota: usize },
    #[error("migration error at version {version}: {message}")]
    Migration { version: u32, message: String },
}

impl StoreError {
    pub fn corrupt(slot: &str, message: impl ToString) -> Self {
        Self::Corrupt {
            slot: slot.to_string(),
            message: message.to_string(),
        }
    }
}

impl Store {
    pub fn open(sled_path: &str, quota_bytes: usize) -> Result<Self, StoreError> {
        let db = sled::open(sled_path)?;
        let local_storage = db.open_tree(trees::LOCAL_STORAGE)?;
        let meta = db.open_tree(trees::META)?;

        Ok(Self {
            db,
            local_storage,
            meta,
            quota_bytes,
        })
    }

    pub fn run_migrations(&self) -> Result<(), StoreError> {
        migrate::run(self)
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    pub fn quota_bytes(&self) -> usize {
        self.quota_bytes
    }

    pub(crate) fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec(value)?)
    }

    pub(crate) fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
