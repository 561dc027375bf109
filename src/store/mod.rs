//! Flat-file persistence for patient records.
//!
//! The store works wholesale: handlers load the full id → record map,
//! mutate it, and save it back. `RecordStore` is a trait so the API layer
//! can run against an in-memory double in tests.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::collections::BTreeMap;

use crate::models::PatientRecord;

/// Full id → record mapping held by the store. A `BTreeMap` keeps both
/// the file and every listing in stable id order.
pub type PatientMap = BTreeMap<String, PatientRecord>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read store file: {0}")]
    Read(#[source] std::io::Error),

    #[error("store file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("failed to write store file: {0}")]
    Write(#[source] std::io::Error),

    #[error("store lock poisoned")]
    LockPoisoned,
}

pub trait RecordStore: Send + Sync {
    /// Load every record. A store that does not exist yet is empty.
    fn load_all(&self) -> Result<PatientMap, StoreError>;

    /// Replace the entire stored map with `records`.
    fn save_all(&self, records: &PatientMap) -> Result<(), StoreError>;
}
