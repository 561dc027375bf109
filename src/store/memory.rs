use std::sync::Mutex;

use crate::store::{PatientMap, RecordStore, StoreError};

/// In-memory store, used by tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<PatientMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(records: PatientMap) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl RecordStore for MemoryStore {
    fn load_all(&self) -> Result<PatientMap, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.clone())
    }

    fn save_all(&self, records: &PatientMap) -> Result<(), StoreError> {
        let mut guard = self.records.lock().map_err(|_| StoreError::LockPoisoned)?;
        *guard = records.clone();
        Ok(())
    }
}
