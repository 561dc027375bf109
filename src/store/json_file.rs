use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::store::{PatientMap, RecordStore, StoreError};

/// Patient records in a single pretty-printed JSON file.
///
/// Saves go through a temp file in the same directory followed by a
/// rename, so a crash mid-write never leaves a half-written store.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonFileStore {
    fn load_all(&self) -> Result<PatientMap, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PatientMap::new());
            }
            Err(e) => return Err(StoreError::Read(e)),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    fn save_all(&self, records: &PatientMap) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(StoreError::Write)?;
        tmp.write_all(json.as_bytes()).map_err(StoreError::Write)?;
        tmp.persist(&self.path).map_err(|e| StoreError::Write(e.error))?;
        Ok(())
    }
}
