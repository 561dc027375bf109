//! Shared types for the API layer.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::inference::Classifier;
use crate::store::RecordStore;

/// Shared context for all API routes.
///
/// The store and classifier sit behind trait objects so tests can swap in
/// doubles. `classifier` is `None` when the model artifact failed to load;
/// the server still runs and `/predict` reports the failure per request.
#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<dyn RecordStore>,
    pub classifier: Option<Arc<dyn Classifier>>,
    store_guard: Arc<Mutex<()>>,
}

impl ApiContext {
    pub fn new(store: Arc<dyn RecordStore>, classifier: Option<Arc<dyn Classifier>>) -> Self {
        Self {
            store,
            classifier,
            store_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Serialize a load-mutate-save sequence against the store.
    ///
    /// Every mutating handler holds this guard for the whole sequence, so
    /// two concurrent writes cannot interleave and drop one another's
    /// changes.
    pub async fn lock_store(&self) -> MutexGuard<'_, ()> {
        self.store_guard.lock().await
    }
}
