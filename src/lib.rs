//! Vitalpoint: insurance premium prediction and patient records over HTTP.
//!
//! Two small services share one process. The prediction side derives
//! features (BMI, lifestyle risk, age group, city tier) from a user
//! profile and runs a pre-trained classifier over them. The records side
//! is a CRUD API over a flat JSON file of patients, with BMI and verdict
//! recomputed on every read.

pub mod api;
pub mod cities;
pub mod config;
pub mod features;
pub mod inference;
pub mod models;
pub mod store;
pub mod validate;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::types::ApiContext;
use crate::inference::{Classifier, LinearModel};
use crate::store::JsonFileStore;

/// Wire up logging, the store and the classifier, then serve until
/// ctrl-c.
///
/// A model artifact that fails to load is logged and skipped; the server
/// still starts and `/predict` reports the failure per request.
pub async fn run() -> Result<(), api::server::ServeError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let model_path = config::model_file();
    let classifier: Option<Arc<dyn Classifier>> = match LinearModel::from_file(&model_path) {
        Ok(model) => {
            tracing::info!(
                path = %model_path.display(),
                version = model.version(),
                "prediction model loaded"
            );
            Some(Arc::new(model))
        }
        Err(e) => {
            tracing::warn!(
                path = %model_path.display(),
                error = %e,
                "prediction model unavailable, /predict will fail until fixed"
            );
            None
        }
    };

    let patients_path = config::patients_file();
    tracing::info!(path = %patients_path.display(), "patient store ready");
    let store = Arc::new(JsonFileStore::new(patients_path));

    let ctx = ApiContext::new(store, classifier);
    api::server::serve(config::bind_addr(), ctx).await
}
