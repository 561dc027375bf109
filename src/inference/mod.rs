//! Premium-category inference.
//!
//! The classifier is a trait so handlers and tests can run against
//! doubles; the shipped implementation is `LinearModel`, a multinomial
//! logistic regression loaded from a JSON artifact at startup.

mod linear;

pub use linear::LinearModel;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::PremiumFeatures;

/// Outcome of one classification.
///
/// `class_probabilities` carries every class, each rounded to 4 decimals,
/// and `confidence` is the winning class's entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub predicted_category: String,
    pub confidence: f64,
    pub class_probabilities: BTreeMap<String, f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    Read(#[source] std::io::Error),

    #[error("model artifact is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("model artifact is inconsistent: {0}")]
    Invalid(String),
}

pub trait Classifier: Send + Sync {
    /// Version string reported by `GET /health`.
    fn version(&self) -> &str;

    /// Classify one derived feature record.
    fn predict(&self, features: &PremiumFeatures) -> Result<Prediction, ModelError>;
}
