use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::features::round4;
use crate::inference::{Classifier, ModelError, Prediction};
use crate::models::PremiumFeatures;

/// On-disk shape of the trained artifact.
///
/// `weights[i]` maps feature keys to the coefficient for `classes[i]`;
/// keys the encoder never emits are simply dead weight, and features with
/// no entry contribute nothing. Classes are listed in sorted order and
/// every probability map preserves it.
#[derive(Debug, Deserialize)]
struct Artifact {
    version: String,
    classes: Vec<String>,
    intercepts: Vec<f64>,
    weights: Vec<BTreeMap<String, f64>>,
}

/// Multinomial logistic regression over the six derived features.
#[derive(Debug)]
pub struct LinearModel {
    version: String,
    classes: Vec<String>,
    intercepts: Vec<f64>,
    weights: Vec<BTreeMap<String, f64>>,
}

impl LinearModel {
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(ModelError::Read)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let artifact: Artifact = serde_json::from_str(raw)?;

        if artifact.version.is_empty() {
            return Err(ModelError::Invalid("empty version".into()));
        }
        if artifact.classes.is_empty() {
            return Err(ModelError::Invalid("no classes".into()));
        }
        if artifact.intercepts.len() != artifact.classes.len()
            || artifact.weights.len() != artifact.classes.len()
        {
            return Err(ModelError::Invalid(format!(
                "{} classes but {} intercepts and {} weight rows",
                artifact.classes.len(),
                artifact.intercepts.len(),
                artifact.weights.len()
            )));
        }

        Ok(Self {
            version: artifact.version,
            classes: artifact.classes,
            intercepts: artifact.intercepts,
            weights: artifact.weights,
        })
    }

    /// Per-class linear scores for one encoded feature record.
    fn scores(&self, terms: &[(String, f64)]) -> Vec<f64> {
        self.intercepts
            .iter()
            .zip(&self.weights)
            .map(|(intercept, row)| {
                terms
                    .iter()
                    .map(|(key, value)| row.get(key).copied().unwrap_or(0.0) * value)
                    .sum::<f64>()
                    + intercept
            })
            .collect()
    }
}

impl Classifier for LinearModel {
    fn version(&self) -> &str {
        &self.version
    }

    fn predict(&self, features: &PremiumFeatures) -> Result<Prediction, ModelError> {
        let scores = self.scores(&features.terms());

        // Softmax, shifted by the max score for numeric stability.
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        let probabilities: Vec<f64> = exps.iter().map(|e| e / total).collect();

        // First strict maximum wins, so class order breaks exact ties.
        let mut winner = 0;
        for (i, p) in probabilities.iter().enumerate() {
            if *p > probabilities[winner] {
                winner = i;
            }
        }

        Ok(Prediction {
            predicted_category: self.classes[winner].clone(),
            confidence: round4(probabilities[winner]),
            class_probabilities: self
                .classes
                .iter()
                .zip(&probabilities)
                .map(|(class, p)| (class.clone(), round4(*p)))
                .collect(),
        })
    }
}
