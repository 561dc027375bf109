use serde::{Deserialize, Serialize};

use crate::cities;
use crate::features;
use crate::models::enums::{AgeGroup, LifestyleRisk, Occupation};

/// Raw request body for `POST /predict`.
///
/// Loose field types for the same reason as `NewPatient`: the validator
/// reports all violations together.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub age: i64,
    pub weight: f64,
    pub height: f64,
    pub income_lpa: f64,
    pub smoker: bool,
    pub city: String,
    pub occupation: String,
}

/// A validated profile: ranges checked, city normalized, occupation typed.
///
/// The only way to build one is through `validate::user_profile`.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskProfile {
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub income_lpa: f64,
    pub smoker: bool,
    pub city: String,
    pub occupation: Occupation,
}

impl RiskProfile {
    /// Raw (unrounded) BMI used for feature derivation.
    pub fn bmi(&self) -> f64 {
        features::bmi(self.weight, self.height)
    }

    pub fn lifestyle_risk(&self) -> LifestyleRisk {
        features::lifestyle_risk(self.smoker, self.bmi())
    }

    pub fn age_group(&self) -> AgeGroup {
        features::age_group(self.age)
    }

    pub fn city_tier(&self) -> u8 {
        cities::city_tier(&self.city)
    }

    /// Derive the full feature record handed to the classifier.
    pub fn features(&self) -> PremiumFeatures {
        PremiumFeatures {
            bmi: self.bmi(),
            age_group: self.age_group(),
            lifestyle_risk: self.lifestyle_risk(),
            city_tier: self.city_tier(),
            income_lpa: self.income_lpa,
            occupation: self.occupation,
        }
    }
}

/// The six derived features consumed by the premium classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PremiumFeatures {
    pub bmi: f64,
    pub age_group: AgeGroup,
    pub lifestyle_risk: LifestyleRisk,
    pub city_tier: u8,
    pub income_lpa: f64,
    pub occupation: Occupation,
}

impl PremiumFeatures {
    /// Encoded `(key, value)` terms: numeric features by name, categorical
    /// features as `name=value` indicators set to 1.
    pub fn terms(&self) -> Vec<(String, f64)> {
        vec![
            ("bmi".to_string(), self.bmi),
            (format!("age_group={}", self.age_group), 1.0),
            (format!("lifestyle_risk={}", self.lifestyle_risk), 1.0),
            ("city_tier".to_string(), f64::from(self.city_tier)),
            ("income_lpa".to_string(), self.income_lpa),
            (format!("occupation={}", self.occupation), 1.0),
        ]
    }
}
