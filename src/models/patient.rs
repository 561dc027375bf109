use serde::{Deserialize, Serialize};

use crate::features;
use crate::models::enums::{Gender, Verdict};

/// Stored base attributes of one patient.
///
/// Only these six fields are persisted. `bmi` and `verdict` are recomputed
/// from height and weight whenever a record is rendered, so edits can never
/// leave stale derived values behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
}

impl PatientRecord {
    /// BMI rounded to 2 decimals.
    pub fn bmi(&self) -> f64 {
        features::patient_bmi(self.weight, self.height)
    }

    pub fn verdict(&self) -> Verdict {
        features::verdict(self.bmi())
    }
}

/// Raw request body for `POST /create`.
///
/// Field types stay loose (plain ints and strings) so validation can report
/// every violation in one response instead of failing at deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPatient {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: i64,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
}

/// Partial-update body for `PUT /edit/{id}`.
///
/// Absent and `null` fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

/// Wire shape of one patient: stored attributes plus derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientProfile {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub verdict: Verdict,
}

impl From<&PatientRecord> for PatientProfile {
    fn from(record: &PatientRecord) -> Self {
        Self {
            name: record.name.clone(),
            city: record.city.clone(),
            age: record.age,
            gender: record.gender,
            height: record.height,
            weight: record.weight,
            bmi: record.bmi(),
            verdict: record.verdict(),
        }
    }
}
