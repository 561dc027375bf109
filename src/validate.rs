//! Request validation.
//!
//! Validators take the loose request bodies, check every constraint, and
//! hand back typed domain values. All violations for a request are
//! collected before returning, so a client sees the full list at once.

use serde::Serialize;

use crate::cities;
use crate::models::{
    Gender, NewPatient, Occupation, PatientRecord, PatientUpdate, RiskProfile, UserProfile,
};

/// One violated constraint on one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// Every constraint violated by a request, in field order.
///
/// Serializes as a plain array, which is the `detail` payload of a 422.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(Violation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the violated fields, for assertions and logs.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|v| v.field).collect()
    }
}

impl std::fmt::Display for Violations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for v in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

const AGE_MESSAGE: &str = "must be between 1 and 120";
const POSITIVE_MESSAGE: &str = "must be greater than 0";
const HEIGHT_CAP_MESSAGE: &str = "must be greater than 0 and at most 2.5";

fn enum_message(allowed: &'static [&'static str]) -> String {
    format!("must be one of {allowed:?}")
}

/// Unvalidated patient fields, either straight from a create body or from
/// an update merged over a stored record.
struct RawPatient<'a> {
    name: &'a str,
    city: &'a str,
    age: i64,
    gender: &'a str,
    height: f64,
    weight: f64,
}

fn check_patient(raw: RawPatient<'_>) -> Result<PatientRecord, Violations> {
    let mut violations = Violations::new();

    if !(1..=120).contains(&raw.age) {
        violations.push("age", AGE_MESSAGE);
    }
    let gender = match raw.gender.parse::<Gender>() {
        Ok(gender) => Some(gender),
        Err(_) => {
            violations.push("gender", enum_message(Gender::ALL));
            None
        }
    };
    if raw.height <= 0.0 {
        violations.push("height", POSITIVE_MESSAGE);
    }
    if raw.weight <= 0.0 {
        violations.push("weight", POSITIVE_MESSAGE);
    }

    match gender {
        Some(gender) if violations.is_empty() => Ok(PatientRecord {
            name: raw.name.to_string(),
            city: raw.city.to_string(),
            age: raw.age as u32,
            gender,
            height: raw.height,
            weight: raw.weight,
        }),
        _ => Err(violations),
    }
}

/// Validate a create body, returning the id and the typed record.
pub fn new_patient(input: &NewPatient) -> Result<(String, PatientRecord), Violations> {
    let record = check_patient(RawPatient {
        name: &input.name,
        city: &input.city,
        age: input.age,
        gender: &input.gender,
        height: input.height,
        weight: input.weight,
    })?;
    Ok((input.id.clone(), record))
}

/// Check the fields an update body actually carries.
///
/// Runs before the record lookup, so a malformed update is rejected even
/// when the target id does not exist.
pub fn update_fields(update: &PatientUpdate) -> Result<(), Violations> {
    let mut violations = Violations::new();

    if let Some(age) = update.age {
        if !(1..=120).contains(&age) {
            violations.push("age", AGE_MESSAGE);
        }
    }
    if let Some(gender) = &update.gender {
        if gender.parse::<Gender>().is_err() {
            violations.push("gender", enum_message(Gender::ALL));
        }
    }
    if let Some(height) = update.height {
        if height <= 0.0 {
            violations.push("height", POSITIVE_MESSAGE);
        }
    }
    if let Some(weight) = update.weight {
        if weight <= 0.0 {
            violations.push("weight", POSITIVE_MESSAGE);
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Overlay an update on a stored record and revalidate the whole.
pub fn merged_record(
    existing: &PatientRecord,
    update: &PatientUpdate,
) -> Result<PatientRecord, Violations> {
    check_patient(RawPatient {
        name: update.name.as_deref().unwrap_or(&existing.name),
        city: update.city.as_deref().unwrap_or(&existing.city),
        age: update.age.unwrap_or(i64::from(existing.age)),
        gender: update
            .gender
            .as_deref()
            .unwrap_or(existing.gender.as_str()),
        height: update.height.unwrap_or(existing.height),
        weight: update.weight.unwrap_or(existing.weight),
    })
}

/// Validate a prediction body into a typed risk profile.
///
/// The city is normalized here so tier lookup downstream always sees the
/// canonical form.
pub fn user_profile(input: &UserProfile) -> Result<RiskProfile, Violations> {
    let mut violations = Violations::new();

    if !(1..=120).contains(&input.age) {
        violations.push("age", AGE_MESSAGE);
    }
    if input.weight <= 0.0 {
        violations.push("weight", POSITIVE_MESSAGE);
    }
    if input.height <= 0.0 || input.height > 2.5 {
        violations.push("height", HEIGHT_CAP_MESSAGE);
    }
    if input.income_lpa <= 0.0 {
        violations.push("income_lpa", POSITIVE_MESSAGE);
    }
    let occupation = match input.occupation.parse::<Occupation>() {
        Ok(occupation) => Some(occupation),
        Err(_) => {
            violations.push("occupation", enum_message(Occupation::ALL));
            None
        }
    };

    match occupation {
        Some(occupation) if violations.is_empty() => Ok(RiskProfile {
            age: input.age as u32,
            weight: input.weight,
            height: input.height,
            income_lpa: input.income_lpa,
            smoker: input.smoker,
            city: cities::normalize_city(&input.city),
            occupation,
        }),
        _ => Err(violations),
    }
}
