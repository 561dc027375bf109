//! Derived health features: BMI, verdicts, lifestyle risk, age groups.
//!
//! Every value here is computed from stored base attributes at request
//! time. Nothing in this module is ever persisted.

use crate::models::{AgeGroup, LifestyleRisk, Verdict};

/// Round half-to-even at 2 decimal places, so `17.125` becomes `17.12`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Round half-to-even at 4 decimal places.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round_ties_even() / 10_000.0
}

/// Raw body mass index: weight in kg over squared height in metres.
pub fn bmi(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

/// BMI rounded to 2 decimals, the form reported for patient records.
pub fn patient_bmi(weight_kg: f64, height_m: f64) -> f64 {
    round2(bmi(weight_kg, height_m))
}

/// Verdict thresholds. BMI in `[24.9, 25)` and `[29.9, ∞)` both land on
/// `Obese`; callers depend on these exact boundaries.
pub fn verdict(bmi: f64) -> Verdict {
    if bmi < 18.5 {
        Verdict::Underweight
    } else if bmi < 24.9 {
        Verdict::Normal
    } else if (25.0..29.9).contains(&bmi) {
        Verdict::Overweight
    } else {
        Verdict::Obese
    }
}

/// Smoking combined with BMI drives the risk bucket.
pub fn lifestyle_risk(smoker: bool, bmi: f64) -> LifestyleRisk {
    if smoker && bmi > 30.0 {
        LifestyleRisk::High
    } else if smoker || bmi > 27.0 {
        LifestyleRisk::Medium
    } else {
        LifestyleRisk::Low
    }
}

/// Age bucket boundaries: 25, 45 and 65, each inclusive on the low side.
pub fn age_group(age: u32) -> AgeGroup {
    if age <= 25 {
        AgeGroup::Young
    } else if age <= 45 {
        AgeGroup::Adult
    } else if age <= 65 {
        AgeGroup::MiddleAged
    } else {
        AgeGroup::Senior
    }
}
