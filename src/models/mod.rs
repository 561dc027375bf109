//! Wire and domain types shared across the API.

pub mod enums;
pub mod patient;
pub mod user_profile;

pub use enums::{
    AgeGroup, Gender, InvalidEnumValue, LifestyleRisk, Occupation, SortField, SortOrder, Verdict,
};
pub use patient::{NewPatient, PatientProfile, PatientRecord, PatientUpdate};
pub use user_profile::{PremiumFeatures, RiskProfile, UserProfile};
