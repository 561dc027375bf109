use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Returned when a string does not name any variant of a wire enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} '{value}', expected one of {allowed:?}")]
pub struct InvalidEnumValue {
    pub field: &'static str,
    pub value: String,
    pub allowed: &'static [&'static str],
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
///
/// Serde goes through the same strings, so the wire format is exactly
/// the `$s` literals rather than the Rust variant names.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Accepted wire values, in declaration order.
            pub const ALL: &'static [&'static str] = &[$($s),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnumValue {
                        field: stringify!($name),
                        value: s.into(),
                        allowed: Self::ALL,
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(D::Error::custom)
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

str_enum!(Occupation {
    Retired => "retired",
    Freelancer => "freelancer",
    Student => "student",
    GovernmentJob => "government_job",
    BusinessOwner => "business_owner",
    Unemployed => "unemployed",
    PrivateJob => "private_job",
});

str_enum!(AgeGroup {
    Young => "young",
    Adult => "adult",
    MiddleAged => "middle_aged",
    Senior => "senior",
});

str_enum!(LifestyleRisk {
    Low => "low",
    Medium => "medium",
    High => "high",
});

// BMI verdicts keep their display capitalization on the wire.
str_enum!(Verdict {
    Underweight => "Underweight",
    Normal => "Normal",
    Overweight => "Overweight",
    Obese => "Obese",
});

str_enum!(SortField {
    Height => "height",
    Weight => "weight",
    Bmi => "bmi",
});

str_enum!(SortOrder {
    Ascending => "ascending",
    Descending => "descending",
});
