//! Feature record types.
//!
//! One record describes one penguin observation. The categorical fields are
//! closed enums; anything outside their literal sets is rejected at the
//! request boundary before a record is ever constructed.

use serde::{Deserialize, Serialize};

/// Penguin sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// The wire/indicator-column spelling of this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// All valid variants, in wire-literal order.
    pub fn variants() -> &'static [Sex] {
        &[Sex::Male, Sex::Female]
    }

    /// Parse an exact (case-sensitive) wire literal.
    pub fn parse(value: &str) -> Option<Sex> {
        match value {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Observation island.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Island {
    Torgersen,
    Biscoe,
    Dream,
}

impl Island {
    pub fn as_str(&self) -> &'static str {
        match self {
            Island::Torgersen => "Torgersen",
            Island::Biscoe => "Biscoe",
            Island::Dream => "Dream",
        }
    }

    pub fn variants() -> &'static [Island] {
        &[Island::Torgersen, Island::Biscoe, Island::Dream]
    }

    pub fn parse(value: &str) -> Option<Island> {
        match value {
            "Torgersen" => Some(Island::Torgersen),
            "Biscoe" => Some(Island::Biscoe),
            "Dream" => Some(Island::Dream),
            _ => None,
        }
    }
}

/// One validated penguin observation, ready for encoding.
///
/// Numeric fields are type-checked only; domain plausibility (a negative
/// body mass, say) is deliberately not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub bill_length_mm: f64,
    pub bill_depth_mm: f64,
    pub flipper_length_mm: f64,
    pub body_mass_g: f64,
    pub year: i64,
    pub sex: Sex,
    pub island: Island,
}
