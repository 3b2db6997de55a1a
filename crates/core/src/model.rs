//! Patient record model, validation, and derived health metrics.
//!
//! A [`PatientRecord`] holds only stored attributes; the identifier lives in
//! the collection key and BMI figures are derived on demand. [`body_mass`] is
//! the single place BMI and its verdict are computed, so the derived values
//! can never drift from the height/weight they were computed from.

use crate::error::{RecordError, RecordResult};
use pmr_types::PatientId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use utoipa::ToSchema;

/// The full record collection, keyed by uppercase patient id.
///
/// A `BTreeMap` keeps iteration deterministic (ascending id order), which the
/// sort comparator relies on for its tie-break.
pub type RecordCollection = BTreeMap<PatientId, PatientRecord>;

/// Patient gender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(RecordError::Validation {
                field: "gender",
                constraint: format!("'{other}' is not one of male, female or other"),
            }),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A patient's stored attributes.
///
/// The identifier is deliberately absent: records are stored as values in a
/// [`RecordCollection`] keyed by [`PatientId`]. Derived attributes (bmi,
/// verdict) are likewise absent; they are recomputed from height and weight
/// on every read via [`body_mass`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    /// Height in meters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
}

impl PatientRecord {
    /// Validates raw candidate fields and builds a record.
    ///
    /// Gender arrives as a raw string so that a bad value is reported as a
    /// field validation failure rather than a body-decoding rejection.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Validation` naming the offending field if:
    /// - `age` does not lie strictly between 0 and 120
    /// - `gender` is not one of `male`, `female`, `other`
    /// - `height` or `weight` is not a positive finite number
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        age: i64,
        gender: &str,
        height: f64,
        weight: f64,
    ) -> RecordResult<Self> {
        if !(0 < age && age < 120) {
            return Err(RecordError::Validation {
                field: "age",
                constraint: "must lie strictly between 0 and 120".into(),
            });
        }
        let gender = gender.parse::<Gender>()?;
        validate_measure("height", height)?;
        validate_measure("weight", weight)?;

        Ok(Self {
            name: name.into(),
            city: city.into(),
            age: age as u32,
            gender,
            height,
            weight,
        })
    }
}

fn validate_measure(field: &'static str, value: f64) -> RecordResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(RecordError::Validation {
            field,
            constraint: "must be a positive number".into(),
        });
    }
    Ok(())
}

/// Categorical classification of a BMI value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Underweight,
    Normal,
    Obese,
}

impl Verdict {
    /// Classifies a BMI value. The lower bound of each band is inclusive:
    /// below 18.5 is underweight, 18.5 up to (but excluding) 25 is normal,
    /// 25 and above is obese.
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            Verdict::Underweight
        } else if bmi < 25.0 {
            Verdict::Normal
        } else {
            Verdict::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Underweight => "underweight",
            Verdict::Normal => "normal",
            Verdict::Obese => "obese",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived health metrics for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiReport {
    pub bmi: f64,
    pub verdict: Verdict,
}

/// Computes BMI and its verdict from a record's height and weight.
///
/// Pure function: `bmi = round(weight / height², 2)`. This is invoked at
/// read time, never cached, so the result is always consistent with the
/// current height and weight.
pub fn body_mass(record: &PatientRecord) -> BmiReport {
    let bmi = round2(record.weight / (record.height * record.height));
    BmiReport {
        bmi,
        verdict: Verdict::classify(bmi),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A record as returned to callers: stored attributes plus freshly derived
/// bmi and verdict.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PatientView {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub verdict: Verdict,
}

impl PatientView {
    /// Projects a stored record into its outward shape, deriving bmi and
    /// verdict.
    pub fn of(record: &PatientRecord) -> Self {
        let BmiReport { bmi, verdict } = body_mass(record);
        Self {
            name: record.name.clone(),
            city: record.city.clone(),
            age: record.age,
            gender: record.gender,
            height: record.height,
            weight: record.weight,
            bmi,
            verdict,
        }
    }
}

/// A sparse update: present fields override the target record, absent fields
/// are left untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl PatientUpdate {
    /// Overlays this update onto `existing` and returns the merged record.
    ///
    /// The merged fields are funneled back through [`PatientRecord::new`], so
    /// every constraint is re-checked and derived values are guaranteed to be
    /// recomputed from the merged height/weight on the next read. The record
    /// identifier is not part of either side and cannot change here.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Validation` if any merged field violates its
    /// constraint (e.g. an update setting weight to a non-positive value).
    pub fn apply_to(&self, existing: &PatientRecord) -> RecordResult<PatientRecord> {
        PatientRecord::new(
            self.name.clone().unwrap_or_else(|| existing.name.clone()),
            self.city.clone().unwrap_or_else(|| existing.city.clone()),
            self.age.unwrap_or(existing.age as i64),
            self.gender.as_deref().unwrap_or(existing.gender.as_str()),
            self.height.unwrap_or(existing.height),
            self.weight.unwrap_or(existing.weight),
        )
    }
}
