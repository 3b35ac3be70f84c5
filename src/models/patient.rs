use serde::{Deserialize, Serialize};

use super::enums::{BmiVerdict, Gender};
use super::ValidationError;
use crate::metrics::{self, BracketPolicy, MetricsError};

/// Accepted age range, exclusive bounds: 0 < age < 120.
pub const AGE_MIN: u32 = 1;
pub const AGE_MAX: u32 = 119;

/// Inbound payload for registering a patient. The id travels in the body
/// only on create; it becomes the store key and is never duplicated inside
/// the stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
}

impl NewPatient {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::new("id", "must be a non-empty string"));
        }
        check_age(self.age)?;
        check_height(self.height)?;
        check_weight(self.weight)?;
        Ok(())
    }

    /// Split into the store key and the record body.
    pub fn into_parts(self) -> (String, StoredPatient) {
        (
            self.id,
            StoredPatient {
                name: self.name,
                city: self.city,
                age: self.age,
                gender: self.gender,
                height: self.height,
                weight: self.weight,
            },
        )
    }
}

/// The persisted record body. Derived fields are recomputed on every read
/// and never written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPatient {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
}

impl StoredPatient {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_age(self.age)?;
        check_height(self.height)?;
        check_weight(self.weight)?;
        Ok(())
    }

    /// Merge a partial update into this record. Absent patch fields keep
    /// their stored values.
    pub fn apply(&mut self, patch: PatientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
    }

    /// Response shape with bmi and verdict recomputed from the current
    /// height and weight.
    pub fn with_derived(&self, policy: BracketPolicy) -> Result<PatientView, MetricsError> {
        let bmi = metrics::bmi(self.weight, self.height)?;
        Ok(self.view_with_bmi(bmi, policy))
    }

    /// View built around a precomputed bmi. Sort listings use this to keep
    /// serving records whose bmi cannot be derived, charging them a zero.
    pub fn view_with_bmi(&self, bmi: f64, policy: BracketPolicy) -> PatientView {
        PatientView {
            name: self.name.clone(),
            city: self.city.clone(),
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            bmi,
            verdict: metrics::bmi_verdict(bmi, policy),
        }
    }
}

/// Partial update payload. Only supplied fields are validated and applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientPatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl PatientPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(age) = self.age {
            check_age(age)?;
        }
        if let Some(height) = self.height {
            check_height(height)?;
        }
        if let Some(weight) = self.weight {
            check_weight(weight)?;
        }
        Ok(())
    }
}

/// A record as served to clients: stored fields plus derived bmi and verdict.
#[derive(Debug, Clone, Serialize)]
pub struct PatientView {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub verdict: BmiVerdict,
}

pub(crate) fn check_age(age: u32) -> Result<(), ValidationError> {
    if !(AGE_MIN..=AGE_MAX).contains(&age) {
        return Err(ValidationError::new(
            "age",
            format!("must be between {AGE_MIN} and {AGE_MAX}, got {age}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_height(height: f64) -> Result<(), ValidationError> {
    if height > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("height", "must be greater than zero meters"))
    }
}

pub(crate) fn check_weight(weight: f64) -> Result<(), ValidationError> {
    if weight > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("weight", "must be greater than zero kilograms"))
    }
}
