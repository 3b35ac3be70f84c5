use serde::{Deserialize, Serialize};

use super::enums::Occupation;
use super::patient::{check_age, check_weight};
use super::ValidationError;

/// Upper bound on height in meters, exclusive: 0 < height < 3.
pub const HEIGHT_MAX_M: f64 = 3.0;

/// Prediction-only input. Profiles are scored, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub income_lpa: f64,
    pub smoker: bool,
    pub city: String,
    pub occupation: Occupation,
}

impl UserProfile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_age(self.age)?;
        check_weight(self.weight)?;
        if !(self.height > 0.0 && self.height < HEIGHT_MAX_M) {
            return Err(ValidationError::new(
                "height",
                format!("must be between 0 and {HEIGHT_MAX_M} meters, exclusive"),
            ));
        }
        if self.income_lpa <= 0.0 {
            return Err(ValidationError::new(
                "income_lpa",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
