//! Derived health metrics: bmi, bmi verdict, age group, lifestyle risk.
//!
//! Two bracket policies coexist. `Legacy` reproduces the thresholds the
//! previously deployed service used, boundary gaps included, so existing
//! consumers see identical answers. `Corrected` closes those gaps. Every
//! calculator takes the policy explicitly; nothing here reads config.

use thiserror::Error;

use crate::models::{AgeGroup, BmiVerdict, LifestyleRisk};

/// Threshold selection for the bracket calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BracketPolicy {
    /// Bug-compatible brackets: exact boundary values fall through to the
    /// last branch, and lifestyle risk degenerates to a weight check.
    Legacy,
    /// Gap-free brackets.
    #[default]
    Corrected,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("Height must be greater than zero to derive bmi, got {0}")]
    NonPositiveHeight(f64),
}

/// Body mass index rounded to two decimals: `round(weight / height², 2)`.
pub fn bmi(weight_kg: f64, height_m: f64) -> Result<f64, MetricsError> {
    if height_m <= 0.0 {
        return Err(MetricsError::NonPositiveHeight(height_m));
    }
    Ok(round2(weight_kg / (height_m * height_m)))
}

pub fn bmi_verdict(bmi: f64, policy: BracketPolicy) -> BmiVerdict {
    match policy {
        BracketPolicy::Legacy => {
            // Strict bounds on both sides; 18.5, 24.9, 25 and 29.9 all fall
            // through to Obese.
            if bmi < 18.5 {
                BmiVerdict::Underweight
            } else if bmi > 18.5 && bmi < 24.9 {
                BmiVerdict::Normal
            } else if bmi > 25.0 && bmi < 29.9 {
                BmiVerdict::Overweight
            } else {
                BmiVerdict::Obese
            }
        }
        BracketPolicy::Corrected => {
            if bmi < 18.5 {
                BmiVerdict::Underweight
            } else if bmi < 25.0 {
                BmiVerdict::Normal
            } else if bmi < 30.0 {
                BmiVerdict::Overweight
            } else {
                BmiVerdict::Obese
            }
        }
    }
}

pub fn age_group(age: u32, policy: BracketPolicy) -> AgeGroup {
    match policy {
        BracketPolicy::Legacy => {
            // Exactly 18, 40 and 60 land on senior.
            if age < 18 {
                AgeGroup::Young
            } else if age > 18 && age < 40 {
                AgeGroup::Adult
            } else if age > 40 && age < 60 {
                AgeGroup::MiddleAged
            } else {
                AgeGroup::Senior
            }
        }
        BracketPolicy::Corrected => {
            if age < 18 {
                AgeGroup::Young
            } else if age < 40 {
                AgeGroup::Adult
            } else if age < 60 {
                AgeGroup::MiddleAged
            } else {
                AgeGroup::Senior
            }
        }
    }
}

pub fn lifestyle_risk(bmi: f64, weight_kg: f64, policy: BracketPolicy) -> LifestyleRisk {
    match policy {
        // Weight is the only live predicate; low cannot be produced.
        BracketPolicy::Legacy => {
            if weight_kg > 30.0 {
                LifestyleRisk::High
            } else {
                LifestyleRisk::Medium
            }
        }
        BracketPolicy::Corrected => {
            if bmi >= 30.0 || weight_kg > 90.0 {
                LifestyleRisk::High
            } else if bmi >= 25.0 {
                LifestyleRisk::Medium
            } else {
                LifestyleRisk::Low
            }
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
