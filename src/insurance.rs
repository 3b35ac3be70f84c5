//! Insurance premium category prediction: feature projection plus the
//! scoring model artifact.
//!
//! The model is additive. Every feature contributes a score, the total
//! falls into one of the labelled bands. The artifact is plain JSON so a
//! retrained model ships without a rebuild; one artifact is compiled into
//! the binary so the service always starts.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cities;
use crate::metrics::{self, BracketPolicy, MetricsError};
use crate::models::{AgeGroup, LifestyleRisk, Occupation, UserProfile};

const BUNDLED_ARTIFACT: &str = include_str!("../assets/premium_model.json");

/// The exact feature set the premium model consumes. The profile's
/// `smoker` flag is deliberately absent; the trained model never used it.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureVector {
    pub bmi: f64,
    pub age_group: AgeGroup,
    pub lifestyle_risk: LifestyleRisk,
    pub city_tier: u8,
    pub income_lpa: f64,
    pub occupation: Occupation,
}

/// Project a profile onto the model's feature space.
pub fn project(profile: &UserProfile, policy: BracketPolicy) -> Result<FeatureVector, MetricsError> {
    let bmi = metrics::bmi(profile.weight, profile.height)?;
    Ok(FeatureVector {
        bmi,
        age_group: metrics::age_group(profile.age, policy),
        lifestyle_risk: metrics::lifestyle_risk(bmi, profile.weight, policy),
        city_tier: cities::city_tier(&profile.city),
        income_lpa: profile.income_lpa,
        occupation: profile.occupation,
    })
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Cannot read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model artifact is malformed: {0}")]
    Malformed(String),
}

/// One step of a banded score. Applies to values strictly below `upto`;
/// `None` marks the open-ended last band.
#[derive(Debug, Clone, Deserialize)]
struct Band {
    upto: Option<f64>,
    score: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct Artifact {
    version: u32,
    labels: Vec<String>,
    bias: f64,
    cutoffs: Vec<f64>,
    bmi_bands: Vec<Band>,
    income_bands: Vec<Band>,
    age_group: BTreeMap<String, f64>,
    lifestyle_risk: BTreeMap<String, f64>,
    city_tier: Vec<f64>,
    occupation: BTreeMap<String, f64>,
}

/// Pre-trained scoring model, parsed and checked once at startup.
#[derive(Debug, Clone)]
pub struct PremiumModel {
    artifact: Artifact,
}

impl PremiumModel {
    /// Parse and validate an artifact document.
    pub fn from_json(doc: &str) -> Result<Self, ModelError> {
        let artifact: Artifact = serde_json::from_str(doc)?;
        validate_artifact(&artifact)?;
        Ok(Self { artifact })
    }

    /// Load an artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let doc = fs::read_to_string(path)?;
        Self::from_json(&doc)
    }

    /// The artifact compiled into the binary.
    pub fn bundled() -> Result<Self, ModelError> {
        Self::from_json(BUNDLED_ARTIFACT)
    }

    pub fn version(&self) -> u32 {
        self.artifact.version
    }

    /// Score a feature vector into a category label. Infallible by
    /// construction: load-time validation guarantees a score for every
    /// feature value and a label for every band.
    pub fn predict(&self, features: &FeatureVector) -> &str {
        let a = &self.artifact;
        let mut score = a.bias;
        score += band_score(&a.bmi_bands, features.bmi);
        score += band_score(&a.income_bands, features.income_lpa);
        score += a.age_group.get(features.age_group.as_str()).copied().unwrap_or(0.0);
        score += a
            .lifestyle_risk
            .get(features.lifestyle_risk.as_str())
            .copied()
            .unwrap_or(0.0);
        score += a
            .city_tier
            .get(usize::from(features.city_tier).saturating_sub(1))
            .copied()
            .unwrap_or(0.0);
        score += a.occupation.get(features.occupation.as_str()).copied().unwrap_or(0.0);

        let band = a.cutoffs.iter().filter(|cutoff| score >= **cutoff).count();
        &a.labels[band]
    }
}

fn band_score(bands: &[Band], value: f64) -> f64 {
    for band in bands {
        match band.upto {
            Some(upto) if value < upto => return band.score,
            None => return band.score,
            _ => {}
        }
    }
    0.0
}

fn validate_artifact(a: &Artifact) -> Result<(), ModelError> {
    if a.labels.is_empty() {
        return Err(ModelError::Malformed("labels must not be empty".into()));
    }
    if a.cutoffs.len() + 1 != a.labels.len() {
        return Err(ModelError::Malformed(format!(
            "{} labels require {} cutoffs, artifact has {}",
            a.labels.len(),
            a.labels.len() - 1,
            a.cutoffs.len()
        )));
    }
    if !a.cutoffs.windows(2).all(|w| w[0] < w[1]) {
        return Err(ModelError::Malformed("cutoffs must be strictly ascending".into()));
    }
    check_bands(&a.bmi_bands, "bmi_bands")?;
    check_bands(&a.income_bands, "income_bands")?;
    if a.city_tier.len() != 3 {
        return Err(ModelError::Malformed(format!(
            "city_tier must list exactly 3 scores, artifact has {}",
            a.city_tier.len()
        )));
    }
    for group in AgeGroup::ALL {
        if !a.age_group.contains_key(group.as_str()) {
            return Err(ModelError::Malformed(format!(
                "age_group is missing '{}'",
                group.as_str()
            )));
        }
    }
    for risk in LifestyleRisk::ALL {
        if !a.lifestyle_risk.contains_key(risk.as_str()) {
            return Err(ModelError::Malformed(format!(
                "lifestyle_risk is missing '{}'",
                risk.as_str()
            )));
        }
    }
    for occupation in Occupation::ALL {
        if !a.occupation.contains_key(occupation.as_str()) {
            return Err(ModelError::Malformed(format!(
                "occupation is missing '{}'",
                occupation.as_str()
            )));
        }
    }
    Ok(())
}

fn check_bands(bands: &[Band], table: &str) -> Result<(), ModelError> {
    if bands.last().map_or(true, |band| band.upto.is_some()) {
        return Err(ModelError::Malformed(format!(
            "{table} must end with an open-ended band"
        )));
    }
    let uptos: Vec<f64> = bands.iter().filter_map(|band| band.upto).collect();
    if uptos.len() + 1 != bands.len() {
        return Err(ModelError::Malformed(format!(
            "{table} may only leave the last band open-ended"
        )));
    }
    if !uptos.windows(2).all(|w| w[0] < w[1]) {
        return Err(ModelError::Malformed(format!(
            "{table} thresholds must be strictly ascending"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(age: u32, weight: f64, height: f64, city: &str) -> UserProfile {
        UserProfile {
            age,
            weight,
            height,
            income_lpa: 10.0,
            smoker: false,
            city: city.into(),
            occupation: Occupation::PrivateJob,
        }
    }

    #[test]
    fn projection_maps_every_feature() {
        let features = project(&profile(30, 70.0, 1.75, "Mumbai"), BracketPolicy::Corrected).unwrap();
        assert_eq!(features.bmi, 22.86);
        assert_eq!(features.age_group, AgeGroup::Adult);
        assert_eq!(features.lifestyle_risk, LifestyleRisk::Low);
        assert_eq!(features.city_tier, 1);
        assert_eq!(features.income_lpa, 10.0);
        assert_eq!(features.occupation, Occupation::PrivateJob);
    }

    #[test]
    fn projection_follows_bracket_policy() {
        let features = project(&profile(30, 70.0, 1.75, "Jaipur"), BracketPolicy::Legacy).unwrap();
        // Legacy lifestyle risk is high for any weight over 30 kg.
        assert_eq!(features.lifestyle_risk, LifestyleRisk::High);
        assert_eq!(features.city_tier, 2);
    }

    #[test]
    fn projection_rejects_non_positive_height() {
        let mut bad = profile(30, 70.0, 1.75, "Delhi");
        bad.height = 0.0;
        assert!(project(&bad, BracketPolicy::Corrected).is_err());
    }

    #[test]
    fn bundled_artifact_is_valid() {
        let model = PremiumModel::bundled().unwrap();
        assert_eq!(model.version(), 1);
    }

    #[test]
    fn predict_scores_low_medium_high() {
        let model = PremiumModel::bundled().unwrap();

        let low = FeatureVector {
            bmi: 22.0,
            age_group: AgeGroup::Adult,
            lifestyle_risk: LifestyleRisk::Low,
            city_tier: 1,
            income_lpa: 20.0,
            occupation: Occupation::GovernmentJob,
        };
        assert_eq!(model.predict(&low), "Low");

        let medium = FeatureVector {
            bmi: 27.0,
            age_group: AgeGroup::MiddleAged,
            lifestyle_risk: LifestyleRisk::Medium,
            city_tier: 1,
            income_lpa: 20.0,
            occupation: Occupation::PrivateJob,
        };
        // 0.6 + 0.5 + 0.5 + 0.0 + 0.0 + 0.2 = 1.8
        assert_eq!(model.predict(&medium), "Medium");

        let high = FeatureVector {
            bmi: 32.0,
            age_group: AgeGroup::Senior,
            lifestyle_risk: LifestyleRisk::High,
            city_tier: 3,
            income_lpa: 3.0,
            occupation: Occupation::Unemployed,
        };
        // 1.2 + 1.0 + 1.2 + 0.5 + 0.8 + 0.7 = 5.4
        assert_eq!(model.predict(&high), "High");
    }

    #[test]
    fn score_on_cutoff_lands_in_upper_band() {
        let zeroed = |bias: f64| {
            format!(
                r#"{{
                    "version": 1,
                    "labels": ["Low", "Medium", "High"],
                    "bias": {bias},
                    "cutoffs": [1.2, 2.4],
                    "bmi_bands": [{{ "upto": null, "score": 0.0 }}],
                    "income_bands": [{{ "upto": null, "score": 0.0 }}],
                    "age_group": {{ "young": 0.0, "adult": 0.0, "middle_aged": 0.0, "senior": 0.0 }},
                    "lifestyle_risk": {{ "low": 0.0, "medium": 0.0, "high": 0.0 }},
                    "city_tier": [0.0, 0.0, 0.0],
                    "occupation": {{
                        "retired": 0.0, "freelancer": 0.0, "student": 0.0,
                        "government_job": 0.0, "business_owner": 0.0,
                        "unemployed": 0.0, "private_job": 0.0
                    }}
                }}"#
            )
        };
        let features = FeatureVector {
            bmi: 22.0,
            age_group: AgeGroup::Adult,
            lifestyle_risk: LifestyleRisk::Low,
            city_tier: 1,
            income_lpa: 10.0,
            occupation: Occupation::Student,
        };

        let model = PremiumModel::from_json(&zeroed(1.19)).unwrap();
        assert_eq!(model.predict(&features), "Low");
        let model = PremiumModel::from_json(&zeroed(1.2)).unwrap();
        assert_eq!(model.predict(&features), "Medium");
        let model = PremiumModel::from_json(&zeroed(2.4)).unwrap();
        assert_eq!(model.predict(&features), "High");
    }

    #[test]
    fn malformed_artifacts_are_rejected() {
        // One label too few for the cutoffs.
        let doc = r#"{
            "version": 1,
            "labels": ["Low", "High"],
            "bias": 0.0,
            "cutoffs": [1.0, 2.0],
            "bmi_bands": [{ "upto": null, "score": 0.0 }],
            "income_bands": [{ "upto": null, "score": 0.0 }],
            "age_group": { "young": 0.0, "adult": 0.0, "middle_aged": 0.0, "senior": 0.0 },
            "lifestyle_risk": { "low": 0.0, "medium": 0.0, "high": 0.0 },
            "city_tier": [0.0, 0.0, 0.0],
            "occupation": {
                "retired": 0.0, "freelancer": 0.0, "student": 0.0,
                "government_job": 0.0, "business_owner": 0.0,
                "unemployed": 0.0, "private_job": 0.0
            }
        }"#;
        assert!(matches!(
            PremiumModel::from_json(doc),
            Err(ModelError::Malformed(_))
        ));

        // Descending cutoffs.
        let doc = doc.replace("[1.0, 2.0]", "[2.0, 1.0]").replace(
            r#""labels": ["Low", "High"]"#,
            r#""labels": ["Low", "Medium", "High"]"#,
        );
        assert!(matches!(
            PremiumModel::from_json(&doc),
            Err(ModelError::Malformed(_))
        ));

        // Closed last bmi band.
        let doc = r#"{
            "version": 1,
            "labels": ["Low"],
            "bias": 0.0,
            "cutoffs": [],
            "bmi_bands": [{ "upto": 25.0, "score": 0.0 }],
            "income_bands": [{ "upto": null, "score": 0.0 }],
            "age_group": { "young": 0.0, "adult": 0.0, "middle_aged": 0.0, "senior": 0.0 },
            "lifestyle_risk": { "low": 0.0, "medium": 0.0, "high": 0.0 },
            "city_tier": [0.0, 0.0, 0.0],
            "occupation": {
                "retired": 0.0, "freelancer": 0.0, "student": 0.0,
                "government_job": 0.0, "business_owner": 0.0,
                "unemployed": 0.0, "private_job": 0.0
            }
        }"#;
        assert!(matches!(
            PremiumModel::from_json(doc),
            Err(ModelError::Malformed(_))
        ));

        // Missing occupation entry.
        let doc = doc
            .replace(r#"{ "upto": 25.0, "score": 0.0 }"#, r#"{ "upto": null, "score": 0.0 }"#)
            .replace(r#""retired": 0.0, "#, "");
        assert!(matches!(
            PremiumModel::from_json(&doc),
            Err(ModelError::Malformed(_))
        ));
    }

    #[test]
    fn syntactically_broken_artifact_is_a_parse_error() {
        assert!(matches!(
            PremiumModel::from_json("{ nope"),
            Err(ModelError::Parse(_))
        ));
    }

    #[test]
    fn feature_vector_serializes_with_wire_names() {
        let features = FeatureVector {
            bmi: 22.86,
            age_group: AgeGroup::MiddleAged,
            lifestyle_risk: LifestyleRisk::Medium,
            city_tier: 2,
            income_lpa: 12.0,
            occupation: Occupation::BusinessOwner,
        };
        let doc = serde_json::to_value(&features).unwrap();
        assert_eq!(doc["age_group"], "middle_aged");
        assert_eq!(doc["lifestyle_risk"], "medium");
        assert_eq!(doc["occupation"], "business_owner");
        assert_eq!(doc["city_tier"], 2);
    }
}
