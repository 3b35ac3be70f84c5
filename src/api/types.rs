//! Shared types for the API layer.

use std::sync::Arc;

use crate::insurance::PremiumModel;
use crate::metrics::BracketPolicy;
use crate::store::PatientRepository;

/// Shared context for all API routes: the registry repository, the scoring
/// model handle and the bracket policy in force.
#[derive(Clone)]
pub struct ApiContext {
    pub repo: Arc<PatientRepository>,
    pub model: Arc<PremiumModel>,
    pub policy: BracketPolicy,
}

impl ApiContext {
    pub fn new(repo: PatientRepository, model: PremiumModel, policy: BracketPolicy) -> Self {
        Self {
            repo: Arc::new(repo),
            model: Arc::new(model),
            policy,
        }
    }
}
