//! Runtime configuration.
//!
//! Everything is optional: a bare `aarogya` serves the registry on
//! 127.0.0.1:8000 out of `data/patients.json` with the bundled scoring
//! model. Environment variables override each piece.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::metrics::BracketPolicy;

/// Application-level constants
pub const APP_NAME: &str = "aarogya";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    format!("info,{APP_NAME}=debug")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {var}='{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds.
    pub bind_addr: SocketAddr,
    /// Registry document path.
    pub data_path: PathBuf,
    /// Scoring artifact path; `None` uses the bundled artifact.
    pub model_path: Option<PathBuf>,
    /// Bracket policy for derived fields and premium features.
    pub policy: BracketPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            data_path: PathBuf::from("data/patients.json"),
            model_path: None,
            policy: BracketPolicy::default(),
        }
    }
}

impl Config {
    /// Build a config from the environment, starting from the defaults.
    ///
    /// Recognized variables: `AAROGYA_ADDR` (socket address),
    /// `AAROGYA_DATA` (registry path), `AAROGYA_MODEL` (artifact path),
    /// `AAROGYA_BRACKETS` (`legacy` or `corrected`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("AAROGYA_ADDR") {
            config.bind_addr = raw.parse().map_err(|_| ConfigError::Invalid {
                var: "AAROGYA_ADDR",
                value: raw.clone(),
                reason: "expected host:port".into(),
            })?;
        }
        if let Ok(raw) = std::env::var("AAROGYA_DATA") {
            config.data_path = PathBuf::from(raw);
        }
        if let Ok(raw) = std::env::var("AAROGYA_MODEL") {
            config.model_path = Some(PathBuf::from(raw));
        }
        if let Ok(raw) = std::env::var("AAROGYA_BRACKETS") {
            config.policy = parse_policy(&raw).ok_or_else(|| ConfigError::Invalid {
                var: "AAROGYA_BRACKETS",
                value: raw.clone(),
                reason: "expected 'legacy' or 'corrected'".into(),
            })?;
        }

        Ok(config)
    }
}

fn parse_policy(raw: &str) -> Option<BracketPolicy> {
    match raw {
        "legacy" => Some(BracketPolicy::Legacy),
        "corrected" => Some(BracketPolicy::Corrected),
        _ => None,
    }
}
