//! aarogya: a patient registry HTTP service.
//!
//! One flat JSON document holds the registry; every read recomputes the
//! derived bmi and verdict fields from the stored measurements. A small
//! scoring artifact, bundled into the binary, backs the insurance
//! premium endpoint.

pub mod api;
pub mod cities;
pub mod config;
pub mod insurance;
pub mod metrics;
pub mod models;
pub mod store;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins when set.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
