use std::process::ExitCode;

use aarogya::api::{ApiContext, ApiServer};
use aarogya::config::{self, Config};
use aarogya::insurance::PremiumModel;
use aarogya::store::{JsonFileBackend, PatientRepository};

#[tokio::main]
async fn main() -> ExitCode {
    aarogya::init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let model = match &cfg.model_path {
        Some(path) => PremiumModel::load(path),
        None => PremiumModel::bundled(),
    };
    let model = match model {
        Ok(model) => {
            tracing::info!(version = model.version(), "Scoring model loaded");
            model
        }
        Err(e) => {
            tracing::error!("Cannot load scoring model: {e}");
            return ExitCode::FAILURE;
        }
    };

    let backend = JsonFileBackend::new(cfg.data_path.clone());
    let repo = PatientRepository::new(backend, cfg.policy);
    let ctx = ApiContext::new(repo, model, cfg.policy);

    let mut server = match ApiServer::start(ctx, cfg.bind_addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Cannot bind {}: {e}", cfg.bind_addr);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        addr = %server.addr(),
        data = %cfg.data_path.display(),
        policy = ?cfg.policy,
        "Registry ready"
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {e}");
        server.shutdown();
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown requested");
    server.shutdown();
    ExitCode::SUCCESS
}
