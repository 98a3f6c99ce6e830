mod cli;
mod telemetry;

use crate::cli::{StorageBackendArg, CLI};
use clap::Parser;
use linkcheck_core::ResultStore;
use linkcheck_gateway::{App, AppState};
use linkcheck_prober::{HttpProber, ProberSettings};
use linkcheck_service::LinkCheckService;
use linkcheck_storage::{FileStore, InMemoryStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::try_parse()?;
    telemetry::init(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        data_path = %config.data_path.display(),
        probe_timeout_secs = config.probe_timeout_secs,
        "starting linkcheck"
    );

    match config.storage {
        StorageBackendArg::InMemory => run_server(&config, InMemoryStore::new()).await,
        StorageBackendArg::File => {
            let store = FileStore::open(&config.data_path)?;
            run_server(&config, store).await
        }
    }
}

async fn run_server<S: ResultStore>(config: &CLI, store: S) -> anyhow::Result<()> {
    let prober = HttpProber::new(
        ProberSettings::builder()
            .timeout(Duration::from_secs(config.probe_timeout_secs))
            .build(),
    )?;
    let service = LinkCheckService::resume(store, prober).await?;
    info!(last_id = service.last_assigned(), "request numbering ready");

    let app = App::with_layers(
        AppState::new(Arc::new(service)),
        Duration::from_secs(config.request_timeout_secs),
    );

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutting down the server");
}
