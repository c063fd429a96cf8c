//! # message-board
//!
//! Assembles the board service from the configured storage backend and serves
//! it over HTTP until interrupted.

mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use api_adapters::http::{create_router, AppState};
use configs::{Settings, StorageBackend, StorageSettings};
use domains::ThreadRepository;
use services::BoardService;
use storage_adapters::MemoryThreadRepository;
use tokio::net::TcpListener;
use tracing::{debug, info};

#[cfg(feature = "db-postgres")]
use secrecy::ExposeSecret;
#[cfg(feature = "db-postgres")]
use storage_adapters::PgThreadRepository;

#[cfg(not(feature = "web-axum"))]
compile_error!("message-board needs the `web-axum` feature to serve HTTP");

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("loading configuration")?;
    telemetry::init(&settings.logging)?;
    if let Some(path) = &settings.env_file {
        debug!(path = %path.display(), "loaded .env");
    }

    let repo = build_repository(&settings.storage).await?;
    let service = BoardService::new(repo);
    let app = create_router(AppState::new(service), &settings.server.cors_origins);

    let address = settings.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!(%address, backend = ?settings.storage.backend, "message board listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    info!("shut down cleanly");
    Ok(())
}

async fn build_repository(storage: &StorageSettings) -> Result<Arc<dyn ThreadRepository>> {
    match storage.backend {
        StorageBackend::Memory => {
            info!("using in-memory storage; threads are lost on restart");
            Ok(Arc::new(MemoryThreadRepository::new()))
        }
        #[cfg(feature = "db-postgres")]
        StorageBackend::Postgres => {
            let url = storage
                .database_url
                .as_ref()
                .context("storage.database_url is not set")?;
            let repo = PgThreadRepository::connect(url.expose_secret(), storage.max_connections)
                .await
                .context("connecting to postgres")?;
            repo.migrate().await.context("running migrations")?;
            Ok(Arc::new(repo))
        }
        #[cfg(not(feature = "db-postgres"))]
        StorageBackend::Postgres => {
            anyhow::bail!("this build was compiled without the db-postgres feature")
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
