mod cli;

use anyhow::Context;
use clap::Parser;
use snipurl_gateway::{App, AppState};
use snipurl_storage::{select_backend, UrlRepository};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::CLI;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = CLI::try_parse()?;

    let (store, backend) = select_backend(config.redis_url, config.redis_token)
        .await
        .context("connecting storage backend")?;
    let repository = UrlRepository::new(store);
    let state = AppState::new(repository, config.admin_password, config.public_base_url);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    info!(
        listen_addr = %listener.local_addr()?,
        backend = %backend,
        "starting gateway server"
    );

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
