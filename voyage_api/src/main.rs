use std::net::SocketAddr;

use aide::openapi::OpenApi;
use anyhow::Context;
use axum::serve;
use tokio::signal;
use tracing::{Level, info};
use voyage_api::{api_docs, app, config::Config, router, state::AppState};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", error);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => tracing::error!("Failed to listen for SIGTERM: {}", error),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();
    let log_level = std::env::var("VOYAGE_LOG_LEVEL")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(log_level).init();
    aide::generate::on_error(|error| tracing::error!("{}", error));
    aide::generate::extract_schemas(true);

    if std::env::args().any(|a| a == "--generate-openapi") {
        let mut api = OpenApi::default();
        let _ = router().finish_api_with(&mut api, api_docs);

        std::fs::create_dir_all("schemas")?;
        let document = serde_json::to_string_pretty(&api)?;
        std::fs::write("schemas/openapi.json", document)?;
        info!("OpenAPI document has been written to schemas/openapi.json");
        return Ok(());
    }

    let config = Config::load().context("loading configuration")?;
    let state = AppState::init(&config).await?;

    let address = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!("Listening on {}", address);

    serve(listener, app(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.shutdown().await;

    Ok(())
}
