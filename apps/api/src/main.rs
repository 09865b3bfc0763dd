mod cli;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod recommend;
mod resume;
mod routes;
mod state;
mod store;
mod text;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{config_failure, run_command, Cli, Command};
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::OllamaClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgMarketplaceStore;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    init_tracing(config.as_ref().map_or("info", |c| c.rust_log.as_str()));

    match cli.command {
        None | Some(Command::Serve) => serve(config?).await,
        Some(command) => {
            let code = match config {
                Ok(config) => run_command(command, &config).await,
                Err(err) => config_failure(&err),
            };
            std::process::exit(code);
        }
    }
}

/// Logs go to stderr so one-shot commands keep stdout for JSON.
fn init_tracing(rust_log: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting GigHub API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgMarketplaceStore::new(db));

    let ollama = Arc::new(OllamaClient::new(
        &config.ollama_url,
        &config.llm_model,
        &config.embedding_model,
    )?);
    info!(
        "Ollama client initialized (model: {}, embeddings: {})",
        ollama.model(),
        ollama.embedding_model()
    );

    let state = AppState {
        store,
        generator: ollama.clone(),
        embedder: ollama,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
