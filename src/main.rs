//! Quizrank - Application Entry Point
//!
//! This is the main entry point for the Quizrank server.

use std::{net::SocketAddr, sync::Arc};

use anyhow::{bail, Context};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use quizrank::{
    config::{Config, LogFormat, CONFIG},
    db::{self, MemoryRankingStore, RankingRepository, RankingStore},
    handlers,
    services::KeyManager,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CONFIG.clone()?;

    init_tracing(&config);

    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        return match command.as_str() {
            "issue-token" => {
                let editor = args.next().context("usage: quizrank issue-token <editor>")?;
                issue_token(&config, &editor)
            }
            other => bail!("unknown command: {other}"),
        };
    }

    tracing::info!("Starting Quizrank server...");

    // Keys exist before any route can verify a token
    let keys = KeyManager::from_config(&config.auth);

    let store = open_store(&config).await?;

    let state = AppState::new(store, keys, config.clone());
    let app = handlers::router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.rust_log.clone().into());

    let registry = tracing_subscriber::registry().with(filter);
    match config.server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn RankingStore>> {
    let Some(url) = config.database.url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, ranking is kept in memory and lost on exit");
        return Ok(Arc::new(MemoryRankingStore::new()));
    };

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(url, &config.database)
        .await
        .context("failed to connect to database")?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;

    Ok(Arc::new(RankingRepository::new(pool)))
}

fn issue_token(config: &Config, editor: &str) -> anyhow::Result<()> {
    if config.auth.jwt_secret.is_none() {
        bail!("JWT_SECRET must be set to issue tokens the server will accept");
    }

    let token = KeyManager::from_config(&config.auth).issue(editor)?;
    println!("{token}");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
