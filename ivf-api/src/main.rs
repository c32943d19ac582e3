//! ivf-api - Influencer Verifier service
//!
//! Resolves health influencers to profiles with attributed claims and
//! verifies ad-hoc claims against scientific journals.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use ivf_common::config::{self, TomlConfig};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ivf_api::api::rate_limit;
use ivf_api::oracle::{ChatCompletionClient, ClaimOracle};
use ivf_api::AppState;

const RATE_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Command-line arguments for ivf-api
#[derive(Parser, Debug)]
#[command(name = "ivf-api")]
#[command(about = "Health influencer claim verification service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "IVF_PORT")]
    port: Option<u16>,

    /// Address to bind (overrides config file)
    #[arg(long, env = "IVF_BIND")]
    bind: Option<String>,

    /// SQLite database file (overrides config file)
    #[arg(short, long, env = "IVF_DATABASE_PATH")]
    database: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "IVF_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let args = Args::parse();
    let toml_config = load_config(args.config.as_deref(), std::io::stderr)
        .context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("ivf_api={0},ivf_common={0},tower_http=info", toml_config.logging.level)
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting ivf-api (Influencer Verifier) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("IVF_GIT_REV"),
        env!("IVF_BUILD_TIME"),
        env!("IVF_BUILD_PROFILE")
    );
    if dotenv_loaded {
        info!("Loaded environment from .env");
    }

    let db_path = args
        .database
        .clone()
        .or_else(|| toml_config.database_path.clone())
        .unwrap_or_else(config::default_database_path);
    info!("Database: {}", db_path.display());

    let db_pool = ivf_api::db::init_database_pool(&db_path)
        .await
        .context("Failed to initialize database")?;
    info!("Database connection established");

    let oracle = build_oracle(&toml_config)?;

    let state = AppState::new(db_pool, oracle, &toml_config)
        .context("Failed to build application state")?;
    rate_limit::spawn_pruner(state.rate_limiter.clone(), RATE_LIMIT_PRUNE_INTERVAL);
    let app = ivf_api::build_router(state);

    let bind = args.bind.unwrap_or_else(|| toml_config.bind_address.clone());
    let port = args.port.unwrap_or(toml_config.port);
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/api/health", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Load the TOML config under a temporary subscriber
///
/// The real subscriber needs the configured log level, so config loading
/// logs through a plain fmt subscriber writing to `writer`.
fn load_config<W>(path: Option<&Path>, writer: W) -> ivf_common::Result<TomlConfig>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let bootstrap = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(bootstrap, || config::load_toml_config(path))
}

fn build_oracle(toml_config: &TomlConfig) -> Result<Option<Arc<dyn ClaimOracle>>> {
    match config::resolve_oracle_api_key(toml_config) {
        Some(key) => {
            info!(
                base_url = %toml_config.oracle.base_url,
                model = %toml_config.oracle.model,
                "Oracle configured"
            );
            let client = ChatCompletionClient::new(key, &toml_config.oracle)
                .context("Failed to build oracle client")?;
            let oracle: Arc<dyn ClaimOracle> = Arc::new(client);
            Ok(Some(oracle))
        }
        None => {
            warn!(
                "{} not set; influencer analysis limited to built-in profiles and claim verification disabled",
                config::ORACLE_API_KEY_ENV
            );
            Ok(None)
        }
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
