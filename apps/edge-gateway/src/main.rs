//! Edge Gateway Binary
//!
//! Starts the prediction-market edge gateway.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin edge-gateway
//! ```
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GATEWAY_PORT`: HTTP listen port (default: 8080)
//! - `CLOB_BASE_URL`: trading API origin (default: <https://clob.polymarket.com>)
//! - `GAMMA_BASE_URL`: metadata API origin (default: <https://gamma-api.polymarket.com>)
//! - `GATEWAY_ASSETS_DIR`: static asset directory (unset: non-API paths answer 500)
//! - `UPSTREAM_TIMEOUT_SECS`: upstream call timeout (default: 30)
//! - `RUST_LOG`: log filter (default: info)
//!
//! ## Secrets (required only for trade execution)
//! - `POLYMARKET_PRIVATE_KEY`: order-signing secret
//! - `POLYMARKET_API_KEY`, `POLYMARKET_API_SECRET`, `POLYMARKET_API_PASSPHRASE`:
//!   upstream auth credentials for live submission

use std::net::SocketAddr;

use edge_gateway::{AppState, GatewayConfig, create_router};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    tracing::info!("Starting edge gateway");

    let config = GatewayConfig::from_env();
    log_config(&config);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let state = AppState::new(config)?;
    let app = create_router(state);

    tracing::info!(%addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET/POST /api/clob/{{path}}");
    tracing::info!("  GET      /api/gamma/{{path}}");
    tracing::info!("  POST     /api/trade/execute");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Edge gateway stopped");
    Ok(())
}

/// Load .env file when present; absence is fine.
fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Initialize the tracing subscriber with environment filter.
///
/// Uses a static directive string that is a compile-time constant guaranteed
/// to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "edge_gateway=info"
                    .parse()
                    .expect("static directive 'edge_gateway=info' is valid"),
            ),
        )
        .init();
}

/// Log the parsed configuration. Secrets stay redacted via their Debug impl.
fn log_config(config: &GatewayConfig) {
    tracing::info!(
        port = config.port,
        clob_base_url = %config.clob_base_url,
        gamma_base_url = %config.gamma_base_url,
        assets_dir = ?config.assets_dir,
        upstream_timeout_secs = config.upstream_timeout.as_secs(),
        "Configuration loaded"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed; failing fast at startup
/// beats an unresponsive process.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
