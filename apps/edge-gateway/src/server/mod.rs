//! HTTP server wiring.
//!
//! Builds the axum router over shared, immutable state. Route handlers
//! delegate to the proxy/trade/assets modules and then overwrite the CORS
//! headers with the route's exact policy, so every response - success or
//! error - leaves with the same browser-facing shape.

pub mod cors;

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, RawQuery, Request, State};
use axum::response::Response;
use axum::routing::any;

use crate::assets::{self, ASSET_METHODS_HEADER, DirAssets};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::proxy::{self, CLOB_POLICY, GAMMA_POLICY, TRADE_POLICY};
use crate::trade::{self, TradeExecutor};

/// Shared state for the HTTP server.
///
/// Everything here is read-only for the process lifetime; requests share
/// nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// Shared upstream HTTP client.
    pub http: reqwest::Client,
    /// Gateway configuration.
    pub config: Arc<GatewayConfig>,
    /// Trade execution pipeline.
    pub executor: Arc<TradeExecutor>,
    /// Optional static-asset collaborator.
    pub assets: Option<Arc<DirAssets>>,
}

impl AppState {
    /// Build the shared state from configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| GatewayError::Configuration(format!("HTTP client build failed: {e}")))?;

        let executor = Arc::new(TradeExecutor::new(
            http.clone(),
            config.clob_base_url.clone(),
            config.secrets.clone(),
        ));
        let assets = config.assets_dir.clone().map(|dir| Arc::new(DirAssets::new(dir)));

        Ok(Self {
            http,
            config: Arc::new(config),
            executor,
            assets,
        })
    }
}

/// Create the axum router with all routes.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    // `{*rest}` does not match the bare or trailing-slash prefix, so those
    // are routed explicitly; both hit the allowlist with an empty segment.
    Router::new()
        .route("/api/clob", any(clob_root))
        .route("/api/clob/", any(clob_root))
        .route("/api/clob/{*rest}", any(clob_rest))
        .route("/api/gamma", any(gamma_root))
        .route("/api/gamma/", any(gamma_root))
        .route("/api/gamma/{*rest}", any(gamma_rest))
        .route("/api/trade/execute", any(trade_execute))
        .fallback(assets_fallback)
        .with_state(state)
}

async fn clob_root(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    req: Request,
) -> Response {
    let base = state.config.clob_base_url.clone();
    let mut response = proxy::forward(&state, &CLOB_POLICY, &base, "", query, req).await;
    cors::apply_cors(response.headers_mut(), CLOB_POLICY.methods_header);
    response
}

async fn clob_rest(
    State(state): State<AppState>,
    Path(rest): Path<String>,
    RawQuery(query): RawQuery,
    req: Request,
) -> Response {
    let base = state.config.clob_base_url.clone();
    let mut response = proxy::forward(&state, &CLOB_POLICY, &base, &rest, query, req).await;
    cors::apply_cors(response.headers_mut(), CLOB_POLICY.methods_header);
    response
}

async fn gamma_root(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    req: Request,
) -> Response {
    let base = state.config.gamma_base_url.clone();
    let mut response = proxy::forward(&state, &GAMMA_POLICY, &base, "", query, req).await;
    cors::apply_cors(response.headers_mut(), GAMMA_POLICY.methods_header);
    response
}

async fn gamma_rest(
    State(state): State<AppState>,
    Path(rest): Path<String>,
    RawQuery(query): RawQuery,
    req: Request,
) -> Response {
    let base = state.config.gamma_base_url.clone();
    let mut response = proxy::forward(&state, &GAMMA_POLICY, &base, &rest, query, req).await;
    cors::apply_cors(response.headers_mut(), GAMMA_POLICY.methods_header);
    response
}

async fn trade_execute(State(state): State<AppState>, req: Request) -> Response {
    let mut response = trade::handle(&state, req).await;
    cors::apply_cors(response.headers_mut(), TRADE_POLICY.methods_header);
    response
}

async fn assets_fallback(State(state): State<AppState>, req: Request) -> Response {
    let mut response = assets::handle(state.assets.as_deref(), req).await;
    cors::apply_cors(response.headers_mut(), ASSET_METHODS_HEADER);
    response
}
