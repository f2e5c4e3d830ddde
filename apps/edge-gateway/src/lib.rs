// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Edge Gateway - Prediction Market API Gateway
//!
//! An edge HTTP gateway that mediates browser traffic to two Polymarket
//! upstreams (the CLOB trading API and the Gamma metadata API) and exposes
//! one trade-execution endpoint that constructs, signs, and submits a limit
//! order on the caller's behalf.
//!
//! # Layers
//!
//! - **Policy**: [`proxy::RoutePolicy`] - frozen per-route allowlists and
//!   method sets, the gateway's core security boundary
//! - **Proxy**: [`proxy`] - allowlisted passthrough to the CLOB/Gamma
//!   upstreams with size caps and header isolation
//! - **Trade**: [`trade`] - payload parse/validate boundary, slippage-adjusted
//!   order construction, and the single-pass execution pipeline
//! - **Signing**: [`signing`] - HMAC-SHA256 order and request signers
//! - **Server**: [`server`] - axum router, shared state, CORS shaping
//! - **Assets**: [`assets`] - static-asset fallback for non-API paths
//!
//! No state outlives a single request; the allowlists, configuration, and
//! credentials are immutable for the process lifetime.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Static-asset fallback collaborator.
pub mod assets;

/// Environment-derived configuration and secrets.
pub mod config;

/// Gateway error taxonomy and HTTP response mapping.
pub mod error;

/// Allowlisted upstream passthrough proxying.
pub mod proxy;

/// Axum router, shared state, and CORS response shaping.
pub mod server;

/// HMAC-SHA256 signing primitives.
pub mod signing;

/// Trade intent parsing, order construction, and execution.
pub mod trade;

pub use config::{GatewayConfig, Secrets};
pub use error::GatewayError;
pub use proxy::{CLOB_POLICY, GAMMA_POLICY, RoutePolicy, TRADE_POLICY};
pub use server::{AppState, create_router};
pub use signing::{OrderSigner, RequestSigner};
pub use trade::{Order, Side, TradeExecutor, TradeIntent, TradeOutcome};
