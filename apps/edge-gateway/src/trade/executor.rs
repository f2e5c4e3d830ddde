//! Trade execution pipeline.
//!
//! Single pass, no retries: parse → validate → build → sign → paper
//! short-circuit or credential check → submit → response translation. The
//! gateway's outer status reflects whether the upstream call succeeded at
//! the transport and business level; the upstream's own status is preserved
//! in `httpStatus` for diagnostics.

use axum::body::to_bytes;
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::config::Secrets;
use crate::error::GatewayError;
use crate::proxy::TRADE_POLICY;
use crate::server::AppState;
use crate::server::cors::{json_response, preflight};
use crate::signing::{OrderSigner, RequestSigner};

use super::intent::TradeIntent;
use super::order::{Order, apply_slippage};

/// Hard cap on the trade request body. Smaller than the proxy cap since this
/// is a small structured payload.
pub const TRADE_BODY_LIMIT: usize = 64 * 1024;

/// User agent presented to the upstream order endpoint.
const TRADE_USER_AGENT: &str = "edge-gateway/trade-execute";

/// Terminal outcome of the execution pipeline.
#[derive(Debug)]
pub enum TradeOutcome {
    /// Dry run: the signed order that would have been submitted.
    Paper {
        /// Canonical order payload including its signature.
        order: Value,
    },
    /// Live submission reached the upstream.
    Live {
        /// Whether the upstream answered 2xx.
        submitted: bool,
        /// The upstream's own HTTP status.
        http_status: u16,
        /// Upstream body, JSON-parsed with raw-text fallback.
        response: Value,
    },
}

/// Response body for a paper-mode execution.
#[derive(Debug, Serialize)]
struct PaperResponse<'a> {
    status: &'static str,
    order: &'a Value,
    message: &'static str,
}

/// Response body for a live execution attempt.
#[derive(Debug, Serialize)]
struct LiveResponse<'a> {
    status: &'static str,
    #[serde(rename = "httpStatus")]
    http_status: u16,
    response: &'a Value,
}

impl IntoResponse for TradeOutcome {
    fn into_response(self) -> Response {
        match self {
            Self::Paper { order } => json_response(
                StatusCode::OK,
                &PaperResponse {
                    status: "paper",
                    order: &order,
                    message: "Paper mode enabled. No live order submitted.",
                },
            ),
            Self::Live {
                submitted,
                http_status,
                response,
            } => {
                let status = if submitted {
                    StatusCode::OK
                } else {
                    StatusCode::BAD_GATEWAY
                };
                json_response(
                    status,
                    &LiveResponse {
                        status: if submitted { "submitted" } else { "rejected" },
                        http_status,
                        response: &response,
                    },
                )
            }
        }
    }
}

/// Constructs, signs, and submits orders against the CLOB upstream.
#[derive(Debug, Clone)]
pub struct TradeExecutor {
    /// Shared HTTP client.
    http: reqwest::Client,
    /// CLOB origin (no trailing slash).
    clob_base_url: String,
    /// Signing and upstream auth secrets.
    secrets: Secrets,
}

impl TradeExecutor {
    /// Create a new executor.
    #[must_use]
    pub fn new(http: reqwest::Client, clob_base_url: impl Into<String>, secrets: Secrets) -> Self {
        Self {
            http,
            clob_base_url: clob_base_url.into(),
            secrets,
        }
    }

    /// Run the pipeline for one validated intent.
    ///
    /// # Errors
    ///
    /// `Configuration` when a required secret is absent, `Upstream` when the
    /// live submission fails at the transport level.
    pub async fn execute(&self, intent: &TradeIntent) -> Result<TradeOutcome, GatewayError> {
        let request_id = Uuid::new_v4();
        let limit_price = apply_slippage(intent.price, intent.side, intent.slippage);
        let order = Order::build(intent, limit_price);

        tracing::info!(
            request_id = %request_id,
            market_id = %order.market_id,
            side = intent.side.as_str(),
            size = %order.size,
            price = %order.price,
            paper = intent.paper,
            "Executing trade"
        );

        let signing_key = self.secrets.signing_key().ok_or_else(|| {
            GatewayError::Configuration(
                "POLYMARKET_PRIVATE_KEY missing. Configure the order-signing secret.".to_string(),
            )
        })?;
        let signature = OrderSigner::new(signing_key).sign(&order)?;

        let mut payload = order.canonical_map();
        payload.insert("signature", Value::String(signature));

        if intent.paper {
            tracing::info!(request_id = %request_id, "Paper mode, skipping submission");
            return Ok(TradeOutcome::Paper {
                order: serde_json::to_value(&payload)?,
            });
        }

        let credentials = self.secrets.api_credentials().ok_or_else(|| {
            GatewayError::Configuration(
                "Missing API credentials. Set POLYMARKET_API_KEY, POLYMARKET_API_SECRET, \
                 POLYMARKET_API_PASSPHRASE."
                    .to_string(),
            )
        })?;

        let body = serde_json::to_string(&payload)?;
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let auth_signature =
            RequestSigner::new(credentials.secret()).sign(&timestamp, "POST", "/orders", &body);

        let response = self
            .http
            .post(format!("{}/orders", self.clob_base_url))
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .header("user-agent", TRADE_USER_AGENT)
            .header("POLYMARKET-API-KEY", credentials.key())
            .header("POLYMARKET-API-PASSPHRASE", credentials.passphrase())
            .header("POLYMARKET-API-TIMESTAMP", &timestamp)
            .header("POLYMARKET-API-SIGNATURE", &auth_signature)
            .body(body)
            .send()
            .await
            .map_err(|e| GatewayError::Upstream(e.to_string()))?;

        let http_status = response.status().as_u16();
        let submitted = response.status().is_success();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Upstream(e.to_string()))?;
        // Upstream error bodies are not guaranteed to be JSON.
        let response_value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => Value::String(text),
        };

        if submitted {
            tracing::info!(request_id = %request_id, http_status, "Order submitted");
        } else {
            tracing::warn!(request_id = %request_id, http_status, "Order rejected upstream");
        }

        Ok(TradeOutcome::Live {
            submitted,
            http_status,
            response: response_value,
        })
    }
}

/// HTTP entry point for `POST /api/trade/execute`.
pub async fn handle(state: &AppState, req: Request) -> Response {
    if req.method() == Method::OPTIONS {
        return preflight(TRADE_POLICY.methods_header);
    }
    if req.method() != Method::POST {
        return GatewayError::MethodNotAllowed.into_response();
    }

    let bytes = match to_bytes(req.into_body(), TRADE_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(_) => return GatewayError::BodyTooLarge.into_response(),
    };

    let text = String::from_utf8_lossy(&bytes);
    if text.trim().is_empty() {
        return GatewayError::ClientInput("Empty body".to_string()).into_response();
    }
    let payload: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => return GatewayError::ClientInput(e.to_string()).into_response(),
    };

    let intent = match TradeIntent::from_value(&payload) {
        Ok(intent) => intent,
        Err(details) => return GatewayError::Validation(details).into_response(),
    };

    match state.executor.execute(&intent).await {
        Ok(outcome) => outcome.into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trade::Side;

    fn paper_intent() -> TradeIntent {
        TradeIntent {
            market_id: "m1".to_string(),
            token_id: "t1".to_string(),
            side: Side::Buy,
            size: 10.0,
            price: 0.5,
            slippage: 0.1,
            paper: true,
            client_order_id: None,
            time_in_force: "GTC".to_string(),
        }
    }

    fn executor(secrets: Secrets) -> TradeExecutor {
        TradeExecutor::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1", // unreachable; paper mode never dials it
            secrets,
        )
    }

    #[tokio::test]
    async fn paper_mode_returns_signed_order() {
        let secrets = Secrets::new(Some("order-key".to_string()), None, None, None);
        let outcome = executor(secrets).execute(&paper_intent()).await.unwrap();

        let TradeOutcome::Paper { order } = outcome else {
            panic!("expected paper outcome");
        };
        assert_eq!(order["side"], "BUY");
        assert_eq!(order["size"], "10.000000");
        assert_eq!(order["price"], "0.550000");
        assert_eq!(order["time_in_force"], "GTC");
        let signature = order["signature"].as_str().unwrap();
        assert_eq!(signature.len(), 64);
    }

    #[tokio::test]
    async fn missing_signing_key_is_a_configuration_error() {
        let outcome = executor(Secrets::default()).execute(&paper_intent()).await;
        match outcome {
            Err(GatewayError::Configuration(message)) => {
                assert!(message.contains("POLYMARKET_PRIVATE_KEY"));
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn live_mode_requires_api_credentials() {
        let secrets = Secrets::new(Some("order-key".to_string()), None, None, None);
        let mut intent = paper_intent();
        intent.paper = false;
        let outcome = executor(secrets).execute(&intent).await;
        match outcome {
            Err(GatewayError::Configuration(message)) => {
                assert!(message.contains("POLYMARKET_API_KEY"));
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }
}
