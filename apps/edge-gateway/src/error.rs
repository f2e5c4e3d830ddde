//! Error taxonomy for the gateway.
//!
//! Every error renders as a JSON object with at least an `error` field, with
//! an HTTP status chosen by which layer detected the fault:
//!
//! | Variant | Status | Fault layer |
//! |---|---|---|
//! | `ClientInput` | 400 | caller (malformed/empty JSON) |
//! | `Validation` | 422 | caller (out-of-range fields, all accumulated) |
//! | `BlockedPath` | 403 | policy (segment not in route allowlist) |
//! | `MethodNotAllowed` | 405 | policy |
//! | `BodyTooLarge` | 413 | resource limit |
//! | `NotFound` | 404 | asset adapter |
//! | `Configuration` | 500 | operator (missing secret, assets unbound) |
//! | `Internal` | 500 | gateway |
//! | `Upstream` | 502 | upstream transport or rejection |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use thiserror::Error;

use crate::server::cors::json_response;

/// A gateway error with a fixed HTTP status mapping.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed or empty request body.
    #[error("{0}")]
    ClientInput(String),

    /// Payload validation failed; carries every violated rule.
    #[error("Invalid payload")]
    Validation(Vec<String>),

    /// Path segment not present in the route's allowlist.
    #[error("Blocked path: {0}")]
    BlockedPath(String),

    /// HTTP method not permitted on this route.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Request body exceeded the route's size cap.
    #[error("Body too large")]
    BodyTooLarge,

    /// Requested asset does not exist.
    #[error("Not found")]
    NotFound,

    /// Deployment-level misconfiguration (missing secret or binding).
    #[error("{0}")]
    Configuration(String),

    /// Unexpected internal failure.
    #[error("{0}")]
    Internal(String),

    /// Upstream call failed at the transport level.
    #[error("{0}")]
    Upstream(String),
}

impl GatewayError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::ClientInput(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BlockedPath(_) => StatusCode::FORBIDDEN,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Configuration(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// JSON body for this error.
    #[must_use]
    pub fn body(&self) -> Value {
        match self {
            Self::Validation(details) => json!({
                "error": "Invalid payload",
                "details": details,
            }),
            other => json!({ "error": other.to_string() }),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        json_response(self.status(), &self.body())
    }
}
