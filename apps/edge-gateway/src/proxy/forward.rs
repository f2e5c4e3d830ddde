//! Transparent upstream forwarding.
//!
//! On allowlist/method pass the request is forwarded unmodified (same
//! method, same query string, body passed through) with only `accept`,
//! `content-type` (POST), and `user-agent` set explicitly; caller-supplied
//! headers never reach the upstream. The upstream status and body come back
//! verbatim, with CORS headers overwritten by the route handler.

use axum::body::{Body, to_bytes};
use axum::extract::Request;
use axum::http::{HeaderName, Method};
use axum::response::{IntoResponse, Response};

use crate::error::GatewayError;
use crate::server::AppState;
use crate::server::cors::preflight;

use super::policy::{RoutePolicy, parse_rest};

/// Hard cap on proxied POST bodies.
pub const PROXY_BODY_LIMIT: usize = 256 * 1024;

/// User agent presented to the proxied upstreams.
const PROXY_USER_AGENT: &str = "edge-gateway/proxy";

/// Forward one request through a route policy to its upstream origin.
pub async fn forward(
    state: &AppState,
    policy: &'static RoutePolicy,
    base_url: &str,
    rest: &str,
    query: Option<String>,
    req: Request,
) -> Response {
    if req.method() == Method::OPTIONS {
        return preflight(policy.methods_header);
    }

    match try_forward(state, policy, base_url, rest, query, req).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn try_forward(
    state: &AppState,
    policy: &'static RoutePolicy,
    base_url: &str,
    rest: &str,
    query: Option<String>,
    req: Request,
) -> Result<Response, GatewayError> {
    let (path, top) = parse_rest(rest);
    if !policy.allows_segment(&top) {
        tracing::warn!(route = policy.name, segment = %top, "Blocked proxy path");
        return Err(GatewayError::BlockedPath(top));
    }

    let method = req.method().clone();
    if !policy.allows_method(&method) {
        return Err(GatewayError::MethodNotAllowed);
    }

    let body = if method == Method::POST {
        let bytes = to_bytes(req.into_body(), PROXY_BODY_LIMIT)
            .await
            .map_err(|_| GatewayError::BodyTooLarge)?;
        Some(bytes)
    } else {
        None
    };

    let mut url = format!("{base_url}/{path}");
    if let Some(query) = query {
        url.push('?');
        url.push_str(&query);
    }

    tracing::debug!(route = policy.name, %method, %url, "Forwarding upstream");

    let mut request = state
        .http
        .request(method.clone(), &url)
        .header("accept", "application/json")
        .header("user-agent", PROXY_USER_AGENT);
    if let Some(bytes) = body {
        request = request.header("content-type", "application/json").body(bytes);
    }

    let upstream = request.send().await.map_err(|e| {
        tracing::error!(route = policy.name, error = %e, "Upstream request failed");
        GatewayError::Upstream(e.to_string())
    })?;

    let status = upstream.status();
    let headers = upstream.headers().clone();
    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| GatewayError::Upstream(e.to_string()))?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    for (name, value) in &headers {
        if is_hop_header(name) {
            continue;
        }
        response.headers_mut().append(name, value.clone());
    }
    Ok(response)
}

/// Framing headers that must not be copied onto the re-framed response.
fn is_hop_header(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection" | "keep-alive" | "transfer-encoding" | "upgrade" | "content-length"
    )
}
