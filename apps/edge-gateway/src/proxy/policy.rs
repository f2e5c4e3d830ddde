//! Per-route security policy.
//!
//! Each API route carries a frozen first-segment allowlist and its exact
//! method set. The policies are process-wide statics wired into the router
//! at startup and never reconstructed per request.

use axum::http::Method;

/// Frozen routing policy for one API route.
#[derive(Debug)]
pub struct RoutePolicy {
    /// Route name, for logs.
    pub name: &'static str,
    /// Permitted first path segments after the route prefix.
    pub allowed_segments: &'static [&'static str],
    /// Permitted methods, excluding `OPTIONS` (handled as preflight).
    pub allowed_methods: &'static [Method],
    /// Exact `Access-Control-Allow-Methods` value for this route.
    pub methods_header: &'static str,
}

impl RoutePolicy {
    /// Whether `segment` (already lower-cased) is allowlisted.
    #[must_use]
    pub fn allows_segment(&self, segment: &str) -> bool {
        self.allowed_segments.contains(&segment)
    }

    /// Whether `method` is permitted on this route.
    #[must_use]
    pub fn allows_method(&self, method: &Method) -> bool {
        self.allowed_methods.contains(method)
    }
}

/// CLOB proxy route: order books and health probes.
pub static CLOB_POLICY: RoutePolicy = RoutePolicy {
    name: "clob",
    allowed_segments: &["books", "ok"],
    allowed_methods: &[Method::GET, Method::POST],
    methods_header: "GET,POST,OPTIONS",
};

/// Gamma proxy route: market metadata, read-only.
pub static GAMMA_POLICY: RoutePolicy = RoutePolicy {
    name: "gamma",
    allowed_segments: &["markets", "events", "tags", "sports", "health"],
    allowed_methods: &[Method::GET],
    methods_header: "GET,OPTIONS",
};

/// Trade execution route. No proxied segments; kept here so every route's
/// method policy lives in one place.
pub static TRADE_POLICY: RoutePolicy = RoutePolicy {
    name: "trade",
    allowed_segments: &[],
    allowed_methods: &[Method::POST],
    methods_header: "POST,OPTIONS",
};

/// Split the remaining path after a route prefix.
///
/// Empty segments are dropped; returns the normalized forwarding path and
/// the lower-cased first segment (empty when there is none).
#[must_use]
pub fn parse_rest(rest: &str) -> (String, String) {
    let parts: Vec<&str> = rest.split('/').filter(|p| !p.is_empty()).collect();
    let top = parts.first().map_or_else(String::new, |p| p.to_lowercase());
    (parts.join("/"), top)
}
