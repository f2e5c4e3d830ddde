//! Allowlisted upstream passthrough.
//!
//! The allowlist is the only thing preventing this gateway from proxying
//! arbitrary upstream paths; it is checked before anything else on every
//! proxied request.

mod forward;
mod policy;

pub use forward::{PROXY_BODY_LIMIT, forward};
pub use policy::{CLOB_POLICY, GAMMA_POLICY, RoutePolicy, TRADE_POLICY, parse_rest};
