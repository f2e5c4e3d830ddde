//! Configuration module for the gateway.
//!
//! All configuration is sourced from environment variables (plus an optional
//! `.env` file loaded by the binary); secrets are wrapped so they can never
//! leak through `Debug` output or logs.

mod settings;

pub use settings::{ApiCredentials, GatewayConfig, Secrets};
