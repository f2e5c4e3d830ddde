//! Gateway Configuration Settings
//!
//! Configuration types for the edge gateway, loaded from environment
//! variables. Nothing here is required at startup: missing credentials are
//! surfaced as `500` configuration errors at request time, so a proxy-only
//! deployment needs no secrets at all.

use std::path::PathBuf;
use std::time::Duration;

/// Default upstream origin for the CLOB trading API.
const DEFAULT_CLOB_BASE_URL: &str = "https://clob.polymarket.com";

/// Default upstream origin for the Gamma metadata API.
const DEFAULT_GAMMA_BASE_URL: &str = "https://gamma-api.polymarket.com";

/// Default listen port.
const DEFAULT_PORT: u16 = 8080;

/// Default timeout for every upstream call.
const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Secrets used to sign orders and authenticate to the CLOB upstream.
///
/// All fields are optional; the trade executor requires them lazily and maps
/// absence to a configuration error.
#[derive(Clone, Default)]
pub struct Secrets {
    signing_key: Option<String>,
    api_key: Option<String>,
    api_secret: Option<String>,
    api_passphrase: Option<String>,
}

impl Secrets {
    /// Create secrets from explicit values. Empty strings count as absent.
    #[must_use]
    pub fn new(
        signing_key: Option<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
        api_passphrase: Option<String>,
    ) -> Self {
        Self {
            signing_key: non_empty(signing_key),
            api_key: non_empty(api_key),
            api_secret: non_empty(api_secret),
            api_passphrase: non_empty(api_passphrase),
        }
    }

    /// Read secrets from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("POLYMARKET_PRIVATE_KEY").ok(),
            std::env::var("POLYMARKET_API_KEY").ok(),
            std::env::var("POLYMARKET_API_SECRET").ok(),
            std::env::var("POLYMARKET_API_PASSPHRASE").ok(),
        )
    }

    /// The order-signing secret, if configured.
    #[must_use]
    pub fn signing_key(&self) -> Option<&str> {
        self.signing_key.as_deref()
    }

    /// The full upstream credential set, only if all three parts are present.
    #[must_use]
    pub fn api_credentials(&self) -> Option<ApiCredentials<'_>> {
        match (&self.api_key, &self.api_secret, &self.api_passphrase) {
            (Some(key), Some(secret), Some(passphrase)) => Some(ApiCredentials {
                key,
                secret,
                passphrase,
            }),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| if v.is_some() { "[REDACTED]" } else { "[unset]" };
        f.debug_struct("Secrets")
            .field("signing_key", &redact(&self.signing_key))
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("api_passphrase", &redact(&self.api_passphrase))
            .finish()
    }
}

/// Borrowed view of the three upstream auth credentials.
#[derive(Clone, Copy)]
pub struct ApiCredentials<'a> {
    key: &'a str,
    secret: &'a str,
    passphrase: &'a str,
}

impl ApiCredentials<'_> {
    /// The API key.
    #[must_use]
    pub const fn key(&self) -> &str {
        self.key
    }

    /// The API secret (HMAC key for request signatures).
    #[must_use]
    pub const fn secret(&self) -> &str {
        self.secret
    }

    /// The API passphrase.
    #[must_use]
    pub const fn passphrase(&self) -> &str {
        self.passphrase
    }
}

/// Complete gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listen port for the HTTP server.
    pub port: u16,
    /// CLOB trading API origin (no trailing slash).
    pub clob_base_url: String,
    /// Gamma metadata API origin (no trailing slash).
    pub gamma_base_url: String,
    /// Static asset directory; `None` disables asset serving.
    pub assets_dir: Option<PathBuf>,
    /// Timeout applied to every upstream call.
    pub upstream_timeout: Duration,
    /// Signing and upstream auth secrets.
    pub secrets: Secrets,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            clob_base_url: DEFAULT_CLOB_BASE_URL.to_string(),
            gamma_base_url: DEFAULT_GAMMA_BASE_URL.to_string(),
            assets_dir: None,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            secrets: Secrets::default(),
        }
    }
}

impl GatewayConfig {
    /// Create configuration from environment variables.
    ///
    /// Every variable has a default; secrets stay unset until used.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: parse_env_u16("GATEWAY_PORT", DEFAULT_PORT),
            clob_base_url: base_url_env("CLOB_BASE_URL", DEFAULT_CLOB_BASE_URL),
            gamma_base_url: base_url_env("GAMMA_BASE_URL", DEFAULT_GAMMA_BASE_URL),
            assets_dir: std::env::var("GATEWAY_ASSETS_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            upstream_timeout: parse_env_duration_secs(
                "UPSTREAM_TIMEOUT_SECS",
                DEFAULT_UPSTREAM_TIMEOUT,
            ),
            secrets: Secrets::from_env(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn base_url_env(key: &str, default: &str) -> String {
    let raw = std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string());
    raw.trim_end_matches('/').to_string()
}

fn parse_env_u16(key: &str, default: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_env_duration_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_secs)
}
