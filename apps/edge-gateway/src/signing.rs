//! HMAC-SHA256 signing.
//!
//! One primitive, two distinct typed operations so the order-signing key and
//! the upstream API secret can never be swapped at a call site:
//!
//! - [`OrderSigner`] signs the canonical sorted-key JSON form of an order
//!   with the dedicated order-signing secret.
//! - [`RequestSigner`] signs the upstream auth message
//!   `<timestamp><METHOD><path><body>` with the upstream API secret.
//!
//! Both are pure and deterministic.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::trade::Order;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 over `message` keyed by `secret`, as lowercase hex.
///
/// # Panics
///
/// Never in practice: HMAC accepts keys of any length.
#[allow(clippy::expect_used)]
#[must_use]
pub fn hmac_sha256_hex(secret: &str, message: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Signs canonical order payloads with the order-signing secret.
#[derive(Clone)]
pub struct OrderSigner {
    key: String,
}

impl OrderSigner {
    /// Create a signer over the order-signing secret.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Sign the order's business fields in sorted-key canonical form.
    ///
    /// The signature covers exactly the bytes of the canonical JSON object,
    /// excluding any signature field, so the same logical order always signs
    /// identically regardless of construction order.
    pub fn sign(&self, order: &Order) -> serde_json::Result<String> {
        let canonical = serde_json::to_string(&order.canonical_map())?;
        Ok(hmac_sha256_hex(&self.key, &canonical))
    }
}

impl std::fmt::Debug for OrderSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderSigner")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Signs upstream requests with the pre-shared API secret.
#[derive(Clone)]
pub struct RequestSigner {
    secret: String,
}

impl RequestSigner {
    /// Create a signer over the upstream API secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Sign `<timestamp><METHOD><path><body>` for the upstream auth headers.
    #[must_use]
    pub fn sign(&self, timestamp: &str, method: &str, path: &str, body: &str) -> String {
        let message = format!("{timestamp}{method}{path}{body}");
        hmac_sha256_hex(&self.secret, &message)
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
