//! Trade intent parsing and validation.
//!
//! [`TradeIntent::from_value`] is the parse boundary between untyped browser
//! JSON and the typed pipeline. Field coercion is lenient (missing or
//! wrong-typed fields become safe defaults, numeric strings are accepted the
//! way browsers send them); validation then accumulates every violated rule
//! so the caller can fix all fields in one round trip. A constructed intent
//! always holds finite numbers in range.

use serde_json::Value;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Bid side.
    Buy,
    /// Ask side.
    Sell,
}

impl Side {
    /// Parse case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "buy" => Some(Self::Buy),
            "sell" => Some(Self::Sell),
            _ => None,
        }
    }

    /// Lowercase form, for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Uppercase wire form.
    #[must_use]
    pub const fn as_upper(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

/// A validated trade request, constructed per request and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeIntent {
    /// Market identifier.
    pub market_id: String,
    /// Outcome token identifier.
    pub token_id: String,
    /// Order side.
    pub side: Side,
    /// Order size; finite and strictly positive.
    pub size: f64,
    /// Limit price; finite and strictly inside (0, 1).
    pub price: f64,
    /// Slippage tolerance; finite and within [0, 0.2].
    pub slippage: f64,
    /// Dry-run flag: sign but never submit.
    pub paper: bool,
    /// Caller-supplied order id; omitted from the order when absent.
    pub client_order_id: Option<String>,
    /// Time in force, upper-cased at order assembly. Defaults to `GTC`.
    pub time_in_force: String,
}

impl TradeIntent {
    /// Parse and validate an untyped JSON payload.
    ///
    /// # Errors
    ///
    /// Returns every violated rule, accumulated in rule order, when any field
    /// is missing or out of range.
    pub fn from_value(payload: &Value) -> Result<Self, Vec<String>> {
        let market_id = coerce_string(payload.get("marketId"));
        let token_id = coerce_string(payload.get("tokenId"));
        let side = Side::parse(&coerce_string(payload.get("side")));
        let size = coerce_number(payload.get("size"));
        let price = coerce_number(payload.get("price"));
        let slippage = coerce_number(payload.get("slippage"));
        let paper = coerce_bool(payload.get("paper"));
        let client_order_id = Some(coerce_string(payload.get("clientOrderId")))
            .filter(|id| !id.is_empty());
        let time_in_force = Some(coerce_string(payload.get("timeInForce")))
            .filter(|tif| !tif.is_empty())
            .unwrap_or_else(|| "GTC".to_string());

        let mut errors = Vec::new();
        if market_id.is_empty() {
            errors.push("marketId is required".to_string());
        }
        if token_id.is_empty() {
            errors.push("tokenId is required".to_string());
        }
        if side.is_none() {
            errors.push("side must be buy or sell".to_string());
        }
        if !size.is_finite() || size <= 0.0 {
            errors.push("size must be > 0".to_string());
        }
        if !price.is_finite() || price <= 0.0 || price >= 1.0 {
            errors.push("price must be between 0 and 1".to_string());
        }
        if !slippage.is_finite() || !(0.0..=0.2).contains(&slippage) {
            errors.push("slippage must be between 0 and 0.2".to_string());
        }

        if let (Some(side), true) = (side, errors.is_empty()) {
            Ok(Self {
                market_id,
                token_id,
                side,
                size,
                price,
                slippage,
                paper,
                client_order_id,
                time_in_force,
            })
        } else {
            Err(errors)
        }
    }
}

/// String coercion: numbers stringify (browsers send ids both ways),
/// everything else defaults to empty.
fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Numeric coercion: absent fields default to 0, numeric strings parse, and
/// anything unparsable becomes NaN so validation rejects it explicitly.
fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(f64::NAN),
        Some(_) => 0.0,
    }
}

/// Boolean coercion with JavaScript truthiness for the scalar types.
fn coerce_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        _ => false,
    }
}
