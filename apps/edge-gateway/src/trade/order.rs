//! Canonical order assembly.
//!
//! All numeric order fields travel as fixed-precision strings so the bytes
//! covered by the order signature cannot drift from the bytes submitted
//! upstream.

use std::collections::BTreeMap;

use serde_json::Value;

use super::intent::{Side, TradeIntent};

/// Lower clamp bound for the slippage-adjusted limit price.
const PRICE_FLOOR: f64 = 0.0001;

/// Upper clamp bound for the slippage-adjusted limit price.
const PRICE_CEIL: f64 = 0.9999;

/// Apply a linear slippage adjustment in the order's aggressive direction.
///
/// Buys widen up, sells widen down. The result is clamped into
/// `[0.0001, 0.9999]` so extreme slippage yields the best representable
/// price rather than a limit outside the valid probability range.
#[must_use]
pub fn apply_slippage(price: f64, side: Side, slippage: f64) -> f64 {
    let factor = match side {
        Side::Buy => 1.0 + slippage,
        Side::Sell => 1.0 - slippage,
    };
    (price * factor).clamp(PRICE_FLOOR, PRICE_CEIL)
}

/// Fixed 6-decimal-place string form of a numeric order field.
#[must_use]
pub fn format_fixed(value: f64) -> String {
    format!("{value:.6}")
}

/// Canonical order representation submitted to the signer and upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Market identifier.
    pub market_id: String,
    /// Outcome token identifier.
    pub token_id: String,
    /// Upper-cased side.
    pub side: String,
    /// Size, 6 decimal places.
    pub size: String,
    /// Slippage-adjusted limit price, 6 decimal places.
    pub price: String,
    /// Upper-cased time in force.
    pub time_in_force: String,
    /// Included only when the caller supplied one.
    pub client_order_id: Option<String>,
}

impl Order {
    /// Assemble the canonical order from a validated intent and the
    /// slippage-adjusted limit price.
    #[must_use]
    pub fn build(intent: &TradeIntent, limit_price: f64) -> Self {
        Self {
            market_id: intent.market_id.clone(),
            token_id: intent.token_id.clone(),
            side: intent.side.as_upper().to_string(),
            size: format_fixed(intent.size),
            price: format_fixed(limit_price),
            time_in_force: intent.time_in_force.to_uppercase(),
            client_order_id: intent.client_order_id.clone(),
        }
    }

    /// Business fields as a sorted-key map.
    ///
    /// This map is the single serialization of the order: the signer hashes
    /// its JSON form, and the submission payload is the same map with the
    /// signature inserted, so both steps see byte-identical business fields.
    /// `client_order_id` is omitted, not null, when absent.
    #[must_use]
    pub fn canonical_map(&self) -> BTreeMap<&'static str, Value> {
        let mut map = BTreeMap::new();
        map.insert("market_id", Value::String(self.market_id.clone()));
        map.insert("token_id", Value::String(self.token_id.clone()));
        map.insert("side", Value::String(self.side.clone()));
        map.insert("size", Value::String(self.size.clone()));
        map.insert("price", Value::String(self.price.clone()));
        map.insert("time_in_force", Value::String(self.time_in_force.clone()));
        if let Some(id) = &self.client_order_id {
            map.insert("client_order_id", Value::String(id.clone()));
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn intent() -> TradeIntent {
        TradeIntent {
            market_id: "m1".to_string(),
            token_id: "t1".to_string(),
            side: Side::Buy,
            size: 10.0,
            price: 0.5,
            slippage: 0.1,
            paper: false,
            client_order_id: None,
            time_in_force: "gtc".to_string(),
        }
    }

    #[test]
    fn buy_slippage_widens_up() {
        let adjusted = apply_slippage(0.5, Side::Buy, 0.1);
        assert!((adjusted - 0.55).abs() < 1e-12);
    }

    #[test]
    fn sell_slippage_widens_down() {
        let adjusted = apply_slippage(0.5, Side::Sell, 0.1);
        assert!((adjusted - 0.45).abs() < 1e-12);
    }

    #[test]
    fn adjusted_price_clamps_at_bounds() {
        assert_eq!(apply_slippage(0.95, Side::Buy, 0.2), 0.9999);
        assert_eq!(apply_slippage(0.0001, Side::Sell, 0.2), 0.0001);
    }

    #[test]
    fn format_fixed_pads_to_six_places() {
        assert_eq!(format_fixed(0.55), "0.550000");
        assert_eq!(format_fixed(10.0), "10.000000");
        assert_eq!(format_fixed(0.123_456_789), "0.123457");
    }

    #[test]
    fn build_formats_and_uppercases() {
        let order = Order::build(&intent(), 0.55);
        assert_eq!(order.side, "BUY");
        assert_eq!(order.size, "10.000000");
        assert_eq!(order.price, "0.550000");
        assert_eq!(order.time_in_force, "GTC");
        assert!(order.client_order_id.is_none());
    }

    #[test]
    fn canonical_map_sorts_keys_and_omits_empty_client_id() {
        let order = Order::build(&intent(), 0.55);
        let keys: Vec<&str> = order.canonical_map().into_keys().collect();
        assert_eq!(
            keys,
            vec!["market_id", "price", "side", "size", "time_in_force", "token_id"]
        );
    }

    #[test]
    fn canonical_map_includes_supplied_client_id() {
        let mut with_id = intent();
        with_id.client_order_id = Some("c-9".to_string());
        let order = Order::build(&with_id, 0.55);
        let map = order.canonical_map();
        assert_eq!(map.get("client_order_id"), Some(&Value::String("c-9".to_string())));
        // Sorted position: client_order_id leads the map.
        assert_eq!(map.keys().next(), Some(&"client_order_id"));
    }

    proptest! {
        #[test]
        fn slippage_is_monotonic_for_buys(
            price in 0.0001f64..0.9999,
            lo in 0.0f64..0.2,
            hi in 0.0f64..0.2,
        ) {
            let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
            prop_assert!(
                apply_slippage(price, Side::Buy, lo) <= apply_slippage(price, Side::Buy, hi)
            );
        }

        #[test]
        fn slippage_is_antitonic_for_sells(
            price in 0.0001f64..0.9999,
            lo in 0.0f64..0.2,
            hi in 0.0f64..0.2,
        ) {
            let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
            prop_assert!(
                apply_slippage(price, Side::Sell, lo) >= apply_slippage(price, Side::Sell, hi)
            );
        }

        #[test]
        fn adjusted_price_always_in_valid_range(
            price in 0.0f64..2.0,
            slippage in 0.0f64..0.2,
        ) {
            for side in [Side::Buy, Side::Sell] {
                let adjusted = apply_slippage(price, side, slippage);
                prop_assert!((0.0001..=0.9999).contains(&adjusted));
            }
        }
    }
}
