//! Trade construction and execution.
//!
//! The pipeline runs strictly in sequence within one request:
//! parse/validate ([`intent`]) → slippage-adjusted order assembly
//! ([`order`]) → signing → paper short-circuit or authenticated upstream
//! submission ([`executor`]). Nothing survives the request.

mod executor;
mod intent;
mod order;

pub use executor::{TradeExecutor, TradeOutcome, handle};
pub use intent::{Side, TradeIntent};
pub use order::{Order, apply_slippage, format_fixed};
