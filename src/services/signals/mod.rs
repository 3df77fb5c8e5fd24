//! Trading signals service module.
//!
//! Provides technical indicator calculations over a price series and the
//! weighted buy/sell/hold scorer built on top of them.

pub mod indicators;
pub mod scorer;

pub use indicators::{compute_snapshot, Indicator};
pub use scorer::{adx_weight, breakdown, classify, score};
