//! Trade decisioning
//!
//! - **Analyzer**: fair value vs market price, threshold band, BUY/SELL/HOLD
//! - **Observer**: structured evaluation records around the pure analyzer
//! - **Arbitrage**: cross-venue price gap check

mod analyzer;
mod arbitrage;
mod config;
mod observer;

pub use analyzer::*;
pub use arbitrage::*;
pub use config::*;
pub use observer::*;
