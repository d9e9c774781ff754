//! Core data types
//!
//! Defines fundamental types:
//! - OptionParams: Black-Scholes inputs (spot, strike, expiry, rate, vol, kind)
//! - Greeks: Delta, gamma, theta, vega
//! - Recommendation: BUY/SELL/HOLD with expected profit
//! - SpotQuote / PricePoint: Underlying price data
//! - EngineError: Error taxonomy

pub mod option;
pub mod greeks;
pub mod recommendation;
pub mod quote;
pub mod error;

pub use option::*;
pub use greeks::*;
pub use recommendation::*;
pub use quote::*;
pub use error::*;
