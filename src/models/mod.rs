//! Pricing Models
//!
//! Implements:
//! - Black-Scholes-Merton (European fair value and Greeks)

pub mod black_scholes;

pub use black_scholes::*;
