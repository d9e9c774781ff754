//! Moving-average strategy
//!
//! A trailing moving average with buy/sell bands, and a tracker for the
//! single position the strategy may hold. Sits on top of the data and
//! execution layers; the pricing core does not depend on it.

mod config;
mod position;
mod signal;

pub use config::*;
pub use position::*;
pub use signal::*;
