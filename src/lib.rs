//! # bsm-edge - Black-Scholes Trade Decision Engine
//!
//! Prices European options with the Black-Scholes-Merton closed form,
//! compares the fair value with an observed market price and turns the gap
//! into a BUY/SELL/HOLD recommendation.
//!
//! ## Key Components
//!
//! - **Black-Scholes**: Fair value, d1/d2, delta/gamma/theta/vega
//! - **Opportunity analysis**: Relative-deviation threshold band
//! - **Observability**: Structured evaluation records, kept out of the math
//! - **Moving-average strategy**: Band signal and single-position lifecycle
//! - **Data / Execution**: Price sources, price history, paper venue
//!
//! ## Usage
//!
//! ```rust
//! use bsm_edge::prelude::*;
//!
//! let params = OptionParams::call(100.0, 100.0, 0.5, 0.05, 0.20).unwrap();
//!
//! let (fair, greeks) = price_and_greeks(&params).unwrap();
//! assert!((fair - 6.8887).abs() < 1e-4);
//! assert!(greeks.delta > 0.5);
//!
//! let rec = analyze(10.0, &params, 0.05).unwrap();
//! assert_eq!(rec.action, Action::Sell);
//! ```
//!
//! ## Error Policy
//!
//! The pricing and analysis functions are pure and only fail with
//! [`EngineError::Domain`] (invalid input, naming the field) or
//! [`EngineError::DegenerateMarket`] (non-positive fair value). Nothing is
//! clamped or defaulted.
//!
//! ## What This Engine Does NOT Do
//!
//! - Price American exercise
//! - Solve for implied volatility
//! - Aggregate Greeks across a portfolio
//! - Normalize market data

pub mod analysis;
pub mod config;
pub mod core;
pub mod data;
pub mod execution;
pub mod models;
pub mod strategy;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        Action, EngineError, EngineResult, Greeks, OptionParams, OptionType, PricePoint,
        Recommendation, SpotQuote,
    };

    // Black-Scholes
    pub use crate::models::{d1_d2, greeks, norm_cdf, norm_pdf, price, price_and_greeks};

    // Analysis
    pub use crate::analysis::{
        analyze, classify, detect_arbitrage, AnalyzerConfig, ArbitrageSignal, EvaluationRecord,
        EvaluationSink, MemorySink, ObservedAnalyzer, OpportunityAnalyzer, TracingSink,
    };

    // Strategy
    pub use crate::strategy::{
        moving_average, weekly_ma, ClosedTrade, MovingAverageConfig, MovingAverageSignal, Position,
        PositionTracker, Signal, StepOutcome,
    };

    // Data and execution
    pub use crate::data::{
        FeedConfig, HistoryFile, HttpPriceClient, PriceHistory, PriceSource, StaticPriceSource,
    };
    pub use crate::execution::{ExecutionVenue, Fill, PaperVenue, Side};

    pub use crate::config::EngineConfig;
}

// Re-export main types at crate root
pub use crate::analysis::{analyze, OpportunityAnalyzer};
pub use crate::core::{EngineError, EngineResult, OptionParams, OptionType, Recommendation};
pub use crate::models::price_and_greeks;
