//! Single-position lifecycle
//!
//! Tracks at most one open position per symbol: flat -> open -> flat.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::ensure_positive;
use crate::core::{EngineError, EngineResult};
use crate::execution::{ExecutionVenue, Fill};

use super::{MovingAverageSignal, Signal};

/// An open position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub entry_price: f64,
    pub quantity: f64,
    pub entry_time: DateTime<Utc>,
}

impl Position {
    /// Mark-to-market profit at `price`
    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        (price - self.entry_price) * self.quantity
    }
}

/// A round trip from entry to exit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub symbol: String,
    pub entry_price: f64,
    pub exit_price: f64,
    pub quantity: f64,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
}

impl ClosedTrade {
    pub fn hold_time(&self) -> Duration {
        self.exit_time - self.entry_time
    }

    pub fn profit(&self) -> f64 {
        (self.exit_price - self.entry_price) * self.quantity
    }

    /// Return on entry price, in percent
    pub fn roi_percent(&self) -> f64 {
        (self.exit_price / self.entry_price - 1.0) * 100.0
    }
}

/// What one check-and-trade step did
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Entered(Fill),
    Exited { fill: Fill, trade: ClosedTrade },
    NoAction,
}

/// Position state for one symbol
#[derive(Debug, Clone)]
pub struct PositionTracker {
    symbol: String,
    current: Option<Position>,
    closed: Vec<ClosedTrade>,
}

impl PositionTracker {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            current: None,
            closed: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn current(&self) -> Option<&Position> {
        self.current.as_ref()
    }

    pub fn has_position(&self) -> bool {
        self.current.is_some()
    }

    pub fn closed_trades(&self) -> &[ClosedTrade] {
        &self.closed
    }

    /// Total realized profit across closed trades
    pub fn realized_pnl(&self) -> f64 {
        self.closed.iter().map(ClosedTrade::profit).sum()
    }

    /// Open a position; fails if one is already open
    pub fn enter(&mut self, price: f64, quantity: f64, at: DateTime<Utc>) -> EngineResult<&Position> {
        ensure_positive("price", price)?;
        ensure_positive("quantity", quantity)?;
        if let Some(open) = &self.current {
            return Err(EngineError::position(format!(
                "{} already open at {:.2}",
                self.symbol, open.entry_price
            )));
        }

        Ok(&*self.current.insert(Position {
            symbol: self.symbol.clone(),
            entry_price: price,
            quantity,
            entry_time: at,
        }))
    }

    /// Close the open position; fails if flat
    pub fn exit(&mut self, price: f64, at: DateTime<Utc>) -> EngineResult<ClosedTrade> {
        ensure_positive("price", price)?;
        let open = self
            .current
            .take()
            .ok_or_else(|| EngineError::position(format!("{} has no open position", self.symbol)))?;

        let trade = ClosedTrade {
            symbol: open.symbol,
            entry_price: open.entry_price,
            exit_price: price,
            quantity: open.quantity,
            entry_time: open.entry_time,
            exit_time: at,
        };

        tracing::info!(
            symbol = %trade.symbol,
            hold_time_secs = trade.hold_time().num_seconds(),
            profit = trade.profit(),
            roi_percent = trade.roi_percent(),
            "Closed {} {} at {:.2}",
            trade.quantity,
            trade.symbol,
            price
        );

        self.closed.push(trade.clone());
        Ok(trade)
    }

    /// One check-and-trade iteration against a moving average
    ///
    /// The order goes to the venue first; the tracker only changes state
    /// once the venue has filled it.
    pub fn step<V: ExecutionVenue + ?Sized>(
        &mut self,
        signal: &MovingAverageSignal,
        price: f64,
        ma: f64,
        at: DateTime<Utc>,
        venue: &mut V,
    ) -> EngineResult<StepOutcome> {
        match signal.evaluate(price, ma, self.has_position()) {
            Signal::Enter => {
                let size = signal.config().position_size;
                let fill = venue.buy(&self.symbol, size, price)?;
                self.enter(fill.price, fill.quantity, at)?;
                Ok(StepOutcome::Entered(fill))
            }
            Signal::Exit => {
                let quantity = self.current.as_ref().map_or(0.0, |p| p.quantity);
                let fill = venue.sell(&self.symbol, quantity, price)?;
                let trade = self.exit(fill.price, at)?;
                Ok(StepOutcome::Exited { fill, trade })
            }
            Signal::Hold => {
                tracing::info!("No action taken. Price: {:.2}, MA: {:.2}", price, ma);
                Ok(StepOutcome::NoAction)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::PaperVenue;
    use crate::strategy::MovingAverageConfig;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 3, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_enter_exit_lifecycle() {
        let mut tracker = PositionTracker::new("BTC/USD");
        tracker.enter(100.0, 2.0, t0()).unwrap();
        assert!(tracker.has_position());
        assert!((tracker.current().unwrap().unrealized_pnl(110.0) - 20.0).abs() < 1e-12);

        let trade = tracker.exit(150.0, t0() + Duration::days(10)).unwrap();
        assert!(!tracker.has_position());
        assert!((trade.profit() - 100.0).abs() < 1e-12);
        assert!((trade.roi_percent() - 50.0).abs() < 1e-9);
        assert_eq!(trade.hold_time(), Duration::days(10));
        assert!((tracker.realized_pnl() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_double_enter_and_flat_exit_fail() {
        let mut tracker = PositionTracker::new("BTC/USD");
        assert!(matches!(tracker.exit(100.0, t0()), Err(EngineError::Position(_))));

        tracker.enter(100.0, 1.0, t0()).unwrap();
        assert!(matches!(tracker.enter(90.0, 1.0, t0()), Err(EngineError::Position(_))));
        assert_eq!(tracker.current().unwrap().entry_price, 100.0);
    }

    #[test]
    fn test_non_positive_price_or_quantity_rejected() {
        let mut tracker = PositionTracker::new("BTC/USD");
        for (price, quantity) in [(0.0, 1.0), (f64::NAN, 1.0), (100.0, 0.0), (100.0, -1.0)] {
            let err = tracker.enter(price, quantity, t0()).unwrap_err();
            assert!(err.is_domain(), "accepted price {} quantity {}", price, quantity);
        }
        assert!(!tracker.has_position());

        tracker.enter(100.0, 1.0, t0()).unwrap();
        assert!(tracker.exit(0.0, t0()).unwrap_err().is_domain());
        assert!(tracker.has_position());
    }

    #[test]
    fn test_step_runs_full_cycle() {
        let signal = MovingAverageSignal::new(MovingAverageConfig {
            position_size: 3.0,
            ..Default::default()
        })
        .unwrap();
        let mut venue = PaperVenue::new();
        let mut tracker = PositionTracker::new("ETH/USD");

        // Inside the bands: nothing happens
        let outcome = tracker.step(&signal, 100.0, 100.0, t0(), &mut venue).unwrap();
        assert_eq!(outcome, StepOutcome::NoAction);

        // 10% below MA: enter
        let outcome = tracker.step(&signal, 90.0, 100.0, t0(), &mut venue).unwrap();
        assert!(matches!(outcome, StepOutcome::Entered(ref f) if f.quantity == 3.0));
        assert!(tracker.has_position());

        // Still cheap, but already holding
        let outcome = tracker.step(&signal, 80.0, 100.0, t0(), &mut venue).unwrap();
        assert_eq!(outcome, StepOutcome::NoAction);

        // 50% above MA: exit
        let later = t0() + Duration::weeks(4);
        match tracker.step(&signal, 150.0, 100.0, later, &mut venue).unwrap() {
            StepOutcome::Exited { trade, .. } => {
                assert!((trade.profit() - 180.0).abs() < 1e-9);
                assert_eq!(trade.hold_time(), Duration::weeks(4));
            }
            other => panic!("expected exit, got {:?}", other),
        }

        assert!(!tracker.has_position());
        assert_eq!(venue.fills().len(), 2);
        assert_eq!(tracker.closed_trades().len(), 1);
    }
}
