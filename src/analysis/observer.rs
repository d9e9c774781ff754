//! Observability around the pure analyzer
//!
//! The analyzer itself never logs. [`ObservedAnalyzer`] calls it, then hands
//! a structured [`EvaluationRecord`] to an [`EvaluationSink`]. Sinks only
//! observe: the returned recommendation is exactly what the bare analyzer
//! produced.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Action, EngineResult, Greeks, OptionParams, Recommendation};

use super::OpportunityAnalyzer;

/// One evaluation, flattened for logging or export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Caller-supplied instrument label
    pub label: String,
    pub params: OptionParams,
    pub market_price: f64,
    pub theoretical_price: f64,
    pub deviation: f64,
    pub threshold: f64,
    pub action: Action,
    pub expected_profit: f64,
    pub greeks: Greeks,
    pub timestamp: DateTime<Utc>,
}

impl EvaluationRecord {
    pub fn from_recommendation(
        label: impl Into<String>,
        params: &OptionParams,
        threshold: f64,
        rec: &Recommendation,
    ) -> Self {
        Self {
            label: label.into(),
            params: *params,
            market_price: rec.market_price,
            theoretical_price: rec.theoretical_price,
            deviation: rec.deviation,
            threshold,
            action: rec.action,
            expected_profit: rec.expected_profit,
            greeks: rec.greeks,
            timestamp: Utc::now(),
        }
    }
}

/// Destination for evaluation records
pub trait EvaluationSink {
    fn record(&self, record: &EvaluationRecord);
}

/// Emits each record as a structured `tracing` event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EvaluationSink for TracingSink {
    fn record(&self, r: &EvaluationRecord) {
        tracing::info!(
            label = %r.label,
            option_type = %r.params.option_type,
            market_price = r.market_price,
            theoretical_price = r.theoretical_price,
            deviation = r.deviation,
            action = %r.action,
            expected_profit = r.expected_profit,
            "Analysis - Market Price: {:.2}, Theoretical Price: {:.2}, Difference: {:.2}%",
            r.market_price,
            r.theoretical_price,
            r.deviation * 100.0
        );
        tracing::info!(
            label = %r.label,
            delta = r.greeks.delta,
            gamma = r.greeks.gamma,
            theta = r.greeks.theta,
            vega = r.greeks.vega,
            "Greeks - Delta: {:.4}, Gamma: {:.4}, Theta: {:.4}, Vega: {:.4}",
            r.greeks.delta,
            r.greeks.gamma,
            r.greeks.theta,
            r.greeks.vega
        );
    }
}

/// Collects records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<EvaluationRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn records(&self) -> Vec<EvaluationRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.records.lock() {
            Ok(records) => records.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EvaluationSink for MemorySink {
    fn record(&self, record: &EvaluationRecord) {
        let mut records = match self.records.lock() {
            Ok(records) => records,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.push(record.clone());
    }
}

impl<S: EvaluationSink + ?Sized> EvaluationSink for &S {
    fn record(&self, record: &EvaluationRecord) {
        (**self).record(record)
    }
}

/// Analyzer wrapped with an evaluation sink
pub struct ObservedAnalyzer<S: EvaluationSink> {
    analyzer: OpportunityAnalyzer,
    sink: S,
}

impl<S: EvaluationSink> ObservedAnalyzer<S> {
    pub fn new(analyzer: OpportunityAnalyzer, sink: S) -> Self {
        Self { analyzer, sink }
    }

    pub fn analyzer(&self) -> &OpportunityAnalyzer {
        &self.analyzer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Analyze one instrument, recording the outcome
    ///
    /// Errors are logged with their context and returned unchanged.
    pub fn analyze(
        &self,
        label: &str,
        market_price: f64,
        params: &OptionParams,
    ) -> EngineResult<Recommendation> {
        match self.analyzer.analyze(market_price, params) {
            Ok(rec) => {
                let record = EvaluationRecord::from_recommendation(
                    label,
                    params,
                    self.analyzer.threshold(),
                    &rec,
                );
                self.sink.record(&record);
                Ok(rec)
            }
            Err(e) => {
                tracing::warn!(label, market_price, error = %e, "Evaluation rejected");
                Err(e)
            }
        }
    }

    /// Analyze many instruments; a failure only affects its own slot
    pub fn analyze_batch<'a, I>(&self, inputs: I) -> Vec<(String, EngineResult<Recommendation>)>
    where
        I: IntoIterator<Item = (&'a str, f64, OptionParams)>,
    {
        let results: Vec<_> = inputs
            .into_iter()
            .map(|(label, market_price, params)| {
                (label.to_string(), self.analyze(label, market_price, &params))
            })
            .collect();

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        tracing::info!(
            evaluated = results.len(),
            failed,
            "Batch evaluation complete"
        );

        results
    }
}
