//! Error types for the pricing engine and its collaborators
//!
//! The pure core (pricing + opportunity analysis) only ever produces
//! [`EngineError::Domain`] and [`EngineError::DegenerateMarket`]. The other
//! variants belong to the data, strategy and execution layers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Domain error: {field} = {value} ({reason})")]
    Domain {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Degenerate market: theoretical price {theoretical} is not positive")]
    DegenerateMarket { theoretical: f64 },

    #[error("Insufficient data: need {needed} points, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Position error: {0}")]
    Position(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub fn domain(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::Domain {
            field,
            value,
            reason,
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    pub fn position(msg: impl Into<String>) -> Self {
        Self::Position(msg.into())
    }

    /// Invalid mathematical precondition on an input
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }

    /// Non-positive theoretical price
    pub fn is_degenerate_market(&self) -> bool {
        matches!(self, Self::DegenerateMarket { .. })
    }

    /// Name of the offending input, for domain errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Domain { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Require a finite, strictly positive value
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> EngineResult<f64> {
    if !value.is_finite() {
        return Err(EngineError::domain(field, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(EngineError::domain(field, value, "must be strictly positive"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_message_names_field() {
        let err = EngineError::domain("volatility", 0.0, "must be strictly positive");
        assert_eq!(
            err.to_string(),
            "Domain error: volatility = 0 (must be strictly positive)"
        );
        assert!(err.is_domain());
        assert!(!err.is_degenerate_market());
        assert_eq!(err.field(), Some("volatility"));
    }

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("spot", 1.5).unwrap(), 1.5);
        assert!(ensure_positive("spot", 0.0).unwrap_err().is_domain());
        assert!(ensure_positive("spot", -2.0).unwrap_err().is_domain());
        assert!(ensure_positive("spot", f64::NAN).unwrap_err().is_domain());
        assert!(ensure_positive("spot", f64::INFINITY).unwrap_err().is_domain());
    }

    #[test]
    fn test_degenerate_market() {
        let err = EngineError::DegenerateMarket { theoretical: 0.0 };
        assert!(err.is_degenerate_market());
        assert_eq!(err.field(), None);
    }
}
