//! Black-Scholes Model
//!
//! Provides:
//! - Standard normal CDF/PDF
//! - d1/d2 intermediate terms
//! - European option pricing
//! - Greeks computation (delta, gamma, theta, vega)
//!
//! Every function here is pure. Inputs are validated up front and invalid
//! ones are reported as [`EngineError::Domain`] instead of being allowed to
//! produce NaN or infinities.

use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::erfc;

use crate::core::{EngineError, EngineResult, Greeks, OptionParams, OptionType};

/// Standard normal CDF
///
/// Φ(x) = erfc(-x/√2) / 2. The complementary error function keeps full
/// relative precision in the lower tail, where 1 - erf would cancel.
pub fn norm_cdf(x: f64) -> f64 {
    if x == f64::INFINITY {
        return 1.0;
    }
    if x == f64::NEG_INFINITY {
        return 0.0;
    }
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 and d2
///
/// d1 = [ln(S/K) + (r + σ²/2)·T] / (σ·√T), d2 = d1 - σ·√T
pub fn d1_d2(params: &OptionParams) -> EngineResult<(f64, f64)> {
    params.validate()?;

    let vol_sqrt_t = params.volatility * params.time_to_expiry.sqrt();
    if vol_sqrt_t <= 0.0 {
        return Err(EngineError::domain(
            "volatility",
            params.volatility,
            "volatility * sqrt(time_to_expiry) underflows to zero",
        ));
    }

    if !params.discount_factor().is_finite() {
        return Err(EngineError::domain("rate", params.rate, "discount factor overflows"));
    }

    let drift = (params.rate + 0.5 * params.volatility * params.volatility) * params.time_to_expiry;
    let d1 = (params.log_moneyness() + drift) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    Ok((d1, d2))
}

/// Black-Scholes European option price
pub fn price(params: &OptionParams) -> EngineResult<f64> {
    let (d1, d2) = d1_d2(params)?;
    price_from_d(params, d1, d2)
}

/// Black-Scholes Greeks
pub fn greeks(params: &OptionParams) -> EngineResult<Greeks> {
    let (d1, d2) = d1_d2(params)?;
    greeks_from_d(params, d1, d2)
}

/// Fair value and Greeks from a single d1/d2 evaluation
pub fn price_and_greeks(params: &OptionParams) -> EngineResult<(f64, Greeks)> {
    let (d1, d2) = d1_d2(params)?;
    Ok((price_from_d(params, d1, d2)?, greeks_from_d(params, d1, d2)?))
}

// Non-finite output from validated inputs means the rate terms overflowed.
fn non_finite_output(params: &OptionParams) -> EngineError {
    EngineError::domain("rate", params.rate, "pricing terms overflow")
}

fn price_from_d(params: &OptionParams, d1: f64, d2: f64) -> EngineResult<f64> {
    let spot = params.spot;
    let discounted_strike = params.strike * params.discount_factor();

    let value = match params.option_type {
        OptionType::Call => spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
        OptionType::Put => discounted_strike * norm_cdf(-d2) - spot * norm_cdf(-d1),
    };
    if !value.is_finite() {
        return Err(non_finite_output(params));
    }
    Ok(value)
}

fn greeks_from_d(params: &OptionParams, d1: f64, d2: f64) -> EngineResult<Greeks> {
    let spot = params.spot;
    let vol = params.volatility;
    let sqrt_t = params.time_to_expiry.sqrt();
    let pdf_d1 = norm_pdf(d1);
    let rate_term = params.rate * params.strike * params.discount_factor();

    // Delta
    let delta = match params.option_type {
        OptionType::Call => norm_cdf(d1),
        OptionType::Put => norm_cdf(d1) - 1.0,
    };

    // Gamma and vega are the same for call and put
    let gamma = pdf_d1 / (spot * vol * sqrt_t);
    let vega = spot * sqrt_t * pdf_d1;

    // Theta (annualized)
    let term1 = -(spot * pdf_d1 * vol) / (2.0 * sqrt_t);
    let theta = match params.option_type {
        OptionType::Call => term1 - rate_term * norm_cdf(d2),
        OptionType::Put => term1 + rate_term * norm_cdf(-d2),
    };

    let greeks = Greeks::new(delta, gamma, theta, vega);
    if !greeks.is_finite() {
        return Err(non_finite_output(params));
    }
    Ok(greeks)
}
