//! Example: Black-Scholes pricing and a trade recommendation
//!
//! Run with: cargo run --example basic_pricing

use bsm_edge::prelude::*;

fn main() -> EngineResult<()> {
    // Option parameters
    let spot = 100.0;
    let strike = 100.0;
    let time = 0.5; // 6 months
    let rate = 0.05; // 5% risk-free rate
    let vol = 0.20; // 20% volatility

    println!("=== Black-Scholes Pricing ===\n");
    println!("Spot:     ${:.2}", spot);
    println!("Strike:   ${:.2}", strike);
    println!("Time:     {:.2} years ({:.0} days)", time, time * 365.0);
    println!("Rate:     {:.1}%", rate * 100.0);
    println!("Vol:      {:.1}%\n", vol * 100.0);

    let call = OptionParams::call(spot, strike, time, rate, vol)?;
    let put = call.with_type(OptionType::Put);

    let (call_price, greeks) = price_and_greeks(&call)?;
    let put_price = price(&put)?;
    println!("Call Price: ${:.4}", call_price);
    println!("Put Price:  ${:.4}", put_price);

    // Verify put-call parity: C - P = S - K*e^(-rT)
    let parity_lhs = call_price - put_price;
    let parity_rhs = spot - strike * call.discount_factor();
    println!("\nPut-Call Parity Check:");
    println!("  C - P = {:.4}", parity_lhs);
    println!("  S - K*e^(-rT) = {:.4}", parity_rhs);
    println!("  Difference: {:.2e}", (parity_lhs - parity_rhs).abs());

    println!("\n=== Greeks (Call) ===\n");
    println!("Delta:  {:.4}", greeks.delta);
    println!("Gamma:  {:.4}", greeks.gamma);
    println!("Theta:  {:.4} (per day: {:.4})", greeks.theta, greeks.theta_per_day());
    println!("Vega:   {:.4}", greeks.vega);

    println!("\n=== Opportunity ===\n");
    let analyzer = OpportunityAnalyzer::new();
    for market_price in [6.0, 6.9, 10.0] {
        let rec = analyzer.analyze(market_price, &call)?;
        println!(
            "Market ${:.2}: deviation {:+.2}% -> {} (expected profit ${:.2})",
            market_price,
            rec.deviation * 100.0,
            rec.action,
            rec.expected_profit
        );
    }

    Ok(())
}
