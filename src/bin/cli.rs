//! bsm-edge CLI
//!
//! Command-line interface for pricing, opportunity analysis and the
//! moving-average signal.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use bsm_edge::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "bsm-edge")]
#[command(about = "Black-Scholes fair value, Greeks and trade recommendations")]
#[command(version)]
struct Cli {
    /// Path to a JSON engine configuration
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fair value and Greeks for one option
    Price(OptionArgs),

    /// Compare a market price with fair value
    Analyze {
        #[command(flatten)]
        option: OptionArgs,

        /// Observed option price
        #[arg(long)]
        market: f64,

        /// Relative deviation band (overrides the config file)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Moving-average band check against stored history
    MaSignal {
        /// Price history JSON file
        #[arg(long)]
        history: PathBuf,

        /// Symbol to evaluate
        #[arg(long)]
        symbol: String,

        /// Current price (fetched from the configured feed if omitted)
        #[arg(long)]
        price: Option<f64>,

        /// Whether a position is currently open
        #[arg(long, default_value_t = false)]
        holding: bool,
    },

    /// Append a price to the history file
    Record {
        /// Price history JSON file
        #[arg(long)]
        history: PathBuf,

        #[arg(long)]
        symbol: String,

        /// Price to store (fetched from the configured feed if omitted)
        #[arg(long)]
        price: Option<f64>,
    },

    /// Two-venue arbitrage check (buy on A, sell on B)
    Arb {
        #[arg(long)]
        price_a: f64,

        #[arg(long)]
        price_b: f64,

        #[arg(long, default_value_t = 0.5)]
        threshold: f64,

        /// Units traded, used to scale the reported profit
        #[arg(long, default_value_t = 1.0)]
        amount: f64,
    },

    /// Print a default configuration file
    ConfigTemplate,
}

#[derive(Args, Debug)]
struct OptionArgs {
    /// Underlying price
    #[arg(long)]
    spot: f64,

    /// Strike price
    #[arg(long)]
    strike: f64,

    /// Time to expiry in years
    #[arg(long)]
    time: f64,

    /// Risk-free rate
    #[arg(long, default_value_t = 0.05)]
    rate: f64,

    /// Annualized volatility
    #[arg(long)]
    vol: f64,

    #[arg(long, value_enum, default_value_t = Kind::Call)]
    kind: Kind,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Call,
    Put,
}

impl OptionArgs {
    fn params(&self) -> EngineResult<OptionParams> {
        let option_type = match self.kind {
            Kind::Call => OptionType::Call,
            Kind::Put => OptionType::Put,
        };
        OptionParams::new(self.spot, self.strike, self.time, self.rate, self.vol, option_type)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> EngineResult<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Price(option) => {
            let params = option.params()?;
            let (fair, g) = price_and_greeks(&params)?;

            println!("Black-Scholes {} ({})", params.option_type, describe(&params));
            println!("  Fair value: {:.4}", fair);
            println!("  Delta: {:.4}", g.delta);
            println!("  Gamma: {:.6}", g.gamma);
            println!("  Theta: {:.4} / year ({:.4} / day)", g.theta, g.theta_per_day());
            println!("  Vega:  {:.4} ({:.4} per vol point)", g.vega, g.vega_per_point());
        }

        Commands::Analyze {
            option,
            market,
            threshold,
        } => {
            let params = option.params()?;
            let analyzer_config = match threshold {
                Some(t) => AnalyzerConfig::with_threshold(t)?,
                None => config.analyzer,
            };
            let observed =
                ObservedAnalyzer::new(OpportunityAnalyzer::with_config(analyzer_config)?, TracingSink);
            let rec = observed.analyze("cli", market, &params)?;

            println!("Market: {:.4}  Theoretical: {:.4}", rec.market_price, rec.theoretical_price);
            println!("Deviation: {:.2}%  (band ±{:.2}%)", rec.deviation * 100.0, analyzer_config.threshold * 100.0);
            if rec.should_trade() {
                println!("Action: {}  Expected profit: {:.4}", rec.action, rec.expected_profit);
            } else {
                println!("Action: {}  (no trading opportunity)", rec.action);
            }
        }

        Commands::MaSignal {
            history,
            symbol,
            price,
            holding,
        } => {
            let store = PriceHistory::load(&history)?;
            let ma_config = config.moving_average;
            let source = price_source(&symbol, price, &config.feed)?;
            let (ma, current) =
                weekly_ma(&store, source.as_ref(), &symbol, ma_config.window, Utc::now())?;

            let signal = MovingAverageSignal::new(ma_config)?.evaluate(current, ma, holding);
            println!("{} - MA({}): {:.2}, Current: {:.2}", symbol, ma_config.window, ma, current);
            println!("Signal: {:?}", signal);
        }

        Commands::Record {
            history,
            symbol,
            price,
        } => {
            let source = price_source(&symbol, price, &config.feed)?;
            let current = source.current_price(&symbol)?;
            let mut file = HistoryFile::open(&history)?;
            file.record(&symbol, Utc::now(), current)?;
            println!(
                "Recorded {} at {:.4} ({} points stored)",
                symbol,
                current,
                file.history().len(&symbol)
            );
        }

        Commands::Arb {
            price_a,
            price_b,
            threshold,
            amount,
        } => {
            let signal = detect_arbitrage(price_a, price_b, threshold)?;
            if signal.found {
                println!(
                    "Arbitrage found! Buy at {:.4}, Sell at {:.4}, Profit: {:.4} ({:.4} per unit)",
                    price_a,
                    price_b,
                    signal.profit_for(amount),
                    signal.profit_per_unit
                );
            } else {
                println!("No arbitrage opportunity found.");
            }
        }

        Commands::ConfigTemplate => {
            println!("{}", EngineConfig::template());
        }
    }

    Ok(())
}

/// A fixed price when one is given, the HTTP feed otherwise
fn price_source(symbol: &str, price: Option<f64>, feed: &FeedConfig) -> EngineResult<Box<dyn PriceSource>> {
    match price {
        Some(p) => Ok(Box::new(StaticPriceSource::new().with_price(symbol, p))),
        None => Ok(Box::new(HttpPriceClient::new(feed)?)),
    }
}

fn describe(params: &OptionParams) -> String {
    format!(
        "S={:.2} K={:.2} T={:.4}y r={:.2}% vol={:.1}%",
        params.spot,
        params.strike,
        params.time_to_expiry,
        params.rate * 100.0,
        params.volatility * 100.0
    )
}
