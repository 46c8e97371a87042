use std::fs;

use dotenvy::dotenv;
use eyre::WrapErr;
use serde::Deserialize;
use tracing::{info, instrument};

use portfolio_rebalance_core::config;
use portfolio_rebalance_core::logging;
use portfolio_rebalance_core::strategy::engine;
use portfolio_rebalance_core::strategy::types::{BenchmarkMap, PortfolioHolding};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScanRequest {
    portfolio: Vec<PortfolioHolding>,
    benchmark: BenchmarkMap,
    drift_threshold: Option<f64>,
}

#[instrument(name = "opportunity_scanner_main")]
fn main() -> eyre::Result<()> {
    // Load .env before logging so its log levels apply
    dotenv().ok();

    if let Err(e) = logging::init_logging(env!("CARGO_BIN_NAME").to_string()) {
        eprintln!("Failed to initialize logging: {}", e);
        return Err(e);
    }

    let cfg = config::Config::load()?;
    info!(drift_threshold = cfg.drift_threshold, "Configuration loaded and logging initialized");

    let input_path = std::env::args()
        .nth(1)
        .ok_or_else(|| eyre::eyre!("Usage: opportunity_scanner <input.json>"))?;
    let raw = fs::read_to_string(&input_path).wrap_err_with(|| format!("Failed to read {}", input_path))?;
    let request: ScanRequest = serde_json::from_str(&raw).wrap_err("Failed to parse scan request")?;

    let drift_threshold = request.drift_threshold.unwrap_or(cfg.drift_threshold);
    info!(
        holdings = request.portfolio.len(),
        benchmark_assets = request.benchmark.len(),
        drift_threshold,
        "Scanning portfolio for rebalancing opportunities"
    );

    let ranked = engine::analyze_portfolio(&request.portfolio, &request.benchmark, drift_threshold, &cfg.ranker);

    println!("{}", serde_json::to_string_pretty(&ranked)?);
    Ok(())
}
