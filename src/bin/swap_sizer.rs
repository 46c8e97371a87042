use std::fs;

use dotenvy::dotenv;
use eyre::WrapErr;
use serde::Serialize;
use tracing::{info, instrument, warn};

use portfolio_rebalance_core::config;
use portfolio_rebalance_core::logging;
use portfolio_rebalance_core::spot_swap::quote_types::SwapQuote;
use portfolio_rebalance_core::spot_swap::swap_math;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwapSizing {
    min_output: String,
    min_output_tokens: Option<String>,
    slippage_percent: f64,
    gas_native: Option<String>,
    gas_usd: Option<f64>,
}

#[instrument(name = "swap_sizer_main")]
fn main() -> eyre::Result<()> {
    // Load .env before logging so its log levels apply
    dotenv().ok();

    if let Err(e) = logging::init_logging(env!("CARGO_BIN_NAME").to_string()) {
        eprintln!("Failed to initialize logging: {}", e);
        return Err(e);
    }

    let cfg = config::Config::load()?;
    info!(slippage_percent = cfg.slippage_percent, "Configuration loaded and logging initialized");

    let quote_path = std::env::args()
        .nth(1)
        .ok_or_else(|| eyre::eyre!("Usage: swap_sizer <quote.json>"))?;
    let raw = fs::read_to_string(&quote_path).wrap_err_with(|| format!("Failed to read {}", quote_path))?;
    let quote: SwapQuote = serde_json::from_str(&raw).wrap_err("Failed to parse swap quote")?;

    let min_output = quote.min_output(cfg.slippage_percent)?;
    info!(
        to_amount = ?quote.to_amount,
        min_output = %min_output,
        slippage_percent = cfg.slippage_percent,
        "Applied slippage to quote"
    );

    let min_output_tokens = match swap_math::wei_to_decimal(&min_output, cfg.output_token_decimals) {
        Ok(tokens) => Some(tokens.normalize().to_string()),
        Err(e) => {
            warn!(error = %e, decimals = cfg.output_token_decimals, "Cannot express minimum output in token units");
            None
        }
    };
    let gas_native = match swap_math::gas_cost_wei(&quote)
        .and_then(|wei| swap_math::wei_to_decimal(&wei.to_string(), swap_math::NATIVE_TOKEN_DECIMALS))
    {
        Ok(native) => Some(native.normalize().to_string()),
        Err(e) => {
            warn!(error = %e, "Quote gas fields unusable; gas cost in native units unavailable");
            None
        }
    };
    info!(min_output_tokens = ?min_output_tokens, gas_native = ?gas_native, "Converted amounts to token units");

    let gas_usd = match cfg.native_token_price_usd {
        Some(price) => {
            let gas_usd = swap_math::estimate_gas_usd(&quote, price)?;
            info!(gas_usd, native_token_price_usd = price, "Estimated gas cost");
            Some(gas_usd)
        }
        None => {
            warn!("NATIVE_TOKEN_PRICE_USD not set; skipping gas estimate");
            None
        }
    };

    let sizing = SwapSizing {
        min_output,
        min_output_tokens,
        slippage_percent: cfg.slippage_percent,
        gas_native,
        gas_usd,
    };
    println!("{}", serde_json::to_string_pretty(&sizing)?);
    Ok(())
}
