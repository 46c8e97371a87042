use ethers::types::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use super::errors::{SwapMathError, SwapMathResult};
use super::quote_types::SwapQuote;

pub const DEFAULT_SLIPPAGE_PERCENT: f64 = 0.5; // 0.5%
pub const MAX_SLIPPAGE_PERCENT: f64 = 50.0;
const BPS_DENOMINATOR: u64 = 10_000;
pub const NATIVE_TOKEN_DECIMALS: u32 = 18;
/// Largest decimals value whose 10^decimals fits in a uint256
pub const MAX_TOKEN_DECIMALS: u32 = 77;

/// Slippage percentage to whole basis points (0.5% -> 50)
pub fn slippage_to_bps(slippage_percent: f64) -> i64 {
    (slippage_percent * 100.0).round() as i64
}

/// Minimum output after slippage: `output * (10000 - bps) / 10000`, truncated.
/// Pure integer arithmetic. A tolerance of 100% or more floors at zero.
pub fn apply_slippage_wei(output_amount: U256, slippage_percent: f64) -> U256 {
    let keep_bps = (BPS_DENOMINATOR as i64).saturating_sub(slippage_to_bps(slippage_percent));
    if keep_bps <= 0 || output_amount.is_zero() {
        return U256::zero();
    }

    let keep_bps = U256::from(keep_bps as u64);
    let denominator = U256::from(BPS_DENOMINATOR);

    // Split output = q * 10000 + r so the product cannot overflow unless the result does
    let quotient = output_amount / denominator;
    let remainder = output_amount % denominator;
    quotient
        .saturating_mul(keep_bps)
        .saturating_add(remainder * keep_bps / denominator)
}

/// [`apply_slippage_wei`] over base-10 wei strings.
///
/// The amount must fit in a uint256, the bound of any on-chain token amount. Values of
/// 2^256 or more are rejected with [`SwapMathError::InvalidInput`] rather than computed
/// with wider arithmetic.
pub fn apply_slippage(output_amount: &str, slippage_percent: f64) -> SwapMathResult<String> {
    let output_amount = parse_wei("outputAmount", output_amount)?;
    Ok(apply_slippage_wei(output_amount, slippage_percent).to_string())
}

/// Caller-side check for a user supplied slippage tolerance
pub fn validate_slippage_percent(slippage_percent: f64) -> SwapMathResult<f64> {
    if !slippage_percent.is_finite() || !(0.0..=MAX_SLIPPAGE_PERCENT).contains(&slippage_percent) {
        return Err(SwapMathError::InvalidInput(format!(
            "slippage must be between 0 and {}%, got {}",
            MAX_SLIPPAGE_PERCENT, slippage_percent
        )));
    }
    Ok(slippage_percent)
}

/// Gas cost of a quote in USD: `estimatedGas * gasPrice / 10^18 * nativeTokenPriceUsd`
pub fn estimate_gas_usd(quote: &SwapQuote, native_token_price_usd: f64) -> SwapMathResult<f64> {
    if !native_token_price_usd.is_finite() || native_token_price_usd <= 0.0 {
        return Err(SwapMathError::InvalidInput(format!(
            "native token price must be a positive number, got {}",
            native_token_price_usd
        )));
    }

    let gas_cost_native: f64 = ethers::utils::format_units(gas_cost_wei(quote)?, NATIVE_TOKEN_DECIMALS as usize)
        .map_err(|e| SwapMathError::InvalidInput(format!("Failed to format gas cost: {}", e)))?
        .parse()
        .map_err(|e| SwapMathError::InvalidInput(format!("Failed to parse formatted gas cost: {}", e)))?;

    Ok(gas_cost_native * native_token_price_usd)
}

/// `estimatedGas * gasPrice` in wei of the native token
pub fn gas_cost_wei(quote: &SwapQuote) -> SwapMathResult<U256> {
    let estimated_gas = parse_required_wei("estimatedGas", quote.estimated_gas.as_deref())?;
    let gas_price = parse_required_wei("gasPrice", quote.gas_price.as_deref())?;

    estimated_gas
        .checked_mul(gas_price)
        .ok_or_else(|| SwapMathError::InvalidInput("estimatedGas * gasPrice overflows 256 bits".to_string()))
}

/// Wei string to a human-readable token amount.
/// Errors when the formatted value exceeds `Decimal`'s 28 significant digits.
pub fn wei_to_decimal(wei: &str, decimals: u32) -> SwapMathResult<Decimal> {
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(SwapMathError::InvalidInput(format!(
            "token decimals must be at most {}, got {}",
            MAX_TOKEN_DECIMALS, decimals
        )));
    }
    let value = parse_wei("amount", wei)?;
    let formatted = ethers::utils::format_units(value, decimals as usize)
        .map_err(|e| SwapMathError::InvalidInput(format!("Failed to format U256 value: {}", e)))?;
    Decimal::from_str(&formatted)
        .map_err(|e| SwapMathError::InvalidInput(format!("Failed to parse formatted value: {}", e)))
}

fn parse_required_wei(field: &str, value: Option<&str>) -> SwapMathResult<U256> {
    let value = value.ok_or_else(|| SwapMathError::InvalidInput(format!("{} is missing", field)))?;
    parse_wei(field, value)
}

fn parse_wei(field: &str, value: &str) -> SwapMathResult<U256> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SwapMathError::InvalidInput(format!(
            "{} must be a base-10 unsigned integer, got {:?}",
            field, value
        )));
    }
    U256::from_dec_str(trimmed)
        .map_err(|e| SwapMathError::InvalidInput(format!("{} is not a valid uint256: {:?}", field, e)))
}
