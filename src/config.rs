use dotenvy::dotenv;
use eyre::{Result, WrapErr};
use std::env;
use std::str::FromStr;

use crate::spot_swap::swap_math::{self, DEFAULT_SLIPPAGE_PERCENT, MAX_TOKEN_DECIMALS, NATIVE_TOKEN_DECIMALS};
use crate::strategy::ranker::RankerConfig;
use crate::strategy::strategy_constants::DEFAULT_DRIFT_THRESHOLD;

#[derive(Debug, Clone)]
pub struct Config {
    pub drift_threshold: f64,
    pub slippage_percent: f64,
    pub native_token_price_usd: Option<f64>,
    pub output_token_decimals: u32,
    pub ranker: RankerConfig,
}

impl Config {
    /// Loads `.env` (if present) and reads settings from the process environment
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key -> value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let drift_threshold = parse_or(&lookup, "DRIFT_THRESHOLD", DEFAULT_DRIFT_THRESHOLD)?;
        if !(drift_threshold >= 0.0 && drift_threshold <= 1.0) {
            return Err(eyre::eyre!("DRIFT_THRESHOLD must be within [0, 1], got {}", drift_threshold));
        }

        let slippage_percent = parse_or(&lookup, "SLIPPAGE_PERCENT", DEFAULT_SLIPPAGE_PERCENT)?;
        swap_math::validate_slippage_percent(slippage_percent).wrap_err("Invalid SLIPPAGE_PERCENT")?;

        let native_token_price_usd = match lookup("NATIVE_TOKEN_PRICE_USD") {
            Some(raw) => Some(parse_value::<f64>("NATIVE_TOKEN_PRICE_USD", &raw)?),
            None => None,
        };

        let output_token_decimals = parse_or(&lookup, "OUTPUT_TOKEN_DECIMALS", NATIVE_TOKEN_DECIMALS)?;
        if output_token_decimals > MAX_TOKEN_DECIMALS {
            return Err(eyre::eyre!(
                "OUTPUT_TOKEN_DECIMALS must be at most {}, got {}",
                MAX_TOKEN_DECIMALS,
                output_token_decimals
            ));
        }

        let mut ranker = RankerConfig::default();
        ranker.default_risk_multiplier =
            parse_or(&lookup, "DEFAULT_RISK_MULTIPLIER", ranker.default_risk_multiplier)?;
        ranker.typical_gas_cost_usd = parse_or(&lookup, "TYPICAL_GAS_COST_USD", ranker.typical_gas_cost_usd)?;
        ranker.typical_swap_usd = parse_or(&lookup, "TYPICAL_SWAP_USD", ranker.typical_swap_usd)?;
        if let Some(raw) = lookup("RISK_MULTIPLIERS") {
            for (symbol, multiplier) in parse_risk_multipliers(&raw)? {
                ranker.risk_multipliers.insert(symbol, multiplier);
            }
        }
        ranker
            .validate()
            .map_err(|e| eyre::eyre!("Invalid ranker configuration (TYPICAL_SWAP_USD, TYPICAL_GAS_COST_USD, RISK_MULTIPLIERS): {}", e))?;

        Ok(Config {
            drift_threshold,
            slippage_percent,
            native_token_price_usd,
            output_token_decimals,
            ranker,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| eyre::eyre!("Invalid {} value {:?}: {}", key, raw, e))
}

/// Parses `BTC=1.2,ETH=1.1` into uppercase symbol / multiplier pairs
fn parse_risk_multipliers(raw: &str) -> Result<Vec<(String, f64)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (symbol, multiplier) = entry
                .split_once('=')
                .ok_or_else(|| eyre::eyre!("Invalid RISK_MULTIPLIERS entry {:?} (expected SYMBOL=multiplier)", entry))?;
            let multiplier = parse_value::<f64>("RISK_MULTIPLIERS", multiplier)?;
            Ok((symbol.trim().to_uppercase(), multiplier))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.drift_threshold, 0.05);
        assert_eq!(cfg.slippage_percent, 0.5);
        assert_eq!(cfg.native_token_price_usd, None);
        assert_eq!(cfg.output_token_decimals, 18);
        assert_eq!(cfg.ranker, RankerConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = config_from(&[
            ("DRIFT_THRESHOLD", "0.1"),
            ("SLIPPAGE_PERCENT", "1"),
            ("NATIVE_TOKEN_PRICE_USD", "2500.5"),
            ("RISK_MULTIPLIERS", "sol=1.3, BTC=1.5"),
            ("TYPICAL_GAS_COST_USD", "10"),
            ("OUTPUT_TOKEN_DECIMALS", "6"),
        ])
        .unwrap();

        assert_eq!(cfg.drift_threshold, 0.1);
        assert_eq!(cfg.slippage_percent, 1.0);
        assert_eq!(cfg.native_token_price_usd, Some(2500.5));
        assert_eq!(cfg.ranker.risk_multiplier("SOL"), 1.3);
        assert_eq!(cfg.ranker.risk_multiplier("BTC"), 1.5);
        assert_eq!(cfg.ranker.risk_multiplier("ETH"), 1.1);
        assert_eq!(cfg.ranker.typical_gas_cost_usd, 10.0);
        assert_eq!(cfg.output_token_decimals, 6);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(config_from(&[("DRIFT_THRESHOLD", "five")]).is_err());
        assert!(config_from(&[("DRIFT_THRESHOLD", "1.5")]).is_err());
        assert!(config_from(&[("SLIPPAGE_PERCENT", "80")]).is_err());
        assert!(config_from(&[("RISK_MULTIPLIERS", "BTC")]).is_err());
        assert!(config_from(&[("TYPICAL_SWAP_USD", "0")]).is_err());
        assert!(config_from(&[("TYPICAL_SWAP_USD", "-1000")]).is_err());
        assert!(config_from(&[("RISK_MULTIPLIERS", "BTC=-1")]).is_err());
        assert!(config_from(&[("OUTPUT_TOKEN_DECIMALS", "78")]).is_err());
        assert!(config_from(&[("OUTPUT_TOKEN_DECIMALS", "-6")]).is_err());
    }
}
