use serde::{Deserialize, Deserializer, Serialize};

use super::errors::{SwapMathError, SwapMathResult};
use super::swap_math;

/// Swap quote as returned by a DEX aggregator. Only the gas and output fields are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "string_or_number")]
    pub from_amount: Option<String>, // wei
    #[serde(
        default,
        alias = "buyAmount",
        alias = "destAmount",
        deserialize_with = "string_or_number"
    )]
    pub to_amount: Option<String>, // wei
    #[serde(default, alias = "gas", deserialize_with = "string_or_number")]
    pub estimated_gas: Option<String>, // gas units
    #[serde(default, deserialize_with = "string_or_number")]
    pub gas_price: Option<String>, // wei
}

impl SwapQuote {
    /// Minimum acceptable output for this quote at the given slippage tolerance
    pub fn min_output(&self, slippage_percent: f64) -> SwapMathResult<String> {
        let to_amount = self
            .to_amount
            .as_deref()
            .ok_or_else(|| SwapMathError::InvalidInput("quote is missing its output amount".to_string()))?;
        swap_math::apply_slippage(to_amount, slippage_percent)
    }
}

// Aggregators disagree on whether integer fields are JSON strings or numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(u64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_aggregator_aliases_and_numeric_gas() {
        let json = r#"{
            "buyAmount": "2000000000000000000",
            "gas": 150000,
            "gasPrice": "1000000000"
        }"#;
        let quote: SwapQuote = serde_json::from_str(json).expect("valid quote");

        assert_eq!(quote.to_amount.as_deref(), Some("2000000000000000000"));
        assert_eq!(quote.estimated_gas.as_deref(), Some("150000"));
        assert_eq!(quote.gas_price.as_deref(), Some("1000000000"));
        assert_eq!(quote.from_token, None);
    }

    #[test]
    fn missing_fields_default_to_none() {
        let quote: SwapQuote = serde_json::from_str("{}").expect("empty quote");
        assert_eq!(quote, SwapQuote::default());
    }

    #[test]
    fn min_output_requires_output_amount() {
        let quote = SwapQuote::default();
        assert!(matches!(quote.min_output(0.5), Err(SwapMathError::InvalidInput(_))));

        let quote = SwapQuote {
            to_amount: Some("1000000000000000000".to_string()),
            ..Default::default()
        };
        assert_eq!(quote.min_output(0.5).unwrap(), "995000000000000000");
    }
}
