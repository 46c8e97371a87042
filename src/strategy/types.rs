use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One asset position as seen by the analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioHolding {
    pub symbol: String,  // Uppercase ticker, e.g. "BTC"
    pub value_usd: f64,  // Quantity * live price, computed upstream
}

impl PortfolioHolding {
    pub fn new(symbol: impl Into<String>, value_usd: f64) -> Self {
        Self {
            symbol: symbol.into(),
            value_usd,
        }
    }
}

/// Target allocation fraction per uppercase symbol. Missing symbols mean target 0.
pub type BenchmarkMap = HashMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityType {
    Buy,
    Sell,
}

impl OpportunityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for OpportunityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flagged buy/sell suggestion for one holding whose drift exceeds the threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    #[serde(rename = "type")]
    pub kind: OpportunityType,
    pub asset: String,
    pub current_allocation: f64,
    pub target_allocation: f64,
    pub drift_amount: f64, // |current - target|, always > drift threshold
    /// USD correction scaled by 10^18 as an integer string.
    /// Not denominated in any real token: callers rescale with the token's price and decimals.
    pub suggested_amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredOpportunity {
    #[serde(flatten)]
    pub opportunity: Opportunity,
    pub score: f64,
}
