//! Portfolio rebalancing analysis: allocation drift detection, opportunity ranking,
//! and wei-precise swap sizing (slippage bounds, gas cost in USD).
//!
//! Everything here is pure and synchronous. Prices, quotes and storage belong to the caller.

pub mod config;
pub mod logging;
pub mod spot_swap;
pub mod strategy;

pub use spot_swap::errors::SwapMathError;
pub use spot_swap::quote_types::SwapQuote;
pub use spot_swap::swap_math::{apply_slippage, estimate_gas_usd};
pub use strategy::analyzer::find_opportunities;
pub use strategy::ranker::{rank_by_score, rank_by_score_default, RankerConfig};
pub use strategy::types::{BenchmarkMap, Opportunity, OpportunityType, PortfolioHolding, ScoredOpportunity};
