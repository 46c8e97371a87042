use tracing::{info, instrument};

use super::analyzer;
use super::ranker::{self, RankerConfig};
use super::types::{BenchmarkMap, PortfolioHolding, ScoredOpportunity};

/// Entry point for a drift analysis: detect opportunities, then rank them
#[instrument(skip_all, fields(holdings = portfolio.len(), drift_threshold = drift_threshold))]
pub fn analyze_portfolio(
    portfolio: &[PortfolioHolding],
    benchmark: &BenchmarkMap,
    drift_threshold: f64,
    ranker_config: &RankerConfig,
) -> Vec<ScoredOpportunity> {
    let opportunities = analyzer::find_opportunities(portfolio, benchmark, drift_threshold);
    let ranked = ranker::rank_by_score(&opportunities, ranker_config);

    let summary = ranked
        .iter()
        .map(|scored| {
            format!(
                "{} {}: drift={:.2}%, score={:.2}",
                scored.opportunity.kind,
                scored.opportunity.asset,
                scored.opportunity.drift_amount * 100.0,
                scored.score,
            )
        })
        .collect::<Vec<_>>()
        .join("\n  ");

    info!(
        opportunities = ranked.len(),
        "Rebalancing analysis complete:\n  {}",
        if summary.is_empty() { "no drift beyond threshold" } else { summary.as_str() }
    );

    ranked
}
