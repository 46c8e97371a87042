use std::collections::HashSet;

use tracing::{debug, warn};

use super::strategy_constants::{BENCHMARK_SUM_TOLERANCE, SUGGESTED_AMOUNT_SCALE};
use super::types::{BenchmarkMap, Opportunity, OpportunityType, PortfolioHolding};

/// Flags every holding whose allocation drifts from its benchmark target by more than
/// `drift_threshold`. Output keeps portfolio order; ranking is done separately.
pub fn find_opportunities(
    portfolio: &[PortfolioHolding],
    benchmark: &BenchmarkMap,
    drift_threshold: f64,
) -> Vec<Opportunity> {
    if portfolio.is_empty() {
        return Vec::new();
    }

    let total_value_usd: f64 = portfolio.iter().map(|holding| holding.value_usd).sum();
    if !(total_value_usd > 0.0) {
        warn!(
            total_value_usd,
            holdings = portfolio.len(),
            "Total portfolio value is not positive; allocations are undefined, skipping drift analysis"
        );
        return Vec::new();
    }

    let weight_sum = benchmark_weight_sum(benchmark, portfolio);
    if (weight_sum - 1.0).abs() > BENCHMARK_SUM_TOLERANCE {
        debug!(weight_sum, "Benchmark targets for held assets do not sum to 1.0");
    }

    portfolio
        .iter()
        .filter_map(|holding| {
            let current_allocation = holding.value_usd / total_value_usd;
            let target_allocation = benchmark.get(&holding.symbol).copied().unwrap_or(0.0);
            let drift = current_allocation - target_allocation;
            let drift_amount = drift.abs();

            // Strict: a drift equal to the threshold is not flagged
            if !(drift_amount > drift_threshold) {
                return None;
            }

            let kind = if drift > 0.0 { OpportunityType::Sell } else { OpportunityType::Buy };

            Some(Opportunity {
                kind,
                asset: holding.symbol.clone(),
                current_allocation,
                target_allocation,
                drift_amount,
                suggested_amount: usd_to_placeholder_base_units(drift_amount * total_value_usd),
            })
        })
        .collect()
}

/// Sum of benchmark targets over the distinct symbols present in the portfolio
pub fn benchmark_weight_sum(benchmark: &BenchmarkMap, portfolio: &[PortfolioHolding]) -> f64 {
    let mut seen: HashSet<&str> = HashSet::with_capacity(portfolio.len());
    portfolio
        .iter()
        .filter(|holding| seen.insert(holding.symbol.as_str()))
        .map(|holding| benchmark.get(&holding.symbol).copied().unwrap_or(0.0))
        .sum()
}

/// USD amount * 10^18, rounded to the nearest integer and rendered in base 10
fn usd_to_placeholder_base_units(amount_usd: f64) -> String {
    let scaled = (amount_usd * SUGGESTED_AMOUNT_SCALE).round();
    // Formatting an integral f64 with zero precision prints its exact digits
    format!("{:.0}", scaled)
}
