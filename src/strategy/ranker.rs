use std::collections::HashMap;

use tracing::{debug, warn};

use super::strategy_constants::{
    DEFAULT_RISK_MULTIPLIER, DRIFT_SCORE_FACTOR, MAX_DRIFT_SCORE, RISK_MULTIPLIERS,
    TYPICAL_GAS_COST_USD, TYPICAL_SWAP_USD,
};
use super::types::{Opportunity, ScoredOpportunity};

/// Scoring policy for ranking rebalancing opportunities
#[derive(Debug, Clone, PartialEq)]
pub struct RankerConfig {
    pub risk_multipliers: HashMap<String, f64>,
    pub default_risk_multiplier: f64,
    pub typical_gas_cost_usd: f64,
    pub typical_swap_usd: f64,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            risk_multipliers: RISK_MULTIPLIERS
                .iter()
                .map(|(symbol, multiplier)| (symbol.to_string(), *multiplier))
                .collect(),
            default_risk_multiplier: DEFAULT_RISK_MULTIPLIER,
            typical_gas_cost_usd: TYPICAL_GAS_COST_USD,
            typical_swap_usd: TYPICAL_SWAP_USD,
        }
    }
}

impl RankerConfig {
    /// Rejects a policy whose gas penalty or multipliers cannot be computed
    pub fn validate(&self) -> Result<(), String> {
        if !(self.typical_swap_usd > 0.0) {
            return Err(format!("typical swap size must be positive, got {}", self.typical_swap_usd));
        }
        if !self.typical_gas_cost_usd.is_finite() || self.typical_gas_cost_usd < 0.0 {
            return Err(format!("typical gas cost must be non-negative, got {}", self.typical_gas_cost_usd));
        }
        if let Some((asset, multiplier)) = self
            .risk_multipliers
            .iter()
            .find(|(_, m)| !m.is_finite() || **m < 0.0)
        {
            return Err(format!("risk multiplier for {} must be non-negative, got {}", asset, multiplier));
        }
        Ok(())
    }

    pub fn risk_multiplier(&self, asset: &str) -> f64 {
        self.risk_multipliers
            .get(asset)
            .copied()
            .unwrap_or(self.default_risk_multiplier)
    }

    /// Gas cost as a percentage of a typical swap. Fixed: the opportunity itself is not consulted.
    pub fn gas_impact(&self, _opportunity: &Opportunity) -> f64 {
        if !(self.typical_swap_usd > 0.0) {
            warn!(
                typical_swap_usd = self.typical_swap_usd,
                "Typical swap size is not positive; gas penalty disabled"
            );
            return 0.0;
        }
        (self.typical_gas_cost_usd / self.typical_swap_usd) * 100.0
    }

    pub fn score(&self, opportunity: &Opportunity) -> f64 {
        let drift_score = drift_score(opportunity.drift_amount);
        let risk_multiplier = self.risk_multiplier(&opportunity.asset);
        let gas_impact = self.gas_impact(opportunity);
        (drift_score * risk_multiplier - gas_impact).max(0.0)
    }
}

/// Linear drift amplification, saturating at 100 points
pub fn drift_score(drift_amount: f64) -> f64 {
    (drift_amount * DRIFT_SCORE_FACTOR).min(MAX_DRIFT_SCORE)
}

/// Scores each opportunity and returns them highest score first. Ties keep input order.
pub fn rank_by_score(opportunities: &[Opportunity], config: &RankerConfig) -> Vec<ScoredOpportunity> {
    let mut scored: Vec<ScoredOpportunity> = opportunities
        .iter()
        .map(|opportunity| ScoredOpportunity {
            score: config.score(opportunity),
            opportunity: opportunity.clone(),
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    if let Some(top) = scored.first() {
        debug!(
            count = scored.len(),
            top_asset = %top.opportunity.asset,
            top_score = top.score,
            "Ranked rebalancing opportunities"
        );
    }

    scored
}

/// [`rank_by_score`] with the default risk table and gas penalty
pub fn rank_by_score_default(opportunities: &[Opportunity]) -> Vec<ScoredOpportunity> {
    rank_by_score(opportunities, &RankerConfig::default())
}
