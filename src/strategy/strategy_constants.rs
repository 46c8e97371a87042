// --- ANALYZER CONSTANTS ---
/// Default drift threshold (fraction of portfolio value)
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.05;
/// Placeholder base-unit scale applied to USD correction amounts
pub const SUGGESTED_AMOUNT_SCALE: f64 = 1e18;
/// Benchmark sums further than this from 1.0 get a debug note
pub const BENCHMARK_SUM_TOLERANCE: f64 = 0.01;

// --- RANKER CONSTANTS ---
/// Points per unit of drift (5% drift -> 25 points)
pub const DRIFT_SCORE_FACTOR: f64 = 500.0;
pub const MAX_DRIFT_SCORE: f64 = 100.0;
pub const DEFAULT_RISK_MULTIPLIER: f64 = 1.0;
pub const RISK_MULTIPLIERS: [(&str, f64); 4] = [
    ("BTC", 1.2),
    ("ETH", 1.1),
    ("USDC", 0.8),
    ("USDT", 0.8),
];
/// Gas cost of a typical swap (USD)
pub const TYPICAL_GAS_COST_USD: f64 = 30.0;
/// Notional of a typical swap (USD)
pub const TYPICAL_SWAP_USD: f64 = 1000.0;
