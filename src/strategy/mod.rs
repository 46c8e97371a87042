pub mod engine;
pub mod types;
pub mod analyzer;
pub mod ranker;
pub mod strategy_constants;
