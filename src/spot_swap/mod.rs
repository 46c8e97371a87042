pub mod errors;
pub mod quote_types;
pub mod swap_math;
