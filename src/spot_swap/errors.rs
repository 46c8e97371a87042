use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapMathError {
    /// A quote field or price violated the input contract. Caller bug, not retryable.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type SwapMathResult<T> = std::result::Result<T, SwapMathError>;
