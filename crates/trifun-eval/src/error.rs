//! Error types for function evaluation
//!
//! Shape problems are reported before any contraction starts, so an error
//! never comes with a partial result.

use thiserror::Error;
use trifun_core::TensorError;

/// Errors raised while building or evaluating trivariate functions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Coordinate arrays disagree in shape
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Failure inside a tensor contraction or reshape
    #[error(transparent)]
    Tensor(#[from] TensorError),

    /// Argument combination outside the evaluation table
    #[error("Unsupported evaluation shape: {0}")]
    UnsupportedEvaluationShape(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// Function object that violates its own invariants
    #[error("Invalid function: {0}")]
    InvalidFunction(String),

    /// An axis function returned something the engine cannot use
    #[error("Axis function failed: {0}")]
    Collaborator(String),
}

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

impl EvalError {
    /// Whether this error is a shape error: disagreeing coordinate shapes or
    /// a contraction whose operands do not line up
    pub fn is_shape_error(&self) -> bool {
        match self {
            EvalError::ShapeMismatch(_) => true,
            EvalError::Tensor(e) => e.is_shape_error(),
            _ => false,
        }
    }
}
