//! Error types for tensor shape operations and contractions
//!
//! Every shape disagreement is reported, never broadcast, truncated or padded.
//! The variants carry enough context to tell which operand was wrong.

use thiserror::Error;

/// Error type for tensor algebra operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    /// Dimension mismatch between operands
    #[error("{operation}: dimension mismatch - expected {expected:?}, got {actual:?}. {context}")]
    DimensionMismatch {
        operation: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
        context: String,
    },

    /// Invalid mode/axis specification
    #[error("Invalid mode {mode}: must be < {max_mode}. {context}")]
    InvalidMode {
        mode: usize,
        max_mode: usize,
        context: String,
    },

    /// Axis list that is not a permutation of `0..rank`
    #[error("Invalid permutation {axes:?} for tensor of rank {rank}")]
    InvalidPermutation { axes: Vec<usize>, rank: usize },

    /// Shape incompatibility
    #[error("{operation}: incompatible shapes {shape_a:?} and {shape_b:?}: {reason}")]
    IncompatibleShapes {
        operation: String,
        shape_a: Vec<usize>,
        shape_b: Vec<usize>,
        reason: String,
    },

    /// Empty input not allowed
    #[error("{operation}: empty input not allowed for parameter '{parameter}'")]
    EmptyInput { operation: String, parameter: String },
}

/// Result type for tensor operations
pub type TensorResult<T> = Result<T, TensorError>;

impl TensorError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(
        operation: impl Into<String>,
        expected: Vec<usize>,
        actual: Vec<usize>,
        context: impl Into<String>,
    ) -> Self {
        TensorError::DimensionMismatch {
            operation: operation.into(),
            expected,
            actual,
            context: context.into(),
        }
    }

    /// Create an invalid mode error
    pub fn invalid_mode(mode: usize, max_mode: usize, context: impl Into<String>) -> Self {
        TensorError::InvalidMode {
            mode,
            max_mode,
            context: context.into(),
        }
    }

    /// Create an invalid permutation error
    pub fn invalid_permutation(axes: &[usize], rank: usize) -> Self {
        TensorError::InvalidPermutation {
            axes: axes.to_vec(),
            rank,
        }
    }

    /// Create an incompatible shapes error
    pub fn incompatible_shapes(
        operation: impl Into<String>,
        shape_a: Vec<usize>,
        shape_b: Vec<usize>,
        reason: impl Into<String>,
    ) -> Self {
        TensorError::IncompatibleShapes {
            operation: operation.into(),
            shape_a,
            shape_b,
            reason: reason.into(),
        }
    }

    /// Create an empty input error
    pub fn empty_input(operation: impl Into<String>, parameter: impl Into<String>) -> Self {
        TensorError::EmptyInput {
            operation: operation.into(),
            parameter: parameter.into(),
        }
    }

    /// Whether this error reports disagreeing operand shapes
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            TensorError::DimensionMismatch { .. } | TensorError::IncompatibleShapes { .. }
        )
    }
}
