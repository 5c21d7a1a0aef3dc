//! Evaluation arguments and their classification
//!
//! Each coordinate of an evaluation request is either a numeric array or the
//! whole-axis marker. Numeric arrays are classified by their significant
//! shape, which is what the engine's decision table keys on.

use crate::error::{EvalError, EvalResult};
use scirs2_core::ndarray_ext::{Array1, Array2, Array3, ArrayD, IxDyn};
use smallvec::SmallVec;
use std::fmt;
use trifun_core::Shape;

/// One coordinate of an evaluation request
#[derive(Clone, Debug, PartialEq)]
pub enum EvalArg {
    /// Leave this coordinate free and return a function of it
    Whole,
    /// Coordinate values: scalar, vector, matrix or 3-way array
    Numeric(ArrayD<f64>),
}

/// Classification of a numeric argument by significant shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Scalar,
    /// One non-singleton dimension (row, column or flat)
    Vector,
    /// Two dimensions, both larger than one
    Matrix,
    /// Three dimensions, at least two of them larger than one
    Tensor,
    /// Empty, or more than three significant dimensions
    Unsupported,
}

impl ArgKind {
    /// Kinds that describe a list of independent points
    pub fn is_pointlike(self) -> bool {
        matches!(self, ArgKind::Scalar | ArgKind::Vector)
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgKind::Scalar => "scalar",
            ArgKind::Vector => "vector",
            ArgKind::Matrix => "matrix",
            ArgKind::Tensor => "tensor",
            ArgKind::Unsupported => "unsupported array",
        };
        f.write_str(name)
    }
}

/// Shape with trailing singleton dimensions beyond the second removed
///
/// ```
/// use trifun_eval::arg::significant_shape;
///
/// assert_eq!(significant_shape(&[4, 5, 1, 1]).as_slice(), &[4, 5]);
/// assert_eq!(significant_shape(&[1, 1, 1]).as_slice(), &[1, 1]);
/// assert_eq!(significant_shape(&[3]).as_slice(), &[3]);
/// ```
pub fn significant_shape(shape: &[usize]) -> Shape {
    let mut sig: Shape = SmallVec::from_slice(shape);
    while sig.len() > 2 && sig.last() == Some(&1) {
        sig.pop();
    }
    sig
}

/// Classify a numeric array shape
///
/// ```
/// use trifun_eval::arg::{classify, ArgKind};
///
/// assert_eq!(classify(&[]), ArgKind::Scalar);
/// assert_eq!(classify(&[1, 1]), ArgKind::Scalar);
/// assert_eq!(classify(&[1, 6]), ArgKind::Vector);
/// assert_eq!(classify(&[6, 1]), ArgKind::Vector);
/// assert_eq!(classify(&[3, 4]), ArgKind::Matrix);
/// assert_eq!(classify(&[3, 4, 1]), ArgKind::Matrix);
/// assert_eq!(classify(&[3, 4, 5]), ArgKind::Tensor);
/// assert_eq!(classify(&[0, 4]), ArgKind::Unsupported);
/// assert_eq!(classify(&[2, 2, 2, 2]), ArgKind::Unsupported);
/// ```
pub fn classify(shape: &[usize]) -> ArgKind {
    let sig = significant_shape(shape);
    if sig.contains(&0) || sig.len() > 3 {
        return ArgKind::Unsupported;
    }
    let non_singleton = sig.iter().filter(|&&d| d > 1).count();
    match (sig.len(), non_singleton) {
        (_, 0) => ArgKind::Scalar,
        (_, 1) => ArgKind::Vector,
        (2, 2) => ArgKind::Matrix,
        (3, _) => ArgKind::Tensor,
        _ => ArgKind::Unsupported,
    }
}

impl EvalArg {
    pub fn is_whole(&self) -> bool {
        matches!(self, EvalArg::Whole)
    }

    /// Kind of a numeric argument, `None` for the whole-axis marker
    pub fn kind(&self) -> Option<ArgKind> {
        match self {
            EvalArg::Whole => None,
            EvalArg::Numeric(values) => Some(classify(values.shape())),
        }
    }

    pub fn as_array(&self) -> Option<&ArrayD<f64>> {
        match self {
            EvalArg::Whole => None,
            EvalArg::Numeric(values) => Some(values),
        }
    }

    /// Shape of a numeric argument, `None` for the whole-axis marker
    pub fn shape(&self) -> Option<&[usize]> {
        self.as_array().map(|values| values.shape())
    }

    /// Short description used in error messages
    pub fn describe(&self) -> String {
        match self {
            EvalArg::Whole => "whole".to_string(),
            EvalArg::Numeric(values) => {
                format!("{} {:?}", classify(values.shape()), values.shape())
            }
        }
    }
}

/// Numeric values of an argument, in logical row-major order
pub(crate) fn coordinates(arg: &EvalArg) -> EvalResult<Vec<f64>> {
    match arg {
        EvalArg::Numeric(values) => Ok(values.iter().copied().collect()),
        EvalArg::Whole => Err(EvalError::UnsupportedEvaluationShape(
            "expected numeric coordinates, got the whole-axis marker".into(),
        )),
    }
}

/// Copy a matrix or 3-way argument into a rank-3 array
///
/// The significant shape is padded with a trailing singleton when it has two
/// dimensions. Elements are taken in logical order so transposed inputs are
/// handled the same as contiguous ones.
pub(crate) fn as_grid3(arg: &EvalArg) -> EvalResult<Array3<f64>> {
    let values = coordinates(arg)?;
    let sig = arg.shape().map(significant_shape).unwrap_or_default();
    let dims = match sig.as_slice() {
        [m, n] => (*m, *n, 1),
        [a, b, c] => (*a, *b, *c),
        other => {
            return Err(EvalError::UnsupportedEvaluationShape(format!(
                "grid evaluation needs a matrix or 3-way array, got shape {:?}",
                other
            )))
        }
    };
    Array3::from_shape_vec(dims, values).map_err(|e| EvalError::ShapeMismatch(e.to_string()))
}

impl From<f64> for EvalArg {
    fn from(value: f64) -> Self {
        EvalArg::Numeric(ArrayD::from_elem(IxDyn(&[]), value))
    }
}

impl From<Vec<f64>> for EvalArg {
    fn from(values: Vec<f64>) -> Self {
        EvalArg::Numeric(Array1::from_vec(values).into_dyn())
    }
}

impl From<&[f64]> for EvalArg {
    fn from(values: &[f64]) -> Self {
        EvalArg::from(values.to_vec())
    }
}

impl From<Array1<f64>> for EvalArg {
    fn from(values: Array1<f64>) -> Self {
        EvalArg::Numeric(values.into_dyn())
    }
}

impl From<Array2<f64>> for EvalArg {
    fn from(values: Array2<f64>) -> Self {
        EvalArg::Numeric(values.into_dyn())
    }
}

impl From<Array3<f64>> for EvalArg {
    fn from(values: Array3<f64>) -> Self {
        EvalArg::Numeric(values.into_dyn())
    }
}

impl From<ArrayD<f64>> for EvalArg {
    fn from(values: ArrayD<f64>) -> Self {
        EvalArg::Numeric(values)
    }
}
