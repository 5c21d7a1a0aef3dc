//! Univariate function sets attached to the axes of a trivariate function
//!
//! A trivariate function in Tucker form carries one [`AxisFunction`] per
//! coordinate. The evaluation engine only ever calls the trait methods, so
//! any basis representation can be plugged in.

mod chebyshev;
mod composed;

pub use chebyshev::ChebyshevBasis;
pub use composed::{ComposedAxis, Parametrization};

use crate::domain::Interval;
use crate::error::EvalResult;
use scirs2_core::ndarray_ext::{Array2, ArrayView2};
use std::fmt;
use trifun_core::Rank;

/// A set of `r` univariate functions on one interval
pub trait AxisFunction: Clone + fmt::Debug {
    /// Number of functions in the set
    fn rank(&self) -> Rank;

    /// Interval the functions are defined on
    fn interval(&self) -> Interval;

    /// Evaluate all functions at `points`
    ///
    /// Returns an `N × r` matrix whose column `j` holds the values of the
    /// `j`-th function. Duplicate and out-of-interval points are allowed;
    /// what happens outside the interval is up to the implementation.
    fn evaluate(&self, points: &[f64]) -> EvalResult<Array2<f64>>;

    /// Linear recombination: column `j` of the result is
    /// `Σᵢ weights[i, j] · fᵢ`
    ///
    /// `weights` must have `r` rows; the result has `weights.ncols()`
    /// functions.
    fn combine(&self, weights: &ArrayView2<f64>) -> EvalResult<Self>;

    /// Compress the representation, dropping detail below `tol` relative to
    /// the largest magnitude
    fn simplify(&self, tol: f64) -> Self;
}
