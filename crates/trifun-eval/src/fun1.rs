//! Univariate functions produced by fixing two coordinates

use crate::axis::AxisFunction;
use crate::error::{EvalError, EvalResult};
use scirs2_core::ndarray_ext::{Array1, Array2};
use trifun_core::Axis;

/// A family of `n` univariate functions `hₚ(t) = Σᵢ coeffs[i, p] · axisᵢ(t)`
///
/// Fixing two coordinates of a trivariate function at `n` points gives one
/// function of the free coordinate per point.
#[derive(Clone, Debug, PartialEq)]
pub struct Fun1<A> {
    axis: A,
    coeffs: Array2<f64>,
    mode: Axis,
}

impl<A: AxisFunction> Fun1<A> {
    /// # Errors
    ///
    /// [`EvalError::InvalidFunction`] if `coeffs` does not have
    /// `axis.rank()` rows.
    pub fn new(axis: A, coeffs: Array2<f64>, mode: Axis) -> EvalResult<Self> {
        if coeffs.nrows() != axis.rank() {
            return Err(EvalError::InvalidFunction(format!(
                "coefficients have {} rows, axis rank is {}",
                coeffs.nrows(),
                axis.rank()
            )));
        }
        Ok(Self { axis, coeffs, mode })
    }

    pub fn axis(&self) -> &A {
        &self.axis
    }

    pub fn coeffs(&self) -> &Array2<f64> {
        &self.coeffs
    }

    /// Coordinate of the parent function left free
    pub fn mode(&self) -> Axis {
        self.mode
    }

    /// Number of functions in the family
    pub fn len(&self) -> usize {
        self.coeffs.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values at `points`, one column per function (`N × n`)
    pub fn evaluate(&self, points: &[f64]) -> EvalResult<Array2<f64>> {
        let values = self.axis.evaluate(points)?;
        if values.dim() != (points.len(), self.coeffs.nrows()) {
            return Err(EvalError::Collaborator(format!(
                "axis returned shape {:?} for {} points and rank {}",
                values.shape(),
                points.len(),
                self.coeffs.nrows()
            )));
        }
        Ok(values.dot(&self.coeffs))
    }

    /// Values of every function at `t`
    pub fn eval_point(&self, t: f64) -> EvalResult<Array1<f64>> {
        Ok(self.evaluate(&[t])?.row(0).to_owned())
    }

    /// Fold the coefficients into the axis and compress it
    ///
    /// The result represents the same functions with identity coefficients.
    pub fn simplify(&self, tol: f64) -> EvalResult<Self> {
        let axis = self.axis.combine(&self.coeffs.view())?.simplify(tol);
        Ok(Self {
            coeffs: Array2::eye(axis.rank()),
            axis,
            mode: self.mode,
        })
    }
}
