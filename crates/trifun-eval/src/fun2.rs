//! Bivariate functions produced by fixing one coordinate

use crate::axis::AxisFunction;
use crate::error::{EvalError, EvalResult};
use scirs2_core::ndarray_ext::{Array1, Array2};
use trifun_core::Axis;

/// `g(s, t) = Σᵢⱼ coeffs[i, j] · firstᵢ(s) · secondⱼ(t)`
///
/// `modes` records which coordinates of the parent trivariate function `s`
/// and `t` stand for.
#[derive(Clone, Debug, PartialEq)]
pub struct Fun2<A> {
    first: A,
    second: A,
    coeffs: Array2<f64>,
    modes: [Axis; 2],
}

impl<A: AxisFunction> Fun2<A> {
    /// # Errors
    ///
    /// [`EvalError::InvalidFunction`] if the coefficient matrix is not
    /// `first.rank() × second.rank()`.
    pub fn new(first: A, second: A, coeffs: Array2<f64>, modes: [Axis; 2]) -> EvalResult<Self> {
        if coeffs.dim() != (first.rank(), second.rank()) {
            return Err(EvalError::InvalidFunction(format!(
                "coefficients have shape {:?}, axis ranks are ({}, {})",
                coeffs.shape(),
                first.rank(),
                second.rank()
            )));
        }
        Ok(Self {
            first,
            second,
            coeffs,
            modes,
        })
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &A {
        &self.second
    }

    pub fn coeffs(&self) -> &Array2<f64> {
        &self.coeffs
    }

    /// Coordinates of the parent function left free
    pub fn modes(&self) -> [Axis; 2] {
        self.modes
    }

    pub fn rank(&self) -> (usize, usize) {
        self.coeffs.dim()
    }

    /// Evaluate at the pairs `(s[p], t[p])`
    ///
    /// # Errors
    ///
    /// [`EvalError::ShapeMismatch`] if `s` and `t` differ in length.
    pub fn evaluate(&self, s: &[f64], t: &[f64]) -> EvalResult<Array1<f64>> {
        if s.len() != t.len() {
            return Err(EvalError::ShapeMismatch(format!(
                "bivariate evaluation needs equal lengths, got {} and {}",
                s.len(),
                t.len()
            )));
        }
        let a = self.first.evaluate(s)?;
        let b = self.second.evaluate(t)?;
        if a.dim() != (s.len(), self.coeffs.nrows()) || b.dim() != (t.len(), self.coeffs.ncols()) {
            return Err(EvalError::Collaborator(format!(
                "axis values have shapes {:?} and {:?}, coefficients {:?}",
                a.shape(),
                b.shape(),
                self.coeffs.shape()
            )));
        }

        let ac = a.dot(&self.coeffs);
        Ok(Array1::from_shape_fn(s.len(), |p| ac.row(p).dot(&b.row(p))))
    }

    pub fn eval_point(&self, s: f64, t: f64) -> EvalResult<f64> {
        Ok(self.evaluate(&[s], &[t])?[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::ChebyshevBasis;
    use crate::domain::Interval;
    use scirs2_core::ndarray_ext::array;

    fn linear() -> ChebyshevBasis {
        ChebyshevBasis::new(array![[1.0, 0.0], [0.0, 1.0]], Interval::unit()).unwrap()
    }

    #[test]
    fn test_evaluate_bilinear() {
        // g(s, t) = 1 + 2 s t
        let g = Fun2::new(linear(), linear(), array![[1.0, 0.0], [0.0, 2.0]], [1, 2]).unwrap();
        let v = g.evaluate(&[0.5, -1.0], &[0.5, 0.25]).unwrap();
        assert_eq!(v[0], 1.5);
        assert_eq!(v[1], 0.5);
        assert_eq!(g.modes(), [1, 2]);
    }

    #[test]
    fn test_length_mismatch() {
        let g = Fun2::new(linear(), linear(), Array2::eye(2), [0, 1]).unwrap();
        assert!(g.evaluate(&[0.1, 0.2], &[0.3]).unwrap_err().is_shape_error());
    }

    #[test]
    fn test_coefficient_shape_checked() {
        let err = Fun2::new(linear(), linear(), Array2::zeros((2, 3)), [0, 1]).unwrap_err();
        assert!(matches!(err, EvalError::InvalidFunction(_)));
    }
}
