//! Chebyshev expansions on an interval
//!
//! Each function of the set is stored as a column of Chebyshev
//! coefficients, `f(x) = Σₖ c[k] Tₖ(t)` with `t` the affine image of `x` in
//! `[-1, 1]`. Evaluation uses the Clenshaw recurrence.

use super::AxisFunction;
use crate::domain::Interval;
use crate::error::{EvalError, EvalResult};
use scirs2_core::ndarray_ext::{s, Array2, ArrayView1, ArrayView2};
use trifun_core::Rank;

/// A set of Chebyshev expansions sharing one interval
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use trifun_eval::{AxisFunction, ChebyshevBasis, Interval};
///
/// // {1, x} on [-1, 1]
/// let basis = ChebyshevBasis::new(array![[1.0, 0.0], [0.0, 1.0]], Interval::unit()).unwrap();
/// let values = basis.evaluate(&[0.5, -0.25]).unwrap();
/// assert_eq!(values.shape(), &[2, 2]);
/// assert_eq!(values[[0, 1]], 0.5);
/// assert_eq!(values[[1, 0]], 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ChebyshevBasis {
    /// Coefficients, one row per degree and one column per function
    coeffs: Array2<f64>,
    interval: Interval,
}

impl ChebyshevBasis {
    /// Create a basis from a `(degree + 1) × r` coefficient matrix
    ///
    /// # Errors
    ///
    /// [`EvalError::InvalidFunction`] if the matrix has no rows.
    pub fn new(coeffs: Array2<f64>, interval: Interval) -> EvalResult<Self> {
        if coeffs.nrows() == 0 {
            return Err(EvalError::InvalidFunction(
                "Chebyshev coefficients need at least one row".into(),
            ));
        }
        Ok(Self { coeffs, interval })
    }

    /// A set with no functions
    pub fn empty(interval: Interval) -> Self {
        Self {
            coeffs: Array2::zeros((1, 0)),
            interval,
        }
    }

    /// The single constant function `value`
    pub fn constant(value: f64, interval: Interval) -> Self {
        Self {
            coeffs: Array2::from_elem((1, 1), value),
            interval,
        }
    }

    /// The single function `x ↦ x` on `interval`
    ///
    /// ```
    /// use trifun_eval::{AxisFunction, ChebyshevBasis, Interval};
    ///
    /// let x = ChebyshevBasis::coordinate(Interval::new(2.0, 6.0).unwrap());
    /// let v = x.evaluate(&[3.0, 5.5]).unwrap();
    /// assert!((v[[0, 0]] - 3.0).abs() < 1e-15);
    /// assert!((v[[1, 0]] - 5.5).abs() < 1e-15);
    /// ```
    pub fn coordinate(interval: Interval) -> Self {
        let mut coeffs = Array2::zeros((2, 1));
        coeffs[[0, 0]] = interval.midpoint();
        coeffs[[1, 0]] = 0.5 * interval.width();
        Self { coeffs, interval }
    }

    /// Interpolate functions at `n` Chebyshev points of the first kind
    ///
    /// The result has degree `n - 1` and one column per entry of `fns`.
    ///
    /// # Errors
    ///
    /// [`EvalError::InvalidFunction`] if `n` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use trifun_eval::{AxisFunction, ChebyshevBasis, Interval};
    ///
    /// let cube = |x: f64| x * x * x;
    /// let basis = ChebyshevBasis::interpolate(Interval::unit(), 4, &[&cube]).unwrap();
    /// let v = basis.evaluate(&[0.3]).unwrap();
    /// assert!((v[[0, 0]] - 0.027).abs() < 1e-14);
    /// ```
    pub fn interpolate(interval: Interval, n: usize, fns: &[&dyn Fn(f64) -> f64]) -> EvalResult<Self> {
        if n == 0 {
            return Err(EvalError::InvalidFunction(
                "interpolation needs at least one point".into(),
            ));
        }

        let theta: Vec<f64> = (0..n)
            .map(|j| std::f64::consts::PI * (j as f64 + 0.5) / n as f64)
            .collect();

        let mut coeffs = Array2::zeros((n, fns.len()));
        for (col, f) in fns.iter().enumerate() {
            let samples: Vec<f64> = theta.iter().map(|th| f(interval.from_unit(th.cos()))).collect();
            for k in 0..n {
                let sum: f64 = samples
                    .iter()
                    .zip(&theta)
                    .map(|(v, th)| v * (k as f64 * th).cos())
                    .sum();
                let scale = if k == 0 { 1.0 } else { 2.0 };
                coeffs[[k, col]] = scale * sum / n as f64;
            }
        }

        Ok(Self { coeffs, interval })
    }

    /// Coefficient matrix, `(degree + 1) × r`
    pub fn coefficients(&self) -> &Array2<f64> {
        &self.coeffs
    }

    /// Polynomial degree shared by the set
    pub fn degree(&self) -> usize {
        self.coeffs.nrows() - 1
    }
}

/// Clenshaw recurrence for `Σₖ c[k] Tₖ(t)`
fn clenshaw(c: &ArrayView1<f64>, t: f64) -> f64 {
    let mut b1 = 0.0;
    let mut b2 = 0.0;
    for k in (1..c.len()).rev() {
        let b0 = c[k] + 2.0 * t * b1 - b2;
        b2 = b1;
        b1 = b0;
    }
    c[0] + t * b1 - b2
}

impl AxisFunction for ChebyshevBasis {
    fn rank(&self) -> Rank {
        self.coeffs.ncols()
    }

    fn interval(&self) -> Interval {
        self.interval
    }

    fn evaluate(&self, points: &[f64]) -> EvalResult<Array2<f64>> {
        let r = self.rank();
        let mut values = Array2::zeros((points.len(), r));
        for (p, &x) in points.iter().enumerate() {
            let t = self.interval.to_unit(x);
            for col in 0..r {
                values[[p, col]] = clenshaw(&self.coeffs.column(col), t);
            }
        }
        Ok(values)
    }

    fn combine(&self, weights: &ArrayView2<f64>) -> EvalResult<Self> {
        if weights.nrows() != self.rank() {
            return Err(EvalError::ShapeMismatch(format!(
                "combine: weights have {} rows, basis has {} functions",
                weights.nrows(),
                self.rank()
            )));
        }
        Ok(Self {
            coeffs: self.coeffs.dot(weights),
            interval: self.interval,
        })
    }

    fn simplify(&self, tol: f64) -> Self {
        let max = self.coeffs.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
        let threshold = tol * max;

        // NaN rows are never dropped
        let keep = (0..self.coeffs.nrows())
            .rev()
            .find(|&k| self.coeffs.row(k).iter().any(|c| !(c.abs() <= threshold)))
            .map_or(1, |k| k + 1);

        Self {
            coeffs: self.coeffs.slice(s![..keep, ..]).to_owned(),
            interval: self.interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_clenshaw_matches_chebyshev_polynomials() {
        // T3(t) = 4t³ - 3t
        let basis = ChebyshevBasis::new(array![[0.0], [0.0], [0.0], [1.0]], Interval::unit()).unwrap();
        for &t in &[-1.0, -0.3, 0.0, 0.7, 1.0] {
            let v = basis.evaluate(&[t]).unwrap();
            assert!((v[[0, 0]] - (4.0 * t * t * t - 3.0 * t)).abs() < 1e-14);
        }
    }

    #[test]
    fn test_mapped_interval() {
        let interval = Interval::new(0.0, 4.0).unwrap();
        // T1 on [0, 4] is (x - 2) / 2
        let basis = ChebyshevBasis::new(array![[0.0], [1.0]], interval).unwrap();
        let v = basis.evaluate(&[0.0, 3.0, 6.0]).unwrap();
        assert_eq!(v[[0, 0]], -1.0);
        assert_eq!(v[[1, 0]], 0.5);
        // Extrapolated
        assert_eq!(v[[2, 0]], 2.0);
    }

    #[test]
    fn test_no_rows_rejected() {
        let err = ChebyshevBasis::new(Array2::zeros((0, 2)), Interval::unit()).unwrap_err();
        assert!(matches!(err, EvalError::InvalidFunction(_)));
    }

    #[test]
    fn test_empty_set_evaluates_to_no_columns() {
        let basis = ChebyshevBasis::empty(Interval::unit());
        assert_eq!(basis.rank(), 0);
        assert_eq!(basis.evaluate(&[0.1, 0.2]).unwrap().shape(), &[2, 0]);
    }

    #[test]
    fn test_interpolate_smooth_function() {
        let basis = ChebyshevBasis::interpolate(Interval::new(0.0, 2.0).unwrap(), 24, &[&f64::exp])
            .unwrap();
        let v = basis.evaluate(&[0.0, 0.7, 2.0]).unwrap();
        assert!((v[[0, 0]] - 1.0).abs() < 1e-13);
        assert!((v[[1, 0]] - 0.7_f64.exp()).abs() < 1e-13);
        assert!((v[[2, 0]] - 2.0_f64.exp()).abs() < 1e-12);
    }

    #[test]
    fn test_combine() {
        // {1, x} combined into {1 + x, 2x}
        let basis = ChebyshevBasis::new(array![[1.0, 0.0], [0.0, 1.0]], Interval::unit()).unwrap();
        let combined = basis.combine(&array![[1.0, 0.0], [1.0, 2.0]].view()).unwrap();
        let v = combined.evaluate(&[0.5]).unwrap();
        assert_eq!(v[[0, 0]], 1.5);
        assert_eq!(v[[0, 1]], 1.0);

        let err = basis.combine(&array![[1.0, 0.0, 0.0]].view()).unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_simplify_chops_trailing_rows() {
        let basis = ChebyshevBasis::new(
            array![[1.0, 2.0], [0.5, 0.0], [1e-20, 0.0], [0.0, -1e-18]],
            Interval::unit(),
        )
        .unwrap();
        let simplified = basis.simplify(f64::EPSILON);
        assert_eq!(simplified.degree(), 1);
        assert_eq!(simplified.rank(), 2);
    }

    #[test]
    fn test_simplify_keeps_one_row() {
        let zero = ChebyshevBasis::new(Array2::zeros((5, 1)), Interval::unit()).unwrap();
        assert_eq!(zero.simplify(1e-10).degree(), 0);
    }

    #[test]
    fn test_simplify_keeps_nan() {
        let basis =
            ChebyshevBasis::new(array![[1.0], [0.0], [f64::NAN]], Interval::unit()).unwrap();
        assert_eq!(basis.simplify(1e-10).degree(), 2);
    }
}
