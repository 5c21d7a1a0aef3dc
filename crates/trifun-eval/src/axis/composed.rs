//! Axis functions composed with a parametrization
//!
//! Evaluating `ComposedAxis` at a parameter `t` evaluates the inner axis at
//! `x(t)`. The parametrization is supplied by the caller; this type only
//! applies it.

use super::AxisFunction;
use crate::domain::Interval;
use crate::error::{EvalError, EvalResult};
use scirs2_core::ndarray_ext::{Array2, ArrayView2};
use std::fmt;
use std::sync::Arc;
use trifun_core::Rank;

/// Shared scalar map `t ↦ x(t)`
pub type Parametrization = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// An axis function seen through a parametrization
#[derive(Clone)]
pub struct ComposedAxis<A> {
    inner: A,
    param: Parametrization,
    interval: Interval,
}

impl<A: AxisFunction> ComposedAxis<A> {
    /// Compose `inner` with `param`, defined for `t` in `interval`
    pub fn new(inner: A, param: Parametrization, interval: Interval) -> Self {
        Self {
            inner,
            param,
            interval,
        }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Parametrization applied before the inner axis
    pub fn parametrization(&self) -> &Parametrization {
        &self.param
    }
}

impl<A: fmt::Debug> fmt::Debug for ComposedAxis<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedAxis")
            .field("inner", &self.inner)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl<A: AxisFunction> AxisFunction for ComposedAxis<A> {
    fn rank(&self) -> Rank {
        self.inner.rank()
    }

    /// The parameter interval, not the inner axis interval
    fn interval(&self) -> Interval {
        self.interval
    }

    fn evaluate(&self, points: &[f64]) -> EvalResult<Array2<f64>> {
        let mapped: Vec<f64> = points.iter().map(|&t| (self.param)(t)).collect();
        let values = self.inner.evaluate(&mapped)?;
        if values.nrows() != points.len() {
            return Err(EvalError::Collaborator(format!(
                "inner axis returned {} rows for {} points",
                values.nrows(),
                points.len()
            )));
        }
        Ok(values)
    }

    fn combine(&self, weights: &ArrayView2<f64>) -> EvalResult<Self> {
        Ok(Self {
            inner: self.inner.combine(weights)?,
            param: Arc::clone(&self.param),
            interval: self.interval,
        })
    }

    fn simplify(&self, tol: f64) -> Self {
        Self {
            inner: self.inner.simplify(tol),
            param: Arc::clone(&self.param),
            interval: self.interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::ChebyshevBasis;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_composed_evaluates_through_param() {
        let x = ChebyshevBasis::coordinate(Interval::unit());
        let composed = ComposedAxis::new(x, Arc::new(|t: f64| t * t), Interval::new(0.0, 1.0).unwrap());

        let v = composed.evaluate(&[0.5, 0.9]).unwrap();
        assert!((v[[0, 0]] - 0.25).abs() < 1e-15);
        assert!((v[[1, 0]] - 0.81).abs() < 1e-15);
        assert_eq!(composed.interval().hi(), 1.0);
    }

    #[test]
    fn test_combine_keeps_param() {
        let basis = ChebyshevBasis::new(array![[1.0, 0.0], [0.0, 1.0]], Interval::unit()).unwrap();
        let composed = ComposedAxis::new(basis, Arc::new(|t: f64| -t), Interval::unit());
        let combined = composed.combine(&array![[0.0], [3.0]].view()).unwrap();
        let v = combined.evaluate(&[0.5]).unwrap();
        assert_eq!(v[[0, 0]], -1.5);
    }
}
