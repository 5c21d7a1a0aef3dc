//! Trivariate functions in Tucker form
//!
//! `f(x, y, z) = Σᵢⱼₖ core[i, j, k] · colsᵢ(x) · rowsⱼ(y) · tubesₖ(z)`
//!
//! The function object is immutable. Evaluation never changes the stored
//! core; layouts that need a different mode order work on a copy.

use crate::arg::EvalArg;
use crate::axis::AxisFunction;
use crate::config::EvalConfig;
use crate::curve::{Curve, CurveFun};
use crate::domain::Domain;
use crate::engine::{evaluate, Evaluation};
use crate::error::{EvalError, EvalResult};
use trifun_core::{Axis, DenseND, Rank};

/// A trivariate function: three axis function sets and a dense core
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use trifun_core::DenseND;
/// use trifun_eval::{ChebyshevBasis, Domain, Fun3, Interval};
///
/// // f(x, y, z) = x + y + z on [-1, 1]³
/// let basis = ChebyshevBasis::new(array![[1.0, 0.0], [0.0, 1.0]], Interval::unit()).unwrap();
/// let mut core = DenseND::<f64>::zeros(&[2, 2, 2]);
/// core[&[1, 0, 0][..]] = 1.0;
/// core[&[0, 1, 0][..]] = 1.0;
/// core[&[0, 0, 1][..]] = 1.0;
///
/// let f = Fun3::new(basis.clone(), basis.clone(), basis, core, Domain::default()).unwrap();
/// let v = f.eval_point(0.25, 0.5, -0.125).unwrap();
/// assert!((v - 0.625).abs() < 1e-15);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Fun3<A> {
    cols: A,
    rows: A,
    tubes: A,
    core: DenseND<f64>,
    domain: Domain,
}

impl<A: AxisFunction> Fun3<A> {
    /// Assemble a function object
    ///
    /// # Errors
    ///
    /// [`EvalError::InvalidFunction`] if the core is not 3-way, its
    /// dimensions differ from the axis ranks, or an axis interval differs
    /// from the matching domain edge.
    pub fn new(cols: A, rows: A, tubes: A, core: DenseND<f64>, domain: Domain) -> EvalResult<Self> {
        if core.rank() != 3 {
            return Err(EvalError::InvalidFunction(format!(
                "core must be a 3-way tensor, got shape {:?}",
                core.shape()
            )));
        }
        let ranks = [cols.rank(), rows.rank(), tubes.rank()];
        if core.shape() != &ranks[..] {
            return Err(EvalError::InvalidFunction(format!(
                "core shape {:?} differs from axis ranks {:?}",
                core.shape(),
                ranks
            )));
        }
        for (mode, axis) in [&cols, &rows, &tubes].into_iter().enumerate() {
            let edge = domain.edge(mode)?;
            if axis.interval() != edge {
                return Err(EvalError::InvalidFunction(format!(
                    "axis {} is defined on {:?}, domain edge is {:?}",
                    mode,
                    axis.interval(),
                    edge
                )));
            }
        }

        Ok(Self {
            cols,
            rows,
            tubes,
            core,
            domain,
        })
    }

    pub fn cols(&self) -> &A {
        &self.cols
    }

    pub fn rows(&self) -> &A {
        &self.rows
    }

    pub fn tubes(&self) -> &A {
        &self.tubes
    }

    /// Axis function sets in mode order (x, y, z)
    pub fn axes(&self) -> [&A; 3] {
        [&self.cols, &self.rows, &self.tubes]
    }

    pub fn axis(&self, mode: Axis) -> Option<&A> {
        self.axes().get(mode).copied()
    }

    pub fn core(&self) -> &DenseND<f64> {
        &self.core
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Multilinear rank `(r1, r2, r3)`
    pub fn rank(&self) -> [Rank; 3] {
        [self.cols.rank(), self.rows.rank(), self.tubes.rank()]
    }

    /// A function whose core has no elements
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// Evaluate with the default configuration
    ///
    /// Each argument is a scalar, vector, matrix or 3-way array, or
    /// [`EvalArg::Whole`] to leave that coordinate free.
    pub fn feval(
        &self,
        x: impl Into<EvalArg>,
        y: impl Into<EvalArg>,
        z: impl Into<EvalArg>,
    ) -> EvalResult<Evaluation<A>> {
        self.feval_with(x, y, z, &EvalConfig::default())
    }

    pub fn feval_with(
        &self,
        x: impl Into<EvalArg>,
        y: impl Into<EvalArg>,
        z: impl Into<EvalArg>,
        config: &EvalConfig,
    ) -> EvalResult<Evaluation<A>> {
        evaluate(self, &x.into(), &y.into(), &z.into(), config)
    }

    /// Value at a single point
    ///
    /// # Errors
    ///
    /// [`EvalError::InvalidFunction`] for an empty function, which has no
    /// point values.
    pub fn eval_point(&self, x: f64, y: f64, z: f64) -> EvalResult<f64> {
        self.feval(x, y, z)?
            .scalar()
            .ok_or_else(|| EvalError::InvalidFunction("empty function has no point values".into()))
    }

    /// Restrict the function to a curve, `t ↦ f(x(t), y(t), z(t))`
    pub fn compose(&self, curve: &Curve) -> CurveFun<A> {
        CurveFun::new(self, curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::ChebyshevBasis;
    use crate::domain::Interval;

    fn constant_fun(value: f64) -> Fun3<ChebyshevBasis> {
        let one = ChebyshevBasis::constant(1.0, Interval::unit());
        Fun3::new(
            one.clone(),
            one.clone(),
            one,
            DenseND::from_elem(&[1, 1, 1], value),
            Domain::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let f = constant_fun(5.0);
        assert_eq!(f.rank(), [1, 1, 1]);
        assert!(!f.is_empty());
        assert_eq!(f.axis(2), Some(f.tubes()));
        assert!(f.axis(3).is_none());
        assert_eq!(f.eval_point(0.3, -0.2, 0.9).unwrap(), 5.0);
    }

    #[test]
    fn test_core_rank_mismatch() {
        let one = ChebyshevBasis::constant(1.0, Interval::unit());
        let err = Fun3::new(
            one.clone(),
            one.clone(),
            one,
            DenseND::zeros(&[1, 2, 1]),
            Domain::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EvalError::InvalidFunction(_)));
    }

    #[test]
    fn test_core_must_be_three_way() {
        let one = ChebyshevBasis::constant(1.0, Interval::unit());
        let err = Fun3::new(one.clone(), one.clone(), one, DenseND::zeros(&[1, 1]), Domain::default())
            .unwrap_err();
        assert!(matches!(err, EvalError::InvalidFunction(_)));
    }

    #[test]
    fn test_interval_must_match_domain() {
        let one = ChebyshevBasis::constant(1.0, Interval::unit());
        let shifted = ChebyshevBasis::constant(1.0, Interval::new(0.0, 1.0).unwrap());
        let err = Fun3::new(
            one.clone(),
            shifted,
            one,
            DenseND::ones(&[1, 1, 1]),
            Domain::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("axis 1"));
    }

    #[test]
    fn test_empty_function() {
        let none = ChebyshevBasis::empty(Interval::unit());
        let f = Fun3::new(
            none.clone(),
            none.clone(),
            none,
            DenseND::zeros(&[0, 0, 0]),
            Domain::default(),
        )
        .unwrap();
        assert!(f.is_empty());
        assert!(f.eval_point(0.0, 0.0, 0.0).is_err());
    }
}
