//! Restriction of a trivariate function to a parametrized curve

use crate::axis::{AxisFunction, ComposedAxis, Parametrization};
use crate::config::EvalConfig;
use crate::domain::Interval;
use crate::engine::contract_pointwise;
use crate::error::EvalResult;
use crate::fun3::Fun3;
use scirs2_core::ndarray_ext::Array1;
use std::fmt;
use std::sync::Arc;
use trifun_core::DenseND;

/// Curve `t ↦ (x(t), y(t), z(t))` on a parameter interval
#[derive(Clone)]
pub struct Curve {
    x: Parametrization,
    y: Parametrization,
    z: Parametrization,
    interval: Interval,
}

impl Curve {
    /// Build a curve from three coordinate maps
    ///
    /// ```
    /// use trifun_eval::{Curve, Interval};
    ///
    /// let helix = Curve::new(Interval::new(0.0, 1.0).unwrap(), f64::cos, f64::sin, |t| t);
    /// let p = helix.point(0.0);
    /// assert_eq!(p, [1.0, 0.0, 0.0]);
    /// ```
    pub fn new<FX, FY, FZ>(interval: Interval, x: FX, y: FY, z: FZ) -> Self
    where
        FX: Fn(f64) -> f64 + Send + Sync + 'static,
        FY: Fn(f64) -> f64 + Send + Sync + 'static,
        FZ: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            x: Arc::new(x),
            y: Arc::new(y),
            z: Arc::new(z),
            interval,
        }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn point(&self, t: f64) -> [f64; 3] {
        [(self.x)(t), (self.y)(t), (self.z)(t)]
    }

    fn component(&self, mode: usize) -> Parametrization {
        match mode {
            0 => Arc::clone(&self.x),
            1 => Arc::clone(&self.y),
            _ => Arc::clone(&self.z),
        }
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

/// `t ↦ f(x(t), y(t), z(t))`, sharing the parent's core
#[derive(Clone, Debug)]
pub struct CurveFun<A> {
    axes: [ComposedAxis<A>; 3],
    core: DenseND<f64>,
    interval: Interval,
}

impl<A: AxisFunction> CurveFun<A> {
    pub fn new(f: &Fun3<A>, curve: &Curve) -> Self {
        let [cols, rows, tubes] = f.axes();
        let compose = |axis: &A, mode| ComposedAxis::new(axis.clone(), curve.component(mode), curve.interval());
        Self {
            axes: [compose(cols, 0), compose(rows, 1), compose(tubes, 2)],
            core: f.core().clone(),
            interval: curve.interval(),
        }
    }

    /// Parameter interval
    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn axes(&self) -> &[ComposedAxis<A>; 3] {
        &self.axes
    }

    /// Evaluate at parameter values
    pub fn evaluate(&self, ts: &[f64]) -> EvalResult<Array1<f64>> {
        self.evaluate_with(ts, &EvalConfig::default())
    }

    pub fn evaluate_with(&self, ts: &[f64], config: &EvalConfig) -> EvalResult<Array1<f64>> {
        let [a, b, c] = &self.axes;
        contract_pointwise(&self.core, [a, b, c], [ts, ts, ts], config)
    }

    pub fn eval_point(&self, t: f64) -> EvalResult<f64> {
        Ok(self.evaluate(&[t])?[0])
    }
}
