//! Intervals and axis-aligned domain boxes

use crate::error::{EvalError, EvalResult};
use trifun_core::Axis;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed interval `[lo, hi]` with finite `lo < hi`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// Create a validated interval
    ///
    /// # Errors
    ///
    /// [`EvalError::InvalidDomain`] if an endpoint is not finite or
    /// `lo >= hi`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trifun_eval::Interval;
    ///
    /// let i = Interval::new(-1.0, 3.0).unwrap();
    /// assert_eq!(i.width(), 4.0);
    /// assert!(Interval::new(1.0, 1.0).is_err());
    /// ```
    pub fn new(lo: f64, hi: f64) -> EvalResult<Self> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(EvalError::InvalidDomain(format!(
                "interval endpoints must be finite, got [{}, {}]",
                lo, hi
            )));
        }
        if lo >= hi {
            return Err(EvalError::InvalidDomain(format!(
                "interval must satisfy lo < hi, got [{}, {}]",
                lo, hi
            )));
        }
        Ok(Self { lo, hi })
    }

    /// The reference interval `[-1, 1]`
    pub fn unit() -> Self {
        Self { lo: -1.0, hi: 1.0 }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// Affine map onto `[-1, 1]`; points outside the interval map outside
    /// the reference interval
    pub fn to_unit(&self, x: f64) -> f64 {
        (2.0 * x - (self.lo + self.hi)) / (self.hi - self.lo)
    }

    /// Inverse of [`Interval::to_unit`]
    pub fn from_unit(&self, t: f64) -> f64 {
        self.midpoint() + 0.5 * self.width() * t
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::unit()
    }
}

/// Axis-aligned box `[a,b] × [c,d] × [e,g]`
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Domain {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Domain {
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Build a domain from six endpoints `[a, b, c, d, e, g]`
    ///
    /// ```
    /// use trifun_eval::Domain;
    ///
    /// let d = Domain::from_bounds([0.0, 1.0, -2.0, 2.0, 0.0, 10.0]).unwrap();
    /// assert_eq!(d.y.width(), 4.0);
    /// assert!(Domain::from_bounds([0.0, 1.0, 2.0, 2.0, 0.0, 1.0]).is_err());
    /// ```
    pub fn from_bounds(bounds: [f64; 6]) -> EvalResult<Self> {
        Ok(Self {
            x: Interval::new(bounds[0], bounds[1])?,
            y: Interval::new(bounds[2], bounds[3])?,
            z: Interval::new(bounds[4], bounds[5])?,
        })
    }

    /// The cube `[lo, hi]³`
    pub fn cube(lo: f64, hi: f64) -> EvalResult<Self> {
        let edge = Interval::new(lo, hi)?;
        Ok(Self::new(edge, edge, edge))
    }

    /// Edge of the box along a mode (0 = x, 1 = y, 2 = z)
    pub fn edge(&self, mode: Axis) -> EvalResult<Interval> {
        match mode {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(EvalError::InvalidDomain(format!(
                "domain has three edges, requested mode {}",
                mode
            ))),
        }
    }

    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        self.x.contains(x) && self.y.contains(y) && self.z.contains(z)
    }
}
