//! # trifun-eval
//!
//! Evaluation of trivariate functions stored in Tucker form,
//! `f(x, y, z) = Σᵢⱼₖ core[i, j, k] · colsᵢ(x) · rowsⱼ(y) · tubesₖ(z)`.
//!
//! - **Function objects** ([`Fun3`], and the reduced [`Fun2`], [`Fun1`],
//!   [`CurveFun`])
//! - **Axis functions** ([`AxisFunction`] trait, [`ChebyshevBasis`],
//!   [`ComposedAxis`])
//! - **Dispatch** ([`evaluate`], [`EvalPlan`]): a closed decision table over
//!   the kinds of the three arguments
//! - **Grid detection** ([`grid`]): ndgrid and meshgrid layouts are
//!   evaluated with one axis evaluation per distinct coordinate
//!
//! ## Quick Start
//!
//! ```rust
//! use scirs2_core::ndarray_ext::array;
//! use trifun_core::DenseND;
//! use trifun_eval::grid::ndgrid;
//! use trifun_eval::{ChebyshevBasis, Domain, EvalArg, Fun3, Interval};
//!
//! // f(x, y, z) = x · y · z
//! let x = ChebyshevBasis::new(array![[0.0], [1.0]], Interval::unit()).unwrap();
//! let f = Fun3::new(x.clone(), x.clone(), x, DenseND::ones(&[1, 1, 1]), Domain::default()).unwrap();
//!
//! // Values on a 3 × 4 × 5 grid
//! let (gx, gy, gz) = ndgrid(&[-1.0, 0.0, 1.0], &[0.1, 0.2, 0.3, 0.4], &[0.5; 5]).unwrap();
//! let values = f.feval(gx, gy, gz).unwrap().into_values().unwrap();
//! assert_eq!(values.shape(), &[3, 4, 5]);
//!
//! // Fix x = 0.5 and keep a function of (y, z)
//! let g = f.feval(0.5, EvalArg::Whole, EvalArg::Whole).unwrap().into_surface().unwrap();
//! assert!((g.eval_point(0.2, 0.4).unwrap() - 0.04).abs() < 1e-15);
//! ```
//!
//! ## Configuration
//!
//! [`EvalConfig`] is passed to every evaluation. Grid checks are exact by
//! default; a nonzero `grid_tolerance` accepts near-grid inputs and logs a
//! warning.
//!
//! ## Features
//!
//! - `parallel` - pointwise evaluation on the rayon pool above
//!   [`EvalConfig::parallel_threshold`] samples
//! - `serde` - serialization of [`Interval`] and [`Domain`]

pub mod arg;
pub mod axis;
pub mod config;
pub mod curve;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fun1;
pub mod fun2;
pub mod fun3;
pub mod grid;

#[cfg(test)]
mod property_tests;

pub use arg::{ArgKind, EvalArg};
pub use axis::{AxisFunction, ChebyshevBasis, ComposedAxis, Parametrization};
pub use config::EvalConfig;
pub use curve::{Curve, CurveFun};
pub use domain::{Domain, Interval};
pub use engine::{evaluate, EvalPlan, Evaluation};
pub use error::{EvalError, EvalResult};
pub use fun1::Fun1;
pub use fun2::Fun2;
pub use fun3::Fun3;
pub use grid::{GridAxes, GridLayout};
