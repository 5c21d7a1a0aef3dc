//! # trifun - Trivariate Functions in Tucker Form
//!
//! A smooth function `f(x, y, z)` stored as three sets of univariate axis
//! functions contracted with a small dense core tensor, with an evaluation
//! engine that recognizes ndgrid and meshgrid sampling layouts.
//!
//! This is the **meta crate** that re-exports all trifun components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use trifun::prelude::*;
//! use scirs2_core::ndarray_ext::array;
//!
//! // f(x, y, z) = x + y + z on [-1, 1]³
//! let basis = ChebyshevBasis::new(array![[1.0, 0.0], [0.0, 1.0]], Interval::unit())?;
//! let mut core = DenseND::<f64>::zeros(&[2, 2, 2]);
//! core[&[1, 0, 0][..]] = 1.0;
//! core[&[0, 1, 0][..]] = 1.0;
//! core[&[0, 0, 1][..]] = 1.0;
//! let f = Fun3::new(basis.clone(), basis.clone(), basis, core, Domain::default())?;
//!
//! let (x, y, z) = ndgrid(&[-1.0, 0.0, 1.0], &[0.5, 1.0], &[0.0, 0.25])?;
//! let values = f.feval(x, y, z)?.into_values().unwrap();
//! assert_eq!(values.shape(), &[3, 2, 2]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Core Tensor Operations ([`core`])
//!
//! Dense tensor type, reshape/permute, unfold/fold.
//!
//! ```
//! use trifun::core::DenseND;
//!
//! let tensor = DenseND::<f64>::ones(&[2, 3, 4]);
//! let swapped = tensor.swapaxes(0, 1).unwrap();
//! assert_eq!(swapped.shape(), &[3, 2, 4]);
//! ```
//!
//! ### Tensor Kernels ([`kernels`])
//!
//! Mode products, per-sample trilinear forms, outer products.
//!
//! ```
//! use trifun::core::DenseND;
//! use trifun::kernels::txm;
//! use scirs2_core::ndarray_ext::Array2;
//!
//! let core = DenseND::<f64>::ones(&[2, 2, 2]);
//! let values = Array2::<f64>::ones((5, 2));
//! assert_eq!(txm(&core, &values.view(), 1).unwrap().shape(), &[2, 5, 2]);
//! ```
//!
//! ### Evaluation ([`eval`])
//!
//! Function objects, axis functions, grid detection and the evaluation
//! dispatch. Fixing coordinates with [`EvalArg::Whole`](eval::EvalArg)
//! returns reduced functions.
//!
//! ```
//! use trifun::eval::{ChebyshevBasis, Domain, EvalArg, Fun3, Interval};
//! use trifun::core::DenseND;
//!
//! let one = ChebyshevBasis::constant(1.0, Interval::unit());
//! let f = Fun3::new(one.clone(), one.clone(), one, DenseND::from_elem(&[1, 1, 1], 5.0), Domain::default())
//!     .unwrap();
//! let g = f.feval(0.3, EvalArg::Whole, EvalArg::Whole).unwrap().into_surface().unwrap();
//! assert_eq!(g.eval_point(-0.1, 0.9).unwrap(), 5.0);
//! ```
//!
//! ## Features
//!
//! - `parallel`: pointwise evaluation on the rayon pool
//! - `serde`: serialization of domains and intervals
//! - `full`: Enable all features

// Re-export all components
pub use trifun_core as core;
pub use trifun_eval as eval;
pub use trifun_kernels as kernels;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use trifun::prelude::*;
    //!
    //! let domain = Domain::cube(0.0, 1.0).unwrap();
    //! let config = EvalConfig::default().with_grid_detection(false);
    //! assert!(!config.detect_grids);
    //! assert_eq!(domain.z.hi(), 1.0);
    //! ```

    // Core types
    pub use crate::core::{DenseND, TensorError};

    // Kernels
    pub use crate::kernels::{nmode_product, outer_product, trilinear_rows, txm};

    // Evaluation
    pub use crate::eval::grid::{meshgrid, ndgrid, GridLayout};
    pub use crate::eval::{
        evaluate, AxisFunction, ChebyshevBasis, Curve, Domain, EvalArg, EvalConfig, EvalError,
        Evaluation, Fun1, Fun2, Fun3, Interval,
    };
}
