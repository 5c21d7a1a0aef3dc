//! # trifun-core
//!
//! Core tensor type and shape operations for trifun.
//!
//! - **Dense tensor representation** ([`DenseND`]) over scirs2_core's ndarray
//! - **Shape operations** (reshape, permute, swapaxes)
//! - **Matricization** (unfold/fold) with a fixed column convention that the
//!   mode products in `trifun-kernels` rely on
//! - **Structured errors** ([`TensorError`]) for every shape disagreement
//!
//! ## Matricization (Unfold/Fold)
//!
//! ```
//! use trifun_core::DenseND;
//!
//! let tensor = DenseND::<f64>::ones(&[2, 3, 4]);
//!
//! let unfolded = tensor.unfold(1).unwrap();
//! assert_eq!(unfolded.shape(), &[3, 8]);
//!
//! let folded = DenseND::fold(&unfolded, &[2, 3, 4], 1).unwrap();
//! assert!(folded == tensor);
//! ```
//!
//! ## Error Handling
//!
//! Operations return [`TensorResult`]; nothing is broadcast, truncated or
//! padded to make shapes fit.
//!
//! ```
//! use trifun_core::DenseND;
//!
//! let tensor = DenseND::<f64>::zeros(&[2, 3]);
//! assert!(tensor.reshape(&[7]).is_err());
//! assert!(tensor.unfold(10).is_err());
//! ```
//!
//! ## SciRS2 Integration
//!
//! All array storage goes through `scirs2_core::ndarray_ext`.

pub mod dense;
pub mod error;
pub mod types;

#[cfg(test)]
mod property_tests;

pub use error::{TensorError, TensorResult};
pub use types::{Axis, DenseND, Rank, Shape};
