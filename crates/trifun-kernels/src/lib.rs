//! # trifun-kernels
//!
//! Tensor algebra kernels behind trivariate Tucker evaluation.
//!
//! - **Mode products** ([`nmode_product`], [`txm`], [`nmode_products_seq`]):
//!   tensor times matrix along one mode, built on the unfold/fold pair of
//!   `trifun-core`
//! - **Trilinear forms** ([`trilinear_rows`]): one scalar per sample from a
//!   core tensor and three rows of axis values
//! - **Outer products** ([`outer_product`], [`outer_product_2`]) with a strict
//!   no-broadcast contract
//!
//! ## Quick Start
//!
//! ```rust
//! use scirs2_core::ndarray_ext::Array2;
//! use trifun_core::DenseND;
//! use trifun_kernels::{outer_product, txm};
//!
//! let core = DenseND::<f64>::ones(&[2, 3, 4]);
//! let values = Array2::<f64>::ones((10, 2));
//! let result = txm(&core, &values.view(), 0).unwrap();
//! assert_eq!(result.shape(), &[10, 3, 4]);
//!
//! let x = DenseND::from_vec(vec![1.0, 2.0], &[2]).unwrap();
//! let grid = outer_product(&[&x, &DenseND::ones(&[3]), &DenseND::ones(&[4])]).unwrap();
//! assert_eq!(grid.shape(), &[2, 3, 4]);
//! ```
//!
//! ## Contraction order
//!
//! Three-mode contractions are always applied mode 0, then 1, then 2. Code
//! that needs another order (meshgrid layouts) permutes a copy of the core
//! tensor instead of reordering the products.
//!
//! ## Features
//!
//! - `parallel` - rayon-backed [`trilinear_rows_parallel`]

pub mod nmode;
pub mod outer;


// Re-exports
pub use nmode::*;
pub use outer::*;
