//! Core type definitions shared across the trifun crates.

use smallvec::SmallVec;

pub use crate::dense::DenseND;

/// Tensor axis (mode) index, zero-based.
///
/// ```
/// use trifun_core::{Axis, DenseND};
///
/// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
/// let mode: Axis = 1;
/// assert_eq!(tensor.unfold(mode).unwrap().shape(), &[3, 8]);
/// ```
pub type Axis = usize;

/// Number of dimensions of a tensor.
pub type Rank = usize;

/// Shape type using SmallVec to avoid heap allocation for common cases.
///
/// Coordinate arrays and core tensors in trifun have at most three
/// dimensions, so shapes never spill to the heap in practice.
pub type Shape = SmallVec<[usize; 6]>;
