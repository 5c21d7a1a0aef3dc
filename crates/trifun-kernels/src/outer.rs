//! Outer product operations for tensor construction
//!
//! For operands A (shape s₁), B (shape s₂), C (shape s₃) the outer product is
//! the tensor of shape s₁ ⧺ s₂ ⧺ s₃ with
//! `T[a, b, c] = A[a] × B[b] × C[c]` over multi-indices a, b, c.
//!
//! Operands are never broadcast against each other: the result shape is fixed
//! by concatenation and must stay within three modes.
//!
//! # SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.

use scirs2_core::ndarray_ext::{Array2, ArrayView1};
use scirs2_core::numeric::Num;
use trifun_core::{DenseND, TensorError, TensorResult};

/// Maximum number of modes an outer product may produce
pub const MAX_OUTER_RANK: usize = 3;

/// Compute the outer product of two vectors to form a matrix
///
/// For vectors u (length I) and v (length J), computes matrix M where
/// `M[i,j] = u[i] × v[j]`
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use trifun_kernels::outer_product_2;
///
/// let u = array![1.0, 2.0, 3.0];
/// let v = array![4.0, 5.0];
/// let m = outer_product_2(&u.view(), &v.view());
///
/// assert_eq!(m.shape(), &[3, 2]);
/// assert_eq!(m[[2, 1]], 15.0);
/// ```
pub fn outer_product_2<T>(u: &ArrayView1<T>, v: &ArrayView1<T>) -> Array2<T>
where
    T: Clone + Num,
{
    let mut result = Array2::<T>::zeros((u.len(), v.len()));

    for (row, u_val) in u.iter().enumerate() {
        for (col, v_val) in v.iter().enumerate() {
            result[[row, col]] = u_val.clone() * v_val.clone();
        }
    }

    result
}

/// Compute the outer product of up to three vectors, matrices or tensors
///
/// The result shape is the concatenation of the operand shapes in order, and
/// element values are products of one element from each operand.
///
/// # Errors
///
/// - [`TensorError::EmptyInput`] if no operand is given or an operand has no
///   elements
/// - [`TensorError::IncompatibleShapes`] if more than three operands are given
///   or the combined rank exceeds three
///
/// # Examples
///
/// ```
/// use trifun_core::DenseND;
/// use trifun_kernels::outer_product;
///
/// let x = DenseND::from_vec(vec![1.0, 2.0], &[2]).unwrap();
/// let ones = DenseND::<f64>::ones(&[3, 4]);
///
/// let tensor = outer_product(&[&x, &ones]).unwrap();
/// assert_eq!(tensor.shape(), &[2, 3, 4]);
/// assert_eq!(tensor[&[1, 2, 3][..]], 2.0);
/// ```
pub fn outer_product<T>(operands: &[&DenseND<T>]) -> TensorResult<DenseND<T>>
where
    T: Clone + Num,
{
    if operands.is_empty() {
        return Err(TensorError::empty_input("outer_product", "operands"));
    }
    if operands.len() > MAX_OUTER_RANK {
        return Err(TensorError::incompatible_shapes(
            "outer_product",
            vec![MAX_OUTER_RANK],
            vec![operands.len()],
            "at most three operands are supported",
        ));
    }

    let mut shape = Vec::with_capacity(MAX_OUTER_RANK);
    for (idx, op) in operands.iter().enumerate() {
        if op.is_empty() {
            return Err(TensorError::empty_input(
                "outer_product",
                format!("operand {}", idx),
            ));
        }
        shape.extend_from_slice(op.shape());
    }
    if shape.len() > MAX_OUTER_RANK {
        let shapes: Vec<usize> = operands.iter().map(|op| op.rank()).collect();
        return Err(TensorError::incompatible_shapes(
            "outer_product",
            shapes,
            shape,
            "combined rank exceeds three",
        ));
    }

    // Row-major order: the last operand varies fastest
    let mut data: Vec<T> = vec![T::one()];
    for op in operands {
        let values = op.to_vec();
        let mut next = Vec::with_capacity(data.len() * values.len());
        for lhs in &data {
            for rhs in &values {
                next.push(lhs.clone() * rhs.clone());
            }
        }
        data = next;
    }

    DenseND::from_vec(data, &shape)
}
