//! N-mode product implementation (TTM - Tensor Times Matrix)
//!
//! The N-mode product multiplies a tensor by a matrix along a specific mode.
//! For tensor X ∈ ℝ^(I₁×...×Iₙ) and matrix M ∈ ℝ^(J×Iₖ), the result
//! Y = X ×ₖ M has shape (I₁×...×Iₖ₋₁×J×Iₖ₊₁×...×Iₙ).
//!
//! Evaluating a Tucker-form trivariate function is a chain of three such
//! products, always applied in the order mode 0, mode 1, mode 2. Callers that
//! need a different order permute a copy of the core first.
//!
//! # SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.

use scirs2_core::ndarray_ext::{Array1, Array2, ArrayView1, ArrayView2};
use scirs2_core::numeric::Num;
use trifun_core::{DenseND, TensorError, TensorResult};

/// Compute the N-mode product (tensor times matrix) of a tensor and a matrix
///
/// For tensor X with shape (I₁, I₂, ..., Iₙ) and matrix M with shape (J, Iₖ),
/// computes Y = X ×ₖ M with shape (I₁, ..., Iₖ₋₁, J, Iₖ₊₁, ..., Iₙ).
///
/// # Algorithm
///
/// 1. Unfold tensor X along mode k to get matrix X_(k) of shape (Iₖ, ∏ᵢ≠ₖ Iᵢ)
/// 2. Compute Y_(k) = M · X_(k) with shape (J, ∏ᵢ≠ₖ Iᵢ)
/// 3. Fold Y_(k) back to tensor Y with the new shape
///
/// Unfold and fold are the ones on [`DenseND`], so the column convention is
/// shared with every other matricization in the workspace.
///
/// # Errors
///
/// Returns error if:
/// - Mode is out of bounds ([`TensorError::InvalidMode`])
/// - Matrix columns don't match tensor mode size ([`TensorError::DimensionMismatch`])
///
/// # Complexity
///
/// Time: O(J * total_elements)
/// Space: O(J * ∏ᵢ≠ₖ Iᵢ)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use trifun_core::DenseND;
/// use trifun_kernels::nmode_product;
///
/// let tensor = DenseND::from_vec((0..24).map(|x| x as f64).collect(), &[2, 3, 4]).unwrap();
///
/// // Matrix: 5×3 (will replace mode-1 dimension)
/// let matrix = array![[1.0, 0.0, 0.0],
///                      [0.0, 1.0, 0.0],
///                      [0.0, 0.0, 1.0],
///                      [1.0, 1.0, 0.0],
///                      [0.0, 1.0, 1.0]];
///
/// let result = nmode_product(&tensor, &matrix.view(), 1).unwrap();
/// assert_eq!(result.shape(), &[2, 5, 4]);
/// ```
pub fn nmode_product<T>(
    tensor: &DenseND<T>,
    matrix: &ArrayView2<T>,
    mode: usize,
) -> TensorResult<DenseND<T>>
where
    T: Clone + Num,
{
    let tensor_shape = tensor.shape();
    let rank = tensor_shape.len();

    if mode >= rank {
        return Err(TensorError::invalid_mode(mode, rank, "nmode_product"));
    }

    let mode_size = tensor_shape[mode];
    let (matrix_rows, matrix_cols) = matrix.dim();

    if matrix_cols != mode_size {
        return Err(TensorError::dimension_mismatch(
            "nmode_product",
            vec![matrix_rows, mode_size],
            vec![matrix_rows, matrix_cols],
            format!(
                "Matrix columns ({}) must match tensor mode-{} size ({})",
                matrix_cols, mode, mode_size
            ),
        ));
    }

    let unfolded = tensor.unfold(mode)?;
    let result_unfolded = matmul(matrix, &unfolded.view());

    let mut new_shape = tensor.shape_vec();
    new_shape[mode] = matrix_rows;

    DenseND::fold(&result_unfolded, &new_shape, mode)
}

/// Contract a 3-way tensor with a matrix along one mode
///
/// Same as [`nmode_product`] but restricted to rank-3 tensors, which is the
/// only shape a trivariate core tensor can have. The mode's dimension becomes
/// the matrix row count.
///
/// # Errors
///
/// [`TensorError::DimensionMismatch`] if the tensor is not rank 3 or the matrix
/// column count differs from the tensor's size along `mode`. There is no
/// implicit broadcasting.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array2;
/// use trifun_core::DenseND;
/// use trifun_kernels::txm;
///
/// let core = DenseND::<f64>::ones(&[2, 3, 4]);
/// let values = Array2::<f64>::ones((7, 4));
/// let result = txm(&core, &values.view(), 2).unwrap();
/// assert_eq!(result.shape(), &[2, 3, 7]);
///
/// let wrong = Array2::<f64>::ones((7, 5));
/// assert!(txm(&core, &wrong.view(), 2).is_err());
/// ```
pub fn txm<T>(tensor: &DenseND<T>, matrix: &ArrayView2<T>, mode: usize) -> TensorResult<DenseND<T>>
where
    T: Clone + Num,
{
    if tensor.rank() != 3 {
        return Err(TensorError::dimension_mismatch(
            "txm",
            vec![3],
            vec![tensor.rank()],
            format!("expected a 3-way tensor, got shape {:?}", tensor.shape()),
        ));
    }
    nmode_product(tensor, matrix, mode)
}

/// Compute multiple N-mode products sequentially
///
/// Applies matrices to a tensor along the given modes, in the order given.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use trifun_core::DenseND;
/// use trifun_kernels::nmode_products_seq;
///
/// let tensor = DenseND::from_vec((0..24).map(|x| x as f64).collect(), &[2, 3, 4]).unwrap();
///
/// let m1 = array![[1.0, 0.0], [0.0, 1.0]];  // 2×2
/// let m2 = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];  // 2×3
///
/// let result = nmode_products_seq(&tensor, &[(&m1.view(), 0), (&m2.view(), 1)]).unwrap();
/// assert_eq!(result.shape(), &[2, 2, 4]);
/// ```
pub fn nmode_products_seq<T>(
    tensor: &DenseND<T>,
    matrices: &[(&ArrayView2<T>, usize)],
) -> TensorResult<DenseND<T>>
where
    T: Clone + Num,
{
    let mut result = tensor.clone();

    for (matrix, mode) in matrices {
        result = nmode_product(&result, matrix, *mode)?;
    }

    Ok(result)
}

/// Evaluate one trilinear form per row of three factor matrices
///
/// For a core G of shape (r₁, r₂, r₃) and matrices A (N×r₁), B (N×r₂),
/// C (N×r₃), returns the length-N vector
///
/// `out[p] = Σᵢⱼₖ G[i,j,k] · A[p,i] · B[p,j] · C[p,k]`
///
/// Each row is computed as three sequential mode contractions: mode 0 against
/// `A[p,:]`, then mode 1 against `B[p,:]`, then mode 2 against `C[p,:]`.
/// The mode-0 unfolding of the core is computed once and shared by all rows.
///
/// # Errors
///
/// [`TensorError::DimensionMismatch`] if the core is not rank 3, the row counts
/// differ, or any column count differs from the matching core dimension.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use trifun_core::DenseND;
/// use trifun_kernels::trilinear_rows;
///
/// let core = DenseND::from_elem(&[1, 1, 1], 5.0);
/// let ones = array![[1.0], [1.0]];
/// let values = trilinear_rows(&core, &ones.view(), &ones.view(), &ones.view()).unwrap();
/// assert_eq!(values.to_vec(), vec![5.0, 5.0]);
/// ```
pub fn trilinear_rows<T>(
    core: &DenseND<T>,
    a: &ArrayView2<T>,
    b: &ArrayView2<T>,
    c: &ArrayView2<T>,
) -> TensorResult<Array1<T>>
where
    T: Clone + Num,
{
    let (n, r2, r3) = check_trilinear_operands(core, a, b, c)?;
    let unfolded = core.unfold(0)?;

    let values: Vec<T> = (0..n)
        .map(|p| contract_row(&unfolded, r2, r3, &a.row(p), &b.row(p), &c.row(p)))
        .collect();

    Ok(Array1::from_vec(values))
}

/// Parallel version of [`trilinear_rows`]
///
/// Rows are independent, so they are distributed over the rayon pool. Each
/// row still contracts modes 0, 1, 2 in that order, so the result is
/// identical to the serial version.
#[cfg(feature = "parallel")]
pub fn trilinear_rows_parallel<T>(
    core: &DenseND<T>,
    a: &ArrayView2<T>,
    b: &ArrayView2<T>,
    c: &ArrayView2<T>,
) -> TensorResult<Array1<T>>
where
    T: Clone + Num + Send + Sync,
{
    use scirs2_core::parallel_ops::*;

    let (n, r2, r3) = check_trilinear_operands(core, a, b, c)?;
    let unfolded = core.unfold(0)?;

    let values: Vec<T> = (0..n)
        .into_par_iter()
        .map(|p| contract_row(&unfolded, r2, r3, &a.row(p), &b.row(p), &c.row(p)))
        .collect();

    Ok(Array1::from_vec(values))
}

/// Validate operands of a trilinear evaluation, returning (N, r₂, r₃)
fn check_trilinear_operands<T>(
    core: &DenseND<T>,
    a: &ArrayView2<T>,
    b: &ArrayView2<T>,
    c: &ArrayView2<T>,
) -> TensorResult<(usize, usize, usize)>
where
    T: Clone + Num,
{
    if core.rank() != 3 {
        return Err(TensorError::dimension_mismatch(
            "trilinear_rows",
            vec![3],
            vec![core.rank()],
            "core must be a 3-way tensor",
        ));
    }
    let dims = core.shape();
    let n = a.nrows();

    for (mode, m) in [a, b, c].into_iter().enumerate() {
        if m.nrows() != n {
            return Err(TensorError::dimension_mismatch(
                "trilinear_rows",
                vec![n],
                vec![m.nrows()],
                format!("factor for mode {} has a different number of rows", mode),
            ));
        }
        if m.ncols() != dims[mode] {
            return Err(TensorError::dimension_mismatch(
                "trilinear_rows",
                vec![n, dims[mode]],
                vec![m.nrows(), m.ncols()],
                format!(
                    "factor columns must match core mode-{} size ({})",
                    mode, dims[mode]
                ),
            ));
        }
    }

    Ok((n, dims[1], dims[2]))
}

/// Contract the mode-0 unfolding of a core against one row per mode
fn contract_row<T>(
    unfolded: &Array2<T>,
    r2: usize,
    r3: usize,
    a: &ArrayView1<T>,
    b: &ArrayView1<T>,
    c: &ArrayView1<T>,
) -> T
where
    T: Clone + Num,
{
    // Mode 0: w[j * r3 + k] = Σᵢ a[i] G[i, j, k]
    let mut w = vec![T::zero(); r2 * r3];
    for (i, a_val) in a.iter().enumerate() {
        for (q, w_val) in w.iter_mut().enumerate() {
            *w_val = w_val.clone() + a_val.clone() * unfolded[[i, q]].clone();
        }
    }

    // Mode 1: v[k] = Σⱼ b[j] w[j, k]
    let mut v = vec![T::zero(); r3];
    for (j, b_val) in b.iter().enumerate() {
        for (k, v_val) in v.iter_mut().enumerate() {
            *v_val = v_val.clone() + b_val.clone() * w[j * r3 + k].clone();
        }
    }

    // Mode 2
    c.iter()
        .zip(v)
        .fold(T::zero(), |acc, (c_val, v_val)| acc + c_val.clone() * v_val)
}

/// Dense matrix product `M · X` with plain loops
fn matmul<T>(m: &ArrayView2<T>, x: &ArrayView2<T>) -> Array2<T>
where
    T: Clone + Num,
{
    let (rows, inner) = m.dim();
    let cols = x.ncols();
    let mut result = Array2::<T>::zeros((rows, cols));
    for i in 0..rows {
        for k in 0..inner {
            let m_ik = m[[i, k]].clone();
            for j in 0..cols {
                result[[i, j]] = result[[i, j]].clone() + m_ik.clone() * x[[k, j]].clone();
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    fn iota(shape: &[usize]) -> DenseND<f64> {
        let n: usize = shape.iter().product();
        DenseND::from_vec((0..n).map(|x| x as f64).collect(), shape).unwrap()
    }

    #[test]
    fn test_nmode_product_3d() {
        let tensor = iota(&[2, 3, 4]);
        let matrix = array![
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 1.0]
        ];

        let result = nmode_product(&tensor, &matrix.view(), 1).unwrap();
        assert_eq!(result.shape(), &[2, 5, 4]);
        // Row 3 of the matrix sums slices j=0 and j=1
        assert_eq!(
            result[&[1, 3, 2][..]],
            tensor[&[1, 0, 2][..]] + tensor[&[1, 1, 2][..]]
        );
    }

    #[test]
    fn test_nmode_product_identity() {
        let tensor = iota(&[2, 3, 4]);
        let identity = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

        let result = nmode_product(&tensor, &identity.view(), 1).unwrap();
        assert!(result == tensor);
    }

    #[test]
    fn test_nmode_product_mode0() {
        let tensor = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let matrix = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

        let result = nmode_product(&tensor, &matrix.view(), 0).unwrap();
        assert_eq!(result.shape(), &[3, 3]);

        assert_eq!(result[&[0, 0][..]], 1.0);
        assert_eq!(result[&[1, 1][..]], 5.0);
        // Third row: [1,2,3] + [4,5,6]
        assert_eq!(result[&[2, 0][..]], 5.0);
        assert_eq!(result[&[2, 1][..]], 7.0);
        assert_eq!(result[&[2, 2][..]], 9.0);
    }

    #[test]
    fn test_nmode_products_seq() {
        let tensor = iota(&[2, 3, 4]);
        let m1 = array![[1.0, 0.0], [0.0, 1.0]];
        let m2 = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

        let result = nmode_products_seq(&tensor, &[(&m1.view(), 0), (&m2.view(), 1)]).unwrap();
        assert_eq!(result.shape(), &[2, 2, 4]);
    }

    #[test]
    fn test_nmode_product_invalid_mode() {
        let tensor = DenseND::from_vec(vec![1.0; 6], &[2, 3]).unwrap();
        let matrix = array![[1.0, 0.0]];
        let err = nmode_product(&tensor, &matrix.view(), 5).unwrap_err();
        assert!(matches!(err, TensorError::InvalidMode { mode: 5, .. }));
    }

    #[test]
    fn test_nmode_product_size_mismatch() {
        let tensor = DenseND::from_vec(vec![1.0; 6], &[2, 3]).unwrap();
        let matrix = array![[1.0, 0.0]]; // 1×2, but mode-1 has size 3
        let err = nmode_product(&tensor, &matrix.view(), 1).unwrap_err();
        assert!(err.is_shape_error());
        assert!(format!("{}", err).contains("Matrix columns"));
    }

    #[test]
    fn test_txm_requires_rank3() {
        let tensor = DenseND::<f64>::ones(&[2, 3]);
        let matrix = Array2::<f64>::ones((1, 2));
        assert!(txm(&tensor, &matrix.view(), 0).unwrap_err().is_shape_error());
    }

    #[test]
    fn test_txm_never_pads() {
        let core = DenseND::<f64>::ones(&[2, 2, 2]);
        let narrow = Array2::<f64>::ones((4, 1));
        let wide = Array2::<f64>::ones((4, 3));
        for mode in 0..3 {
            assert!(txm(&core, &narrow.view(), mode).unwrap_err().is_shape_error());
            assert!(txm(&core, &wide.view(), mode).unwrap_err().is_shape_error());
        }
    }

    #[test]
    fn test_trilinear_rows_matches_txm_chain() {
        let core = iota(&[2, 3, 2]);
        let a = array![[1.0, 0.5], [-1.0, 2.0]];
        let b = array![[0.0, 1.0, 2.0], [1.0, 1.0, -1.0]];
        let c = array![[3.0, -1.0], [0.25, 0.75]];

        let rows = trilinear_rows(&core, &a.view(), &b.view(), &c.view()).unwrap();

        for p in 0..2 {
            let ap = a.slice(scirs2_core::ndarray_ext::s![p..p + 1, ..]);
            let bp = b.slice(scirs2_core::ndarray_ext::s![p..p + 1, ..]);
            let cp = c.slice(scirs2_core::ndarray_ext::s![p..p + 1, ..]);
            let chained = nmode_products_seq(&core, &[(&ap, 0), (&bp, 1), (&cp, 2)]).unwrap();
            assert!((chained[&[0, 0, 0][..]] - rows[p]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_trilinear_rows_row_count_mismatch() {
        let core = DenseND::<f64>::ones(&[1, 1, 1]);
        let two = Array2::<f64>::ones((2, 1));
        let three = Array2::<f64>::ones((3, 1));
        let err = trilinear_rows(&core, &two.view(), &three.view(), &two.view()).unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_trilinear_rows_empty_sample_set() {
        let core = DenseND::<f64>::ones(&[2, 2, 2]);
        let empty = Array2::<f64>::zeros((0, 2));
        let out = trilinear_rows(&core, &empty.view(), &empty.view(), &empty.view()).unwrap();
        assert_eq!(out.len(), 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_trilinear_rows_parallel_matches_serial() {
        let core = iota(&[2, 3, 2]);
        let a = Array2::from_shape_fn((50, 2), |(i, j)| (i + j) as f64 * 0.1);
        let b = Array2::from_shape_fn((50, 3), |(i, j)| (i * j) as f64 * 0.01);
        let c = Array2::from_shape_fn((50, 2), |(i, j)| 1.0 - (i + 2 * j) as f64 * 0.02);

        let serial = trilinear_rows(&core, &a.view(), &b.view(), &c.view()).unwrap();
        let parallel = trilinear_rows_parallel(&core, &a.view(), &b.view(), &c.view()).unwrap();
        assert_eq!(serial, parallel);
    }
}
