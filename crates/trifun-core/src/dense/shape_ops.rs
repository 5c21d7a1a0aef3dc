//! Shape manipulation operations on tensors
//!
//! Reshape, permute and unfold/fold (matricization/tensorization). All of
//! them return new tensors; the receiver is never modified, so callers can
//! permute a stored core tensor without touching the original.

use super::types::DenseND;
use crate::error::{TensorError, TensorResult};
use scirs2_core::ndarray_ext::{Array2, IxDyn};
use scirs2_core::numeric::Num;

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Reshape the tensor to a new shape
    ///
    /// Elements are taken in logical row-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// use trifun_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let reshaped = tensor.reshape(&[6, 4]).unwrap();
    /// assert_eq!(reshaped.shape(), &[6, 4]);
    /// assert!(tensor.reshape(&[7]).is_err());
    /// ```
    pub fn reshape(&self, new_shape: &[usize]) -> TensorResult<Self> {
        let new_size: usize = new_shape.iter().product();
        let old_size = self.len();
        if new_size != old_size {
            return Err(TensorError::incompatible_shapes(
                "reshape",
                self.shape_vec(),
                new_shape.to_vec(),
                format!("sizes differ ({} vs {})", old_size, new_size),
            ));
        }
        if let Ok(reshaped) = self.data.view().into_shape_with_order(IxDyn(new_shape)) {
            Ok(Self {
                data: reshaped.to_owned(),
            })
        } else {
            Self::from_vec(self.to_vec(), new_shape)
        }
    }

    /// Permute (transpose) the axes of the tensor.
    ///
    /// The result is a new tensor; `self` is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::InvalidPermutation`] if `axes` is not a
    /// permutation of `0..rank`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trifun_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let permuted = tensor.permute(&[2, 0, 1]).unwrap();
    /// assert_eq!(permuted.shape(), &[4, 2, 3]);
    /// assert_eq!(tensor.shape(), &[2, 3, 4]);
    /// ```
    pub fn permute(&self, axes: &[usize]) -> TensorResult<Self> {
        if axes.len() != self.rank() {
            return Err(TensorError::invalid_permutation(axes, self.rank()));
        }
        let mut seen = vec![false; self.rank()];
        for &axis in axes {
            if axis >= self.rank() || seen[axis] {
                return Err(TensorError::invalid_permutation(axes, self.rank()));
            }
            seen[axis] = true;
        }
        let permuted = self.data.clone().permuted_axes(IxDyn(axes));
        Ok(Self { data: permuted })
    }

    /// Swap two axes of the tensor
    ///
    /// ```
    /// use trifun_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let swapped = tensor.swapaxes(0, 1).unwrap();
    /// assert_eq!(swapped.shape(), &[3, 2, 4]);
    /// ```
    pub fn swapaxes(&self, axis1: usize, axis2: usize) -> TensorResult<Self> {
        let rank = self.rank();
        if axis1 >= rank {
            return Err(TensorError::invalid_mode(axis1, rank, "swapaxes"));
        }
        if axis2 >= rank {
            return Err(TensorError::invalid_mode(axis2, rank, "swapaxes"));
        }

        let mut perm: Vec<usize> = (0..rank).collect();
        perm.swap(axis1, axis2);
        self.permute(&perm)
    }

    /// Unfold (matricize) the tensor along a specific mode.
    ///
    /// The mode is exposed as rows; the remaining modes are flattened into
    /// columns in their natural order (row-major, so the last remaining mode
    /// varies fastest). For a rank-3 tensor of shape `(I, J, K)` unfolded
    /// along mode 0, entry `(i, j, k)` lands at row `i`, column `j * K + k`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::InvalidMode`] if mode is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use trifun_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::ones(&[2, 3, 4]);
    /// let unfolded = tensor.unfold(1).unwrap();
    /// assert_eq!(unfolded.shape(), &[3, 8]);
    /// ```
    pub fn unfold(&self, mode: usize) -> TensorResult<Array2<T>> {
        if mode >= self.rank() {
            return Err(TensorError::invalid_mode(mode, self.rank(), "unfold"));
        }

        let shape = self.shape();
        let rows = shape[mode];
        let cols: usize = shape
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != mode)
            .map(|(_, &s)| s)
            .product();

        // Permute so that mode becomes the first axis
        let mut perm: Vec<usize> = vec![mode];
        perm.extend((0..mode).chain((mode + 1)..self.rank()));
        let permuted = self.permute(&perm)?;

        Array2::from_shape_vec((rows, cols), permuted.to_vec()).map_err(|e| {
            TensorError::dimension_mismatch("unfold", vec![rows, cols], shape.to_vec(), e.to_string())
        })
    }

    /// Fold (tensorize) a matrix back into a tensor.
    ///
    /// Inverse of [`DenseND::unfold`]: `fold(unfold(t, m), shape(t), m) == t`
    /// holds exactly.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::InvalidMode`] for an out-of-range mode and
    /// [`TensorError::DimensionMismatch`] if the matrix does not have shape
    /// `(shape[mode], product of the other dims)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trifun_core::DenseND;
    /// use scirs2_core::ndarray_ext::Array2;
    ///
    /// let matrix: Array2<f64> = Array2::zeros((2, 6));
    /// let tensor = DenseND::fold(&matrix, &[2, 3, 2], 0).unwrap();
    /// assert_eq!(tensor.shape(), &[2, 3, 2]);
    /// ```
    pub fn fold(matrix: &Array2<T>, shape: &[usize], mode: usize) -> TensorResult<Self> {
        if mode >= shape.len() {
            return Err(TensorError::invalid_mode(
                mode,
                shape.len(),
                format!("fold into shape {:?}", shape),
            ));
        }

        let expected_rows = shape[mode];
        let expected_cols: usize = shape
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != mode)
            .map(|(_, &s)| s)
            .product();

        if matrix.nrows() != expected_rows || matrix.ncols() != expected_cols {
            return Err(TensorError::dimension_mismatch(
                "fold",
                vec![expected_rows, expected_cols],
                matrix.shape().to_vec(),
                format!("target shape {:?} at mode {}", shape, mode),
            ));
        }

        // Intermediate layout: [shape[mode], other dims in natural order]
        let mut intermediate_shape = vec![shape[mode]];
        for (i, &s) in shape.iter().enumerate() {
            if i != mode {
                intermediate_shape.push(s);
            }
        }

        let flat: Vec<T> = matrix.iter().cloned().collect();
        let intermediate = Self::from_vec(flat, &intermediate_shape)?;

        // Inverse of the unfold permutation
        let mut inverse_perm = vec![0; shape.len()];
        let mut idx = 1;
        for (i, perm_val) in inverse_perm.iter_mut().enumerate() {
            if i != mode {
                *perm_val = idx;
                idx += 1;
            }
        }

        intermediate.permute(&inverse_perm)
    }

    /// Flatten tensor to 1D in logical row-major order
    ///
    /// ```
    /// use trifun_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// let flat = tensor.flatten();
    /// assert_eq!(flat.shape(), &[4]);
    /// assert_eq!(flat[&[3][..]], 4.0);
    /// ```
    pub fn flatten(&self) -> Self {
        Self {
            data: scirs2_core::ndarray_ext::Array::from_vec(self.to_vec()).into_dyn(),
        }
    }
}
