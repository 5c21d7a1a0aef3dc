//! Dense tensor type definition and basic operations
//!
//! This module defines the core `DenseND<T>` type and provides basic creation
//! and accessor methods. Shape manipulation lives in `shape_ops`.

use crate::error::{TensorError, TensorResult};
use scirs2_core::ndarray_ext::{Array, ArrayView, IxDyn};
use scirs2_core::numeric::Num;

/// Dense N-dimensional tensor backed by scirs2_core's ndarray
///
/// The trivariate core tensors handled by trifun are rank-3 instances of this
/// type, but reshapes and unfoldings produce other ranks along the way.
///
/// # Memory Layout
///
/// Tensors built by the constructors here are C-contiguous (row-major).
/// Permuted tensors may not be; every operation in this crate accepts either.
///
/// # Examples
///
/// ```
/// use trifun_core::DenseND;
///
/// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
/// assert_eq!(tensor.shape(), &[2, 3, 4]);
/// assert_eq!(tensor.rank(), 3);
/// ```
#[derive(Clone, PartialEq)]
pub struct DenseND<T> {
    /// Underlying ndarray storage (via scirs2_core)
    pub(crate) data: Array<T, IxDyn>,
}

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Create a tensor from an existing ndarray
    ///
    /// # Examples
    ///
    /// ```
    /// use scirs2_core::ndarray_ext::Array;
    /// use trifun_core::DenseND;
    ///
    /// let arr = Array::<f64, _>::zeros(vec![2, 3]);
    /// let tensor = DenseND::from_array(arr);
    /// assert_eq!(tensor.shape(), &[2, 3]);
    /// ```
    pub fn from_array(array: Array<T, IxDyn>) -> Self {
        Self { data: array }
    }

    /// Create a tensor from a vector with given shape
    ///
    /// # Arguments
    ///
    /// * `vec` - Flattened data in row-major order
    /// * `shape` - Target shape
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::DimensionMismatch`] if `vec.len()` differs from
    /// the product of `shape`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trifun_core::DenseND;
    ///
    /// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    /// let tensor = DenseND::from_vec(data, &[2, 3]).unwrap();
    /// assert_eq!(tensor.shape(), &[2, 3]);
    ///
    /// assert!(DenseND::from_vec(vec![1.0, 2.0], &[3]).is_err());
    /// ```
    pub fn from_vec(vec: Vec<T>, shape: &[usize]) -> TensorResult<Self> {
        let total: usize = shape.iter().product();
        if vec.len() != total {
            return Err(TensorError::dimension_mismatch(
                "from_vec",
                vec![total],
                vec![vec.len()],
                format!("Shape {:?} requires {} elements", shape, total),
            ));
        }
        let array = Array::from_shape_vec(IxDyn(shape), vec).map_err(|e| {
            TensorError::dimension_mismatch("from_vec", shape.to_vec(), vec![total], e.to_string())
        })?;
        Ok(Self { data: array })
    }

    /// Get the rank (number of dimensions) of this tensor
    pub fn rank(&self) -> usize {
        self.data.ndim()
    }

    /// Get the shape of this tensor
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Get the total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the tensor is empty (has zero elements)
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if the tensor is contiguous in memory.
    ///
    /// ```
    /// use trifun_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// assert!(tensor.is_contiguous());
    /// ```
    pub fn is_contiguous(&self) -> bool {
        self.data.is_standard_layout()
    }

    /// Get a copy of the shape as a vector.
    pub fn shape_vec(&self) -> Vec<usize> {
        self.shape().to_vec()
    }

    /// Get an immutable reference to the underlying ndarray
    pub fn as_array(&self) -> &Array<T, IxDyn> {
        &self.data
    }

    /// Consume the tensor and return the underlying ndarray
    pub fn into_array(self) -> Array<T, IxDyn> {
        self.data
    }

    /// Get an immutable view of the tensor
    pub fn view(&self) -> ArrayView<'_, T, IxDyn> {
        self.data.view()
    }

    /// Create a tensor filled with a specific value
    ///
    /// ```
    /// use trifun_core::DenseND;
    ///
    /// let tensor = DenseND::from_elem(&[1, 1, 1], 5.0);
    /// assert_eq!(tensor[&[0, 0, 0][..]], 5.0);
    /// ```
    pub fn from_elem(shape: &[usize], value: T) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), value),
        }
    }

    /// Create a tensor of zeros
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    /// Create a tensor of ones
    pub fn ones(shape: &[usize]) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), T::one()),
        }
    }

    /// Copy the elements into a vector in logical row-major order
    ///
    /// The order is independent of the memory layout, so a permuted tensor
    /// yields its elements in the permuted index order.
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }

    /// Iterate over the elements in logical row-major order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Check whether two tensors have the same shape
    pub fn same_shape(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }
}
