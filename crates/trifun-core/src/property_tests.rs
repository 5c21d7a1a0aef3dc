//! Property-based tests for shape operations

use crate::DenseND;
use proptest::prelude::*;

/// Strategy producing a small rank-3 tensor with arbitrary finite entries
fn small_tensor3() -> impl Strategy<Value = DenseND<f64>> {
    (1usize..5, 1usize..5, 1usize..5).prop_flat_map(|(a, b, c)| {
        prop::collection::vec(-1e3f64..1e3, a * b * c)
            .prop_map(move |data| DenseND::from_vec(data, &[a, b, c]).unwrap())
    })
}

proptest! {
    /// fold(unfold(T, m), m, shape(T)) reproduces T bit for bit
    #[test]
    fn test_fold_unfold_inverse(tensor in small_tensor3(), mode in 0usize..3) {
        let unfolded = tensor.unfold(mode).unwrap();
        let folded = DenseND::fold(&unfolded, tensor.shape(), mode).unwrap();
        prop_assert!(folded == tensor);
    }

    /// The unfolded matrix exposes the requested mode as rows
    #[test]
    fn test_unfold_shape(tensor in small_tensor3(), mode in 0usize..3) {
        let unfolded = tensor.unfold(mode).unwrap();
        let shape = tensor.shape();
        prop_assert_eq!(unfolded.nrows(), shape[mode]);
        prop_assert_eq!(unfolded.ncols(), tensor.len() / shape[mode]);
    }

    /// Swapping the same pair twice is the identity
    #[test]
    fn test_swapaxes_involution(tensor in small_tensor3(), a in 0usize..3, b in 0usize..3) {
        let twice = tensor.swapaxes(a, b).unwrap().swapaxes(a, b).unwrap();
        prop_assert!(twice == tensor);
    }
}
