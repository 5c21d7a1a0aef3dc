//! Grid layout detection
//!
//! A matrix or 3-way coordinate triple often comes from an ndgrid or
//! meshgrid call, where each coordinate varies along exactly one array
//! dimension. Recognizing that lets the engine evaluate every axis function
//! once per distinct coordinate and combine the results by three mode
//! products, instead of evaluating once per sample.
//!
//! Conventions, for coordinate vectors `x` (length nx), `y`, `z`:
//!
//! - ndgrid: shape `(nx, ny, nz)`, `X[i,j,k] = x[i]`, `Y[i,j,k] = y[j]`,
//!   `Z[i,j,k] = z[k]`
//! - meshgrid: shape `(ny, nx, nz)`, `X[i,j,k] = x[j]`, `Y[i,j,k] = y[i]`,
//!   `Z[i,j,k] = z[k]`
//!
//! The 2-D variants hold one coordinate constant and lay the other two out
//! the same way (ndgrid: first varying coordinate down the rows; meshgrid:
//! first varying coordinate across the columns).
//!
//! Every check is a single residual scan over the samples. Checks run in a
//! fixed priority order and the first match wins.

use crate::error::EvalResult;
use scirs2_core::ndarray_ext::{Array3, ArrayD, ArrayView2, ArrayView3, Axis as NdAxis};
use trifun_core::{Axis, DenseND};
use trifun_kernels::outer_product;

/// Identity mode order of the core tensor
pub const IDENTITY_PERMUTATION: [Axis; 3] = [0, 1, 2];

/// Layout of a coordinate triple
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridLayout {
    /// `X` down the rows, `Y` across the columns, `Z` constant
    NdgridConstZ,
    /// `X` down the rows, `Z` across the columns, `Y` constant
    NdgridConstY,
    /// `Y` down the rows, `Z` across the columns, `X` constant
    NdgridConstX,
    /// `Y` down the rows, `X` across the columns, `Z` constant
    MeshgridConstZ,
    /// `Z` down the rows, `X` across the columns, `Y` constant
    MeshgridConstY,
    /// `Z` down the rows, `Y` across the columns, `X` constant
    MeshgridConstX,
    Ndgrid,
    Meshgrid,
    Unstructured,
}

/// Checks for 2-D coordinates, in priority order
pub const MATRIX_LAYOUTS: [GridLayout; 6] = [
    GridLayout::NdgridConstZ,
    GridLayout::NdgridConstY,
    GridLayout::NdgridConstX,
    GridLayout::MeshgridConstZ,
    GridLayout::MeshgridConstY,
    GridLayout::MeshgridConstX,
];

/// Checks for 3-D coordinates, in priority order
pub const TENSOR_LAYOUTS: [GridLayout; 2] = [GridLayout::Ndgrid, GridLayout::Meshgrid];

/// Distinct coordinate lines of a structured grid
///
/// A constant coordinate has a line of length one.
#[derive(Clone, Debug, PartialEq)]
pub struct GridAxes {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl GridAxes {
    /// Coordinate line for a mode (0 = x, 1 = y, 2 = z)
    pub fn line(&self, mode: Axis) -> &[f64] {
        match mode {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }

    /// Number of distinct values per coordinate
    pub fn sizes(&self) -> [usize; 3] {
        [self.x.len(), self.y.len(), self.z.len()]
    }
}

impl GridLayout {
    /// Array dimension each coordinate varies along, `None` for a constant
    /// coordinate. `None` overall for [`GridLayout::Unstructured`].
    pub fn varying_dims(&self) -> Option<[Option<usize>; 3]> {
        use GridLayout::*;
        let dims = match self {
            NdgridConstZ => [Some(0), Some(1), None],
            NdgridConstY => [Some(0), None, Some(1)],
            NdgridConstX => [None, Some(0), Some(1)],
            MeshgridConstZ => [Some(1), Some(0), None],
            MeshgridConstY => [Some(1), None, Some(0)],
            MeshgridConstX => [None, Some(1), Some(0)],
            Ndgrid => [Some(0), Some(1), Some(2)],
            Meshgrid => [Some(1), Some(0), Some(2)],
            Unstructured => return None,
        };
        Some(dims)
    }

    pub fn is_structured(&self) -> bool {
        !matches!(self, GridLayout::Unstructured)
    }

    /// Mode permutation applied to a copy of the core before contraction
    ///
    /// Entry `m` is the coordinate whose values are contracted into mode
    /// `m`. Contracting the permuted core in mode order 0, 1, 2 then yields
    /// the values directly in the input layout. Ndgrid layouts need no
    /// permutation; meshgrid layouts swap the two varying modes.
    pub fn core_permutation(&self) -> [Axis; 3] {
        match self {
            GridLayout::MeshgridConstZ | GridLayout::Meshgrid => [1, 0, 2],
            GridLayout::MeshgridConstY => [2, 1, 0],
            GridLayout::MeshgridConstX => [0, 2, 1],
            _ => IDENTITY_PERMUTATION,
        }
    }

    /// Check whether a rank-3 coordinate triple has this layout
    pub fn matches(
        &self,
        x: &ArrayView3<f64>,
        y: &ArrayView3<f64>,
        z: &ArrayView3<f64>,
        tol: f64,
    ) -> bool {
        match self.varying_dims() {
            Some([dx, dy, dz]) => {
                varies_only_along(x, dx, tol)
                    && varies_only_along(y, dy, tol)
                    && varies_only_along(z, dz, tol)
            }
            None => false,
        }
    }

    /// Extract the distinct coordinate lines, `None` for an unstructured
    /// layout
    ///
    /// The triple is assumed to match the layout; values are read from the
    /// first line along each varying dimension.
    pub fn reduce(
        &self,
        x: &ArrayView3<f64>,
        y: &ArrayView3<f64>,
        z: &ArrayView3<f64>,
    ) -> Option<GridAxes> {
        let [dx, dy, dz] = self.varying_dims()?;
        Some(GridAxes {
            x: extract_line(x, dx),
            y: extract_line(y, dy),
            z: extract_line(z, dz),
        })
    }
}

/// Whether every entry equals the entry with all indices except `dim`
/// zeroed, to within `tol`. With `dim = None` the array must be constant.
fn varies_only_along(a: &ArrayView3<f64>, dim: Option<usize>, tol: f64) -> bool {
    if a.is_empty() {
        return false;
    }
    a.indexed_iter().all(|((i, j, k), &v)| {
        let reference = a[anchor(dim, i, j, k)];
        // NaN never passes
        (v - reference).abs() <= tol
    })
}

fn anchor(dim: Option<usize>, i: usize, j: usize, k: usize) -> [usize; 3] {
    match dim {
        None => [0, 0, 0],
        Some(0) => [i, 0, 0],
        Some(1) => [0, j, 0],
        Some(_) => [0, 0, k],
    }
}

fn extract_line(a: &ArrayView3<f64>, dim: Option<usize>) -> Vec<f64> {
    match dim {
        None => a.iter().take(1).copied().collect(),
        Some(d) => a
            .lanes(NdAxis(d))
            .into_iter()
            .next()
            .map(|lane| lane.to_vec())
            .unwrap_or_default(),
    }
}

/// Detect the layout of 2-D coordinates
///
/// Checks ndgrid with z, y, x constant, then meshgrid with z, y, x constant.
///
/// # Examples
///
/// ```
/// use trifun_eval::grid::{detect_matrix_layout, meshgrid2, GridLayout};
/// use scirs2_core::ndarray_ext::{Array2, Ix2};
///
/// let (x, y) = meshgrid2(&[0.0, 0.5, 1.0], &[-1.0, 1.0]).unwrap();
/// let x = x.into_dimensionality::<Ix2>().unwrap();
/// let y = y.into_dimensionality::<Ix2>().unwrap();
/// let z = Array2::from_elem((2, 3), 0.25);
///
/// let layout = detect_matrix_layout(&x.view(), &y.view(), &z.view(), 0.0);
/// assert_eq!(layout, GridLayout::MeshgridConstZ);
/// ```
pub fn detect_matrix_layout(
    x: &ArrayView2<f64>,
    y: &ArrayView2<f64>,
    z: &ArrayView2<f64>,
    tol: f64,
) -> GridLayout {
    let x = x.view().insert_axis(NdAxis(2));
    let y = y.view().insert_axis(NdAxis(2));
    let z = z.view().insert_axis(NdAxis(2));
    detect(&MATRIX_LAYOUTS, &x, &y, &z, tol)
}

/// Detect the layout of 3-D coordinates: full ndgrid, then full meshgrid
pub fn detect_tensor_layout(
    x: &ArrayView3<f64>,
    y: &ArrayView3<f64>,
    z: &ArrayView3<f64>,
    tol: f64,
) -> GridLayout {
    detect(&TENSOR_LAYOUTS, x, y, z, tol)
}

fn detect(
    candidates: &[GridLayout],
    x: &ArrayView3<f64>,
    y: &ArrayView3<f64>,
    z: &ArrayView3<f64>,
    tol: f64,
) -> GridLayout {
    if x.shape() != y.shape() || x.shape() != z.shape() {
        return GridLayout::Unstructured;
    }
    candidates
        .iter()
        .copied()
        .find(|layout| layout.matches(x, y, z, tol))
        .unwrap_or(GridLayout::Unstructured)
}

pub(crate) fn detect_grid3(
    x: &Array3<f64>,
    y: &Array3<f64>,
    z: &Array3<f64>,
    matrix: bool,
    tol: f64,
) -> GridLayout {
    let candidates: &[GridLayout] = if matrix {
        &MATRIX_LAYOUTS
    } else {
        &TENSOR_LAYOUTS
    };
    detect(candidates, &x.view(), &y.view(), &z.view(), tol)
}

fn vector(values: &[f64]) -> EvalResult<DenseND<f64>> {
    Ok(DenseND::from_vec(values.to_vec(), &[values.len()])?)
}

fn ones(n: usize) -> DenseND<f64> {
    DenseND::ones(&[n])
}

fn outer3(a: &DenseND<f64>, b: &DenseND<f64>, c: &DenseND<f64>) -> EvalResult<ArrayD<f64>> {
    Ok(outer_product(&[a, b, c])?.into_array())
}

fn outer2(a: &DenseND<f64>, b: &DenseND<f64>) -> EvalResult<ArrayD<f64>> {
    Ok(outer_product(&[a, b])?.into_array())
}

/// 3-D ndgrid coordinates of shape `(nx, ny, nz)`
///
/// # Errors
///
/// Fails with an empty-input tensor error if any coordinate list is empty.
///
/// ```
/// use trifun_eval::grid::ndgrid;
///
/// let (x, y, z) = ndgrid(&[1.0, 2.0], &[3.0, 4.0, 5.0], &[6.0]).unwrap();
/// assert_eq!(x.shape(), &[2, 3, 1]);
/// assert_eq!(x[[1, 2, 0]], 2.0);
/// assert_eq!(y[[1, 2, 0]], 5.0);
/// assert_eq!(z[[1, 2, 0]], 6.0);
/// ```
pub fn ndgrid(
    xs: &[f64],
    ys: &[f64],
    zs: &[f64],
) -> EvalResult<(ArrayD<f64>, ArrayD<f64>, ArrayD<f64>)> {
    let (nx, ny, nz) = (xs.len(), ys.len(), zs.len());
    Ok((
        outer3(&vector(xs)?, &ones(ny), &ones(nz))?,
        outer3(&ones(nx), &vector(ys)?, &ones(nz))?,
        outer3(&ones(nx), &ones(ny), &vector(zs)?)?,
    ))
}

/// 3-D meshgrid coordinates of shape `(ny, nx, nz)`
///
/// ```
/// use trifun_eval::grid::meshgrid;
///
/// let (x, y, z) = meshgrid(&[1.0, 2.0], &[3.0, 4.0, 5.0], &[6.0, 7.0]).unwrap();
/// assert_eq!(x.shape(), &[3, 2, 2]);
/// assert_eq!(x[[2, 1, 0]], 2.0);
/// assert_eq!(y[[2, 1, 0]], 5.0);
/// assert_eq!(z[[2, 1, 1]], 7.0);
/// ```
pub fn meshgrid(
    xs: &[f64],
    ys: &[f64],
    zs: &[f64],
) -> EvalResult<(ArrayD<f64>, ArrayD<f64>, ArrayD<f64>)> {
    let (nx, ny, nz) = (xs.len(), ys.len(), zs.len());
    Ok((
        outer3(&ones(ny), &vector(xs)?, &ones(nz))?,
        outer3(&vector(ys)?, &ones(nx), &ones(nz))?,
        outer3(&ones(ny), &ones(nx), &vector(zs)?)?,
    ))
}

/// 2-D ndgrid: shape `(na, nb)`, `A[i,j] = a[i]`, `B[i,j] = b[j]`
pub fn ndgrid2(a: &[f64], b: &[f64]) -> EvalResult<(ArrayD<f64>, ArrayD<f64>)> {
    Ok((
        outer2(&vector(a)?, &ones(b.len()))?,
        outer2(&ones(a.len()), &vector(b)?)?,
    ))
}

/// 2-D meshgrid: shape `(nb, na)`, `A[i,j] = a[j]`, `B[i,j] = b[i]`
pub fn meshgrid2(a: &[f64], b: &[f64]) -> EvalResult<(ArrayD<f64>, ArrayD<f64>)> {
    Ok((
        outer2(&ones(b.len()), &vector(a)?)?,
        outer2(&vector(b)?, &ones(a.len()))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::{Array2, Ix2, Ix3};

    fn as2(a: ArrayD<f64>) -> Array2<f64> {
        a.into_dimensionality::<Ix2>().unwrap()
    }

    fn as3(a: ArrayD<f64>) -> Array3<f64> {
        a.into_dimensionality::<Ix3>().unwrap()
    }

    fn constant(shape: (usize, usize), value: f64) -> Array2<f64> {
        Array2::from_elem(shape, value)
    }

    #[test]
    fn test_ndgrid2_variants() {
        let (a, b) = ndgrid2(&[0.0, 1.0, 2.0], &[5.0, 6.0]).unwrap();
        let (a, b) = (as2(a), as2(b));
        let c = constant((3, 2), 0.5);

        assert_eq!(
            detect_matrix_layout(&a.view(), &b.view(), &c.view(), 0.0),
            GridLayout::NdgridConstZ
        );
        assert_eq!(
            detect_matrix_layout(&a.view(), &c.view(), &b.view(), 0.0),
            GridLayout::NdgridConstY
        );
        assert_eq!(
            detect_matrix_layout(&c.view(), &a.view(), &b.view(), 0.0),
            GridLayout::NdgridConstX
        );
    }

    #[test]
    fn test_meshgrid2_variants() {
        let (a, b) = meshgrid2(&[0.0, 1.0, 2.0], &[5.0, 6.0]).unwrap();
        let (a, b) = (as2(a), as2(b));
        let c = constant((2, 3), 0.5);

        assert_eq!(
            detect_matrix_layout(&a.view(), &b.view(), &c.view(), 0.0),
            GridLayout::MeshgridConstZ
        );
        assert_eq!(
            detect_matrix_layout(&a.view(), &c.view(), &b.view(), 0.0),
            GridLayout::MeshgridConstY
        );
        assert_eq!(
            detect_matrix_layout(&c.view(), &a.view(), &b.view(), 0.0),
            GridLayout::MeshgridConstX
        );
    }

    #[test]
    fn test_priority_ndgrid_before_meshgrid() {
        // Every coordinate constant matches everything; the first check wins
        let c = constant((2, 2), 1.0);
        assert_eq!(
            detect_matrix_layout(&c.view(), &c.view(), &c.view(), 0.0),
            GridLayout::NdgridConstZ
        );
    }

    #[test]
    fn test_unstructured_matrix() {
        let x = Array2::from_shape_fn((3, 3), |(i, j)| (i * 3 + j) as f64);
        let c = constant((3, 3), 0.0);
        assert_eq!(
            detect_matrix_layout(&x.view(), &c.view(), &c.view(), 0.0),
            GridLayout::Unstructured
        );
    }

    #[test]
    fn test_exact_check_rejects_perturbation() {
        let (a, b) = ndgrid2(&[0.0, 1.0, 2.0], &[5.0, 6.0]).unwrap();
        let (mut a, b) = (as2(a), as2(b));
        let c = constant((3, 2), 0.5);
        a[[1, 1]] += 1e-14;

        assert_eq!(
            detect_matrix_layout(&a.view(), &b.view(), &c.view(), 0.0),
            GridLayout::Unstructured
        );
        assert_eq!(
            detect_matrix_layout(&a.view(), &b.view(), &c.view(), 1e-12),
            GridLayout::NdgridConstZ
        );
    }

    #[test]
    fn test_nan_never_matches() {
        let (a, b) = ndgrid2(&[0.0, f64::NAN], &[5.0, 6.0]).unwrap();
        let (a, b) = (as2(a), as2(b));
        let c = constant((2, 2), 0.5);
        assert_eq!(
            detect_matrix_layout(&a.view(), &b.view(), &c.view(), f64::INFINITY),
            GridLayout::Unstructured
        );
    }

    #[test]
    fn test_tensor_layouts_and_reduce() {
        let xs = [0.0, 0.5];
        let ys = [1.0, 2.0, 3.0];
        let zs = [-1.0, 0.0, 1.0, 2.0];

        let (x, y, z) = ndgrid(&xs, &ys, &zs).unwrap();
        let (x, y, z) = (as3(x), as3(y), as3(z));
        let layout = detect_tensor_layout(&x.view(), &y.view(), &z.view(), 0.0);
        assert_eq!(layout, GridLayout::Ndgrid);
        let axes = layout.reduce(&x.view(), &y.view(), &z.view()).unwrap();
        assert_eq!(axes.x, xs.to_vec());
        assert_eq!(axes.y, ys.to_vec());
        assert_eq!(axes.z, zs.to_vec());

        let (x, y, z) = meshgrid(&xs, &ys, &zs).unwrap();
        let (x, y, z) = (as3(x), as3(y), as3(z));
        let layout = detect_tensor_layout(&x.view(), &y.view(), &z.view(), 0.0);
        assert_eq!(layout, GridLayout::Meshgrid);
        let axes = layout.reduce(&x.view(), &y.view(), &z.view()).unwrap();
        assert_eq!(axes.sizes(), [2, 3, 4]);
        assert_eq!(axes.line(1), &ys[..]);
    }

    #[test]
    fn test_reduce_constant_axis() {
        let (a, b) = meshgrid2(&[0.0, 1.0, 2.0], &[5.0, 6.0]).unwrap();
        let (a, b) = (as2(a), as2(b));
        let c = constant((2, 3), 0.5);
        let (x, y, z) = (
            a.view().insert_axis(NdAxis(2)),
            c.view().insert_axis(NdAxis(2)),
            b.view().insert_axis(NdAxis(2)),
        );
        let axes = GridLayout::MeshgridConstY.reduce(&x, &y, &z).unwrap();
        assert_eq!(axes.x, vec![0.0, 1.0, 2.0]);
        assert_eq!(axes.y, vec![0.5]);
        assert_eq!(axes.z, vec![5.0, 6.0]);
    }

    #[test]
    fn test_unstructured_reduce_is_none() {
        let a = Array3::<f64>::zeros((2, 2, 2));
        assert!(GridLayout::Unstructured
            .reduce(&a.view(), &a.view(), &a.view())
            .is_none());
    }

    #[test]
    fn test_core_permutations() {
        assert_eq!(GridLayout::Ndgrid.core_permutation(), [0, 1, 2]);
        assert_eq!(GridLayout::NdgridConstY.core_permutation(), [0, 1, 2]);
        assert_eq!(GridLayout::Meshgrid.core_permutation(), [1, 0, 2]);
        assert_eq!(GridLayout::MeshgridConstZ.core_permutation(), [1, 0, 2]);
        assert_eq!(GridLayout::MeshgridConstY.core_permutation(), [2, 1, 0]);
        assert_eq!(GridLayout::MeshgridConstX.core_permutation(), [0, 2, 1]);
    }

    #[test]
    fn test_permutation_matches_varying_dims() {
        // Varying coordinates are contracted in the order of the array
        // dimensions they run along; a constant coordinate keeps its mode.
        for layout in MATRIX_LAYOUTS.iter().chain(TENSOR_LAYOUTS.iter()) {
            let dims = layout.varying_dims().unwrap();
            let perm = layout.core_permutation();
            let mut order = Vec::new();
            for (mode, &coord) in perm.iter().enumerate() {
                match dims[coord] {
                    Some(d) => order.push(d),
                    None => assert_eq!(coord, mode, "{:?}", layout),
                }
            }
            assert!(order.windows(2).all(|w| w[0] < w[1]), "{:?}", layout);
        }
    }

    #[test]
    fn test_builders_reject_empty() {
        assert!(ndgrid(&[], &[1.0], &[1.0]).is_err());
        assert!(meshgrid2(&[1.0], &[]).is_err());
    }
}
