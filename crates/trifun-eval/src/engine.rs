//! Evaluation engine
//!
//! Every call is dispatched through a closed decision table keyed on the
//! kind of each argument:
//!
//! | x, y, z                              | plan                 | result    |
//! |--------------------------------------|----------------------|-----------|
//! | whole, whole, whole                  | [`EvalPlan::Identity`]  | `Fun3`  |
//! | one scalar, two whole                | [`EvalPlan::Surface`]   | `Fun2`  |
//! | two scalars or vectors, one whole    | [`EvalPlan::Line`]      | `Fun1`  |
//! | three scalars or vectors             | [`EvalPlan::Pointwise`] | values  |
//! | three matrices                       | [`EvalPlan::Grid2`]     | values  |
//! | three 3-way arrays                   | [`EvalPlan::Grid3`]     | values  |
//!
//! Any other combination is rejected with
//! [`EvalError::UnsupportedEvaluationShape`]. Numeric arguments in one call
//! must have identical shapes. All checks happen before the first axis
//! evaluation.
//!
//! Contractions always run in mode order 0, 1, 2. Grid layouts that put the
//! coordinates in a different order contract a permuted copy of the core.

use crate::arg::{as_grid3, coordinates, ArgKind, EvalArg};
use crate::axis::AxisFunction;
use crate::config::EvalConfig;
use crate::error::{EvalError, EvalResult};
use crate::fun1::Fun1;
use crate::fun2::Fun2;
use crate::fun3::Fun3;
use crate::grid::{detect_grid3, GridAxes, GridLayout, IDENTITY_PERMUTATION};
use scirs2_core::ndarray_ext::{s, Array1, Array2, ArrayD, ArrayView2, IxDyn};
use std::borrow::Cow;
use trifun_core::{Axis, DenseND, TensorResult};
use trifun_kernels::{trilinear_rows, txm};

/// Evaluation strategy chosen from the argument kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvalPlan {
    /// Return the function unchanged
    Identity,
    /// Fix one coordinate at a scalar, giving a bivariate function
    Surface { fixed: Axis },
    /// Fix two coordinates at matching points, giving one univariate
    /// function of the free coordinate per point
    Line { free: Axis },
    /// One trilinear form per sample
    Pointwise,
    /// Matrix coordinates, grid detection first
    Grid2,
    /// 3-way coordinates, grid detection first
    Grid3,
}

impl EvalPlan {
    /// Look up the plan for a triple of argument kinds (`None` = whole)
    ///
    /// ```
    /// use trifun_eval::arg::ArgKind;
    /// use trifun_eval::EvalPlan;
    ///
    /// let plan = EvalPlan::from_kinds([None, Some(ArgKind::Scalar), None]).unwrap();
    /// assert_eq!(plan, EvalPlan::Surface { fixed: 1 });
    ///
    /// let mixed = [Some(ArgKind::Vector), Some(ArgKind::Matrix), Some(ArgKind::Vector)];
    /// assert!(EvalPlan::from_kinds(mixed).is_err());
    /// ```
    pub fn from_kinds(kinds: [Option<ArgKind>; 3]) -> EvalResult<Self> {
        use ArgKind::*;

        let plan = match kinds {
            [None, None, None] => Some(EvalPlan::Identity),

            [Some(Scalar), None, None] => Some(EvalPlan::Surface { fixed: 0 }),
            [None, Some(Scalar), None] => Some(EvalPlan::Surface { fixed: 1 }),
            [None, None, Some(Scalar)] => Some(EvalPlan::Surface { fixed: 2 }),

            [None, Some(a), Some(b)] if a == b && a.is_pointlike() => {
                Some(EvalPlan::Line { free: 0 })
            }
            [Some(a), None, Some(b)] if a == b && a.is_pointlike() => {
                Some(EvalPlan::Line { free: 1 })
            }
            [Some(a), Some(b), None] if a == b && a.is_pointlike() => {
                Some(EvalPlan::Line { free: 2 })
            }

            [Some(a), Some(b), Some(c)] if a == b && b == c => match a {
                Scalar | Vector => Some(EvalPlan::Pointwise),
                Matrix => Some(EvalPlan::Grid2),
                Tensor => Some(EvalPlan::Grid3),
                Unsupported => None,
            },

            _ => None,
        };

        plan.ok_or_else(|| {
            let names: Vec<String> = kinds
                .iter()
                .map(|k| k.map_or_else(|| "whole".to_string(), |k| k.to_string()))
                .collect();
            EvalError::UnsupportedEvaluationShape(format!("({})", names.join(", ")))
        })
    }

    /// Select the plan for concrete arguments and check their shapes
    ///
    /// # Errors
    ///
    /// [`EvalError::UnsupportedEvaluationShape`] for a combination outside
    /// the table, [`EvalError::ShapeMismatch`] if numeric arguments of the
    /// same kind have different shapes.
    pub fn select(x: &EvalArg, y: &EvalArg, z: &EvalArg) -> EvalResult<Self> {
        let args = [x, y, z];
        let plan = Self::from_kinds([x.kind(), y.kind(), z.kind()])?;

        let numeric: Vec<&EvalArg> = args.iter().copied().filter(|a| !a.is_whole()).collect();
        let all_scalar = numeric.iter().all(|a| a.kind() == Some(ArgKind::Scalar));
        if !all_scalar {
            if let Some((first, rest)) = numeric.split_first() {
                for other in rest {
                    if other.shape() != first.shape() {
                        return Err(EvalError::ShapeMismatch(format!(
                            "coordinates must share one shape: {} vs {}",
                            first.describe(),
                            other.describe()
                        )));
                    }
                }
            }
        }

        Ok(plan)
    }
}

/// Result of an evaluation
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluation<A> {
    /// The function was empty
    Empty,
    /// Values, shaped like the input coordinates
    Values(ArrayD<f64>),
    /// Bivariate function left after fixing one coordinate
    Surface(Fun2<A>),
    /// Univariate functions, one per fixed point pair
    Line(Fun1<A>),
    /// The function itself, for three whole-axis arguments
    Function(Fun3<A>),
}

impl<A> Evaluation<A> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Evaluation::Empty)
    }

    pub fn values(&self) -> Option<&ArrayD<f64>> {
        match self {
            Evaluation::Values(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_values(self) -> Option<ArrayD<f64>> {
        match self {
            Evaluation::Values(v) => Some(v),
            _ => None,
        }
    }

    /// The value of a single-point evaluation
    pub fn scalar(&self) -> Option<f64> {
        self.values()
            .filter(|v| v.len() == 1)
            .and_then(|v| v.iter().next().copied())
    }

    pub fn into_surface(self) -> Option<Fun2<A>> {
        match self {
            Evaluation::Surface(g) => Some(g),
            _ => None,
        }
    }

    pub fn into_line(self) -> Option<Fun1<A>> {
        match self {
            Evaluation::Line(h) => Some(h),
            _ => None,
        }
    }

    pub fn into_function(self) -> Option<Fun3<A>> {
        match self {
            Evaluation::Function(f) => Some(f),
            _ => None,
        }
    }
}

/// Evaluate a trivariate function
///
/// # Errors
///
/// - [`EvalError::UnsupportedEvaluationShape`] for argument combinations
///   outside the decision table
/// - [`EvalError::ShapeMismatch`] if numeric arguments disagree in shape
/// - [`EvalError::Tensor`] if a contraction's operands do not line up
///
/// # Examples
///
/// ```
/// use trifun_core::DenseND;
/// use trifun_eval::{evaluate, ChebyshevBasis, Domain, EvalArg, EvalConfig, Fun3, Interval};
///
/// let one = ChebyshevBasis::constant(1.0, Interval::unit());
/// let f = Fun3::new(one.clone(), one.clone(), one, DenseND::from_elem(&[1, 1, 1], 5.0), Domain::default())
///     .unwrap();
///
/// let x = EvalArg::from(vec![0.1, 0.2, 0.3]);
/// let out = evaluate(&f, &x, &x, &x, &EvalConfig::default()).unwrap();
/// assert_eq!(out.values().unwrap().as_slice().unwrap(), &[5.0, 5.0, 5.0]);
/// ```
pub fn evaluate<A: AxisFunction>(
    f: &Fun3<A>,
    x: &EvalArg,
    y: &EvalArg,
    z: &EvalArg,
    config: &EvalConfig,
) -> EvalResult<Evaluation<A>> {
    if f.is_empty() {
        log::debug!("evaluate: empty function, shape {:?}", f.core().shape());
        return Ok(Evaluation::Empty);
    }

    let plan = EvalPlan::select(x, y, z)?;
    log::debug!(
        "evaluate: plan {:?} for ({}, {}, {})",
        plan,
        x.describe(),
        y.describe(),
        z.describe()
    );

    let args = [x, y, z];
    match plan {
        EvalPlan::Identity => Ok(Evaluation::Function(f.clone())),
        EvalPlan::Surface { fixed } => surface(f, fixed, args[fixed]).map(Evaluation::Surface),
        EvalPlan::Line { free } => line(f, free, args, config).map(Evaluation::Line),
        EvalPlan::Pointwise => pointwise(f, args, config).map(Evaluation::Values),
        EvalPlan::Grid2 | EvalPlan::Grid3 => {
            grid(f, args, plan == EvalPlan::Grid2, config).map(Evaluation::Values)
        }
    }
}

/// Evaluate an axis function set and check the sample count
fn axis_values<A: AxisFunction>(axis: &A, points: &[f64]) -> EvalResult<Array2<f64>> {
    let values = axis.evaluate(points)?;
    if values.nrows() != points.len() {
        return Err(EvalError::Collaborator(format!(
            "axis returned {} rows for {} points",
            values.nrows(),
            points.len()
        )));
    }
    log::trace!(
        "axis values: {} points x {} functions",
        values.nrows(),
        values.ncols()
    );
    Ok(values)
}

#[cfg(feature = "parallel")]
fn trilinear(
    core: &DenseND<f64>,
    a: &ArrayView2<f64>,
    b: &ArrayView2<f64>,
    c: &ArrayView2<f64>,
    config: &EvalConfig,
) -> TensorResult<Array1<f64>> {
    if a.nrows() >= config.parallel_threshold {
        trifun_kernels::trilinear_rows_parallel(core, a, b, c)
    } else {
        trilinear_rows(core, a, b, c)
    }
}

#[cfg(not(feature = "parallel"))]
fn trilinear(
    core: &DenseND<f64>,
    a: &ArrayView2<f64>,
    b: &ArrayView2<f64>,
    c: &ArrayView2<f64>,
    _config: &EvalConfig,
) -> TensorResult<Array1<f64>> {
    trilinear_rows(core, a, b, c)
}

/// Per-sample trilinear forms for matched coordinate lists
///
/// Each axis is evaluated once at its full coordinate list; sample `p` then
/// contracts the core with row `p` of each value matrix.
pub(crate) fn contract_pointwise<B: AxisFunction>(
    core: &DenseND<f64>,
    axes: [&B; 3],
    coords: [&[f64]; 3],
    config: &EvalConfig,
) -> EvalResult<Array1<f64>> {
    let n = coords[0].len();
    if coords.iter().any(|c| c.len() != n) {
        return Err(EvalError::ShapeMismatch(format!(
            "coordinate lists have lengths {:?}",
            coords.map(<[f64]>::len)
        )));
    }

    let a = axis_values(axes[0], coords[0])?;
    let b = axis_values(axes[1], coords[1])?;
    let c = axis_values(axes[2], coords[2])?;
    log::trace!("pointwise: {} samples, core {:?}", n, core.shape());

    Ok(trilinear(core, &a.view(), &b.view(), &c.view(), config)?)
}

fn pointwise<A: AxisFunction>(
    f: &Fun3<A>,
    args: [&EvalArg; 3],
    config: &EvalConfig,
) -> EvalResult<ArrayD<f64>> {
    let shape = args[0].shape().unwrap_or(&[]).to_vec();
    let xs = coordinates(args[0])?;
    let ys = coordinates(args[1])?;
    let zs = coordinates(args[2])?;

    let values = contract_pointwise(
        f.core(),
        f.axes(),
        [xs.as_slice(), ys.as_slice(), zs.as_slice()],
        config,
    )?;
    ArrayD::from_shape_vec(IxDyn(&shape), values.to_vec()).map_err(|e| {
        EvalError::ShapeMismatch(format!("result does not fit input shape {:?}: {}", shape, e))
    })
}

fn grid<A: AxisFunction>(
    f: &Fun3<A>,
    args: [&EvalArg; 3],
    matrix: bool,
    config: &EvalConfig,
) -> EvalResult<ArrayD<f64>> {
    let layout = if config.detect_grids {
        if !config.is_exact() {
            log::warn!(
                "grid detection with tolerance {:e}; near-grid samples are snapped to the grid",
                config.grid_tolerance
            );
        }
        let x = as_grid3(args[0])?;
        let y = as_grid3(args[1])?;
        let z = as_grid3(args[2])?;
        let layout = detect_grid3(&x, &y, &z, matrix, config.grid_tolerance);
        layout
            .reduce(&x.view(), &y.view(), &z.view())
            .map(|axes| (layout, axes))
    } else {
        None
    };

    match layout {
        Some((layout, axes)) => {
            log::debug!("grid: {:?} with line sizes {:?}", layout, axes.sizes());
            let shape = args[0].shape().unwrap_or(&[]).to_vec();
            contract_grid(f, layout, &axes, &shape)
        }
        None => {
            log::debug!("grid: unstructured, falling back to pointwise evaluation");
            pointwise(f, args, config)
        }
    }
}

/// Three mode products against the per-line axis values
fn contract_grid<A: AxisFunction>(
    f: &Fun3<A>,
    layout: GridLayout,
    axes: &GridAxes,
    shape: &[usize],
) -> EvalResult<ArrayD<f64>> {
    let perm = layout.core_permutation();
    let core: Cow<'_, DenseND<f64>> = if perm == IDENTITY_PERMUTATION {
        Cow::Borrowed(f.core())
    } else {
        Cow::Owned(f.core().permute(&perm)?)
    };

    let fun_axes = f.axes();
    let values = perm
        .iter()
        .map(|&coord| axis_values(fun_axes[coord], axes.line(coord)))
        .collect::<EvalResult<Vec<_>>>()?;

    let t = txm(&*core, &values[0].view(), 0)?;
    let t = txm(&t, &values[1].view(), 1)?;
    let t = txm(&t, &values[2].view(), 2)?;

    Ok(t.reshape(shape)?.into_array())
}

/// Fix one coordinate at a scalar
fn surface<A: AxisFunction>(f: &Fun3<A>, fixed: Axis, arg: &EvalArg) -> EvalResult<Fun2<A>> {
    let point = coordinates(arg)?;
    let values = axis_values(f.axes()[fixed], &point[..1])?;
    let reduced = txm(f.core(), &values.view(), fixed)?;

    let free: [Axis; 2] = match fixed {
        0 => [1, 2],
        1 => [0, 2],
        _ => [0, 1],
    };
    let dims = reduced.shape();
    // The fixed mode has size one, so row-major order is already (a, b)
    let coeffs = Array2::from_shape_vec((dims[free[0]], dims[free[1]]), reduced.to_vec())
        .map_err(|e| EvalError::ShapeMismatch(e.to_string()))?;

    let axes = f.axes();
    Fun2::new(axes[free[0]].clone(), axes[free[1]].clone(), coeffs, free)
}

/// Fix two coordinates at matching points, one column per point
fn line<A: AxisFunction>(
    f: &Fun3<A>,
    free: Axis,
    args: [&EvalArg; 3],
    config: &EvalConfig,
) -> EvalResult<Fun1<A>> {
    let fixed: [Axis; 2] = match free {
        0 => [1, 2],
        1 => [0, 2],
        _ => [0, 1],
    };
    let axes = f.axes();
    let first = coordinates(args[fixed[0]])?;
    let second = coordinates(args[fixed[1]])?;

    // Scalars may come in different singleton shapes
    let n = first.len().min(second.len());
    let va = axis_values(axes[fixed[0]], &first[..n])?;
    let vb = axis_values(axes[fixed[1]], &second[..n])?;

    let r = f.core().shape()[free];
    let mut coeffs = Array2::zeros((r, n));
    for p in 0..n {
        let t = txm(f.core(), &va.slice(s![p..p + 1, ..]), fixed[0])?;
        let t = txm(&t, &vb.slice(s![p..p + 1, ..]), fixed[1])?;
        coeffs.column_mut(p).assign(&Array1::from_vec(t.to_vec()));
    }
    log::trace!("line: {} functions of mode {}", n, free);

    Fun1::new(axes[free].clone(), coeffs, free)?.simplify(config.simplify_tolerance)
}
