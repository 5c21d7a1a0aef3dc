//! Grid evaluation walkthrough
//!
//! Builds f(x, y, z) = sin(x)·cos(y) + z in Tucker form, evaluates it on an
//! ndgrid and a meshgrid, compares the fast path against the pointwise loop,
//! and takes a surface and a line out of it.
//!
//! Run with: cargo run --example grid_evaluation --features parallel

use std::time::Instant;

use trifun_core::DenseND;
use trifun_eval::grid::{meshgrid, ndgrid};
use trifun_eval::{ChebyshevBasis, Domain, EvalArg, EvalConfig, EvalResult, Fun3, Interval};

fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
        .collect()
}

fn build() -> EvalResult<Fun3<ChebyshevBasis>> {
    let unit = Interval::unit();
    let one = |_: f64| 1.0;
    let sin = |x: f64| x.sin();
    let cos = |y: f64| y.cos();
    let id = |z: f64| z;

    let cols = ChebyshevBasis::interpolate(unit, 16, &[&sin, &one])?;
    let rows = ChebyshevBasis::interpolate(unit, 16, &[&cos, &one])?;
    let tubes = ChebyshevBasis::interpolate(unit, 2, &[&one, &id])?;

    let mut core = DenseND::<f64>::zeros(&[2, 2, 2]);
    core[&[0, 0, 0][..]] = 1.0;
    core[&[1, 1, 1][..]] = 1.0;

    Fun3::new(cols, rows, tubes, core, Domain::default())
}

fn exact(x: f64, y: f64, z: f64) -> f64 {
    x.sin() * y.cos() + z
}

fn main() -> EvalResult<()> {
    println!("=== Grid Evaluation Example ===\n");

    let f = build()?;
    println!("Function ranks: {:?}", f.rank());

    let n = 40;
    let xs = linspace(-1.0, 1.0, n);
    let ys = linspace(-1.0, 1.0, n + 1);
    let zs = linspace(-1.0, 1.0, n + 2);
    let slow = EvalConfig::default().with_grid_detection(false);

    for (name, (x, y, z)) in [
        ("ndgrid", ndgrid(&xs, &ys, &zs)?),
        ("meshgrid", meshgrid(&xs, &ys, &zs)?),
    ] {
        let start = Instant::now();
        let fast = f.feval(x.clone(), y.clone(), z.clone())?;
        let fast_time = start.elapsed();

        let start = Instant::now();
        let reference = f.feval_with(x.clone(), y.clone(), z.clone(), &slow)?;
        let slow_time = start.elapsed();

        let (Some(fast), Some(reference)) = (fast.values(), reference.values()) else {
            continue;
        };
        let diff = fast
            .iter()
            .zip(reference.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0_f64, f64::max);
        let err = fast
            .iter()
            .zip(x.iter().zip(y.iter().zip(z.iter())))
            .map(|(v, (&a, (&b, &c)))| (v - exact(a, b, c)).abs())
            .fold(0.0_f64, f64::max);

        println!("{} {:?}", name, fast.shape());
        println!("  grid path:      {:?}", fast_time);
        println!("  pointwise path: {:?}", slow_time);
        println!("  max |grid - pointwise|: {:.2e}", diff);
        println!("  max |grid - exact|:     {:.2e}\n", err);
    }

    if let Some(g) = f.feval(EvalArg::Whole, EvalArg::Whole, 0.25)?.into_surface() {
        println!("Surface z = 0.25, modes {:?}", g.modes());
        println!("  g(0.5, -0.5) = {:.12}", g.eval_point(0.5, -0.5)?);
        println!("  exact        = {:.12}\n", exact(0.5, -0.5, 0.25));
    }

    if let Some(h) = f.feval(vec![0.1, 0.9], vec![-0.3, 0.3], EvalArg::Whole)?.into_line() {
        println!("Lines along z: {} functions", h.len());
        let values = h.eval_point(0.5)?;
        for (p, v) in values.iter().enumerate() {
            println!("  h{}(0.5) = {:.12}", p, v);
        }
    }

    Ok(())
}
