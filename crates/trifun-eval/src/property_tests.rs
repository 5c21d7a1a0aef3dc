//! Property-based tests for evaluation dispatch and grid detection

use super::*;
use proptest::prelude::*;
use scirs2_core::ndarray_ext::{Array1, Array2, ArrayD};
use trifun_core::DenseND;

fn coords(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0f64..1.0, 1..max_len)
}

/// Random function with Chebyshev axes of degree 3 and the given ranks
fn random_fun(ranks: [usize; 3], seed: f64) -> Fun3<ChebyshevBasis> {
    let axis = |r: usize, shift: f64| {
        let coeffs = Array2::from_shape_fn((4, r), |(k, j)| ((k * 7 + j * 3) as f64 + shift).cos());
        ChebyshevBasis::new(coeffs, Interval::unit()).unwrap()
    };
    let n: usize = ranks.iter().product();
    let core = DenseND::from_vec(
        (0..n).map(|i| ((i as f64) * 0.61 + seed).sin()).collect(),
        &ranks,
    )
    .unwrap();
    Fun3::new(
        axis(ranks[0], seed),
        axis(ranks[1], seed + 1.0),
        axis(ranks[2], seed + 2.0),
        core,
        Domain::default(),
    )
    .unwrap()
}

fn assert_close(a: &ArrayD<f64>, b: &ArrayD<f64>) -> Result<(), TestCaseError> {
    prop_assert_eq!(a.shape(), b.shape());
    for (u, v) in a.iter().zip(b.iter()) {
        prop_assert!((u - v).abs() <= 1e-10 * (1.0 + v.abs()), "{} vs {}", u, v);
    }
    Ok(())
}

fn ranks() -> impl Strategy<Value = [usize; 3]> {
    (1usize..4, 1usize..4, 1usize..4).prop_map(|(a, b, c)| [a, b, c])
}

proptest! {
    /// Grid fast path agrees with the flatten-and-loop fallback
    #[test]
    fn test_grid3_fast_path_matches_fallback(
        r in ranks(),
        xs in coords(5),
        ys in coords(5),
        zs in coords(5),
        mesh in any::<bool>(),
    ) {
        let f = random_fun(r, 0.3);
        let (x, y, z) = if mesh {
            grid::meshgrid(&xs, &ys, &zs).unwrap()
        } else {
            grid::ndgrid(&xs, &ys, &zs).unwrap()
        };
        let slow = EvalConfig::default().with_grid_detection(false);

        let fast = f.feval(x.clone(), y.clone(), z.clone()).unwrap().into_values().unwrap();
        let reference = f.feval_with(x, y, z, &slow).unwrap().into_values().unwrap();
        assert_close(&fast, &reference)?;
    }

    /// Same for matrix inputs with one constant coordinate
    #[test]
    fn test_grid2_fast_path_matches_fallback(
        r in ranks(),
        a in coords(6),
        b in coords(6),
        c in -1.0f64..1.0,
        mesh in any::<bool>(),
        constant_axis in 0usize..3,
    ) {
        let f = random_fun(r, 1.7);
        let (ga, gb) = if mesh {
            grid::meshgrid2(&a, &b).unwrap()
        } else {
            grid::ndgrid2(&a, &b).unwrap()
        };
        let gc = ArrayD::from_elem(ga.shape(), c);
        let (x, y, z) = match constant_axis {
            0 => (gc, ga, gb),
            1 => (ga, gc, gb),
            _ => (ga, gb, gc),
        };
        let slow = EvalConfig::default().with_grid_detection(false);

        let fast = f.feval(x.clone(), y.clone(), z.clone()).unwrap().into_values().unwrap();
        let reference = f.feval_with(x, y, z, &slow).unwrap().into_values().unwrap();
        assert_close(&fast, &reference)?;
    }

    /// A row vector evaluation transposed equals the column vector one
    #[test]
    fn test_orientation_invariance(r in ranks(), pts in prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0), 2..8)) {
        let f = random_fun(r, 2.9);
        let n = pts.len();
        let column = |sel: fn(&(f64, f64, f64)) -> f64| {
            Array2::from_shape_fn((n, 1), |(i, _)| sel(&pts[i]))
        };
        let xc = column(|p| p.0);
        let yc = column(|p| p.1);
        let zc = column(|p| p.2);

        let col_out = f.feval(xc.clone(), yc.clone(), zc.clone()).unwrap().into_values().unwrap();
        let row_out = f
            .feval(xc.t().to_owned(), yc.t().to_owned(), zc.t().to_owned())
            .unwrap()
            .into_values()
            .unwrap();

        prop_assert_eq!(col_out.shape(), &[n, 1]);
        prop_assert_eq!(row_out.shape(), &[1, n]);
        let transposed = row_out.t().to_owned();
        assert_close(&transposed, &col_out)?;
    }

    /// A one-element vector is the same point as bare scalars
    #[test]
    fn test_single_element_vector_equals_scalar(r in ranks(), x in -1.0f64..1.0, y in -1.0f64..1.0, z in -1.0f64..1.0) {
        let f = random_fun(r, 0.8);
        let scalar = f.eval_point(x, y, z).unwrap();
        let vector = f
            .feval(Array1::from_vec(vec![x]), vec![y], vec![z])
            .unwrap()
            .into_values()
            .unwrap();
        prop_assert_eq!(vector.len(), 1);
        prop_assert!((vector[[0]] - scalar).abs() <= 1e-14 * (1.0 + scalar.abs()));
    }

    /// Fixing x and then evaluating the surface is evaluating f directly
    #[test]
    fn test_surface_restriction(r in ranks(), x0 in -1.0f64..1.0, ys in coords(6), seed in 0.0f64..3.0) {
        let f = random_fun(r, seed);
        let zs: Vec<f64> = ys.iter().map(|y| 0.5 * y - 0.2).collect();
        let g = f.feval(x0, EvalArg::Whole, EvalArg::Whole).unwrap().into_surface().unwrap();

        let surface = g.evaluate(&ys, &zs).unwrap();
        let direct = f
            .feval(vec![x0; ys.len()], ys.clone(), zs.clone())
            .unwrap()
            .into_values()
            .unwrap();
        for (p, d) in surface.iter().zip(direct.iter()) {
            prop_assert!((p - d).abs() <= 1e-12 * (1.0 + d.abs()));
        }
    }
}
