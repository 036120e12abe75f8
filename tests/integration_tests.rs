use approx::{assert_abs_diff_eq, assert_relative_eq};
use chebyshev_spectral::{derivative, smooth, ChebError, FilterConfig, GridConfig, Session};
use proptest::prelude::*;
use std::f64::consts::PI;

fn sample(session: &Session, f: impl Fn(f64) -> f64) -> Vec<f64> {
    session.points().iter().map(|&x| f(x)).collect()
}

fn coefficients(session: &Session, v: &[f64]) -> Vec<f64> {
    let mut coeffs = vec![0.0; session.n()];
    session.transform().forward(v, &mut coeffs).unwrap();
    coeffs
}

#[test]
fn test_identity_on_reference_interval() {
    // n = 8 on [-1, 1], v = x  ->  dv = 1 everywhere
    let session = Session::init(8, -1.0, 1.0).unwrap();
    let v = sample(&session, |x| x);
    let mut dv = vec![0.0; 8];
    session.der(&v, &mut dv).unwrap();

    for d in dv {
        assert_abs_diff_eq!(d, 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_sine_over_full_period() {
    let session = Session::init(16, 0.0, 2.0 * PI).unwrap();
    let v = sample(&session, f64::sin);
    let mut dv = vec![0.0; 16];
    session.der(&v, &mut dv).unwrap();

    for (x, d) in session.points().iter().zip(&dv) {
        assert_abs_diff_eq!(*d, x.cos(), epsilon = 1e-8);
    }
}

#[test]
fn test_exact_for_monomials() {
    // Every polynomial of degree < n is represented exactly on the grid
    let n = 10;
    let session = Session::init(n, -2.0, 3.0).unwrap();

    for k in 0..n as i32 {
        let v = sample(&session, |x| x.powi(k));
        let mut dv = vec![0.0; n];
        session.der(&v, &mut dv).unwrap();

        for (x, d) in session.points().iter().zip(&dv) {
            let expected = if k == 0 { 0.0 } else { k as f64 * x.powi(k - 1) };
            let tolerance = 1e-12 * (1.0 + expected.abs()) * 10f64.powi(k / 2);
            assert_abs_diff_eq!(*d, expected, epsilon = tolerance);
        }
    }
}

#[test]
fn test_linear_slope_independent_of_width() {
    for (lower, upper) in [(-1.0, 1.0), (0.0, 1e-3), (0.0, 10.0), (-50.0, 250.0), (3.0, 3.5)] {
        let session = Session::init(12, lower, upper).unwrap();
        let v = sample(&session, |x| x);
        let dv = session.derivative(&v).unwrap();
        for d in dv {
            assert_relative_eq!(d, 1.0, max_relative = 1e-9);
        }
    }
}

#[test]
fn test_domain_spanning_float_range() {
    // upper - lower is not representable; points, scale and slope still are
    let session = Session::init(5, -1e308, 1e308).unwrap();
    assert!(session.scale().is_finite() && session.scale() > 0.0);
    for w in session.points().windows(2) {
        assert!(w[0].is_finite() && w[1].is_finite() && w[0] > w[1]);
    }

    let v = sample(&session, |x| x);
    let dv = session.derivative(&v).unwrap();
    for d in dv {
        assert_relative_eq!(d, 1.0, max_relative = 1e-12);
    }

    let mid = session.interpolate(&v, 0.5e308).unwrap();
    assert_relative_eq!(mid, 0.5e308, max_relative = 1e-12);
}

#[test]
fn test_affine_function_on_two_points() {
    let session = Session::init(2, 1.0, 4.0).unwrap();
    let v = sample(&session, |x| 5.0 - 2.0 * x);
    let dv = session.derivative(&v).unwrap();
    assert_abs_diff_eq!(dv[0], -2.0, epsilon = 1e-14);
    assert_abs_diff_eq!(dv[1], -2.0, epsilon = 1e-14);
}

#[test]
fn test_smooth_function_converges() {
    let session = Session::init(32, -1.0, 1.0).unwrap();
    let v = sample(&session, |x| (3.0 * x).sin() + x * x);
    let dv = session.derivative(&v).unwrap();

    for (x, d) in session.points().iter().zip(&dv) {
        assert_abs_diff_eq!(*d, 3.0 * (3.0 * x).cos() + 2.0 * x, epsilon = 1e-10);
    }
}

#[test]
fn test_repeated_derivative_matches_second_order() {
    let session = Session::init(24, 0.0, 2.0).unwrap();
    let v = sample(&session, |x| (-x).exp() * x);

    let first = session.derivative(&v).unwrap();
    let twice = session.derivative(&first).unwrap();

    let mut direct = vec![0.0; 24];
    session.der_order(&v, &mut direct, 2).unwrap();

    for (a, b) in twice.iter().zip(&direct) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-8);
    }
}

#[test]
fn test_filter_preserves_low_modes() {
    let session = Session::init(40, 0.0, 1.0).unwrap();
    let original = sample(&session, |x| (2.0 * x).cos());
    let mut v = original.clone();
    session.filter(&mut v).unwrap();

    for (a, b) in original.iter().zip(&v) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }
}

#[test]
fn test_filter_damps_step() {
    // Top quartile of a discontinuous signal must not grow
    let n = 24;
    let session = Session::init(n, -1.0, 1.0).unwrap();
    let original = sample(&session, |x| if x > 0.0 { 1.0 } else { -1.0 });
    let before = coefficients(&session, &original);

    let mut v = original.clone();
    session.filter(&mut v).unwrap();
    let after = coefficients(&session, &v);

    for k in (3 * n / 4)..n {
        assert!(after[k].abs() <= before[k].abs() + 1e-12);
    }
    // Top mode is essentially gone
    assert!(after[n - 1].abs() < 1e-13);
}

#[test]
fn test_second_filter_damps_further() {
    let n = 20;
    let session = Session::init(n, 0.0, 1.0).unwrap();
    let mut v: Vec<f64> = (0..n).map(|i| ((i * i) as f64).sin()).collect();

    session.filter(&mut v).unwrap();
    let once = coefficients(&session, &v);
    session.filter(&mut v).unwrap();
    let twice = coefficients(&session, &v);

    for k in (3 * n / 4)..n {
        assert!(twice[k].abs() <= once[k].abs() + 1e-12);
    }
}

#[test]
fn test_zero_strength_filter_is_identity() {
    let config = GridConfig::new(12, 0.0, 1.0)
        .unwrap()
        .with_filter(FilterConfig::new(0.0, 10.0).unwrap());
    let session = Session::new(config).unwrap();
    let original = sample(&session, |x| 1.0 / (1.0 + 25.0 * x * x));
    let mut v = original.clone();
    session.filter(&mut v).unwrap();

    for (a, b) in original.iter().zip(&v) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-13);
    }
}

#[test]
fn test_point_ordering_and_symmetry() {
    let session = Session::init(11, 2.0, 7.0).unwrap();
    let n = session.n();

    assert_eq!(session.pt(0).unwrap(), 7.0);
    assert_eq!(session.pt(n - 1).unwrap(), 2.0);
    for i in 0..n - 1 {
        assert!(session.pt(i).unwrap() > session.pt(i + 1).unwrap());
    }
    for i in 0..n {
        let mirrored = 9.0 - session.pt(n - 1 - i).unwrap();
        assert_abs_diff_eq!(session.pt(i).unwrap(), mirrored, epsilon = 1e-13);
    }
    // Odd n puts the middle point exactly at the midpoint
    assert_abs_diff_eq!(session.pt(5).unwrap(), 4.5, epsilon = 1e-14);
}

#[test]
fn test_pt_out_of_range() {
    let session = Session::init(4, 0.0, 1.0).unwrap();
    assert_eq!(
        session.pt(4),
        Err(ChebError::IndexOutOfRange { index: 4, n: 4 })
    );
}

#[test]
fn test_invalid_configurations() {
    assert!(matches!(Session::init(0, 0.0, 1.0), Err(ChebError::InvalidConfiguration(_))));
    assert!(matches!(Session::init(1, 0.0, 1.0), Err(ChebError::InvalidConfiguration(_))));
    assert!(matches!(Session::init(8, 1.0, 0.0), Err(ChebError::InvalidConfiguration(_))));
    assert!(matches!(Session::init(8, 0.0, f64::INFINITY), Err(ChebError::InvalidConfiguration(_))));
}

#[test]
fn test_convenience_functions() {
    let session = Session::init(9, -1.0, 2.0).unwrap();
    let v = sample(&session, |x| x * x * x);

    let dv = derivative(&v, -1.0, 2.0).unwrap();
    for (x, d) in session.points().iter().zip(&dv) {
        assert_abs_diff_eq!(*d, 3.0 * x * x, epsilon = 1e-11);
    }

    let smoothed = smooth(&v).unwrap();
    assert_eq!(smoothed.len(), v.len());
    assert!(matches!(smooth(&[1.0]), Err(ChebError::InvalidConfiguration(_))));
}

#[test]
fn test_shared_across_threads() {
    let session = Session::init(64, 0.0, 1.0).unwrap();
    let v = sample(&session, |x| (5.0 * x).sin());
    let expected = session.derivative(&v).unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..20 {
                    let dv = session.derivative(&v).unwrap();
                    assert_eq!(dv, expected);
                }
            });
        }
    });
}

#[test]
fn test_extreme_values_stay_finite() {
    let session = Session::init(8, 0.0, 1.0).unwrap();
    let v = vec![1e-10, 1e10, -1e10, 1e-10, 0.0, f64::MIN_POSITIVE, 1e150, -1e150];
    let dv = session.derivative(&v).unwrap();
    let mut filtered = v.clone();
    session.filter(&mut filtered).unwrap();

    for value in dv.iter().chain(&filtered) {
        assert!(value.is_finite(), "Got non-finite value: {}", value);
    }
}

proptest! {
    #[test]
    fn prop_round_trip(values in prop::collection::vec(-1e3f64..1e3, 2..64)) {
        let session = Session::init(values.len(), -1.0, 1.0).unwrap();
        let mut coeffs = vec![0.0; values.len()];
        let mut back = vec![0.0; values.len()];
        session.transform().forward(&values, &mut coeffs).unwrap();
        session.transform().inverse(&coeffs, &mut back).unwrap();

        let scale = values.iter().fold(1.0f64, |m, v| m.max(v.abs()));
        for (a, b) in values.iter().zip(&back) {
            prop_assert!((a - b).abs() <= 1e-10 * scale);
        }
    }

    #[test]
    fn prop_filter_never_grows_coefficients(values in prop::collection::vec(-10.0f64..10.0, 2..48)) {
        let n = values.len();
        let session = Session::init(n, 0.0, 3.0).unwrap();
        let before = coefficients(&session, &values);

        let mut v = values.clone();
        session.filter(&mut v).unwrap();
        let after = coefficients(&session, &v);

        for k in 0..n {
            prop_assert!(after[k].abs() <= before[k].abs() + 1e-11);
        }
    }

    #[test]
    fn prop_constant_has_zero_derivative(n in 2usize..40, c in -100.0f64..100.0) {
        let session = Session::init(n, -3.0, 5.0).unwrap();
        let dv = session.derivative(&vec![c; n]).unwrap();
        for d in dv {
            prop_assert!(d.abs() <= 1e-10 * (1.0 + c.abs()));
        }
    }
}
