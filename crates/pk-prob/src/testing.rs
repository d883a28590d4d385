//! Assertion helpers for checking bijector implementations.
//!
//! These panic on failure and are meant to be called from tests.

use std::fmt::Display;

use ndarray::ArrayD;

use crate::transforms::Bijector;

#[track_caller]
fn ok<T, E: Display>(r: Result<T, E>, what: &str) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("{} failed: {}", what, e),
    }
}

/// `|actual - expected| <= atol + rtol * |expected|` elementwise, with equal shapes.
///
/// Equal infinities compare as close.
#[track_caller]
pub fn assert_all_close(actual: &ArrayD<f64>, expected: &ArrayD<f64>, rtol: f64, atol: f64) {
    assert_eq!(
        actual.shape(),
        expected.shape(),
        "shape mismatch: {:?} vs {:?}",
        actual.shape(),
        expected.shape()
    );
    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        if a == e {
            continue;
        }
        let diff = (a - e).abs();
        assert!(
            diff <= atol + rtol * e.abs(),
            "not close at flat index {}: actual={}, expected={}, diff={}, rtol={}, atol={}",
            i,
            a,
            e,
            diff,
            rtol,
            atol
        );
    }
}

#[track_caller]
fn assert_finite(a: &ArrayD<f64>, what: &str) {
    if let Some(v) = a.iter().find(|v| !v.is_finite()) {
        panic!("{} produced a non-finite value: {}", what, v);
    }
}

/// Check that `bijector` is bijective on the points `x` and `y` and that every
/// operation is finite there.
///
/// Verifies `inverse(forward(x)) ≈ x`, `forward(inverse(y)) ≈ y`,
/// `fldj(x) ≈ -ildj(forward(x))` and `ildj(y) ≈ -fldj(inverse(y))`.
#[track_caller]
pub fn assert_bijective_and_finite<B: Bijector + ?Sized>(
    bijector: &B,
    x: &ArrayD<f64>,
    y: &ArrayD<f64>,
    event_ndims: usize,
    rtol: f64,
) {
    let f_x = ok(bijector.forward(x), "forward(x)");
    let g_y = ok(bijector.inverse(y), "inverse(y)");
    assert_finite(&f_x, "forward(x)");
    assert_finite(&g_y, "inverse(y)");

    let fldj_x = ok(bijector.forward_log_det_jacobian(x, event_ndims), "fldj(x)");
    let ildj_y = ok(bijector.inverse_log_det_jacobian(y, event_ndims), "ildj(y)");
    let fldj_g_y = ok(bijector.forward_log_det_jacobian(&g_y, event_ndims), "fldj(inverse(y))");
    let ildj_f_x = ok(bijector.inverse_log_det_jacobian(&f_x, event_ndims), "ildj(forward(x))");
    assert_finite(&fldj_x, "fldj(x)");
    assert_finite(&ildj_y, "ildj(y)");
    assert_finite(&fldj_g_y, "fldj(inverse(y))");
    assert_finite(&ildj_f_x, "ildj(forward(x))");

    let x_back = ok(bijector.inverse(&f_x), "inverse(forward(x))");
    let y_back = ok(bijector.forward(&g_y), "forward(inverse(y))");
    assert_all_close(&x_back, x, rtol, 0.0);
    assert_all_close(&y_back, y, rtol, 0.0);

    assert_all_close(&fldj_x, &ildj_f_x.mapv(|v| -v), rtol, 0.0);
    assert_all_close(&ildj_y, &fldj_g_y.mapv(|v| -v), rtol, 0.0);
}

/// Check a scalar bijector for self-consistency on `[lower_x, upper_x]`.
///
/// With `n` midpoints of the interval and its image `[lower_y, upper_y]`:
/// - `forward` is strictly monotone in the direction `is_increasing` states
/// - `inverse(forward(x)) ≈ x` and `forward(inverse(y)) ≈ y`, relative to `max(|x|, 1)`
/// - `∫ exp(fldj) dx ≈ upper_y - lower_y` and `∫ exp(ildj) dy ≈ upper_x - lower_x`
/// - `exp(fldj(x))` matches a centered finite difference of `forward`
/// - `exp(fldj(x)) * exp(ildj(forward(x))) ≈ 1`
#[track_caller]
pub fn assert_scalar_congruency<B: Bijector + ?Sized>(
    bijector: &B,
    lower_x: f64,
    upper_x: f64,
    n: usize,
    rtol: f64,
) {
    assert!(lower_x < upper_x, "need lower_x < upper_x, got [{}, {}]", lower_x, upper_x);
    assert!(n > 0, "need at least one evaluation point");

    let fwd = |x: f64| ok(bijector.forward_scalar(x), "forward");
    let inv = |y: f64| ok(bijector.inverse_scalar(y), "inverse");
    let fldj = |x: f64| ok(bijector.forward_log_det_jacobian_scalar(x), "fldj");
    let ildj = |y: f64| ok(bijector.inverse_log_det_jacobian_scalar(y), "ildj");

    let increasing = ok(bijector.is_increasing(), "is_increasing");
    let ten: Vec<f64> = (0..10).map(|i| lower_x + (upper_x - lower_x) * i as f64 / 9.0).collect();
    for w in ten.windows(2) {
        let (a, b) = (fwd(w[0]), fwd(w[1]));
        let ordered = if increasing { a < b } else { a > b };
        assert!(ordered, "forward not monotone between x={} (y={}) and x={} (y={})", w[0], a, w[1], b);
    }

    let y_a = fwd(lower_x);
    let y_b = fwd(upper_x);
    let (lower_y, upper_y) = if y_a < y_b { (y_a, y_b) } else { (y_b, y_a) };

    let hx = (upper_x - lower_x) / n as f64;
    let hy = (upper_y - lower_y) / n as f64;
    let mut measure_dy_dx = 0.0;
    let mut measure_dx_dy = 0.0;
    for i in 0..n {
        let x = lower_x + (i as f64 + 0.5) * hx;
        let y = lower_y + (i as f64 + 0.5) * hy;

        let x_back = inv(fwd(x));
        assert!(
            (x_back - x).abs() <= rtol * x.abs().max(1.0),
            "inverse(forward(x)) != x: x={}, got {}",
            x,
            x_back
        );
        let y_back = fwd(inv(y));
        assert!(
            (y_back - y).abs() <= rtol * y.abs().max(1.0),
            "forward(inverse(y)) != y: y={}, got {}",
            y,
            y_back
        );

        let dy_dx = fldj(x).exp();
        let dx_dy = ildj(y).exp();
        measure_dy_dx += dy_dx * hx;
        measure_dx_dy += dx_dy * hy;

        let product = dy_dx * ildj(fwd(x)).exp();
        assert!(
            (product - 1.0).abs() <= rtol,
            "dy/dx and dx/dy are not reciprocal at x={}: product={}",
            x,
            product
        );

        let h = 1e-5 * (upper_x - lower_x);
        let fd = (fwd(x + h) - fwd(x - h)).abs() / (2.0 * h);
        assert!(
            (fd - dy_dx).abs() <= rtol * dy_dx,
            "exp(fldj) does not match finite difference at x={}: {} vs {}",
            x,
            dy_dx,
            fd
        );
    }

    let dy = upper_y - lower_y;
    let dx = upper_x - lower_x;
    assert!(
        (measure_dy_dx - dy).abs() <= rtol * dy,
        "change of measure dy/dx: integral={}, expected={}",
        measure_dy_dx,
        dy
    );
    assert!(
        (measure_dx_dy - dx).abs() <= rtol * dx,
        "change of measure dx/dy: integral={}, expected={}",
        measure_dx_dy,
        dx
    );
}
