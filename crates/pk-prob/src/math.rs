//! Small numeric utilities used across probability code.

/// `ln(sqrt(2π))`, the normalizing term of Gaussian-type log-densities.
pub const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

/// Euler–Mascheroni constant.
pub const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Complementary error function `erfc(x) = 1 - erf(x)`.
///
/// Relative error of the statrs implementation is around `1e-10`.
#[inline]
pub fn erfc(x: f64) -> f64 {
    statrs::function::erf::erfc(x)
}

/// Error function.
#[inline]
pub fn erf(x: f64) -> f64 {
    statrs::function::erf::erf(x)
}

/// Inverse of [`erfc`] on `[0, 2]`.
///
/// Endpoints map to the infinities exactly; inputs outside `[0, 2]` give NaN.
#[inline]
pub fn erfc_inv(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=2.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::INFINITY;
    }
    if p == 2.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return 0.0;
    }
    statrs::function::erf::erfc_inv(p)
}
