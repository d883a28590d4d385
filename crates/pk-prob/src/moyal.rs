//! Moyal distribution utilities.
//!
//! With `z = (x - loc) / scale`:
//! - `log p(x) = -(z + exp(-z)) / 2 - ln(scale) - ln(sqrt(2π))`
//! - `F(x) = erfc(exp(-z/2) / sqrt(2))`

use std::f64::consts::{LN_2, PI, SQRT_2};

use pk_core::{Error, Result};
use rand::Rng;

use crate::math::{EULER_GAMMA, LN_SQRT_2PI, erf, erfc, erfc_inv};

fn validate(loc: f64, scale: f64) -> Result<()> {
    if !loc.is_finite() {
        return Err(Error::Validation(format!("loc must be finite, got {}", loc)));
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::Validation(format!("scale must be finite and > 0, got {}", scale)));
    }
    Ok(())
}

/// Standard (`loc = 0`, `scale = 1`) log-density at `z`.
#[inline]
pub fn standard_logpdf(z: f64) -> f64 {
    // exp(-z) overflows first; the density vanishes in the left tail.
    if z == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    -0.5 * (z + (-z).exp()) - LN_SQRT_2PI
}

/// Standard CDF at `z`.
#[inline]
pub fn standard_cdf(z: f64) -> f64 {
    erfc((-0.5 * z).exp() / SQRT_2)
}

/// Standard quantile: `-ln(2 * erfcinv(p)^2)`. No range check on `p`.
#[inline]
pub fn standard_quantile(p: f64) -> f64 {
    let t = erfc_inv(p);
    -(2.0 * t * t).ln()
}

/// Log-PDF of `Moyal(loc, scale)` at `x`.
pub fn logpdf(x: f64, loc: f64, scale: f64) -> Result<f64> {
    validate(loc, scale)?;
    Ok(standard_logpdf((x - loc) / scale) - scale.ln())
}

/// PDF of `Moyal(loc, scale)` at `x`.
pub fn pdf(x: f64, loc: f64, scale: f64) -> Result<f64> {
    Ok(logpdf(x, loc, scale)?.exp())
}

/// CDF of `Moyal(loc, scale)` at `x`.
pub fn cdf(x: f64, loc: f64, scale: f64) -> Result<f64> {
    validate(loc, scale)?;
    Ok(standard_cdf((x - loc) / scale))
}

/// Survival function `1 - F(x)`, without the cancellation of the naive form.
pub fn sf(x: f64, loc: f64, scale: f64) -> Result<f64> {
    validate(loc, scale)?;
    let z = (x - loc) / scale;
    Ok(erf((-0.5 * z).exp() / SQRT_2))
}

/// Quantile function (inverse CDF) for `p` in `[0, 1]`.
///
/// `quantile(0) = -inf`, `quantile(1) = +inf`.
pub fn quantile(p: f64, loc: f64, scale: f64) -> Result<f64> {
    validate(loc, scale)?;
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::Validation(format!("p must be in [0, 1], got {}", p)));
    }
    Ok(loc + scale * standard_quantile(p))
}

/// Mean: `loc + scale * (γ + ln 2)`.
pub fn mean(loc: f64, scale: f64) -> Result<f64> {
    validate(loc, scale)?;
    Ok(loc + scale * (EULER_GAMMA + LN_2))
}

/// Variance: `π² scale² / 2`.
pub fn variance(loc: f64, scale: f64) -> Result<f64> {
    validate(loc, scale)?;
    Ok(0.5 * PI * PI * scale * scale)
}

/// Draw one sample by inverting the CDF at a uniform variate.
pub fn sample<R: Rng>(rng: &mut R, loc: f64, scale: f64) -> Result<f64> {
    validate(loc, scale)?;
    // `random::<f64>()` is in [0, 1); zero would map to -inf.
    let u = loop {
        let u: f64 = rng.random();
        if u > 0.0 {
            break u;
        }
    };
    quantile(u, loc, scale)
}
