//! Bijective transforms (bijectors) over arrays.
//!
//! A bijector maps `x` to `y = f(x)` elementwise and reports the log absolute
//! determinant of the Jacobian needed for change-of-variables densities.
//!
//! Parameters may be runtime [`Variable`](crate::parameter::Variable)s, so
//! every array operation first resolves a [`ScalarTransform`] kernel (reading
//! and validating the parameters once) and then maps it over the input.

use ndarray::{ArrayD, Axis};
use pk_core::{Error, Result};

/// Scalar kernel of an elementwise bijector with resolved, validated parameters.
pub trait ScalarTransform {
    /// `y = f(x)`
    fn forward(&self, x: f64) -> f64;
    /// `x = f^{-1}(y)`
    fn inverse(&self, y: f64) -> f64;
    /// `log|dy/dx|` at `x`
    fn forward_log_det_jacobian(&self, x: f64) -> f64;

    /// `log|dx/dy|` at `y`.
    fn inverse_log_det_jacobian(&self, y: f64) -> f64 {
        -self.forward_log_det_jacobian(self.inverse(y))
    }

    /// Reject inputs outside the image of `forward`.
    fn check_inverse_input(&self, _y: f64) -> Result<()> {
        Ok(())
    }
}

/// An elementwise bijector.
pub trait Bijector: Send + Sync {
    /// Kernel produced by [`Bijector::kernel`].
    type Kernel: ScalarTransform;

    /// Bijector name.
    fn name(&self) -> &str;

    /// Read the current parameter values and validate them.
    fn kernel(&self) -> Result<Self::Kernel>;

    /// Whether `forward` is increasing.
    fn is_increasing(&self) -> Result<bool>;

    /// Smallest `event_ndims` accepted by the log-det-Jacobian methods.
    fn forward_min_event_ndims(&self) -> usize {
        0
    }

    /// Elementwise `y = f(x)`.
    fn forward(&self, x: &ArrayD<f64>) -> Result<ArrayD<f64>> {
        let k = self.kernel()?;
        Ok(x.mapv(|v| k.forward(v)))
    }

    /// Elementwise `x = f^{-1}(y)`.
    fn inverse(&self, y: &ArrayD<f64>) -> Result<ArrayD<f64>> {
        let k = self.kernel()?;
        y.iter().try_for_each(|&v| k.check_inverse_input(v))?;
        Ok(y.mapv(|v| k.inverse(v)))
    }

    /// `log|det J|` of `forward` at `x`, summed over the rightmost `event_ndims` axes.
    fn forward_log_det_jacobian(&self, x: &ArrayD<f64>, event_ndims: usize) -> Result<ArrayD<f64>> {
        let k = self.kernel()?;
        reduce_event_dims(
            x.mapv(|v| k.forward_log_det_jacobian(v)),
            event_ndims,
            self.forward_min_event_ndims(),
        )
    }

    /// `log|det J|` of `inverse` at `y`, summed over the rightmost `event_ndims` axes.
    fn inverse_log_det_jacobian(&self, y: &ArrayD<f64>, event_ndims: usize) -> Result<ArrayD<f64>> {
        let k = self.kernel()?;
        y.iter().try_for_each(|&v| k.check_inverse_input(v))?;
        reduce_event_dims(
            y.mapv(|v| k.inverse_log_det_jacobian(v)),
            event_ndims,
            self.forward_min_event_ndims(),
        )
    }

    /// Scalar [`Bijector::forward`].
    fn forward_scalar(&self, x: f64) -> Result<f64> {
        Ok(self.kernel()?.forward(x))
    }

    /// Scalar [`Bijector::inverse`].
    fn inverse_scalar(&self, y: f64) -> Result<f64> {
        let k = self.kernel()?;
        k.check_inverse_input(y)?;
        Ok(k.inverse(y))
    }

    /// Scalar [`Bijector::forward_log_det_jacobian`] with `event_ndims = 0`.
    fn forward_log_det_jacobian_scalar(&self, x: f64) -> Result<f64> {
        Ok(self.kernel()?.forward_log_det_jacobian(x))
    }

    /// Scalar [`Bijector::inverse_log_det_jacobian`] with `event_ndims = 0`.
    fn inverse_log_det_jacobian_scalar(&self, y: f64) -> Result<f64> {
        let k = self.kernel()?;
        k.check_inverse_input(y)?;
        Ok(k.inverse_log_det_jacobian(y))
    }
}

/// Sum elementwise log-det-Jacobians over the rightmost `event_ndims` axes.
pub fn reduce_event_dims(
    ldj: ArrayD<f64>,
    event_ndims: usize,
    min_event_ndims: usize,
) -> Result<ArrayD<f64>> {
    if event_ndims < min_event_ndims {
        return Err(Error::Validation(format!(
            "event_ndims ({}) must be at least {}",
            event_ndims, min_event_ndims
        )));
    }
    if event_ndims > ldj.ndim() {
        return Err(Error::Validation(format!(
            "event_ndims ({}) exceeds input rank ({})",
            event_ndims,
            ldj.ndim()
        )));
    }
    let mut out = ldj;
    for _ in 0..event_ndims {
        let last = out.ndim() - 1;
        out = out.sum_axis(Axis(last));
    }
    Ok(out)
}
