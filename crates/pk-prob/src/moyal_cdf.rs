//! Moyal CDF bijector: `(-inf, inf) -> (0, 1)`.
//!
//! With `z = (x - loc) / scale`:
//! - forward: `y = erfc(exp(-z/2) / sqrt(2))`, the Moyal CDF
//! - inverse: `x = loc - scale * ln(2 * erfcinv(y)^2)`
//! - `log|dy/dx|` is the Moyal log-density at `x`
//!
//! `scale` must be positive. With `validate_args`, a constant scale is
//! checked at construction and a [`Variable`] scale at every operation.

use pk_core::{Error, Result};
use serde::Deserialize;

use crate::math::{LN_SQRT_2PI, erfc_inv};
use crate::moyal::{standard_cdf, standard_logpdf, standard_quantile};
use crate::parameter::{Parameter, Variable};
use crate::transforms::{Bijector, ScalarTransform};

/// Default bijector name.
pub const DEFAULT_NAME: &str = "moyal_cdf";

const SCALE_MUST_BE_POSITIVE: &str = "Argument `scale` must be positive.";

fn default_validate_args() -> bool {
    true
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

/// Construction parameters for [`MoyalCdf`], deserializable from JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoyalCdfConfig {
    /// Location.
    pub loc: f64,
    /// Scale, `> 0`.
    pub scale: f64,
    /// Check parameters and inverse inputs.
    #[serde(default = "default_validate_args")]
    pub validate_args: bool,
    /// Bijector name.
    #[serde(default = "default_name")]
    pub name: String,
}

impl Default for MoyalCdfConfig {
    fn default() -> Self {
        Self { loc: 0.0, scale: 1.0, validate_args: true, name: default_name() }
    }
}

impl MoyalCdfConfig {
    /// Parse a config from JSON, e.g. `{"loc": 0.3, "scale": 5.0}`.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Moyal CDF bijector.
#[derive(Debug, Clone)]
pub struct MoyalCdf {
    loc: Parameter,
    scale: Parameter,
    validate_args: bool,
    name: String,
}

impl MoyalCdf {
    /// Create a new Moyal CDF bijector.
    ///
    /// Fails when `validate_args` is set and a constant `scale` is not positive.
    pub fn new(
        loc: impl Into<Parameter>,
        scale: impl Into<Parameter>,
        validate_args: bool,
    ) -> Result<Self> {
        let b = Self { loc: loc.into(), scale: scale.into(), validate_args, name: default_name() };
        if validate_args && !b.scale.is_variable() {
            check_scale(b.scale.value())?;
        }
        tracing::debug!(
            loc = b.loc.value(),
            scale = b.scale.value(),
            variable_loc = b.loc.is_variable(),
            variable_scale = b.scale.is_variable(),
            validate_args,
            "moyal_cdf bijector created"
        );
        Ok(b)
    }

    /// Build from a [`MoyalCdfConfig`].
    pub fn from_config(config: &MoyalCdfConfig) -> Result<Self> {
        Ok(Self::new(config.loc, config.scale, config.validate_args)?.with_name(&config.name))
    }

    /// Replace the bijector name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Location parameter.
    pub fn loc(&self) -> &Parameter {
        &self.loc
    }

    /// Scale parameter.
    pub fn scale(&self) -> &Parameter {
        &self.scale
    }

    /// True if `scale` is the given variable.
    pub fn scale_is(&self, v: &Variable) -> bool {
        self.scale.as_variable().is_some_and(|s| s.ptr_eq(v))
    }

    /// Whether runtime validation is enabled.
    pub fn validate_args(&self) -> bool {
        self.validate_args
    }
}

fn check_scale(scale: f64) -> Result<()> {
    if scale > 0.0 {
        Ok(())
    } else {
        tracing::debug!(scale, "moyal_cdf rejected scale");
        Err(Error::InvalidArgument(SCALE_MUST_BE_POSITIVE.to_string()))
    }
}

/// [`MoyalCdf`] with parameters resolved for a single operation.
#[derive(Debug, Clone, Copy)]
pub struct MoyalCdfKernel {
    loc: f64,
    scale: f64,
    validate_args: bool,
}

impl MoyalCdfKernel {
    /// Resolved location.
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Resolved scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl ScalarTransform for MoyalCdfKernel {
    #[inline]
    fn forward(&self, x: f64) -> f64 {
        standard_cdf((x - self.loc) / self.scale)
    }

    #[inline]
    fn inverse(&self, y: f64) -> f64 {
        self.loc + self.scale * standard_quantile(y)
    }

    #[inline]
    fn forward_log_det_jacobian(&self, x: f64) -> f64 {
        standard_logpdf((x - self.loc) / self.scale) - self.scale.ln()
    }

    #[inline]
    fn inverse_log_det_jacobian(&self, y: f64) -> f64 {
        // With t = erfcinv(y): exp(-z) = 2t^2, so log|dy/dx| = ln(2t^2)/2 - t^2 - ln(scale) - ln(sqrt(2π)).
        let t2 = {
            let t = erfc_inv(y);
            t * t
        };
        // y = 0 maps to x = -inf, where the density vanishes.
        if t2 == f64::INFINITY {
            return f64::INFINITY;
        }
        t2 - 0.5 * (2.0 * t2).ln() + self.scale.ln() + LN_SQRT_2PI
    }

    fn check_inverse_input(&self, y: f64) -> Result<()> {
        if !self.validate_args {
            return Ok(());
        }
        if y.is_nan() || y < 0.0 {
            return Err(Error::InvalidArgument(
                "Inverse transformation input must be greater than or equal to 0.".to_string(),
            ));
        }
        if y > 1.0 {
            return Err(Error::InvalidArgument(
                "Inverse transformation input must be less than or equal to 1.".to_string(),
            ));
        }
        Ok(())
    }
}

impl Bijector for MoyalCdf {
    type Kernel = MoyalCdfKernel;

    fn name(&self) -> &str {
        &self.name
    }

    fn kernel(&self) -> Result<MoyalCdfKernel> {
        let scale = self.scale.value();
        if self.validate_args {
            check_scale(scale)?;
        }
        Ok(MoyalCdfKernel { loc: self.loc.value(), scale, validate_args: self.validate_args })
    }

    fn is_increasing(&self) -> Result<bool> {
        self.kernel()?;
        Ok(true)
    }
}
