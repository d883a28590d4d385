//! Probability building blocks for pk.
//!
//! This crate hosts the Moyal distribution and the Moyal CDF bijector:
//! - distribution functions (logpdf/cdf/quantile/etc.)
//! - the [`Bijector`](transforms::Bijector) trait and [`MoyalCdf`](moyal_cdf::MoyalCdf)
//! - runtime-mutable parameters
//! - assertion helpers for bijector tests

pub mod math;
pub mod moyal;
pub mod moyal_cdf;
pub mod parameter;
pub mod testing;
pub mod transforms;

pub use moyal_cdf::{MoyalCdf, MoyalCdfConfig};
pub use parameter::{Parameter, Variable};
pub use transforms::{Bijector, ScalarTransform};
