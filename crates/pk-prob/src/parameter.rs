//! Bijector parameters: fixed constants or shared, externally mutable variables.
//!
//! A [`Variable`] is a handle to a shared cell. Cloning the handle shares the
//! cell, so a bijector built from a variable observes every later
//! [`Variable::assign`] made through any other handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared mutable scalar.
#[derive(Debug, Clone)]
pub struct Variable {
    bits: Arc<AtomicU64>,
}

impl Variable {
    /// Create a new variable holding `value`.
    pub fn new(value: f64) -> Self {
        Self { bits: Arc::new(AtomicU64::new(value.to_bits())) }
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Overwrite the value seen by every handle.
    pub fn assign(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }

    /// True if both handles refer to the same underlying cell.
    pub fn ptr_eq(&self, other: &Variable) -> bool {
        Arc::ptr_eq(&self.bits, &other.bits)
    }
}

/// A scalar bijector parameter.
#[derive(Debug, Clone)]
pub enum Parameter {
    /// Fixed at construction.
    Constant(f64),
    /// Read at every use.
    Variable(Variable),
}

impl Parameter {
    /// Current value.
    #[inline]
    pub fn value(&self) -> f64 {
        match self {
            Parameter::Constant(v) => *v,
            Parameter::Variable(v) => v.get(),
        }
    }

    /// True for [`Parameter::Variable`].
    pub fn is_variable(&self) -> bool {
        matches!(self, Parameter::Variable(_))
    }

    /// The underlying variable handle, if any.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Parameter::Constant(_) => None,
            Parameter::Variable(v) => Some(v),
        }
    }
}

impl From<f64> for Parameter {
    fn from(v: f64) -> Self {
        Parameter::Constant(v)
    }
}

impl From<Variable> for Parameter {
    fn from(v: Variable) -> Self {
        Parameter::Variable(v)
    }
}

impl From<&Variable> for Parameter {
    fn from(v: &Variable) -> Self {
        Parameter::Variable(v.clone())
    }
}
