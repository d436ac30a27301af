//! Error type shared by the simulation library.
//!
//! Degenerate separations are never reported here: they are healed inside
//! [`crate::simulation::body`] by drawing a random direction.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// `fire` was called with an empty magazine. Nothing changed.
    OutOfAmmo,
    /// A setter or constructor was handed a value outside its domain.
    /// The previous state is left untouched.
    InvalidParameter { name: &'static str, value: f64 },
    /// Attempted to normalize the zero vector.
    DivideByZero,
    /// A craft command was issued but the system holds no craft.
    NoCraft,
}

impl SimError {
    pub fn invalid(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter { name, value }
    }
}

impl Display for SimError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfAmmo => write!(f, "out of ammunition"),
            Self::InvalidParameter { name, value } => write!(f, "invalid value for {}: {}", name, value),
            Self::DivideByZero => write!(f, "cannot normalize the zero vector"),
            Self::NoCraft => write!(f, "no craft in the simulation"),
        }
    }
}

impl Error for SimError {}
