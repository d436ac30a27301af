//! 3D vector helpers on top of nalgebra.
//!
//! `NVec3` already gives add/sub/scale/dot/cross/norm. What lives here is the
//! part nalgebra leaves to the caller: refusing to normalize the zero vector,
//! and the random unit vectors used to break exact-zero separations.

use std::f64::consts::PI;

use nalgebra::{Rotation3, Unit, Vector3};
use rand::Rng;

use crate::error::SimError;

pub type NVec3 = Vector3<f64>;

/// Unit vector along `v`, or `DivideByZero` when `v` is exactly zero.
pub fn normalize(v: &NVec3) -> Result<NVec3, SimError> {
    v.try_normalize(0.0).ok_or(SimError::DivideByZero)
}

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> NVec3 {
    // Archimedes: z uniform in [-1, 1] and azimuth uniform gives a uniform sphere
    let z: f64 = rng.gen_range(-1.0..=1.0);
    let phi: f64 = rng.gen_range(0.0..2.0 * PI);
    let rho = (1.0 - z * z).max(0.0).sqrt();
    NVec3::new(rho * phi.cos(), rho * phi.sin(), z)
}

/// Like [`normalize`], but a zero vector yields a random unit vector instead of an error.
pub fn normalize_or_random<R: Rng + ?Sized>(v: &NVec3, rng: &mut R) -> NVec3 {
    normalize(v).unwrap_or_else(|_| random_unit(rng))
}

/// Rotate `v` by `angle` radians about `axis` (right-handed).
/// A zero axis leaves `v` unchanged.
pub fn rotate(v: &NVec3, angle: f64, axis: &NVec3) -> NVec3 {
    match Unit::try_new(*axis, 0.0) {
        Some(axis) => Rotation3::from_axis_angle(&axis, angle) * v,
        None => *v,
    }
}
