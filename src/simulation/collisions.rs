//! Collision response between two touching bodies.
//!
//! Elastic pairs bounce along their line of centres; any pairing with an
//! inelastic body merges. Velocities use effective masses throughout.

use rand::Rng;

use super::states::{Body, CollisionType, NVec3};
use super::vector::normalize_or_random;

/// What the collision pass should do with a touching pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Both bodies stay; velocities are exchanged along the line of centres.
    Bounce,
    /// The first body absorbs the second, which leaves the system.
    Merge,
}

/// Outcome for the ordered pair `(a, b)`.
///
/// Only Elastic/Elastic bounces. Elastic/Inelastic, Inelastic/Elastic and
/// Inelastic/Inelastic all merge with `a` as the survivor.
pub fn outcome(a: CollisionType, b: CollisionType) -> CollisionOutcome {
    match (a, b) {
        (CollisionType::Elastic, CollisionType::Elastic) => CollisionOutcome::Bounce,
        _ => CollisionOutcome::Merge,
    }
}

/// Elastic collision of two spheres, updating both velocities in place.
///
/// v_a' = v_a - 2 m_b / (m_a + m_b) * <v_a - v_b, n> n
/// v_b' = v_b - 2 m_a / (m_a + m_b) * <v_b - v_a, -n> (-n)
///
/// where `n` is the unit separation from `a` to `b`.
pub fn elastic_collision<R: Rng + ?Sized>(a: &mut Body, b: &mut Body, rng: &mut R) {
    let (ma, mb) = (a.mass(), b.mass());
    let total = ma + mb;
    let dv = a.v - b.v;
    let n = normalize_or_random(&a.separation_vector(b, rng), rng);

    let va = a.v - n * (2.0 * mb / total * dv.dot(&n));
    let vb = b.v - (-n) * (2.0 * ma / total * (-dv).dot(&(-n)));

    a.v = va;
    b.v = vb;
}

/// Velocity of the body formed by merging `a` and `b` (momentum conserved).
pub fn inelastic_velocity(a: &Body, b: &Body) -> NVec3 {
    let (ma, mb) = (a.mass(), b.mass());
    (a.v * ma + b.v * mb) / (ma + mb)
}
