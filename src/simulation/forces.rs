//! Force contributors for the engine
//!
//! Defines the `Force` trait and direct Newtonian gravity. Thrust is not a
//! term here: it depends on the tick's controls and burns fuel, so the
//! engine adds it to the craft's slot after the terms have run.

use rand::RngCore;

use super::states::{NVec3, System};

/// Collection of force terms (gravity, drag, etc.)
/// Each term implements [`Force`] and their contributions are summed
/// into a single net force per body
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute net forces for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_forces(&self, sys: &mut System, rng: &mut dyn RngCore, out: &mut [NVec3]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec3::zeros();
        }
        for term in &self.terms {
            term.force(sys, rng, out);
        }
    }
}

/// A source of force. Implementations add their contribution into `out[i]`.
///
/// `sys` is mutable because a term may have to nudge bodies out of a
/// degenerate configuration before it can evaluate them.
pub trait Force {
    fn force(&self, sys: &mut System, rng: &mut dyn RngCore, out: &mut [NVec3]);
}

/// Direct O(n^2) Newtonian gravity, no softening.
/// Coincident pairs are handled by [`crate::simulation::states::Body::gravitational_force`].
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
}

impl Force for NewtonianGravity {
    fn force(&self, sys: &mut System, rng: &mut dyn RngCore, out: &mut [NVec3]) {
        let n = sys.bodies.len();

        // Each unordered pair (i, j), i < j, once
        for j in 1..n {
            let (head, tail) = sys.bodies.split_at_mut(j);
            let bj = &mut tail[0];
            for (i, bi) in head.iter().enumerate() {
                // force on i, pointing towards j; j feels the opposite
                let f = bi.gravitational_force(bj, self.G, &mut *rng);
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}
