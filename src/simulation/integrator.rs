//! Fixed-step time integration.
//!
//! Semi-implicit Euler: each body's velocity is kicked by its
//! net force first, then its position drifts with the new velocity. One force
//! evaluation per step, supplied by the caller.

use super::states::{NVec3, System};

/// Advance every body in `sys` by `dt` under `net[i]`, and advance `sys.t`.
///
/// `net` must hold one entry per body, in body order.
pub fn euler_step(sys: &mut System, net: &[NVec3], dt: f64) {
    debug_assert_eq!(sys.bodies.len(), net.len());

    // v_n+1 = v_n + dt * F_n / m
    // x_n+1 = x_n + dt * v_n+1
    for (b, f) in sys.bodies.iter_mut().zip(net.iter()) {
        b.integrate(f, dt);
    }

    sys.t += dt;
}
