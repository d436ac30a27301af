use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use shipsim::simulation::collisions::{elastic_collision, inelastic_velocity, outcome, CollisionOutcome};
use shipsim::simulation::vector::{normalize, random_unit, rotate};
use shipsim::{
    collision_pass, Body, BodyKind, CollisionType, CraftState, ForceSet, NVec3, NewtonianGravity, ProjectileSpec,
    SimError, System,
};

/// Seeded source for the degeneracy-breaking draws
pub fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

/// Plain body helper
pub fn body(x: [f64; 3], v: [f64; 3], m: f64, radius: f64, collision: CollisionType) -> Body {
    Body::new(
        BodyKind::Planet,
        NVec3::new(x[0], x[1], x[2]),
        NVec3::new(v[0], v[1], v[2]),
        m,
        radius,
        collision,
    )
    .unwrap()
}

/// Build a simple 2-body System separated along x-axis
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    System::new(vec![
        body([-dist / 2.0, 0.0, 0.0], [0.0; 3], m1, 0.0, CollisionType::Elastic),
        body([dist / 2.0, 0.0, 0.0], [0.0; 3], m2, 0.0, CollisionType::Elastic),
    ])
}

pub fn gravity_set(g: f64) -> ForceSet {
    ForceSet::new().with(NewtonianGravity { G: g })
}

/// Craft at `x` pointing down -z with the given tank and magazine
pub fn craft(x: [f64; 3], v: [f64; 3], dry: f64, fuel: f64, ammo: u32) -> Body {
    let state = CraftState::new(-NVec3::z(), fuel, ammo, 3000.0).unwrap();
    Body::new_craft(NVec3::new(x[0], x[1], x[2]), NVec3::new(v[0], v[1], v[2]), dry, 50.0, state).unwrap()
}

// ==================================================================================
// Vector tests
// ==================================================================================

#[test]
fn normalize_zero_vector_fails() {
    assert_eq!(normalize(&NVec3::zeros()), Err(SimError::DivideByZero));
    assert_relative_eq!(normalize(&NVec3::new(0.0, 3.0, 4.0)).unwrap(), NVec3::new(0.0, 0.6, 0.8));
}

#[test]
fn random_unit_vectors_have_unit_length() {
    let mut rng = rng();
    for _ in 0..100 {
        assert_relative_eq!(random_unit(&mut rng).norm(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn rotate_quarter_turn_about_z() {
    let v = rotate(&NVec3::x(), std::f64::consts::FRAC_PI_2, &NVec3::z());
    assert_abs_diff_eq!(v, NVec3::y(), epsilon = 1e-12);
}

// ==================================================================================
// Body tests
// ==================================================================================

#[test]
fn construction_rejects_bad_mass_and_radius() {
    let bad_mass = Body::new(BodyKind::Planet, NVec3::zeros(), NVec3::zeros(), 0.0, 1.0, CollisionType::Elastic);
    assert!(matches!(bad_mass, Err(SimError::InvalidParameter { name: "mass", .. })));

    let bad_radius = Body::new(BodyKind::Planet, NVec3::zeros(), NVec3::zeros(), 1.0, -1.0, CollisionType::Elastic);
    assert!(matches!(bad_radius, Err(SimError::InvalidParameter { name: "radius", .. })));
}

#[test]
fn setters_leave_state_unchanged_on_rejection() {
    let mut b = body([0.0; 3], [0.0; 3], 5.0, 2.0, CollisionType::Elastic);

    assert!(b.set_mass(-1.0).is_err());
    assert!(b.set_radius(-0.5).is_err());
    assert_eq!(b.mass(), 5.0);
    assert_eq!(b.radius(), 2.0);

    b.set_mass(7.0).unwrap();
    assert_eq!(b.mass(), 7.0);
}

#[test]
fn separation_vector_of_coincident_bodies_is_unit() {
    let a = body([1.0, 2.0, 3.0], [0.0; 3], 1.0, 1.0, CollisionType::Elastic);
    let b = a.clone();
    let sep = a.separation_vector(&b, &mut rng());
    assert_relative_eq!(sep.norm(), 1.0, epsilon = 1e-12);
}

#[test]
fn touching_is_strict() {
    let a = body([0.0; 3], [0.0; 3], 1.0, 1.0, CollisionType::Elastic);
    let b = body([2.0, 0.0, 0.0], [0.0; 3], 1.0, 1.0, CollisionType::Elastic);
    let c = body([1.9, 0.0, 0.0], [0.0; 3], 1.0, 1.0, CollisionType::Elastic);
    assert!(!a.is_touching(&b));
    assert!(a.is_touching(&c));
}

#[test]
fn integrate_is_semi_implicit_euler() {
    let mut b = body([1.0, -2.0, 0.5], [0.3, 0.0, -1.0], 4.0, 0.0, CollisionType::Elastic);
    let f = NVec3::new(2.0, -8.0, 1.0);
    let dt = 0.25;

    let v_expected = b.v + (f / 4.0) * dt;
    let x_expected = b.x + v_expected * dt;

    b.integrate(&f, dt);
    assert_eq!(b.v, v_expected);
    assert_eq!(b.x, x_expected);
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let mut sys = two_body_system(1.0, 2.0, 3.0);
    let forces = gravity_set(0.1);

    let mut out = vec![NVec3::zeros(); 2];
    forces.accumulate_forces(&mut sys, &mut rng(), &mut out);

    let net = out[0] + out[1];
    assert!(net.norm() < 1e-12, "Net force not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let mut sys = two_body_system(2.0, 1.0, 1.0);
    let forces = gravity_set(0.1);

    let mut out = vec![NVec3::zeros(); 2];
    forces.accumulate_forces(&mut sys, &mut rng(), &mut out);

    let dx = sys.bodies[1].x - sys.bodies[0].x;
    assert!(out[0].dot(&dx) > 0.0, "Force is not toward second body");
    assert!(out[1].dot(&dx) < 0.0, "Force is not toward first body");
}

#[test]
fn gravity_inverse_square_law() {
    let mut sys_r = two_body_system(1.0, 1.0, 1.0);
    let mut sys_2r = two_body_system(2.0, 1.0, 1.0);
    let forces = gravity_set(0.1);

    let mut f_r = vec![NVec3::zeros(); 2];
    let mut f_2r = vec![NVec3::zeros(); 2];
    forces.accumulate_forces(&mut sys_r, &mut rng(), &mut f_r);
    forces.accumulate_forces(&mut sys_2r, &mut rng(), &mut f_2r);

    assert_relative_eq!(f_r[0].norm() / f_2r[0].norm(), 4.0, epsilon = 1e-12);
    assert_relative_eq!(f_r[0].norm(), 0.1, epsilon = 1e-15);
}

#[test]
fn pairwise_gravity_is_antisymmetric() {
    let mut rng = rng();
    let mut a = body([1.0, 2.0, -3.0], [0.0; 3], 3.0, 0.0, CollisionType::Elastic);
    let mut b = body([-4.0, 0.5, 2.0], [0.0; 3], 11.0, 0.0, CollisionType::Elastic);

    let f_ab = a.gravitational_force(&mut b, 6.674e-11, &mut rng);
    let f_ba = b.gravitational_force(&mut a, 6.674e-11, &mut rng);
    assert_relative_eq!(f_ab, -f_ba, max_relative = 1e-14);
}

#[test]
fn coincident_bodies_give_finite_gravity() {
    let a = body([5.0, 5.0, 5.0], [0.0; 3], 10.0, 0.0, CollisionType::Elastic);
    let mut b = a.clone();

    let f = a.gravitational_force(&mut b, 1.0, &mut rng());

    assert!(f.iter().all(|c| c.is_finite()));
    // the second body was nudged one unit away, so |F| = G m m / 1
    assert_relative_eq!((b.x - a.x).norm(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(f.norm(), 100.0, epsilon = 1e-9);
}

// ==================================================================================
// Separation tests
// ==================================================================================

#[test]
fn separate_pushes_heavier_body_less() {
    let mut a = body([0.0; 3], [0.0; 3], 1.0, 1.0, CollisionType::Elastic);
    let mut b = body([1.0, 0.0, 0.0], [0.0; 3], 3.0, 1.0, CollisionType::Elastic);
    let (a0, b0) = (a.x, b.x);

    a.separate(&mut b, &mut rng());

    assert!(!a.is_touching(&b));
    let (da, db) = ((a.x - a0).norm(), (b.x - b0).norm());
    assert_relative_eq!(da * a.mass(), db * b.mass(), epsilon = 1e-12);
    assert_relative_eq!(da + db, 1.0, epsilon = 1e-8); // prior overlap was 2 - 1
    assert!(a.x.x < 0.0 && b.x.x > 1.0);
}

#[test]
fn separate_coincident_bodies() {
    let mut a = body([0.0; 3], [0.0; 3], 2.0, 1.5, CollisionType::Elastic);
    let mut b = a.clone();

    a.separate(&mut b, &mut rng());

    assert!(!a.is_touching(&b));
    assert_relative_eq!((b.x - a.x).norm(), 3.0, epsilon = 1e-8);
}

#[test]
fn separate_ignores_bodies_that_do_not_touch() {
    let mut a = body([0.0; 3], [0.0; 3], 1.0, 1.0, CollisionType::Elastic);
    let mut b = body([5.0, 0.0, 0.0], [0.0; 3], 1.0, 1.0, CollisionType::Elastic);
    a.separate(&mut b, &mut rng());
    assert_eq!(a.x, NVec3::zeros());
    assert_eq!(b.x, NVec3::new(5.0, 0.0, 0.0));
}

// ==================================================================================
// Collision tests
// ==================================================================================

#[test]
fn elastic_collision_conserves_momentum_and_energy() {
    let mut a = body([0.0; 3], [3.0, -1.0, 0.5], 2.0, 1.0, CollisionType::Elastic);
    let mut b = body([1.2, 0.7, -0.4], [-2.0, 0.5, 1.0], 7.0, 1.0, CollisionType::Elastic);

    let p0 = a.v * a.mass() + b.v * b.mass();
    let e0 = 0.5 * a.mass() * a.v.norm_squared() + 0.5 * b.mass() * b.v.norm_squared();

    elastic_collision(&mut a, &mut b, &mut rng());

    let p1 = a.v * a.mass() + b.v * b.mass();
    let e1 = 0.5 * a.mass() * a.v.norm_squared() + 0.5 * b.mass() * b.v.norm_squared();
    assert_relative_eq!(p0, p1, epsilon = 1e-12);
    assert_relative_eq!(e0, e1, epsilon = 1e-12);
}

#[test]
fn inelastic_velocity_is_momentum_weighted() {
    let a = body([0.0; 3], [1.0, 0.0, 0.0], 2.0, 1.0, CollisionType::Inelastic);
    let b = body([0.5, 0.0, 0.0], [-1.0, 2.0, 0.0], 6.0, 1.0, CollisionType::Inelastic);
    assert_relative_eq!(inelastic_velocity(&a, &b), NVec3::new(-0.5, 1.5, 0.0));
}

#[test]
fn any_inelastic_partner_means_merge() {
    use CollisionType::*;
    assert_eq!(outcome(Elastic, Elastic), CollisionOutcome::Bounce);
    assert_eq!(outcome(Elastic, Inelastic), CollisionOutcome::Merge);
    assert_eq!(outcome(Inelastic, Elastic), CollisionOutcome::Merge);
    assert_eq!(outcome(Inelastic, Inelastic), CollisionOutcome::Merge);
}

#[test]
fn head_on_equal_masses_swap_velocities() {
    let mut sys = System::new(vec![
        body([0.0; 3], [1.0, 0.0, 0.0], 10.0, 1.0, CollisionType::Elastic),
        body([1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], 10.0, 1.0, CollisionType::Elastic),
    ]);

    let report = collision_pass(&mut sys, &mut rng());

    assert_eq!(report.bounces, 1);
    assert_eq!(report.merges, 0);
    assert_relative_eq!(sys.bodies[0].v, NVec3::new(-1.0, 0.0, 0.0));
    assert_relative_eq!(sys.bodies[1].v, NVec3::new(1.0, 0.0, 0.0));
}

#[test]
fn merge_conserves_momentum_and_drops_one_body() {
    let mut sys = System::new(vec![
        body([0.0; 3], [1.0, 0.0, 0.0], 2.0, 1.0, CollisionType::Elastic).named("a"),
        body([0.5, 0.0, 0.0], [-1.0, 0.0, 0.0], 6.0, 1.0, CollisionType::Inelastic).named("b"),
        body([100.0, 0.0, 0.0], [0.0; 3], 1.0, 1.0, CollisionType::Elastic).named("far"),
    ]);
    let p0 = sys.momentum();

    let report = collision_pass(&mut sys, &mut rng());

    assert_eq!(report.merges, 1);
    assert_eq!(sys.bodies.len(), 2);
    assert_eq!(sys.bodies[0].name, "a");
    assert_eq!(sys.bodies[1].name, "far");
    assert_relative_eq!(sys.bodies[0].mass(), 8.0);
    assert_relative_eq!(sys.bodies[0].v, NVec3::new(-0.5, 0.0, 0.0));
    assert_relative_eq!(sys.momentum(), p0, epsilon = 1e-12);
}

#[test]
fn merge_does_not_skip_the_next_body() {
    let mut sys = System::new(vec![
        body([0.0; 3], [0.0; 3], 1.0, 1.0, CollisionType::Inelastic),
        body([0.5, 0.0, 0.0], [0.0; 3], 1.0, 1.0, CollisionType::Inelastic),
        body([-0.5, 0.0, 0.0], [0.0; 3], 1.0, 1.0, CollisionType::Inelastic),
    ]);

    let report = collision_pass(&mut sys, &mut rng());

    assert_eq!(report.merges, 2);
    assert_eq!(sys.bodies.len(), 1);
    assert_relative_eq!(sys.bodies[0].mass(), 3.0);
}

// ==================================================================================
// Craft tests
// ==================================================================================

#[test]
fn craft_basis_starts_orthonormal() {
    let c = CraftState::new(NVec3::new(0.0, 0.0, -2.0), 0.0, 0, 1.0).unwrap();
    assert_relative_eq!(c.forward(), NVec3::new(0.0, 0.0, -1.0));
    assert_relative_eq!(c.left(), NVec3::new(-1.0, 0.0, 0.0));
    assert_relative_eq!(c.up(), NVec3::new(0.0, 1.0, 0.0));

    let vertical = CraftState::new(NVec3::y(), 0.0, 0, 1.0).unwrap();
    assert_relative_eq!(vertical.left(), NVec3::new(-1.0, 0.0, 0.0));
}

#[test]
fn craft_basis_stays_orthonormal_under_rotation() {
    let mut c = CraftState::new(NVec3::new(1.0, 2.0, 3.0), 0.0, 0, 1.0).unwrap();
    for k in 0..500 {
        c.turn_left(0.37 * k as f64);
        c.turn_up(-0.11);
        c.rotate(1.3, &NVec3::new(0.2, -1.0, 0.4));
    }

    assert_relative_eq!(c.forward().norm(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(c.left().norm(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(c.forward().dot(&c.left()), 0.0, epsilon = 1e-12);
    assert_relative_eq!(c.up(), c.forward().cross(&c.left()));
}

#[test]
fn turning_follows_the_basis() {
    let mut c = CraftState::new(-NVec3::z(), 0.0, 0, 1.0).unwrap();
    c.turn_up(0.1);
    assert!(c.forward().y > 0.0, "positive pitch should raise the nose");

    let mut c = CraftState::new(-NVec3::z(), 0.0, 0, 1.0).unwrap();
    c.turn_left(0.1);
    assert!(c.forward().dot(&NVec3::new(-1.0, 0.0, 0.0)) > 0.0, "positive yaw should turn left");
}

#[test]
fn thrust_burns_rate_times_dt() {
    let mut c = CraftState::new(-NVec3::z(), 100.0, 0, 3000.0).unwrap();

    let f = c.apply_thrust(10.0, 5.0);

    assert_eq!(c.fuel(), 50.0);
    assert_relative_eq!(f.norm(), 10.0 * 3000.0);
    assert_relative_eq!(f, NVec3::new(0.0, 0.0, -30_000.0));
}

#[test]
fn thrust_never_drains_fuel_below_zero() {
    let mut c = CraftState::new(-NVec3::z(), 1.0, 0, 3000.0).unwrap();
    c.apply_thrust(10.0, 5.0);
    assert_eq!(c.fuel(), 0.0);
    c.apply_thrust(1.0e6, 1.0e6);
    assert_eq!(c.fuel(), 0.0);
}

#[test]
fn craft_effective_mass_includes_fuel() {
    let b = craft([0.0; 3], [0.0; 3], 1000.0, 250.0, 0);
    assert_eq!(b.dry_mass(), 1000.0);
    assert_eq!(b.mass(), 1250.0);
}

#[test]
fn fire_spawns_projectile_and_recoils() {
    let mut c = craft([0.0; 3], [10.0, 0.0, 0.0], 1000.0, 0.0, 2);
    let spec = ProjectileSpec {
        radius: 5.0,
        m: 10.0,
        speed: 100.0,
        collision: CollisionType::Inelastic,
        colour: Some([1.0, 0.0, 0.0]),
    };

    let p = c.fire(&spec).unwrap();

    assert_eq!(p.kind(), BodyKind::Projectile);
    assert_eq!(p.collision_type(), CollisionType::Inelastic);
    assert_eq!(p.colour, Some([1.0, 0.0, 0.0]));
    assert_relative_eq!(p.x, NVec3::new(0.0, 0.0, -110.0));
    assert_relative_eq!(p.v, NVec3::new(10.0, 0.0, -100.0));
    assert!(!p.is_touching(&c));
    assert_relative_eq!(c.v, NVec3::new(9.9, 0.0, 1.0), epsilon = 1e-12);
    assert_eq!(c.craft_state().unwrap().ammo(), 1);
}

#[test]
fn fire_with_empty_magazine_changes_nothing() {
    let mut c = craft([0.0; 3], [1.0, 2.0, 3.0], 1000.0, 10.0, 0);
    let before = c.v;

    assert_eq!(c.fire(&ProjectileSpec::default()).unwrap_err(), SimError::OutOfAmmo);
    assert_eq!(c.v, before);
    assert_eq!(c.craft_state().unwrap().ammo(), 0);
}

#[test]
fn craft_merge_adds_to_dry_mass() {
    let mut c = craft([0.0; 3], [0.0; 3], 1000.0, 500.0, 0);
    let rock = body([0.0; 3], [0.0; 3], 300.0, 1.0, CollisionType::Inelastic);
    c.merge(&rock);
    assert_eq!(c.dry_mass(), 1300.0);
    assert_eq!(c.mass(), 1800.0);
}
