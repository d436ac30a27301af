//! Read-only state handed to the display side after each tick.
//!
//! A `Snapshot` is a copy, so a renderer on another thread can hold one
//! while the engine carries on stepping.

use serde::Serialize;

use super::engine::RunState;
use super::states::{Body, BodyKind, CollisionType, Colour, NVec3, System};

#[derive(Debug, Clone, Serialize)]
pub struct BodyView {
    pub name: String,
    pub kind: BodyKind,
    pub x: NVec3,
    pub v: NVec3,
    pub mass: f64, // effective mass
    pub radius: f64,
    pub collision: CollisionType,
    pub colour: Option<Colour>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CraftView {
    pub index: usize,
    pub x: NVec3,
    pub v: NVec3,
    pub speed: f64,
    pub distance_from_origin: f64,
    pub mass: f64,
    pub dry_mass: f64,
    pub fuel: f64,
    pub ammo: u32,
    pub exhaust_speed: f64,
    pub forward: NVec3,
    pub left: NVec3,
    pub up: NVec3,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub t: f64,
    pub state: RunState,
    pub bodies: Vec<BodyView>,
    pub craft: Option<CraftView>,
}

impl From<&Body> for BodyView {
    fn from(b: &Body) -> Self {
        Self {
            name: b.name.clone(),
            kind: b.kind(),
            x: b.x,
            v: b.v,
            mass: b.mass(),
            radius: b.radius(),
            collision: b.collision_type(),
            colour: b.colour,
        }
    }
}

impl Snapshot {
    pub fn capture(sys: &System, state: RunState) -> Self {
        let craft = sys.craft_index().and_then(|index| {
            let b = &sys.bodies[index];
            let c = b.craft_state()?;
            Some(CraftView {
                index,
                x: b.x,
                v: b.v,
                speed: b.v.norm(),
                distance_from_origin: b.x.norm(),
                mass: b.mass(),
                dry_mass: b.dry_mass(),
                fuel: c.fuel(),
                ammo: c.ammo(),
                exhaust_speed: c.exhaust_speed(),
                forward: c.forward(),
                left: c.left(),
                up: c.up(),
            })
        });

        Self {
            t: sys.t,
            state,
            bodies: sys.bodies.iter().map(BodyView::from).collect(),
            craft,
        }
    }
}

/// Elapsed simulation time as `<days>d hh:mm:ss`.
pub fn format_elapsed(t: f64) -> String {
    let total = t.max(0.0) as u64;
    let (days, rem) = (total / 86_400, total % 86_400);
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let (minutes, seconds) = (rem / 60, rem % 60);
    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}
