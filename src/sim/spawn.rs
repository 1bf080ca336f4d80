//! Target placement
//!
//! Targets appear anywhere in the padded play area except a square box
//! around the launcher anchor.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Target, World};
use crate::consts::*;

/// Inclusive sampling bounds for target centers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnArea {
    pub min: Vec2,
    pub max: Vec2,
}

impl SpawnArea {
    /// Padded area for `world`. An axis too small to hold any range collapses
    /// to its midpoint.
    pub fn for_world(world: &World) -> Self {
        let mut min = Vec2::new(SPAWN_PADDING, SPAWN_PADDING + SPAWN_VERTICAL_INSET);
        let mut max = Vec2::new(
            world.width - SPAWN_PADDING,
            world.height - SPAWN_PADDING - SPAWN_VERTICAL_INSET,
        );
        if max.x < min.x {
            let mid = world.width * 0.5;
            min.x = mid;
            max.x = mid;
        }
        if max.y < min.y {
            let mid = world.height * 0.5;
            min.y = mid;
            max.y = mid;
        }
        Self { min, max }
    }

    fn sample(&self, rng: &mut impl Rng) -> Vec2 {
        let span = self.max - self.min;
        Vec2::new(
            self.min.x + rng.random::<f32>() * span.x,
            self.min.y + rng.random::<f32>() * span.y,
        )
    }
}

/// True when `p` is inside the no-spawn box around the anchor.
/// Both axes must be close for a rejection.
pub fn in_exclusion_zone(world: &World, p: Vec2) -> bool {
    (p.x - world.anchor.x).abs() < SPAWN_EXCLUSION_HALF
        && (p.y - world.anchor.y).abs() < SPAWN_EXCLUSION_HALF
}

/// Pick a target center by rejection sampling.
///
/// Gives up after `SPAWN_MAX_ATTEMPTS` and returns the last candidate, with
/// `false` in the second slot, so tiny surfaces cannot spin forever.
pub fn pick_position(world: &World, rng: &mut impl Rng) -> (Vec2, bool) {
    let area = SpawnArea::for_world(world);
    let mut candidate = area.sample(rng);
    for _ in 1..SPAWN_MAX_ATTEMPTS {
        if !in_exclusion_zone(world, candidate) {
            return (candidate, true);
        }
        candidate = area.sample(rng);
    }
    let clear = !in_exclusion_zone(world, candidate);
    (candidate, clear)
}

/// Build a new target with random size, drift and pulse phase
pub fn make_target(world: &World, rng: &mut impl Rng) -> Target {
    let (pos, clear) = pick_position(world, rng);
    if !clear {
        log::warn!(
            "No spawn point outside the launcher zone on a {}x{} surface, using ({:.0}, {:.0})",
            world.width,
            world.height,
            pos.x,
            pos.y
        );
    }
    let radius = TARGET_RADIUS_MIN + rng.random::<f32>() * TARGET_RADIUS_SPREAD;
    let vel = Vec2::new(
        (rng.random::<f32>() - 0.5) * 2.0 * TARGET_DRIFT_MAX,
        (rng.random::<f32>() - 0.5) * 2.0 * TARGET_DRIFT_MAX,
    );
    let pulse_phase = rng.random::<f32>() * std::f32::consts::TAU;
    Target::new(pos, vel, radius, pulse_phase)
}

/// Add one target to the state
pub fn spawn_target(state: &mut GameState) {
    let world = state.world.clone();
    let target = make_target(&world, state.rng());
    state.targets.push(target);
}

/// Top the active (not yet hit) targets back up to `MIN_ACTIVE_TARGETS`.
///
/// Returns how many were spawned. Usually zero or one; two targets hit in
/// the same frame can need two.
pub fn maintain_population(state: &mut GameState) -> usize {
    let mut spawned = 0;
    while state.active_targets() < MIN_ACTIVE_TARGETS {
        spawn_target(state);
        spawned += 1;
    }
    spawned
}
