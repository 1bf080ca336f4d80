//! Per-frame simulation step
//!
//! One call per rendered frame, no delta-time scaling. Order is fixed:
//! pending reset, projectile flight and hits, target drift/fade, target
//! population, particles.

use glam::Vec2;

use super::collision::{bounce_in_box, circles_overlap};
use super::spawn::maintain_population;
use super::state::GameState;
use crate::consts::*;

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Targets newly hit this frame
    pub hits: u32,
    /// Score changed and should be pushed to the display
    pub score_changed: bool,
    /// Projectile left the surface and a return was scheduled this frame
    pub reset_scheduled: bool,
    /// A previously scheduled return was applied this frame
    pub reset_applied: bool,
    /// Targets spawned to keep the field populated
    pub spawned: usize,
}

/// Advance the game by one frame. `now_ms` is the frame timestamp and only
/// drives the deferred projectile reset.
pub fn tick(state: &mut GameState, now_ms: f64) -> TickReport {
    let mut report = TickReport::default();
    state.frame += 1;

    if state.reset.poll(now_ms) {
        state.reset_projectile();
        report.reset_applied = true;
        log::debug!("Projectile returned to launcher");
    }

    if state.projectile.is_airborne() {
        step_projectile(state, now_ms, &mut report);
    }

    step_targets(state);

    state.targets.retain(|t| !t.is_faded());
    report.spawned = maintain_population(state);

    for p in &mut state.particles {
        p.advance();
    }
    state.particles.retain(|p| !p.is_dead());

    report
}

fn step_projectile(state: &mut GameState, now_ms: f64, report: &mut TickReport) {
    state.projectile.integrate(&state.world);

    // Every overlapping target counts, not just the first
    let pos = state.projectile.pos;
    let radius = state.projectile.radius;
    let mut bursts: Vec<Vec2> = Vec::new();
    for target in state.targets.iter_mut().filter(|t| !t.hit) {
        if circles_overlap(pos, radius, target.pos, target.radius) && target.mark_hit() {
            bursts.push(target.pos);
        }
    }

    if !bursts.is_empty() {
        report.hits = bursts.len() as u32;
        state.score += HIT_SCORE * bursts.len() as u64;
        report.score_changed = true;
        log::info!("Hit {} target(s), score {}", bursts.len(), state.score);
        for at in bursts {
            state.emit_burst(at);
        }
    }

    if state.projectile.is_out_of_bounds(&state.world)
        && state.reset.schedule(now_ms, RESET_DELAY_MS)
    {
        report.reset_scheduled = true;
        log::debug!(
            "Projectile out of bounds at ({:.0}, {:.0}), resetting in {}ms",
            pos.x,
            pos.y,
            RESET_DELAY_MS
        );
    }
}

fn step_targets(state: &mut GameState) {
    let (w, h) = (state.world.width, state.world.height);
    for target in &mut state.targets {
        if target.hit {
            target.fade();
            continue;
        }
        target.pos += target.vel;
        target.pulse_phase += TARGET_PULSE_STEP;

        let inset = Vec2::new(
            target.radius + TARGET_WALL_INSET_X,
            target.radius + TARGET_WALL_INSET_Y,
        );
        let min = inset;
        let max = Vec2::new(w, h) - inset;
        target.vel = bounce_in_box(target.pos, target.vel, min, max);
    }
}
