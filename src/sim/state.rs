//! Game state and core simulation types
//!
//! The single mutable aggregate that input handlers and the per-frame step
//! both write to. Owned by the driver and passed by reference.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::timer::ResetTimer;
use crate::consts::*;
use crate::integrate_ballistic;

/// Playable surface and everything derived from its size
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub width: f32,
    pub height: f32,
    /// Launcher location; pull distance is measured from here
    pub anchor: Vec2,
    pub max_pull: f32,
    pub gravity: f32,
    pub friction: f32,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        let mut world = Self {
            width: 0.0,
            height: 0.0,
            anchor: Vec2::ZERO,
            max_pull: 0.0,
            gravity: GRAVITY,
            friction: FRICTION,
        };
        world.resize(width, height);
        world
    }

    /// Recompute size-derived fields. Sizes below `MIN_SURFACE_DIM` (or NaN)
    /// are raised to it.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = sanitize_dim(width);
        self.height = sanitize_dim(height);
        self.anchor = Vec2::new(self.width * ANCHOR_X_FRAC, self.height * ANCHOR_Y_FRAC);
        self.max_pull = MAX_PULL_CAP.min(self.width * MAX_PULL_WIDTH_FRAC);
    }

    /// Projectile radius for the current width
    pub fn projectile_radius(&self) -> f32 {
        (self.width * PROJECTILE_RADIUS_WIDTH_FRAC).clamp(PROJECTILE_RADIUS_MIN, PROJECTILE_RADIUS_MAX)
    }
}

fn sanitize_dim(v: f32) -> f32 {
    if v.is_nan() { MIN_SURFACE_DIM } else { v.max(MIN_SURFACE_DIM) }
}

/// Where the projectile is in the drag-and-launch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchState {
    /// Sitting at the anchor, waiting to be grabbed
    #[default]
    Resting,
    /// Held by a pointer
    Dragging,
    /// Flying under gravity
    Airborne,
}

/// The launched projectile. There is only ever one; it is reset, not respawned.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Visual only
    pub rotation: f32,
    pub launch: LaunchState,
}

impl Projectile {
    /// A projectile resting on the launcher
    pub fn at_rest(world: &World) -> Self {
        Self {
            pos: world.anchor,
            vel: Vec2::ZERO,
            radius: world.projectile_radius(),
            rotation: 0.0,
            launch: LaunchState::Resting,
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.launch == LaunchState::Airborne
    }

    /// Advance one frame of flight
    pub fn integrate(&mut self, world: &World) {
        let (pos, vel) = integrate_ballistic(self.pos, self.vel, world.gravity, world.friction);
        self.pos = pos;
        self.vel = vel;
        self.rotation += self.vel.x * SPIN_FACTOR;
    }

    /// Past the left, right or bottom edge (the top is open)
    pub fn is_out_of_bounds(&self, world: &World) -> bool {
        self.pos.x < -OUT_OF_BOUNDS_MARGIN
            || self.pos.x > world.width + OUT_OF_BOUNDS_MARGIN
            || self.pos.y > world.height + OUT_OF_BOUNDS_MARGIN
    }
}

/// A drifting target
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// One-way: once true the target stops drifting and fades out
    pub hit: bool,
    pub opacity: f32,
    /// Render-only oscillation phase
    pub pulse_phase: f32,
    fade_frames: u32,
}

impl Target {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, pulse_phase: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            hit: false,
            opacity: 1.0,
            pulse_phase,
            fade_frames: 0,
        }
    }

    /// Mark as hit. Returns false if it was already hit.
    pub fn mark_hit(&mut self) -> bool {
        if self.hit {
            return false;
        }
        self.hit = true;
        true
    }

    /// One frame of linear fade. Opacity is derived from the frame count
    /// so the last frame lands on zero instead of a float remainder.
    pub fn fade(&mut self) {
        self.fade_frames += 1;
        self.opacity = 1.0 - self.fade_frames as f32 * TARGET_FADE_STEP;
    }

    pub fn is_faded(&self) -> bool {
        self.opacity <= 0.0
    }
}

/// A short-lived spark from a target hit
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 at birth, 0 at death
    pub life: f32,
    /// Palette index, resolved by the renderer
    pub color: u8,
    pub size: f32,
    age: u32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: u8, size: f32) -> Self {
        Self {
            pos,
            vel,
            life: 1.0,
            color,
            size,
            age: 0,
        }
    }

    /// Move, apply pseudo-gravity, age by one frame
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.age += 1;
        self.life = 1.0 - self.age as f32 * PARTICLE_DECAY;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub world: World,
    pub projectile: Projectile,
    /// Last pointer position seen while dragging (after clamping)
    pub drag_pos: Vec2,
    pub targets: Vec<Target>,
    pub particles: Vec<Particle>,
    pub score: u64,
    /// Flips once, on the first grab
    pub game_started: bool,
    /// Pending return-to-anchor after the projectile leaves the surface
    pub reset: ResetTimer,
    /// When false, hits score but emit no sparks
    pub particles_enabled: bool,
    /// Simulation step counter
    pub frame: u64,
}

impl GameState {
    /// Create an empty world of the given size with the projectile at rest.
    /// Call [`GameState::populate`] to add the starting targets.
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let world = World::new(width, height);
        let projectile = Projectile::at_rest(&world);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            drag_pos: world.anchor,
            world,
            projectile,
            targets: Vec::new(),
            particles: Vec::new(),
            score: 0,
            game_started: false,
            reset: ResetTimer::default(),
            particles_enabled: true,
            frame: 0,
        }
    }

    /// Spawn the starting set of targets
    pub fn populate(&mut self) {
        for _ in 0..INITIAL_TARGETS {
            super::spawn::spawn_target(self);
        }
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Put the projectile back on the launcher and drop any pending reset
    pub fn reset_projectile(&mut self) {
        self.projectile = Projectile::at_rest(&self.world);
        self.drag_pos = self.world.anchor;
        self.reset.cancel();
    }

    /// Apply a new surface size. A projectile that is not in flight is
    /// snapped back to the new anchor.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.resize(width, height);
        self.projectile.radius = self.world.projectile_radius();
        if !self.projectile.is_airborne() {
            self.projectile.pos = self.world.anchor;
        }
    }

    /// Targets that can still be hit
    pub fn active_targets(&self) -> usize {
        self.targets.iter().filter(|t| !t.hit).count()
    }

    /// Emit a radial burst of sparks at `pos`
    pub fn emit_burst(&mut self, pos: Vec2) {
        if !self.particles_enabled {
            return;
        }
        let step = std::f32::consts::TAU / BURST_COUNT as f32;
        for i in 0..BURST_COUNT {
            let angle = step * i as f32;
            let speed = BURST_SPEED_MIN + self.rng.random::<f32>() * BURST_SPEED_SPREAD;
            let color = self.rng.random_range(0..PARTICLE_PALETTE_LEN);
            let size = PARTICLE_SIZE_MIN + self.rng.random::<f32>() * PARTICLE_SIZE_SPREAD;
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            self.particles.push(Particle::new(pos, vel, color, size));
        }
    }
}
