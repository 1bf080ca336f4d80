//! Sling Splash - a drag-and-launch target game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (launch physics, collisions, target lifecycle)
//! - `renderer`: Paints the world through a 2D drawing surface
//! - `platform`: Browser element ids and coordinate normalization
//! - `settings`: Player preferences persisted in LocalStorage

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{GameError, Result};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// One simulation step runs per rendered frame, so every rate below is
/// "per frame" rather than "per second".
pub mod consts {
    /// Downward acceleration added to the airborne projectile each frame
    pub const GRAVITY: f32 = 0.3;
    /// Horizontal velocity damping per frame (vertical is not damped)
    pub const FRICTION: f32 = 0.99;

    /// Launcher anchor as a fraction of the surface size
    pub const ANCHOR_X_FRAC: f32 = 0.5;
    pub const ANCHOR_Y_FRAC: f32 = 0.6;

    /// Pull distance cap, and its share of the surface width
    pub const MAX_PULL_CAP: f32 = 100.0;
    pub const MAX_PULL_WIDTH_FRAC: f32 = 0.15;

    /// Projectile radius derived from width, clamped
    pub const PROJECTILE_RADIUS_WIDTH_FRAC: f32 = 0.04;
    pub const PROJECTILE_RADIUS_MIN: f32 = 18.0;
    pub const PROJECTILE_RADIUS_MAX: f32 = 25.0;

    /// Extra slop around the projectile that still counts as grabbing it
    pub const GRAB_SLOP: f32 = 25.0;
    /// Pulls at or below this distance cancel instead of launching
    pub const MIN_LAUNCH_PULL: f32 = 10.0;
    /// Velocity per pixel of pull
    pub const LAUNCH_POWER: f32 = 0.22;
    /// Visual spin per unit of horizontal velocity
    pub const SPIN_FACTOR: f32 = 0.02;

    /// How far past the left/right/bottom edge the projectile may fly
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 50.0;
    /// Delay before an out-of-bounds projectile returns to the anchor
    pub const RESET_DELAY_MS: f64 = 300.0;

    /// Target radius range [MIN, MIN + SPREAD)
    pub const TARGET_RADIUS_MIN: f32 = 15.0;
    pub const TARGET_RADIUS_SPREAD: f32 = 12.0;
    /// Per-axis drift speed magnitude bound
    pub const TARGET_DRIFT_MAX: f32 = 0.4;
    pub const TARGET_PULSE_STEP: f32 = 0.05;
    pub const TARGET_FADE_STEP: f32 = 0.05;
    /// Inner wall insets used for target drift bounces
    pub const TARGET_WALL_INSET_X: f32 = 50.0;
    pub const TARGET_WALL_INSET_Y: f32 = 60.0;

    /// Spawn area padding and extra vertical inset
    pub const SPAWN_PADDING: f32 = 50.0;
    pub const SPAWN_VERTICAL_INSET: f32 = 60.0;
    /// Half-size of the square around the anchor where targets never spawn
    pub const SPAWN_EXCLUSION_HALF: f32 = 80.0;
    /// Samples tried before settling for the last candidate
    pub const SPAWN_MAX_ATTEMPTS: u32 = 64;

    pub const INITIAL_TARGETS: usize = 4;
    pub const MIN_ACTIVE_TARGETS: usize = 3;
    pub const HIT_SCORE: u64 = 10;

    /// Particle burst
    pub const BURST_COUNT: usize = 10;
    pub const BURST_SPEED_MIN: f32 = 2.0;
    pub const BURST_SPEED_SPREAD: f32 = 2.0;
    pub const PARTICLE_SIZE_MIN: f32 = 3.0;
    pub const PARTICLE_SIZE_SPREAD: f32 = 3.0;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const PARTICLE_DECAY: f32 = 0.025;
    /// Number of palette entries particles pick from
    pub const PARTICLE_PALETTE_LEN: u8 = 5;

    /// Smallest surface edge the world will accept
    pub const MIN_SURFACE_DIM: f32 = 1.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle of the vector pointing from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Clamp `point` so it lies no farther than `max_dist` from `anchor`,
/// keeping the direction from the anchor.
pub fn clamp_to_radius(anchor: Vec2, point: Vec2, max_dist: f32) -> Vec2 {
    if distance(anchor, point) <= max_dist {
        return point;
    }
    let angle = angle_between(anchor, point);
    anchor + Vec2::new(angle.cos(), angle.sin()) * max_dist
}

/// One frame of gravity then position integration, with horizontal damping.
///
/// Returns the new `(pos, vel)`.
#[inline]
pub fn integrate_ballistic(pos: Vec2, vel: Vec2, gravity: f32, friction: f32) -> (Vec2, Vec2) {
    let vel = Vec2::new(vel.x, vel.y + gravity);
    let pos = pos + vel;
    (pos, Vec2::new(vel.x * friction, vel.y))
}
