//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - One step per rendered frame, no delta-time scaling
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{bounce_axis, bounce_in_box, circles_overlap};
pub use input::{InputContext, InputEffect, InputOutcome, PointerInput, handle_pointer, transition};
pub use spawn::{in_exclusion_zone, maintain_population, pick_position, spawn_target};
pub use state::{GameState, LaunchState, Particle, Projectile, Target, World};
pub use tick::{TickReport, tick};
pub use timer::ResetTimer;
