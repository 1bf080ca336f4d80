//! Platform glue shared by the browser driver
//!
//! Handles the parts of the browser that can be expressed without web-sys:
//! - Element ids the page provides
//! - Client to surface coordinate mapping
//! - Surface size validation

use glam::Vec2;

use crate::{GameError, Result};

/// Canvas the game draws on
pub const CANVAS_ID: &str = "splash-game";
/// Element whose bounding box sets the playable size
pub const CONTAINER_ID: &str = "splash-game-wrapper";
/// Text sink for the score
pub const SCORE_ID: &str = "score-value";
/// Instructions hidden once the player first grabs the projectile
pub const INSTRUCTIONS_ID: &str = "splash-instructions";
/// Class added to the instructions to fade them out
pub const FADE_OUT_CLASS: &str = "fade-out";

/// Below this (in either axis) the container is treated as not laid out yet
pub const MIN_PLAYABLE_DIM: f32 = 8.0;

/// Bounding rectangle of the surface in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    /// Translate a client-space point (mouse or touch) into surface space
    pub fn to_surface(&self, client_x: f32, client_y: f32) -> Vec2 {
        Vec2::new(client_x - self.left, client_y - self.top)
    }
}

/// Reject sizes the game cannot meaningfully lay out on
pub fn check_size(width: f32, height: f32) -> Result<()> {
    if width.is_finite() && height.is_finite() && width >= MIN_PLAYABLE_DIM && height >= MIN_PLAYABLE_DIM {
        Ok(())
    } else {
        Err(GameError::DegenerateGeometry { width, height })
    }
}
