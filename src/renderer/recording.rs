//! Surface that records draw calls instead of painting
//!
//! Used by tests and by the native headless runner.

use glam::Vec2;

use super::surface::{DrawSurface, Paint, Stroke};
use crate::{GameError, Result};

/// One recorded call, with the global alpha in effect when it was made
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        paint: Paint,
        alpha: f32,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        stroke: Stroke,
        alpha: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        stroke: Stroke,
        alpha: f32,
    },
    Quadratic {
        from: Vec2,
        control: Vec2,
        to: Vec2,
        stroke: Stroke,
        alpha: f32,
    },
    Sprite {
        center: Vec2,
        size: f32,
        rotation: f32,
        smoothing: bool,
        alpha: f32,
    },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    pub sprite_loaded: bool,
    alpha: f32,
}

impl RecordingSurface {
    pub fn new(sprite_loaded: bool) -> Self {
        Self {
            commands: Vec::new(),
            sprite_loaded,
            alpha: 1.0,
        }
    }

    /// Drop recorded commands, keeping the sprite flag
    pub fn reset(&mut self) {
        self.commands.clear();
        self.alpha = 1.0;
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) -> Result<()> {
        self.commands.push(DrawCommand::Clear { width, height });
        Ok(())
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) -> Result<()> {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: paint.clone(),
            alpha: self.alpha,
        });
        Ok(())
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke) -> Result<()> {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke,
            alpha: self.alpha,
        });
        Ok(())
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) -> Result<()> {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke,
            alpha: self.alpha,
        });
        Ok(())
    }

    fn stroke_quadratic(
        &mut self,
        from: Vec2,
        control: Vec2,
        to: Vec2,
        stroke: Stroke,
    ) -> Result<()> {
        self.commands.push(DrawCommand::Quadratic {
            from,
            control,
            to,
            stroke,
            alpha: self.alpha,
        });
        Ok(())
    }

    fn sprite_ready(&self) -> bool {
        self.sprite_loaded
    }

    fn draw_sprite(
        &mut self,
        center: Vec2,
        size: f32,
        rotation: f32,
        smoothing: bool,
    ) -> Result<()> {
        if !self.sprite_loaded {
            return Err(GameError::AssetNotReady);
        }
        self.commands.push(DrawCommand::Sprite {
            center,
            size,
            rotation,
            smoothing,
            alpha: self.alpha,
        });
        Ok(())
    }
}
