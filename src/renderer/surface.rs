//! Drawing surface abstraction
//!
//! The scene painter only talks to [`DrawSurface`]. The browser backend maps
//! it onto a canvas 2D context; tests and the native binary record calls.

use glam::Vec2;

use crate::Result;

/// sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 1.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// CSS color string (`#rrggbb` when opaque)
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Radial gradient between two concentric circles
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// `(offset in 0..=1, color)`
    pub stops: Vec<(f32, Rgba)>,
}

/// How a shape is filled
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Radial(RadialGradient),
}

/// Stroke style for lines and outlines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
    /// Rounded line ends
    pub round_cap: bool,
}

impl Stroke {
    pub const fn new(color: Rgba, width: f32) -> Self {
        Self {
            color,
            width,
            round_cap: false,
        }
    }

    pub const fn round(mut self) -> Self {
        self.round_cap = true;
        self
    }
}

/// Minimal 2D drawing API the renderer needs
pub trait DrawSurface {
    /// Wipe a `width` x `height` area to transparent
    fn clear(&mut self, width: f32, height: f32) -> Result<()>;

    /// Multiply subsequent draws by `alpha` (replaces any previous value)
    fn set_alpha(&mut self, alpha: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) -> Result<()>;

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke) -> Result<()>;

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) -> Result<()>;

    /// Quadratic curve from `from` to `to` bent toward `control`
    fn stroke_quadratic(&mut self, from: Vec2, control: Vec2, to: Vec2, stroke: Stroke)
    -> Result<()>;

    /// Whether the projectile sprite image has finished loading
    fn sprite_ready(&self) -> bool;

    /// Draw the projectile sprite as a `size` square centered on `center`,
    /// rotated by `rotation` radians. Fails with `AssetNotReady` before load.
    fn draw_sprite(&mut self, center: Vec2, size: f32, rotation: f32, smoothing: bool)
    -> Result<()>;
}
