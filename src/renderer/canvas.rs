//! Canvas 2D backend for the browser

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::surface::{DrawSurface, Paint, Stroke};
use crate::{GameError, Result};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    sprite: HtmlImageElement,
    sprite_loaded: Rc<Cell<bool>>,
}

impl CanvasSurface {
    /// Wrap the canvas' 2D context and start loading the sprite from
    /// `sprite_url`. Until the image decodes the renderer draws a plain disc.
    pub fn new(canvas: &HtmlCanvasElement, sprite_url: &str) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(GameError::MissingSurface("2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GameError::Js("not a 2d context".into()))?;

        let sprite = HtmlImageElement::new()?;
        sprite.set_src(sprite_url);
        let sprite_loaded = Rc::new(Cell::new(false));

        {
            let image = sprite.clone();
            let loaded = sprite_loaded.clone();
            let url = sprite_url.to_string();
            wasm_bindgen_futures::spawn_local(async move {
                match JsFuture::from(image.decode()).await {
                    Ok(_) => {
                        loaded.set(true);
                        log::info!("Sprite loaded: {}", url);
                    }
                    Err(e) => log::warn!("Sprite {} failed to load, using fallback: {:?}", url, e),
                }
            });
        }

        Ok(Self {
            ctx,
            sprite,
            sprite_loaded,
        })
    }

    fn apply_stroke(&self, stroke: Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(stroke.width as f64);
        self.ctx
            .set_line_cap(if stroke.round_cap { "round" } else { "butt" });
    }

    fn circle_path(&self, center: Vec2, radius: f32) -> Result<()> {
        self.ctx.begin_path();
        self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        )?;
        Ok(())
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) -> Result<()> {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        Ok(())
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) -> Result<()> {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::Radial(g) => {
                let gradient = self.ctx.create_radial_gradient(
                    g.center.x as f64,
                    g.center.y as f64,
                    g.inner_radius.max(0.0) as f64,
                    g.center.x as f64,
                    g.center.y as f64,
                    g.outer_radius.max(0.0) as f64,
                )?;
                for (offset, color) in &g.stops {
                    gradient.add_color_stop(*offset, &color.to_css())?;
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        self.circle_path(center, radius)?;
        self.ctx.fill();
        Ok(())
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke) -> Result<()> {
        self.apply_stroke(stroke);
        self.circle_path(center, radius)?;
        self.ctx.stroke();
        Ok(())
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) -> Result<()> {
        self.apply_stroke(stroke);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
        Ok(())
    }

    fn stroke_quadratic(
        &mut self,
        from: Vec2,
        control: Vec2,
        to: Vec2,
        stroke: Stroke,
    ) -> Result<()> {
        self.apply_stroke(stroke);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx
            .quadratic_curve_to(control.x as f64, control.y as f64, to.x as f64, to.y as f64);
        self.ctx.stroke();
        Ok(())
    }

    fn sprite_ready(&self) -> bool {
        self.sprite_loaded.get()
    }

    fn draw_sprite(
        &mut self,
        center: Vec2,
        size: f32,
        rotation: f32,
        smoothing: bool,
    ) -> Result<()> {
        if !self.sprite_ready() {
            return Err(GameError::AssetNotReady);
        }
        let half = size as f64 / 2.0;
        self.ctx.save();
        let drawn = (|| -> Result<()> {
            self.ctx.translate(center.x as f64, center.y as f64)?;
            self.ctx.rotate(rotation as f64)?;
            self.ctx.set_image_smoothing_enabled(smoothing);
            self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                &self.sprite,
                -half,
                -half,
                size as f64,
                size as f64,
            )?;
            Ok(())
        })();
        self.ctx.restore();
        drawn
    }
}
