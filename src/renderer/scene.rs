//! Scene painter
//!
//! A pure read of the game state. Draw order, back to front: starfield,
//! launcher, targets, particles, projectile.

use glam::Vec2;

use super::surface::{DrawSurface, Paint, RadialGradient, Rgba, Stroke};
use crate::Result;
use crate::settings::Settings;
use crate::sim::{GameState, LaunchState, Particle, Target, World};

pub const PROJECTILE_FALLBACK: Rgba = Rgba::hex(0xfb6e14);
pub const TARGET_COLOR: Rgba = Rgba::hex(0x58ca7e);
pub const TARGET_HIT_COLOR: Rgba = Rgba::hex(0xfb4f59);
pub const LAUNCHER_COLOR: Rgba = Rgba::hex(0xa99c92);
pub const BAND_COLOR: Rgba = Rgba::hex(0x8b4513);
pub const STAR_COLOR: Rgba = Rgba::new(255, 255, 255, 0.3);

/// Spark colors, indexed by `Particle::color`
pub const PARTICLE_PALETTE: [Rgba; 5] = [
    Rgba::hex(0xfb6e14),
    Rgba::hex(0xfed330),
    Rgba::hex(0x58ca7e),
    Rgba::hex(0x1784fb),
    Rgba::hex(0xfb4f59),
];

const STAR_COUNT: u32 = 30;
/// Sprite edge length relative to the projectile radius
const SPRITE_SCALE: f32 = 2.5;

/// Paint one frame
pub fn render(state: &GameState, settings: &Settings, surface: &mut impl DrawSurface) -> Result<()> {
    let world = &state.world;
    surface.clear(world.width, world.height)?;

    if settings.starfield {
        draw_stars(world, surface)?;
    }
    draw_launcher(state, surface)?;
    for target in &state.targets {
        draw_target(target, settings.reduced_motion, surface)?;
    }
    for particle in &state.particles {
        draw_particle(particle, surface)?;
    }
    surface.set_alpha(1.0);
    draw_projectile(state, settings, surface)
}

/// Star positions come from the index alone, so the field only changes
/// when the surface size does.
pub fn star_positions(width: f32, height: f32) -> impl Iterator<Item = (Vec2, f32)> {
    (0..STAR_COUNT).map(move |i| {
        let x = (i as f32 * 137.0) % width;
        let y = (i as f32 * 89.0) % height;
        let size = (i % 3 + 1) as f32;
        (Vec2::new(x, y), size)
    })
}

fn draw_stars(world: &World, surface: &mut impl DrawSurface) -> Result<()> {
    let paint = Paint::Solid(STAR_COLOR);
    for (pos, size) in star_positions(world.width, world.height) {
        surface.fill_circle(pos, size, &paint)?;
    }
    Ok(())
}

/// Launcher size scale, shrinking below 400px wide
pub fn launcher_scale(world: &World) -> f32 {
    (world.width / 400.0).min(1.0)
}

/// Prong tips `(left, right)` where the bands attach
pub fn prong_tips(world: &World) -> (Vec2, Vec2) {
    let s = launcher_scale(world);
    let a = world.anchor;
    (
        a + Vec2::new(-15.0, -8.0) * s,
        a + Vec2::new(15.0, -8.0) * s,
    )
}

fn draw_launcher(state: &GameState, surface: &mut impl DrawSurface) -> Result<()> {
    let world = &state.world;
    let s = launcher_scale(world);
    let a = world.anchor;
    let (left_tip, right_tip) = prong_tips(world);

    let prong = Stroke::new(LAUNCHER_COLOR, 6.0 * s).round();
    surface.stroke_line(a + Vec2::new(-20.0, 40.0) * s, left_tip, prong)?;
    surface.stroke_line(a + Vec2::new(20.0, 40.0) * s, right_tip, prong)?;

    let band = Stroke::new(BAND_COLOR, 3.0 * s).round();
    let p = &state.projectile;
    match p.launch {
        LaunchState::Resting | LaunchState::Dragging => {
            let half = p.radius * 0.5;
            surface.stroke_line(left_tip, Vec2::new(p.pos.x - half, p.pos.y), band)?;
            surface.stroke_line(right_tip, Vec2::new(p.pos.x + half, p.pos.y), band)?;
        }
        LaunchState::Airborne => {
            // Slack band between the tips once the projectile has left
            surface.stroke_quadratic(left_tip, a + Vec2::new(0.0, 8.0) * s, right_tip, band)?;
        }
    }
    Ok(())
}

/// Current on-screen radius of a target including its pulse
pub fn pulsed_radius(target: &Target, reduced_motion: bool) -> f32 {
    if reduced_motion {
        target.radius
    } else {
        target.radius * (1.0 + target.pulse_phase.sin() * 0.1)
    }
}

fn draw_target(target: &Target, reduced_motion: bool, surface: &mut impl DrawSurface) -> Result<()> {
    surface.set_alpha(target.opacity.clamp(0.0, 1.0));

    let r = pulsed_radius(target, reduced_motion);
    let c = target.pos;
    let (body, glow) = if target.hit {
        (TARGET_HIT_COLOR, TARGET_HIT_COLOR.with_alpha(0.3))
    } else {
        (TARGET_COLOR, TARGET_COLOR.with_alpha(0.3))
    };

    let halo = Paint::Radial(RadialGradient {
        center: c,
        inner_radius: r * 0.5,
        outer_radius: r * 1.3,
        stops: vec![(0.0, glow), (1.0, Rgba::TRANSPARENT)],
    });
    surface.fill_circle(c, r * 1.3, &halo)?;
    surface.fill_circle(c, r, &Paint::Solid(body))?;
    surface.stroke_circle(c, r * 0.6, Stroke::new(Rgba::WHITE.with_alpha(0.5), 2.0))?;
    surface.fill_circle(c, r * 0.15, &Paint::Solid(Rgba::WHITE.with_alpha(0.8)))?;

    surface.set_alpha(1.0);
    Ok(())
}

fn draw_particle(p: &Particle, surface: &mut impl DrawSurface) -> Result<()> {
    let life = p.life.clamp(0.0, 1.0);
    surface.set_alpha(life);
    let color = PARTICLE_PALETTE[p.color as usize % PARTICLE_PALETTE.len()];
    surface.fill_circle(p.pos, p.size * life, &Paint::Solid(color))
}

fn draw_projectile(state: &GameState, settings: &Settings, surface: &mut impl DrawSurface) -> Result<()> {
    let p = &state.projectile;
    if surface.sprite_ready() {
        surface.draw_sprite(p.pos, p.radius * SPRITE_SCALE, p.rotation, !settings.pixelated_sprite)
    } else {
        surface.fill_circle(p.pos, p.radius, &Paint::Solid(PROJECTILE_FALLBACK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{DrawCommand, RecordingSurface};

    fn state_with_one_target() -> GameState {
        let mut state = GameState::new(3, 800.0, 600.0);
        state
            .targets
            .push(Target::new(Vec2::new(200.0, 200.0), Vec2::ZERO, 20.0, 0.0));
        state
    }

    #[test]
    fn test_draw_order() {
        let mut state = state_with_one_target();
        state.emit_burst(Vec2::new(300.0, 300.0));
        let mut surface = RecordingSurface::new(false);
        render(&state, &Settings::default(), &mut surface).expect("render");

        let cmds = &surface.commands;
        assert!(matches!(cmds[0], DrawCommand::Clear { .. }));
        // 30 stars after the clear
        let stars = cmds[1..31]
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { paint: Paint::Solid(col), .. } if *col == STAR_COLOR))
            .count();
        assert_eq!(stars, 30);
        // Projectile is the last thing drawn
        match cmds.last() {
            Some(DrawCommand::FillCircle { paint: Paint::Solid(c), radius, .. }) => {
                assert_eq!(*c, PROJECTILE_FALLBACK);
                assert_eq!(*radius, state.projectile.radius);
            }
            other => panic!("expected fallback disc last, got {other:?}"),
        }
    }

    #[test]
    fn test_sprite_used_once_loaded() {
        let state = state_with_one_target();
        let mut surface = RecordingSurface::new(true);
        render(&state, &Settings::default(), &mut surface).expect("render");
        match surface.commands.last() {
            Some(DrawCommand::Sprite { size, smoothing, .. }) => {
                assert_eq!(*size, state.projectile.radius * 2.5);
                assert!(!smoothing);
            }
            other => panic!("expected sprite, got {other:?}"),
        }
    }

    #[test]
    fn test_starfield_stable_for_same_size() {
        let a: Vec<_> = star_positions(800.0, 600.0).collect();
        let b: Vec<_> = star_positions(800.0, 600.0).collect();
        assert_eq!(a, b);
        assert_eq!(a[1], (Vec2::new(137.0, 89.0), 2.0));
        assert_eq!(a[7], (Vec2::new(159.0, 23.0), 2.0));
    }

    #[test]
    fn test_starfield_can_be_disabled() {
        let state = state_with_one_target();
        let settings = Settings {
            starfield: false,
            ..Settings::default()
        };
        let mut surface = RecordingSurface::new(false);
        render(&state, &settings, &mut surface).expect("render");
        assert!(
            !surface
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::FillCircle { paint: Paint::Solid(col), .. } if *col == STAR_COLOR))
        );
    }

    #[test]
    fn test_bands_follow_projectile_while_dragging() {
        let mut state = state_with_one_target();
        state.projectile.launch = LaunchState::Dragging;
        state.projectile.pos = state.world.anchor + Vec2::new(-40.0, 60.0);
        let mut surface = RecordingSurface::new(false);
        render(&state, &Settings::default(), &mut surface).expect("render");

        let band_ends: Vec<Vec2> = surface
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { to, stroke, .. } if stroke.color == BAND_COLOR => Some(*to),
                _ => None,
            })
            .collect();
        let p = state.projectile.pos;
        let half = state.projectile.radius * 0.5;
        assert_eq!(band_ends, vec![Vec2::new(p.x - half, p.y), Vec2::new(p.x + half, p.y)]);
        assert!(!surface.commands.iter().any(|c| matches!(c, DrawCommand::Quadratic { .. })));
    }

    #[test]
    fn test_slack_band_when_airborne() {
        let mut state = state_with_one_target();
        state.projectile.launch = LaunchState::Airborne;
        let mut surface = RecordingSurface::new(false);
        render(&state, &Settings::default(), &mut surface).expect("render");
        let curves = surface
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Quadratic { .. }))
            .count();
        assert_eq!(curves, 1);
    }

    #[test]
    fn test_target_drawn_with_opacity_and_hit_color() {
        let mut state = state_with_one_target();
        state.targets[0].mark_hit();
        state.targets[0].fade();
        let mut surface = RecordingSurface::new(false);
        render(&state, &Settings::default(), &mut surface).expect("render");

        let body = surface.commands.iter().find_map(|c| match c {
            DrawCommand::FillCircle { paint: Paint::Solid(col), alpha, .. } if *col == TARGET_HIT_COLOR => Some(*alpha),
            _ => None,
        });
        let alpha = body.expect("hit target body");
        assert!((alpha - 0.95).abs() < 1e-5);
    }

    #[test]
    fn test_particles_shrink_and_fade_with_life() {
        let mut state = GameState::new(3, 800.0, 600.0);
        let mut p = Particle::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 1, 4.0);
        for _ in 0..20 {
            p.advance();
        }
        state.particles.push(p.clone());
        let mut surface = RecordingSurface::new(false);
        render(&state, &Settings::default(), &mut surface).expect("render");

        let spark = surface.commands.iter().find_map(|c| match c {
            DrawCommand::FillCircle { paint: Paint::Solid(col), radius, alpha, .. }
                if *col == PARTICLE_PALETTE[1] => Some((*radius, *alpha)),
            _ => None,
        });
        let (radius, alpha) = spark.expect("particle drawn");
        assert!((alpha - p.life).abs() < 1e-6);
        assert!((radius - 4.0 * p.life).abs() < 1e-5);
    }

    #[test]
    fn test_reduced_motion_freezes_pulse() {
        let t = Target::new(Vec2::ZERO, Vec2::ZERO, 20.0, 1.2);
        assert_eq!(pulsed_radius(&t, true), 20.0);
        assert!((pulsed_radius(&t, false) - 20.0 * (1.0 + 1.2f32.sin() * 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_launcher_scale_shrinks_on_narrow_surface() {
        assert_eq!(launcher_scale(&World::new(800.0, 600.0)), 1.0);
        assert_eq!(launcher_scale(&World::new(200.0, 600.0)), 0.5);
    }
}
