//! Drag-to-launch input state machine
//!
//! Pointer and touch events are normalized by the platform layer into
//! [`PointerInput`] in surface coordinates. [`transition`] is pure; it maps
//! the current launch state and one event to the next state plus the effects
//! to apply. [`handle_pointer`] applies those effects to the game state.

use glam::Vec2;

use super::state::{GameState, LaunchState};
use crate::consts::*;
use crate::{clamp_to_radius, distance};

/// A normalized pointer/touch event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Mouse button or first touch went down at a surface position
    Down(Vec2),
    /// Pointer moved to a surface position
    Move(Vec2),
    /// Mouse released, pointer left the surface, or touch ended
    Up,
}

/// Side effects requested by a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEffect {
    /// First grab of the session (hide the instructions)
    StartGame,
    /// Remember where the drag is, without moving the projectile
    SnapshotDrag(Vec2),
    /// Move the held projectile to a (clamped) drag position
    DragTo(Vec2),
    /// Release with this velocity
    Launch(Vec2),
    /// Put the projectile back on the anchor
    ResetProjectile,
}

/// What the state machine needs to know about the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputContext {
    pub anchor: Vec2,
    pub max_pull: f32,
    pub projectile_pos: Vec2,
    pub projectile_radius: f32,
}

impl InputContext {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            anchor: state.world.anchor,
            max_pull: state.world.max_pull,
            projectile_pos: state.projectile.pos,
            projectile_radius: state.projectile.radius,
        }
    }

    fn grabs(&self, p: Vec2) -> bool {
        distance(self.projectile_pos, p) < self.projectile_radius + GRAB_SLOP
    }
}

/// Launch velocity for a release at `pos`, or `None` if the pull is too short
pub fn launch_velocity(anchor: Vec2, pos: Vec2) -> Option<Vec2> {
    if distance(anchor, pos) > MIN_LAUNCH_PULL {
        Some((anchor - pos) * LAUNCH_POWER)
    } else {
        None
    }
}

/// Pure transition function
pub fn transition(
    state: LaunchState,
    event: PointerInput,
    ctx: &InputContext,
) -> (LaunchState, Vec<InputEffect>) {
    use InputEffect::*;
    use LaunchState::*;

    match (state, event) {
        // Re-grabbing while already dragging just re-snapshots
        (Resting | Dragging, PointerInput::Down(p)) if ctx.grabs(p) => {
            (Dragging, vec![StartGame, SnapshotDrag(p)])
        }
        (Dragging, PointerInput::Move(p)) => {
            let clamped = clamp_to_radius(ctx.anchor, p, ctx.max_pull);
            (Dragging, vec![DragTo(clamped)])
        }
        (Dragging, PointerInput::Up) => match launch_velocity(ctx.anchor, ctx.projectile_pos) {
            Some(vel) => (Airborne, vec![Launch(vel)]),
            None => (Resting, vec![ResetProjectile]),
        },
        (s, _) => (s, Vec::new()),
    }
}

/// Result of feeding one event into the game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputOutcome {
    /// The game-started flag flipped on this event
    pub started: bool,
    pub launched: bool,
}

/// Run one event through the state machine and apply its effects
pub fn handle_pointer(state: &mut GameState, event: PointerInput) -> InputOutcome {
    let ctx = InputContext::from_state(state);
    let (next, effects) = transition(state.projectile.launch, event, &ctx);
    let mut outcome = InputOutcome::default();

    for effect in effects {
        match effect {
            InputEffect::StartGame => {
                if !state.game_started {
                    state.game_started = true;
                    outcome.started = true;
                    log::info!("Game started");
                }
            }
            InputEffect::SnapshotDrag(p) => state.drag_pos = p,
            InputEffect::DragTo(p) => {
                state.drag_pos = p;
                state.projectile.pos = p;
                state.projectile.vel = Vec2::ZERO;
            }
            InputEffect::Launch(vel) => {
                state.projectile.vel = vel;
                outcome.launched = true;
                log::debug!("Launched with velocity ({:.2}, {:.2})", vel.x, vel.y);
            }
            InputEffect::ResetProjectile => state.reset_projectile(),
        }
    }
    state.projectile.launch = next;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx() -> InputContext {
        InputContext {
            anchor: Vec2::new(400.0, 360.0),
            max_pull: 100.0,
            projectile_pos: Vec2::new(400.0, 360.0),
            projectile_radius: 25.0,
        }
    }

    #[test]
    fn test_down_near_projectile_starts_drag() {
        let (s, fx) = transition(LaunchState::Resting, PointerInput::Down(Vec2::new(440.0, 360.0)), &ctx());
        assert_eq!(s, LaunchState::Dragging);
        assert_eq!(
            fx,
            vec![InputEffect::StartGame, InputEffect::SnapshotDrag(Vec2::new(440.0, 360.0))]
        );
    }

    #[test]
    fn test_down_far_from_projectile_is_ignored() {
        let (s, fx) = transition(LaunchState::Resting, PointerInput::Down(Vec2::new(450.0, 360.0)), &ctx());
        assert_eq!(s, LaunchState::Resting);
        assert!(fx.is_empty());
    }

    #[test]
    fn test_down_while_airborne_is_ignored() {
        let (s, fx) = transition(LaunchState::Airborne, PointerInput::Down(Vec2::new(400.0, 360.0)), &ctx());
        assert_eq!(s, LaunchState::Airborne);
        assert!(fx.is_empty());
    }

    #[test]
    fn test_move_and_up_without_drag_are_ignored() {
        let (s, fx) = transition(LaunchState::Resting, PointerInput::Move(Vec2::ZERO), &ctx());
        assert_eq!((s, fx.len()), (LaunchState::Resting, 0));
        let (s, fx) = transition(LaunchState::Resting, PointerInput::Up, &ctx());
        assert_eq!((s, fx.len()), (LaunchState::Resting, 0));
    }

    #[test]
    fn test_move_clamps_to_max_pull() {
        let (_, fx) = transition(LaunchState::Dragging, PointerInput::Move(Vec2::new(400.0, 660.0)), &ctx());
        match fx[0] {
            InputEffect::DragTo(p) => assert!(p.distance(Vec2::new(400.0, 460.0)) < 1e-3),
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn test_short_pull_resets() {
        let mut c = ctx();
        c.projectile_pos = Vec2::new(406.0, 368.0); // exactly 10 away
        let (s, fx) = transition(LaunchState::Dragging, PointerInput::Up, &c);
        assert_eq!(s, LaunchState::Resting);
        assert_eq!(fx, vec![InputEffect::ResetProjectile]);
    }

    #[test]
    fn test_long_pull_launches() {
        let mut c = ctx();
        c.projectile_pos = Vec2::new(350.0, 420.0);
        let (s, fx) = transition(LaunchState::Dragging, PointerInput::Up, &c);
        assert_eq!(s, LaunchState::Airborne);
        match fx[0] {
            InputEffect::Launch(v) => {
                assert!((v.x - 11.0).abs() < 1e-4);
                assert!((v.y - -13.2).abs() < 1e-4);
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn test_full_drag_and_launch_on_state() {
        let mut state = GameState::new(5, 800.0, 600.0);
        let anchor = state.world.anchor;

        let out = handle_pointer(&mut state, PointerInput::Down(anchor));
        assert!(out.started);
        assert!(state.game_started);
        assert_eq!(state.projectile.launch, LaunchState::Dragging);

        handle_pointer(&mut state, PointerInput::Move(anchor + Vec2::new(-30.0, 40.0)));
        assert!(state.projectile.pos.distance(anchor + Vec2::new(-30.0, 40.0)) < 1e-3);
        assert_eq!(state.projectile.vel, Vec2::ZERO);

        let out = handle_pointer(&mut state, PointerInput::Up);
        assert!(out.launched);
        assert_eq!(state.projectile.launch, LaunchState::Airborne);
        assert!((state.projectile.vel.x - 6.6).abs() < 1e-3);
        assert!((state.projectile.vel.y - -8.8).abs() < 1e-3);

        // Second grab does not report a fresh start
        state.reset_projectile();
        let out = handle_pointer(&mut state, PointerInput::Down(anchor));
        assert!(!out.started);
    }

    #[test]
    fn test_negligible_pull_returns_to_anchor() {
        let mut state = GameState::new(5, 800.0, 600.0);
        let anchor = state.world.anchor;
        handle_pointer(&mut state, PointerInput::Down(anchor));
        handle_pointer(&mut state, PointerInput::Move(anchor + Vec2::new(3.0, 4.0)));
        let out = handle_pointer(&mut state, PointerInput::Up);
        assert!(!out.launched);
        assert_eq!(state.projectile.launch, LaunchState::Resting);
        assert_eq!(state.projectile.pos, anchor);
        assert_eq!(state.projectile.vel, Vec2::ZERO);
    }

    #[test]
    fn test_last_move_wins() {
        let mut state = GameState::new(5, 800.0, 600.0);
        let anchor = state.world.anchor;
        handle_pointer(&mut state, PointerInput::Down(anchor));
        for dx in [10.0, 20.0, -15.0] {
            handle_pointer(&mut state, PointerInput::Move(anchor + Vec2::new(dx, 30.0)));
        }
        assert!(state.projectile.pos.distance(anchor + Vec2::new(-15.0, 30.0)) < 1e-3);
        assert_eq!(state.drag_pos, state.projectile.pos);
    }

    proptest! {
        #[test]
        fn prop_clamped_pull_on_circle_same_direction(dx in -2000.0f32..2000.0, dy in -2000.0f32..2000.0) {
            let c = ctx();
            let raw = c.anchor + Vec2::new(dx, dy);
            prop_assume!(c.anchor.distance(raw) > c.max_pull);
            let (_, fx) = transition(LaunchState::Dragging, PointerInput::Move(raw), &c);
            let InputEffect::DragTo(p) = fx[0] else { panic!("expected drag") };
            prop_assert!((c.anchor.distance(p) - c.max_pull).abs() < 1e-2);
            let want = (raw - c.anchor).normalize();
            let got = (p - c.anchor).normalize();
            prop_assert!(want.distance(got) < 1e-3);
        }

        #[test]
        fn prop_short_pull_never_launches(dx in -7.0f32..7.0, dy in -7.0f32..7.0) {
            let mut state = GameState::new(11, 800.0, 600.0);
            let anchor = state.world.anchor;
            handle_pointer(&mut state, PointerInput::Down(anchor));
            handle_pointer(&mut state, PointerInput::Move(anchor + Vec2::new(dx, dy)));
            handle_pointer(&mut state, PointerInput::Up);
            prop_assert_eq!(state.projectile.launch, LaunchState::Resting);
            prop_assert_eq!(state.projectile.pos, anchor);
            prop_assert_eq!(state.projectile.vel, Vec2::ZERO);
        }
    }
}
