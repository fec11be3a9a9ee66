//! Per-frame simulation tick
//!
//! Advances the match by exactly one frame in a fixed order: mode toggles,
//! paddle collisions, paddle movement, ball movement and scoring.

use super::collision::resolve_paddle_hits;
use super::state::{GameEvent, GameState};
use super::stepper::stepper_for;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move-up key held
    pub up: bool,
    /// Move-down key held
    pub down: bool,
    /// Advance to the next path mode (one-shot)
    pub cycle_path: bool,
    /// Switch ball stepper (one-shot)
    pub toggle_update_mode: bool,
    /// Demo mode - the player paddle tracks the ball too
    pub demo_mode: bool,
}

impl TickInput {
    /// Drop edge-triggered commands once they have been applied
    pub fn clear_one_shots(&mut self) {
        self.cycle_path = false;
        self.toggle_update_mode = false;
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.cycle_path {
        state.path_mode = state.path_mode.next();
        events.push(GameEvent::PathModeChanged(state.path_mode));
    }
    if input.toggle_update_mode {
        state.update_mode = state.update_mode.toggle();
        events.push(GameEvent::UpdateModeChanged(state.update_mode));
    }

    // Collisions use the ball position from before it moves this frame
    for side in resolve_paddle_hits(&mut state.ball, &state.player, &state.computer) {
        events.push(GameEvent::PaddleHit { side });
    }

    let ball_y = state.ball.pos.y;
    state.player.update(input, ball_y, &state.court);
    state.computer.update(input, ball_y, &state.court);

    let stepper = stepper_for(state.update_mode);
    let (bounced, scored) = state.ball.update(stepper, state.path_mode, &state.court);
    if bounced {
        events.push(GameEvent::WallBounce);
    }
    if let Some(side) = scored {
        state.score.award(side);
        state.reset_ball();
        events.push(GameEvent::Scored { side });
    }

    state.frame += 1;
    events
}
