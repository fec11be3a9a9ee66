//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, speeds in pixels per frame
//! - Seeded RNG only
//! - Fixed update order (toggles, collisions, paddles, ball)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod stepper;
pub mod tick;

pub use collision::{CollisionResult, ball_rect_collision, resolve_paddle_hits};
pub use state::{
    Ball, Court, GameEvent, GameState, Paddle, PaddleControl, PathMode, Score, Side, UpdateMode,
};
pub use stepper::{BallStepper, ScalarStepper, VectorStepper, stepper_for};
pub use tick::{TickInput, tick};
