//! Interchangeable ball steppers
//!
//! A stepper applies one frame of translation and spin to the ball. The
//! scalar and vectorized versions are numerically identical, so switching
//! between them mid-match never changes the outcome; `benchmark` times them.

use glam::Vec2;

use super::state::{Ball, PathMode, UpdateMode};
use crate::consts::BALL_SPIN_PER_PIXEL;

/// One frame of ball movement, without wall or goal handling
pub trait BallStepper {
    fn name(&self) -> &'static str;
    fn advance(&self, ball: &mut Ball, path: PathMode);
}

/// Component-by-component arithmetic
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarStepper;

impl BallStepper for ScalarStepper {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn advance(&self, ball: &mut Ball, path: PathMode) {
        let dx = ball.speed.x as f32;
        let dy = ball.speed.y as f32 + path.vertical_offset();
        ball.pos.x += dx;
        ball.pos.y += dy;
        ball.rotation_angle += dx * BALL_SPIN_PER_PIXEL;
    }
}

/// Whole-vector arithmetic through glam
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorStepper;

impl BallStepper for VectorStepper {
    fn name(&self) -> &'static str {
        "vectorized"
    }

    fn advance(&self, ball: &mut Ball, path: PathMode) {
        // Offset added before position so rounding matches the scalar path
        let delta = ball.speed.as_vec2() + Vec2::new(0.0, path.vertical_offset());
        ball.pos += delta;
        ball.rotation_angle += delta.x * BALL_SPIN_PER_PIXEL;
    }
}

/// Stepper backing an update mode
pub fn stepper_for(mode: UpdateMode) -> &'static dyn BallStepper {
    match mode {
        UpdateMode::Scalar => &ScalarStepper,
        UpdateMode::Vectorized => &VectorStepper,
    }
}
