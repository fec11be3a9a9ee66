//! Collision detection and response between the ball and paddles
//!
//! Paddles are axis-aligned rectangles; the ball is a circle. Response is a
//! plain horizontal reversal plus a position correction that leaves the ball
//! clear of the paddle, so the same hit can't fire again next frame.

use glam::Vec2;

use super::state::{Ball, Paddle, Side};
use crate::consts::PADDLE_SEPARATION;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the rectangle to the ball centre
    pub point: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
        }
    }
}

/// Check overlap between a circle and an axis-aligned rectangle
///
/// `rect_min` is the top-left corner. Touching counts as a hit.
pub fn ball_rect_collision(
    center: Vec2,
    radius: f32,
    rect_min: Vec2,
    rect_size: Vec2,
) -> CollisionResult {
    let rect_max = rect_min + rect_size;
    let closest = center.clamp(rect_min, rect_max);
    if center.distance_squared(closest) > radius * radius {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        point: closest,
    }
}

/// Bounce the ball off a paddle if they overlap
///
/// Reverses horizontal speed and spin and moves the ball just outside the
/// paddle's near edge. Returns true on a hit.
pub fn resolve_paddle_hit(ball: &mut Ball, paddle: &Paddle) -> bool {
    let result = ball_rect_collision(ball.pos, ball.radius, paddle.pos, paddle.size);
    if !result.hit {
        return false;
    }

    ball.speed.x = -ball.speed.x;
    ball.reverse_rotation();

    let paddle_center_x = paddle.pos.x + paddle.size.x / 2.0;
    ball.pos.x = if ball.pos.x < paddle_center_x {
        paddle.pos.x - ball.radius - PADDLE_SEPARATION
    } else {
        paddle.pos.x + paddle.size.x + ball.radius + PADDLE_SEPARATION
    };

    log::trace!("paddle hit at ({:.1}, {:.1})", result.point.x, result.point.y);
    true
}

/// Check the ball against both paddles, player first
///
/// Each check is independent; if both fire in one frame the speed flips
/// twice and the computer check decides the final position.
pub fn resolve_paddle_hits(ball: &mut Ball, player: &Paddle, computer: &Paddle) -> Vec<Side> {
    let mut hits = Vec::new();
    if resolve_paddle_hit(ball, player) {
        hits.push(Side::Player);
    }
    if resolve_paddle_hit(ball, computer) {
        hits.push(Side::Computer);
    }
    hits
}
