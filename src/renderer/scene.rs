//! Frame assembly
//!
//! Turns a [`GameState`] into one triangle list: court, net, ball, paddles.
//! Scores are drawn by the HUD, not here.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{Ball, GameState, Paddle};

/// Number of alternating stripes on the ball
const BALL_STRIPES: u32 = 16;
const BALL_SEGMENTS_PER_STRIPE: u32 = 4;
const CENTER_CIRCLE_RADIUS: f32 = 150.0;
const NET_THICKNESS: f32 = 2.0;
const PADDLE_ROUNDNESS: f32 = 0.8;

/// Build every vertex for the current frame
pub fn build_frame(state: &GameState) -> Vec<Vertex> {
    let court = state.court;
    let center = court.center();
    let mut vertices = Vec::with_capacity(1024);

    // Left half comes from the clear color
    vertices.extend(shapes::rect(
        Vec2::new(center.x, 0.0),
        Vec2::new(court.width / 2.0, court.height),
        colors::COURT,
    ));
    vertices.extend(shapes::circle(
        center,
        CENTER_CIRCLE_RADIUS,
        colors::CENTER_CIRCLE,
        64,
    ));
    vertices.extend(shapes::line(
        Vec2::new(center.x, 0.0),
        Vec2::new(center.x, court.height),
        NET_THICKNESS,
        colors::NET,
    ));

    vertices.extend(ball(&state.ball));
    vertices.extend(paddle(&state.computer));
    vertices.extend(paddle(&state.player));

    vertices
}

/// Striped ball, spun by its rotation angle
pub fn ball(ball: &Ball) -> Vec<Vertex> {
    let stripe_angle = 360.0 / BALL_STRIPES as f32;
    let spin = ball.rotation_angle % 360.0;
    let mut vertices = Vec::with_capacity((BALL_STRIPES * BALL_SEGMENTS_PER_STRIPE * 3) as usize);

    for i in 0..BALL_STRIPES {
        let color = if i % 2 == 0 {
            colors::BALL_STRIPE_A
        } else {
            colors::BALL_STRIPE_B
        };
        let start = spin + i as f32 * stripe_angle;
        vertices.extend(shapes::circle_sector(
            ball.pos,
            ball.radius,
            start,
            start + stripe_angle,
            color,
            BALL_SEGMENTS_PER_STRIPE,
        ));
    }

    vertices
}

pub fn paddle(paddle: &Paddle) -> Vec<Vertex> {
    shapes::rounded_rect(paddle.pos, paddle.size, PADDLE_ROUNDNESS, colors::PADDLE, 6)
}
