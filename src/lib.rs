//! Badminton Pong - a two-paddle court game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddles, collisions, scoring)
//! - `driver`: Frame loop over a rendering/input collaborator
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Court geometry and tuning, loaded from JSON

pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{FrameDriver, MatchSummary, Platform};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Target frame rate; every speed in the game is expressed per frame
    pub const TARGET_FPS: u32 = 55;
    /// Maximum substeps per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Court dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_START_SPEED_X: i32 = 5;
    pub const BALL_START_SPEED_Y: i32 = 5;
    /// Degrees of spin added per pixel of horizontal travel
    pub const BALL_SPIN_PER_PIXEL: f32 = 30.0;
    /// Extra vertical displacement per frame in a curved path mode
    pub const CURVE_OFFSET: f32 = 5.0;
    /// Gap left between ball and paddle after a hit
    pub const PADDLE_SEPARATION: f32 = 1.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 25.0;
    pub const PADDLE_HEIGHT: f32 = 120.0;
    pub const PADDLE_SPEED: f32 = 6.0;
    /// Distance between a paddle and its side of the court
    pub const PADDLE_MARGIN: f32 = 10.0;
}

/// Seed derived from the wall clock, for runs that don't ask for a fixed one
#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Seed derived from the browser clock
#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}
