//! Court geometry and game tuning
//!
//! Loaded from JSON: a file on native, LocalStorage on the web. Any missing
//! field falls back to the defaults in [`crate::consts`]. Settings are
//! validated once at startup; a geometry that can't be played is fatal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Court;

/// Reasons a settings file can't be used
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file couldn't be read
    Io(std::io::Error),
    /// Settings JSON is malformed
    Parse(serde_json::Error),
    InvalidCourt { width: f32, height: f32 },
    /// Clamp range for the paddle would be empty
    PaddleTallerThanCourt { paddle_height: f32, court_height: f32 },
    BallTooLarge { radius: f32 },
    InvalidPaddleWidth { width: f32 },
    NegativePaddleMargin { margin: f32 },
    /// Not enough room between the paddles for the ball to pass
    CourtTooNarrow { gap: f32, ball_diameter: f32 },
    InvalidPaddleSpeed { speed: f32 },
    ZeroBallSpeed,
    /// A single frame's step would carry the ball through a paddle
    BallTooFast { speed: u32, limit: f32 },
    ZeroFrameRate,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read settings: {e}"),
            Self::Parse(e) => write!(f, "failed to parse settings: {e}"),
            Self::InvalidCourt { width, height } => {
                write!(f, "court must have positive size, got {width}x{height}")
            }
            Self::PaddleTallerThanCourt {
                paddle_height,
                court_height,
            } => write!(
                f,
                "paddle height {paddle_height} exceeds court height {court_height}"
            ),
            Self::BallTooLarge { radius } => {
                write!(f, "ball radius {radius} does not fit on the court")
            }
            Self::InvalidPaddleWidth { width } => {
                write!(f, "paddle width must be positive, got {width}")
            }
            Self::NegativePaddleMargin { margin } => {
                write!(f, "paddle margin must not be negative, got {margin}")
            }
            Self::CourtTooNarrow { gap, ball_diameter } => write!(
                f,
                "gap between paddles ({gap}) must exceed the ball diameter ({ball_diameter})"
            ),
            Self::InvalidPaddleSpeed { speed } => {
                write!(f, "paddle speed must be positive, got {speed}")
            }
            Self::ZeroBallSpeed => write!(f, "ball speed components must be non-zero"),
            Self::BallTooFast { speed, limit } => write!(
                f,
                "ball speed {speed} must be below {limit} to register paddle hits"
            ),
            Self::ZeroFrameRate => write!(f, "target frame rate must be non-zero"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Court ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Frames per second; all speeds are per frame
    pub target_fps: u32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_speed_x: i32,
    pub ball_speed_y: i32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    /// Gap between each paddle and its end of the court
    pub paddle_margin: f32,

    /// Fixed RNG seed; the clock is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            target_fps: TARGET_FPS,

            ball_radius: BALL_RADIUS,
            ball_speed_x: BALL_START_SPEED_X,
            ball_speed_y: BALL_START_SPEED_Y,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_margin: PADDLE_MARGIN,

            seed: None,
        }
    }
}

impl Settings {
    pub fn court(&self) -> Court {
        Court {
            width: self.screen_width,
            height: self.screen_height,
        }
    }

    /// Parse settings JSON, filling gaps with defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject geometry the simulation can't honour
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(SettingsError::InvalidCourt {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.target_fps == 0 {
            return Err(SettingsError::ZeroFrameRate);
        }
        if !(self.paddle_height > 0.0) || self.paddle_height > self.screen_height {
            return Err(SettingsError::PaddleTallerThanCourt {
                paddle_height: self.paddle_height,
                court_height: self.screen_height,
            });
        }
        let diameter = self.ball_radius * 2.0;
        if !(self.ball_radius > 0.0) || diameter > self.screen_height {
            return Err(SettingsError::BallTooLarge {
                radius: self.ball_radius,
            });
        }
        if !(self.paddle_width > 0.0) {
            return Err(SettingsError::InvalidPaddleWidth {
                width: self.paddle_width,
            });
        }
        if !(self.paddle_margin >= 0.0) {
            return Err(SettingsError::NegativePaddleMargin {
                margin: self.paddle_margin,
            });
        }
        let gap = self.screen_width - 2.0 * (self.paddle_margin + self.paddle_width);
        if gap <= diameter {
            return Err(SettingsError::CourtTooNarrow {
                gap,
                ball_diameter: diameter,
            });
        }
        if !(self.paddle_speed > 0.0) {
            return Err(SettingsError::InvalidPaddleSpeed {
                speed: self.paddle_speed,
            });
        }
        if self.ball_speed_x == 0 || self.ball_speed_y == 0 {
            return Err(SettingsError::ZeroBallSpeed);
        }
        // Stretch of x where the ball overlaps a paddle without having scored
        let limit = self.paddle_width + diameter.min(self.paddle_margin);
        for speed in [self.ball_speed_x, self.ball_speed_y] {
            let speed = speed.unsigned_abs();
            if speed as f32 >= limit {
                return Err(SettingsError::BallTooFast { speed, limit });
            }
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "badminton_pong_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
