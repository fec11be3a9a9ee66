//! Frame driver
//!
//! Owns the match state and runs it against a [`Platform`], the
//! rendering/input collaborator. The match has a single running state; the
//! only way out is the platform reporting a close request.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SUBSTEPS;
use crate::settings::{Settings, SettingsError};
use crate::sim::{GameEvent, GameState, PathMode, TickInput, UpdateMode, tick};

/// Window, input and frame pacing provided by the front end
pub trait Platform {
    /// Window close was requested
    fn close_requested(&self) -> bool;
    /// Sample the keyboard for this frame
    fn poll_input(&mut self) -> TickInput;
    /// Draw the current frame
    fn present(&mut self, state: &GameState);
    /// Block until the next frame is due
    fn end_frame(&mut self) {}
}

/// Final tally of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub frames: u64,
    pub player_score: u32,
    pub computer_score: u32,
    pub path_mode: PathMode,
    pub update_mode: UpdateMode,
}

/// Runs the simulation one frame at a time
pub struct FrameDriver {
    state: GameState,
    /// Seconds per simulation frame
    frame_dt: f32,
    accumulator: f32,
}

impl FrameDriver {
    /// Validate settings and set up a fresh match
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, SettingsError> {
        let state = GameState::from_settings(settings, seed)?;
        log::info!(
            "Match ready: {}x{} court, seed {}",
            state.court.width,
            state.court.height,
            seed
        );
        Ok(Self {
            state,
            frame_dt: 1.0 / settings.target_fps as f32,
            accumulator: 0.0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Seconds per simulation frame
    pub fn frame_dt(&self) -> f32 {
        self.frame_dt
    }

    /// Advance exactly one simulation frame and log what happened
    pub fn frame(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input);
        for event in &events {
            self.log_event(event);
        }
        events
    }

    /// Feed wall-clock time from a variable-rate loop (requestAnimationFrame)
    ///
    /// Runs as many fixed frames as have accumulated, up to a cap.
    /// Edge-triggered commands in `input` are consumed by the first frame.
    /// Returns the number of frames simulated.
    pub fn advance(&mut self, dt: f32, input: &mut TickInput) -> u32 {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.frame_dt && substeps < MAX_SUBSTEPS {
            self.frame(input);
            input.clear_one_shots();
            self.accumulator -= self.frame_dt;
            substeps += 1;
        }

        // Drop backlog we refused to simulate
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.frame_dt);
        }
        substeps
    }

    /// Blocking loop: poll, simulate, present, pace - until close is requested
    pub fn run<P: Platform>(&mut self, platform: &mut P) -> MatchSummary {
        log::info!("Entering frame loop");
        while !platform.close_requested() {
            let input = platform.poll_input();
            self.frame(&input);
            platform.present(&self.state);
            platform.end_frame();
        }
        let summary = self.summary();
        log::info!(
            "Close requested after {} frames, score {}-{}",
            summary.frames,
            summary.player_score,
            summary.computer_score
        );
        summary
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            seed: self.state.seed,
            frames: self.state.frame,
            player_score: self.state.score.player,
            computer_score: self.state.score.computer,
            path_mode: self.state.path_mode,
            update_mode: self.state.update_mode,
        }
    }

    fn log_event(&self, event: &GameEvent) {
        match event {
            GameEvent::Scored { side } => log::info!(
                "{:?} scores ({} - {})",
                side,
                self.state.score.player,
                self.state.score.computer
            ),
            GameEvent::PathModeChanged(mode) => log::info!("Path mode: {}", mode.as_str()),
            GameEvent::UpdateModeChanged(mode) => log::info!("Update mode: {}", mode.as_str()),
            GameEvent::PaddleHit { side } => log::debug!("{:?} paddle hit", side),
            GameEvent::WallBounce => log::trace!("wall bounce"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> FrameDriver {
        FrameDriver::new(&Settings::default(), 42).unwrap()
    }

    #[test]
    fn test_invalid_settings_are_fatal() {
        let settings = Settings {
            paddle_height: 1000.0,
            ..Default::default()
        };
        assert!(FrameDriver::new(&settings, 1).is_err());
    }

    #[test]
    fn test_advance_runs_whole_frames() {
        let mut driver = driver();
        let mut input = TickInput::default();
        let dt = driver.frame_dt();

        assert_eq!(driver.advance(dt * 0.5, &mut input), 0);
        assert_eq!(driver.advance(dt * 0.6, &mut input), 1);
        assert_eq!(driver.state().frame, 1);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut driver = driver();
        let mut input = TickInput::default();

        // A long stall is clamped to 0.1s and then to the substep cap
        assert_eq!(driver.advance(5.0, &mut input), MAX_SUBSTEPS);
        assert!(driver.advance(0.0, &mut input) <= 1);
    }

    #[test]
    fn test_advance_consumes_one_shots() {
        let mut driver = driver();
        let mut input = TickInput {
            cycle_path: true,
            ..Default::default()
        };
        let dt = driver.frame_dt();

        driver.advance(dt * 3.5, &mut input);
        assert_eq!(driver.state().path_mode, PathMode::CurveUp);
        assert!(!input.cycle_path);
    }

    #[test]
    fn test_summary_tracks_state() {
        let mut driver = driver();
        for _ in 0..10 {
            driver.frame(&TickInput::default());
        }
        let summary = driver.summary();
        assert_eq!(summary.seed, 42);
        assert_eq!(summary.frames, 10);
        assert_eq!(summary.player_score + summary.computer_score, 0);
    }
}
