//! Game state and core simulation types
//!
//! Everything the frame driver mutates lives in [`GameState`]; there are no
//! process-wide globals.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::stepper::BallStepper;
use super::tick::TickInput;
use crate::consts::*;
use crate::settings::{Settings, SettingsError};

/// Playing field, origin at the top-left corner, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub width: f32,
    pub height: f32,
}

impl Default for Court {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

impl Court {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Which side of the match an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Human paddle, right side of the court
    Player,
    /// Ball-tracking paddle, left side of the court
    Computer,
}

/// Vertical path the ball follows between bounces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathMode {
    #[default]
    Straight,
    CurveUp,
    CurveDown,
}

impl PathMode {
    /// Next mode in the Straight -> CurveUp -> CurveDown cycle
    pub fn next(self) -> Self {
        match self {
            PathMode::Straight => PathMode::CurveUp,
            PathMode::CurveUp => PathMode::CurveDown,
            PathMode::CurveDown => PathMode::Straight,
        }
    }

    /// Extra vertical displacement added to the ball each frame
    pub fn vertical_offset(self) -> f32 {
        match self {
            PathMode::Straight => 0.0,
            PathMode::CurveUp => CURVE_OFFSET,
            PathMode::CurveDown => -CURVE_OFFSET,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PathMode::Straight => "Straight",
            PathMode::CurveUp => "Curve Up",
            PathMode::CurveDown => "Curve Down",
        }
    }
}

/// Which ball stepper computes the per-frame translation
///
/// Both produce identical results; the choice only matters for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpdateMode {
    #[default]
    Scalar,
    Vectorized,
}

impl UpdateMode {
    pub fn toggle(self) -> Self {
        match self {
            UpdateMode::Scalar => UpdateMode::Vectorized,
            UpdateMode::Vectorized => UpdateMode::Scalar,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateMode::Scalar => "Scalar",
            UpdateMode::Vectorized => "Vectorized",
        }
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball bounced off a paddle
    PaddleHit { side: Side },
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// Side scored a point and the ball was reset
    Scored { side: Side },
    PathModeChanged(PathMode),
    UpdateModeChanged(UpdateMode),
}

/// The shuttle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per frame; only the signs ever change
    pub speed: IVec2,
    pub radius: f32,
    /// Degrees, drives the striped spin on screen only
    pub rotation_angle: f32,
}

impl Ball {
    pub fn new(pos: Vec2, speed: IVec2, radius: f32) -> Self {
        Self {
            pos,
            speed,
            radius,
            rotation_angle: 0.0,
        }
    }

    /// Advance one frame: move, clamp against top/bottom, check the goal lines.
    ///
    /// Returns whether a wall was touched and the side that scored, if the
    /// ball crossed either end. Scoring does not reset the ball; the caller
    /// owns the RNG for that.
    pub fn update(
        &mut self,
        stepper: &dyn BallStepper,
        path: PathMode,
        court: &Court,
    ) -> (bool, Option<Side>) {
        stepper.advance(self, path);
        let bounced = self.clamp_to_court(court);
        (bounced, self.scoring_side(court))
    }

    /// Push the ball back inside the top/bottom walls and aim it away.
    ///
    /// Returns true if a wall was touched.
    pub fn clamp_to_court(&mut self, court: &Court) -> bool {
        if self.pos.y - self.radius < 0.0 {
            self.pos.y = self.radius;
            self.speed.y = self.speed.y.abs();
            true
        } else if self.pos.y + self.radius > court.height {
            self.pos.y = court.height - self.radius;
            self.speed.y = -self.speed.y.abs();
            true
        } else {
            false
        }
    }

    /// Side awarded a point if the ball has reached a goal line
    pub fn scoring_side(&self, court: &Court) -> Option<Side> {
        if self.pos.x + self.radius >= court.width {
            // Got past the player on the right
            Some(Side::Computer)
        } else if self.pos.x - self.radius <= 0.0 {
            Some(Side::Player)
        } else {
            None
        }
    }

    /// Serve again from the centre with freshly randomized directions
    pub fn reset<R: Rng>(&mut self, court: &Court, rng: &mut R) {
        self.pos = court.center();
        self.speed.x *= random_sign(rng);
        self.speed.y *= random_sign(rng);
        self.rotation_angle = 0.0;
    }

    pub fn reverse_rotation(&mut self) {
        self.rotation_angle = -self.rotation_angle;
    }
}

fn random_sign<R: Rng>(rng: &mut R) -> i32 {
    if rng.random_bool(0.5) { 1 } else { -1 }
}

/// How a paddle decides where to go each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleControl {
    /// Follows the up/down keys
    Keyboard,
    /// Steps toward the ball's height every frame
    TrackBall,
}

/// A paddle; only ever moves vertically
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    /// Width, height
    pub size: Vec2,
    /// Pixels per frame
    pub speed: f32,
    pub control: PaddleControl,
}

impl Paddle {
    /// Paddle at column `x`, centred vertically on the court
    pub fn new(x: f32, size: Vec2, speed: f32, control: PaddleControl, court: &Court) -> Self {
        Self {
            pos: Vec2::new(x, court.height / 2.0 - size.y / 2.0),
            size,
            speed,
            control,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Move one frame according to this paddle's control, then clamp.
    ///
    /// In demo mode a keyboard paddle tracks the ball as well.
    pub fn update(&mut self, input: &TickInput, ball_y: f32, court: &Court) {
        let control = if input.demo_mode {
            PaddleControl::TrackBall
        } else {
            self.control
        };
        match control {
            PaddleControl::Keyboard => self.move_by_keys(input.up, input.down),
            PaddleControl::TrackBall => self.track(ball_y),
        }
        self.limit_movement(court);
    }

    /// Both keys held apply both steps, up first
    fn move_by_keys(&mut self, up: bool, down: bool) {
        if up {
            self.pos.y -= self.speed;
        }
        if down {
            self.pos.y += self.speed;
        }
    }

    fn track(&mut self, ball_y: f32) {
        if self.center_y() > ball_y {
            self.pos.y -= self.speed;
        } else {
            self.pos.y += self.speed;
        }
    }

    fn limit_movement(&mut self, court: &Court) {
        self.pos.y = self.pos.y.clamp(0.0, court.height - self.size.y);
    }
}

/// Points per side for the current run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub computer: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Computer => self.computer += 1,
        }
    }
}

/// Complete match state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub court: Court,
    pub ball: Ball,
    /// Keyboard paddle on the right
    pub player: Paddle,
    /// Ball-tracking paddle on the left
    pub computer: Paddle,
    pub score: Score,
    pub path_mode: PathMode,
    pub update_mode: UpdateMode,
    /// Simulation frame counter
    pub frame: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new match with default settings
    pub fn new(seed: u64) -> Self {
        Self::build(&Settings::default(), seed)
    }

    /// Create a new match from validated settings
    pub fn from_settings(settings: &Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::build(settings, seed))
    }

    fn build(settings: &Settings, seed: u64) -> Self {
        let court = settings.court();
        let paddle_size = Vec2::new(settings.paddle_width, settings.paddle_height);

        let ball = Ball::new(
            court.center(),
            IVec2::new(settings.ball_speed_x, settings.ball_speed_y),
            settings.ball_radius,
        );
        let player = Paddle::new(
            court.width - settings.paddle_width - settings.paddle_margin,
            paddle_size,
            settings.paddle_speed,
            PaddleControl::Keyboard,
            &court,
        );
        let computer = Paddle::new(
            settings.paddle_margin,
            paddle_size,
            settings.paddle_speed,
            PaddleControl::TrackBall,
            &court,
        );

        Self {
            seed,
            court,
            ball,
            player,
            computer,
            score: Score::default(),
            path_mode: PathMode::default(),
            update_mode: UpdateMode::default(),
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Re-serve the ball using the match RNG
    pub fn reset_ball(&mut self) {
        self.ball.reset(&self.court, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ScalarStepper;
    use proptest::prelude::*;

    fn court() -> Court {
        Court {
            width: 1280.0,
            height: 800.0,
        }
    }

    fn make_paddle(x: f32, control: PaddleControl) -> Paddle {
        Paddle::new(x, Vec2::new(25.0, 120.0), 6.0, control, &court())
    }

    #[test]
    fn test_straight_step_moves_and_spins() {
        let mut ball = Ball::new(Vec2::new(640.0, 400.0), IVec2::new(5, 5), 18.0);
        let (bounced, scored) = ball.update(&ScalarStepper, PathMode::Straight, &court());

        assert!(!bounced);
        assert_eq!(scored, None);
        assert_eq!(ball.pos, Vec2::new(645.0, 405.0));
        assert_eq!(ball.rotation_angle, 150.0);
    }

    #[test]
    fn test_top_wall_clamps_and_flips() {
        let mut ball = Ball::new(Vec2::new(640.0, 5.0), IVec2::new(5, -5), 18.0);
        let (bounced, _) = ball.update(&ScalarStepper, PathMode::Straight, &court());

        assert!(bounced);
        assert_eq!(ball.pos.y, 18.0);
        assert_eq!(ball.speed.y, 5);
    }

    #[test]
    fn test_bottom_wall_clamps_and_flips() {
        let mut ball = Ball::new(Vec2::new(640.0, 790.0), IVec2::new(5, 5), 18.0);
        ball.update(&ScalarStepper, PathMode::Straight, &court());

        assert_eq!(ball.pos.y, 782.0);
        assert_eq!(ball.speed.y, -5);
    }

    #[test]
    fn test_curve_modes_offset_vertical_step() {
        let start = Ball::new(Vec2::new(640.0, 400.0), IVec2::new(5, 5), 18.0);

        let mut up = start;
        up.update(&ScalarStepper, PathMode::CurveUp, &court());
        assert_eq!(up.pos.y, 410.0);

        let mut down = start;
        down.update(&ScalarStepper, PathMode::CurveDown, &court());
        assert_eq!(down.pos.y, 400.0);
    }

    #[test]
    fn test_scoring_sides() {
        let c = court();
        let right = Ball::new(Vec2::new(1262.0, 400.0), IVec2::new(5, 5), 18.0);
        assert_eq!(right.scoring_side(&c), Some(Side::Computer));

        let left = Ball::new(Vec2::new(18.0, 400.0), IVec2::new(-5, 5), 18.0);
        assert_eq!(left.scoring_side(&c), Some(Side::Player));

        let mid = Ball::new(Vec2::new(640.0, 400.0), IVec2::new(5, 5), 18.0);
        assert_eq!(mid.scoring_side(&c), None);
    }

    #[test]
    fn test_reset_recentres_and_keeps_magnitude() {
        let c = court();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ball = Ball::new(Vec2::new(1270.0, 12.0), IVec2::new(5, -7), 18.0);
        ball.rotation_angle = 900.0;

        for _ in 0..20 {
            ball.reset(&c, &mut rng);
            assert_eq!(ball.pos, Vec2::new(640.0, 400.0));
            assert_eq!(ball.speed.x.abs(), 5);
            assert_eq!(ball.speed.y.abs(), 7);
            assert_eq!(ball.rotation_angle, 0.0);
        }
    }

    #[test]
    fn test_computer_paddle_moves_toward_ball() {
        let c = court();
        let mut paddle = make_paddle(10.0, PaddleControl::TrackBall);
        assert_eq!(paddle.pos.y, 340.0);
        assert_eq!(paddle.center_y(), 400.0);

        paddle.update(&TickInput::default(), 200.0, &c);
        assert_eq!(paddle.pos.y, 334.0);

        // Centre level with the ball still steps down
        let mut level = make_paddle(10.0, PaddleControl::TrackBall);
        level.update(&TickInput::default(), 400.0, &c);
        assert_eq!(level.pos.y, 346.0);
    }

    #[test]
    fn test_keyboard_paddle_follows_keys() {
        let c = court();
        let mut paddle = make_paddle(1245.0, PaddleControl::Keyboard);

        let up = TickInput {
            up: true,
            ..Default::default()
        };
        paddle.update(&up, 0.0, &c);
        assert_eq!(paddle.pos.y, 334.0);

        let both = TickInput {
            up: true,
            down: true,
            ..Default::default()
        };
        paddle.update(&both, 0.0, &c);
        assert_eq!(paddle.pos.y, 334.0);

        // No keys, ball ignored
        paddle.update(&TickInput::default(), 0.0, &c);
        assert_eq!(paddle.pos.y, 334.0);
    }

    #[test]
    fn test_demo_mode_tracks_with_keyboard_paddle() {
        let c = court();
        let mut paddle = make_paddle(1245.0, PaddleControl::Keyboard);
        let demo = TickInput {
            demo_mode: true,
            ..Default::default()
        };
        paddle.update(&demo, 700.0, &c);
        assert_eq!(paddle.pos.y, 346.0);
    }

    #[test]
    fn test_paddle_clamps_at_edges() {
        let c = court();
        let mut paddle = make_paddle(1245.0, PaddleControl::Keyboard);
        paddle.pos.y = 3.0;
        let up = TickInput {
            up: true,
            ..Default::default()
        };
        paddle.update(&up, 0.0, &c);
        assert_eq!(paddle.pos.y, 0.0);

        paddle.pos.y = 678.0;
        let down = TickInput {
            down: true,
            ..Default::default()
        };
        paddle.update(&down, 0.0, &c);
        assert_eq!(paddle.pos.y, 680.0);
    }

    #[test]
    fn test_path_mode_cycle_is_identity_after_three() {
        let mut mode = PathMode::CurveDown;
        for _ in 0..3 {
            mode = mode.next();
        }
        assert_eq!(mode, PathMode::CurveDown);
        assert_eq!(PathMode::Straight.next(), PathMode::CurveUp);
    }

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(1);
        assert_eq!(state.ball.pos, Vec2::new(640.0, 400.0));
        assert_eq!(state.player.pos, Vec2::new(1245.0, 340.0));
        assert_eq!(state.computer.pos, Vec2::new(10.0, 340.0));
        assert_eq!(state.score, Score::default());
        assert_eq!(state.frame, 0);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_on_court(
            start in 0.0f32..680.0,
            ball_y in -100.0f32..900.0,
            up in any::<bool>(),
            down in any::<bool>(),
            tracking in any::<bool>(),
        ) {
            let c = court();
            let control = if tracking { PaddleControl::TrackBall } else { PaddleControl::Keyboard };
            let mut paddle = Paddle::new(10.0, Vec2::new(25.0, 120.0), 6.0, control, &c);
            paddle.pos.y = start;
            let input = TickInput { up, down, ..Default::default() };
            for _ in 0..200 {
                paddle.update(&input, ball_y, &c);
                prop_assert!(paddle.pos.y >= 0.0);
                prop_assert!(paddle.pos.y <= c.height - paddle.size.y);
            }
        }

        #[test]
        fn prop_ball_never_leaves_vertical_bounds(
            y in 18.0f32..782.0,
            sy in prop::sample::select(vec![-9, -5, -1, 1, 5, 9]),
            path in prop::sample::select(vec![
                PathMode::Straight,
                PathMode::CurveUp,
                PathMode::CurveDown,
            ]),
        ) {
            let c = court();
            let mut ball = Ball::new(Vec2::new(640.0, y), IVec2::new(0, sy), 18.0);
            for _ in 0..500 {
                ball.update(&ScalarStepper, path, &c);
                prop_assert!(ball.pos.y - ball.radius >= 0.0);
                prop_assert!(ball.pos.y + ball.radius <= c.height);
            }
        }
    }
}
