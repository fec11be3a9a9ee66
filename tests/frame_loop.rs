//! Drives whole matches through the frame loop with a scripted platform.

use badminton_pong::sim::{GameEvent, GameState, PathMode, Side, TickInput, UpdateMode};
use badminton_pong::{FrameDriver, Platform, Settings};

/// Replays a fixed list of inputs, then asks to close
struct ScriptedPlatform {
    script: Vec<TickInput>,
    next: usize,
    presented: Vec<(u64, f32, f32)>,
    paddle_ys: Vec<(f32, f32)>,
}

impl ScriptedPlatform {
    fn new(script: Vec<TickInput>) -> Self {
        Self {
            script,
            next: 0,
            presented: Vec::new(),
            paddle_ys: Vec::new(),
        }
    }
}

impl Platform for ScriptedPlatform {
    fn close_requested(&self) -> bool {
        self.next >= self.script.len()
    }

    fn poll_input(&mut self) -> TickInput {
        let input = self.script[self.next].clone();
        self.next += 1;
        input
    }

    fn present(&mut self, state: &GameState) {
        self.presented.push((state.frame, state.ball.pos.y, state.ball.radius));
        self.paddle_ys.push((state.player.pos.y, state.computer.pos.y));
    }
}

fn demo(frames: usize) -> Vec<TickInput> {
    vec![
        TickInput {
            demo_mode: true,
            ..Default::default()
        };
        frames
    ]
}

#[test]
fn loop_runs_until_close_and_presents_every_frame() {
    let mut driver = FrameDriver::new(&Settings::default(), 11).unwrap();
    let mut platform = ScriptedPlatform::new(demo(500));

    let summary = driver.run(&mut platform);

    assert_eq!(summary.frames, 500);
    assert_eq!(summary.seed, 11);
    assert_eq!(platform.presented.len(), 500);
    assert_eq!(platform.presented.last().map(|p| p.0), Some(500));
}

#[test]
fn ball_and_paddles_stay_on_court_for_a_long_match() {
    let settings = Settings::default();
    let mut driver = FrameDriver::new(&settings, 2024).unwrap();

    // Mix of held keys, demo tracking and path changes
    let mut script = Vec::new();
    for i in 0..20_000 {
        script.push(TickInput {
            up: i % 300 < 120,
            down: i % 500 > 350,
            demo_mode: i % 4000 > 2000,
            cycle_path: i % 1500 == 0,
            ..Default::default()
        });
    }
    let mut platform = ScriptedPlatform::new(script);
    let summary = driver.run(&mut platform);

    for &(_, y, r) in &platform.presented {
        assert!(y - r >= 0.0, "ball above court: y={y}");
        assert!(y + r <= settings.screen_height, "ball below court: y={y}");
    }
    for &(player, computer) in &platform.paddle_ys {
        for y in [player, computer] {
            assert!(y >= 0.0);
            assert!(y <= settings.screen_height - settings.paddle_height);
        }
    }

    // A keyboard player who mostly ignores the ball concedes points
    assert!(summary.player_score + summary.computer_score > 0);
}

#[test]
fn scores_only_ever_increase_by_one() {
    let mut driver = FrameDriver::new(&Settings::default(), 5).unwrap();
    let mut last = (0, 0);

    for _ in 0..20_000 {
        driver.frame(&TickInput::default());
        let score = driver.state().score;
        let gained = (score.player - last.0) + (score.computer - last.1);
        assert!(gained <= 1);
        if gained == 1 {
            let state = driver.state();
            assert_eq!(state.ball.pos, state.court.center());
            assert_eq!(state.ball.speed.x.abs(), 5);
            assert_eq!(state.ball.speed.y.abs(), 5);
        }
        last = (score.player, score.computer);
    }
}

#[test]
fn same_seed_same_match() {
    let run = |seed| {
        let mut driver = FrameDriver::new(&Settings::default(), seed).unwrap();
        driver.run(&mut ScriptedPlatform::new(demo(10_000)))
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn switching_update_mode_mid_match_changes_nothing() {
    let mut toggling = demo(8_000);
    for (i, input) in toggling.iter_mut().enumerate() {
        input.toggle_update_mode = i % 333 == 0;
        input.cycle_path = i % 1_000 == 0;
    }
    let mut steady = toggling.clone();
    for input in steady.iter_mut() {
        input.toggle_update_mode = false;
    }

    let mut a = FrameDriver::new(&Settings::default(), 9).unwrap();
    let mut b = FrameDriver::new(&Settings::default(), 9).unwrap();
    a.run(&mut ScriptedPlatform::new(toggling));
    b.run(&mut ScriptedPlatform::new(steady));

    assert_ne!(a.state().update_mode, b.state().update_mode);
    assert_eq!(b.state().update_mode, UpdateMode::Scalar);
    assert_eq!(a.state().ball, b.state().ball);
    assert_eq!(a.state().score, b.state().score);
    assert_eq!(a.state().path_mode, b.state().path_mode);
    assert_ne!(a.state().path_mode, PathMode::default());
}

#[test]
fn settings_file_geometry_reaches_the_court() {
    let settings = Settings::from_json(
        r#"{ "screen_width": 1600, "screen_height": 900, "paddle_height": 200, "seed": 3 }"#,
    )
    .unwrap();
    let driver = FrameDriver::new(&settings, settings.seed.unwrap()).unwrap();
    let state = driver.state();

    assert_eq!(state.court.width, 1600.0);
    assert_eq!(state.player.size.y, 200.0);
    assert_eq!(state.player.pos.y, 350.0);
    assert_eq!(state.ball.pos.x, 800.0);
}

#[test]
fn fastest_accepted_serve_still_meets_the_paddle() {
    let settings = Settings {
        ball_speed_x: 34,
        ..Default::default()
    };
    settings.validate().unwrap();
    let mut driver = FrameDriver::new(&settings, 1).unwrap();
    let input = TickInput {
        demo_mode: true,
        ..Default::default()
    };

    let first = (0..40)
        .flat_map(|_| driver.frame(&input))
        .find(|e| matches!(e, GameEvent::PaddleHit { .. } | GameEvent::Scored { .. }));

    assert_eq!(first, Some(GameEvent::PaddleHit { side: Side::Player }));
    assert_eq!(driver.state().score.computer, 0);
}

#[test]
fn settings_that_would_tunnel_are_refused() {
    let settings = Settings::from_json(r#"{ "ball_speed_x": 200 }"#).unwrap();
    assert!(FrameDriver::new(&settings, 1).is_err());

    let settings = Settings::from_json(r#"{ "ball_speed_y": -2147483648 }"#).unwrap();
    assert!(FrameDriver::new(&settings, 1).is_err());
}
