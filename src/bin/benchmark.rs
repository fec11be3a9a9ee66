//! Benchmark binary: times the ball steppers against each other.
//!
//! Plays the same seeded demo match once per update mode, checks the runs
//! end in identical states, and reports wall time per frame. A second pass
//! times the stepper alone, without paddles or collisions.
//!
//! Usage:
//!   cargo run --release --bin benchmark -- --frames 1000000

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    bench::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod bench {
    use std::hint::black_box;
    use std::process::ExitCode;
    use std::time::{Duration, Instant};

    use clap::Parser;

    use badminton_pong::Settings;
    use badminton_pong::sim::{
        Ball, Court, GameState, PathMode, TickInput, UpdateMode, stepper_for, tick,
    };

    #[derive(Parser)]
    #[command(name = "pong-benchmark")]
    #[command(about = "Compare the scalar and vectorized ball steppers")]
    struct Args {
        /// Frames per run
        #[arg(long, default_value_t = 1_000_000)]
        frames: u64,

        /// Match seed
        #[arg(long, default_value_t = 55)]
        seed: u64,

        /// Cycle the path mode every N frames (0 = never)
        #[arg(long, default_value_t = 997)]
        cycle_path_every: u64,
    }

    struct RunResult {
        state: GameState,
        elapsed: Duration,
    }

    fn run_match(mut state: GameState, mode: UpdateMode, args: &Args) -> RunResult {
        state.update_mode = mode;

        let start = Instant::now();
        for frame in 0..args.frames {
            let input = TickInput {
                demo_mode: true,
                cycle_path: args.cycle_path_every > 0 && frame % args.cycle_path_every == 0,
                ..Default::default()
            };
            black_box(tick(&mut state, &input));
        }
        RunResult {
            state,
            elapsed: start.elapsed(),
        }
    }

    fn time_stepper(
        mut ball: Ball,
        court: &Court,
        mode: UpdateMode,
        frames: u64,
    ) -> (Ball, Duration) {
        let stepper = stepper_for(mode);

        let start = Instant::now();
        for _ in 0..frames {
            let (_, scored) = ball.update(stepper, black_box(PathMode::Straight), court);
            if scored.is_some() {
                ball.pos = court.center();
            }
        }
        (black_box(ball), start.elapsed())
    }

    fn ns_per_frame(elapsed: Duration, frames: u64) -> f64 {
        if frames == 0 {
            0.0
        } else {
            elapsed.as_nanos() as f64 / frames as f64
        }
    }

    pub fn main() -> ExitCode {
        env_logger::init();
        let args = Args::parse();
        let base = match GameState::from_settings(&Settings::default(), args.seed) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Invalid settings: {}", e);
                return ExitCode::FAILURE;
            }
        };

        println!("Frames per run: {}", args.frames);
        println!("Seed:           {}", args.seed);
        println!();

        let scalar = run_match(base.clone(), UpdateMode::Scalar, &args);
        let vectorized = run_match(base.clone(), UpdateMode::Vectorized, &args);

        let identical = scalar.state.ball == vectorized.state.ball
            && scalar.state.player == vectorized.state.player
            && scalar.state.computer == vectorized.state.computer
            && scalar.state.score == vectorized.state.score;

        let (scalar_ball, scalar_step) =
            time_stepper(base.ball, &base.court, UpdateMode::Scalar, args.frames);
        let (vector_ball, vector_step) =
            time_stepper(base.ball, &base.court, UpdateMode::Vectorized, args.frames);

        println!("=== BENCHMARK RESULTS ===");
        for (mode, run, step) in [
            (UpdateMode::Scalar, &scalar, scalar_step),
            (UpdateMode::Vectorized, &vectorized, vector_step),
        ] {
            println!(
                "  {:<10}  match {:>8.3}s ({:>7.1} ns/frame)   stepper {:>8.3}s ({:>6.2} ns/frame)",
                mode.as_str(),
                run.elapsed.as_secs_f64(),
                ns_per_frame(run.elapsed, args.frames),
                step.as_secs_f64(),
                ns_per_frame(step, args.frames),
            );
        }
        println!(
            "  Final score:  {} - {}",
            scalar.state.score.player, scalar.state.score.computer
        );

        if !identical || scalar_ball != vector_ball {
            log::error!("Update modes diverged");
            println!("  Result:       DIVERGED");
            return ExitCode::FAILURE;
        }
        println!("  Result:       identical");
        ExitCode::SUCCESS
    }
}
