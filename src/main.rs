//! Badminton Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use badminton_pong::renderer::{RenderState, build_frame};
    use badminton_pong::sim::TickInput;
    use badminton_pong::{FrameDriver, Settings, clock_seed};

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver,
        render_state: Option<RenderState>,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(driver: FrameDriver) -> Self {
            Self {
                driver,
                render_state: None,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation frames for the elapsed time
        fn update(&mut self, dt: f32, time: f64) {
            self.driver.advance(dt, &mut self.input);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_frame(self.driver.state());
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.driver.state();

            let fields = [
                ("#hud-computer .hud-value", state.score.computer.to_string()),
                ("#hud-player .hud-value", state.score.player.to_string()),
                ("#hud-path .hud-value", state.path_mode.as_str().to_string()),
                ("#hud-mode .hud-value", state.update_mode.as_str().to_string()),
                ("#hud-fps .hud-value", self.fps.to_string()),
            ];
            for (selector, text) in fields {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    if el.text_content().as_deref() != Some(text.as_str()) {
                        el.set_text_content(Some(&text));
                    }
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Badminton Pong starting...");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(clock_seed);
        let driver = match FrameDriver::new(&settings, seed) {
            Ok(driver) => driver,
            Err(e) => {
                log::error!("Invalid settings: {}", e);
                return;
            }
        };
        let court = driver.state().court;

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new(driver)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, court).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_input_handlers(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Badminton Pong running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down: held keys plus one-shot toggles
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowUp" => {
                        event.prevent_default();
                        g.input.up = true;
                    }
                    "ArrowDown" => {
                        event.prevent_default();
                        g.input.down = true;
                    }
                    "p" | "P" if !event.repeat() => g.input.cycle_path = true,
                    "m" | "M" if !event.repeat() => g.input.toggle_update_mode = true,
                    "i" | "I" if !event.repeat() => {
                        g.input.demo_mode = !g.input.demo_mode;
                        log::info!("Demo mode: {}", g.input.demo_mode);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: release held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowUp" => g.input.up = false,
                    "ArrowDown" => g.input.down = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                g.driver.frame_dt()
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;
    use std::time::{Duration, Instant};

    use clap::Parser;

    use badminton_pong::sim::{GameState, TickInput};
    use badminton_pong::{FrameDriver, Platform, Settings, clock_seed};

    #[derive(Parser)]
    #[command(name = "badminton-pong")]
    #[command(about = "Run a headless demo match (both paddles track the ball)")]
    struct Args {
        /// Frames to play before closing
        #[arg(long, default_value_t = 3300)]
        frames: u64,

        /// RNG seed (overrides the settings file)
        #[arg(long)]
        seed: Option<u64>,

        /// JSON settings file
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Pace frames at the target frame rate instead of running flat out
        #[arg(long)]
        realtime: bool,

        /// Cycle the path mode every N frames
        #[arg(long)]
        cycle_path_every: Option<u64>,
    }

    /// Stands in for a window: no drawing, keys replaced by demo tracking
    struct HeadlessPlatform {
        frames_left: u64,
        frame: u64,
        cycle_path_every: Option<u64>,
        /// Some when pacing to real time
        frame_budget: Option<Duration>,
        frame_start: Instant,
    }

    impl Platform for HeadlessPlatform {
        fn close_requested(&self) -> bool {
            self.frames_left == 0
        }

        fn poll_input(&mut self) -> TickInput {
            self.frame_start = Instant::now();
            let cycle_path = self
                .cycle_path_every
                .is_some_and(|n| n > 0 && self.frame > 0 && self.frame % n == 0);
            TickInput {
                demo_mode: true,
                cycle_path,
                ..Default::default()
            }
        }

        fn present(&mut self, state: &GameState) {
            log::trace!(
                "frame {} ball ({:.1}, {:.1})",
                state.frame,
                state.ball.pos.x,
                state.ball.pos.y
            );
        }

        fn end_frame(&mut self) {
            self.frames_left -= 1;
            self.frame += 1;
            if let Some(budget) = self.frame_budget {
                let spent = self.frame_start.elapsed();
                if spent < budget {
                    std::thread::sleep(budget - spent);
                }
            }
        }
    }

    pub fn main() -> ExitCode {
        env_logger::init();
        let args = Args::parse();

        let settings = match &args.settings {
            Some(path) => match Settings::load_from(path) {
                Ok(settings) => settings,
                Err(e) => {
                    log::error!("{}", e);
                    return ExitCode::FAILURE;
                }
            },
            None => Settings::default(),
        };
        let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);

        let mut driver = match FrameDriver::new(&settings, seed) {
            Ok(driver) => driver,
            Err(e) => {
                log::error!("Invalid settings: {}", e);
                return ExitCode::FAILURE;
            }
        };

        log::info!("Badminton Pong (headless) starting, {} frames", args.frames);
        let mut platform = HeadlessPlatform {
            frames_left: args.frames,
            frame: 0,
            cycle_path_every: args.cycle_path_every,
            frame_budget: args
                .realtime
                .then(|| Duration::from_secs_f32(driver.frame_dt())),
            frame_start: Instant::now(),
        };

        let summary = driver.run(&mut platform);
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to encode summary: {}", e),
        }
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
