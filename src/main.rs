//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::fmt::Write as _;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use brick_breaker::audio::AudioManager;
    use brick_breaker::particles::ParticleSystem;
    use brick_breaker::renderer::{DrawList, RenderState, TextAlign, draw_scene};
    use brick_breaker::sim::{GameState, TickInput, tick};
    use brick_breaker::{Settings, Tuning, css_color};

    /// Longest particle step after a stall (tab switch etc.)
    const MAX_FRAME_DT: f32 = 0.1;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        particles: ParticleSystem,
        audio: AudioManager,
        settings: Settings,
        render_state: Option<RenderState>,
        draw_list: DrawList,
        input: TickInput,
        last_time: f64,
        /// Overlay markup currently in the DOM
        overlay_html: String,
    }

    impl Game {
        fn new(tuning: Tuning, settings: Settings, seed: u64) -> Self {
            let particles =
                ParticleSystem::new(settings.max_particles(), tuning.particles_per_brick, seed);
            Self {
                state: GameState::new(tuning, seed),
                particles,
                audio: AudioManager::new(&settings),
                settings,
                render_state: None,
                draw_list: DrawList::new(),
                input: TickInput::default(),
                last_time: 0.0,
                overlay_html: String::new(),
            }
        }

        /// Run one simulation tick and feed its events to the collaborators
        fn update(&mut self, time_ms: f64) {
            let now = time_ms / 1000.0;
            let dt = if self.last_time > 0.0 {
                ((now - self.last_time) as f32).clamp(0.0, MAX_FRAME_DT)
            } else {
                0.0
            };
            self.last_time = now;

            tick(&mut self.state, &self.input, now);

            // Clear one-shot inputs after processing
            self.input.split = false;
            self.input.click = false;

            for event in self.state.drain_events() {
                log::debug!("{:?}", event);
                self.audio.handle_event(&event);
                self.particles.handle_event(&event);
            }
            self.particles.update(dt);
        }

        /// Render the current frame
        fn render(&mut self) {
            draw_scene(&self.state, &self.particles, &mut self.draw_list);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.draw_list) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        log::warn!("Surface lost, reconfiguring");
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Mirror the frame's text runs into the overlay element
        fn update_overlay(&mut self, document: &Document) {
            let html = overlay_markup(&self.draw_list, &self.state.tuning);
            if html == self.overlay_html {
                return;
            }
            if let Some(el) = document.get_element_by_id("overlay") {
                el.set_inner_html(&html);
            }
            self.overlay_html = html;
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.apply_settings(&self.settings);
            self.settings.save();
            log::info!("Muted: {}", self.settings.muted);
        }
    }

    /// Absolutely positioned spans, in percent of the playfield so they track
    /// the canvas at any CSS size
    fn overlay_markup(list: &DrawList, tuning: &Tuning) -> String {
        let mut html = String::new();
        for (text, pos, style) in list.texts() {
            let shift = match style.align {
                TextAlign::Left => "0%",
                TextAlign::Center => "-50%",
                TextAlign::Right => "-100%",
            };
            let _ = write!(
                html,
                "<span style=\"left:{:.2}%;top:{:.2}%;font-size:{:.2}cqw;color:{};transform:translate({},-80%)\">{}</span>",
                pos.x / tuning.canvas_width * 100.0,
                pos.y / tuning.canvas_height * 100.0,
                style.size / tuning.canvas_width * 100.0,
                css_color(style.color),
                shift,
                escape_html(text)
            );
        }
        html
    }

    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    /// Tuning from an optional `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let json = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty());
        match json {
            Some(json) => {
                log::info!("Loading tuning overrides from page");
                Tuning::from_json_or_default(&json)
            }
            None => Tuning::default(),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Brick Breaker starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let tuning = load_tuning(&document);
        let settings = Settings::load();

        // Set canvas backing size
        let dpr = window.device_pixel_ratio();
        let width = (f64::from(canvas.client_width()) * dpr) as u32;
        let height = (f64::from(canvas.client_height()) * dpr) as u32;
        canvas.set_width(width.max(1));
        canvas.set_height(height.max(1));

        let seed = js_sys::Date::now() as u64;
        let logical_size = (tuning.canvas_width, tuning.canvas_height);
        let game = Rc::new(RefCell::new(Game::new(tuning, settings, seed)));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match init_renderer(&instance, &canvas, width.max(1), height.max(1), logical_size).await {
            Some(render_state) => game.borrow_mut().render_state = Some(render_state),
            None => log::error!("Rendering unavailable; only text will be shown"),
        }

        setup_input_handlers(&window, &canvas, game.clone());

        request_animation_frame(game);

        log::info!("Brick Breaker running!");
    }

    async fn init_renderer(
        instance: &wgpu::Instance,
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        logical_size: (f32, f32),
    ) -> Option<RenderState> {
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| log::error!("Failed to create surface: {}", e))
            .ok()?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| log::error!("Failed to get adapter: {}", e))
            .ok()?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, logical_size)
            .await
            .map_err(|e| log::error!("Failed to create device: {}", e))
            .ok()
    }

    fn setup_input_handlers(window: &web_sys::Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click - start from title / leave game over
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.click = true;
                g.audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "Left" => g.input.left = true,
                    "ArrowRight" | "Right" => g.input.right = true,
                    " " | "Spacebar" => {
                        event.prevent_default();
                        g.input.split = true;
                    }
                    "i" | "I" => {
                        g.input.idle_mode = !g.input.idle_mode;
                        log::info!("Idle mode: {}", g.input.idle_mode);
                    }
                    "m" | "M" => g.toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "Left" => g.input.left = false,
                    "ArrowRight" | "Right" => g.input.right = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_overlay(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless autopilot session: `brick-breaker [tuning.json] [ticks]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_breaker::Tuning;
    use brick_breaker::particles::ParticleSystem;
    use brick_breaker::renderer::{DrawList, draw_scene};
    use brick_breaker::sim::{GameEvent, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::error!("Can't read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 120);

    let mut state = GameState::new(tuning, 42);
    let mut particles = ParticleSystem::new(400, state.tuning.particles_per_brick, 42);
    let mut frame = DrawList::new();
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut bricks = 0u64;
    let mut best_level = 1;
    let mut games = 0u32;
    let dt = 1.0 / 60.0;

    for i in 0..ticks {
        tick(&mut state, &input, i as f64 * dt);
        for event in state.drain_events() {
            log::debug!("{:?}", event);
            match event {
                GameEvent::BrickDestroyed { .. } => bricks += 1,
                GameEvent::LevelStarted { level } => best_level = best_level.max(level),
                GameEvent::GameOver { .. } => games += 1,
                _ => {}
            }
            particles.handle_event(&event);
        }
        particles.update(dt as f32);
        draw_scene(&state, &particles, &mut frame);
    }

    println!("\nDemo finished after {} ticks", ticks);
    println!("  phase:          {:?}", state.phase);
    println!("  level reached:  {}", best_level);
    println!("  bricks broken:  {}", bricks);
    println!("  games lost:     {}", games);
    println!("  final score:    {}", state.score);
    println!("  draw commands:  {}", frame.len());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
