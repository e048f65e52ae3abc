//! Snake Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build wires the DOM to a `GameSession`; the native build runs a
//! headless autopilot game and prints the final snapshot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, EventTarget, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement,
        KeyboardEvent, TouchEvent,
    };

    use snake_arcade::audio::{AudioManager, AudioTheme};
    use snake_arcade::platform::{
        Button, InputAction, LocalStore, SwipeTracker, captures_key, key_action,
    };
    use snake_arcade::renderer::{RenderState, build_scene};
    use snake_arcade::sim::{Command, GameEvent, GamePhase, SimConfig};
    use snake_arcade::{GameSession, Preferences, Theme};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        render_state: Option<RenderState>,
        audio: AudioManager,
        prefs: Preferences,
        store: Option<LocalStore>,
        swipe: SwipeTracker,
        document: Document,
    }

    impl Game {
        fn new(session: GameSession, document: Document) -> Self {
            let store = match LocalStore::open() {
                Ok(store) => Some(store),
                Err(e) => {
                    log::warn!("Preferences will not persist: {}", e);
                    None
                }
            };
            let prefs = store
                .as_ref()
                .map(Preferences::load_from)
                .unwrap_or_default();
            let audio = AudioManager::new(prefs.volume, prefs.muted, prefs.audio_theme);

            Self {
                session,
                render_state: None,
                audio,
                prefs,
                store,
                swipe: SwipeTracker::new(),
                document,
            }
        }

        /// One animation frame: advance the session, then present it
        fn frame(&mut self, time: f64) {
            let events = self.session.advance(time);
            for event in &events {
                self.audio.handle(event);
                log_event(event);
            }
            self.audio
                .update_music(self.session.state().is_running(), time);

            self.render(time);
            self.update_hud();
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(self.session.state(), self.prefs.theme, time);
            let clear = self.prefs.theme.palette().background[0];
            match render_state.render(&vertices, clear) {
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

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let state = self.session.state();

            for (id, value) in [
                ("score", state.score.to_string()),
                ("speed", state.speed_level.to_string()),
                ("length", state.length().to_string()),
            ] {
                if let Some(el) = self.document.get_element_by_id(id) {
                    if el.text_content().as_deref() != Some(value.as_str()) {
                        el.set_text_content(Some(&value));
                    }
                }
            }

            self.set_visible("pause-overlay", state.phase == GamePhase::Paused);
            self.set_visible("game-over", state.phase == GamePhase::Over);
            if state.phase == GamePhase::Over {
                if let Some(el) = self.document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&state.score.to_string()));
                }
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", !visible);
            }
        }

        fn save_prefs(&mut self) {
            let Some(store) = self.store.as_mut() else {
                return;
            };
            if let Err(e) = self.prefs.save_to(store) {
                log::warn!("Failed to save preferences: {}", e);
            }
        }

        fn submit(&mut self, command: Command) {
            // Any input counts as a user gesture for Web Audio
            self.audio.resume();
            self.session.submit(command);
        }

        fn toggle_mute(&mut self) {
            self.prefs.muted = self.audio.toggle_mute();
            log::info!("Muted: {}", self.prefs.muted);
            self.save_prefs();
        }
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::PhaseChanged { from, to } => log::info!("Phase {:?} -> {:?}", from, to),
            GameEvent::SpeedChanged { speed_level, .. } => log::info!("Speed {}", speed_level),
            GameEvent::GameOver { score, length } => {
                log::info!("Game over: score {}, length {}", score, length)
            }
            other => log::debug!("{}", other.name()),
        }
    }

    /// Attach a long-lived DOM listener
    fn listen<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static)
    where
        E: FromWasmAbi + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        if target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Failed to listen for `{}`", event);
        }
        closure.forget();
    }

    pub async fn run() -> Result<(), String> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| e.to_string())?;

        log::info!("Snake Arcade starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "not a canvas")?;

        // Square canvas at device resolution
        let dpr = window.device_pixel_ratio();
        let side = canvas.client_width().min(canvas.client_height()).max(1);
        let size = (side as f64 * dpr) as u32;
        canvas.set_width(size);
        canvas.set_height(size);

        let seed = js_sys::Date::now() as u64;
        let config = SimConfig::default();
        let tile_count = config.tile_count;
        let session = GameSession::new(config, seed).map_err(|e| e.to_string())?;
        let game = Rc::new(RefCell::new(Game::new(session, document.clone())));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| format!("Failed to create surface: {e}"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("Failed to get adapter: {e}"))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, size, size, tile_count)
            .await
            .map_err(|e| format!("Failed to create device: {e}"))?;
        game.borrow_mut().render_state = Some(render_state);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        setup_keyboard(&window, game.clone());
        setup_touch(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_preference_controls(&document, game.clone());
        setup_auto_pause(&window, &document, game.clone());

        game.borrow().update_hud();
        request_animation_frame(game);

        log::info!("Snake Arcade running with seed {}", seed);
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        listen(window, "keydown", move |event: KeyboardEvent| {
            let key = event.key();
            if captures_key(&key) {
                event.prevent_default();
            }
            let mut g = game.borrow_mut();
            let phase = g.session.state().phase;
            match key_action(&key, phase) {
                Some(InputAction::Sim(command)) => g.submit(command),
                Some(InputAction::ToggleMute) => g.toggle_mute(),
                None => {}
            }
        });
    }

    fn setup_touch(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            listen(canvas, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    g.swipe.begin(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
        }

        {
            let game = game.clone();
            listen(canvas, "touchmove", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let swiped = g.swipe.moved(touch.client_x() as f32, touch.client_y() as f32);
                    if let Some(command) = swiped {
                        g.submit(command);
                    }
                }
            });
        }

        listen(canvas, "touchend", move |_event: TouchEvent| {
            game.borrow_mut().swipe.end();
        });
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for (id, button) in [
            ("start-btn", Button::Start),
            ("pause-btn", Button::Pause),
            ("restart-btn", Button::Restart),
        ] {
            let Some(el) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            listen(&el, "click", move |_event: web_sys::MouseEvent| {
                game.borrow_mut().submit(button.command());
            });
        }
    }

    fn setup_preference_controls(document: &Document, game: Rc<RefCell<Game>>) {
        let prefs = game.borrow().prefs;

        if let Some(select) = element::<HtmlSelectElement>(document, "background-theme") {
            select.set_value(prefs.theme.as_str());
            let game = game.clone();
            let target = select.clone();
            listen(&select, "change", move |_event: web_sys::Event| {
                let value = target.value();
                let Some(theme) = Theme::from_str(&value) else {
                    log::warn!("Unknown theme `{}`", value);
                    return;
                };
                let mut g = game.borrow_mut();
                g.prefs.theme = theme;
                g.save_prefs();
            });
        }

        if let Some(select) = element::<HtmlSelectElement>(document, "audio-theme") {
            select.set_value(prefs.audio_theme.as_str());
            let game = game.clone();
            let target = select.clone();
            listen(&select, "change", move |_event: web_sys::Event| {
                let value = target.value();
                let Some(theme) = AudioTheme::from_str(&value) else {
                    log::warn!("Unknown audio theme `{}`", value);
                    return;
                };
                let mut g = game.borrow_mut();
                g.prefs.audio_theme = theme;
                g.audio.set_theme(theme);
                g.save_prefs();
            });
        }

        if let Some(input) = element::<HtmlInputElement>(document, "volume-control") {
            input.set_value(&((prefs.volume * 100.0).round() as u32).to_string());
            let target = input.clone();
            listen(&input, "input", move |_event: web_sys::Event| {
                let Ok(percent) = target.value().parse::<f32>() else {
                    return;
                };
                let mut g = game.borrow_mut();
                g.prefs.volume = (percent / 100.0).clamp(0.0, 1.0);
                let volume = g.prefs.volume;
                g.audio.set_volume(volume);
                g.save_prefs();
            });
        }
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            listen(document, "visibilitychange", move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.session.state().phase == GamePhase::Running {
                        g.session.submit(Command::Pause);
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
        }

        // Window blur (click outside)
        listen(window, "blur", move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            if g.session.state().phase == GamePhase::Running {
                g.session.submit(Command::Pause);
                log::info!("Auto-paused (window blur)");
            }
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Snake Arcade failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use snake_arcade::audio::{AudioManager, AudioTheme};
    use snake_arcade::consts::COLLISION_DELAY_MS;
    use snake_arcade::sim::{Command, GameEvent, GamePhase, SimConfig, suggest_heading};
    use snake_arcade::{ConfigError, GameSession};
    use thiserror::Error;

    /// Upper bound on simulated ticks for one demo run
    const MAX_DEMO_TICKS: u32 = 5_000;

    #[derive(Debug, Error)]
    pub enum RunError {
        #[error("failed to read {path}: {source}")]
        Read {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
        #[error("invalid config JSON: {0}")]
        Parse(#[from] serde_json::Error),
        #[error("invalid seed `{0}`")]
        Seed(String),
        #[error(transparent)]
        Config(#[from] ConfigError),
    }

    /// `snake-arcade [config.json] [seed]`
    pub fn run(mut args: impl Iterator<Item = String>) -> Result<(), RunError> {
        let config = match args.next() {
            Some(path) => {
                let path = PathBuf::from(path);
                let json = std::fs::read_to_string(&path)
                    .map_err(|source| RunError::Read { path, source })?;
                serde_json::from_str::<SimConfig>(&json)?
            }
            None => SimConfig::default(),
        };
        let seed = match args.next() {
            Some(raw) => raw.parse::<u64>().map_err(|_| RunError::Seed(raw))?,
            None => 0,
        };

        let mut session = GameSession::new(config, seed)?;
        let audio = AudioManager::new(0.5, false, AudioTheme::Default);
        session.submit(Command::Start);

        let mut now_ms = 0.0;
        while session.state().time_ticks < u64::from(MAX_DEMO_TICKS) {
            if let Some(heading) = suggest_heading(session.state()) {
                session.submit(Command::Heading(heading));
            }
            for event in session.advance(now_ms) {
                audio.handle(&event);
                match event {
                    GameEvent::Milestone { score } => log::info!("Milestone at {}", score),
                    GameEvent::SpeedChanged {
                        speed_level,
                        interval_ms,
                    } => log::info!("Speed {} ({} ms/tick)", speed_level, interval_ms),
                    GameEvent::GameOver { score, length } => {
                        log::info!("Game over: score {}, length {}", score, length)
                    }
                    other => log::debug!("t={:.0} {}", now_ms, other.name()),
                }
            }

            if session.state().phase == GamePhase::Over {
                break;
            }
            // Jump straight to the next scheduled moment
            now_ms = session
                .timer()
                .next_due_ms()
                .unwrap_or(now_ms + COLLISION_DELAY_MS);
        }

        let snapshot = serde_json::to_string_pretty(session.state())?;
        println!("{snapshot}");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snake Arcade (native) starting headless autopilot run...");
    log::info!("Run with `trunk serve` for the playable web version");

    if let Err(e) = headless::run(std::env::args().skip(1)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
