use std::sync::Arc;

use instant::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::{self, GameRules, MAX_ACCUMULATOR, SCREEN_HEIGHT, SCREEN_WIDTH, TICK_RATE, TITLE};
use crate::error::AppError;
use crate::game::Game;
use crate::hud::timer::SystemPhase;
use crate::hud::{Hud, HudView};
use crate::input::KeyboardState;
use crate::render::instance::{self, SpriteInstance};
use crate::render::{skins, FrameContext, GpuState};

/// Top-level application state.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    hud: Option<Hud>,

    game: Game,
    keys: KeyboardState,

    // Fixed timestep
    last_frame_time: Option<Instant>,
    accumulator: f64,

    // Surface dimensions (physical pixels)
    screen_w: u32,
    screen_h: u32,

    // Reusable instance buffer (avoid per-frame allocation)
    instance_buf: Vec<SpriteInstance>,

    /// Set when window/GPU setup fails inside `resumed`.
    startup_error: Option<AppError>,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            hud: None,
            game: Game::new(GameRules::default(), fastrand::Rng::new()),
            keys: KeyboardState::new(),
            last_frame_time: None,
            accumulator: 0.0,
            screen_w: 0,
            screen_h: 0,
            instance_buf: Vec::with_capacity(256),
            startup_error: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attrs = WindowAttributes::default()
            .with_title(TITLE)
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        self.screen_w = size.width;
        self.screen_h = size.height;
        log::info!("Window created: {}x{}", size.width, size.height);

        let skins = skins::load_skins(&config::asset_dir());

        let gpu = GpuState::new(window.clone(), &skins)?;
        log::info!("wgpu + sprite pipeline initialized");

        self.hud = Some(Hud::new(&window, &gpu));
        self.gpu = Some(gpu);

        // Continuous game loop
        event_loop.set_control_flow(ControlFlow::Poll);

        self.window = Some(window);
        Ok(())
    }

    /// Run fixed-timestep simulation ticks.
    fn run_fixed_update(&mut self, dt: f64) {
        self.accumulator = (self.accumulator + dt).min(MAX_ACCUMULATOR);

        let Some(hud) = &mut self.hud else {
            return;
        };

        while self.accumulator >= TICK_RATE {
            let input = self.keys.take_frame();
            self.game.tick(&input, &mut hud.system_timers);
            self.accumulator -= TICK_RATE;
        }
    }

    fn hud_view(&self) -> HudView {
        HudView {
            state: self.game.state(),
            score: self.game.score(),
            buildings: self.game.building_count(),
            cats: self.game.cat_count(),
            hearts: self.game.heart_count(),
            tick_count: self.game.tick_count(),
        }
    }

    fn redraw(&mut self) {
        // --- Timing ---
        let now = Instant::now();
        if let Some(last) = self.last_frame_time {
            let dt = now.duration_since(last).as_secs_f64();
            if let Some(hud) = &mut self.hud {
                hud.record_frame(dt);
            }
            self.run_fixed_update(dt);
        }
        self.last_frame_time = Some(now);

        let view = self.hud_view();
        let (Some(window), Some(gpu), Some(hud)) = (&self.window, &mut self.gpu, &mut self.hud)
        else {
            return;
        };

        // --- Build instance buffer from the world ---
        hud.system_timers.begin();
        instance::build_instances(&self.game, &mut self.instance_buf);
        hud.system_timers.end(SystemPhase::BuildInstances);

        // --- Render ---
        hud.system_timers.begin();
        gpu.update_instances(&self.instance_buf);

        let (primitives, textures_delta, screen_desc) =
            hud.run_frame(window, self.screen_w, self.screen_h, view);

        let Some(FrameContext {
            output,
            view: target,
            mut encoder,
        }) = gpu.begin_frame()
        else {
            hud.free_textures(&textures_delta);
            return;
        };

        gpu.draw_sprites(&mut encoder, &target);

        let extra = hud.prepare_egui(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &primitives,
            &textures_delta,
            &screen_desc,
        );
        {
            let mut pass = GpuState::begin_egui_pass(&mut encoder, &target);
            hud.render_egui(&mut pass, &primitives, &screen_desc);
        }

        window.pre_present_notify();
        gpu.finish_frame(encoder, output, extra);
        hud.free_textures(&textures_delta);
        hud.system_timers.end(SystemPhase::Render);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_window(event_loop) {
            self.startup_error = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.keys.quit_requested() {
            log::info!("ESC pressed, exiting");
            event_loop.exit();
            return;
        }

        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(window), Some(hud)) = (&self.window, &mut self.hud) {
            hud.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                    self.screen_w = new_size.width;
                    self.screen_h = new_size.height;
                }
            }
            WindowEvent::Focused(false) => self.keys.release_all(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.keys.handle_key(code, event.state, event.repeat);
                }
                if self.keys.take_debug_toggle() {
                    if let Some(hud) = &mut self.hud {
                        hud.toggle_debug();
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

/// Create the event loop and run the game.
pub fn run() -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    match app.startup_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
