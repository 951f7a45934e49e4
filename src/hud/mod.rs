pub mod ring;
pub mod timer;

use winit::window::Window;

use self::ring::FrameHistory;
use self::timer::{SystemPhase, SystemTimers, PHASE_COUNT};
use crate::config::{SCREEN_WIDTH, TITLE};
use crate::mode::GameState;
use crate::render::GpuState;

/// Number of frame times to keep in the histogram.
const FRAME_HISTORY_LEN: usize = 300;
/// Seconds between FPS log lines.
const FPS_LOG_INTERVAL: f64 = 5.0;

const TITLE_FONT_SIZE: f32 = 44.0;
const BODY_FONT_SIZE: f32 = 30.0;

/// What the HUD needs from the game each frame.
#[derive(Debug, Clone, Copy)]
pub struct HudView {
    pub state: GameState,
    pub score: u32,
    pub buildings: usize,
    pub cats: usize,
    pub hearts: usize,
    pub tick_count: u64,
}

/// Text overlay powered by egui: intro screen, score counter, and the
/// F12 debug panel.
pub struct Hud {
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,

    pub debug_visible: bool,

    /// Rolling window of frame times (seconds).
    pub frame_times: FrameHistory,

    /// Per-phase timers (updated by the sim and the render path).
    pub system_timers: SystemTimers,

    // Periodic FPS log accumulator.
    frame_count: u64,
    log_timer: f64,
    log_frame_count: u32,
    log_frame_sum: f64,
    log_frame_min: f64,
    log_frame_max: f64,
}

impl Hud {
    pub fn new(window: &Window, gpu: &GpuState) -> Self {
        let egui_ctx = egui::Context::default();

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(gpu.device.limits().max_texture_dimension_2d as usize),
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                dithering: true,
                predictable_texture_filtering: false,
            },
        );

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
            debug_visible: false,
            frame_times: FrameHistory::new(FRAME_HISTORY_LEN),
            system_timers: SystemTimers::new(),
            frame_count: 0,
            log_timer: 0.0,
            log_frame_count: 0,
            log_frame_sum: 0.0,
            log_frame_min: f64::MAX,
            log_frame_max: 0.0,
        }
    }

    /// Record a frame time and periodically log a summary.
    pub fn record_frame(&mut self, dt: f64) {
        self.frame_count += 1;
        self.frame_times.push(dt);

        self.log_frame_count += 1;
        self.log_frame_sum += dt;
        self.log_frame_min = self.log_frame_min.min(dt);
        self.log_frame_max = self.log_frame_max.max(dt);
        self.log_timer += dt;

        if self.log_timer >= FPS_LOG_INTERVAL {
            let avg_ms = (self.log_frame_sum / self.log_frame_count as f64) * 1000.0;
            let fps = self.log_frame_count as f64 / self.log_timer;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | min: {:.2}ms | max: {:.2}ms | total frames: {}",
                fps,
                avg_ms,
                self.log_frame_min * 1000.0,
                self.log_frame_max * 1000.0,
                self.frame_count,
            );
            self.log_timer = 0.0;
            self.log_frame_count = 0;
            self.log_frame_sum = 0.0;
            self.log_frame_min = f64::MAX;
            self.log_frame_max = 0.0;
        }
    }

    pub fn toggle_debug(&mut self) {
        self.debug_visible = !self.debug_visible;
        log::info!("Debug panel {}", if self.debug_visible { "shown" } else { "hidden" });
    }

    /// Forward a winit event to egui. Returns true if egui consumed it.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        response.consumed
    }

    /// Run the egui frame and produce paint output.
    /// Returns (clipped_primitives, textures_delta, screen_descriptor).
    pub fn run_frame(
        &mut self,
        window: &Window,
        screen_w: u32,
        screen_h: u32,
        view: HudView,
    ) -> (
        Vec<egui::epaint::ClippedPrimitive>,
        egui::TexturesDelta,
        egui_wgpu::ScreenDescriptor,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);

        let debug = self.debug_visible.then(|| DebugSnapshot {
            frame_times: self.frame_times.iter().collect(),
            stats: self.frame_times.stats(),
            system_durations: self.system_timers.durations_us,
            system_total_us: self.system_timers.total_us(),
        });

        let ctx = self.egui_ctx.clone();
        let full_output = ctx.run(raw_input, |ctx| {
            draw_text(ctx, &view);
            if let Some(ref snapshot) = debug {
                draw_debug(ctx, &view, snapshot);
            }
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let clipped_primitives = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [screen_w, screen_h],
            pixels_per_point,
        };

        (clipped_primitives, full_output.textures_delta, screen_descriptor)
    }

    /// Upload egui textures and buffers. Call before the egui render pass.
    pub fn prepare_egui(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::epaint::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor)
    }

    /// Render egui into the given render pass.
    pub fn render_egui(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::epaint::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures after present.
    pub fn free_textures(&mut self, textures_delta: &egui::TexturesDelta) {
        for &id in &textures_delta.free {
            self.egui_renderer.free_texture(&id);
        }
    }
}

// ---------------------------------------------------------------------------
// Free-function drawing (avoids borrow conflicts with egui_ctx)
// ---------------------------------------------------------------------------

struct DebugSnapshot {
    frame_times: Vec<f64>,
    stats: Option<ring::FrameStats>,
    system_durations: [f64; PHASE_COUNT],
    system_total_us: f64,
}

/// Lines of the intro screen: (text, y, size, gray level).
fn intro_lines() -> [(&'static str, f32, f32, u8); 3] {
    [
        (TITLE, 150.0, TITLE_FONT_SIZE, 0),
        ("Press SPACE to Start", 300.0, BODY_FONT_SIZE, 50),
        ("Arrows to move, Space to jump, C to swap", 400.0, BODY_FONT_SIZE, 80),
    ]
}

pub fn score_text(score: u32) -> String {
    format!("Cats Petted: {score}")
}

fn draw_text(ctx: &egui::Context, view: &HudView) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("hud_text"),
    ));

    match view.state {
        GameState::Intro => {
            for (text, y, size, gray) in intro_lines() {
                painter.text(
                    egui::pos2(SCREEN_WIDTH * 0.5, y),
                    egui::Align2::CENTER_TOP,
                    text,
                    egui::FontId::proportional(size),
                    egui::Color32::from_gray(gray),
                );
            }
        }
        GameState::Playing => {
            painter.text(
                egui::pos2(10.0, 10.0),
                egui::Align2::LEFT_TOP,
                score_text(view.score),
                egui::FontId::proportional(BODY_FONT_SIZE),
                egui::Color32::BLACK,
            );
        }
    }
}

fn draw_debug(ctx: &egui::Context, view: &HudView, s: &DebugSnapshot) {
    let panel_frame = egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 20, 220))
        .corner_radius(6.0)
        .inner_margin(10.0);

    egui::Window::new("Debug")
        .default_pos([480.0, 10.0])
        .default_width(300.0)
        .resizable(false)
        .frame(panel_frame)
        .show(ctx, |ui| {
            ui.style_mut().visuals.override_text_color = Some(egui::Color32::from_gray(220));

            // --- Performance ---
            ui.heading("Performance");
            if let Some(stats) = s.stats {
                ui.label(format!("FPS: {:.1}", stats.fps));
                ui.label(format!(
                    "Frame: {:.2}ms avg | {:.2} min | {:.2} max",
                    stats.avg * 1000.0,
                    stats.min * 1000.0,
                    stats.max * 1000.0,
                ));
            }

            if !s.frame_times.is_empty() {
                let max_time = s
                    .frame_times
                    .iter()
                    .copied()
                    .fold(0.0f64, f64::max)
                    .max(0.020);

                let (response, painter) =
                    ui.allocate_painter(egui::vec2(280.0, 50.0), egui::Sense::hover());
                let rect = response.rect;
                let bar_width = rect.width() / s.frame_times.len() as f32;

                for (i, &t) in s.frame_times.iter().enumerate() {
                    let h = (t / max_time) as f32 * rect.height();
                    let x = rect.left() + i as f32 * bar_width;
                    let color = if t > 0.01667 {
                        egui::Color32::from_rgb(255, 100, 80)
                    } else {
                        egui::Color32::from_rgb(80, 200, 120)
                    };
                    painter.rect_filled(
                        egui::Rect::from_min_max(
                            egui::pos2(x, rect.bottom() - h),
                            egui::pos2(x + bar_width, rect.bottom()),
                        ),
                        0.0,
                        color,
                    );
                }
            }
            ui.add_space(4.0);

            // --- Phases ---
            ui.heading("System Timers");
            for phase in SystemPhase::ALL {
                let us = s.system_durations[phase as usize];
                ui.label(
                    egui::RichText::new(format!("{:<12}{:>7.1}us", phase.label(), us)).monospace(),
                );
            }
            ui.label(
                egui::RichText::new(format!("{:<12}{:>7.1}us", "Total", s.system_total_us)).monospace(),
            );
            ui.add_space(4.0);

            // --- World ---
            ui.heading("World");
            ui.label(format!("State: {}", view.state.label()));
            ui.label(format!(
                "Buildings: {} | Cats: {} | Hearts: {}",
                view.buildings, view.cats, view.hearts
            ));
            ui.label(format!("Ticks: {}", view.tick_count));
            ui.label("F12: Toggle | ESC: Quit");
        });
}
