//! Windowed host for a particle field.
//!
//! The viewer owns the window, the GPU renderer and the frame loop. Every
//! redraw it drains posted input into the field, ticks it once, draws it
//! into an [`InstanceSurface`] and renders the circles.
//!
//! | Input | Effect |
//! |-------|--------|
//! | Mouse move | Particles flee the cursor |
//! | Left click | Cast a spell: the field re-randomizes |
//! | `H` | Sort into a house: its color themes the field |
//! | `C` | Clear the theme color |
//! | `R` | Reset immediately |
//! | `Space` | Pause/resume |
//! | `Esc` | Quit |
//!
//! ```ignore
//! Viewer::new()
//!     .with_config(FieldConfig::default().with_avoid_radius(160.0))
//!     .with_theme(House::Ravenclaw)
//!     .run()?;
//! ```

use std::sync::Arc;

use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::ViewerError;
use crate::field::ParticleField;
use crate::gpu::GpuState;
use crate::input::{Action, Input, InputHandle};
use crate::spawn::SpawnContext;
use crate::spell::SpellCaster;
use crate::surface::{Glow, InstanceSurface};
use crate::theme::{House, HouseSelector};
use crate::time::FrameClock;

#[cfg(feature = "egui")]
use crate::gpu::egui_integration::EguiIntegration;

const BACKGROUND: Vec3 = Vec3::new(0.02, 0.02, 0.05);

/// Builder for the windowed field viewer.
///
/// Use method chaining to configure, then call `.run()` to start.
pub struct Viewer {
    config: FieldConfig,
    seed: Option<u64>,
    title: String,
    size: (u32, u32),
    theme: Option<House>,
    glow: Glow,
}

impl Viewer {
    /// Create a viewer with default settings.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::default(),
            seed: None,
            title: "wisp".to_string(),
            size: (1280, 720),
            theme: None,
            glow: Glow::default(),
        }
    }

    /// Set the field tunables.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Make the run reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial inner window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Start with a house theme already applied.
    pub fn with_theme(mut self, house: House) -> Self {
        self.theme = Some(house);
        self
    }

    pub fn with_glow(mut self, glow: Glow) -> Self {
        self.glow = glow;
        self
    }

    /// Run the viewer. Blocks until the window is closed.
    pub fn run(self) -> Result<(), ViewerError> {
        let (field, rng) = match self.seed {
            Some(seed) => (
                ParticleField::with_seed(self.config.clone(), seed)?,
                SpawnContext::seeded(seed.wrapping_add(1)),
            ),
            None => (
                ParticleField::new(self.config.clone())?,
                SpawnContext::from_entropy(),
            ),
        };

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(field.with_glow(self.glow), rng, self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    settings: Viewer,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    field: ParticleField,
    surface: InstanceSurface,
    handle: InputHandle,
    input: Input,
    clock: FrameClock,
    houses: HouseSelector,
    spell: SpellCaster,
    rng: SpawnContext,
    error: Option<ViewerError>,
    #[cfg(feature = "egui")]
    egui: Option<EguiIntegration>,
    #[cfg(feature = "egui")]
    draft: FieldConfig,
}

impl App {
    fn new(field: ParticleField, rng: SpawnContext, settings: Viewer) -> Self {
        let handle = InputHandle::new();
        let mut houses = HouseSelector::new();
        if let Some(house) = settings.theme {
            houses.select(house);
        }

        Self {
            #[cfg(feature = "egui")]
            draft: field.config().clone(),
            settings,
            window: None,
            gpu_state: None,
            field,
            surface: InstanceSurface::default(),
            input: Input::new(handle.clone()),
            spell: SpellCaster::new(handle.clone()),
            handle,
            clock: FrameClock::new(),
            houses,
            rng,
            error: None,
            #[cfg(feature = "egui")]
            egui: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn clear_color(&self) -> wgpu::Color {
        let tint = match self.houses.selected() {
            Some(house) => BACKGROUND.lerp(house.secondary(), 0.06),
            None => BACKGROUND,
        };
        wgpu::Color {
            r: tint.x as f64,
            g: tint.y as f64,
            b: tint.z as f64,
            a: 1.0,
        }
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: Action) {
        let now = self.clock.elapsed();
        match action {
            Action::CastSpell => {
                self.spell.cast(now);
            }
            Action::Reset => self.handle.reset(),
            Action::SortHouse => {
                if self.houses.sort(&mut self.rng, now) {
                    log::info!("sorting...");
                }
            }
            Action::ClearTheme => {
                self.handle.clear_theme();
                if let Some(window) = &self.window {
                    window.set_title(&self.settings.title);
                }
            }
            Action::TogglePause => {
                self.clock.toggle_pause();
                log::info!("{}", if self.clock.is_paused() { "paused" } else { "resumed" });
            }
            Action::Quit => event_loop.exit(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(house) = self.houses.update(self.clock.elapsed()) {
            log::info!("sorted into {} ({})", house, house.traits().join(", "));
            self.handle.set_theme(house.primary());
            if let Some(window) = &self.window {
                window.set_title(&format!("{} - {}", self.settings.title, house));
            }
        }

        self.field.apply_input(self.handle.take());

        if let Some(ctx) = self.clock.advance() {
            let report = self.field.tick(&ctx);
            if report.reset {
                log::info!("field re-randomized ({} particles)", report.count);
            }
            if ctx.frame % 600 == 0 {
                log::debug!(
                    "frame {}: {:.1} fps, {} particles",
                    ctx.frame,
                    self.clock.fps(),
                    report.count
                );
            }
        }

        self.field.draw(&mut self.surface);
        let clear_color = self.clear_color();

        #[cfg(feature = "egui")]
        let ui_output = match (self.egui.as_mut(), self.window.as_ref()) {
            (Some(egui), Some(window)) => {
                let field = &mut self.field;
                let draft = &mut self.draft;
                let handle = &self.handle;
                let fps = self.clock.fps();
                Some(egui.run(window, |ctx| field_panel(ctx, draft, field, handle, fps)))
            }
            _ => None,
        };

        let Some(gpu_state) = self.gpu_state.as_mut() else {
            return;
        };

        #[cfg(feature = "egui")]
        let size_in_pixels = [gpu_state.config.width, gpu_state.config.height];
        #[cfg(feature = "egui")]
        let egui = self.egui.as_mut();

        let result = gpu_state.render(
            self.surface.instances(),
            clear_color,
            |_device, _queue, _encoder, _view| {
                #[cfg(feature = "egui")]
                if let (Some(egui), Some(output)) = (egui, ui_output.as_ref()) {
                    egui.paint(_device, _queue, _encoder, _view, size_in_pixels, output);
                }
            },
        );

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, closing");
                event_loop.exit();
            }
            Err(e) => log::warn!("render error: {:?}", e),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.settings.size;
        let window_attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };

        let gpu_state = match pollster::block_on(GpuState::new(window.clone())) {
            Ok(state) => state,
            Err(err) => return self.fail(event_loop, err.into()),
        };

        #[cfg(feature = "egui")]
        {
            self.egui = Some(EguiIntegration::new(
                gpu_state.device(),
                gpu_state.format(),
                &window,
            ));
        }

        let size = window.inner_size();
        let theme = self.houses.selected().map(House::primary);
        if let Some(house) = self.houses.selected() {
            window.set_title(&format!("{} - {}", self.settings.title, house));
        }
        self.surface.resize(size.width as f32, size.height as f32);
        self.field
            .initialize(size.width as f32, size.height as f32, theme);
        log::info!(
            "field initialized: {} particles in {}x{}",
            self.field.len(),
            size.width,
            size.height
        );

        self.gpu_state = Some(gpu_state);
        self.window = Some(window.clone());
        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        if let (Some(egui), Some(window)) = (self.egui.as_mut(), self.window.as_ref()) {
            if egui.on_window_event(window, &event) {
                return;
            }
        }

        self.input.handle_event(&event);
        let actions: Vec<Action> = self.input.drain_actions().collect();
        for action in actions {
            self.handle_action(event_loop, action);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                self.surface
                    .resize(physical_size.width as f32, physical_size.height as f32);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Live tuning panel. Edits a draft config and applies it when valid.
#[cfg(feature = "egui")]
fn field_panel(
    ctx: &egui::Context,
    draft: &mut FieldConfig,
    field: &mut ParticleField,
    handle: &InputHandle,
    fps: f32,
) {
    egui::Window::new("Field")
        .default_pos([12.0, 12.0])
        .show(ctx, |ui| {
            ui.label(format!("{} particles, {:.0} fps", field.len(), fps));
            ui.separator();

            let mut changed = false;
            changed |= ui
                .add(egui::Slider::new(&mut draft.avoid_radius, 10.0..=400.0).text("avoid radius"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut draft.avoid_strength, 0.0..=4.0).text("avoid strength"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut draft.jitter, 0.0..=0.5).text("jitter"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut draft.max_speed, 0.2..=6.0).text("max speed"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut draft.cluster_radius_fraction, 0.02..=0.5).text("cluster radius"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut draft.cluster_threshold, 0.1..=1.0).text("cluster threshold"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut draft.base_count, 1..=200).text("base count"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut draft.soft_cap, 1..=250).text("soft cap"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut draft.hard_cap, 1..=300).text("hard cap"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut draft.theme_minority, 0..=50).text("theme minority"))
                .changed();

            if changed {
                if let Err(err) = field.set_config(draft.clone()) {
                    log::debug!("draft rejected: {}", err);
                }
            }
            if let Err(err) = draft.validate() {
                ui.colored_label(egui::Color32::LIGHT_RED, err.to_string());
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Cast spell").clicked() {
                    handle.reset();
                }
                if ui.button("Defaults").clicked() {
                    *draft = FieldConfig::default();
                    if let Err(err) = field.set_config(draft.clone()) {
                        log::warn!("default config rejected: {}", err);
                    }
                }
            });
        });
}
