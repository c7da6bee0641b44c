//! The particle field simulator.
//!
//! A [`ParticleField`] owns a swarm of small glowing dots that drift with
//! Brownian jitter, flee the pointer, and refuse to settle into a permanent
//! clump. It has no notion of time or scheduling: the host calls
//! [`ParticleField::tick`] once per frame and [`ParticleField::draw`] when it
//! wants pixels.
//!
//! # Per-tick pipeline
//!
//! | Step | What happens |
//! |------|--------------|
//! | Jitter | Random velocity delta on each axis |
//! | Clamp | Velocity magnitude capped at `max_speed` |
//! | Avoid | Repulsion away from the pointer inside `avoid_radius` |
//! | Integrate | `position += velocity` |
//! | Bounce | Velocity reflected back toward the viewport at its edges |
//! | Cluster | Fresh particles injected from the edges when most sit in one clump |
//! | Overflow | Extras pulled to the centroid, captured, trimmed, replaced |
//! | Refill | Edge spawns top the field back up to `base_count` |
//! | Color | Pending reset rebuilds the field, else the theme recolors the majority and the minority shows its own hue |
//!
//! # Example
//!
//! ```ignore
//! let mut field = ParticleField::with_seed(FieldConfig::default(), 7)?;
//! field.initialize(1280.0, 720.0, None);
//!
//! // Per frame:
//! field.on_pointer_move(mouse.x, mouse.y);
//! let report = field.tick(&TickContext::manual(frame));
//! field.draw(&mut surface);
//! ```

use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::input::{PendingInput, ThemeChange};
use crate::spawn::SpawnContext;
use crate::surface::{self, Glow, Surface};
use crate::time::TickContext;
use glam::{Vec2, Vec3};

/// A single dot in the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in surface units.
    pub position: Vec2,
    /// Velocity in units per tick.
    pub velocity: Vec2,
    /// Disc radius.
    pub radius: f32,
    /// RGB color (0-1) currently drawn.
    pub color: Vec3,
    /// The particle's own random hue. Shown whenever the particle is in the
    /// theme minority or no theme is set.
    pub hue: Vec3,
}

/// Everything the draw pass needs: particles, pointer, viewport and color
/// state. Slot 0 is the oldest particle.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub particles: Vec<Particle>,
    /// Last known pointer position.
    pub pointer: Vec2,
    /// Viewport (width, height).
    pub viewport: Vec2,
    /// Override color applied to most particles.
    pub theme: Option<Vec3>,
    /// One-shot reset flag, cleared when the reset is applied.
    pub reset_requested: bool,
}

impl FieldState {
    /// Empty state for a viewport. The pointer starts far away so it does not
    /// repel anything before the first move event.
    pub fn new(viewport: Vec2) -> Self {
        Self {
            particles: Vec::new(),
            pointer: Vec2::splat(f32::MAX),
            viewport,
            theme: None,
            reset_requested: false,
        }
    }

    /// Whether the viewport has a positive area.
    #[inline]
    pub fn has_viewport(&self) -> bool {
        self.viewport.x > 0.0 && self.viewport.y > 0.0
    }

    /// Mean particle position, or `None` for an empty field.
    pub fn centroid(&self) -> Option<Vec2> {
        if self.particles.is_empty() {
            return None;
        }
        let sum: Vec2 = self.particles.iter().map(|p| p.position).sum();
        Some(sum / self.particles.len() as f32)
    }
}

/// What a single [`ParticleField::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Frame number from the tick context.
    pub frame: u64,
    /// The viewport had no area, nothing was simulated.
    pub skipped: bool,
    /// A pending reset rebuilt the field.
    pub reset: bool,
    /// Particles injected to break up a clump.
    pub injected: usize,
    /// Extras captured at the centroid.
    pub vanished: usize,
    /// Particles dropped by the hard trim.
    pub trimmed: usize,
    /// Edge spawns that brought the field back up to `base_count`.
    pub refilled: usize,
    /// Replacements spawned for vanished particles.
    pub respawned: usize,
    /// Particle count after the tick.
    pub count: usize,
}

/// Frame-driven 2D particle simulator.
///
/// Owns its [`FieldState`], its tunables and its random source. Several
/// fields can coexist; nothing is global.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    state: FieldState,
    glow: Glow,
    rng: SpawnContext,
}

impl ParticleField {
    /// Create an empty field seeded from OS entropy.
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SpawnContext::from_entropy())
    }

    /// Create an empty field with a deterministic random source.
    pub fn with_seed(config: FieldConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SpawnContext::seeded(seed))
    }

    fn with_rng(config: FieldConfig, rng: SpawnContext) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: FieldState::new(Vec2::ZERO),
            glow: Glow::default(),
            rng,
        })
    }

    /// Set the glow used by [`draw`](Self::draw).
    pub fn with_glow(mut self, glow: Glow) -> Self {
        self.glow = glow;
        self
    }

    // ========== Accessors ==========

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// Mutable access for hosts that stage custom layouts (and for tests).
    pub fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn glow(&self) -> Glow {
        self.glow
    }

    pub fn len(&self) -> usize {
        self.state.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.particles.is_empty()
    }

    /// Swap in new tunables. Takes effect on the next tick; existing
    /// particles are kept.
    pub fn set_config(&mut self, config: FieldConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    // ========== Host contract ==========

    /// Replace every particle with `base_count` fresh ones spread over the
    /// viewport plus its margin. Colors are `theme` if given, random hues
    /// otherwise. Clears any pending reset.
    ///
    /// Without a usable viewport the field stays empty and a reset is left
    /// pending, so the first tick with valid dimensions builds it.
    pub fn initialize(&mut self, width: f32, height: f32, theme: Option<Vec3>) -> &FieldState {
        self.state.viewport = Vec2::new(width, height);
        self.state.theme = theme;
        self.state.particles.clear();
        self.state.reset_requested = !self.state.has_viewport();

        if self.state.has_viewport() {
            let margin = self.state.viewport * self.config.margin_fraction;
            let min = -margin;
            let max = self.state.viewport + margin;
            for _ in 0..self.config.base_count {
                let position = self.rng.random_in_rect(min, max);
                let velocity = self.rng.random_jitter(self.config.initial_speed);
                let particle = self.make_particle(position, velocity, theme);
                self.state.particles.push(particle);
            }
        }

        &self.state
    }

    /// Record the pointer position; used by the next tick.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.state.pointer = Vec2::new(x, y);
    }

    /// Record a new viewport size. Existing particles stay where they are.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.state.viewport = Vec2::new(width, height);
    }

    /// Ask for the field to be re-randomized on the next tick.
    pub fn request_reset(&mut self) {
        self.state.reset_requested = true;
    }

    /// Set or clear the override color.
    pub fn set_theme_color(&mut self, color: Option<Vec3>) {
        self.state.theme = color;
    }

    /// Apply a drained input snapshot.
    pub fn apply_input(&mut self, input: PendingInput) {
        if let Some(viewport) = input.viewport {
            self.on_resize(viewport.x, viewport.y);
        }
        if let Some(pointer) = input.pointer {
            self.on_pointer_move(pointer.x, pointer.y);
        }
        match input.theme {
            Some(ThemeChange::Set(color)) => self.set_theme_color(Some(color)),
            Some(ThemeChange::Clear) => self.set_theme_color(None),
            None => {}
        }
        if input.reset {
            self.request_reset();
        }
    }

    /// Draw the current state. See [`surface::draw`].
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface::draw(surface, &self.state, self.glow);
    }

    // ========== Simulation ==========

    /// Advance the field by one frame.
    pub fn tick(&mut self, ctx: &TickContext) -> TickReport {
        let mut report = TickReport {
            frame: ctx.frame,
            ..Default::default()
        };

        if !self.state.has_viewport() {
            report.skipped = true;
            report.count = self.len();
            return report;
        }

        self.step_motion();

        if let Some(centroid) = self.state.centroid() {
            report.injected = self.inject_if_clustered(centroid);
            self.control_overflow(centroid, &mut report);
        }

        if !self.state.reset_requested {
            report.refilled = self.refill_to_base();
        }

        if self.state.reset_requested {
            let viewport = self.state.viewport;
            let theme = self.state.theme;
            self.initialize(viewport.x, viewport.y, theme);
            report.reset = true;
            log::debug!("frame {}: field reset to {} particles", ctx.frame, self.len());
        } else if let Some(theme) = self.state.theme {
            let majority = self.len().saturating_sub(self.config.theme_minority);
            let (themed, minority) = self.state.particles.split_at_mut(majority);
            for p in themed {
                p.color = theme;
            }
            for p in minority {
                p.color = p.hue;
            }
        }

        report.count = self.len();
        report
    }

    /// Jitter, clamp, avoid the pointer, integrate and bounce.
    fn step_motion(&mut self) {
        let FieldConfig {
            jitter,
            max_speed,
            avoid_radius,
            avoid_strength,
            ..
        } = self.config;
        let pointer = self.state.pointer;
        let viewport = self.state.viewport;

        for p in &mut self.state.particles {
            p.velocity += self.rng.random_jitter(jitter);
            p.velocity = p.velocity.clamp_length_max(max_speed);

            let away = p.position - pointer;
            let distance = away.length();
            if distance < avoid_radius {
                let direction = if distance > f32::EPSILON {
                    away / distance
                } else {
                    self.rng.random_direction()
                };
                let strength = (avoid_radius - distance) / avoid_radius * avoid_strength;
                p.velocity += direction * strength;
                p.velocity = p.velocity.clamp_length_max(max_speed);
            }

            p.position += p.velocity;

            if p.position.x < 0.0 {
                p.velocity.x = p.velocity.x.abs();
            } else if p.position.x > viewport.x {
                p.velocity.x = -p.velocity.x.abs();
            }
            if p.position.y < 0.0 {
                p.velocity.y = p.velocity.y.abs();
            } else if p.position.y > viewport.y {
                p.velocity.y = -p.velocity.y.abs();
            }
        }
    }

    /// Inject fresh edge particles aimed at the centroid when most of the
    /// field sits inside the cluster radius. Returns how many were added.
    fn inject_if_clustered(&mut self, centroid: Vec2) -> usize {
        let n = self.len();
        if n >= self.config.injection_cap {
            return 0;
        }

        let radius = self.config.cluster_radius_fraction * self.state.viewport.min_element();
        let radius_sq = radius * radius;
        let clustered = self
            .state
            .particles
            .iter()
            .filter(|p| p.position.distance_squared(centroid) < radius_sq)
            .count();

        if (clustered as f32) <= self.config.cluster_threshold * n as f32 {
            return 0;
        }

        for _ in 0..self.config.injection_count {
            let particle = self.spawn_at_edge(centroid);
            self.state.particles.push(particle);
        }
        log::debug!(
            "{} of {} particles clustered, injected {}",
            clustered,
            n,
            self.config.injection_count
        );
        self.config.injection_count
    }

    /// Pull extras to the centroid, drop captured ones, hard-trim, and
    /// replace what vanished.
    fn control_overflow(&mut self, centroid: Vec2, report: &mut TickReport) {
        let base = self.config.base_count;
        if self.len() <= self.config.soft_cap {
            return;
        }

        let pull = self.config.extra_pull;
        let capture_sq = self.config.capture_radius * self.config.capture_radius;
        let before = self.len();

        let mut index = 0;
        self.state.particles.retain_mut(|p| {
            let is_extra = index >= base;
            index += 1;
            if !is_extra {
                return true;
            }
            p.position += (centroid - p.position) * pull;
            p.position.distance_squared(centroid) >= capture_sq
        });
        report.vanished = before - self.len();

        if self.len() > self.config.hard_cap {
            report.trimmed = self.len() - base;
            self.state.particles.truncate(base);
            log::debug!("trimmed {} particles back to {}", report.trimmed, base);
        }

        let room = self.config.hard_cap.saturating_sub(self.len());
        report.respawned = report.vanished.min(room);
        for _ in 0..report.respawned {
            let particle = self.spawn_at_edge(centroid);
            self.state.particles.push(particle);
        }
    }

    /// Spawn edge particles until the field holds `base_count` again, e.g.
    /// after the config raised the floor. Returns how many were added.
    fn refill_to_base(&mut self) -> usize {
        let missing = self.config.base_count.saturating_sub(self.len());
        if missing == 0 {
            return 0;
        }

        let target = self
            .state
            .centroid()
            .unwrap_or(self.state.viewport * 0.5);
        for _ in 0..missing {
            let particle = self.spawn_at_edge(target);
            self.state.particles.push(particle);
        }
        log::debug!("refilled {} particles up to {}", missing, self.config.base_count);
        missing
    }

    // ========== Spawning ==========

    /// A particle just outside a random edge, heading at `target`. Always
    /// starts with its own hue; the recolor pass decides whether it is themed.
    fn spawn_at_edge(&mut self, target: Vec2) -> Particle {
        let viewport = self.state.viewport;
        let offset = self
            .config
            .edge_offset
            .min(self.config.margin_fraction * viewport.min_element());
        let (_, position) = self.rng.random_edge_point(viewport, offset);
        let velocity = self.rng.heading_toward(
            position,
            target,
            self.config.injection_spread,
            self.config.injection_speed,
        );
        self.make_particle(position, velocity, None)
    }

    fn make_particle(&mut self, position: Vec2, velocity: Vec2, theme: Option<Vec3>) -> Particle {
        let radius = self
            .rng
            .random_range(self.config.radius_range.start, self.config.radius_range.end);
        let hue = self.rng.random_hue(self.config.saturation, self.config.value);
        Particle {
            position,
            velocity: velocity.clamp_length_max(self.config.max_speed),
            radius,
            color: theme.unwrap_or(hue),
            hue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn field() -> ParticleField {
        let mut field = ParticleField::with_seed(FieldConfig::default(), 11).unwrap();
        field.initialize(800.0, 600.0, None);
        field
    }

    /// Every particle at rest on a regular ring, so nothing clusters.
    fn spread_out(field: &mut ParticleField, count: usize) {
        let center = field.state().viewport * 0.5;
        let template = field.state().particles[0];
        let particles = (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * std::f32::consts::TAU;
                Particle {
                    position: center + Vec2::from_angle(angle) * 280.0,
                    velocity: Vec2::ZERO,
                    ..template
                }
            })
            .collect();
        field.state_mut().particles = particles;
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FieldConfig::default().with_base_count(0);
        assert!(ParticleField::with_seed(config, 1).is_err());
    }

    #[test]
    fn test_initialize_counts_and_clears_reset() {
        let mut field = ParticleField::with_seed(FieldConfig::default(), 3).unwrap();
        field.request_reset();
        field.initialize(800.0, 600.0, None);
        assert_eq!(field.len(), 40);
        assert!(!field.state().reset_requested);
    }

    #[test]
    fn test_initialize_within_margin() {
        let field = field();
        for p in &field.state().particles {
            assert!(p.position.x >= -240.0 && p.position.x <= 1040.0);
            assert!(p.position.y >= -180.0 && p.position.y <= 780.0);
            assert!(p.radius >= 2.0 && p.radius < 5.0);
            assert!(p.velocity.x.abs() <= 0.4 && p.velocity.y.abs() <= 0.4);
        }
    }

    #[test]
    fn test_initialize_with_theme() {
        let mut field = ParticleField::with_seed(FieldConfig::default(), 5).unwrap();
        let gold = Vec3::new(0.9, 0.7, 0.1);
        field.initialize(800.0, 600.0, Some(gold));
        assert!(field.state().particles.iter().all(|p| p.color == gold));
    }

    #[test]
    fn test_initialize_zero_viewport_is_empty() {
        let mut field = ParticleField::with_seed(FieldConfig::default(), 5).unwrap();
        field.initialize(0.0, 600.0, None);
        assert!(field.is_empty());
        assert!(field.state().reset_requested);
    }

    #[test]
    fn test_zero_viewport_initialize_builds_on_first_valid_tick() {
        let mut field = ParticleField::with_seed(FieldConfig::default(), 5).unwrap();
        field.initialize(0.0, 0.0, None);
        assert!(field.tick(&TickContext::manual(0)).skipped);
        assert!(field.is_empty());

        field.on_resize(800.0, 600.0);
        let report = field.tick(&TickContext::manual(1));
        assert!(report.reset);
        assert_eq!(field.len(), 40);
        assert!(!field.state().reset_requested);
    }

    #[test]
    fn test_pointer_and_resize_do_not_move_particles() {
        let mut field = field();
        let before = field.state().particles.clone();
        field.on_pointer_move(10.0, 20.0);
        field.on_resize(400.0, 300.0);
        assert_eq!(field.state().particles, before);
        assert_eq!(field.state().pointer, Vec2::new(10.0, 20.0));
        assert_eq!(field.state().viewport, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_zero_viewport_skips_tick() {
        let mut field = field();
        field.request_reset();
        field.on_resize(0.0, 0.0);
        let before = field.state().clone();

        let report = field.tick(&TickContext::manual(1));
        assert!(report.skipped);
        assert_eq!(field.state(), &before);
        // Reset stays pending until the viewport is usable again
        assert!(field.state().reset_requested);

        field.on_resize(800.0, 600.0);
        let report = field.tick(&TickContext::manual(2));
        assert!(report.reset);
        assert!(!field.state().reset_requested);
    }

    #[test]
    fn test_pointer_repels() {
        let config = FieldConfig::default().with_motion(0.0, 1.6);
        let mut field = ParticleField::with_seed(config, 9).unwrap();
        field.initialize(800.0, 600.0, None);
        spread_out(&mut field, 40);

        let target = field.state().particles[0].position;
        field.on_pointer_move(target.x - 30.0, target.y);
        field.tick(&TickContext::manual(1));

        let p = field.state().particles[0];
        assert!(p.velocity.x > 0.0, "particle should flee to +x: {:?}", p.velocity);
        assert!(p.velocity.length() <= 1.6 + 1e-5);
    }

    #[test]
    fn test_edge_bounce_points_inward() {
        let config = FieldConfig::default().with_motion(0.0, 1.6);
        let mut field = ParticleField::with_seed(config, 9).unwrap();
        field.initialize(800.0, 600.0, None);
        spread_out(&mut field, 40);

        field.state_mut().particles[0].position = Vec2::new(-5.0, -5.0);
        field.state_mut().particles[0].velocity = Vec2::new(-1.0, -1.0);
        field.state_mut().particles[1].position = Vec2::new(805.0, 605.0);
        field.state_mut().particles[1].velocity = Vec2::new(1.0, 1.0);
        field.tick(&TickContext::manual(1));

        assert_eq!(field.state().particles[0].velocity, Vec2::new(1.0, 1.0));
        assert_eq!(field.state().particles[1].velocity, Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_theme_leaves_minority() {
        let mut field = field();
        let teal = Vec3::new(0.1, 0.8, 0.7);
        field.set_theme_color(Some(teal));
        field.tick(&TickContext::manual(1));

        let n = field.len();
        let particles = &field.state().particles;
        assert!(particles[..n - 10].iter().all(|p| p.color == teal));
        assert!(particles[n - 10..].iter().any(|p| p.color != teal));
    }

    #[test]
    fn test_reset_suppresses_recolor() {
        let mut field = field();
        let teal = Vec3::new(0.1, 0.8, 0.7);
        field.set_theme_color(Some(teal));
        field.request_reset();
        let report = field.tick(&TickContext::manual(1));

        assert!(report.reset);
        assert_eq!(field.len(), 40);
        // A reset under a theme paints the fresh field entirely
        assert!(field.state().particles.iter().all(|p| p.color == teal));
    }

    #[test]
    fn test_reset_under_theme_regains_blend() {
        let mut field = field();
        let teal = Vec3::new(0.1, 0.8, 0.7);
        field.set_theme_color(Some(teal));
        field.request_reset();
        field.tick(&TickContext::manual(1));
        field.tick(&TickContext::manual(2));

        let n = field.len();
        let minority = &field.state().particles[n - 10..];
        assert!(minority.iter().all(|p| p.color == p.hue));
        assert!(minority.iter().any(|p| p.color != teal));
    }

    #[test]
    fn test_edge_spawns_use_own_hue_under_theme() {
        let mut field = field();
        let teal = Vec3::new(0.1, 0.8, 0.7);
        field.set_theme_color(Some(teal));
        spread_out(&mut field, 50);
        let center = field.state().viewport * 0.5;
        let template = field.state().particles[0];
        for _ in 0..5 {
            field.state_mut().particles.push(Particle {
                position: center,
                ..template
            });
        }

        let report = field.tick(&TickContext::manual(1));
        assert_eq!(report.respawned, 5);
        let spawned = &field.state().particles[50..];
        assert!(spawned.iter().all(|p| p.color == p.hue && p.color != teal));
    }

    #[test]
    fn test_overflow_captures_and_replaces() {
        let mut field = field();
        spread_out(&mut field, 50);
        // Five extras parked on the ring's center get captured
        let center = field.state().viewport * 0.5;
        let template = field.state().particles[0];
        for _ in 0..5 {
            field.state_mut().particles.push(Particle {
                position: center,
                ..template
            });
        }

        let report = field.tick(&TickContext::manual(1));
        assert_eq!(report.injected, 0);
        assert_eq!(report.vanished, 5);
        assert_eq!(report.respawned, 5);
        assert_eq!(report.trimmed, 0);
        assert_eq!(field.len(), 55);
    }

    #[test]
    fn test_hard_trim_to_base() {
        let config = FieldConfig::default().with_motion(0.0, 1.6);
        let mut field = ParticleField::with_seed(config, 2).unwrap();
        field.initialize(800.0, 600.0, None);
        spread_out(&mut field, 70);

        let report = field.tick(&TickContext::manual(1));
        assert_eq!(report.injected, 0);
        assert_eq!(report.vanished, 0);
        assert_eq!(report.trimmed, 30);
        assert_eq!(field.len(), 40);
    }

    #[test]
    fn test_refill_after_raising_base() {
        let mut field = field();
        spread_out(&mut field, 40);
        let config = FieldConfig::default()
            .with_base_count(100)
            .with_caps(110, 120)
            .with_injection(200, 8);
        field.set_config(config).unwrap();

        let report = field.tick(&TickContext::manual(1));
        assert_eq!(report.refilled, 60);
        assert_eq!(field.len(), 100);

        let report = field.tick(&TickContext::manual(2));
        assert_eq!(report.refilled, 0);
    }

    #[test]
    fn test_refill_tops_up_after_host_edit() {
        let mut field = field();
        field.state_mut().particles.truncate(25);
        let report = field.tick(&TickContext::manual(1));
        assert_eq!(report.refilled, 15);
        assert_eq!(field.len(), 40);
    }

    #[test]
    fn test_draw_matches_state() {
        let field = field();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        field.draw(&mut surface);
        assert_eq!(surface.calls().len(), field.len() + 1);
    }

    #[test]
    fn test_apply_input() {
        let mut field = field();
        field.apply_input(PendingInput {
            pointer: Some(Vec2::new(5.0, 6.0)),
            viewport: Some(Vec2::new(640.0, 480.0)),
            theme: Some(ThemeChange::Set(Vec3::X)),
            reset: true,
        });

        assert_eq!(field.state().pointer, Vec2::new(5.0, 6.0));
        assert_eq!(field.state().viewport, Vec2::new(640.0, 480.0));
        assert_eq!(field.state().theme, Some(Vec3::X));
        assert!(field.state().reset_requested);

        field.apply_input(PendingInput {
            theme: Some(ThemeChange::Clear),
            ..Default::default()
        });
        assert_eq!(field.state().theme, None);
    }

    #[test]
    fn test_set_config_validates() {
        let mut field = field();
        assert!(field.set_config(FieldConfig::default().with_caps(10, 20)).is_err());
        assert!(field.set_config(FieldConfig::default().with_avoid_radius(200.0)).is_ok());
        assert_eq!(field.config().avoid_radius, 200.0);
    }
}
