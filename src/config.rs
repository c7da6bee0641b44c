//! Tunable constants for the particle field.
//!
//! Every "feel" constant of the simulation lives here as a named field, so
//! hosts can tweak the swarm without touching the engine. The defaults
//! reproduce the portfolio background.
//!
//! # Example
//!
//! ```ignore
//! let config = FieldConfig::default()
//!     .with_base_count(60)
//!     .with_caps(75, 90)
//!     .with_avoid_radius(160.0);
//!
//! let field = ParticleField::new(config)?;
//! ```

use crate::error::ConfigError;
use std::f32::consts::FRAC_PI_2;
use std::ops::Range;

/// Named, tunable parameters of a [`ParticleField`](crate::ParticleField).
///
/// Counts are particle counts, distances are surface units (pixels for the
/// viewer), speeds are units per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    // ========== Population ==========
    /// Particles created by a (re)initialize. Also the floor and the
    /// hard-trim target.
    pub base_count: usize,
    /// Above this count, particles past `base_count` are pulled toward the
    /// centroid and may vanish.
    pub soft_cap: usize,
    /// Above this count (after captures), the field is trimmed to `base_count`.
    pub hard_cap: usize,
    /// Cluster injection only happens while the count is below this.
    pub injection_cap: usize,
    /// Particles spawned per cluster injection.
    pub injection_count: usize,

    // ========== Clustering ==========
    /// Cluster radius as a fraction of `min(width, height)`.
    pub cluster_radius_fraction: f32,
    /// Fraction of particles inside the cluster radius that counts as a clump.
    pub cluster_threshold: f32,
    /// Extras move this fraction of the way to the centroid each tick.
    pub extra_pull: f32,
    /// Extras closer than this to the centroid vanish.
    pub capture_radius: f32,

    // ========== Spawning ==========
    /// Spawn area extends this fraction of the viewport past each edge.
    pub margin_fraction: f32,
    /// Distance outside the viewport edge where edge spawns appear.
    pub edge_offset: f32,
    /// Particle radius range.
    pub radius_range: Range<f32>,
    /// Bound for each initial velocity component.
    pub initial_speed: f32,
    /// Speed of particles injected to break up a clump.
    pub injection_speed: f32,
    /// Angular jitter (radians) on injected headings.
    pub injection_spread: f32,

    // ========== Motion ==========
    /// Bound for the per-tick random velocity delta on each axis.
    pub jitter: f32,
    /// Velocity magnitude cap.
    pub max_speed: f32,
    /// Pointer avoidance radius.
    pub avoid_radius: f32,
    /// Repulsion scale at zero distance.
    pub avoid_strength: f32,

    // ========== Color ==========
    /// Trailing particles that keep their own hue when a theme is set.
    pub theme_minority: usize,
    /// HSV saturation of random hues.
    pub saturation: f32,
    /// HSV value of random hues.
    pub value: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            base_count: 40,
            soft_cap: 50,
            hard_cap: 60,
            injection_cap: 80,
            injection_count: 8,

            cluster_radius_fraction: 0.18,
            cluster_threshold: 0.7,
            extra_pull: 0.08,
            capture_radius: 10.0,

            margin_fraction: 0.3,
            edge_offset: 20.0,
            radius_range: 2.0..5.0,
            initial_speed: 0.4,
            injection_speed: 1.4,
            injection_spread: 0.4,

            jitter: 0.08,
            max_speed: 1.6,
            avoid_radius: 120.0,
            avoid_strength: 1.2,

            theme_minority: 10,
            saturation: 0.7,
            value: 0.95,
        }
    }
}

impl FieldConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base particle count.
    pub fn with_base_count(mut self, count: usize) -> Self {
        self.base_count = count;
        self
    }

    /// Set the soft and hard overflow caps.
    pub fn with_caps(mut self, soft: usize, hard: usize) -> Self {
        self.soft_cap = soft;
        self.hard_cap = hard;
        self
    }

    /// Set the cluster injection cap and batch size.
    pub fn with_injection(mut self, cap: usize, count: usize) -> Self {
        self.injection_cap = cap;
        self.injection_count = count;
        self
    }

    /// Set the cluster radius fraction and majority threshold.
    pub fn with_cluster(mut self, radius_fraction: f32, threshold: f32) -> Self {
        self.cluster_radius_fraction = radius_fraction;
        self.cluster_threshold = threshold;
        self
    }

    /// Set the margin fraction of the spawn area.
    pub fn with_margin(mut self, fraction: f32) -> Self {
        self.margin_fraction = fraction;
        self
    }

    /// Set the particle radius range.
    pub fn with_radius_range(mut self, range: Range<f32>) -> Self {
        self.radius_range = range;
        self
    }

    /// Set jitter and max speed.
    pub fn with_motion(mut self, jitter: f32, max_speed: f32) -> Self {
        self.jitter = jitter;
        self.max_speed = max_speed;
        self
    }

    /// Set the pointer avoidance radius.
    pub fn with_avoid_radius(mut self, radius: f32) -> Self {
        self.avoid_radius = radius;
        self
    }

    /// Set the pointer repulsion scale.
    pub fn with_avoid_strength(mut self, strength: f32) -> Self {
        self.avoid_strength = strength;
        self
    }

    /// Set how many trailing particles keep their own color under a theme.
    pub fn with_theme_minority(mut self, count: usize) -> Self {
        self.theme_minority = count;
        self
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_count == 0 {
            return Err(ConfigError::EmptyField);
        }
        if self.soft_cap < self.base_count || self.hard_cap < self.soft_cap {
            return Err(ConfigError::CapsOutOfOrder {
                base: self.base_count,
                soft: self.soft_cap,
                hard: self.hard_cap,
            });
        }

        positive("max_speed", self.max_speed)?;
        positive("injection_speed", self.injection_speed)?;
        positive("avoid_radius", self.avoid_radius)?;
        positive("capture_radius", self.capture_radius)?;
        positive("cluster_radius_fraction", self.cluster_radius_fraction)?;
        positive("edge_offset", self.edge_offset)?;
        positive("margin_fraction", self.margin_fraction)?;

        in_range("injection_speed", self.injection_speed, 0.0, self.max_speed)?;
        in_range("cluster_threshold", self.cluster_threshold, 0.0, 1.0)?;
        in_range("extra_pull", self.extra_pull, 0.0, 1.0)?;
        in_range("saturation", self.saturation, 0.0, 1.0)?;
        in_range("value", self.value, 0.0, 1.0)?;
        in_range("jitter", self.jitter, 0.0, self.max_speed)?;
        in_range("initial_speed", self.initial_speed, 0.0, self.max_speed)?;
        in_range("avoid_strength", self.avoid_strength, 0.0, f32::MAX)?;
        // Headings must stay within 90 degrees of the centroid direction.
        in_range("injection_spread", self.injection_spread, 0.0, FRAC_PI_2 - f32::EPSILON)?;

        let Range { start, end } = self.radius_range;
        if !(start > 0.0 && end > start) {
            return Err(ConfigError::EmptyRadiusRange { min: start, max: end });
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn in_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value, min, max })
    }
}
