//! Seeded randomness for spawning and jitter.
//!
//! Every random decision the field makes (positions, hues, jitter, edge
//! choice, headings) goes through a [`SpawnContext`], so a field built with a
//! seed replays exactly.
//!
//! ```ignore
//! let mut ctx = SpawnContext::seeded(7);
//! let pos = ctx.random_in_rect(Vec2::new(-100.0, -50.0), Vec2::new(900.0, 650.0));
//! let color = ctx.random_hue(0.7, 0.95);
//! ```

use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// One of the four viewport edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// All edges, in pick order.
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];
}

/// Random source with helpers for the spawn patterns the field uses.
#[derive(Debug, Clone)]
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Deterministic context for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Context seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `min..max`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Random index in `0..len`. `len` must be non-zero.
    #[inline]
    pub fn random_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Symmetric jitter: each axis uniform in `-amount..amount`.
    pub fn random_jitter(&mut self, amount: f32) -> Vec2 {
        Vec2::new(
            self.random_range(-amount, amount),
            self.random_range(-amount, amount),
        )
    }

    // ========== Position helpers ==========

    /// Random point inside the axis-aligned rectangle `min..max`.
    pub fn random_in_rect(&mut self, min: Vec2, max: Vec2) -> Vec2 {
        Vec2::new(
            self.random_range(min.x, max.x),
            self.random_range(min.y, max.y),
        )
    }

    /// Random point `offset` units outside one of the viewport edges, picked
    /// uniformly, at a uniform spot along that edge.
    pub fn random_edge_point(&mut self, viewport: Vec2, offset: f32) -> (Edge, Vec2) {
        let edge = Edge::ALL[self.random_index(Edge::ALL.len())];
        let point = match edge {
            Edge::Left => Vec2::new(-offset, self.random_range(0.0, viewport.y)),
            Edge::Right => Vec2::new(viewport.x + offset, self.random_range(0.0, viewport.y)),
            Edge::Top => Vec2::new(self.random_range(0.0, viewport.x), -offset),
            Edge::Bottom => Vec2::new(self.random_range(0.0, viewport.x), viewport.y + offset),
        };
        (edge, point)
    }

    // ========== Direction/velocity helpers ==========

    /// Random unit vector.
    pub fn random_direction(&mut self) -> Vec2 {
        Vec2::from_angle(self.random_range(0.0, TAU))
    }

    /// Velocity of `speed` aimed from `from` at `to`, rotated by a uniform
    /// angle in `-spread..spread`.
    pub fn heading_toward(&mut self, from: Vec2, to: Vec2, spread: f32, speed: f32) -> Vec2 {
        let delta = to - from;
        let base = if delta.length_squared() > 1e-8 {
            delta.y.atan2(delta.x)
        } else {
            self.random_range(0.0, TAU)
        };
        let angle = base + self.random_range(-spread, spread);
        Vec2::from_angle(angle) * speed
    }

    // ========== Color helpers ==========

    /// Random color with given saturation and value (HSV model).
    ///
    /// Hue is randomized, giving vibrant varied colors.
    pub fn random_hue(&mut self, saturation: f32, value: f32) -> Vec3 {
        let hue = self.rng.gen::<f32>();
        hsv_to_rgb(hue, saturation, value)
    }
}

/// Convert HSV (all components 0-1) to RGB.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}
