//! 2D drawing surfaces and the field draw pass.
//!
//! The engine never talks to a graphics API directly. It issues two kinds of
//! calls against a [`Surface`]: clear a rectangle, and fill a glowing circle.
//!
//! | Surface | Use |
//! |---------|-----|
//! | [`RecordingSurface`] | Records calls, for tests and debugging |
//! | [`InstanceSurface`] | Packs circles into GPU instance data |

use crate::field::FieldState;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Glow/shadow and opacity applied to every particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Shadow blur radius in surface units.
    pub blur: f32,
    /// Fill opacity (0-1).
    pub opacity: f32,
}

impl Default for Glow {
    fn default() -> Self {
        Self {
            blur: 8.0,
            opacity: 0.7,
        }
    }
}

/// A 2D drawing target.
pub trait Surface {
    /// Current surface size (width, height). A non-positive size means the
    /// surface is not ready and nothing is drawn.
    fn size(&self) -> Vec2;

    /// Clear the rectangle starting at `origin` with the given size.
    fn clear(&mut self, origin: Vec2, size: Vec2);

    /// Fill a circle, with a glow of the circle's color around it.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3, glow: Glow);
}

/// Render the field: clear the whole surface, then one circle per particle.
///
/// Reads `state` only, so drawing the same state twice issues the same calls.
/// Skips everything when the surface or the field viewport has no area.
pub fn draw<S: Surface + ?Sized>(surface: &mut S, state: &FieldState, glow: Glow) {
    let size = surface.size();
    if size.x <= 0.0 || size.y <= 0.0 || !state.has_viewport() {
        return;
    }

    surface.clear(Vec2::ZERO, size);
    for p in &state.particles {
        surface.fill_circle(p.position, p.radius, p.color, glow);
    }
}

// ========== Recording ==========

/// A single recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear {
        origin: Vec2,
        size: Vec2,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Vec3,
        glow: Glow,
    },
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Vec2,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the surface empty.
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, origin: Vec2, size: Vec2) {
        self.calls.push(DrawCall::Clear { origin, size });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3, glow: Glow) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
            glow,
        });
    }
}

// ========== GPU instances ==========

/// Per-circle instance data for the GPU renderer.
///
/// Layout matches the `CircleInstance` vertex input in `circle.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    /// Center in surface pixels.
    pub center: [f32; 2],
    /// Solid disc radius in pixels.
    pub radius: f32,
    /// Halo width in pixels.
    pub blur: f32,
    /// RGB color and opacity.
    pub color: [f32; 4],
}

/// Surface that packs circles into [`CircleInstance`]s.
///
/// A clear that covers the whole surface drops all queued instances, which
/// is what the draw pass does at the start of every frame.
#[derive(Debug, Clone, Default)]
pub struct InstanceSurface {
    size: Vec2,
    instances: Vec<CircleInstance>,
}

impl InstanceSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            instances: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn instances(&self) -> &[CircleInstance] {
        &self.instances
    }

    /// Raw bytes for upload to an instance buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Surface for InstanceSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, origin: Vec2, size: Vec2) {
        let min = origin;
        let max = origin + size;
        if min.x <= 0.0 && min.y <= 0.0 && max.x >= self.size.x && max.y >= self.size.y {
            self.instances.clear();
        } else {
            self.instances.retain(|c| {
                let center = Vec2::from(c.center);
                !(center.cmpge(min).all() && center.cmple(max).all())
            });
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3, glow: Glow) {
        self.instances.push(CircleInstance {
            center: center.to_array(),
            radius,
            blur: glow.blur,
            color: color.extend(glow.opacity).to_array(),
        });
    }
}
