//! # Wisp - a restless particle field
//!
//! A small swarm of glowing dots for page backgrounds and idle screens. The
//! dots drift with Brownian jitter, scatter away from the pointer and never
//! settle into a permanent clump: when most of them bunch up, fresh dots fly
//! in from the edges, and when the swarm grows too large the newcomers are
//! reeled back in and retired.
//!
//! The simulation is plain CPU code with no clock of its own. The host owns
//! the frame loop and calls [`ParticleField::tick`] once per frame, then
//! [`ParticleField::draw`] into any [`Surface`]. A wgpu/winit [`Viewer`] is
//! included for running the field in a window.
//!
//! ## Quick Start
//!
//! ```ignore
//! use wisp::prelude::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     Viewer::new()
//!         .with_config(FieldConfig::default().with_avoid_radius(160.0))
//!         .with_seed(42)
//!         .run()
//! }
//! ```
//!
//! ## Driving the field yourself
//!
//! ```ignore
//! let mut field = ParticleField::with_seed(FieldConfig::default(), 7)?;
//! let mut surface = RecordingSurface::new(800.0, 600.0);
//! field.initialize(800.0, 600.0, None);
//!
//! for frame in 0..600 {
//!     field.on_pointer_move(400.0, 300.0);
//!     field.tick(&TickContext::manual(frame));
//!     field.draw(&mut surface);
//! }
//! ```
//!
//! ## Inputs from other threads
//!
//! Event handlers post into an [`InputHandle`]; the frame loop drains it with
//! [`InputHandle::take`] and hands the result to
//! [`ParticleField::apply_input`]. Only the latest pointer and viewport
//! survive between frames, and resets and theme changes land at the end of
//! the next tick.
//!
//! ## Module Overview
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`field`] | [`ParticleField`], [`FieldState`], [`Particle`], [`TickReport`] |
//! | [`config`] | [`FieldConfig`] tunables and validation |
//! | [`surface`] | [`Surface`] trait, [`RecordingSurface`], [`InstanceSurface`] |
//! | [`input`] | [`InputHandle`], [`PendingInput`], winit [`Input`] adapter |
//! | [`time`] | [`FrameClock`] and [`TickContext`] |
//! | [`theme`] | [`House`] palettes and the [`HouseSelector`] |
//! | [`spell`] | [`SpellCaster`], a rate-limited reset trigger |

pub mod config;
pub mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod spawn;
pub mod spell;
pub mod surface;
pub mod theme;
pub mod time;
mod viewer;

pub use config::FieldConfig;
pub use error::{ConfigError, GpuError, ViewerError};
pub use field::{FieldState, Particle, ParticleField, TickReport};
pub use glam::{Vec2, Vec3};
pub use input::{Action, Input, InputHandle, PendingInput, ThemeChange};
pub use spawn::SpawnContext;
pub use spell::SpellCaster;
pub use surface::{draw, CircleInstance, DrawCall, Glow, InstanceSurface, RecordingSurface, Surface};
pub use theme::{House, HouseSelector};
pub use time::{FrameClock, TickContext};
pub use viewer::Viewer;

/// Convenient re-exports for the common case.
///
/// ```ignore
/// use wisp::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::FieldConfig;
    pub use crate::error::{ConfigError, ViewerError};
    pub use crate::field::{FieldState, Particle, ParticleField, TickReport};
    pub use crate::input::{InputHandle, PendingInput, ThemeChange};
    pub use crate::surface::{Glow, InstanceSurface, RecordingSurface, Surface};
    pub use crate::theme::House;
    pub use crate::time::{FrameClock, TickContext};
    pub use crate::viewer::Viewer;
    pub use glam::{Vec2, Vec3};
}
