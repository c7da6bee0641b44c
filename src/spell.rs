//! The "cast a spell" reset trigger.
//!
//! Casting posts a reset pulse to the field. A short cooldown keeps a burst
//! of clicks from re-randomizing the field every frame.

use crate::input::InputHandle;

/// Default seconds between casts.
pub const DEFAULT_COOLDOWN: f32 = 0.5;

/// Posts reset pulses with a cooldown.
#[derive(Debug, Clone)]
pub struct SpellCaster {
    handle: InputHandle,
    cooldown: f32,
    last_cast: Option<f32>,
    casts: u32,
}

impl SpellCaster {
    pub fn new(handle: InputHandle) -> Self {
        Self {
            handle,
            cooldown: DEFAULT_COOLDOWN,
            last_cast: None,
            casts: 0,
        }
    }

    pub fn with_cooldown(mut self, seconds: f32) -> Self {
        self.cooldown = seconds.max(0.0);
        self
    }

    /// Cast at time `now` (seconds). Returns whether a reset was posted.
    pub fn cast(&mut self, now: f32) -> bool {
        if let Some(last) = self.last_cast {
            if now - last < self.cooldown {
                return false;
            }
        }
        self.last_cast = Some(now);
        self.casts += 1;
        self.handle.reset();
        log::debug!("spell cast #{} at {:.2}s", self.casts, now);
        true
    }

    /// Successful casts so far.
    pub fn casts(&self) -> u32 {
        self.casts
    }
}
