//! Frame timing for hosts that drive a field.
//!
//! The field advances in unit ticks and never looks at the wall clock. A
//! host that wants timing (FPS readout, timed effects like the house sort)
//! keeps a [`FrameClock`] and hands the field the [`TickContext`] it yields.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//!
//! // In your redraw handler:
//! if let Some(ctx) = clock.advance() {
//!     field.tick(&ctx);
//! }
//! ```

use std::time::{Duration, Instant};

/// Per-tick information passed to [`ParticleField::tick`](crate::ParticleField::tick).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    /// Frames advanced so far, starting at 1 for the first tick.
    pub frame: u64,
    /// Seconds since the clock started, excluding paused time.
    pub elapsed: f32,
    /// Seconds since the previous tick.
    pub delta: f32,
}

impl TickContext {
    /// Context for headless hosts and tests: frame `frame` of a 60 Hz run.
    pub fn manual(frame: u64) -> Self {
        Self {
            frame,
            elapsed: frame as f32 / 60.0,
            delta: 1.0 / 60.0,
        }
    }
}

/// Frame clock with pause and fixed-step support.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    pause_elapsed: Duration,
    /// Fixed delta time for deterministic hosts (optional).
    fixed_delta: Option<f32>,
}

impl FrameClock {
    /// Create a clock starting now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            pause_elapsed: Duration::ZERO,
            fixed_delta: None,
        }
    }

    /// Advance one frame. Returns `None` while paused, in which case the
    /// host should not tick the field.
    pub fn advance(&mut self) -> Option<TickContext> {
        if self.paused {
            self.delta_secs = 0.0;
            return None;
        }

        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.delta_secs = self.fixed_delta.unwrap_or(raw_delta);
        self.elapsed_secs = match self.fixed_delta {
            Some(step) => self.elapsed_secs + step,
            None => now.duration_since(self.start).saturating_sub(self.pause_elapsed).as_secs_f32(),
        };
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        Some(TickContext {
            frame: self.frame_count,
            elapsed: self.elapsed_secs,
            delta: self.delta_secs,
        })
    }

    /// Seconds since start, excluding paused time.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Total frames advanced.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after pausing. The paused span does not count as elapsed.
    pub fn resume(&mut self) {
        if self.paused {
            let now = Instant::now();
            self.pause_elapsed += now.duration_since(self.last_frame);
            self.last_frame = now;
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Use a fixed delta per frame instead of wall time. `None` restores
    /// real timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
