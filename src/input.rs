//! Host input for the particle field.
//!
//! Pointer moves, resizes, reset pulses and theme changes may arrive from
//! anywhere (an event loop, another thread). They are collected into a
//! [`PendingInput`] snapshot where the latest value wins, and the frame loop
//! swaps the whole snapshot out once per frame before ticking:
//!
//! ```ignore
//! let handle = InputHandle::new();
//!
//! // Event side (any thread)
//! handle.pointer_moved(Vec2::new(x, y));
//! handle.reset();
//!
//! // Frame side
//! field.apply_input(handle.take());
//! field.tick(&ctx);
//! ```
//!
//! One writer side and one reader side, with whole-snapshot swaps, means the
//! tick never sees half of an update.
//!
//! [`Input`] adapts winit window events onto an [`InputHandle`] and turns the
//! viewer's keys and clicks into [`Action`]s.

use glam::{Vec2, Vec3};
use std::sync::{Arc, Mutex, MutexGuard};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// A requested change to the theme color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeChange {
    Set(Vec3),
    Clear,
}

/// Input accumulated since the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingInput {
    /// Latest pointer position.
    pub pointer: Option<Vec2>,
    /// Latest viewport size.
    pub viewport: Option<Vec2>,
    /// A reset pulse arrived.
    pub reset: bool,
    /// Latest theme change.
    pub theme: Option<ThemeChange>,
}

impl PendingInput {
    /// Whether nothing was posted.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Cloneable, thread-safe handle for posting input to a field.
#[derive(Debug, Clone, Default)]
pub struct InputHandle {
    pending: Arc<Mutex<PendingInput>>,
}

impl InputHandle {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PendingInput> {
        // The snapshot is plain data, so a panic elsewhere cannot leave it torn.
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn pointer_moved(&self, position: Vec2) {
        self.lock().pointer = Some(position);
    }

    pub fn resized(&self, width: f32, height: f32) {
        self.lock().viewport = Some(Vec2::new(width, height));
    }

    /// Post a reset pulse. Multiple pulses before a frame collapse into one.
    pub fn reset(&self) {
        self.lock().reset = true;
    }

    pub fn set_theme(&self, color: Vec3) {
        self.lock().theme = Some(ThemeChange::Set(color));
    }

    pub fn clear_theme(&self) {
        self.lock().theme = Some(ThemeChange::Clear);
    }

    /// Swap out everything posted so far.
    pub fn take(&self) -> PendingInput {
        std::mem::take(&mut *self.lock())
    }
}

// ========== Window adapter ==========

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn from_winit(btn: WinitMouseButton) -> Option<Self> {
        match btn {
            WinitMouseButton::Left => Some(MouseButton::Left),
            WinitMouseButton::Right => Some(MouseButton::Right),
            WinitMouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// The keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    C,
    H,
    R,
    Space,
    Escape,
    Other,
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::KeyC => KeyCode::C,
            WinitKeyCode::KeyH => KeyCode::H,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Escape => KeyCode::Escape,
            _ => KeyCode::Other,
        }
    }
}

/// Viewer commands produced from clicks and keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Left click: cast a spell (reset the field).
    CastSpell,
    /// `H`: sort into a house (theme the field).
    SortHouse,
    /// `C`: drop the theme color.
    ClearTheme,
    /// `R`: reset without the spell cooldown.
    Reset,
    /// `Space`: pause/resume.
    TogglePause,
    /// `Escape`: close the viewer.
    Quit,
}

/// Turns window events into field input and viewer actions.
#[derive(Debug)]
pub struct Input {
    handle: InputHandle,
    pointer: Vec2,
    window_size: (u32, u32),
    actions: Vec<Action>,
}

impl Input {
    /// Create an adapter posting to `handle`.
    pub fn new(handle: InputHandle) -> Self {
        Self {
            handle,
            pointer: Vec2::ZERO,
            window_size: (0, 0),
            actions: Vec::new(),
        }
    }

    pub fn handle(&self) -> &InputHandle {
        &self.handle
    }

    /// Last pointer position in window pixels.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Actions triggered since the last call.
    pub fn drain_actions(&mut self) -> std::vec::Drain<'_, Action> {
        self.actions.drain(..)
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::Resized(size) => self.resized(size.width, size.height),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                if let Some(btn) = MouseButton::from_winit(*button) {
                    self.mouse_pressed(btn);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                // Ignore auto-repeat so holding a key fires once
                if event.state == ElementState::Pressed && !event.repeat {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        self.key_pressed(KeyCode::from(code));
                    }
                }
            }
            _ => {}
        }
    }

    pub(crate) fn pointer_moved(&mut self, position: Vec2) {
        self.pointer = position;
        self.handle.pointer_moved(position);
    }

    pub(crate) fn resized(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
        self.handle.resized(width as f32, height as f32);
    }

    pub(crate) fn mouse_pressed(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.actions.push(Action::CastSpell);
        }
    }

    pub(crate) fn key_pressed(&mut self, key: KeyCode) {
        let action = match key {
            KeyCode::H => Action::SortHouse,
            KeyCode::C => Action::ClearTheme,
            KeyCode::R => Action::Reset,
            KeyCode::Space => Action::TogglePause,
            KeyCode::Escape => Action::Quit,
            KeyCode::Other => return,
        };
        self.actions.push(action);
    }
}
