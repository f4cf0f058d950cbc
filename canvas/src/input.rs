//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Modifiers`, `Button`, `Key` and `WheelDelta` describe a single host event.
//! `UiState` holds the sticky settings that outlive a gesture (stroke width,
//! whether the pan key is down). `InputState` is the active gesture between
//! pointer-down and pointer-up; each variant carries exactly the context that
//! gesture needs, so drawing, erasing and panning can never overlap.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::consts::DEFAULT_STROKE_SIZE;
use crate::doc::Stroke;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Platform zoom accelerator: Ctrl on most systems, Command on macOS.
    #[must_use]
    pub fn is_accelerator(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button. Draws, or pans while the pan key is held.
    Primary,
    /// Middle mouse button. Unused.
    Middle,
    /// Right mouse button. Erases.
    Secondary,
}

/// A keyboard key, identified by `KeyboardEvent.code` (e.g. `"Space"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn is(&self, code: &str) -> bool {
        self.0 == code
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount.
    pub dx: f64,
    /// Vertical scroll amount (positive = down / zoom out).
    pub dy: f64,
}

/// Settings that persist across gestures.
#[derive(Debug, Clone, Copy)]
pub struct UiState {
    /// Width tagged onto newly captured points.
    pub stroke_size: f64,
    /// The pan key is currently held down.
    pub pan_key_held: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self { stroke_size: DEFAULT_STROKE_SIZE, pan_key_held: false }
    }
}

/// Fieldless view of [`InputState`] for queries and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Drawing,
    Erasing,
    Panning,
}

/// The gesture currently being tracked.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is laying down ink.
    Drawing {
        /// The stroke being captured; committed to the store on pointer-up.
        stroke: Stroke,
    },
    /// The secondary button is held; every move erases under the pointer.
    Erasing,
    /// The user is dragging the view with the pan key held.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Idle => Mode::Idle,
            Self::Drawing { .. } => Mode::Drawing,
            Self::Erasing => Mode::Erasing,
            Self::Panning { .. } => Mode::Panning,
        }
    }

    /// The stroke being drawn, if a drawing gesture is active.
    #[must_use]
    pub fn in_progress(&self) -> Option<&Stroke> {
        match self {
            Self::Drawing { stroke } => Some(stroke),
            _ => None,
        }
    }
}
