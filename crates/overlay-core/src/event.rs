#![forbid(unsafe_code)]

//! Input events forwarded by the host view layer.
//!
//! Events are plain values. The host translates whatever its platform
//! delivers (DOM events, winit events, terminal input) into these types and
//! forwards them, in arrival order, to the overlay controller.

use bitflags::bitflags;

use crate::geometry::ViewportSize;

/// An input event delivered to an overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),
    /// A pointer or touch sample.
    Pointer(PointerEvent),
    /// The viewport was resized.
    Resize(ViewportSize),
    /// The backdrop behind a modal overlay was clicked.
    BackdropClick,
    /// The host's enter/exit animation finished.
    TransitionEnd,
}

/// Keyboard key codes the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Tab,
    /// Shift+Tab as reported by terminals that fold the modifier into the key.
    BackTab,
    Escape,
    Enter,
    Char(char),
    /// Any key the engine does not interpret.
    Other,
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const SUPER = 0b1000;
    }
}

/// Whether a key went down, repeated, or came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A key press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }

    /// Set the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the event kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// True for presses and auto-repeats; releases are not actionable.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// True when this is a forward or backward Tab.
    #[must_use]
    pub const fn is_tab(&self) -> bool {
        matches!(self.code, KeyCode::Tab | KeyCode::BackTab)
    }

    /// True when Tab should move focus backwards.
    #[must_use]
    pub fn is_backward_tab(&self) -> bool {
        matches!(self.code, KeyCode::BackTab)
            || (self.code == KeyCode::Tab && self.modifiers.contains(Modifiers::SHIFT))
    }
}

/// Phase of a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The platform aborted the gesture (e.g. touch stolen by a scroll).
    Cancel,
}

/// A raw pointer or touch sample in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: u64,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self {
            kind,
            x,
            y,
            timestamp_ms,
        }
    }

    #[must_use]
    pub const fn down(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(PointerEventKind::Down, x, y, timestamp_ms)
    }

    #[must_use]
    pub const fn moved(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(PointerEventKind::Move, x, y, timestamp_ms)
    }

    #[must_use]
    pub const fn up(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(PointerEventKind::Up, x, y, timestamp_ms)
    }

    #[must_use]
    pub const fn cancel(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(PointerEventKind::Cancel, x, y, timestamp_ms)
    }
}
