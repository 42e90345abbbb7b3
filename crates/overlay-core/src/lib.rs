#![forbid(unsafe_code)]

//! Core primitives for the overlay interaction engine.
//!
//! This crate holds everything the engine needs to talk to its host without
//! knowing anything about how the host renders:
//!
//! - [`event`]: keyboard, pointer, and viewport input events.
//! - [`element`]: element handles and the [`FocusHost`] capability.
//! - [`document`]: [`MemoryDocument`], a headless element tree implementing
//!   [`FocusHost`] for tests and non-DOM hosts.
//! - [`geometry`]: anchors, axes, and viewport sizes.
//! - [`viewport`]: breakpoint tables and viewport classification.
//! - [`clock`]: millisecond clocks used to resolve timers.

pub mod clock;
pub mod document;
pub mod element;
pub mod event;
pub mod geometry;
#[cfg(feature = "tracing-json")]
pub mod logging;
pub mod viewport;

pub use clock::{Clock, ManualClock, SystemClock};
pub use document::{MemoryDocument, NodeKind, NodeSpec};
pub use element::{ElementId, FocusHost};
pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerEvent, PointerEventKind};
pub use geometry::{Anchor, Axis, ViewportSize};
pub use viewport::{Breakpoint, BreakpointTable, classify};
