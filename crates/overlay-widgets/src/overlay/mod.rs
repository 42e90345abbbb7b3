#![forbid(unsafe_code)]

//! Overlay lifecycle.
//!
//! [`OverlayController`] owns the open/closed/collapsed state of one overlay
//! and composes the focus trap, swipe recognizer, viewport classification,
//! and geometry resolution.
//!
//! # State Machine
//!
//! ```text
//!          request/sync           transition end
//! Closed ───────────────▶ Opening ───────────────▶ Open
//!   ▲                                               │
//!   │     transition end                request/sync│
//!   └──────────────────── Closing ◀─────────────────┘
//! ```
//!
//! Opening and Closing last for `animation_duration_ms` and resolve on a
//! [`Event::TransitionEnd`](overlay_core::Event::TransitionEnd) or on the
//! timeout fallback in [`tick`](OverlayController::tick), whichever comes
//! first. Requests arriving during a transient phase are re-applied when it
//! completes (last request wins).
//!
//! # Controlled vs uncontrolled
//!
//! [`OpenMode`] is fixed at construction. In controlled mode requests only
//! raise [`OverlayEvent::OpenRequested`] / [`OverlayEvent::CloseRequested`];
//! the owner feeds the new value back through its binding and calls
//! [`sync`](OverlayController::sync).

mod controller;
mod events;

pub use controller::{OpenMode, OverlayController, OverlayPhase, OverlayState};
pub use events::{CloseReason, OverlayEvent, OverlayListener, RequestOutcome};
