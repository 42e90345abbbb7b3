#![forbid(unsafe_code)]

//! Interaction engine shared by sliding drawers and dialog overlays.
//!
//! The engine decides *when* an overlay is open, *where* keyboard focus
//! goes, which touch gestures open or close a panel, and *how big* the panel
//! is. Rendering stays with the host: it forwards input as
//! [`overlay_core::Event`]s, lends a [`overlay_core::FocusHost`] for focus
//! moves, and drains [`OverlayEvent`]s back out.
//!
//! - [`config`]: [`OverlayConfig`] and policy-file loading.
//! - [`geometry`]: pure panel size/position resolution.
//! - [`focus_trap`]: Tab containment, auto-focus, and focus restore.
//! - [`swipe`]: edge-open and swipe-to-close recognition.
//! - [`overlay`]: the [`OverlayController`] lifecycle state machine.

pub mod config;
pub mod focus_trap;
pub mod geometry;
pub mod overlay;
pub mod swipe;

pub use config::{ConfigError, OverlayConfig, OverlayKind, SizePreset, Variant};
pub use focus_trap::{FocusOutcome, FocusTrap, FocusTrapOptions, RestoreOutcome, TrapKeyOutcome};
pub use geometry::{Dimension, PanelGeometry, PanelPosition, resolve};
pub use overlay::{
    CloseReason, OpenMode, OverlayController, OverlayEvent, OverlayListener, OverlayPhase,
    OverlayState, RequestOutcome,
};
pub use swipe::{
    SwipeGesture, SwipeIntent, SwipeOutcome, SwipeRecognizer, SwipeSample, SwipeThresholds,
};
