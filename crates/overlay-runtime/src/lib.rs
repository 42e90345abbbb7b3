#![forbid(unsafe_code)]

//! Runtime services for the overlay engine.
//!
//! - [`reactive`]: single-threaded observable values and read bindings, used
//!   to feed an externally controlled `open` flag into a controller.
//! - [`resize`]: the [`ResizeSource`] capability and [`ResizeDebouncer`].
//! - [`viewport`]: [`ViewportWatcher`], which turns a resize source into
//!   debounced breakpoint changes.

pub mod reactive;
pub mod resize;
pub mod viewport;

pub use reactive::{Binding, Observable, Subscription, bind_mapped, bind_observable};
pub use resize::{DEFAULT_DEBOUNCE_MS, ResizeDebouncer, ResizeSource};
pub use viewport::{ViewportChange, ViewportWatcher};
