#![forbid(unsafe_code)]

//! Reactive values for feeding owner state into the engine.
//!
//! - [`Observable`]: a shared, version-tracked value with change
//!   notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`Binding`]: a read-only view over an observable (or any closure),
//!   evaluated on every `get()`.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Subscribers are stored as `Weak` callbacks and pruned lazily
//! during notification.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op.
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.

pub mod binding;
pub mod observable;

pub use binding::{Binding, bind_mapped, bind_observable};
pub use observable::{Observable, Subscription};
