#![forbid(unsafe_code)]

//! Debounced viewport watching.
//!
//! A [`ViewportWatcher`] subscribes to a [`ResizeSource`], feeds every
//! notification into a [`ResizeDebouncer`], and on [`poll`](ViewportWatcher::poll)
//! reports the settled size together with its [`Breakpoint`].
//!
//! # Invariants
//!
//! 1. The watcher classifies the source's current size at construction, so
//!    `class()` is valid before the first resize.
//! 2. `poll()` reports a change only when the settled size differs from the
//!    last reported size.
//! 3. Dropping the watcher unsubscribes from the source.

use std::cell::RefCell;
use std::rc::Rc;

use overlay_core::{Breakpoint, BreakpointTable, Clock, ViewportSize, classify};

use crate::reactive::Subscription;
use crate::resize::{ResizeDebouncer, ResizeSource};

/// A settled viewport size reported by [`ViewportWatcher::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportChange {
    pub size: ViewportSize,
    pub class: Breakpoint,
    pub previous_class: Breakpoint,
}

impl ViewportChange {
    /// Whether the breakpoint changed, not just the pixel size.
    #[must_use]
    pub fn class_changed(&self) -> bool {
        self.class != self.previous_class
    }
}

/// Watches a resize source and classifies settled sizes.
pub struct ViewportWatcher {
    table: BreakpointTable,
    debouncer: Rc<RefCell<ResizeDebouncer>>,
    clock: Rc<dyn Clock>,
    size: ViewportSize,
    class: Breakpoint,
    _subscription: Subscription,
}

impl std::fmt::Debug for ViewportWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportWatcher")
            .field("size", &self.size)
            .field("class", &self.class)
            .field("pending", &self.debouncer.borrow().is_pending())
            .finish()
    }
}

impl ViewportWatcher {
    /// Subscribe to `source` using the default breakpoint table and window.
    pub fn new(source: &dyn ResizeSource, clock: Rc<dyn Clock>) -> Self {
        let debouncer = Rc::new(RefCell::new(ResizeDebouncer::default()));
        let sink = Rc::clone(&debouncer);
        let sink_clock = Rc::clone(&clock);
        let subscription = source.subscribe_resize(Box::new(move |size| {
            sink.borrow_mut().push(size, sink_clock.now_ms());
        }));

        let table = BreakpointTable::default();
        let size = source.current_size();
        Self {
            class: classify(size.width, &table),
            table,
            debouncer,
            clock,
            size,
            _subscription: subscription,
        }
    }

    /// Use a custom breakpoint table, reclassifying the current size.
    #[must_use]
    pub fn with_table(mut self, table: BreakpointTable) -> Self {
        self.table = table;
        self.class = classify(self.size.width, &self.table);
        self
    }

    /// Use a custom debounce window. Discards any pending size.
    #[must_use]
    pub fn with_window(self, window_ms: u64) -> Self {
        *self.debouncer.borrow_mut() = ResizeDebouncer::new(window_ms);
        self
    }

    /// Last reported size.
    #[must_use]
    pub fn size(&self) -> ViewportSize {
        self.size
    }

    /// Breakpoint of the last reported size.
    #[must_use]
    pub fn class(&self) -> Breakpoint {
        self.class
    }

    #[must_use]
    pub fn table(&self) -> &BreakpointTable {
        &self.table
    }

    /// When the pending resize settles, if one is pending.
    #[must_use]
    pub fn deadline_ms(&self) -> Option<u64> {
        self.debouncer.borrow().deadline_ms()
    }

    /// Report the settled size if the debounce window has elapsed.
    pub fn poll(&mut self) -> Option<ViewportChange> {
        let now = self.clock.now_ms();
        let settled = self.debouncer.borrow_mut().poll(now)?;
        if settled == self.size {
            return None;
        }

        let previous_class = self.class;
        self.size = settled;
        self.class = classify(settled.width, &self.table);
        if self.class != previous_class {
            tracing::debug!(
                width = settled.width,
                from = ?previous_class,
                to = ?self.class,
                "viewport class changed"
            );
        }
        Some(ViewportChange {
            size: settled,
            class: self.class,
            previous_class,
        })
    }
}
