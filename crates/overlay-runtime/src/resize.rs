#![forbid(unsafe_code)]

//! Injected resize sources and trailing-edge debouncing.
//!
//! UI runtimes usually expose viewport size through a global singleton. The
//! engine takes it as a [`ResizeSource`] capability instead, so every
//! overlay (and every test) can use an independent source. An
//! `Observable<ViewportSize>` is a ready-made source.
//!
//! [`ResizeDebouncer`] coalesces bursts of resize notifications: only the
//! last size of a burst is reported, once no new size has arrived for the
//! window (default [`DEFAULT_DEBOUNCE_MS`]).

use overlay_core::ViewportSize;

use crate::reactive::{Observable, Subscription};

/// Default coalescing window for resize bursts.
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

/// Subscribe/unsubscribe capability for viewport size changes.
pub trait ResizeSource {
    /// The size right now.
    fn current_size(&self) -> ViewportSize;

    /// Register `callback` for every subsequent size change.
    ///
    /// Dropping the returned subscription unsubscribes.
    fn subscribe_resize(&self, callback: Box<dyn Fn(ViewportSize)>) -> Subscription;
}

impl ResizeSource for Observable<ViewportSize> {
    fn current_size(&self) -> ViewportSize {
        self.get()
    }

    fn subscribe_resize(&self, callback: Box<dyn Fn(ViewportSize)>) -> Subscription {
        self.subscribe(move |size| callback(*size))
    }
}

/// Trailing-edge debouncer for viewport sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeDebouncer {
    window_ms: u64,
    pending: Option<Pending>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    size: ViewportSize,
    last_event_ms: u64,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

impl ResizeDebouncer {
    /// A window of 0 reports every size on the next poll.
    #[must_use]
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            pending: None,
        }
    }

    #[must_use]
    pub const fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Record a new size, restarting the window.
    pub fn push(&mut self, size: ViewportSize, now_ms: u64) {
        self.pending = Some(Pending {
            size,
            last_event_ms: now_ms,
        });
    }

    /// Take the settled size if the window has elapsed since the last push.
    pub fn poll(&mut self, now_ms: u64) -> Option<ViewportSize> {
        let pending = self.pending?;
        if now_ms.saturating_sub(pending.last_event_ms) >= self.window_ms {
            self.pending = None;
            Some(pending.size)
        } else {
            None
        }
    }

    /// Take the pending size immediately, ignoring the window.
    pub fn flush(&mut self) -> Option<ViewportSize> {
        self.pending.take().map(|p| p.size)
    }

    /// When the pending size settles, if any.
    #[must_use]
    pub fn deadline_ms(&self) -> Option<u64> {
        self.pending
            .map(|p| p.last_event_ms.saturating_add(self.window_ms))
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn burst_reports_last_size_once() {
        let mut d = ResizeDebouncer::default();
        d.push(ViewportSize::new(1000, 700), 0);
        d.push(ViewportSize::new(900, 700), 100);
        d.push(ViewportSize::new(500, 700), 200);

        assert_eq!(d.poll(300), None);
        assert_eq!(d.deadline_ms(), Some(450));
        assert_eq!(d.poll(450), Some(ViewportSize::new(500, 700)));
        assert_eq!(d.poll(1000), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn zero_window_reports_immediately() {
        let mut d = ResizeDebouncer::new(0);
        d.push(ViewportSize::new(320, 480), 5);
        assert_eq!(d.poll(5), Some(ViewportSize::new(320, 480)));
    }

    #[test]
    fn flush_ignores_window() {
        let mut d = ResizeDebouncer::default();
        d.push(ViewportSize::new(320, 480), 0);
        assert_eq!(d.flush(), Some(ViewportSize::new(320, 480)));
        assert_eq!(d.flush(), None);
    }

    proptest! {
        #[test]
        fn burst_settles_to_last_size(
            widths in prop::collection::vec(1u32..4000, 1..20),
            gap in 0u64..DEFAULT_DEBOUNCE_MS,
        ) {
            let mut d = ResizeDebouncer::default();
            let mut now = 0;
            for &w in &widths {
                d.push(ViewportSize::new(w, 600), now);
                prop_assert_eq!(d.poll(now), None);
                now += gap;
            }
            let last = *widths.last().unwrap();
            let settled = d.poll(now - gap + DEFAULT_DEBOUNCE_MS);
            prop_assert_eq!(settled, Some(ViewportSize::new(last, 600)));
            prop_assert!(!d.is_pending());
        }
    }

    #[test]
    fn observable_is_a_resize_source() {
        let source = Observable::new(ViewportSize::new(1024, 768));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let sub = source.subscribe_resize(Box::new(move |size| s.borrow_mut().push(size)));

        source.set(ViewportSize::new(400, 768));
        assert_eq!(source.current_size(), ViewportSize::new(400, 768));
        assert_eq!(*seen.borrow(), vec![ViewportSize::new(400, 768)]);

        drop(sub);
        source.set(ViewportSize::new(800, 768));
        assert_eq!(seen.borrow().len(), 1);
    }
}
