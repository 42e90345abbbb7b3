#![forbid(unsafe_code)]

//! Element handles and the focus host capability.
//!
//! The engine never owns the rendered tree. It refers to elements through
//! opaque [`ElementId`] handles and performs every focus operation through a
//! [`FocusHost`] supplied by the rendering layer.
//!
//! # Contract
//!
//! - [`FocusHost::focusable_within`] returns descendants of `root` (never
//!   `root` itself) in tree order, filtered by the host's focusable rules.
//!   The engine treats content as opaque beyond this list.
//! - [`FocusHost::focus`] must tolerate detached or unknown elements by
//!   returning `false`; the engine never relies on a panic-free host to keep
//!   its own state consistent.

use core::fmt;

/// Opaque handle to an element in the host's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw ID value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Focus capability provided by the rendering layer.
///
/// There is exactly one focused element per host. Implementations for a
/// browser map these calls onto `document.activeElement`, `focus()`, and
/// `blur()`; [`MemoryDocument`](crate::MemoryDocument) provides a headless
/// implementation.
pub trait FocusHost {
    /// The element that currently holds focus, if any.
    fn active_element(&self) -> Option<ElementId>;

    /// Move focus to `id`. Returns `false` if the element cannot take focus
    /// (unknown, detached, or disabled).
    fn focus(&mut self, id: ElementId) -> bool;

    /// Clear focus entirely.
    fn blur(&mut self);

    /// Whether `id` is still attached to the document.
    fn is_attached(&self, id: ElementId) -> bool;

    /// Focusable descendants of `root` in tree order.
    fn focusable_within(&self, root: ElementId) -> Vec<ElementId>;

    /// The descendant of `root` explicitly flagged for auto-focus, if any.
    fn auto_focus_within(&self, root: ElementId) -> Option<ElementId>;

    /// Whether `id` is `root` or one of its descendants.
    fn contains(&self, root: ElementId, id: ElementId) -> bool;
}

impl<H: FocusHost + ?Sized> FocusHost for &mut H {
    fn active_element(&self) -> Option<ElementId> {
        (**self).active_element()
    }

    fn focus(&mut self, id: ElementId) -> bool {
        (**self).focus(id)
    }

    fn blur(&mut self) {
        (**self).blur();
    }

    fn is_attached(&self, id: ElementId) -> bool {
        (**self).is_attached(id)
    }

    fn focusable_within(&self, root: ElementId) -> Vec<ElementId> {
        (**self).focusable_within(root)
    }

    fn auto_focus_within(&self, root: ElementId) -> Option<ElementId> {
        (**self).auto_focus_within(root)
    }

    fn contains(&self, root: ElementId, id: ElementId) -> bool {
        (**self).contains(root, id)
    }
}
