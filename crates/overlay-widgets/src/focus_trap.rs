#![forbid(unsafe_code)]

//! Keyboard focus confinement for modal overlays.
//!
//! A [`FocusTrap`] is bound to one overlay root. The owner calls
//! [`activate`](FocusTrap::activate) exactly once per open transition and
//! [`deactivate`](FocusTrap::deactivate) exactly once per close transition;
//! in between, [`handle_key`](FocusTrap::handle_key) keeps Tab and
//! Shift+Tab inside the root.
//!
//! # Activation
//!
//! 1. Capture the host's focused element as the restore target, unless
//!    restore is disabled or the owner already captured one with
//!    [`capture_restore_target`](FocusTrap::capture_restore_target) when the
//!    open transition began.
//! 2. Snapshot the root's focusable descendants in tree order.
//! 3. Unless auto-focus is disabled, focus the first candidate that accepts
//!    focus: the explicit target, the descendant flagged for auto-focus, the
//!    first focusable descendant, then the root itself.
//!
//! # Invariants
//!
//! 1. The restore target is captured once per open cycle and consumed at
//!    deactivation; it never survives into the next open/close cycle.
//! 2. The snapshot is recomputed on every activation, on
//!    [`refresh`](FocusTrap::refresh), and lazily when Tab is pressed on a
//!    focused descendant it does not list. It is never reused across opens.
//! 3. An inactive trap never moves focus.
//!
//! # Failure Modes
//!
//! - No focusable descendants: activation focuses the root, and Tab keeps
//!   focus on the root.
//! - Restore target detached before close: focus is dropped (blurred if it
//!   was still inside the root) and [`RestoreOutcome::Dropped`] is returned.

use overlay_core::{ElementId, FocusHost, KeyCode, KeyEvent};

/// Per-activation focus behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FocusTrapOptions {
    /// Element to focus on activation, ahead of any auto-focus flag.
    #[cfg_attr(feature = "policy-config", serde(skip))]
    pub auto_focus_target: Option<ElementId>,
    /// Leave focus where it is on activation.
    pub disable_auto_focus: bool,
    /// Let Tab leave the root.
    pub disable_enforce_focus: bool,
    /// Do not return focus to the invoking element on deactivation.
    pub disable_restore_focus: bool,
}

impl FocusTrapOptions {
    #[must_use]
    pub fn auto_focus_target(mut self, target: ElementId) -> Self {
        self.auto_focus_target = Some(target);
        self
    }

    #[must_use]
    pub fn disable_auto_focus(mut self, disable: bool) -> Self {
        self.disable_auto_focus = disable;
        self
    }

    #[must_use]
    pub fn disable_enforce_focus(mut self, disable: bool) -> Self {
        self.disable_enforce_focus = disable;
        self
    }

    #[must_use]
    pub fn disable_restore_focus(mut self, disable: bool) -> Self {
        self.disable_restore_focus = disable;
        self
    }
}

/// Where activation put focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusOutcome {
    /// The configured `auto_focus_target`.
    Explicit(ElementId),
    /// The descendant flagged for auto-focus by the host.
    Marked(ElementId),
    /// The first focusable descendant.
    FirstFocusable(ElementId),
    /// Nothing else qualified; the root took focus.
    Root,
    /// Focus was already inside the root and was left alone.
    AlreadyInside(ElementId),
    /// No candidate, including the root, accepted focus.
    Unfocused,
    /// Auto-focus disabled, or the trap was already active.
    Skipped,
}

/// How a key press was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrapKeyOutcome {
    /// Tab at a boundary wrapped to the other end.
    Wrapped(ElementId),
    /// Focus was outside the cycle and was pulled back in.
    Contained(ElementId),
    /// Native tab order proceeds, or the key is not ours.
    PassThrough,
    /// Escape was pressed; the owner decides whether to close.
    EscapePressed,
    /// The trap is not active.
    Inactive,
}

impl TrapKeyOutcome {
    /// Whether the trap moved focus and the key should be consumed.
    #[must_use]
    pub const fn moved_focus(&self) -> bool {
        matches!(self, Self::Wrapped(_) | Self::Contained(_))
    }
}

/// What deactivation did with the restore target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestoreOutcome {
    Restored(ElementId),
    /// The target was detached or refused focus.
    Dropped(ElementId),
    /// No target was captured.
    Skipped,
    /// The trap was not active.
    Inactive,
}

/// Focus trap bound to one overlay root.
#[derive(Debug, Clone)]
pub struct FocusTrap {
    root: ElementId,
    options: FocusTrapOptions,
    active: bool,
    captured: bool,
    restore_target: Option<ElementId>,
    snapshot: Vec<ElementId>,
}

impl FocusTrap {
    #[must_use]
    pub fn new(root: ElementId) -> Self {
        Self::with_options(root, FocusTrapOptions::default())
    }

    #[must_use]
    pub fn with_options(root: ElementId, options: FocusTrapOptions) -> Self {
        Self {
            root,
            options,
            active: false,
            captured: false,
            restore_target: None,
            snapshot: Vec::new(),
        }
    }

    #[must_use]
    pub const fn root(&self) -> ElementId {
        self.root
    }

    #[must_use]
    pub fn options(&self) -> &FocusTrapOptions {
        &self.options
    }

    /// Replace the options. Takes effect at the next activation, except for
    /// `disable_enforce_focus` which applies immediately.
    pub fn set_options(&mut self, options: FocusTrapOptions) {
        self.options = options;
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// The element focus returns to on deactivation.
    #[must_use]
    pub const fn restore_target(&self) -> Option<ElementId> {
        self.restore_target
    }

    /// Focusable descendants captured at activation.
    #[must_use]
    pub fn snapshot(&self) -> &[ElementId] {
        &self.snapshot
    }

    /// Record the host's focused element as the restore target ahead of
    /// activation. Ignored while active.
    pub fn capture_restore_target<H: FocusHost + ?Sized>(&mut self, host: &H) {
        if self.active {
            return;
        }
        self.restore_target = if self.options.disable_restore_focus {
            None
        } else {
            host.active_element()
        };
        self.captured = true;
    }

    /// Engage the trap. See the module docs for the focus priority.
    pub fn activate<H: FocusHost + ?Sized>(&mut self, host: &mut H) -> FocusOutcome {
        if self.active {
            tracing::debug!(root = %self.root, "focus trap already active");
            return FocusOutcome::Skipped;
        }
        if !self.captured {
            self.capture_restore_target(&*host);
        }
        self.active = true;

        let inside = host
            .active_element()
            .filter(|&id| host.contains(self.root, id));
        self.snapshot = host.focusable_within(self.root);

        let outcome = self.auto_focus(host, inside);
        tracing::debug!(
            root = %self.root,
            focusable = self.snapshot.len(),
            restore = ?self.restore_target,
            ?outcome,
            "focus trap activated"
        );
        outcome
    }

    fn auto_focus<H: FocusHost + ?Sized>(
        &self,
        host: &mut H,
        inside: Option<ElementId>,
    ) -> FocusOutcome {
        if self.options.disable_auto_focus {
            return FocusOutcome::Skipped;
        }
        if let Some(id) = inside {
            return FocusOutcome::AlreadyInside(id);
        }
        if let Some(target) = self.options.auto_focus_target
            && host.contains(self.root, target)
            && host.focus(target)
        {
            return FocusOutcome::Explicit(target);
        }
        if let Some(marked) = host.auto_focus_within(self.root)
            && host.focus(marked)
        {
            return FocusOutcome::Marked(marked);
        }
        if let Some(&first) = self.snapshot.iter().find(|&&id| host.focus(id)) {
            return FocusOutcome::FirstFocusable(first);
        }
        if host.focus(self.root) {
            FocusOutcome::Root
        } else {
            FocusOutcome::Unfocused
        }
    }

    /// Re-enumerate focusable descendants while active.
    ///
    /// Returns the new snapshot length, or `None` if inactive.
    pub fn refresh<H: FocusHost + ?Sized>(&mut self, host: &H) -> Option<usize> {
        if !self.active {
            return None;
        }
        self.snapshot = host.focusable_within(self.root);
        Some(self.snapshot.len())
    }

    /// Keep Tab cycling within the root.
    ///
    /// Tab on the last focusable wraps to the first; Shift+Tab on the first
    /// wraps to the last. Focus on the root, outside the root, or nowhere is
    /// pulled to the first (Tab) or last (Shift+Tab) focusable. Anything
    /// else is left to native tab order.
    pub fn handle_key<H: FocusHost + ?Sized>(
        &mut self,
        key: &KeyEvent,
        host: &mut H,
    ) -> TrapKeyOutcome {
        if !self.active {
            return TrapKeyOutcome::Inactive;
        }
        if !key.is_press() {
            return TrapKeyOutcome::PassThrough;
        }
        if key.code == KeyCode::Escape {
            return TrapKeyOutcome::EscapePressed;
        }
        if !key.is_tab() || self.options.disable_enforce_focus {
            return TrapKeyOutcome::PassThrough;
        }

        let backward = key.is_backward_tab();
        let current = host.active_element();
        if let Some(id) = current
            && id != self.root
            && !self.snapshot.contains(&id)
            && host.contains(self.root, id)
        {
            self.refresh(&*host);
        }
        let (Some(&first), Some(&last)) = (self.snapshot.first(), self.snapshot.last()) else {
            host.focus(self.root);
            return TrapKeyOutcome::Contained(self.root);
        };

        match current {
            Some(id) if id == last && !backward => {
                host.focus(first);
                TrapKeyOutcome::Wrapped(first)
            }
            Some(id) if id == first && backward => {
                host.focus(last);
                TrapKeyOutcome::Wrapped(last)
            }
            Some(id) if id != self.root && host.contains(self.root, id) => {
                TrapKeyOutcome::PassThrough
            }
            _ => {
                let target = if backward { last } else { first };
                host.focus(target);
                TrapKeyOutcome::Contained(target)
            }
        }
    }

    /// Disengage the trap and return focus to the restore target.
    ///
    /// On an inactive trap this only discards a captured target.
    pub fn deactivate<H: FocusHost + ?Sized>(&mut self, host: &mut H) -> RestoreOutcome {
        self.captured = false;
        if !self.active {
            self.restore_target = None;
            return RestoreOutcome::Inactive;
        }
        self.active = false;
        self.snapshot.clear();

        let outcome = match self.restore_target.take() {
            None => RestoreOutcome::Skipped,
            Some(target) if host.is_attached(target) && host.focus(target) => {
                RestoreOutcome::Restored(target)
            }
            Some(target) => {
                tracing::warn!(
                    root = %self.root,
                    element = %target,
                    "restore target detached, dropping focus"
                );
                if host
                    .active_element()
                    .is_some_and(|id| host.contains(self.root, id))
                {
                    host.blur();
                }
                RestoreOutcome::Dropped(target)
            }
        };
        tracing::debug!(root = %self.root, ?outcome, "focus trap deactivated");
        outcome
    }
}
