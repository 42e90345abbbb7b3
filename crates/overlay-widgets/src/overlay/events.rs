#![forbid(unsafe_code)]

//! Outbound lifecycle events.

use std::fmt;

use crate::swipe::SwipeIntent;

/// Why a close was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    BackdropClick,
    EscapeKeyDown,
    SwipeToClose,
    /// Requested by the owner's own code.
    Programmatic,
}

impl CloseReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BackdropClick => "backdropClick",
            Self::EscapeKeyDown => "escapeKeyDown",
            Self::SwipeToClose => "swipeToClose",
            Self::Programmatic => "programmatic",
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an open or close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
    /// The request event was raised (and applied, in uncontrolled mode).
    Accepted,
    /// The close reason is disabled by config.
    Rejected,
    /// Already open (or closed); nothing raised.
    NoOp,
    /// The effective variant does not open or close.
    IgnoredByVariant,
}

impl RequestOutcome {
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Event raised by the controller, queued in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayEvent {
    /// The overlay asks its owner to close.
    CloseRequested(CloseReason),
    /// The overlay asks its owner to open.
    OpenRequested,
    /// Entered `Open`.
    Opened,
    /// Entered `Closed`.
    Closed,
    /// Mini rail collapsed (`true`) or expanded.
    CollapseChanged(bool),
    /// A swipe gesture was recognized.
    Swipe(SwipeIntent),
}

/// Callback surface for [`OverlayEvent`]s.
///
/// Every method defaults to a no-op, so listeners implement only what they
/// need.
pub trait OverlayListener {
    fn on_close(&mut self, _reason: CloseReason) {}
    fn on_open(&mut self) {}
    fn on_opened(&mut self) {}
    fn on_closed(&mut self) {}
    fn on_collapse_change(&mut self, _collapsed: bool) {}
    fn on_swipe(&mut self, _intent: SwipeIntent) {}
}

impl OverlayEvent {
    /// Invoke the matching listener method.
    pub fn dispatch<L: OverlayListener + ?Sized>(self, listener: &mut L) {
        match self {
            Self::CloseRequested(reason) => listener.on_close(reason),
            Self::OpenRequested => listener.on_open(),
            Self::Opened => listener.on_opened(),
            Self::Closed => listener.on_closed(),
            Self::CollapseChanged(collapsed) => listener.on_collapse_change(collapsed),
            Self::Swipe(intent) => listener.on_swipe(intent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl OverlayListener for Recorder {
        fn on_close(&mut self, reason: CloseReason) {
            self.0.push(format!("close:{reason}"));
        }
        fn on_opened(&mut self) {
            self.0.push("opened".into());
        }
        fn on_collapse_change(&mut self, collapsed: bool) {
            self.0.push(format!("collapse:{collapsed}"));
        }
    }

    #[test]
    fn dispatch_routes_and_defaults_are_noops() {
        let mut rec = Recorder::default();
        for event in [
            OverlayEvent::CloseRequested(CloseReason::EscapeKeyDown),
            OverlayEvent::OpenRequested,
            OverlayEvent::Opened,
            OverlayEvent::Closed,
            OverlayEvent::CollapseChanged(true),
            OverlayEvent::Swipe(SwipeIntent::Close),
        ] {
            event.dispatch(&mut rec);
        }
        assert_eq!(rec.0, vec!["close:escapeKeyDown", "opened", "collapse:true"]);
    }

    #[test]
    fn reason_strings() {
        assert_eq!(CloseReason::BackdropClick.as_str(), "backdropClick");
        assert_eq!(CloseReason::SwipeToClose.to_string(), "swipeToClose");
        assert!(RequestOutcome::Accepted.is_accepted());
        assert!(!RequestOutcome::NoOp.is_accepted());
    }
}
