#![forbid(unsafe_code)]

//! Swipe gesture recognition for sliding panels.
//!
//! Two independent entry points:
//!
//! - **Edge open** ([`SwipeRecognizer::recognize_edge_open`]): while the
//!   panel is closed, a pointer-down within `edge_px` of the anchor edge is
//!   an open intent. No distance or velocity gating applies.
//! - **Swipe to close** ([`SwipeRecognizer::on_pointer_down`] /
//!   [`on_pointer_move`](SwipeRecognizer::on_pointer_move) /
//!   [`on_pointer_up`](SwipeRecognizer::on_pointer_up)): while the panel is
//!   open, a tracked gesture is classified on release.
//!
//! # State Machine
//!
//! ```text
//! Idle ──down──▶ Tracking ──up──▶ Idle (classified)
//!                  │  ▲
//!                  │  └── down (restart: last writer wins)
//!                  └── cancel ──▶ Idle
//! ```
//!
//! # Classification
//!
//! On release, with `start` and `end` samples:
//!
//! ```text
//! dx, dy     = end - start
//! elapsed    = end.t - start.t
//! axis       = |dx| > |dy| ? Horizontal : Vertical
//! distance   = |component along axis|
//! velocity   = distance / max(elapsed, 1)          (px/ms)
//! accepted   = distance > D && velocity > V && elapsed <= T
//! ```
//!
//! An accepted gesture closes the panel only if it runs along the anchor's
//! axis *toward* the anchor edge (Left: dx < 0, Right: dx > 0, Top: dy < 0,
//! Bottom: dy > 0). Accepted gestures in any other direction are ignored.

use overlay_core::{Anchor, Axis, PointerEvent, ViewportSize};

/// Minimum travel along the primary axis, exclusive.
pub const DEFAULT_DISTANCE_THRESHOLD_PX: f64 = 50.0;
/// Minimum average speed, exclusive.
pub const DEFAULT_VELOCITY_THRESHOLD_PX_PER_MS: f64 = 0.3;
/// Maximum gesture duration, inclusive.
pub const DEFAULT_SWIPE_TIMEOUT_MS: u64 = 300;
/// Width of the edge-open hot zone, inclusive.
pub const DEFAULT_EDGE_THRESHOLD_PX: f64 = 20.0;

/// Recognition thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SwipeThresholds {
    pub distance_px: f64,
    pub velocity_px_per_ms: f64,
    pub timeout_ms: u64,
    pub edge_px: f64,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            distance_px: DEFAULT_DISTANCE_THRESHOLD_PX,
            velocity_px_per_ms: DEFAULT_VELOCITY_THRESHOLD_PX_PER_MS,
            timeout_ms: DEFAULT_SWIPE_TIMEOUT_MS,
            edge_px: DEFAULT_EDGE_THRESHOLD_PX,
        }
    }
}

/// A raw pointer position with its timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeSample {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: u64,
}

impl SwipeSample {
    #[must_use]
    pub const fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }
}

impl From<PointerEvent> for SwipeSample {
    fn from(event: PointerEvent) -> Self {
        Self::new(event.x, event.y, event.timestamp_ms)
    }
}

impl From<&PointerEvent> for SwipeSample {
    fn from(event: &PointerEvent) -> Self {
        Self::from(*event)
    }
}

/// Measurements of a completed gesture. Derived on release, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeGesture {
    pub delta_x: f64,
    pub delta_y: f64,
    pub elapsed_ms: u64,
    pub primary_axis: Axis,
    pub distance: f64,
    /// Average speed along the primary axis in px/ms.
    pub velocity: f64,
}

impl SwipeGesture {
    /// Measure the gesture from `start` to `end`.
    #[must_use]
    pub fn between(start: SwipeSample, end: SwipeSample) -> Self {
        let delta_x = end.x - start.x;
        let delta_y = end.y - start.y;
        let elapsed_ms = end.timestamp_ms.saturating_sub(start.timestamp_ms);
        let primary_axis = if delta_x.abs() > delta_y.abs() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };
        let distance = match primary_axis {
            Axis::Horizontal => delta_x.abs(),
            Axis::Vertical => delta_y.abs(),
        };
        let velocity = distance / elapsed_ms.max(1) as f64;
        Self {
            delta_x,
            delta_y,
            elapsed_ms,
            primary_axis,
            distance,
            velocity,
        }
    }

    /// Whether the gesture clears every threshold.
    #[must_use]
    pub fn is_accepted(&self, thresholds: &SwipeThresholds) -> bool {
        self.distance > thresholds.distance_px
            && self.velocity > thresholds.velocity_px_per_ms
            && self.elapsed_ms <= thresholds.timeout_ms
    }

    /// Whether the gesture runs along `anchor`'s axis toward its edge.
    #[must_use]
    pub fn moves_toward(&self, anchor: Anchor) -> bool {
        if self.primary_axis != anchor.axis() {
            return false;
        }
        let component = match self.primary_axis {
            Axis::Horizontal => self.delta_x,
            Axis::Vertical => self.delta_y,
        };
        match anchor.toward_edge_sign() {
            s if s < 0 => component < 0.0,
            _ => component > 0.0,
        }
    }
}

/// What a recognized gesture asks the owner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeIntent {
    Open,
    Close,
}

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeOutcome {
    /// Pointer went down in the edge hot zone while closed.
    OpenIntent { origin: SwipeSample },
    /// An accepted gesture toward the anchor edge while open.
    Close(SwipeGesture),
}

impl SwipeOutcome {
    #[must_use]
    pub const fn intent(&self) -> SwipeIntent {
        match self {
            Self::OpenIntent { .. } => SwipeIntent::Open,
            Self::Close(_) => SwipeIntent::Close,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum TrackState {
    #[default]
    Idle,
    Tracking {
        start: SwipeSample,
        last: SwipeSample,
    },
}

/// Tracks one pointer gesture at a time for a panel attached to `anchor`.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeRecognizer {
    anchor: Anchor,
    thresholds: SwipeThresholds,
    state: TrackState,
}

impl SwipeRecognizer {
    #[must_use]
    pub fn new(anchor: Anchor) -> Self {
        Self {
            anchor,
            thresholds: SwipeThresholds::default(),
            state: TrackState::Idle,
        }
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: SwipeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub const fn anchor(&self) -> Anchor {
        self.anchor
    }

    #[must_use]
    pub const fn thresholds(&self) -> &SwipeThresholds {
        &self.thresholds
    }

    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        matches!(self.state, TrackState::Tracking { .. })
    }

    /// Offset of the latest sample from the gesture start, for live drag
    /// feedback in the view layer.
    #[must_use]
    pub fn current_offset(&self) -> Option<(f64, f64)> {
        match self.state {
            TrackState::Tracking { start, last } => Some((last.x - start.x, last.y - start.y)),
            TrackState::Idle => None,
        }
    }

    /// Start tracking. A down while already tracking restarts from `sample`.
    pub fn on_pointer_down(&mut self, sample: SwipeSample) {
        if self.is_tracking() {
            tracing::trace!("swipe restarted by new pointer down");
        }
        self.state = TrackState::Tracking {
            start: sample,
            last: sample,
        };
    }

    /// Record an intermediate sample. Ignored while idle.
    pub fn on_pointer_move(&mut self, sample: SwipeSample) {
        if let TrackState::Tracking { last, .. } = &mut self.state {
            *last = sample;
        }
    }

    /// Finish the gesture and classify it.
    ///
    /// Returns `Some(SwipeOutcome::Close(..))` only for accepted gestures
    /// toward the anchor edge. Always returns to idle.
    pub fn on_pointer_up(&mut self, sample: SwipeSample) -> Option<SwipeOutcome> {
        let TrackState::Tracking { start, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        let gesture = SwipeGesture::between(start, sample);
        let accepted = gesture.is_accepted(&self.thresholds);
        let toward = gesture.moves_toward(self.anchor);
        tracing::trace!(
            dx = gesture.delta_x,
            dy = gesture.delta_y,
            elapsed_ms = gesture.elapsed_ms,
            velocity = gesture.velocity,
            accepted,
            toward,
            "swipe classified"
        );
        (accepted && toward).then_some(SwipeOutcome::Close(gesture))
    }

    /// Abandon the current gesture without classifying it.
    pub fn cancel(&mut self) {
        self.state = TrackState::Idle;
    }

    /// Edge-open test for a pointer-down while the panel is closed.
    ///
    /// Right and Bottom edges need the viewport size; without one those
    /// anchors never report an open intent.
    #[must_use]
    pub fn recognize_edge_open(
        &self,
        sample: SwipeSample,
        viewport: Option<ViewportSize>,
    ) -> Option<SwipeOutcome> {
        let viewport = match (self.anchor, viewport) {
            (_, Some(vp)) => vp,
            (Anchor::Left | Anchor::Top, None) => ViewportSize::default(),
            (Anchor::Right | Anchor::Bottom, None) => return None,
        };
        let distance = self.anchor.distance_from_edge(sample.x, sample.y, viewport);
        (distance <= self.thresholds.edge_px).then_some(SwipeOutcome::OpenIntent { origin: sample })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn swipe(recognizer: &mut SwipeRecognizer, dx: f64, dy: f64, ms: u64) -> Option<SwipeOutcome> {
        recognizer.on_pointer_down(SwipeSample::new(200.0, 200.0, 1_000));
        recognizer.on_pointer_move(SwipeSample::new(200.0 + dx / 2.0, 200.0 + dy / 2.0, 1_000 + ms / 2));
        recognizer.on_pointer_up(SwipeSample::new(200.0 + dx, 200.0 + dy, 1_000 + ms))
    }

    #[test]
    fn gesture_measurements() {
        let g = SwipeGesture::between(
            SwipeSample::new(100.0, 100.0, 0),
            SwipeSample::new(20.0, 110.0, 200),
        );
        assert_eq!(g.delta_x, -80.0);
        assert_eq!(g.delta_y, 10.0);
        assert_eq!(g.primary_axis, Axis::Horizontal);
        assert_eq!(g.distance, 80.0);
        assert!((g.velocity - 0.4).abs() < 1e-12);
    }

    #[test]
    fn diagonal_tie_is_vertical() {
        let g = SwipeGesture::between(SwipeSample::new(0.0, 0.0, 0), SwipeSample::new(60.0, 60.0, 50));
        assert_eq!(g.primary_axis, Axis::Vertical);
    }

    #[test]
    fn zero_elapsed_uses_one_ms() {
        let g = SwipeGesture::between(SwipeSample::new(0.0, 0.0, 5), SwipeSample::new(60.0, 0.0, 5));
        assert_eq!(g.elapsed_ms, 0);
        assert_eq!(g.velocity, 60.0);
    }

    #[test]
    fn close_direction_per_anchor() {
        let cases = [
            (Anchor::Left, -80.0, 0.0),
            (Anchor::Right, 80.0, 0.0),
            (Anchor::Top, 0.0, -80.0),
            (Anchor::Bottom, 0.0, 80.0),
        ];
        for (anchor, dx, dy) in cases {
            let mut r = SwipeRecognizer::new(anchor);
            let outcome = swipe(&mut r, dx, dy, 200);
            assert!(
                matches!(outcome, Some(SwipeOutcome::Close(_))),
                "{anchor:?} should close on ({dx}, {dy})"
            );
            assert!(swipe(&mut r, -dx, -dy, 200).is_none(), "{anchor:?} opposite");
        }
    }

    #[test]
    fn cross_axis_gesture_is_ignored() {
        let mut r = SwipeRecognizer::new(Anchor::Left);
        assert!(swipe(&mut r, 0.0, -120.0, 100).is_none());
    }

    #[test]
    fn slow_or_stale_gestures_rejected() {
        let mut r = SwipeRecognizer::new(Anchor::Left);
        // 80px in 300ms is 0.27 px/ms.
        assert!(swipe(&mut r, -80.0, 0.0, 300).is_none());
        // Fast enough on average but held past the timeout.
        assert!(swipe(&mut r, -400.0, 0.0, 301).is_none());
        // Exactly at the timeout is still a swipe.
        assert!(swipe(&mut r, -400.0, 0.0, 300).is_some());
    }

    #[test]
    fn new_down_restarts_tracking() {
        let mut r = SwipeRecognizer::new(Anchor::Left);
        r.on_pointer_down(SwipeSample::new(300.0, 10.0, 0));
        r.on_pointer_down(SwipeSample::new(100.0, 10.0, 500));
        let outcome = r.on_pointer_up(SwipeSample::new(20.0, 10.0, 600));
        match outcome {
            Some(SwipeOutcome::Close(g)) => {
                assert_eq!(g.delta_x, -80.0);
                assert_eq!(g.elapsed_ms, 100);
            }
            other => panic!("expected close, got {other:?}"),
        }
        assert!(!r.is_tracking());
    }

    #[test]
    fn up_without_down_and_cancel() {
        let mut r = SwipeRecognizer::new(Anchor::Left);
        assert!(r.on_pointer_up(SwipeSample::new(0.0, 0.0, 0)).is_none());

        r.on_pointer_down(SwipeSample::new(100.0, 0.0, 0));
        r.on_pointer_move(SwipeSample::new(70.0, 5.0, 20));
        assert_eq!(r.current_offset(), Some((-30.0, 5.0)));
        r.cancel();
        assert!(r.current_offset().is_none());
        assert!(r.on_pointer_up(SwipeSample::new(0.0, 0.0, 50)).is_none());
    }

    #[test]
    fn edge_open_hot_zone() {
        let vp = Some(ViewportSize::new(400, 800));
        let left = SwipeRecognizer::new(Anchor::Left);
        assert!(matches!(
            left.recognize_edge_open(SwipeSample::new(5.0, 300.0, 0), vp),
            Some(SwipeOutcome::OpenIntent { .. })
        ));
        assert!(left.recognize_edge_open(SwipeSample::new(20.0, 300.0, 0), None).is_some());
        assert!(left.recognize_edge_open(SwipeSample::new(21.0, 300.0, 0), vp).is_none());

        let right = SwipeRecognizer::new(Anchor::Right);
        assert!(right.recognize_edge_open(SwipeSample::new(395.0, 300.0, 0), vp).is_some());
        assert!(right.recognize_edge_open(SwipeSample::new(395.0, 300.0, 0), None).is_none());

        let bottom = SwipeRecognizer::new(Anchor::Bottom);
        assert!(bottom.recognize_edge_open(SwipeSample::new(10.0, 790.0, 0), vp).is_some());
        assert!(bottom.recognize_edge_open(SwipeSample::new(10.0, 700.0, 0), vp).is_none());
    }

    #[test]
    fn nan_sample_never_opens() {
        let vp = Some(ViewportSize::new(400, 800));
        let left = SwipeRecognizer::new(Anchor::Left);
        assert!(left.recognize_edge_open(SwipeSample::new(f64::NAN, 300.0, 0), vp).is_none());
        let top = SwipeRecognizer::new(Anchor::Top);
        assert!(top.recognize_edge_open(SwipeSample::new(5.0, f64::NAN, 0), None).is_none());
    }

    #[test]
    fn outcome_intent() {
        let origin = SwipeSample::new(0.0, 0.0, 0);
        assert_eq!(SwipeOutcome::OpenIntent { origin }.intent(), SwipeIntent::Open);
        let g = SwipeGesture::between(origin, SwipeSample::new(-60.0, 0.0, 10));
        assert_eq!(SwipeOutcome::Close(g).intent(), SwipeIntent::Close);
    }

    proptest! {
        #[test]
        fn below_distance_threshold_never_accepted(elapsed in 0u64..400, cross in -48.0f64..48.0) {
            let mut r = SwipeRecognizer::new(Anchor::Left);
            let distance = DEFAULT_DISTANCE_THRESHOLD_PX - 1.0;
            r.on_pointer_down(SwipeSample::new(300.0, 300.0, 0));
            let outcome = r.on_pointer_up(SwipeSample::new(300.0 - distance, 300.0 + cross, elapsed));
            prop_assert!(outcome.is_none());
        }

        #[test]
        fn above_distance_and_velocity_always_accepted(elapsed in 0u64..170) {
            let distance = DEFAULT_DISTANCE_THRESHOLD_PX + 1.0;
            let g = SwipeGesture::between(
                SwipeSample::new(300.0, 300.0, 0),
                SwipeSample::new(300.0 - distance, 300.0, elapsed),
            );
            prop_assert!(g.velocity > DEFAULT_VELOCITY_THRESHOLD_PX_PER_MS);
            prop_assert!(g.is_accepted(&SwipeThresholds::default()));
            prop_assert!(g.moves_toward(Anchor::Left));
        }
    }
}
