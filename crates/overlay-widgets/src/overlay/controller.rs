#![forbid(unsafe_code)]

//! The overlay lifecycle state machine.

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use overlay_core::{
    Breakpoint, Clock, ElementId, Event, FocusHost, KeyCode, KeyEvent, PointerEvent,
    PointerEventKind, ViewportSize, classify,
};
use overlay_runtime::{Binding, ViewportWatcher};

use super::events::{CloseReason, OverlayEvent, OverlayListener, RequestOutcome};
use crate::config::{OverlayConfig, Variant};
use crate::focus_trap::FocusTrap;
use crate::geometry::{PanelGeometry, resolve};
use crate::swipe::{SwipeIntent, SwipeOutcome, SwipeRecognizer, SwipeSample};

/// Tracing target for caller-contract violations.
const DIAGNOSTICS: &str = "overlay::diagnostics";

/// Where the authoritative `open` value lives. Fixed at construction.
#[derive(Debug, Clone)]
pub enum OpenMode {
    /// The owner supplies `open`; requests only raise events.
    Controlled(Binding<bool>),
    /// The controller owns `open`.
    Uncontrolled(bool),
}

impl OpenMode {
    fn get(&self) -> bool {
        match self {
            Self::Controlled(binding) => binding.get(),
            Self::Uncontrolled(open) => *open,
        }
    }

    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        matches!(self, Self::Controlled(_))
    }
}

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverlayPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl OverlayPhase {
    /// Opening or Closing.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

/// Snapshot of the controller's mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayState {
    /// The authoritative open value (binding or internal cell).
    pub open: bool,
    pub collapsed: bool,
    /// Focus restore target captured when the open transition began.
    pub last_focused_before_open: Option<ElementId>,
}

/// Drives one overlay instance.
///
/// Every operation that may move focus borrows a [`FocusHost`]; the
/// controller keeps no reference to the host between calls.
pub struct OverlayController {
    config: OverlayConfig,
    root: ElementId,
    mode: OpenMode,
    phase: OverlayPhase,
    deadline_ms: Option<u64>,
    collapsed: bool,
    mounted: bool,
    trap: FocusTrap,
    swipe: SwipeRecognizer,
    clock: Rc<dyn Clock>,
    viewport: Option<ViewportSize>,
    class: Option<Breakpoint>,
    watcher: Option<ViewportWatcher>,
    events: VecDeque<OverlayEvent>,
}

impl fmt::Debug for OverlayController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayController")
            .field("root", &self.root)
            .field("mode", &self.mode)
            .field("phase", &self.phase)
            .field("collapsed", &self.collapsed)
            .field("class", &self.class)
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl OverlayController {
    /// A controller that owns `open`, starting at `default_open`.
    pub fn uncontrolled(
        config: OverlayConfig,
        root: ElementId,
        clock: Rc<dyn Clock>,
        default_open: bool,
    ) -> Self {
        Self::new(config, root, clock, OpenMode::Uncontrolled(default_open))
    }

    /// A controller that reads `open` from the owner's binding.
    pub fn controlled(
        config: OverlayConfig,
        root: ElementId,
        clock: Rc<dyn Clock>,
        open: Binding<bool>,
    ) -> Self {
        Self::new(config, root, clock, OpenMode::Controlled(open))
    }

    fn new(config: OverlayConfig, root: ElementId, clock: Rc<dyn Clock>, mode: OpenMode) -> Self {
        let trap = FocusTrap::with_options(root, config.focus.clone());
        let swipe = SwipeRecognizer::new(config.anchor).with_thresholds(config.swipe);
        Self {
            config,
            root,
            mode,
            phase: OverlayPhase::Closed,
            deadline_ms: None,
            collapsed: false,
            mounted: false,
            trap,
            swipe,
            clock,
            viewport: None,
            class: None,
            watcher: None,
            events: VecDeque::new(),
        }
    }

    /// Seed the viewport size, classified with the config's breakpoints.
    #[must_use]
    pub fn with_viewport(mut self, size: ViewportSize) -> Self {
        self.viewport = Some(size);
        self.class = Some(classify(size.width, &self.config.breakpoints));
        self
    }

    /// Follow a debounced viewport watcher, polled from [`tick`](Self::tick).
    ///
    /// The watcher is switched to the config's breakpoint table.
    #[must_use]
    pub fn with_viewport_watcher(mut self, watcher: ViewportWatcher) -> Self {
        let watcher = watcher.with_table(self.config.breakpoints);
        self.viewport = Some(watcher.size());
        self.class = Some(watcher.class());
        self.watcher = Some(watcher);
        self
    }

    /// Initial collapsed state for Mini panels.
    #[must_use]
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    // --- Accessors ---

    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    #[must_use]
    pub const fn root(&self) -> ElementId {
        self.root
    }

    #[must_use]
    pub const fn phase(&self) -> OverlayPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        self.mode.is_controlled()
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub const fn viewport_class(&self) -> Option<Breakpoint> {
        self.class
    }

    #[must_use]
    pub fn trap(&self) -> &FocusTrap {
        &self.trap
    }

    #[must_use]
    pub fn swipe(&self) -> &SwipeRecognizer {
        &self.swipe
    }

    /// Re-enumerate the trap's focusable descendants after content inside
    /// the root changed. Returns `None` when the trap is not engaged.
    pub fn refresh_focus<H: FocusHost + ?Sized>(&mut self, host: &H) -> Option<usize> {
        self.trap.refresh(host)
    }

    /// Variant after responsive substitution.
    #[must_use]
    pub fn effective_variant(&self) -> Variant {
        self.config.effective_variant(self.class)
    }

    #[must_use]
    pub fn is_modal(&self) -> bool {
        self.config.is_modal(self.class)
    }

    /// Whether the view layer should render the panel.
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.effective_variant() == Variant::Permanent || self.phase != OverlayPhase::Closed
    }

    #[must_use]
    pub fn geometry(&self) -> PanelGeometry {
        resolve(&self.config, self.collapsed, self.class)
    }

    #[must_use]
    pub fn state(&self) -> OverlayState {
        OverlayState {
            open: self.mode.get(),
            collapsed: self.collapsed,
            last_focused_before_open: self.trap.restore_target(),
        }
    }

    /// Earliest time [`tick`](Self::tick) has work to do.
    #[must_use]
    pub fn deadline_ms(&self) -> Option<u64> {
        let resize = self.watcher.as_ref().and_then(ViewportWatcher::deadline_ms);
        [self.deadline_ms, resize].into_iter().flatten().min()
    }

    // --- Mounting ---

    /// Attach to the view. An overlay that is already open enters `Open`
    /// without a transition.
    pub fn mount<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        if self.mode.get() {
            self.enter_open(host);
        }
    }

    /// Detach from the view, releasing the trap without raising events.
    pub fn unmount<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.trap.deactivate(host);
        self.swipe.cancel();
        self.phase = OverlayPhase::Closed;
        self.deadline_ms = None;
    }

    // --- Requests ---

    /// Ask to open.
    pub fn request_open<H: FocusHost + ?Sized>(&mut self, host: &mut H) -> RequestOutcome {
        if self.effective_variant() == Variant::Permanent {
            tracing::debug!(target: DIAGNOSTICS, "open request ignored by permanent variant");
            return RequestOutcome::IgnoredByVariant;
        }
        if self.mode.get() {
            return RequestOutcome::NoOp;
        }
        self.events.push_back(OverlayEvent::OpenRequested);
        match &mut self.mode {
            OpenMode::Uncontrolled(open) => *open = true,
            OpenMode::Controlled(_) => return RequestOutcome::Accepted,
        }
        self.reconcile(host);
        RequestOutcome::Accepted
    }

    /// Ask to close for `reason`.
    pub fn request_close<H: FocusHost + ?Sized>(
        &mut self,
        reason: CloseReason,
        host: &mut H,
    ) -> RequestOutcome {
        let disabled = match reason {
            CloseReason::BackdropClick => !self.config.close_on_backdrop,
            CloseReason::EscapeKeyDown => !self.config.close_on_escape,
            CloseReason::SwipeToClose | CloseReason::Programmatic => false,
        };
        if disabled {
            tracing::debug!(%reason, "close request rejected by config");
            return RequestOutcome::Rejected;
        }
        if self.effective_variant() == Variant::Permanent {
            tracing::debug!(target: DIAGNOSTICS, %reason, "close request ignored by permanent variant");
            return RequestOutcome::IgnoredByVariant;
        }
        if !self.mode.get() {
            return RequestOutcome::NoOp;
        }
        self.events.push_back(OverlayEvent::CloseRequested(reason));
        match &mut self.mode {
            OpenMode::Uncontrolled(open) => *open = false,
            OpenMode::Controlled(_) => return RequestOutcome::Accepted,
        }
        self.reconcile(host);
        RequestOutcome::Accepted
    }

    /// Re-read the open value after the owner changed it.
    pub fn sync<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        self.reconcile(host);
    }

    /// Flip the Mini rail. Returns `false` outside the Mini variant.
    pub fn toggle_collapse(&mut self) -> bool {
        let variant = self.effective_variant();
        if variant != Variant::Mini {
            tracing::debug!(target: DIAGNOSTICS, ?variant, "toggle_collapse outside mini variant");
            return false;
        }
        self.collapsed = !self.collapsed;
        self.events
            .push_back(OverlayEvent::CollapseChanged(self.collapsed));
        true
    }

    /// Replace the configuration wholesale.
    pub fn set_config<H: FocusHost + ?Sized>(&mut self, config: OverlayConfig, host: &mut H) {
        let was_modal = self.is_modal();
        if config.anchor != self.config.anchor || config.swipe != self.config.swipe {
            self.swipe = SwipeRecognizer::new(config.anchor).with_thresholds(config.swipe);
        }
        self.trap.set_options(config.focus.clone());
        let table_changed = config.breakpoints != self.config.breakpoints;
        self.config = config;

        if table_changed {
            if let Some(watcher) = self.watcher.take() {
                let watcher = watcher.with_table(self.config.breakpoints);
                self.class = Some(watcher.class());
                self.watcher = Some(watcher);
            } else if let Some(size) = self.viewport {
                self.class = Some(classify(size.width, &self.config.breakpoints));
            }
        }
        if !self.config.swipe_active(self.class) {
            self.swipe.cancel();
        }
        self.apply_modality(was_modal, host);
        self.reconcile(host);
    }

    // --- Input ---

    /// Route one input event. Returns `true` if the event was consumed.
    pub fn handle_event<H: FocusHost + ?Sized>(&mut self, event: &Event, host: &mut H) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key, host),
            Event::Pointer(pointer) => self.handle_pointer(pointer, host),
            Event::Resize(size) => {
                self.set_viewport(*size, host);
                false
            }
            Event::BackdropClick => {
                self.accepts_dismissal()
                    && matches!(
                        self.request_close(CloseReason::BackdropClick, host),
                        RequestOutcome::Accepted | RequestOutcome::NoOp
                    )
            }
            Event::TransitionEnd => self.transition_end(host),
        }
    }

    fn accepts_dismissal(&self) -> bool {
        self.is_modal() && matches!(self.phase, OverlayPhase::Opening | OverlayPhase::Open)
    }

    fn handle_key<H: FocusHost + ?Sized>(&mut self, key: &KeyEvent, host: &mut H) -> bool {
        if !key.is_press() {
            return false;
        }
        if key.code == KeyCode::Escape {
            return self.accepts_dismissal()
                && matches!(
                    self.request_close(CloseReason::EscapeKeyDown, host),
                    RequestOutcome::Accepted | RequestOutcome::NoOp
                );
        }
        self.trap.handle_key(key, host).moved_focus()
    }

    fn handle_pointer<H: FocusHost + ?Sized>(
        &mut self,
        pointer: &PointerEvent,
        host: &mut H,
    ) -> bool {
        if !self.config.swipe_active(self.class) {
            self.swipe.cancel();
            return false;
        }
        let sample = SwipeSample::from(pointer);
        match (self.phase, pointer.kind) {
            (_, PointerEventKind::Cancel)
            | (OverlayPhase::Opening | OverlayPhase::Closing, _) => {
                self.swipe.cancel();
                false
            }
            (OverlayPhase::Closed, PointerEventKind::Down) => {
                let Some(SwipeOutcome::OpenIntent { .. }) =
                    self.swipe.recognize_edge_open(sample, self.viewport)
                else {
                    return false;
                };
                if self.mode.get() {
                    return false;
                }
                tracing::debug!(x = sample.x, y = sample.y, "edge swipe open intent");
                self.events.push_back(OverlayEvent::Swipe(SwipeIntent::Open));
                self.request_open(host);
                true
            }
            (OverlayPhase::Closed, _) => false,
            (OverlayPhase::Open, PointerEventKind::Down) => {
                self.swipe.on_pointer_down(sample);
                false
            }
            (OverlayPhase::Open, PointerEventKind::Move) => {
                self.swipe.on_pointer_move(sample);
                false
            }
            (OverlayPhase::Open, PointerEventKind::Up) => {
                let Some(SwipeOutcome::Close(gesture)) = self.swipe.on_pointer_up(sample) else {
                    return false;
                };
                if !self.mode.get() {
                    tracing::debug!("swipe to close on an overlay already closing");
                    return false;
                }
                tracing::debug!(
                    distance = gesture.distance,
                    velocity = gesture.velocity,
                    "swipe to close"
                );
                self.events.push_back(OverlayEvent::Swipe(SwipeIntent::Close));
                self.request_close(CloseReason::SwipeToClose, host);
                true
            }
        }
    }

    fn set_viewport<H: FocusHost + ?Sized>(&mut self, size: ViewportSize, host: &mut H) {
        self.viewport = Some(size);
        let class = classify(size.width, &self.config.breakpoints);
        self.apply_class(class, host);
    }

    fn apply_class<H: FocusHost + ?Sized>(&mut self, class: Breakpoint, host: &mut H) {
        let before = self.effective_variant();
        let was_modal = self.is_modal();
        self.class = Some(class);
        let after = self.effective_variant();
        if before == after {
            return;
        }
        tracing::debug!(?class, ?before, ?after, "effective variant changed");
        if !self.config.swipe_active(self.class) {
            self.swipe.cancel();
        }
        self.apply_modality(was_modal, host);
    }

    /// Engage or release the trap if modality flipped while open.
    fn apply_modality<H: FocusHost + ?Sized>(&mut self, was_modal: bool, host: &mut H) {
        let modal = self.is_modal();
        if self.phase != OverlayPhase::Open || modal == was_modal {
            return;
        }
        if modal {
            self.trap.activate(host);
        } else {
            self.trap.deactivate(host);
        }
    }

    // --- Transitions ---

    /// Resolve the current transient phase from an animation-end signal.
    ///
    /// Returns `false` (and does nothing) outside Opening/Closing.
    pub fn transition_end<H: FocusHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.phase.is_transient() {
            tracing::debug!(phase = ?self.phase, "stale transition end ignored");
            return false;
        }
        self.complete_transition(host);
        true
    }

    /// Poll timers: settled viewport sizes and the transition fallback.
    pub fn tick<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(change) = self.watcher.as_mut().and_then(ViewportWatcher::poll) {
            self.viewport = Some(change.size);
            self.apply_class(change.class, host);
        }
        if let Some(deadline) = self.deadline_ms
            && self.phase.is_transient()
            && self.clock.now_ms() >= deadline
        {
            tracing::warn!(
                phase = ?self.phase,
                deadline_ms = deadline,
                "transition end not received, forcing completion"
            );
            self.complete_transition(host);
        }
    }

    fn reconcile<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        if !self.mounted {
            return;
        }
        match (self.phase, self.mode.get()) {
            (OverlayPhase::Closed, true) => self.begin(OverlayPhase::Opening, host),
            (OverlayPhase::Open, false) => self.begin(OverlayPhase::Closing, host),
            _ => {}
        }
    }

    fn begin<H: FocusHost + ?Sized>(&mut self, phase: OverlayPhase, host: &mut H) {
        tracing::debug!(from = ?self.phase, to = ?phase, "overlay transition started");
        self.phase = phase;
        self.swipe.cancel();
        if phase == OverlayPhase::Opening {
            self.trap.capture_restore_target(&*host);
        }
        let duration = self.config.animation_duration_ms;
        if duration == 0 {
            self.complete_transition(host);
        } else {
            self.deadline_ms = Some(self.clock.now_ms().saturating_add(duration));
        }
    }

    fn complete_transition<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        match self.phase {
            OverlayPhase::Opening => self.enter_open(host),
            OverlayPhase::Closing => self.enter_closed(host),
            OverlayPhase::Open | OverlayPhase::Closed => return,
        }
        // Apply whatever was requested during the transition.
        self.reconcile(host);
    }

    fn enter_open<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        self.phase = OverlayPhase::Open;
        self.deadline_ms = None;
        if self.is_modal() {
            self.trap.activate(host);
        }
        tracing::debug!(root = %self.root, modal = self.is_modal(), "overlay opened");
        self.events.push_back(OverlayEvent::Opened);
    }

    fn enter_closed<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        self.phase = OverlayPhase::Closed;
        self.deadline_ms = None;
        self.trap.deactivate(host);
        self.swipe.cancel();
        tracing::debug!(root = %self.root, "overlay closed");
        self.events.push_back(OverlayEvent::Closed);
    }

    // --- Outbound events ---

    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn poll_event(&mut self) -> Option<OverlayEvent> {
        self.events.pop_front()
    }

    /// Take every queued event in arrival order.
    pub fn drain_events(&mut self) -> Vec<OverlayEvent> {
        self.events.drain(..).collect()
    }

    /// Deliver every queued event to `listener`. Returns how many were sent.
    pub fn dispatch_to<L: OverlayListener + ?Sized>(&mut self, listener: &mut L) -> usize {
        let mut sent = 0;
        while let Some(event) = self.events.pop_front() {
            event.dispatch(listener);
            sent += 1;
        }
        sent
    }
}
