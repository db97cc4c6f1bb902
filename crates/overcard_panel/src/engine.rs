//! Gesture resolution engine
//!
//! Owns the panel's lifecycle: live drag tracking, release resolution onto
//! the allowed anchor set, and the settle animation that carries the panel
//! to its resolved resting offset.
//!
//! The anchor value is a controlled binding owned by the caller. The engine
//! reads it, proposes changes by writing it, and reconciles external writes
//! at the start of every turn: a stale write of the pre-resolution anchor
//! while a resolution-initiated settle is running is re-asserted; any other
//! external write is a programmatic assignment and re-enters `Settling`
//! toward the new target without gesture resolution.
//!
//! Release resolution is adjacent-only: one gesture moves the panel by at
//! most one position in the distance-sorted allowed set, regardless of drag
//! distance or fling magnitude. Direction alone decides; a zero vertical
//! direction always stays put.
//!
//! Completion callbacks never fire on the frame that reaches the target;
//! they are deferred to the start of the next turn so hosts can mutate
//! shared state freely from the callback.

use overcard_animation::{SettleAnimation, SettleProgress, SpringConfig};
use overcard_core::events::event_types;
use overcard_core::{Anchor, AnchorSet, Binding, EventHandlers, GestureRelease, PanelEvent, Vec2};

use crate::drag::{DragSession, PanelPhase, PhaseTransitions};

/// Default maximum scrim opacity
pub const DEFAULT_SCRIM_ALPHA: f32 = 0.6;

/// A finished settle waiting for its deferred notification turn.
#[derive(Clone, Copy, Debug)]
struct CompletedSettle {
    anchor: Anchor,
    /// New scroll permission, when the resolved anchor's flag differs from
    /// the prior anchor's
    scrollable_changed: Option<bool>,
}

/// The anchor/gesture resolution engine.
///
/// Single-threaded and event-driven: the host forwards gesture samples and
/// calls [`tick`] every animation frame.
///
/// [`tick`]: SheetEngine::tick
pub struct SheetEngine {
    anchor: Binding<Anchor>,
    allowed: Binding<AnchorSet>,
    container_height: f32,
    spring: SpringConfig,
    max_scrim_alpha: f32,

    phase: PanelPhase,
    drag: DragSession,
    settle: Option<SettleAnimation>,
    handlers: EventHandlers,

    /// The engine's view of the committed anchor
    resolved: Anchor,
    /// The anchor before the in-flight settle started
    prior: Anchor,
    /// The running settle came from gesture resolution (stale external
    /// writes of `prior` are re-asserted while this holds)
    from_resolution: bool,
    /// Last anchor-binding version this engine has accounted for
    anchor_seen_version: u64,

    pending_completed: Option<CompletedSettle>,
}

impl SheetEngine {
    pub fn new(anchor: Binding<Anchor>, allowed: Binding<AnchorSet>, container_height: f32) -> Self {
        let resolved = anchor.get();
        let anchor_seen_version = anchor.version();
        Self {
            anchor,
            allowed,
            container_height,
            spring: SpringConfig::sheet(),
            max_scrim_alpha: DEFAULT_SCRIM_ALPHA,
            phase: PanelPhase::Idle,
            drag: DragSession::Inactive,
            settle: None,
            handlers: EventHandlers::new(),
            resolved,
            prior: resolved,
            from_resolution: false,
            anchor_seen_version,
            pending_completed: None,
        }
    }

    /// Override the settle spring tuning.
    pub fn with_spring(mut self, config: SpringConfig) -> Self {
        self.spring = config;
        self
    }

    /// Override the maximum scrim opacity.
    pub fn with_max_scrim_alpha(mut self, alpha: f32) -> Self {
        self.max_scrim_alpha = alpha;
        self
    }

    /// Handler registration for panel output events.
    pub fn handlers_mut(&mut self) -> &mut EventHandlers {
        &mut self.handlers
    }

    /// The registered panel event handlers.
    pub fn handlers(&self) -> &EventHandlers {
        &self.handlers
    }

    /// A finished settle is waiting for its deferred notification turn.
    pub fn completion_pending(&self) -> bool {
        self.pending_completed.is_some()
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    /// The anchor the engine currently considers committed.
    pub fn current_anchor(&self) -> Anchor {
        self.resolved
    }

    pub fn container_height(&self) -> f32 {
        self.container_height
    }

    /// Update the container height (e.g. on host resize). Distances are
    /// recomputed from it on the next resolution or assignment.
    pub fn set_container_height(&mut self, height: f32) {
        self.container_height = height;
    }

    /// The offset to render the panel at this frame.
    pub fn offset(&self) -> f32 {
        match self.phase {
            PanelPhase::Dragging => self
                .drag
                .offset()
                .unwrap_or_else(|| self.resolved.distance(self.container_height)),
            PanelPhase::Settling => self
                .settle
                .as_ref()
                .map(SettleAnimation::value)
                .unwrap_or_else(|| self.resolved.distance(self.container_height)),
            PanelPhase::Idle => self.resolved.distance(self.container_height),
        }
    }

    /// Scrim opacity for the current offset: fades out as the panel drops,
    /// exactly zero at the `Short` resting offset.
    pub fn scrim_opacity(&self) -> f32 {
        let height = self.container_height;
        if height <= 0.0 {
            return 0.0;
        }
        let offset = self.offset();
        if offset == Anchor::Short.distance(height) {
            return 0.0;
        }
        (self.max_scrim_alpha * (1.0 - offset / height)).clamp(0.0, self.max_scrim_alpha)
    }

    /// Whether embedded content may scroll right now: only at rest, and only
    /// when the resting anchor permits it.
    pub fn scroll_unlocked(&self) -> bool {
        self.phase == PanelPhase::Idle && self.allowed.get().scrollable_at(self.resolved)
    }

    /// First movement sample of a touch. Interrupts a running settle from
    /// its live value; the superseded settle never fires its completion.
    pub fn drag_started(&mut self) {
        let base = self.offset();
        self.transition(event_types::DRAG_START);
        if self.phase == PanelPhase::Dragging {
            tracing::debug!(base, "drag started");
            self.drag = DragSession::begin(base);
            self.settle = None;
            self.from_resolution = false;
        }
    }

    /// Movement sample: replaces the accumulated translation. Starts a
    /// session implicitly if none is active.
    pub fn drag_moved(&mut self, translation: Vec2) {
        if !self.drag.is_active() {
            self.drag_started();
        }
        self.drag.set_translation(translation);
        self.transition(event_types::DRAG_MOVED);
    }

    /// Touch released: resolve the gesture onto the allowed set and settle.
    pub fn drag_released(&mut self, release: GestureRelease) {
        if self.phase != PanelPhase::Dragging {
            return;
        }
        self.sync_external();

        let height = self.container_height;
        let mut allowed = self.allowed.get();
        allowed.sort_by_distance(height);
        self.allowed.set(allowed.clone());

        let from = self.offset();
        let direction = release.vertical_direction();
        let current = self.resolved;

        let next_entry = match allowed.index_of(current) {
            None => {
                tracing::warn!(
                    ?current,
                    "current anchor not in allowed set; release resolution is a no-op"
                );
                None
            }
            // Flinging upward: the panel grows to the next-higher anchor.
            Some(index) if direction < 0.0 => index.checked_sub(1).and_then(|i| allowed.get(i)),
            // Flinging downward: the panel shrinks to the next-lower anchor.
            Some(index) if direction > 0.0 => allowed.get(index + 1),
            // Zero direction stays put.
            Some(_) => None,
        };
        let next = next_entry.map(|entry| entry.anchor);

        self.drag = DragSession::Inactive;
        self.transition(event_types::DRAG_RELEASED);

        self.prior = current;
        if let Some(next) = next.filter(|n| *n != current) {
            tracing::debug!(from = ?current, to = ?next, direction, "release resolved");
            self.resolved = next;
            self.write_anchor(next);
            self.handlers
                .dispatch(&PanelEvent::new(event_types::ANCHOR_CHANGED).with_anchor(next));
        }
        self.begin_settle(from, true);
    }

    /// Touch cancelled: the panel settles back to its current anchor without
    /// gesture resolution.
    pub fn drag_cancelled(&mut self) {
        if self.phase != PanelPhase::Dragging {
            return;
        }
        let from = self.offset();
        self.drag = DragSession::Inactive;
        self.transition(event_types::DRAG_RELEASED);
        self.prior = self.resolved;
        self.begin_settle(from, false);
    }

    /// Programmatic anchor assignment, bypassing gesture resolution.
    pub fn assign_anchor(&mut self, anchor: Anchor) {
        if anchor == self.resolved {
            return;
        }
        self.write_anchor(anchor);
        self.apply_assignment(anchor);
    }

    /// Advance the engine by one animation frame.
    ///
    /// Order matters: completions deferred from the previous turn fire
    /// first, then external writes are reconciled, then the settle advances.
    pub fn tick(&mut self, dt: f32) {
        self.flush_completion();
        self.sync_external();

        if self.phase != PanelPhase::Settling {
            return;
        }
        let Some(settle) = self.settle.as_mut() else {
            return;
        };
        if let SettleProgress::Finished(_) = settle.advance(dt) {
            if settle.take_completion() {
                let allowed = self.allowed.get();
                let before = allowed.scrollable_at(self.prior);
                let after = allowed.scrollable_at(self.resolved);
                self.pending_completed = Some(CompletedSettle {
                    anchor: self.resolved,
                    scrollable_changed: (before != after).then_some(after),
                });
            }
            self.settle = None;
            self.transition(event_types::SETTLE_FINISHED);
        }
    }

    fn transition(&mut self, event: overcard_core::EventType) {
        if let Some(next) = self.phase.on_event(event) {
            tracing::trace!(from = ?self.phase, to = ?next, event, "phase transition");
            self.phase = next;
        }
    }

    fn begin_settle(&mut self, from: f32, from_resolution: bool) {
        let target = self.resolved.distance(self.container_height);
        self.settle = Some(SettleAnimation::new(self.spring, from, target));
        self.from_resolution = from_resolution;
    }

    /// Write the binding without re-observing our own write as external.
    fn write_anchor(&mut self, anchor: Anchor) {
        self.anchor.set(anchor);
        self.anchor_seen_version = self.anchor.version();
    }

    /// Reconcile external writes to the controlled anchor binding.
    fn sync_external(&mut self) {
        if self.anchor.version() == self.anchor_seen_version {
            return;
        }
        self.anchor_seen_version = self.anchor.version();

        let external = self.anchor.get();
        if external == self.resolved {
            return;
        }

        if self.phase == PanelPhase::Settling && self.from_resolution && external == self.prior {
            // The caller wrote the pre-resolution anchor back while our
            // resolved settle is in flight: a stale write. Re-assert.
            tracing::debug!(stale = ?external, resolved = ?self.resolved, "re-asserting resolved anchor");
            self.write_anchor(self.resolved);
            return;
        }

        self.apply_assignment(external);
    }

    fn apply_assignment(&mut self, anchor: Anchor) {
        tracing::debug!(from = ?self.resolved, to = ?anchor, "anchor assigned");
        // Capture the live offset before the assignment moves the target.
        let from = self.offset();
        self.prior = self.resolved;
        self.resolved = anchor;
        if self.phase == PanelPhase::Dragging {
            // The drag owns the offset; the new anchor takes effect as the
            // resolution base on release.
            return;
        }
        self.transition(event_types::ANCHOR_ASSIGNED);
        self.begin_settle(from, false);
    }

    fn flush_completion(&mut self) {
        let Some(completed) = self.pending_completed.take() else {
            return;
        };
        tracing::debug!(anchor = ?completed.anchor, "settle completed");
        self.handlers
            .dispatch(&PanelEvent::new(event_types::SETTLE_COMPLETED).with_anchor(completed.anchor));
        if let Some(scrollable) = completed.scrollable_changed {
            self.handlers.dispatch(
                &PanelEvent::new(event_types::SCROLLABLE_CHANGED)
                    .with_anchor(completed.anchor)
                    .with_scrollable(scrollable),
            );
        }
    }
}
