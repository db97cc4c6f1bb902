//! Drag session state and the panel phase machine
//!
//! [`DragSession`] is the ephemeral per-touch state: it exists only while a
//! touch is active, is owned by the engine, and is reset to `Inactive` on
//! release or cancellation. [`PanelPhase`] is the engine's lifecycle state,
//! driven by gesture event constants through a transition table.

use overcard_core::events::{event_types, EventType};
use overcard_core::Vec2;

/// Maps a gesture event to the next state, `None` meaning "stay".
pub trait PhaseTransitions: Sized {
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Engine lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelPhase {
    #[default]
    Idle,
    Dragging,
    Settling,
}

impl PhaseTransitions for PanelPhase {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            // Idle transitions
            (PanelPhase::Idle, event_types::DRAG_START) => Some(PanelPhase::Dragging),
            (PanelPhase::Idle, event_types::ANCHOR_ASSIGNED) => Some(PanelPhase::Settling),

            // Dragging transitions - movement samples stay in Dragging
            (PanelPhase::Dragging, event_types::DRAG_MOVED) => None,
            (PanelPhase::Dragging, event_types::DRAG_RELEASED) => Some(PanelPhase::Settling),

            // Settling transitions - a new touch interrupts the settle,
            // an external assignment retargets it in place
            (PanelPhase::Settling, event_types::SETTLE_FINISHED) => Some(PanelPhase::Idle),
            (PanelPhase::Settling, event_types::DRAG_START) => Some(PanelPhase::Dragging),
            (PanelPhase::Settling, event_types::ANCHOR_ASSIGNED) => None,

            _ => None,
        }
    }
}

/// Per-touch drag state.
///
/// `base` is the rendered offset at drag-start. A drag from rest bases off
/// the current anchor's distance; a drag that interrupts a settle bases off
/// the settle's live value, so there is never a snap.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragSession {
    #[default]
    Inactive,
    Dragging { translation: Vec2, base: f32 },
}

impl DragSession {
    /// Start a session based at the given rendered offset.
    pub fn begin(base: f32) -> Self {
        DragSession::Dragging {
            translation: Vec2::ZERO,
            base,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DragSession::Dragging { .. })
    }

    /// Accumulated translation, zero while inactive.
    pub fn translation(&self) -> Vec2 {
        match self {
            DragSession::Inactive => Vec2::ZERO,
            DragSession::Dragging { translation, .. } => *translation,
        }
    }

    /// Replace the accumulated translation. Ignored while inactive.
    pub fn set_translation(&mut self, new_translation: Vec2) {
        if let DragSession::Dragging { translation, .. } = self {
            *translation = new_translation;
        }
    }

    /// The rendered offset for this session, clamped so the panel never
    /// renders above the fully-open position.
    pub fn offset(&self) -> Option<f32> {
        match self {
            DragSession::Inactive => None,
            DragSession::Dragging { translation, base } => Some((base + translation.y).max(0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        let idle = PanelPhase::Idle;
        assert_eq!(idle.on_event(event_types::DRAG_START), Some(PanelPhase::Dragging));
        assert_eq!(
            idle.on_event(event_types::ANCHOR_ASSIGNED),
            Some(PanelPhase::Settling)
        );
        assert_eq!(idle.on_event(event_types::DRAG_RELEASED), None);

        let dragging = PanelPhase::Dragging;
        assert_eq!(dragging.on_event(event_types::DRAG_MOVED), None);
        assert_eq!(
            dragging.on_event(event_types::DRAG_RELEASED),
            Some(PanelPhase::Settling)
        );

        let settling = PanelPhase::Settling;
        assert_eq!(
            settling.on_event(event_types::SETTLE_FINISHED),
            Some(PanelPhase::Idle)
        );
        assert_eq!(
            settling.on_event(event_types::DRAG_START),
            Some(PanelPhase::Dragging)
        );
        assert_eq!(settling.on_event(event_types::ANCHOR_ASSIGNED), None);
    }

    #[test]
    fn test_session_lifecycle() {
        let mut session = DragSession::begin(400.0);
        assert!(session.is_active());
        assert_eq!(session.translation(), Vec2::ZERO);
        assert_eq!(session.offset(), Some(400.0));

        session.set_translation(Vec2::new(0.0, 120.0));
        assert_eq!(session.offset(), Some(520.0));

        session = DragSession::Inactive;
        assert!(!session.is_active());
        assert_eq!(session.translation(), Vec2::ZERO);
        assert_eq!(session.offset(), None);
    }

    #[test]
    fn test_offset_clamps_at_top_edge() {
        // Dragging far above the fully-open position pins the offset at 0.
        let mut session = DragSession::begin(80.0);
        session.set_translation(Vec2::new(0.0, -500.0));
        assert_eq!(session.offset(), Some(0.0));
    }

    #[test]
    fn test_inactive_ignores_translation() {
        let mut session = DragSession::Inactive;
        session.set_translation(Vec2::new(0.0, 50.0));
        assert_eq!(session, DragSession::Inactive);
    }
}
