//! Panel event types and handler storage
//!
//! The engine communicates with its host through typed events. Handlers are
//! stored per event type and dispatched synchronously on the UI thread; the
//! engine itself decides *when* to dispatch (completion events are deferred a
//! turn, see the engine docs).

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::anchor::Anchor;
use crate::geometry::{Point, Vec2};

/// Event type discriminator
pub type EventType = u32;

/// Event type constants for panel output events
pub mod event_types {
    use super::EventType;

    /// Release resolution picked a new anchor
    pub const ANCHOR_CHANGED: EventType = 1;
    /// A settle animation reached its target
    pub const SETTLE_COMPLETED: EventType = 2;
    /// The resting anchor's scroll permission changed
    pub const SCROLLABLE_CHANGED: EventType = 3;
    /// The backdrop scrim was tapped
    pub const BACKGROUND_TAPPED: EventType = 4;
    /// A dismissible panel finished settling to `Closed`
    pub const DISMISSED: EventType = 5;

    // Gesture lifecycle inputs, consumed by the panel phase machine.

    /// First movement sample of a touch
    pub const DRAG_START: EventType = 10;
    /// Subsequent movement sample
    pub const DRAG_MOVED: EventType = 11;
    /// Touch released
    pub const DRAG_RELEASED: EventType = 12;
    /// The settle animation's value reached its target
    pub const SETTLE_FINISHED: EventType = 13;
    /// The caller assigned an anchor programmatically
    pub const ANCHOR_ASSIGNED: EventType = 14;
}

/// The release sample of a drag gesture.
///
/// `predicted_end` is the platform's projection of where the pointer would
/// drift after release; the sign of `predicted_end.y - location.y` is the
/// fling direction the resolution algorithm consumes.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureRelease {
    /// Translation accumulated over the whole drag
    pub translation: Vec2,
    /// Pointer location at release
    pub location: Point,
    /// Projected post-release pointer location
    pub predicted_end: Point,
}

impl GestureRelease {
    pub fn new(translation: Vec2, location: Point, predicted_end: Point) -> Self {
        Self {
            translation,
            location,
            predicted_end,
        }
    }

    /// Signed vertical fling direction: negative is upward (panel grows),
    /// positive is downward (panel shrinks).
    pub fn vertical_direction(&self) -> f32 {
        self.predicted_end.y - self.location.y
    }
}

/// Payload delivered to panel event handlers.
#[derive(Clone, Copy, Debug)]
pub struct PanelEvent {
    pub event_type: EventType,
    /// The anchor involved, for anchor-related events
    pub anchor: Option<Anchor>,
    /// Current scroll permission, for `SCROLLABLE_CHANGED`
    pub scrollable: bool,
}

impl PanelEvent {
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            anchor: None,
            scrollable: false,
        }
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn with_scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }
}

/// Callback invoked with a panel event. `Rc` since the UI is single-threaded.
pub type EventCallback = Rc<dyn Fn(&PanelEvent)>;

/// Handler storage keyed by event type.
///
/// All handlers are optional; dispatching a type nobody registered for is a
/// no-op, never an error.
#[derive(Default, Clone)]
pub struct EventHandlers {
    handlers: FxHashMap<EventType, Vec<EventCallback>>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn has_handler(&self, event_type: EventType) -> bool {
        self.handlers.contains_key(&event_type)
    }

    /// Register a handler for an event type.
    pub fn on<F>(&mut self, event_type: EventType, handler: F)
    where
        F: Fn(&PanelEvent) + 'static,
    {
        self.handlers
            .entry(event_type)
            .or_default()
            .push(Rc::new(handler));
    }

    /// Dispatch an event to every handler registered for its type.
    pub fn dispatch(&self, event: &PanelEvent) {
        if let Some(handlers) = self.handlers.get(&event.event_type) {
            for handler in handlers {
                handler(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_vertical_direction_sign() {
        let up = GestureRelease::new(
            Vec2::new(0.0, -40.0),
            Point::new(0.0, 300.0),
            Point::new(0.0, 295.0),
        );
        assert!(up.vertical_direction() < 0.0);

        let down = GestureRelease::new(
            Vec2::new(0.0, 40.0),
            Point::new(0.0, 300.0),
            Point::new(0.0, 305.0),
        );
        assert!(down.vertical_direction() > 0.0);
    }

    #[test]
    fn test_dispatch_calls_every_handler() {
        let mut handlers = EventHandlers::new();
        let count = Rc::new(Cell::new(0));

        let c1 = Rc::clone(&count);
        handlers.on(event_types::ANCHOR_CHANGED, move |_| c1.set(c1.get() + 1));
        let c2 = Rc::clone(&count);
        handlers.on(event_types::ANCHOR_CHANGED, move |_| c2.set(c2.get() + 10));

        handlers.dispatch(&PanelEvent::new(event_types::ANCHOR_CHANGED).with_anchor(Anchor::Half));
        assert_eq!(count.get(), 11);
    }

    #[test]
    fn test_dispatch_without_handlers_is_noop() {
        let handlers = EventHandlers::new();
        handlers.dispatch(&PanelEvent::new(event_types::DISMISSED));
        assert!(!handlers.has_handler(event_types::DISMISSED));
    }
}
