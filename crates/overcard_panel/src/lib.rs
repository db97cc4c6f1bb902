//! Overcard Panel
//!
//! The draggable bottom sheet: a panel that slides up from the bottom of a
//! container, snaps to a set of allowed anchor positions, and can be dragged
//! between them with spring-animated settling.
//!
//! The crate has two layers:
//!
//! - [`SheetEngine`]: the anchor/gesture resolution engine. Consumes drag
//!   samples and a release gesture, resolves the release onto the allowed
//!   set (adjacent anchor only, decided by fling direction), and drives the
//!   settle animation with a deferred one-shot completion.
//! - [`SheetPanel`]: the embeddable component around the engine. Controlled
//!   anchor binding, chrome configuration, dismissal, scroll gating, and the
//!   per-frame [`PanelFrame`] snapshot handed to the host's content callback.
//!
//! # Example
//!
//! ```rust
//! use overcard_core::{Anchor, Binding, GestureRelease, Point, Vec2};
//! use overcard_panel::sheet_panel;
//!
//! let anchor = Binding::new(Anchor::Half);
//! let mut panel = sheet_panel(anchor.clone(), 800.0).build().unwrap();
//!
//! // Drag upward and release with an upward fling.
//! panel.drag_moved(Vec2::new(0.0, -60.0));
//! panel.drag_released(GestureRelease::new(
//!     Vec2::new(0.0, -60.0),
//!     Point::new(0.0, 300.0),
//!     Point::new(0.0, 294.0),
//! ));
//! assert_eq!(anchor.get(), Anchor::Tall);
//!
//! // Advance frames until the panel rests at the new anchor.
//! for _ in 0..300 {
//!     panel.tick(1.0 / 60.0);
//! }
//! assert_eq!(panel.frame().offset, Anchor::Tall.distance(800.0));
//! ```

pub mod drag;
pub mod engine;
pub mod error;
pub mod panel;
pub mod scroll;

pub use drag::{DragSession, PanelPhase, PhaseTransitions};
pub use engine::{SheetEngine, DEFAULT_SCRIM_ALPHA};
pub use error::{PanelError, Result};
pub use panel::{sheet_panel, PanelFrame, SheetPanel, SheetPanelBuilder};
pub use scroll::{ScrollDisposition, ScrollGate};
