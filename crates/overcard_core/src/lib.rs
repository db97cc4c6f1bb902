//! Overcard Core
//!
//! Foundational primitives for the Overcard bottom-sheet component:
//!
//! - **Position model**: named and parametric anchors resolvable to pixel
//!   distances, and the ordered allowed-set the panel may rest at
//! - **Gesture events**: release samples and typed panel output events
//! - **Controlled bindings**: shared observable values with change
//!   notification, the two-way channel between caller and engine
//! - **Geometry**: plain copyable points, vectors, sizes, and colors
//!
//! # Example
//!
//! ```rust
//! use overcard_core::{Anchor, AnchorSet};
//!
//! let mut allowed = AnchorSet::standard();
//! allowed.sort_by_distance(800.0);
//!
//! assert_eq!(allowed.index_of(Anchor::Tall), Some(0));
//! assert_eq!(Anchor::Half.distance(800.0), 400.0);
//! ```

pub mod anchor;
pub mod binding;
pub mod events;
pub mod geometry;

pub use anchor::{Anchor, AnchorEntry, AnchorSet};
pub use binding::{Binding, SubscriptionId};
pub use events::{
    event_types, EventCallback, EventHandlers, EventType, GestureRelease, PanelEvent,
};
pub use geometry::{Color, Point, Size, Vec2};
