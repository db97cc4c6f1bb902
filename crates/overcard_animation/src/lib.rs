//! Overcard Animation
//!
//! Spring physics for the panel's settle behavior:
//!
//! - **Spring**: RK4-integrated spring with settle detection and exact
//!   snap-to-target, so completion can be keyed on value equality
//! - **SettleAnimation**: a finite, one-shot interpolation task from a live
//!   dragged offset to a resting offset, with a completion signal that can
//!   be consumed exactly once

pub mod settle;
pub mod spring;

pub use settle::{SettleAnimation, SettleProgress};
pub use spring::{Spring, SpringConfig};
