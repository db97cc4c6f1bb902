//! Settle animations
//!
//! A [`SettleAnimation`] is a finite interpolation task: it carries the
//! panel's rendered offset from wherever a gesture left it to the resolved
//! anchor's resting offset. Completion is detected by value equality with
//! the target after the spring snaps, never by elapsed time, and the
//! completion signal can be consumed exactly once.
//!
//! One settle is created per release (and per programmatic anchor change)
//! and discarded once finished; superseding a settle simply drops it, so an
//! interrupted settle can never fire its completion.

use crate::spring::{Spring, SpringConfig};

/// Result of advancing a settle by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SettleProgress {
    /// Still moving; the interpolated offset for this frame
    Running(f32),
    /// Reached the target exactly
    Finished(f32),
}

impl SettleProgress {
    /// The offset to render this frame, regardless of completion.
    pub fn value(&self) -> f32 {
        match self {
            SettleProgress::Running(v) | SettleProgress::Finished(v) => *v,
        }
    }
}

/// A one-shot interpolation from a live offset to a resting offset.
#[derive(Clone, Debug)]
pub struct SettleAnimation {
    spring: Spring,
    finished: bool,
    completion_taken: bool,
}

impl SettleAnimation {
    /// Start a settle from `current` toward `target`.
    pub fn new(config: SpringConfig, current: f32, target: f32) -> Self {
        let mut spring = Spring::new(config, current);
        spring.set_target(target);
        Self {
            spring,
            finished: false,
            completion_taken: false,
        }
    }

    /// The interpolated offset right now.
    pub fn value(&self) -> f32 {
        self.spring.value()
    }

    /// The resting offset this settle is moving toward.
    pub fn target(&self) -> f32 {
        self.spring.target()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by `dt` seconds. Once finished, the value equals the target
    /// exactly and further calls keep reporting `Finished` at that value.
    pub fn advance(&mut self, dt: f32) -> SettleProgress {
        if self.finished {
            return SettleProgress::Finished(self.spring.value());
        }

        self.spring.step(dt);

        if self.spring.is_settled() {
            self.spring.snap_to_target();
            self.finished = true;
            tracing::debug!(resting_offset = self.spring.target(), "settle reached target");
            SettleProgress::Finished(self.spring.value())
        } else {
            SettleProgress::Running(self.spring.value())
        }
    }

    /// Consume the completion signal. Returns `true` on the first call after
    /// the settle finished and `false` forever after, so a completion
    /// callback driven by this can only ever fire once.
    pub fn take_completion(&mut self) -> bool {
        if self.finished && !self.completion_taken {
            self.completion_taken = true;
            true
        } else {
            false
        }
    }
}
