//! Scroll gating for embedded content
//!
//! Content inside the panel may only scroll when two conditions hold at
//! once: the resting anchor permits scrolling, and the content actually
//! needs it (its measured height exceeds the visible frame). A scroll that
//! would run past the top edge revokes permission and hands the gesture
//! back to the panel drag; permission returns the next time the panel
//! settles at a scrollable anchor.

/// Who should consume a scroll gesture sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDisposition {
    /// The embedded content scrolls
    Content,
    /// The gesture belongs to the panel drag
    Panel,
}

/// Joint gate between the panel and its embedded scrollable content.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollGate {
    /// The resting anchor's scroll permission
    anchor_scrollable: bool,
    /// Content height exceeds the visible frame height
    needs_scroll: bool,
    /// Permission was revoked by an overscroll past the top edge
    revoked: bool,
}

impl ScrollGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the anchor-side permission, typically once a settle completes.
    /// Granting permission clears a previous revocation.
    pub fn set_anchor_scrollable(&mut self, scrollable: bool) {
        if scrollable && !self.anchor_scrollable {
            self.revoked = false;
        }
        self.anchor_scrollable = scrollable;
    }

    /// Re-measure the content against its visible frame.
    pub fn content_measured(&mut self, content_height: f32, frame_height: f32) {
        self.needs_scroll = content_height > frame_height;
    }

    pub fn needs_scroll(&self) -> bool {
        self.needs_scroll
    }

    /// Whether content scrolling is currently permitted.
    pub fn allowed(&self) -> bool {
        self.anchor_scrollable && self.needs_scroll && !self.revoked
    }

    /// Route a scroll sample at the given content offset. A negative offset
    /// (past the top edge) revokes permission for the rest of the gesture.
    pub fn route(&mut self, content_offset_y: f32) -> ScrollDisposition {
        if !self.allowed() {
            return ScrollDisposition::Panel;
        }
        if content_offset_y < 0.0 {
            tracing::debug!(content_offset_y, "overscroll past top edge; handing gesture to panel");
            self.revoked = true;
            return ScrollDisposition::Panel;
        }
        ScrollDisposition::Content
    }
}
