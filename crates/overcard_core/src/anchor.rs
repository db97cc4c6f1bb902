//! Panel position model
//!
//! An [`Anchor`] is a target resting position for the panel, resolvable to a
//! pixel distance from the top of the container given the container height.
//! Distances are height-dependent, so an [`AnchorSet`] keeps its entries
//! sorted lazily: callers re-sort against the current height before any
//! order-sensitive lookup.
//!
//! `distance()` is a pure function of `(anchor, height)` and is called every
//! render frame; it never allocates.

use smallvec::SmallVec;

/// A named or parametric resting position.
///
/// Named anchors map to fixed or height-relative distances; `ToTop` and
/// `ToBottom` carry caller-supplied distances and are not validated (an
/// out-of-range distance simply renders out of range).
///
/// Equality compares variant and parameters only. Whether content may scroll
/// at a position is carried by [`AnchorEntry`], not by the anchor identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// Panel top flush with the container top
    Full,
    /// Almost fully raised, a fixed grab strip of backdrop left visible
    Tall,
    /// Half the container height
    Half,
    /// A fixed strip of panel visible at the container bottom
    Short,
    /// Fully off-screen below the container
    Closed,
    /// Absolute distance from the container top
    ToTop(f32),
    /// Absolute distance from the container bottom
    ToBottom(f32),
}

impl Anchor {
    /// Distance from the container top at the `Tall` position
    pub const TALL_DISTANCE: f32 = 80.0;

    /// Visible panel height at the `Short` position
    pub const SHORT_VISIBLE: f32 = 200.0;

    /// Resolve this anchor to a pixel distance from the container top.
    pub fn distance(&self, container_height: f32) -> f32 {
        match self {
            Anchor::Full => 0.0,
            Anchor::Tall => Self::TALL_DISTANCE,
            Anchor::Half => container_height * 0.5,
            Anchor::Short => container_height - Self::SHORT_VISIBLE,
            Anchor::Closed => container_height,
            Anchor::ToTop(distance) => *distance,
            Anchor::ToBottom(distance) => container_height - distance,
        }
    }
}

/// An anchor plus its per-position scroll permission.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorEntry {
    pub anchor: Anchor,
    /// Whether embedded scrollable content may scroll while resting here
    pub scrollable: bool,
}

impl AnchorEntry {
    /// Create an entry with scrolling disallowed.
    pub const fn new(anchor: Anchor) -> Self {
        Self {
            anchor,
            scrollable: false,
        }
    }

    /// Set the scroll permission for this position.
    pub const fn scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }
}

impl From<Anchor> for AnchorEntry {
    fn from(anchor: Anchor) -> Self {
        AnchorEntry::new(anchor)
    }
}

/// The ordered set of positions a panel instance may rest at.
///
/// Entries are kept in caller-supplied order until [`sort_by_distance`] is
/// called; release resolution re-sorts on every release because resolved
/// distances change with the container height.
///
/// [`sort_by_distance`]: AnchorSet::sort_by_distance
#[derive(Clone, Debug, Default)]
pub struct AnchorSet {
    entries: SmallVec<[AnchorEntry; 4]>,
}

impl AnchorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default configuration: `Tall` (scrollable), `Half`, `Short`.
    pub fn standard() -> Self {
        Self::from_entries([
            AnchorEntry::new(Anchor::Tall).scrollable(true),
            AnchorEntry::new(Anchor::Half),
            AnchorEntry::new(Anchor::Short),
        ])
    }

    pub fn from_entries(entries: impl IntoIterator<Item = AnchorEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Build a set from bare anchors, all with scrolling disallowed.
    pub fn from_anchors(anchors: impl IntoIterator<Item = Anchor>) -> Self {
        Self::from_entries(anchors.into_iter().map(AnchorEntry::new))
    }

    pub fn push(&mut self, entry: impl Into<AnchorEntry>) {
        self.entries.push(entry.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnchorEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&AnchorEntry> {
        self.entries.get(index)
    }

    /// Sort entries ascending by resolved distance, topmost position first.
    pub fn sort_by_distance(&mut self, container_height: f32) {
        self.entries.sort_by(|a, b| {
            a.anchor
                .distance(container_height)
                .partial_cmp(&b.anchor.distance(container_height))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Index of the entry for `anchor`, ignoring the scrollable flag.
    pub fn index_of(&self, anchor: Anchor) -> Option<usize> {
        self.entries.iter().position(|e| e.anchor == anchor)
    }

    pub fn contains(&self, anchor: Anchor) -> bool {
        self.index_of(anchor).is_some()
    }

    /// Scroll permission at `anchor`, `false` when the anchor is not a member.
    pub fn scrollable_at(&self, anchor: Anchor) -> bool {
        self.index_of(anchor)
            .map(|i| self.entries[i].scrollable)
            .unwrap_or(false)
    }
}

impl FromIterator<Anchor> for AnchorSet {
    fn from_iter<I: IntoIterator<Item = Anchor>>(iter: I) -> Self {
        Self::from_anchors(iter)
    }
}
