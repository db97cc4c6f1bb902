//! The embeddable panel component
//!
//! [`SheetPanel`] wraps the gesture engine with the configuration surface a
//! host embeds: the controlled anchor binding, the allowed set, chrome
//! colors, dismissal, and the optional callbacks. The host forwards gesture
//! samples, calls [`tick`] every animation frame, and draws from the
//! [`PanelFrame`] snapshot; the panel never renders anything itself.
//!
//! ```ignore
//! let anchor = Binding::new(Anchor::Half);
//! let mut panel = sheet_panel(anchor.clone(), 800.0)
//!     .dismissible(true)
//!     .on_settled(|anchor| println!("resting at {anchor:?}"))
//!     .build()?;
//!
//! // per frame:
//! panel.tick(dt);
//! panel.render();
//! ```
//!
//! [`tick`]: SheetPanel::tick

use std::rc::Rc;

use overcard_animation::SpringConfig;
use overcard_core::events::event_types;
use overcard_core::{
    Anchor, AnchorSet, Binding, Color, EventHandlers, GestureRelease, PanelEvent, Vec2,
};

use crate::drag::PanelPhase;
use crate::engine::{SheetEngine, DEFAULT_SCRIM_ALPHA};
use crate::error::{PanelError, Result};
use crate::scroll::{ScrollDisposition, ScrollGate};

/// Per-frame render snapshot handed to the content callback.
#[derive(Clone, Copy, Debug)]
pub struct PanelFrame {
    /// Panel top edge, in pixels from the container top
    pub offset: f32,
    /// Backdrop scrim opacity
    pub scrim_opacity: f32,
    /// Whether embedded content may scroll this frame
    pub scroll_allowed: bool,
    /// True while a settle animation is in flight
    pub settling: bool,
    /// Tint for the top grab bar
    pub top_bar_color: Color,
    /// Backdrop scrim color (opacity applied separately)
    pub scrim_color: Color,
}

type ContentFn = Rc<dyn Fn(&PanelFrame)>;

/// Internal configuration assembled by the builder.
struct PanelConfig {
    anchor: Binding<Anchor>,
    allowed: Binding<AnchorSet>,
    container_height: f32,
    spring: SpringConfig,
    scrim_alpha: f32,
    top_bar_color: Color,
    scrim_color: Color,
    dismissible: bool,
    content: Option<ContentFn>,
    on_anchor_changed: Option<Rc<dyn Fn(Anchor)>>,
    on_settled: Option<Rc<dyn Fn(Anchor)>>,
    on_scrollable_changed: Option<Rc<dyn Fn(bool)>>,
    on_background_tap: Option<Rc<dyn Fn()>>,
    on_dismiss: Option<Rc<dyn Fn()>>,
}

impl PanelConfig {
    fn new(anchor: Binding<Anchor>, container_height: f32) -> Self {
        Self {
            anchor,
            allowed: Binding::new(AnchorSet::standard()),
            container_height,
            spring: SpringConfig::sheet(),
            scrim_alpha: DEFAULT_SCRIM_ALPHA,
            top_bar_color: Color::GRAY,
            scrim_color: Color::BLACK,
            dismissible: false,
            content: None,
            on_anchor_changed: None,
            on_settled: None,
            on_scrollable_changed: None,
            on_background_tap: None,
            on_dismiss: None,
        }
    }
}

/// A draggable bottom sheet.
pub struct SheetPanel {
    engine: SheetEngine,
    gate: ScrollGate,
    dismissible: bool,
    top_bar_color: Color,
    scrim_color: Color,
    content: Option<ContentFn>,
    /// A dismissal settle toward `Closed` is in flight
    dismiss_pending: bool,
}

impl SheetPanel {
    pub fn builder(anchor: Binding<Anchor>, container_height: f32) -> SheetPanelBuilder {
        SheetPanelBuilder::new(anchor, container_height)
    }

    fn from_config(config: PanelConfig) -> Result<Self> {
        if config.allowed.get().is_empty() {
            return Err(PanelError::EmptyAllowedSet);
        }
        if !config.container_height.is_finite() {
            return Err(PanelError::NonFiniteHeight(config.container_height));
        }
        if !(0.0..=1.0).contains(&config.scrim_alpha) {
            return Err(PanelError::ScrimAlphaOutOfRange(config.scrim_alpha));
        }

        let mut engine = SheetEngine::new(config.anchor, config.allowed, config.container_height)
            .with_spring(config.spring)
            .with_max_scrim_alpha(config.scrim_alpha);

        let handlers = engine.handlers_mut();
        register_anchor_callback(handlers, event_types::ANCHOR_CHANGED, config.on_anchor_changed);
        register_anchor_callback(handlers, event_types::SETTLE_COMPLETED, config.on_settled);
        if let Some(callback) = config.on_scrollable_changed {
            handlers.on(event_types::SCROLLABLE_CHANGED, move |event| {
                callback(event.scrollable)
            });
        }
        if let Some(callback) = config.on_background_tap {
            handlers.on(event_types::BACKGROUND_TAPPED, move |_| callback());
        }
        if let Some(callback) = config.on_dismiss {
            handlers.on(event_types::DISMISSED, move |_| callback());
        }

        let mut gate = ScrollGate::new();
        gate.set_anchor_scrollable(engine.scroll_unlocked());

        Ok(Self {
            engine,
            gate,
            dismissible: config.dismissible,
            top_bar_color: config.top_bar_color,
            scrim_color: config.scrim_color,
            content: config.content,
            dismiss_pending: false,
        })
    }

    pub fn current_anchor(&self) -> Anchor {
        self.engine.current_anchor()
    }

    pub fn phase(&self) -> PanelPhase {
        self.engine.phase()
    }

    /// Direct access to the engine, e.g. for handler registration.
    pub fn engine_mut(&mut self) -> &mut SheetEngine {
        &mut self.engine
    }

    // ── Gesture forwarding ──────────────────────────────────────────────

    pub fn drag_started(&mut self) {
        self.engine.drag_started();
    }

    pub fn drag_moved(&mut self, translation: Vec2) {
        self.engine.drag_moved(translation);
    }

    pub fn drag_released(&mut self, release: GestureRelease) {
        self.engine.drag_released(release);
    }

    pub fn drag_cancelled(&mut self) {
        self.engine.drag_cancelled();
    }

    /// The backdrop scrim was tapped. Always reported; additionally starts
    /// a settle to `Closed` when the panel is dismissible.
    pub fn background_tapped(&mut self) {
        self.engine
            .handlers()
            .dispatch(&PanelEvent::new(event_types::BACKGROUND_TAPPED));
        if self.dismissible {
            tracing::debug!("background tapped; dismissing");
            self.engine.assign_anchor(Anchor::Closed);
            self.dismiss_pending = true;
        }
    }

    /// Programmatic anchor assignment (also reachable by writing the
    /// caller-owned binding directly).
    pub fn assign_anchor(&mut self, anchor: Anchor) {
        self.engine.assign_anchor(anchor);
    }

    // ── Embedded content boundary ───────────────────────────────────────

    /// Content reports its measured height against the visible frame.
    pub fn content_measured(&mut self, content_height: f32, frame_height: f32) {
        self.gate.content_measured(content_height, frame_height);
    }

    /// Route a content scroll sample; see [`ScrollGate::route`].
    pub fn content_scrolled(&mut self, content_offset_y: f32) -> ScrollDisposition {
        self.gate.route(content_offset_y)
    }

    // ── Frame loop ──────────────────────────────────────────────────────

    /// Advance animations and deliver deferred events. Call once per
    /// animation frame.
    pub fn tick(&mut self, dt: f32) {
        self.engine.tick(dt);
        self.gate.set_anchor_scrollable(self.engine.scroll_unlocked());

        // Dismissal fires after the (deferred) settle-completed flush, so
        // hosts observe the events in settle order.
        if self.dismiss_pending
            && self.engine.phase() == PanelPhase::Idle
            && !self.engine.completion_pending()
        {
            self.dismiss_pending = false;
            if self.engine.current_anchor() == Anchor::Closed {
                self.engine
                    .handlers()
                    .dispatch(&PanelEvent::new(event_types::DISMISSED).with_anchor(Anchor::Closed));
            }
        }
    }

    /// The render snapshot for this frame.
    pub fn frame(&self) -> PanelFrame {
        PanelFrame {
            offset: self.engine.offset(),
            scrim_opacity: self.engine.scrim_opacity(),
            scroll_allowed: self.gate.allowed(),
            settling: self.engine.phase() == PanelPhase::Settling,
            top_bar_color: self.top_bar_color,
            scrim_color: self.scrim_color,
        }
    }

    /// Hand the current frame to the content callback, if any.
    pub fn render(&self) {
        if let Some(content) = &self.content {
            content(&self.frame());
        }
    }
}

fn register_anchor_callback(
    handlers: &mut EventHandlers,
    event_type: overcard_core::EventType,
    callback: Option<Rc<dyn Fn(Anchor)>>,
) {
    if let Some(callback) = callback {
        handlers.on(event_type, move |event| {
            if let Some(anchor) = event.anchor {
                callback(anchor);
            }
        });
    }
}

/// Builder for [`SheetPanel`] with a fluent API.
pub struct SheetPanelBuilder {
    config: PanelConfig,
}

impl SheetPanelBuilder {
    pub fn new(anchor: Binding<Anchor>, container_height: f32) -> Self {
        Self {
            config: PanelConfig::new(anchor, container_height),
        }
    }

    /// Replace the allowed anchor set (default: `Tall`, `Half`, `Short`).
    pub fn allowed(mut self, set: AnchorSet) -> Self {
        self.config.allowed = Binding::new(set);
        self
    }

    /// Share an externally owned allowed-set binding.
    pub fn allowed_binding(mut self, allowed: Binding<AnchorSet>) -> Self {
        self.config.allowed = allowed;
        self
    }

    /// Override the settle spring tuning.
    pub fn spring(mut self, config: SpringConfig) -> Self {
        self.config.spring = config;
        self
    }

    /// Maximum scrim opacity, within `[0, 1]`.
    pub fn scrim_alpha(mut self, alpha: f32) -> Self {
        self.config.scrim_alpha = alpha;
        self
    }

    pub fn top_bar_color(mut self, color: Color) -> Self {
        self.config.top_bar_color = color;
        self
    }

    pub fn scrim_color(mut self, color: Color) -> Self {
        self.config.scrim_color = color;
        self
    }

    /// Whether a background tap dismisses the panel to `Closed`.
    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.config.dismissible = dismissible;
        self
    }

    /// Content-rendering callback, invoked with the frame snapshot.
    pub fn content<F>(mut self, content: F) -> Self
    where
        F: Fn(&PanelFrame) + 'static,
    {
        self.config.content = Some(Rc::new(content));
        self
    }

    /// Called when release resolution picks a new anchor.
    pub fn on_anchor_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(Anchor) + 'static,
    {
        self.config.on_anchor_changed = Some(Rc::new(callback));
        self
    }

    /// Called once per settle, after the panel reaches its resting offset.
    pub fn on_settled<F>(mut self, callback: F) -> Self
    where
        F: Fn(Anchor) + 'static,
    {
        self.config.on_settled = Some(Rc::new(callback));
        self
    }

    /// Called when the resting scroll permission changes.
    pub fn on_scrollable_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool) + 'static,
    {
        self.config.on_scrollable_changed = Some(Rc::new(callback));
        self
    }

    pub fn on_background_tap<F>(mut self, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.config.on_background_tap = Some(Rc::new(callback));
        self
    }

    /// Called after a dismissal settle completes.
    pub fn on_dismiss<F>(mut self, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.config.on_dismiss = Some(Rc::new(callback));
        self
    }

    pub fn build(self) -> Result<SheetPanel> {
        SheetPanel::from_config(self.config)
    }
}

/// Create a panel builder around a caller-owned anchor binding.
pub fn sheet_panel(anchor: Binding<Anchor>, container_height: f32) -> SheetPanelBuilder {
    SheetPanelBuilder::new(anchor, container_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use overcard_core::{AnchorEntry, Point};
    use std::cell::Cell;

    const H: f32 = 800.0;
    const DT: f32 = 1.0 / 60.0;

    fn settle_fully(panel: &mut SheetPanel) {
        for _ in 0..2_000 {
            panel.tick(DT);
            if panel.phase() == PanelPhase::Idle {
                break;
            }
        }
        panel.tick(DT);
        panel.tick(DT);
    }

    #[test]
    fn test_builder_rejects_empty_allowed_set() {
        let result = sheet_panel(Binding::new(Anchor::Half), H)
            .allowed(AnchorSet::new())
            .build();
        assert!(matches!(result, Err(PanelError::EmptyAllowedSet)));
    }

    #[test]
    fn test_builder_rejects_non_finite_height() {
        let result = sheet_panel(Binding::new(Anchor::Half), f32::NAN).build();
        assert!(matches!(result, Err(PanelError::NonFiniteHeight(_))));
    }

    #[test]
    fn test_builder_rejects_out_of_range_scrim_alpha() {
        let result = sheet_panel(Binding::new(Anchor::Half), H)
            .scrim_alpha(1.5)
            .build();
        assert!(matches!(result, Err(PanelError::ScrimAlphaOutOfRange(_))));
    }

    #[test]
    fn test_background_tap_without_dismissal() {
        let tapped = Rc::new(Cell::new(false));
        let seen = Rc::clone(&tapped);
        let mut panel = sheet_panel(Binding::new(Anchor::Half), H)
            .on_background_tap(move || seen.set(true))
            .build()
            .unwrap();

        panel.background_tapped();
        assert!(tapped.get());
        assert_eq!(panel.current_anchor(), Anchor::Half);
        assert_eq!(panel.phase(), PanelPhase::Idle);
    }

    #[test]
    fn test_background_tap_dismisses_after_settle() {
        let anchor = Binding::new(Anchor::Half);
        let dismissed = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&dismissed);
        let mut panel = sheet_panel(anchor.clone(), H)
            .dismissible(true)
            .on_dismiss(move || seen.set(seen.get() + 1))
            .build()
            .unwrap();

        panel.background_tapped();
        assert_eq!(anchor.get(), Anchor::Closed);
        assert_eq!(panel.phase(), PanelPhase::Settling);
        assert_eq!(dismissed.get(), 0);

        settle_fully(&mut panel);
        assert_eq!(dismissed.get(), 1);
        assert_eq!(panel.frame().offset, H);

        // No second firing on later frames.
        panel.tick(DT);
        assert_eq!(dismissed.get(), 1);
    }

    #[test]
    fn test_settled_callback_via_builder() {
        let settled = Rc::new(Cell::new(None::<Anchor>));
        let seen = Rc::clone(&settled);
        let mut panel = sheet_panel(Binding::new(Anchor::Half), H)
            .on_settled(move |anchor| seen.set(Some(anchor)))
            .build()
            .unwrap();

        panel.drag_moved(Vec2::new(0.0, -40.0));
        panel.drag_released(GestureRelease::new(
            Vec2::new(0.0, -40.0),
            Point::new(0.0, 300.0),
            Point::new(0.0, 295.0),
        ));
        assert_eq!(panel.current_anchor(), Anchor::Tall);

        settle_fully(&mut panel);
        assert_eq!(settled.get(), Some(Anchor::Tall));
    }

    #[test]
    fn test_scroll_gating_through_panel_lifecycle() {
        let allowed = AnchorSet::from_entries([
            AnchorEntry::new(Anchor::Tall).scrollable(true),
            AnchorEntry::new(Anchor::Half),
        ]);
        let mut panel = sheet_panel(Binding::new(Anchor::Tall), H)
            .allowed(allowed)
            .build()
            .unwrap();

        // Resting at a scrollable anchor, but content fits: no scrolling.
        panel.content_measured(500.0, 720.0);
        assert!(!panel.frame().scroll_allowed);

        panel.content_measured(1500.0, 720.0);
        assert!(panel.frame().scroll_allowed);
        assert_eq!(panel.content_scrolled(12.0), ScrollDisposition::Content);

        // Overscroll hands the gesture back to the panel drag.
        assert_eq!(panel.content_scrolled(-4.0), ScrollDisposition::Panel);
        assert!(!panel.frame().scroll_allowed);

        // Drag down to Half and back up to Tall: permission returns once
        // the settle at the scrollable anchor completes.
        panel.drag_moved(Vec2::new(0.0, 60.0));
        panel.drag_released(GestureRelease::new(
            Vec2::new(0.0, 60.0),
            Point::new(0.0, 300.0),
            Point::new(0.0, 306.0),
        ));
        settle_fully(&mut panel);
        assert_eq!(panel.current_anchor(), Anchor::Half);
        assert!(!panel.frame().scroll_allowed);

        panel.drag_moved(Vec2::new(0.0, -60.0));
        panel.drag_released(GestureRelease::new(
            Vec2::new(0.0, -60.0),
            Point::new(0.0, 300.0),
            Point::new(0.0, 294.0),
        ));
        settle_fully(&mut panel);
        assert_eq!(panel.current_anchor(), Anchor::Tall);
        assert!(panel.frame().scroll_allowed);
        assert_eq!(panel.content_scrolled(12.0), ScrollDisposition::Content);
    }

    #[test]
    fn test_render_invokes_content_with_frame() {
        let rendered = Rc::new(Cell::new(None::<f32>));
        let seen = Rc::clone(&rendered);
        let panel = sheet_panel(Binding::new(Anchor::Half), H)
            .content(move |frame| seen.set(Some(frame.offset)))
            .build()
            .unwrap();

        panel.render();
        assert_eq!(rendered.get(), Some(Anchor::Half.distance(H)));
    }

    #[test]
    fn test_frame_reports_chrome_colors() {
        let panel = sheet_panel(Binding::new(Anchor::Half), H)
            .top_bar_color(Color::WHITE)
            .scrim_color(Color::BLACK.with_alpha(1.0))
            .build()
            .unwrap();

        let frame = panel.frame();
        assert_eq!(frame.top_bar_color, Color::WHITE);
        assert_eq!(frame.scrim_color, Color::BLACK);
        assert!(!frame.settling);
    }
}
