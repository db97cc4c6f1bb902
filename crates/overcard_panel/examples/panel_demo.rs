//! Headless drive of the sheet panel.
//!
//! Scripts a drag/release/settle sequence against the engine and prints the
//! frames it would render. Run with:
//!
//! ```sh
//! RUST_LOG=debug cargo run -p overcard_panel --example panel_demo
//! ```

use overcard_core::{Anchor, AnchorEntry, AnchorSet, Binding, GestureRelease, Point, Vec2};
use overcard_panel::sheet_panel;

const HEIGHT: f32 = 800.0;
const DT: f32 = 1.0 / 60.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let anchor = Binding::new(Anchor::Half);
    anchor.subscribe(|value| println!("   caller sees anchor = {value:?}"));

    let allowed = AnchorSet::from_entries([
        AnchorEntry::new(Anchor::Tall).scrollable(true),
        AnchorEntry::new(Anchor::Half),
        AnchorEntry::new(Anchor::ToBottom(240.0)),
    ]);

    let mut panel = sheet_panel(anchor.clone(), HEIGHT)
        .allowed(allowed)
        .dismissible(true)
        .on_anchor_changed(|anchor| println!("-> anchor changed: {anchor:?}"))
        .on_settled(|anchor| println!("-> settled at {anchor:?}"))
        .on_scrollable_changed(|scrollable| println!("-> scrollable: {scrollable}"))
        .on_dismiss(|| println!("-> dismissed"))
        .content(|frame| {
            println!(
                "   frame: offset={:7.2} scrim={:.3} scroll={}",
                frame.offset, frame.scrim_opacity, frame.scroll_allowed
            );
        })
        .build()
        .expect("panel configuration is valid");

    println!("== drag upward from Half and fling up ==");
    for step in 1..=6 {
        panel.drag_moved(Vec2::new(0.0, -20.0 * step as f32));
        panel.tick(DT);
    }
    panel.drag_released(GestureRelease::new(
        Vec2::new(0.0, -120.0),
        Point::new(0.0, 280.0),
        Point::new(0.0, 272.0),
    ));

    println!("== settling ==");
    let mut frames = 0;
    loop {
        panel.tick(DT);
        frames += 1;
        if frames % 10 == 0 {
            panel.render();
        }
        if !panel.frame().settling && frames > 2 {
            break;
        }
    }
    panel.render();

    println!("== content scrolls, then overscrolls past the top ==");
    panel.content_measured(2000.0, HEIGHT - Anchor::Tall.distance(HEIGHT));
    panel.tick(DT);
    println!("   scroll 30px  -> {:?}", panel.content_scrolled(30.0));
    println!("   scroll -5px  -> {:?}", panel.content_scrolled(-5.0));

    println!("== background tap dismisses ==");
    panel.background_tapped();
    while panel.frame().settling {
        panel.tick(DT);
    }
    panel.tick(DT);
    panel.tick(DT);
    panel.render();

    println!("final anchor: {:?}", anchor.get());
}
