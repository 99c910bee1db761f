//! Headless carousel demo
//!
//! Builds the launch-screen picker, replays a leftward flick gesture, and
//! drives the ticker until the selection settles. Run with
//! `RUST_LOG=debug` to watch commits and ticker lifecycle.

use std::thread;
use std::time::Duration;

use spindle_animation::Ticker;
use spindle_core::events::{event_types, Event};
use spindle_widgets::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut ticker = Ticker::new();
    let config = CarouselConfig::new().reveal_delay(200);
    let mut picker = Carousel::with_config(
        vec![
            item("book", "Reading").on_activate(|| tracing::info!("activated: reading")),
            item("coffee", "Coffee").on_activate(|| tracing::info!("activated: coffee")),
            item("face", "Face to face").on_activate(|| tracing::info!("activated: face")),
            item("file", "Documents").on_activate(|| tracing::info!("activated: documents")),
            item("travel", "Travel").on_activate(|| tracing::info!("activated: travel")),
        ],
        config,
    );
    picker.attach(&ticker.handle());

    tracing::info!(index = picker.current_index(), "picker mounted");

    // Replay a leftward flick: 60px of travel over 40ms, then release.
    let gesture = [
        Event::pointer(event_types::POINTER_DOWN, 0.0, 0.0, 0),
        Event::pointer(event_types::POINTER_MOVE, -20.0, 0.0, 16),
        Event::pointer(event_types::POINTER_MOVE, -40.0, 0.0, 28),
        Event::pointer(event_types::POINTER_MOVE, -60.0, 0.0, 40),
        Event::pointer(event_types::POINTER_UP, -60.0, 0.0, 40),
    ];
    for event in &gesture {
        picker.handle_event(event);
    }
    tracing::info!(state = ?picker.gesture_state(), "gesture released");

    // Let the background frame thread drive the coast and settle.
    ticker.start_background(120);
    while picker.is_animating() {
        thread::sleep(Duration::from_millis(16));
    }
    ticker.stop_background();

    let frame = picker.frame();
    tracing::info!(
        index = picker.current_index(),
        opacity = frame.opacity,
        "settled"
    );
    for item in &frame.items {
        tracing::info!(
            index = item.index,
            label = %item.label,
            offset_x = item.visual.offset_x,
            scale = item.visual.scale,
            blend = item.visual.selection_blend,
            "item"
        );
    }

    // Tap the now-centered item to fire its activation callback.
    picker.handle_event(&Event::pointer(event_types::POINTER_DOWN, 0.0, 0.0, 2000));
    picker.handle_event(&Event::pointer(event_types::POINTER_UP, 0.0, 0.0, 2080));
}
