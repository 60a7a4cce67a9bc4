// Host-side tests for the overlay's text and layout helpers.
// The main crate is wasm-only, so we include the module directly.

#![allow(dead_code)]
mod overlay {
    include!("../src/overlay.rs");
}

use gallery_core::LoadProgress;
use overlay::*;

#[test]
fn label_rounds_to_whole_percent() {
    assert_eq!(progress_label(0.0), "0%");
    assert_eq!(progress_label(33.333), "33%");
    assert_eq!(progress_label(66.666), "67%");
    assert_eq!(progress_label(99.6), "100%");
    assert_eq!(progress_label(100.0), "100%");
}

#[test]
fn label_and_bar_clamp_out_of_range_values() {
    assert_eq!(progress_label(-5.0), "0%");
    assert_eq!(progress_label(250.0), "100%");
    assert_eq!(progress_label(f32::NAN), "0%");
    assert_eq!(bar_width(-1.0), "0.0%");
    assert_eq!(bar_width(120.0), "100.0%");
}

#[test]
fn bar_width_tracks_the_exact_percentage() {
    assert_eq!(bar_width(0.0), "0.0%");
    assert_eq!(bar_width(8.333), "8.3%");
    assert_eq!(bar_width(50.0), "50.0%");
}

#[test]
fn overlay_switches_to_controls_only_when_loaded() {
    let mut p = LoadProgress {
        percent: 100.0,
        loaded: false,
    };
    // a full bar is still the loading screen until the loaded flag flips
    assert_eq!(view_for(p), OverlayView::Loading);
    p.loaded = true;
    assert_eq!(view_for(p), OverlayView::Controls);
    assert_eq!(view_for(LoadProgress::default()), OverlayView::Loading);
}

#[test]
fn controls_hint_lists_every_binding() {
    assert_eq!(LOADING_TITLE, "Loading Gallery...");
    assert!(CONTROL_HINTS[0].starts_with("Drag"));
    assert!(CONTROL_HINTS[1].starts_with("Scroll"));
    assert!(CONTROL_HINTS[2].starts_with("Space"));
}
