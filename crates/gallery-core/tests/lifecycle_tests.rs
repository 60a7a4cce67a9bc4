// Mount, entry hand-off, frames and teardown.

mod common;

use common::*;
use gallery_core::constants::*;
use gallery_core::*;
use std::f64::consts::TAU;

fn renders(log: &std::cell::RefCell<Vec<SurfaceCall>>) -> usize {
    log.borrow()
        .iter()
        .filter(|c| **c == SurfaceCall::Render)
        .count()
}

#[test]
fn mount_without_surface_fails() {
    let result = Gallery::<MockSurface>::mount(None, small_config(2), VIEWPORT);
    assert!(matches!(result, Err(InitError::MissingSurface)));
}

#[test]
fn mount_builds_then_sizes_the_surface() {
    let (g, log) = mount(5);
    assert_eq!(
        *log.borrow(),
        vec![SurfaceCall::Build { panels: 5 }, SurfaceCall::Resize(VIEWPORT)]
    );
    assert!(!g.is_loaded());
    assert_eq!(g.viewer().position, CAMERA_START);
    assert_eq!(g.ring().tilt, INITIAL_RING_TILT);
    assert!(g.is_frame_driver_running());
}

#[test]
fn frames_do_nothing_until_started() {
    let surface = MockSurface::default();
    let log = surface.log();
    let mut g = Gallery::mount(Some(surface), small_config(1), VIEWPORT).expect("mount");
    assert!(!g.frame(0.5));
    assert_eq!(renders(&log), 0);
}

#[test]
fn every_frame_renders_once_even_while_loading() {
    let (mut g, log) = mount(2);
    assert!(g.frame(0.1));
    assert!(g.frame(0.2));
    assert_eq!(renders(&log), 2);
    // backdrop holds still until loaded
    assert_eq!(g.state().backdrop, BackdropState::default());
}

#[test]
fn backdrop_spin_follows_elapsed_time_once_loaded() {
    let (mut g, _) = mount(1);
    load_all(&mut g, 0.0);
    g.frame(10.0);
    let b = g.state().backdrop;
    assert!((b.star_spin - 10.0 * STAR_SPIN_Y).abs() < 1e-4);
    assert!((b.particle_rotation.y - 10.0 * PARTICLE_SPIN_Y).abs() < 1e-4);
    assert!((b.particle_rotation.x - 10.0 * PARTICLE_SPIN_X).abs() < 1e-4);
}

#[test]
fn entry_lands_at_the_vantage_point() {
    let (mut g, _) = mount(3);
    load_all(&mut g, 0.0);
    run_frames(&mut g, 0.0, 3.0);
    // quartic ease-out covers most of the way early
    assert!(g.viewer().position.z < 1000.0);
    g.frame(6.0);
    assert_eq!(g.viewer().position, VANTAGE_POINT);
    assert_eq!(g.ring().tilt, 0.0);
    assert!((g.ring().spin - TAU).abs() < 1e-5);
    assert_eq!(g.entry_phase(), EntryPhase::HandedOff);
}

#[test]
fn idle_starts_when_entry_ends_and_not_before() {
    let (mut g, _) = mount(3);
    load_all(&mut g, 2.0);
    run_frames(&mut g, 0.0, 7.99);
    assert!(g.idle_handle().is_none());
    assert!(!g.is_idle_rotating());
    assert_eq!(g.entry_phase(), EntryPhase::Running);
    g.frame(8.0);
    assert!(g.is_idle_rotating());
    // the idle cycle is anchored at the scheduled entry end, not the frame
    g.frame(38.0);
    let expected = TAU + IDLE_SPIN_PER_CYCLE * 0.5;
    assert!((g.ring().spin - expected).abs() < 1e-3);
}

#[test]
fn idle_rotation_keeps_going_across_cycles() {
    let mut g = settled_gallery();
    g.frame(66.0);
    let one_cycle = g.ring().spin;
    assert!((one_cycle - (TAU + IDLE_SPIN_PER_CYCLE)).abs() < 1e-2);
    g.frame(96.0);
    assert!(g.ring().spin > one_cycle);
    assert!(g.is_idle_rotating());
}

#[test]
fn idle_spin_keeps_its_rate_after_days_of_uptime() {
    let mut g = settled_gallery();
    let start = 2.0 * 24.0 * 3600.0;
    g.frame(start);
    let rate = IDLE_SPIN_PER_CYCLE / f64::from(IDLE_CYCLE_SEC);
    assert!((g.ring().spin - (TAU + rate * (start - 6.0))).abs() < 1e-4);

    let per_frame = rate / 60.0;
    let mut prev = g.ring().spin;
    for i in 1..=6 {
        g.frame(start + f64::from(i) / 60.0);
        let step = g.ring().spin - prev;
        assert!((step - per_frame).abs() < 1e-5, "frame {i}: step {step}");
        prev = g.ring().spin;
    }

    // small drags still land in full on a large spin
    g.on_pointer_down(px(0.1, 0.1));
    g.on_pointer_move(px(0.101, 0.1));
    assert!((g.ring().spin - prev - 0.002).abs() < 1e-5);

    let b = g.state().backdrop;
    assert!((0.0..TAU as f32).contains(&b.star_spin));
    assert!((0.0..TAU as f32).contains(&b.particle_rotation.y));
}

#[test]
fn resize_updates_aspect_and_skips_empty_viewports() {
    let (mut g, log) = mount(1);
    assert!(!g.on_resize(Viewport::new(0, 600)));
    assert_eq!(g.viewport(), VIEWPORT);
    let wide = Viewport::new(1600, 900);
    // not gated on loading
    assert!(g.on_resize(wide));
    assert_eq!(g.viewport(), wide);
    assert!((g.viewer().aspect - 16.0 / 9.0).abs() < 1e-6);
    assert_eq!(log.borrow().last(), Some(&SurfaceCall::Resize(wide)));
}

#[test]
fn teardown_cancels_everything_and_runs_once() {
    let (mut g, log) = mount(2);
    load_all(&mut g, 0.0);
    run_frames(&mut g, 0.0, 6.5);
    assert!(g.on_key("Space", 6.5));
    let reset = g.reset_tweens().expect("reset running");
    assert!(g.tweens().active_count() > 0);

    let mut detached = 0;
    assert!(g.teardown(|| detached += 1));
    assert!(!g.teardown(|| detached += 1));
    assert_eq!(detached, 1);
    assert!(g.is_torn_down());
    assert_eq!(g.tweens().active_count(), 0);
    assert!(!g.is_frame_driver_running());
    assert!(g.surface().is_none());

    let disposes = log
        .borrow()
        .iter()
        .filter(|c| **c == SurfaceCall::Dispose)
        .count();
    assert_eq!(disposes, 1);
    assert_eq!(log.borrow().last(), Some(&SurfaceCall::Dispose));

    // late callbacks are inert
    let before = log.borrow().len();
    assert!(!g.frame(7.0));
    g.on_tween_complete(Completion {
        handle: reset.ring,
        at: 8.5,
    });
    assert!(g.idle_handle().is_none());
    assert!(g.reset_tweens().is_none());
    assert!(!g.on_wheel(1.0));
    assert!(!g.on_key("Space", 7.0));
    assert!(!g.on_resize(Viewport::new(10, 10)));
    g.on_asset_settled(0, Ok(pixel()), 7.0);
    assert_eq!(log.borrow().len(), before);
}

#[test]
fn teardown_before_loading_is_clean() {
    let (mut g, log) = mount(4);
    g.on_asset_settled(0, Ok(pixel()), 0.1);
    assert!(g.teardown(|| {}));
    assert_eq!(log.borrow().last(), Some(&SurfaceCall::Dispose));
    assert!(!g.is_loaded());
}
