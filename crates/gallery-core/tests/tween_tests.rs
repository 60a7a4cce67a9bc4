use gallery_core::*;
use std::f32::consts::FRAC_PI_2;

fn scene() -> SceneState {
    SceneState::new(Viewport::new(800, 600))
}

fn close(a: impl Into<f64>, b: impl Into<f64>) -> bool {
    (a.into() - b.into()).abs() < 1e-4
}

#[test]
fn to_tween_reaches_its_target_and_reports_scheduled_end() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let h = tw.animate(
        TweenSpec::new(2.0, Ease::Linear).to(Channel::RingTilt, 0.0),
        1.0,
        &s,
    );
    assert!(tw.step(2.0, &mut s).is_empty());
    assert!(close(s.ring.tilt, FRAC_PI_2 / 2.0));
    // a late frame still reports the scheduled end
    let done = tw.step(10.0, &mut s);
    assert_eq!(done, vec![Completion { handle: h, at: 3.0 }]);
    assert_eq!(s.ring.tilt, 0.0);
    assert!(!tw.is_active(h));
}

#[test]
fn by_tween_is_relative_to_the_start_value() {
    let mut s = scene();
    s.ring.spin = 1.0;
    let mut tw = Tweener::new();
    tw.animate(TweenSpec::new(1.0, Ease::Linear).by(Channel::RingSpin, 2.0), 0.0, &s);
    tw.step(0.5, &mut s);
    assert!(close(s.ring.spin, 2.0));
    tw.step(1.0, &mut s);
    assert_eq!(s.ring.spin, 3.0);
}

#[test]
fn tween_waits_for_its_start_time() {
    let mut s = scene();
    let mut tw = Tweener::new();
    tw.animate(TweenSpec::new(1.0, Ease::Linear).by(Channel::RingSpin, 1.0), 5.0, &s);
    assert!(tw.step(4.0, &mut s).is_empty());
    assert_eq!(s.ring.spin, 0.0);
}

#[test]
fn zero_duration_completes_on_first_step() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let h = tw.animate(TweenSpec::new(0.0, Ease::QuartOut).to(Channel::ViewerZ, 10.0), 2.0, &s);
    let done = tw.step(2.0, &mut s);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].handle, h);
    assert_eq!(s.viewer.position.z, 10.0);
}

#[test]
fn cancel_freezes_the_channel_and_is_idempotent() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let h = tw.animate(TweenSpec::new(1.0, Ease::Linear).by(Channel::RingSpin, 1.0), 0.0, &s);
    tw.step(0.25, &mut s);
    assert!(tw.cancel(h));
    assert!(!tw.cancel(h));
    assert!(tw.step(1.0, &mut s).is_empty());
    assert!(close(s.ring.spin, 0.25));
    assert_eq!(tw.active_count(), 0);
}

#[test]
fn cancel_all_reports_how_many_were_running() {
    let s = scene();
    let mut tw = Tweener::new();
    tw.animate(TweenSpec::new(1.0, Ease::Linear).to(Channel::ViewerX, 1.0), 0.0, &s);
    tw.animate(TweenSpec::new(1.0, Ease::Linear).to(Channel::ViewerY, 1.0), 0.0, &s);
    assert_eq!(tw.cancel_all(), 2);
    assert_eq!(tw.cancel_all(), 0);
}

#[test]
fn repeating_by_tween_accumulates_across_cycles() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let h = tw.animate(
        TweenSpec::new(1.0, Ease::Linear)
            .by(Channel::RingSpin, 1.0)
            .repeat(Repeat::Forever),
        0.0,
        &s,
    );
    tw.step(0.5, &mut s);
    assert!(close(s.ring.spin, 0.5));
    assert!(tw.step(1.5, &mut s).is_empty());
    assert!(close(s.ring.spin, 1.5));
    // several cycles skipped in one step
    assert!(tw.step(4.25, &mut s).is_empty());
    assert!(close(s.ring.spin, 4.25));
    assert!(tw.is_active(h));
}

#[test]
fn external_write_shifts_a_relative_tween() {
    let mut s = scene();
    let mut tw = Tweener::new();
    tw.animate(TweenSpec::new(1.0, Ease::Linear).by(Channel::RingSpin, 1.0), 0.0, &s);
    tw.step(0.5, &mut s);
    s.ring.spin += 10.0;
    tw.step(0.75, &mut s);
    assert!(close(s.ring.spin, 10.75));
    tw.step(1.0, &mut s);
    assert_eq!(s.ring.spin, 11.0);
}

#[test]
fn external_write_reanchors_an_absolute_tween() {
    let mut s = scene();
    s.ring.tilt = 1.0;
    let mut tw = Tweener::new();
    tw.animate(TweenSpec::new(1.0, Ease::Linear).to(Channel::RingTilt, 0.0), 0.0, &s);
    tw.step(0.5, &mut s);
    assert!(close(s.ring.tilt, 0.5));
    s.ring.tilt = 2.0;
    tw.step(0.75, &mut s);
    assert!(close(s.ring.tilt, 1.0));
    tw.step(1.0, &mut s);
    assert_eq!(s.ring.tilt, 0.0);
}

#[test]
fn later_tweens_win_shared_channels() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let a = tw.animate(TweenSpec::new(1.0, Ease::Linear).to(Channel::RingSpin, 5.0), 0.0, &s);
    let b = tw.animate(TweenSpec::new(1.0, Ease::Linear).to(Channel::RingSpin, -5.0), 0.0, &s);
    assert_eq!(tw.driving(Channel::RingSpin), vec![a, b]);
    assert!(tw.driving(Channel::ViewerX).is_empty());
    tw.step(0.5, &mut s);
    let done = tw.step(1.0, &mut s);
    assert_eq!(s.ring.spin, -5.0);
    let order: Vec<_> = done.iter().map(|c| c.handle).collect();
    assert_eq!(order, vec![a, b]);
}

#[test]
fn builder_lists_its_channels() {
    let tween = TweenSpec::new(1.0, Ease::Linear)
        .to(Channel::ViewerX, 0.0)
        .by(Channel::RingSpin, 1.0);
    let channels: Vec<_> = tween.channels().collect();
    assert_eq!(channels, vec![Channel::ViewerX, Channel::RingSpin]);
}
