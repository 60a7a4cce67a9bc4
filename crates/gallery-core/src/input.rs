//! Pointer, wheel and key handling for the ring and the viewer.
//!
//! The controller holds only transient input state and the handles of its
//! own reset tweens. Loaded-gating happens in the owner, so every method here
//! assumes the gallery is interactive.

use crate::constants::{
    DRAG_SPIN_GAIN, DRAG_TILT_GAIN, RESET_DURATION_SEC, RESET_KEY_CODE, VANTAGE_POINT, ZOOM_STEP,
};
use crate::easing::Ease;
use crate::state::{RingState, SceneState, ViewerState};
use crate::tween::{Channel, TweenHandle, TweenSpec, Tweener};
use glam::Vec2;

/// Commands bound to keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    ResetView,
}

/// Map a `KeyboardEvent.code` to a command.
#[inline]
pub fn command_for_code(code: &str) -> Option<KeyCommand> {
    match code {
        RESET_KEY_CODE => Some(KeyCommand::ResetView),
        _ => None,
    }
}

/// Live only between pointer-down and pointer-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerDrag {
    pub last_ndc: Vec2,
}

/// Handles of the two tweens started by one reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetTweens {
    pub viewer: TweenHandle,
    pub ring: TweenHandle,
}

#[derive(Debug, Default)]
pub struct InteractionController {
    drag: Option<PointerDrag>,
    reset: Option<ResetTweens>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.drag.is_some()
    }

    pub fn reset_tweens(&self) -> Option<ResetTweens> {
        self.reset
    }

    pub fn pointer_down(&mut self, ndc: Vec2) {
        self.drag = Some(PointerDrag { last_ndc: ndc });
    }

    /// Apply the drag delta to the ring directly. Returns whether anything
    /// moved (i.e. a drag was in progress).
    pub fn pointer_move(&mut self, ndc: Vec2, ring: &mut RingState) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let delta = ndc - drag.last_ndc;
        ring.spin += f64::from(delta.x * DRAG_SPIN_GAIN);
        ring.tilt += delta.y * DRAG_TILT_GAIN;
        drag.last_ndc = ndc;
        true
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Step the zoom distance by the wheel direction. A zero delta is ignored.
    pub fn wheel(&mut self, delta_y: f64, viewer: &mut ViewerState) -> bool {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let step = if delta_y > 0.0 { ZOOM_STEP } else { -ZOOM_STEP };
        viewer.zoom_by(step);
        true
    }

    /// Replace any in-flight reset with a fresh one heading home.
    pub fn reset(&mut self, tweens: &mut Tweener, scene: &SceneState, now: f64) -> ResetTweens {
        self.cancel(tweens);
        let viewer = TweenSpec::new(RESET_DURATION_SEC, Ease::CubicInOut)
            .to(Channel::ViewerX, f64::from(VANTAGE_POINT.x))
            .to(Channel::ViewerY, f64::from(VANTAGE_POINT.y))
            .to(Channel::ViewerZ, f64::from(VANTAGE_POINT.z));
        let ring = TweenSpec::new(RESET_DURATION_SEC, Ease::CubicInOut)
            .to(Channel::RingTilt, 0.0)
            .to(Channel::RingSpin, 0.0);
        let started = ResetTweens {
            viewer: tweens.animate(viewer, now, scene),
            ring: tweens.animate(ring, now, scene),
        };
        self.reset = Some(started);
        started
    }

    /// Forget a reset tween that finished on its own.
    pub fn on_complete(&mut self, handle: TweenHandle, tweens: &Tweener) {
        let Some(r) = self.reset else {
            return;
        };
        let ours = r.viewer == handle || r.ring == handle;
        if ours && !tweens.is_active(r.viewer) && !tweens.is_active(r.ring) {
            self.reset = None;
            log::debug!("[reset] finished");
        }
    }

    pub fn cancel(&mut self, tweens: &mut Tweener) {
        if let Some(r) = self.reset.take() {
            tweens.cancel(r.viewer);
            tweens.cancel(r.ring);
        }
    }

    pub fn clear(&mut self, tweens: &mut Tweener) {
        self.cancel(tweens);
        self.drag = None;
    }
}
