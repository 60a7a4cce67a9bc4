//! Scripted ring motion: the one-shot entry flight and the endless idle spin.

use crate::constants::{
    ENTRY_DURATION_SEC, IDLE_CYCLE_SEC, IDLE_SPIN_PER_CYCLE, VANTAGE_POINT,
};
use crate::easing::Ease;
use crate::state::SceneState;
use crate::tween::{Channel, Repeat, TweenHandle, TweenSpec, Tweener};
use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryPhase {
    NotStarted,
    Running,
    HandedOff,
}

/// Flies the viewer in while the ring spins one turn and un-tilts.
///
/// Only the spin tween's completion matters: it hands off to the
/// [`IdleRotator`]. The flight and tilt tweens just end.
#[derive(Debug)]
pub struct EntrySequencer {
    phase: EntryPhase,
    flight: Option<TweenHandle>,
    spin: Option<TweenHandle>,
    tilt: Option<TweenHandle>,
}

impl Default for EntrySequencer {
    fn default() -> Self {
        Self {
            phase: EntryPhase::NotStarted,
            flight: None,
            spin: None,
            tilt: None,
        }
    }
}

impl EntrySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EntryPhase {
        self.phase
    }

    /// Start the three entry tweens at `now`. Ignored unless not yet started.
    pub fn start(&mut self, tweens: &mut Tweener, scene: &SceneState, now: f64) -> bool {
        if self.phase != EntryPhase::NotStarted {
            return false;
        }
        let flight = TweenSpec::new(ENTRY_DURATION_SEC, Ease::QuartOut)
            .to(Channel::ViewerX, f64::from(VANTAGE_POINT.x))
            .to(Channel::ViewerY, f64::from(VANTAGE_POINT.y))
            .to(Channel::ViewerZ, f64::from(VANTAGE_POINT.z));
        let spin = TweenSpec::new(ENTRY_DURATION_SEC, Ease::QuartOut).by(Channel::RingSpin, TAU);
        let tilt = TweenSpec::new(ENTRY_DURATION_SEC, Ease::QuartOut).to(Channel::RingTilt, 0.0);
        self.flight = Some(tweens.animate(flight, now, scene));
        self.spin = Some(tweens.animate(spin, now, scene));
        self.tilt = Some(tweens.animate(tilt, now, scene));
        self.phase = EntryPhase::Running;
        log::info!("[entry] started at {now:.3}s");
        true
    }

    /// Feed a finished tween. Returns `true` when it was the spin tween,
    /// meaning idle rotation should start now.
    pub fn on_complete(&mut self, handle: TweenHandle) -> bool {
        if self.flight == Some(handle) {
            self.flight = None;
        } else if self.tilt == Some(handle) {
            self.tilt = None;
        } else if self.spin == Some(handle) && self.phase == EntryPhase::Running {
            self.spin = None;
            self.phase = EntryPhase::HandedOff;
            return true;
        }
        false
    }

    /// Cancel whatever entry tweens are still in flight. Returns `true` if
    /// the sequence was running, in which case the caller owes the hand-off.
    pub fn preempt(&mut self, tweens: &mut Tweener) -> bool {
        self.cancel(tweens);
        if self.phase == EntryPhase::Running {
            self.phase = EntryPhase::HandedOff;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self, tweens: &mut Tweener) {
        for handle in [self.flight.take(), self.spin.take(), self.tilt.take()]
            .into_iter()
            .flatten()
        {
            tweens.cancel(handle);
        }
    }
}

/// Constant-speed spin of the ring: two turns a minute, forever.
#[derive(Debug, Default)]
pub struct IdleRotator {
    handle: Option<TweenHandle>,
}

impl IdleRotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start spinning from `at`. A second start keeps the running tween.
    pub fn start(&mut self, tweens: &mut Tweener, scene: &SceneState, at: f64) -> TweenHandle {
        if let Some(h) = self.handle.filter(|h| tweens.is_active(*h)) {
            return h;
        }
        let tween = TweenSpec::new(IDLE_CYCLE_SEC, Ease::Linear)
            .by(Channel::RingSpin, IDLE_SPIN_PER_CYCLE)
            .repeat(Repeat::Forever);
        let handle = tweens.animate(tween, at, scene);
        self.handle = Some(handle);
        log::info!("[idle] rotation started at {at:.3}s");
        handle
    }

    pub fn handle(&self) -> Option<TweenHandle> {
        self.handle
    }

    pub fn is_running(&self, tweens: &Tweener) -> bool {
        self.handle.is_some_and(|h| tweens.is_active(h))
    }

    pub fn cancel(&mut self, tweens: &mut Tweener) {
        if let Some(h) = self.handle.take() {
            tweens.cancel(h);
        }
    }
}
