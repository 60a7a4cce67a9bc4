use crate::constants::{PARTICLE_SPIN_X, PARTICLE_SPIN_Y, STAR_SPIN_Y};
use crate::state::BackdropState;
use std::f64::consts::TAU;

/// Per-frame driver for the decorative backdrop spin.
///
/// Rotation is a pure function of wall-clock time since the driver started,
/// so it does not depend on frame rate. The host's frame-pacing handle lives
/// with the host; this only tracks whether ticks should still do anything.
#[derive(Debug, Default)]
pub struct FrameDriver {
    epoch: Option<f64>,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now: f64) {
        if self.epoch.is_none() {
            self.epoch = Some(now);
            log::debug!("[frame] driver started at {now:.3}s");
        }
    }

    /// Returns `true` if the driver was running.
    pub fn stop(&mut self) -> bool {
        self.epoch.take().is_some()
    }

    pub fn is_running(&self) -> bool {
        self.epoch.is_some()
    }

    /// Advance one frame. Updates the backdrop only once loaded. Returns
    /// whether a render should follow (i.e. the driver is running).
    pub fn tick(&self, now: f64, loaded: bool, backdrop: &mut BackdropState) -> bool {
        let Some(epoch) = self.epoch else {
            return false;
        };
        if loaded {
            let t = (now - epoch).max(0.0);
            backdrop.particle_rotation.y = angle_at(t, PARTICLE_SPIN_Y);
            backdrop.particle_rotation.x = angle_at(t, PARTICLE_SPIN_X);
            backdrop.star_spin = angle_at(t, STAR_SPIN_Y);
        }
        true
    }
}

/// Angle after `t` seconds at `rate` rad/s, within one turn.
fn angle_at(t: f64, rate: f32) -> f32 {
    (t * f64::from(rate)).rem_euclid(TAU) as f32
}
