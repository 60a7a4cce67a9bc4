//! Minimal tween engine driving scalar channels of the scene state.
//!
//! Tweens never hold references into the scene. They read and write through
//! [`Animatable`] during [`Tweener::step`], and report completions as values
//! the owner dispatches, so cancellation is just removal from the list.
//!
//! External writes (pointer drags, wheel zoom, other tweens) to a channel a
//! tween is driving are detected on the next step by comparing the channel
//! with the value the track last wrote, and the track is rebased:
//! - `By` tracks shift their end by the external delta, so the relative motion
//!   still lands on top of whatever offset was applied.
//! - `To` tracks re-anchor at the current value and cover the remaining eased
//!   progress toward the same absolute target.

use crate::easing::Ease;
use smallvec::SmallVec;

/// Opaque token identifying one started tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(u64);

/// Scalar property a tween can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    ViewerX,
    ViewerY,
    ViewerZ,
    RingTilt,
    RingSpin,
}

/// Read/write access to the channels a tween drives.
pub trait Animatable {
    fn read(&self, channel: Channel) -> f64;
    fn write(&mut self, channel: Channel, value: f64);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Target {
    /// Absolute end value.
    To(f64),
    /// Relative change from the value at start.
    By(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Repeat {
    #[default]
    Never,
    Forever,
}

/// Everything needed to start a tween except the start time and the target.
#[derive(Clone, Debug)]
pub struct TweenSpec {
    tracks: SmallVec<[(Channel, Target); 3]>,
    duration: f32,
    ease: Ease,
    repeat: Repeat,
}

impl TweenSpec {
    pub fn new(duration: f32, ease: Ease) -> Self {
        Self {
            tracks: SmallVec::new(),
            duration: duration.max(0.0),
            ease,
            repeat: Repeat::Never,
        }
    }

    pub fn to(mut self, channel: Channel, value: f64) -> Self {
        self.tracks.push((channel, Target::To(value)));
        self
    }

    pub fn by(mut self, channel: Channel, delta: f64) -> Self {
        self.tracks.push((channel, Target::By(delta)));
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.tracks.iter().map(|(c, _)| *c)
    }
}

/// A tween that ran to its scheduled end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Completion {
    pub handle: TweenHandle,
    /// Scheduled end time (start + duration), independent of frame timing.
    pub at: f64,
}

#[derive(Clone, Debug)]
struct Track {
    channel: Channel,
    target: Target,
    initial: f64,
    origin: f64,
    origin_eased: f64,
    end: f64,
    last_written: Option<f64>,
}

impl Track {
    fn new(channel: Channel, target: Target, from: f64) -> Self {
        let end = match target {
            Target::To(v) => v,
            Target::By(d) => from + d,
        };
        Self {
            channel,
            target,
            initial: from,
            origin: from,
            origin_eased: 0.0,
            end,
            last_written: None,
        }
    }

    fn absorb_external_write(&mut self, current: f64, eased_prev: f64) {
        let Some(written) = self.last_written else {
            return;
        };
        let delta = current - written;
        if delta == 0.0 {
            return;
        }
        if let Target::By(_) = self.target {
            self.end += delta;
        }
        self.origin = current;
        self.origin_eased = eased_prev;
    }

    fn value_at(&self, eased: f64) -> f64 {
        let remaining = 1.0 - self.origin_eased;
        if remaining <= f64::EPSILON || eased >= 1.0 {
            return self.end;
        }
        self.end + (self.origin - self.end) * (1.0 - eased) / remaining
    }

    fn restart_cycle(&mut self) {
        self.origin = match self.target {
            Target::To(_) => self.initial,
            Target::By(_) => self.end,
        };
        if let Target::By(d) = self.target {
            self.end += d;
        }
        self.origin_eased = 0.0;
    }
}

#[derive(Clone, Debug)]
struct Tween {
    handle: TweenHandle,
    tracks: SmallVec<[Track; 3]>,
    start: f64,
    duration: f32,
    ease: Ease,
    repeat: Repeat,
    eased_prev: f64,
}

impl Tween {
    fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (((now - self.start) / self.duration as f64) as f32).clamp(0.0, 1.0)
    }

    fn write_all(&mut self, eased: f64, target: &mut impl Animatable) {
        for track in &mut self.tracks {
            target.write(track.channel, track.value_at(eased));
            // storage may be narrower than f64; remember what actually landed
            track.last_written = Some(target.read(track.channel));
        }
    }
}

/// Owns every running tween and advances them in creation order.
#[derive(Debug, Default)]
pub struct Tweener {
    tweens: Vec<Tween>,
    next_id: u64,
}

impl Tweener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween at `start`, capturing the current channel values as the
    /// starting point.
    pub fn animate(
        &mut self,
        desc: TweenSpec,
        start: f64,
        target: &impl Animatable,
    ) -> TweenHandle {
        let handle = TweenHandle(self.next_id);
        self.next_id += 1;
        let tracks = desc
            .tracks
            .iter()
            .map(|&(channel, t)| Track::new(channel, t, target.read(channel)))
            .collect();
        self.tweens.push(Tween {
            handle,
            tracks,
            start,
            duration: desc.duration,
            ease: desc.ease,
            repeat: desc.repeat,
            eased_prev: 0.0,
        });
        handle
    }

    /// Stop a tween where it is. Unknown, finished or already-cancelled
    /// handles are ignored and return `false`.
    pub fn cancel(&mut self, handle: TweenHandle) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.handle != handle);
        before != self.tweens.len()
    }

    pub fn cancel_all(&mut self) -> usize {
        let n = self.tweens.len();
        self.tweens.clear();
        n
    }

    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.tweens.iter().any(|t| t.handle == handle)
    }

    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    /// Handles of running tweens that drive `channel`, oldest first.
    pub fn driving(&self, channel: Channel) -> Vec<TweenHandle> {
        self.tweens
            .iter()
            .filter(|t| t.tracks.iter().any(|tr| tr.channel == channel))
            .map(|t| t.handle)
            .collect()
    }

    /// Advance every tween to `now`, writing through `target`. Returns the
    /// tweens that finished during this step; they are already removed.
    pub fn step(&mut self, now: f64, target: &mut impl Animatable) -> Vec<Completion> {
        let mut done = Vec::new();
        for tween in &mut self.tweens {
            if now < tween.start {
                continue;
            }
            for track in &mut tween.tracks {
                let current = target.read(track.channel);
                track.absorb_external_write(current, tween.eased_prev);
            }
            let cycles_forever = tween.repeat == Repeat::Forever && tween.duration > 0.0;
            while cycles_forever && now >= tween.start + tween.duration as f64 {
                tween.write_all(1.0, target);
                for track in &mut tween.tracks {
                    track.restart_cycle();
                }
                tween.start += tween.duration as f64;
                tween.eased_prev = 0.0;
            }
            let t = tween.progress(now);
            let eased = f64::from(tween.ease.evaluate(t));
            tween.write_all(eased, target);
            tween.eased_prev = eased;
            if t >= 1.0 && !cycles_forever {
                done.push(Completion {
                    handle: tween.handle,
                    at: tween.start + tween.duration as f64,
                });
            }
        }
        if !done.is_empty() {
            self.tweens
                .retain(|t| !done.iter().any(|c| c.handle == t.handle));
        }
        done
    }
}
