//! Easing curves used by the tween engine.

/// Shape of a tween's progress curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    /// Constant speed. Used for the idle rotation.
    Linear,
    /// Quartic ease-out: fast start, long deceleration. Used for the entry sequence.
    QuartOut,
    /// Cubic ease-in-out: slow start and end. Used for the view reset.
    CubicInOut,
}

impl Ease {
    /// Evaluate the curve at `t`, clamped to [0, 1]. Returns a value in [0, 1]
    /// with `evaluate(0) == 0` and `evaluate(1) == 1`.
    #[inline]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuartOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt * omt
            }
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let f = -2.0 * t + 2.0;
                    1.0 - f * f * f / 2.0
                }
            }
        }
    }
}
