//! Easing curves used by the tween engine.
//!
//! The curves follow the shapes designers know from GSAP (`power1.out`,
//! `power2.out`, `elastic.out(1, 0.5)`) so timing constants carry over.

use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    Power1In,
    Power1Out,
    Power2Out,
    /// Overshoots past the end value and settles with a decaying wobble.
    ElasticOut { amplitude: f32, period: f32 },
}

impl Ease {
    pub const fn elastic_out(amplitude: f32, period: f32) -> Self {
        Ease::ElasticOut { amplitude, period }
    }

    /// Map linear progress `t` (clamped to `[0, 1]`) onto eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1In => t * t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power2Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Ease::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Power1Out
    }
}

fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let a = amplitude.max(1.0);
    let p = period.max(1e-3);
    // phase shift so the curve starts exactly at zero
    let s = p / TAU * (1.0 / a).asin();
    a * 2f32.powf(-10.0 * t) * ((t - s) * TAU / p).sin() + 1.0
}
