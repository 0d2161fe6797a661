//! Page effects expressed as tweens on an [`Animator`].
//!
//! Each function here is the whole behaviour of one effect; the web layer
//! only decides *when* to call it and where to write the resulting CSS.

use crate::animator::{Animator, Overwrite, TargetId};
use crate::constants::*;
use crate::easing::Ease;
use crate::tween::{Prop, TweenSpec};

const HOVER_EASE: Ease = Ease::elastic_out(ELASTIC_AMPLITUDE, ELASTIC_PERIOD);

fn hover_spec() -> TweenSpec {
    TweenSpec::new(HOVER_DURATION_SEC, HOVER_EASE)
}

/// Delay before the `index`th hero element starts its entrance.
pub fn entrance_delay(index: usize) -> f64 {
    ENTRANCE_DELAY_SEC + ENTRANCE_STAGGER_SEC * index as f64
}

/// Slide the hero elements up into place, one after another, in `targets`
/// order. Opacity is left alone.
pub fn play_entrance(anim: &mut Animator, targets: &[TargetId], now: f64) {
    for (i, &target) in targets.iter().enumerate() {
        let spec = TweenSpec::new(ENTRANCE_DURATION_SEC, Ease::Power2Out).delay(entrance_delay(i));
        anim.from(target, Prop::Y, ENTRANCE_OFFSET_Y, spec, now);
    }
}

pub fn magnetic_enter(anim: &mut Animator, target: TargetId, now: f64) {
    anim.to(target, Prop::Scale, MAGNETIC_SCALE, hover_spec(), Overwrite::Auto, now);
}

pub fn magnetic_leave(anim: &mut Animator, target: TargetId, now: f64) {
    anim.to(target, Prop::Scale, 1.0, hover_spec(), Overwrite::Auto, now);
}

pub fn brand_enter(anim: &mut Animator, target: TargetId, now: f64) {
    anim.to(target, Prop::Scale, BRAND_SCALE, hover_spec(), Overwrite::Auto, now);
}

pub fn brand_leave(anim: &mut Animator, target: TargetId, now: f64) {
    anim.to(target, Prop::Scale, 1.0, hover_spec(), Overwrite::Auto, now);
}

/// Constant-velocity ticker that slides its strip by one full width per loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marquee {
    pub duration: f64,
    pub travel_percent: f32,
}

impl Default for Marquee {
    fn default() -> Self {
        Self {
            duration: MARQUEE_DURATION_SEC,
            travel_percent: MARQUEE_TRAVEL_PERCENT,
        }
    }
}

impl Marquee {
    /// Ticker whose strip holds `copies` back-to-back copies of its text.
    /// One loop moves the strip by a single copy, so the next copy lands
    /// exactly where the first started.
    pub fn for_copies(copies: usize) -> Self {
        Self {
            travel_percent: MARQUEE_TRAVEL_PERCENT / copies.max(1) as f32,
            ..Self::default()
        }
    }

    pub fn start(&self, anim: &mut Animator, target: TargetId, now: f64) {
        anim.set(target, Prop::XPercent, 0.0);
        let spec = TweenSpec::new(self.duration, Ease::Linear).repeat_forever();
        anim.to(target, Prop::XPercent, self.travel_percent, spec, Overwrite::Auto, now);
    }

    /// Fraction of the current loop completed, in `[0, 1)`.
    pub fn progress(&self, elapsed: f64) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        elapsed.max(0.0).rem_euclid(self.duration) / self.duration
    }

    /// Horizontal offset in px for a strip `width` px wide.
    pub fn offset_px(&self, elapsed: f64, width: f32) -> f32 {
        width * (self.travel_percent / 100.0) * self.progress(elapsed) as f32
    }
}

/// Target orientation of the background video for one pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub scale: f32,
}

/// Pointer position normalised against the viewport centre, each axis in
/// `[-1, 1]`. Degenerate viewports report the centre.
pub fn normalized_offset(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    let nx = ((x / width - 0.5) * 2.0).clamp(-1.0, 1.0);
    let ny = ((y / height - 0.5) * 2.0).clamp(-1.0, 1.0);
    (nx, ny)
}

pub fn parallax_tilt(x: f32, y: f32, width: f32, height: f32) -> Tilt {
    let (nx, ny) = normalized_offset(x, y, width, height);
    Tilt {
        rotate_x: ny * PARALLAX_MAX_DEG,
        rotate_y: -nx * PARALLAX_MAX_DEG,
        scale: PARALLAX_SCALE,
    }
}

/// Ease the background towards `tilt`; each call interrupts the previous one
/// so rapid pointer motion reads as one smooth glide.
pub fn apply_parallax(anim: &mut Animator, target: TargetId, tilt: Tilt, now: f64) {
    anim.set_perspective(target, Some(PARALLAX_PERSPECTIVE_PX));
    let spec = TweenSpec::new(PARALLAX_DURATION_SEC, Ease::Power2Out);
    anim.to(target, Prop::RotateX, tilt.rotate_x, spec, Overwrite::Auto, now);
    anim.to(target, Prop::RotateY, tilt.rotate_y, spec, Overwrite::Auto, now);
    anim.to(target, Prop::Scale, tilt.scale, spec, Overwrite::Auto, now);
}
