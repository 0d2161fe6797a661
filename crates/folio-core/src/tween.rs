//! Timed property interpolation.
//!
//! A [`Tween`] drives one [`Prop`] of an element [`Transform`] from a start
//! value to an end value. The start value may be captured lazily, the first
//! time the tween becomes active, so a tween queued behind another one picks
//! up wherever the first left off.

use crate::easing::Ease;
use std::fmt::Write as _;

/// Animatable channels of an element transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prop {
    /// Vertical translation in px.
    Y,
    /// Horizontal translation in percent of the element's own width.
    XPercent,
    Scale,
    /// Degrees.
    RotateX,
    /// Degrees.
    RotateY,
    Opacity,
}

/// Rendered value of every channel for one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub y: f32,
    pub x_percent: f32,
    pub scale: f32,
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub opacity: f32,
    /// Optional `perspective()` in px, prepended to the CSS transform.
    pub perspective: Option<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            y: 0.0,
            x_percent: 0.0,
            scale: 1.0,
            rotate_x: 0.0,
            rotate_y: 0.0,
            opacity: 1.0,
            perspective: None,
        }
    }
}

impl Transform {
    pub fn get(&self, prop: Prop) -> f32 {
        match prop {
            Prop::Y => self.y,
            Prop::XPercent => self.x_percent,
            Prop::Scale => self.scale,
            Prop::RotateX => self.rotate_x,
            Prop::RotateY => self.rotate_y,
            Prop::Opacity => self.opacity,
        }
    }

    pub fn set(&mut self, prop: Prop, value: f32) {
        match prop {
            Prop::Y => self.y = value,
            Prop::XPercent => self.x_percent = value,
            Prop::Scale => self.scale = value,
            Prop::RotateX => self.rotate_x = value,
            Prop::RotateY => self.rotate_y = value,
            Prop::Opacity => self.opacity = value,
        }
    }

    /// CSS `transform` value. Identity channels are omitted; a fully
    /// identity transform renders as `none`.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        if let Some(p) = self.perspective {
            _ = write!(out, "perspective({p}px) ");
        }
        if self.x_percent != 0.0 || self.y != 0.0 {
            _ = write!(out, "translate({}%, {}px) ", self.x_percent, self.y);
        }
        if self.rotate_x != 0.0 {
            _ = write!(out, "rotateX({}deg) ", self.rotate_x);
        }
        if self.rotate_y != 0.0 {
            _ = write!(out, "rotateY({}deg) ", self.rotate_y);
        }
        if self.scale != 1.0 {
            _ = write!(out, "scale({}) ", self.scale);
        }
        let trimmed = out.trim_end();
        if trimmed.is_empty() {
            "none".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Once,
    /// Restart from the start value every `duration`, forever.
    Infinite,
}

/// Timing of a tween, independent of what it animates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub duration: f64,
    pub delay: f64,
    pub ease: Ease,
    pub repeat: Repeat,
}

impl TweenSpec {
    pub fn new(duration: f64, ease: Ease) -> Self {
        Self {
            duration,
            delay: 0.0,
            ease,
            repeat: Repeat::Once,
        }
    }

    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn repeat_forever(mut self) -> Self {
        self.repeat = Repeat::Infinite;
        self
    }
}

#[derive(Clone, Debug)]
pub struct Tween {
    pub prop: Prop,
    pub from: Option<f32>,
    pub to: f32,
    pub spec: TweenSpec,
    /// Absolute time (seconds) the tween was created.
    pub created_at: f64,
}

/// Result of sampling a tween at some instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    /// Still inside the delay; the channel is not touched.
    Pending,
    Active(f32),
    /// Reached the end value; the tween can be dropped.
    Done(f32),
}

impl Tween {
    pub fn start_time(&self) -> f64 {
        self.created_at + self.spec.delay
    }

    /// Sample at absolute time `now`. `current` is used to capture the start
    /// value if it was not given up front.
    pub fn sample(&mut self, now: f64, current: f32) -> Sample {
        let local = now - self.start_time();
        if local < 0.0 {
            return Sample::Pending;
        }
        let from = *self.from.get_or_insert(current);
        let duration = self.spec.duration.max(0.0);
        if duration <= f64::EPSILON {
            return Sample::Done(self.to);
        }
        let t = match self.spec.repeat {
            Repeat::Once => {
                if local >= duration {
                    return Sample::Done(self.to);
                }
                local / duration
            }
            Repeat::Infinite => (local % duration) / duration,
        };
        let eased = self.spec.ease.apply(t as f32);
        Sample::Active(from + (self.to - from) * eased)
    }
}
