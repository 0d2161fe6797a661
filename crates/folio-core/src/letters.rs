//! Splits a heading into per-character spans and drives the hover wave.

use crate::animator::{Animator, Overwrite, TargetId};
use crate::constants::{LETTER_PHASE_SEC, LETTER_RISE_PX, LETTER_STAGGER_SEC};
use crate::easing::Ease;
use crate::tween::{Prop, TweenSpec};

#[derive(Clone, Debug, PartialEq)]
pub struct LetterSpan {
    pub ch: char,
    pub index: usize,
    /// Vertical rest offset in px.
    pub home_offset: f32,
}

impl LetterSpan {
    /// Text to put in the DOM node. Spaces become non-breaking so an
    /// inline-block span keeps its width.
    pub fn display_text(&self) -> String {
        if self.ch == ' ' {
            "\u{00a0}".to_string()
        } else {
            self.ch.to_string()
        }
    }
}

pub fn split(text: &str) -> Vec<LetterSpan> {
    text.chars()
        .enumerate()
        .map(|(index, ch)| LetterSpan {
            ch,
            index,
            home_offset: 0.0,
        })
        .collect()
}

pub fn join(spans: &[LetterSpan]) -> String {
    spans.iter().map(|s| s.ch).collect()
}

/// Start delay of the rise for the letter at `index`.
pub fn wave_delay(index: usize) -> f64 {
    LETTER_STAGGER_SEC * index as f64
}

/// Run one left-to-right wave across `letters`, where `targets[i]` animates
/// `letters[i]`. Waves triggered while another is running are layered on
/// top rather than cancelling it, so overlapping hovers compound.
pub fn play_wave(anim: &mut Animator, letters: &[LetterSpan], targets: &[TargetId], now: f64) {
    for (span, &target) in letters.iter().zip(targets) {
        let delay = wave_delay(span.index);
        let rise = TweenSpec::new(LETTER_PHASE_SEC, Ease::Power1Out).delay(delay);
        let fall = TweenSpec::new(LETTER_PHASE_SEC, Ease::Power1In).delay(LETTER_PHASE_SEC + delay);
        anim.to(
            target,
            Prop::Y,
            span.home_offset + LETTER_RISE_PX,
            rise,
            Overwrite::None,
            now,
        );
        anim.to(target, Prop::Y, span.home_offset, fall, Overwrite::None, now);
    }
}
