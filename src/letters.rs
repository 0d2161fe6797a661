use crate::constants::LETTER_CLASS;
use crate::dom;
use crate::effects::TargetMap;
use folio_core::letters::{self, LetterSpan};
use folio_core::{Animator, TargetId};
use web_sys as web;

/// A heading whose text has been replaced by one span per character.
pub struct SplitHeading {
    pub letters: Vec<LetterSpan>,
    pub targets: Vec<TargetId>,
}

impl SplitHeading {
    /// Replace `heading`'s text with letter spans and register each span as
    /// an animation target.
    pub fn mount(
        document: &web::Document,
        heading: &web::HtmlElement,
        anim: &mut Animator,
        map: &mut TargetMap,
    ) -> anyhow::Result<Self> {
        let text = heading.text_content().unwrap_or_default();
        let letters = letters::split(&text);
        heading.set_inner_html("");
        _ = heading.set_attribute("aria-label", &text);
        let mut targets = Vec::with_capacity(letters.len());
        for span in &letters {
            let el = dom::create_html(document, "span")?;
            el.set_class_name(LETTER_CLASS);
            el.set_text_content(Some(&span.display_text()));
            _ = el.set_attribute("aria-hidden", "true");
            dom::set_style(&el, "display", "inline-block");
            heading
                .append_child(&el)
                .map_err(|e| anyhow::anyhow!("append letter: {e:?}"))?;
            targets.push(map.register(anim, el));
        }
        log::debug!("[letters] split {} chars", letters.len());
        Ok(Self { letters, targets })
    }

    pub fn wave(&self, anim: &mut Animator, now: f64) {
        letters::play_wave(anim, &self.letters, &self.targets, now);
    }
}
