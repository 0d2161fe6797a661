// Host-side tests for the letter split, the hover wave and the page markup.

use folio_core::letters::{self, LetterSpan};
use folio_core::shell::{self, ids, PageContent, WORK_CARD_CLASS};
use folio_core::{Animator, Prop, TargetId, LETTER_PHASE_SEC, LETTER_RISE_PX};

fn targets(n: usize) -> Vec<TargetId> {
    (0..n as u32).map(TargetId).collect()
}

#[test]
fn split_and_join_round_trip() {
    for text in ["Hi, I'm Samuil Dimov", "", "  a b  ", "Ünïcødé ✓"] {
        let spans = letters::split(text);
        assert_eq!(spans.len(), text.chars().count());
        assert_eq!(letters::join(&spans), text);
        assert!(spans.iter().enumerate().all(|(i, s)| s.index == i));
    }
}

#[test]
fn spaces_render_as_non_breaking() {
    let spans = letters::split("a b");
    let shown: Vec<String> = spans.iter().map(LetterSpan::display_text).collect();
    assert_eq!(shown, vec!["a", "\u{00a0}", "b"]);
}

#[test]
fn wave_delays_increase_left_to_right() {
    let delays: Vec<f64> = (0..10).map(letters::wave_delay).collect();
    assert_eq!(delays[0], 0.0);
    assert!(delays.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn wave_rises_then_returns_home() {
    let spans = letters::split("Hey");
    let ids = targets(spans.len());
    let mut anim = Animator::new();
    letters::play_wave(&mut anim, &spans, &ids, 0.0);

    // first letter is at the top of its rise, later letters lag behind
    anim.tick(LETTER_PHASE_SEC);
    let first = anim.value(ids[0], Prop::Y).unwrap();
    let last = anim.value(ids[2], Prop::Y).unwrap();
    assert!((first - LETTER_RISE_PX).abs() < 1e-3);
    assert!(last > first);

    anim.tick(10.0);
    for &id in &ids {
        assert_eq!(anim.value(id, Prop::Y), Some(0.0));
        assert!(!anim.is_animating(id));
    }
}

#[test]
fn overlapping_waves_layer() {
    let spans = letters::split("ab");
    let ids = targets(2);
    let mut anim = Animator::new();
    letters::play_wave(&mut anim, &spans, &ids, 0.0);
    letters::play_wave(&mut anim, &spans, &ids, 0.1);
    assert_eq!(anim.active_tweens(ids[0]), 4);
    anim.tick(10.0);
    assert_eq!(anim.value(ids[0], Prop::Y), Some(0.0));
}

#[test]
fn escape_covers_markup_characters() {
    assert_eq!(
        shell::escape(r#"<a href="x">Tom & Jerry's</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
    );
    assert_eq!(shell::escape("plain"), "plain");
}

#[test]
fn page_markup_carries_every_hook() {
    let content = PageContent::default();
    let html = shell::render(&content);
    for id in [
        ids::BACKGROUND_VIDEO,
        ids::BRAND,
        ids::TICKER,
        ids::HERO_TITLE,
        ids::HERO_SUBTITLE,
        ids::CTA,
        ids::VIEWER,
        ids::VIEWER_CANVAS,
        ids::VIEWER_FALLBACK,
        ids::CURSOR_OVERLAY,
    ] {
        assert!(html.contains(&format!(r#"id="{id}""#)), "missing #{id}");
    }
    assert_eq!(
        html.matches(&format!(r#"class="{WORK_CARD_CLASS}""#)).count(),
        content.works.len()
    );
    assert_eq!(html.matches("<strong>").count(), content.ticker_repeats);
    assert!(html.contains(r#"style="display:none""#), "fallback starts hidden");
}

#[test]
fn page_markup_escapes_content() {
    let content = PageContent {
        hero_title: "<script>".to_string(),
        ..PageContent::default()
    };
    let html = shell::render(&content);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}
