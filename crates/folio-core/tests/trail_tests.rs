// Host-side tests for the cursor trail and the work-card overlay.

use folio_core::overlay::CursorOverlay;
use folio_core::trail::{Trail, TrailConfig, TrailId};
use folio_core::{TRAIL_CAPACITY, TRAIL_FADE_AFTER_SEC, TRAIL_LIFETIME_SEC};

fn trail() -> Trail {
    Trail::new(TrailConfig::with_images(5))
}

#[test]
fn trail_never_exceeds_capacity() {
    let mut t = trail();
    let mut evicted_total = Vec::new();
    for i in 0..(TRAIL_CAPACITY + 7) {
        let (_, evicted) = t.push(i as f32, 0.0, i as f64 * 0.001);
        assert!(t.len() <= TRAIL_CAPACITY);
        evicted_total.extend(evicted);
    }
    assert_eq!(t.len(), TRAIL_CAPACITY);
    // the oldest items go first
    let expected: Vec<TrailId> = (0..7).map(TrailId).collect();
    assert_eq!(evicted_total, expected);
    assert_eq!(t.items().next().map(|i| i.id), Some(TrailId(7)));
}

#[test]
fn trail_images_cycle_round_robin() {
    let mut t = trail();
    for i in 0..12 {
        t.push(0.0, 0.0, i as f64);
    }
    let images: Vec<usize> = t.items().map(|i| i.image).collect();
    assert_eq!(images, vec![0, 1, 2, 3, 4, 0, 1, 2, 3, 4, 0, 1]);
}

#[test]
fn trail_fades_then_expires() {
    let mut t = trail();
    let (id, _) = t.push(10.0, 20.0, 0.0);

    let tick = t.tick(TRAIL_FADE_AFTER_SEC / 2.0);
    assert!(tick.faded.is_empty() && tick.removed.is_empty());

    let tick = t.tick(TRAIL_FADE_AFTER_SEC);
    assert_eq!(tick.faded, vec![id]);
    assert!(tick.removed.is_empty());
    assert!(t.items().all(|i| i.faded));

    // fading is reported once
    let tick = t.tick(TRAIL_FADE_AFTER_SEC + 0.1);
    assert!(tick.faded.is_empty());

    let tick = t.tick(TRAIL_LIFETIME_SEC);
    assert_eq!(tick.removed, vec![id]);
    assert!(t.is_empty());
}

#[test]
fn evicted_item_is_not_removed_twice() {
    let mut t = Trail::new(TrailConfig {
        capacity: 2,
        ..TrailConfig::with_images(1)
    });
    let (first, _) = t.push(0.0, 0.0, 0.0);
    t.push(0.0, 0.0, 0.1);
    let (_, evicted) = t.push(0.0, 0.0, 0.2);
    assert_eq!(evicted, vec![first]);
    assert!(!t.contains(first));

    // its lifetime timer still fires later; nothing else may be removed
    assert!(!t.remove(first));
    assert_eq!(t.len(), 2);
    let tick = t.tick(TRAIL_LIFETIME_SEC + 0.15);
    assert!(!tick.removed.contains(&first));
    assert_eq!(tick.removed, vec![TrailId(1)]);
}

#[test]
fn trail_clear_returns_every_live_id() {
    let mut t = trail();
    let ids: Vec<TrailId> = (0..4).map(|i| t.push(0.0, 0.0, i as f64).0).collect();
    assert_eq!(t.clear(), ids);
    assert!(t.is_empty());
    assert!(t.clear().is_empty());
}

#[test]
fn trail_without_images_stays_on_first_slot() {
    let mut t = Trail::new(TrailConfig::with_images(0));
    t.push(0.0, 0.0, 0.0);
    t.push(0.0, 0.0, 0.0);
    assert!(t.items().all(|i| i.image == 0));
}

#[test]
fn overlay_centres_on_pointer() {
    let mut o = CursorOverlay::default();
    assert!(!o.visible);
    o.move_to(300.0, 200.0);
    let half = o.size / 2.0;
    assert_eq!(o.top_left(), (300.0 - half, 200.0 - half));
    assert!(o.style().ends_with("opacity:0"));

    o.show();
    let style = o.style();
    assert!(style.contains(&format!("left:{}px", 300.0 - half)));
    assert!(style.ends_with("opacity:1"));
    // positioned against the viewport and transparent to hit-testing
    assert!(style.starts_with("position:fixed;"));
    assert!(style.contains("pointer-events:none"));

    o.hide();
    assert!(!o.visible);
}
