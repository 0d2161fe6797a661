// Host-side tests for easing, the animator and the page effects.

use folio_core::effects::{self, Marquee};
use folio_core::{
    Animator, Ease, Overwrite, Prop, TargetId, Transform, TweenSpec, BRAND_SCALE,
    ENTRANCE_DURATION_SEC, ENTRANCE_OFFSET_Y, HOVER_DURATION_SEC, MAGNETIC_SCALE,
    MARQUEE_DURATION_SEC, PARALLAX_MAX_DEG, PARALLAX_SCALE,
};

const EPS: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPS
}

#[test]
fn easing_endpoints_are_exact() {
    let eases = [
        Ease::Linear,
        Ease::Power1In,
        Ease::Power1Out,
        Ease::Power2Out,
        Ease::elastic_out(1.0, 0.5),
    ];
    for e in eases {
        assert!(approx(e.apply(0.0), 0.0), "{e:?} at 0");
        assert!(approx(e.apply(1.0), 1.0), "{e:?} at 1");
        // input outside [0, 1] is clamped
        assert!(approx(e.apply(-3.0), 0.0));
        assert!(approx(e.apply(7.0), 1.0));
    }
}

#[test]
fn elastic_out_overshoots_then_settles() {
    let e = Ease::elastic_out(1.0, 0.5);
    let peak = (1..100)
        .map(|i| e.apply(i as f32 / 100.0))
        .fold(f32::MIN, f32::max);
    assert!(peak > 1.05, "expected overshoot, peak was {peak}");
    assert!((e.apply(0.95) - 1.0).abs() < 0.02);
}

#[test]
fn power_out_curves_lead_linear() {
    for i in 1..10 {
        let t = i as f32 / 10.0;
        assert!(Ease::Power1Out.apply(t) > t);
        assert!(Ease::Power2Out.apply(t) > Ease::Power1Out.apply(t));
        assert!(Ease::Power1In.apply(t) < t);
    }
}

#[test]
fn tween_respects_delay_and_finishes_at_target() {
    let mut anim = Animator::new();
    let t = TargetId(1);
    anim.to(
        t,
        Prop::Y,
        -10.0,
        TweenSpec::new(1.0, Ease::Linear).delay(0.5),
        Overwrite::Auto,
        0.0,
    );
    assert!(anim.tick(0.25).is_empty(), "nothing moves during the delay");
    assert_eq!(anim.value(t, Prop::Y), Some(0.0));
    anim.tick(1.0);
    assert!(approx(anim.value(t, Prop::Y).unwrap(), -5.0));
    anim.tick(2.0);
    assert_eq!(anim.value(t, Prop::Y), Some(-10.0));
    assert!(!anim.is_animating(t));
}

#[test]
fn overwrite_auto_interrupts_running_tween() {
    let mut anim = Animator::new();
    let t = TargetId(7);
    let spec = TweenSpec::new(1.0, Ease::Linear);
    anim.to(t, Prop::Scale, 2.0, spec, Overwrite::Auto, 0.0);
    anim.tick(0.5);
    let mid = anim.value(t, Prop::Scale).unwrap();
    assert!(approx(mid, 1.5));

    anim.to(t, Prop::Scale, 1.0, spec, Overwrite::Auto, 0.5);
    assert_eq!(anim.active_tweens(t), 1);
    // the new tween starts from where the old one was interrupted
    anim.tick(0.5);
    assert!(approx(anim.value(t, Prop::Scale).unwrap(), 1.5));
    anim.tick(1.0);
    assert!(approx(anim.value(t, Prop::Scale).unwrap(), 1.25));
}

#[test]
fn overwrite_none_layers_and_newest_wins() {
    let mut anim = Animator::new();
    let t = TargetId(3);
    let spec = TweenSpec::new(1.0, Ease::Linear);
    anim.to(t, Prop::Y, -10.0, spec, Overwrite::None, 0.0);
    anim.to(t, Prop::Y, 20.0, spec, Overwrite::None, 0.0);
    assert_eq!(anim.active_tweens(t), 2);
    anim.tick(2.0);
    assert_eq!(anim.value(t, Prop::Y), Some(20.0));
}

#[test]
fn from_renders_start_value_immediately() {
    let mut anim = Animator::new();
    let t = TargetId(9);
    anim.from(t, Prop::Y, 50.0, TweenSpec::new(1.0, Ease::Linear).delay(1.0), 0.0);
    let dirty = anim.tick(0.0);
    assert_eq!(dirty, vec![t]);
    assert_eq!(anim.value(t, Prop::Y), Some(50.0));
    anim.tick(5.0);
    assert_eq!(anim.value(t, Prop::Y), Some(0.0));
}

#[test]
fn entrance_staggers_hero_elements() {
    let mut anim = Animator::new();
    let targets = [TargetId(1), TargetId(2), TargetId(3)];
    effects::play_entrance(&mut anim, &targets, 0.0);
    for &t in &targets {
        assert_eq!(anim.value(t, Prop::Y), Some(ENTRANCE_OFFSET_Y));
        assert_eq!(anim.value(t, Prop::Opacity), Some(1.0));
    }
    anim.tick(0.1);
    for &t in &targets {
        assert_eq!(anim.value(t, Prop::Opacity), Some(1.0));
    }
    // first element has started, the last is still waiting for its delay
    anim.tick(0.5);
    assert!(anim.value(targets[0], Prop::Y).unwrap() < ENTRANCE_OFFSET_Y);
    assert_eq!(anim.value(targets[2], Prop::Y), Some(ENTRANCE_OFFSET_Y));
    assert!(effects::entrance_delay(1) > effects::entrance_delay(0));

    anim.tick(effects::entrance_delay(2) + ENTRANCE_DURATION_SEC + 0.01);
    for &t in &targets {
        assert_eq!(anim.transform(t), Some(Transform::default()));
    }
}

#[test]
fn magnetic_and_brand_hover_are_independent() {
    let mut anim = Animator::new();
    let button = TargetId(1);
    let brand = TargetId(2);
    effects::magnetic_enter(&mut anim, button, 0.0);
    effects::brand_enter(&mut anim, brand, 0.0);
    anim.tick(HOVER_DURATION_SEC + 0.01);
    assert!(approx(anim.value(button, Prop::Scale).unwrap(), MAGNETIC_SCALE));
    assert!(approx(anim.value(brand, Prop::Scale).unwrap(), BRAND_SCALE));

    effects::magnetic_leave(&mut anim, button, 1.0);
    anim.tick(1.0 + HOVER_DURATION_SEC + 0.01);
    assert!(approx(anim.value(button, Prop::Scale).unwrap(), 1.0));
    assert!(approx(anim.value(brand, Prop::Scale).unwrap(), BRAND_SCALE));
}

#[test]
fn rapid_enter_leave_keeps_a_single_tween() {
    let mut anim = Animator::new();
    let button = TargetId(5);
    for i in 0..10 {
        let now = i as f64 * 0.01;
        if i % 2 == 0 {
            effects::magnetic_enter(&mut anim, button, now);
        } else {
            effects::magnetic_leave(&mut anim, button, now);
        }
    }
    assert_eq!(anim.active_tweens(button), 1);
    anim.tick(5.0);
    assert!(approx(anim.value(button, Prop::Scale).unwrap(), 1.0));
}

#[test]
fn marquee_traverses_full_width_in_configured_duration() {
    let m = Marquee::default();
    let width = 1234.0;
    assert_eq!(m.offset_px(0.0, width), 0.0);
    let almost = m.offset_px(MARQUEE_DURATION_SEC - 1e-6, width);
    assert!((almost + width).abs() < 0.01, "got {almost}");
    let half = m.offset_px(MARQUEE_DURATION_SEC / 2.0, width);
    assert!((half + width / 2.0).abs() < 1e-3);
}

#[test]
fn marquee_loops_without_seam() {
    let m = Marquee::default();
    for loop_n in 0..5 {
        let start = loop_n as f64 * MARQUEE_DURATION_SEC;
        assert_eq!(m.offset_px(start, 800.0), m.offset_px(0.0, 800.0));
        let mid = start + 3.3;
        assert!((m.offset_px(mid, 800.0) - m.offset_px(3.3, 800.0)).abs() < 1e-3);
    }

    let mut anim = Animator::new();
    let t = TargetId(4);
    m.start(&mut anim, t, 0.0);
    anim.tick(MARQUEE_DURATION_SEC * 3.0);
    assert!(approx(anim.value(t, Prop::XPercent).unwrap(), 0.0));
    anim.tick(MARQUEE_DURATION_SEC * 3.5);
    assert!(approx(anim.value(t, Prop::XPercent).unwrap(), -50.0));
    assert!(anim.is_animating(t), "marquee never finishes");
}

#[test]
fn marquee_over_repeated_text_moves_one_copy_per_loop() {
    let content = folio_core::shell::PageContent::default();
    let copies = content.ticker_repeats;
    assert!(copies >= 2);
    let m = Marquee::for_copies(copies);
    let strip = 1600.0;
    let copy = strip / copies as f32;
    let almost = m.offset_px(MARQUEE_DURATION_SEC - 1e-6, strip);
    assert!((almost + copy).abs() < 0.01, "got {almost}");
    // strip never slides past its last copy, so the viewport is never empty
    for step in 0..100 {
        let at = MARQUEE_DURATION_SEC * step as f64 / 100.0;
        assert!(m.offset_px(at, strip) > -strip + copy - 0.01);
    }

    assert_eq!(Marquee::for_copies(0), Marquee::default());
    assert_eq!(Marquee::for_copies(1), Marquee::default());
}

#[test]
fn parallax_maps_centre_and_edges() {
    let (w, h) = (1000.0, 800.0);
    let centre = effects::parallax_tilt(w / 2.0, h / 2.0, w, h);
    assert!(approx(centre.rotate_x, 0.0));
    assert!(approx(centre.rotate_y, 0.0));
    assert!(approx(centre.scale, PARALLAX_SCALE));

    let (nx, ny) = effects::normalized_offset(0.0, h / 2.0, w, h);
    assert!(approx(nx, -1.0));
    assert!(approx(ny, 0.0));
    let left = effects::parallax_tilt(0.0, h / 2.0, w, h);
    assert!(approx(left.rotate_y, PARALLAX_MAX_DEG));

    let right = effects::parallax_tilt(w, h / 2.0, w, h);
    assert!(approx(right.rotate_y, -PARALLAX_MAX_DEG));
    let bottom = effects::parallax_tilt(w / 2.0, h, w, h);
    assert!(approx(bottom.rotate_x, PARALLAX_MAX_DEG));
    let top = effects::parallax_tilt(w / 2.0, 0.0, w, h);
    assert!(approx(top.rotate_x, -PARALLAX_MAX_DEG));
}

#[test]
fn parallax_handles_empty_viewport() {
    let tilt = effects::parallax_tilt(10.0, 10.0, 0.0, 0.0);
    assert_eq!(tilt.rotate_x, 0.0);
    assert_eq!(tilt.rotate_y, 0.0);
}

#[test]
fn parallax_tween_eases_towards_tilt() {
    let mut anim = Animator::new();
    let video = TargetId(11);
    let tilt = effects::parallax_tilt(0.0, 0.0, 100.0, 100.0);
    effects::apply_parallax(&mut anim, video, tilt, 0.0);
    anim.tick(0.1);
    let mid = anim.value(video, Prop::RotateY).unwrap();
    assert!(mid > 0.0 && mid < PARALLAX_MAX_DEG);
    anim.tick(1.0);
    let t = anim.transform(video).unwrap();
    assert!(approx(t.rotate_x, -PARALLAX_MAX_DEG));
    assert!(approx(t.rotate_y, PARALLAX_MAX_DEG));
    assert!(t.to_css().starts_with("perspective(1200px)"));
}

#[test]
fn transform_css_omits_identity_channels() {
    assert_eq!(Transform::default().to_css(), "none");
    let t = Transform {
        y: -10.0,
        scale: 1.1,
        ..Transform::default()
    };
    assert_eq!(t.to_css(), "translate(0%, -10px) scale(1.1)");
}
