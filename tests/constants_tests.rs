// Host-side tests for the page constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn asset_paths_are_root_relative() {
    assert!(MODEL_URL.starts_with('/') && MODEL_URL.ends_with(".fbx"));
    assert!(TEXTURE_URL.starts_with('/') && TEXTURE_URL.ends_with(".png"));
    for img in TRAIL_IMAGES {
        assert!(img.starts_with("/trail/"), "{img}");
    }
}

#[test]
fn trail_images_are_distinct() {
    let mut seen = TRAIL_IMAGES.to_vec();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), TRAIL_IMAGES.len());
}

#[test]
fn trail_css_fade_fits_inside_item_lifetime() {
    let fade_window =
        folio_core::TRAIL_LIFETIME_SEC - folio_core::TRAIL_FADE_AFTER_SEC;
    assert!(TRAIL_FADE_CSS_SEC as f64 <= fade_window + 1e-6);
}

#[test]
fn font_stylesheet_is_https() {
    assert!(FONT_STYLESHEET_URL.starts_with("https://"));
    assert!(!FONT_LINK_ID.is_empty());
}

#[test]
fn font_stylesheet_requests_heading_and_body_families() {
    assert!(FONT_STYLESHEET_URL.contains("family=Playfair+Display:wght@700"));
    assert!(FONT_STYLESHEET_URL.contains("family=Inter:wght@400;700"));
    assert!(FONT_STYLESHEET_URL.ends_with("display=swap"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn shadow_frustum_settings_are_positive() {
    assert!(SHADOW_EXTENT_PAD >= 1.0);
    assert!(SHADOW_MIN_EXTENT > 0.0);
    assert!(CLEAR_COLOR.iter().all(|c| (0.0..=1.0).contains(c)));
}
