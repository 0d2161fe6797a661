// Host-side tests for the viewer's uniform math.

#![allow(dead_code)]
mod scene {
    include!("../src/scene.rs");
}

use folio_core::mesh::Bounds;
use folio_core::{LightRig, OrbitCamera};
use glam::{Mat4, Vec3, Vec4};
use scene::*;

#[test]
fn scene_uniforms_fill_one_aligned_block() {
    assert_eq!(std::mem::size_of::<SceneUniforms>(), 256);
    assert_eq!(std::mem::size_of::<PartUniforms>(), 16);
}

#[test]
fn part_flag_tracks_shadow_receiving() {
    assert_eq!(PartUniforms::new(true).flags[0], 1.0);
    assert_eq!(PartUniforms::new(false).flags[0], 0.0);
}

#[test]
fn scene_radius_covers_scaled_bounds() {
    let b = Bounds {
        min: Vec3::splat(-100.0),
        max: Vec3::splat(100.0),
    };
    let r = scene_radius(Some(b), 0.01, 0.5);
    assert!((r - 3f32.sqrt()).abs() < 1e-4, "{r}");
}

#[test]
fn scene_radius_falls_back_to_minimum() {
    assert_eq!(scene_radius(None, 0.01, 1.0), 1.0);
    let tiny = Bounds {
        min: Vec3::ZERO,
        max: Vec3::splat(0.001),
    };
    assert_eq!(scene_radius(Some(tiny), 1.0, 1.0), 1.0);
}

fn clip(m: Mat4, p: Vec3) -> Vec3 {
    let c = m * Vec4::new(p.x, p.y, p.z, 1.0);
    c.truncate() / c.w
}

#[test]
fn light_frustum_contains_the_model_sphere() {
    let rig = LightRig::default();
    let vp = light_view_proj(&rig, 2.0);
    for p in [Vec3::ZERO, Vec3::X * 1.9, Vec3::Y * -1.9, Vec3::Z * 1.9] {
        let c = clip(vp, p);
        assert!(c.x.abs() <= 1.0 && c.y.abs() <= 1.0, "{p:?} -> {c:?}");
        assert!((0.0..=1.0).contains(&c.z), "{p:?} -> {c:?}");
    }
}

#[test]
fn overhead_light_still_builds_a_valid_frustum() {
    let rig = LightRig {
        directional_position: [0.0, 8.0, 0.0],
        ..LightRig::default()
    };
    let vp = light_view_proj(&rig, 1.0);
    assert!(vp.is_finite());
    let c = clip(vp, Vec3::ZERO);
    assert!(c.x.abs() < 1e-4 && c.y.abs() < 1e-4);
}

#[test]
fn scene_uniforms_pack_light_and_camera() {
    let rig = LightRig::default();
    let camera = OrbitCamera::default().camera(16.0 / 9.0);
    let u = scene_uniforms(&camera, Mat4::IDENTITY, Mat4::IDENTITY, &rig);

    let dir = Vec3::from_slice(&u.light_dir[..3]);
    assert!((dir.length() - 1.0).abs() < 1e-5);
    assert_eq!(u.light_dir[3], rig.directional_intensity);
    assert_eq!(u.ambient[0], rig.ambient);
    assert_eq!(u.model, Mat4::IDENTITY.to_cols_array_2d());
    assert_eq!(
        u.view_proj,
        camera.view_projection().to_cols_array_2d()
    );
}
