// Per-frame uniform data for the model viewer. Pure math so it can be
// tested on the host.

use folio_core::mesh::Bounds;
use folio_core::{Camera, LightRig};
use glam::{Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub light_view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub light_dir: [f32; 4],
    pub ambient: [f32; 4],
    pub sky: [f32; 4],
    pub ground: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PartUniforms {
    pub flags: [f32; 4],
}

impl PartUniforms {
    pub fn new(receive_shadow: bool) -> Self {
        Self {
            flags: [if receive_shadow { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

/// Radius of the scaled model around the origin, at least `min`.
pub fn scene_radius(bounds: Option<Bounds>, scale: f32, min: f32) -> f32 {
    bounds
        .map(|b| (b.center().length() + b.radius()) * scale)
        .filter(|r| r.is_finite())
        .unwrap_or(min)
        .max(min)
}

/// Orthographic light camera looking from the directional light at the
/// origin, wide enough to cover a sphere of `radius`.
pub fn light_view_proj(rig: &LightRig, radius: f32) -> Mat4 {
    let eye = Vec3::from(rig.directional_position);
    let distance = eye.length().max(1e-3);
    // avoid a degenerate basis when the light is straight overhead
    let up = if eye.normalize_or_zero().abs_diff_eq(Vec3::Y, 1e-3) {
        Vec3::Z
    } else {
        Vec3::Y
    };
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, up);
    let proj = Mat4::orthographic_rh(
        -radius,
        radius,
        -radius,
        radius,
        (distance - radius).max(0.01),
        distance + radius,
    );
    proj * view
}

pub fn scene_uniforms(camera: &Camera, model: Mat4, light_vp: Mat4, rig: &LightRig) -> SceneUniforms {
    let dir = Vec3::from(rig.directional_position).normalize_or_zero();
    let [sr, sg, sb] = rig.sky_color;
    let [gr, gg, gb] = rig.ground_color;
    SceneUniforms {
        view_proj: camera.view_projection().to_cols_array_2d(),
        light_view_proj: light_vp.to_cols_array_2d(),
        model: model.to_cols_array_2d(),
        light_dir: [dir.x, dir.y, dir.z, rig.directional_intensity],
        ambient: [rig.ambient, rig.hemi_intensity, 0.0, 0.0],
        sky: [sr, sg, sb, 1.0],
        ground: [gr, gg, gb, 1.0],
    }
}
