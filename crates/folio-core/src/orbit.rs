//! Camera types for the model viewer.
//!
//! These types avoid platform-specific APIs; the web renderer turns them into
//! matrices each frame. The orbit controller only rotates the view around
//! its focal point: zoom and pan exist as switches but are off for the
//! portfolio page, which fixes the framing of the model.

use crate::constants::{
    CAMERA_FOV_DEG, CAMERA_START, CAMERA_ZFAR, CAMERA_ZNEAR, ORBIT_PITCH_LIMIT_RAD,
    ORBIT_RAD_PER_PX,
};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Spherical-coordinate camera rig around a fixed target.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Rotation around the vertical axis; 0 looks down -Z.
    pub yaw: f32,
    /// Elevation above the horizontal plane.
    pub pitch: f32,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    dragging: Option<(f32, f32)>,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(Vec3::from(CAMERA_START), Vec3::ZERO)
    }
}

impl OrbitCamera {
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(1e-4);
        let pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
        let yaw = offset.x.atan2(offset.z);
        Self {
            target,
            radius,
            yaw,
            pitch: pitch.clamp(-ORBIT_PITCH_LIMIT_RAD, ORBIT_PITCH_LIMIT_RAD),
            enable_zoom: false,
            enable_pan: false,
            dragging: None,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        self.target + Vec3::new(cp * sy, sp, cp * cy) * self.radius
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Rotate by a pointer delta in px. Dragging right swings the camera
    /// left around the target, as a turntable would.
    pub fn rotate(&mut self, dx_px: f32, dy_px: f32) {
        self.yaw -= dx_px * ORBIT_RAD_PER_PX;
        self.pitch = (self.pitch + dy_px * ORBIT_RAD_PER_PX)
            .clamp(-ORBIT_PITCH_LIMIT_RAD, ORBIT_PITCH_LIMIT_RAD);
    }

    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.dragging = Some((x, y));
    }

    /// Continue a drag started with [`begin_drag`](Self::begin_drag).
    /// Returns `false` when no drag is in progress.
    pub fn drag_to(&mut self, x: f32, y: f32) -> bool {
        match self.dragging {
            Some((px, py)) => {
                self.rotate(x - px, y - py);
                self.dragging = Some((x, y));
                true
            }
            None => false,
        }
    }

    pub fn end_drag(&mut self) {
        self.dragging = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Dolly towards the target. Ignored unless zoom is enabled.
    pub fn zoom(&mut self, factor: f32) -> bool {
        if !self.enable_zoom || factor <= 0.0 {
            return false;
        }
        self.radius = (self.radius * factor).max(1e-3);
        true
    }

    /// Slide the focal point. Ignored unless pan is enabled.
    pub fn pan(&mut self, delta: Vec3) -> bool {
        if !self.enable_pan {
            return false;
        }
        self.target += delta;
        true
    }
}
