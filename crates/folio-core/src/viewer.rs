//! Model viewer state that does not touch the GPU: the asset load state
//! machine, the idle spin, and the static light rig.

use crate::constants::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Ready,
    Failed,
    /// Terminal; the viewer has been unmounted.
    Disposed,
}

impl LoadState {
    /// Whether moving to `next` is allowed.
    pub fn can_move_to(self, next: LoadState) -> bool {
        use LoadState::*;
        matches!(
            (self, next),
            (Unloaded, Loading)
                | (Loading, Ready)
                | (Loading, Failed)
                | (Unloaded | Loading | Ready | Failed, Disposed)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == LoadState::Disposed
    }

    pub fn shows_fallback(self) -> bool {
        self == LoadState::Failed
    }
}

/// Owns the current [`LoadState`] and rejects illegal moves.
#[derive(Debug)]
pub struct ViewerStatus {
    state: LoadState,
}

impl Default for ViewerStatus {
    fn default() -> Self {
        Self {
            state: LoadState::Unloaded,
        }
    }
}

impl ViewerStatus {
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Apply a transition; returns `false` and leaves the state alone if it
    /// is not allowed (a load finishing after unmount, for instance).
    pub fn transition(&mut self, next: LoadState) -> bool {
        if self.state.can_move_to(next) {
            log::info!("[viewer] state {:?} -> {:?}", self.state, next);
            self.state = next;
            true
        } else {
            log::debug!("[viewer] ignored {:?} -> {:?}", self.state, next);
            false
        }
    }
}

/// Constant-speed idle rotation about the vertical axis.
///
/// The speed is defined as [`SPIN_PER_FRAME_RAD`] per frame at
/// [`SPIN_REFERENCE_HZ`] and scaled by elapsed time, so the model turns at
/// the same rate on any display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub angle: f32,
    pub rad_per_sec: f32,
}

impl Default for Spin {
    fn default() -> Self {
        Self {
            angle: 0.0,
            rad_per_sec: SPIN_PER_FRAME_RAD * SPIN_REFERENCE_HZ,
        }
    }
}

impl Spin {
    /// Advance by `dt_sec` and return the new angle in `[0, 2π)`.
    pub fn advance(&mut self, dt_sec: f32) -> f32 {
        let dt = dt_sec.clamp(0.0, SPIN_MAX_STEP_SEC);
        self.angle = (self.angle + self.rad_per_sec * dt).rem_euclid(TAU);
        self.angle
    }
}

/// Static lighting: ambient, one directional light and a sky/ground
/// hemisphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightRig {
    pub ambient: f32,
    pub directional_position: [f32; 3],
    pub directional_intensity: f32,
    pub sky_color: [f32; 3],
    pub ground_color: [f32; 3],
    pub hemi_intensity: f32,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AMBIENT_INTENSITY,
            directional_position: DIRECTIONAL_POSITION,
            directional_intensity: DIRECTIONAL_INTENSITY,
            sky_color: HEMI_SKY_COLOR,
            ground_color: HEMI_GROUND_COLOR,
            hemi_intensity: HEMI_INTENSITY,
        }
    }
}
