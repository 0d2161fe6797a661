// Shared animation, trail and viewer tuning constants.

// Entrance animation (hero title, subtitle, call-to-action)
pub const ENTRANCE_OFFSET_Y: f32 = 50.0; // px below rest position
pub const ENTRANCE_DURATION_SEC: f64 = 1.0;
pub const ENTRANCE_STAGGER_SEC: f64 = 0.2;
pub const ENTRANCE_DELAY_SEC: f64 = 0.2;

// Hover scaling
pub const MAGNETIC_SCALE: f32 = 1.1;
pub const BRAND_SCALE: f32 = 1.2;
pub const HOVER_DURATION_SEC: f64 = 0.4;
pub const ELASTIC_AMPLITUDE: f32 = 1.0;
pub const ELASTIC_PERIOD: f32 = 0.5;

// Marquee ticker
pub const MARQUEE_DURATION_SEC: f64 = 20.0; // one full width of travel
pub const MARQUEE_TRAVEL_PERCENT: f32 = -100.0;

// Background video parallax
pub const PARALLAX_MAX_DEG: f32 = 15.0;
pub const PARALLAX_SCALE: f32 = 1.08;
pub const PARALLAX_PERSPECTIVE_PX: f32 = 1200.0;
pub const PARALLAX_DURATION_SEC: f64 = 0.4;

// Letter wave
pub const LETTER_RISE_PX: f32 = -10.0;
pub const LETTER_PHASE_SEC: f64 = 0.3; // rise and fall each take this long
pub const LETTER_STAGGER_SEC: f64 = 0.03;

// Cursor trail
pub const TRAIL_CAPACITY: usize = 20;
pub const TRAIL_FADE_AFTER_SEC: f64 = 0.6;
pub const TRAIL_LIFETIME_SEC: f64 = 1.0;
pub const TRAIL_IMAGE_SIZE_PX: f32 = 80.0;

// Hover overlay image
pub const OVERLAY_IMAGE_SIZE_PX: f32 = 240.0;

// Model viewer
pub const MODEL_SCALE: f32 = 0.01; // FBX files are authored in centimetres
pub const SPIN_PER_FRAME_RAD: f32 = 0.005;
pub const SPIN_REFERENCE_HZ: f32 = 60.0;
pub const SPIN_MAX_STEP_SEC: f32 = 0.25; // clamp after tab switches
pub const CAMERA_START: [f32; 3] = [0.0, 1.0, 5.0];
pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
pub const ORBIT_RAD_PER_PX: f32 = 0.008;
pub const ORBIT_PITCH_LIMIT_RAD: f32 = 1.50; // just short of the poles

// Static lighting
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const DIRECTIONAL_INTENSITY: f32 = 1.0;
pub const DIRECTIONAL_POSITION: [f32; 3] = [5.0, 5.0, 5.0];
pub const HEMI_SKY_COLOR: [f32; 3] = [0.85, 0.90, 1.0];
pub const HEMI_GROUND_COLOR: [f32; 3] = [0.25, 0.20, 0.15];
pub const HEMI_INTENSITY: f32 = 0.35;
pub const SHADOW_MAP_SIZE: u32 = 1024;
