pub mod animator;
pub mod constants;
pub mod easing;
pub mod effects;
pub mod fbx;
pub mod letters;
pub mod mesh;
pub mod orbit;
pub mod overlay;
pub mod shell;
pub mod trail;
pub mod tween;
pub mod viewer;

// Shaders bundled as string constants
pub static MODEL_WGSL: &str = include_str!("../shaders/model.wgsl");

pub use animator::*;
pub use constants::*;
pub use easing::*;
pub use mesh::{ModelGroup, MeshPart, MeshVertex};
pub use orbit::*;
pub use tween::*;
pub use viewer::*;
