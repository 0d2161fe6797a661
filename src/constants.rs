/// DOM hooks, asset locations and renderer settings for the web front-end.
///
/// Animation and viewer tuning lives in `folio_core::constants`; this module
/// only holds what is specific to the browser page.
// Mount point provided by index.html
pub const APP_ROOT_ID: &str = "app";

// Assets served next to the wasm bundle
pub const MODEL_URL: &str = "/thrashercards.fbx";
pub const TEXTURE_URL: &str = "/textures/thrashercards.png";
pub const TRAIL_IMAGES: [&str; 5] = [
    "/trail/1.png",
    "/trail/2.png",
    "/trail/3.png",
    "/trail/4.png",
    "/trail/5.png",
];

// Injected once per page into <head>
pub const FONT_STYLESHEET_URL: &str =
    "https://fonts.googleapis.com/css2?family=Playfair+Display:wght@700&family=Inter:wght@400;700&display=swap";
pub const FONT_LINK_ID: &str = "folio-font";

// Classes added to generated nodes
pub const LETTER_CLASS: &str = "letter";
pub const TRAIL_CONTAINER_CLASS: &str = "trail-container";
pub const TRAIL_ITEM_CLASS: &str = "trail-item";
pub const TRAIL_FADED_CLASS: &str = "faded";

// Trail image fade, matches the CSS transition on `.trail-item`
pub const TRAIL_FADE_CSS_SEC: f32 = 0.4;

// Renderer
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 0.0];
// Orthographic shadow frustum padding around the model's bounding sphere
pub const SHADOW_EXTENT_PAD: f32 = 1.5;
pub const SHADOW_MIN_EXTENT: f32 = 1.0;
