use crate::constants::OVERLAY_IMAGE_SIZE_PX;

/// Image that follows the pointer while it hovers a work card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorOverlay {
    pub x: f32,
    pub y: f32,
    pub visible: bool,
    pub size: f32,
}

impl Default for CursorOverlay {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            visible: false,
            size: OVERLAY_IMAGE_SIZE_PX,
        }
    }
}

impl CursorOverlay {
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Top-left corner in px that centres the image on the pointer.
    pub fn top_left(&self) -> (f32, f32) {
        let half = self.size * 0.5;
        (self.x - half, self.y - half)
    }

    pub fn style(&self) -> String {
        let (left, top) = self.top_left();
        format!(
            "position:fixed;pointer-events:none;left:{left}px;top:{top}px;width:{s}px;height:{s}px;opacity:{o}",
            s = self.size,
            o = if self.visible { 1 } else { 0 },
        )
    }
}
