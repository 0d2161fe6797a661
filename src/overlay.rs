use crate::dom;
use folio_core::overlay::CursorOverlay;
use web_sys as web;

/// Preview image that follows the pointer over work cards.
pub struct OverlayView {
    pub state: CursorOverlay,
    el: Option<web::HtmlElement>,
}

impl OverlayView {
    pub fn new(el: Option<web::HtmlElement>) -> Self {
        let view = Self {
            state: CursorOverlay::default(),
            el,
        };
        view.apply();
        view
    }

    pub fn show(&mut self, src: &str) {
        if let Some(el) = &self.el {
            if el.get_attribute("src").as_deref() != Some(src) {
                _ = el.set_attribute("src", src);
            }
        }
        self.state.show();
        self.apply();
    }

    pub fn hide(&mut self) {
        self.state.hide();
        self.apply();
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.state.move_to(x, y);
        if self.state.visible {
            self.apply();
        }
    }

    fn apply(&self) {
        if let Some(el) = &self.el {
            _ = el.set_attribute("style", &self.state.style());
        }
    }
}

/// Swap the viewer canvas for its placeholder, or back.
pub fn show_viewer_fallback(
    canvas: &web::HtmlCanvasElement,
    fallback: Option<&web::HtmlElement>,
    show: bool,
) {
    let canvas_el: &web::HtmlElement = canvas.as_ref();
    dom::set_style(canvas_el, "display", if show { "none" } else { "block" });
    if let Some(el) = fallback {
        dom::set_style(el, "display", if show { "flex" } else { "none" });
    }
}
