use crate::dom::{self, Listener};
use crate::page::Page;
use crate::viewer::Viewer;
use folio_core::effects;
use folio_core::shell::{ids, WORK_CARD_CLASS};
use folio_core::TargetId;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub document: web::Document,
    pub window: web::Window,
    pub page: Rc<RefCell<Page>>,
    pub viewer: Rc<RefCell<Viewer>>,
}

/// Attach every page handler. Dropping the returned listeners detaches them.
pub fn wire_input_handlers(w: &InputWiring) -> Vec<Listener> {
    let mut out = Vec::new();
    out.push(wire_pointermove(w));
    out.extend(wire_hover_scale(w, ids::CTA, |p| p.cta, effects::magnetic_enter, effects::magnetic_leave));
    out.extend(wire_hover_scale(w, ids::BRAND, |p| p.brand, effects::brand_enter, effects::brand_leave));
    out.extend(wire_title_wave(w));
    out.extend(wire_work_cards(w));
    out.extend(wire_viewer_orbit(w));
    out.push(wire_resize(w));
    out
}

/// Window pointer motion drives the parallax, the trail and the overlay.
fn wire_pointermove(w: &InputWiring) -> Listener {
    let page = w.page.clone();
    Listener::typed(w.window.as_ref(), "pointermove", move |ev: web::PointerEvent| {
        let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
        let (vw, vh) = dom::viewport_size();
        let mut p = page.borrow_mut();
        let now = p.now();
        if let Some(video) = p.video {
            let tilt = effects::parallax_tilt(x, y, vw, vh);
            effects::apply_parallax(&mut p.anim, video, tilt, now);
        }
        if let Some(trail) = &mut p.trail {
            trail.push(x, y, now);
        }
        p.overlay.move_to(x, y);
    })
}

type HoverFn = fn(&mut folio_core::Animator, TargetId, f64);

fn wire_hover_scale(
    w: &InputWiring,
    id: &str,
    target: fn(&Page) -> Option<TargetId>,
    enter: HoverFn,
    leave: HoverFn,
) -> Vec<Listener> {
    let Some(el) = dom::html_by_id(&w.document, id) else {
        return Vec::new();
    };
    let on = |event: &'static str, f: HoverFn| {
        let page = w.page.clone();
        Listener::new(el.as_ref(), event, move |_| {
            let mut p = page.borrow_mut();
            let now = p.now();
            if let Some(t) = target(&p) {
                f(&mut p.anim, t, now);
            }
        })
    };
    vec![on("pointerenter", enter), on("pointerleave", leave)]
}

fn wire_title_wave(w: &InputWiring) -> Option<Listener> {
    let el = dom::html_by_id(&w.document, ids::HERO_TITLE)?;
    let page = w.page.clone();
    Some(Listener::new(el.as_ref(), "mouseenter", move |_| {
        let mut p = page.borrow_mut();
        let now = p.now();
        let Page { title, anim, .. } = &mut *p;
        if let Some(title) = title {
            title.wave(anim, now);
        }
    }))
}

fn wire_work_cards(w: &InputWiring) -> Vec<Listener> {
    let mut out = Vec::new();
    for card in dom::html_by_selector(&w.document, &format!(".{WORK_CARD_CLASS}")) {
        let preview = card.get_attribute("data-preview").unwrap_or_default();
        let page = w.page.clone();
        out.push(Listener::typed(
            card.as_ref(),
            "pointerenter",
            move |ev: web::PointerEvent| {
                let mut p = page.borrow_mut();
                p.overlay.move_to(ev.client_x() as f32, ev.client_y() as f32);
                p.overlay.show(&preview);
            },
        ));
        let page = w.page.clone();
        out.push(Listener::new(card.as_ref(), "pointerleave", move |_| {
            page.borrow_mut().overlay.hide();
        }));
    }
    out
}

/// Drag on the canvas orbits the camera; the spin keeps its own angle.
fn wire_viewer_orbit(w: &InputWiring) -> Vec<Listener> {
    let canvas = w.viewer.borrow().canvas.clone();
    let target: &web::EventTarget = canvas.as_ref();

    let viewer = w.viewer.clone();
    let canvas_down = canvas.clone();
    let down = Listener::typed(target, "pointerdown", move |ev: web::PointerEvent| {
        viewer
            .borrow_mut()
            .orbit
            .begin_drag(ev.client_x() as f32, ev.client_y() as f32);
        _ = canvas_down.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    });

    let viewer = w.viewer.clone();
    let moved = Listener::typed(target, "pointermove", move |ev: web::PointerEvent| {
        viewer
            .borrow_mut()
            .orbit
            .drag_to(ev.client_x() as f32, ev.client_y() as f32);
    });

    let end = |event: &'static str| {
        let viewer = w.viewer.clone();
        Listener::new(target, event, move |_| {
            viewer.borrow_mut().orbit.end_drag();
        })
    };
    vec![down, moved, end("pointerup"), end("pointercancel")]
}

fn wire_resize(w: &InputWiring) -> Listener {
    let canvas = w.viewer.borrow().canvas.clone();
    Listener::new(w.window.as_ref(), "resize", move |_| {
        dom::sync_canvas_backing_size(&canvas);
    })
}
