#![cfg(target_arch = "wasm32")]
use folio_core::shell::{ids, PageContent};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod effects;
mod events;
mod frame;
mod letters;
mod loader;
mod overlay;
mod page;
mod render;
mod scene;
mod trail;
mod viewer;

use constants::{FONT_LINK_ID, FONT_STYLESHEET_URL};

/// What a mounted page owns; dropping it tears the page down.
struct Mounted {
    listeners: Vec<dom::Listener>,
    frame_loop: frame::FrameLoop,
    page: Rc<RefCell<page::Page>>,
    viewer: Rc<RefCell<viewer::Viewer>>,
}

impl Mounted {
    fn unmount(self) {
        self.frame_loop.stop();
        drop(self.listeners);
        self.viewer.borrow_mut().dispose();
        self.page.borrow_mut().unmount();
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

/// Add the web font stylesheet to `<head>`, once per page load.
fn load_fonts(document: &web::Document) {
    static FONTS_LOADED: AtomicBool = AtomicBool::new(false);
    if FONTS_LOADED.swap(true, Ordering::SeqCst) {
        return;
    }
    let Some(head) = document.head() else {
        return;
    };
    if let Ok(link) = document.create_element("link") {
        _ = link.set_attribute("id", FONT_LINK_ID);
        _ = link.set_attribute("rel", "stylesheet");
        _ = link.set_attribute("href", FONT_STYLESHEET_URL);
        _ = head.append_child(&link);
        log::info!("[page] font stylesheet injected");
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init() {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Unmount the page: listeners removed, trail and frame loop stopped, viewer
/// disposed. Calling it again is a no-op.
#[wasm_bindgen]
pub fn teardown() {
    if let Some(m) = MOUNTED.with(|slot| slot.borrow_mut().take()) {
        m.unmount();
    }
}

fn init() -> anyhow::Result<()> {
    if MOUNTED.with(|slot| slot.borrow().is_some()) {
        log::warn!("[page] already mounted");
        return Ok(());
    }
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    load_fonts(&document);
    let page = Rc::new(RefCell::new(page::Page::mount(
        &document,
        &PageContent::default(),
    )?));

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(ids::VIEWER_CANVAS)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", ids::VIEWER_CANVAS))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let fallback = dom::html_by_id(&document, ids::VIEWER_FALLBACK);
    let viewer = Rc::new(RefCell::new(viewer::Viewer::new(canvas, fallback)));

    let listeners = events::wire_input_handlers(&events::InputWiring {
        document: document.clone(),
        window: window.clone(),
        page: page.clone(),
        viewer: viewer.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        page.clone(),
        viewer.clone(),
    )));
    let frame_loop = frame::start_loop(frame_ctx);

    spawn_local(viewer::load(viewer.clone()));

    MOUNTED.with(|slot| {
        *slot.borrow_mut() = Some(Mounted {
            listeners,
            frame_loop,
            page,
            viewer,
        })
    });
    Ok(())
}
