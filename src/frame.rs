use crate::page::Page;
use crate::viewer::Viewer;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub page: Rc<RefCell<Page>>,
    pub viewer: Rc<RefCell<Viewer>>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(page: Rc<RefCell<Page>>, viewer: Rc<RefCell<Viewer>>) -> Self {
        Self {
            page,
            viewer,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        self.page.borrow_mut().tick();
        self.viewer.borrow_mut().frame(dt_sec);
    }
}

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running animation-frame loop.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    tick: TickSlot,
}

impl FrameLoop {
    /// Stop scheduling frames and release the loop closure.
    pub fn stop(&self) {
        self.running.set(false);
        if let (Some(w), Some(id)) = (web::window(), self.pending.take()) {
            _ = w.cancel_animation_frame(id);
        }
        // the closure holds a clone of `tick`; dropping it breaks the cycle
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &TickSlot, pending: &Cell<Option<i32>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        pending.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let running = Rc::new(Cell::new(true));
    let tick: TickSlot = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let running_tick = running.clone();
    let pending = Rc::new(Cell::new(None));
    let pending_tick = pending.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running_tick.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &pending_tick);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &pending);
    FrameLoop {
        running,
        pending,
        tick,
    }
}
