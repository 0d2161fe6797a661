use crate::constants::{MODEL_URL, TEXTURE_URL};
use crate::dom;
use crate::loader;
use crate::overlay;
use crate::render::ViewerGpu;
use folio_core::{LightRig, LoadState, ModelGroup, OrbitCamera, Spin, ViewerStatus};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct Viewer {
    pub status: ViewerStatus,
    pub orbit: OrbitCamera,
    pub spin: Spin,
    pub rig: LightRig,
    pub model: Option<ModelGroup>,
    pub gpu: Option<ViewerGpu>,
    pub canvas: web::HtmlCanvasElement,
    fallback: Option<web::HtmlElement>,
}

impl Viewer {
    pub fn new(canvas: web::HtmlCanvasElement, fallback: Option<web::HtmlElement>) -> Self {
        dom::sync_canvas_backing_size(&canvas);
        Self {
            status: ViewerStatus::default(),
            orbit: OrbitCamera::default(),
            spin: Spin::default(),
            rig: LightRig::default(),
            model: None,
            gpu: None,
            canvas,
            fallback,
        }
    }

    pub fn frame(&mut self, dt_sec: f32) {
        if self.status.state() != LoadState::Ready {
            return;
        }
        let angle = self.spin.advance(dt_sec);
        let (Some(gpu), Some(model)) = (&mut self.gpu, &self.model) else {
            return;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        let camera = self.orbit.camera(gpu.aspect());
        match gpu.render(&camera, model.model_matrix(angle), &self.rig) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("[gpu] surface lost; reconfiguring next frame");
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }

    fn fail(&mut self, err: &anyhow::Error) {
        log::warn!("[viewer] load failed: {err:#}");
        if self.status.transition(LoadState::Failed) {
            overlay::show_viewer_fallback(&self.canvas, self.fallback.as_ref(), true);
        }
    }

    pub fn dispose(&mut self) {
        self.status.transition(LoadState::Disposed);
        self.gpu = None;
        self.model = None;
        self.orbit.end_drag();
    }
}

/// Fetch the model and its texture, then bring up the GPU. Both downloads
/// start before either is awaited.
pub async fn load(viewer: Rc<RefCell<Viewer>>) {
    if !viewer.borrow_mut().status.transition(LoadState::Loading) {
        return;
    }
    let result = fetch_and_init(&viewer).await;
    let mut v = viewer.borrow_mut();
    if v.status.state().is_terminal() {
        log::debug!("[viewer] load finished after unmount; dropped");
        return;
    }
    match result {
        Ok((model, gpu)) => {
            v.model = Some(model);
            v.gpu = Some(gpu);
            v.status.transition(LoadState::Ready);
        }
        Err(e) => v.fail(&e),
    }
}

async fn fetch_and_init(viewer: &Rc<RefCell<Viewer>>) -> anyhow::Result<(ModelGroup, ViewerGpu)> {
    let model_req = loader::request(MODEL_URL)?;
    let texture_req = loader::request(TEXTURE_URL)?;
    let bytes = loader::bytes(model_req, MODEL_URL).await?;
    let texture = loader::rgba(texture_req, TEXTURE_URL).await?;
    let model = ModelGroup::from_fbx(&bytes)?;

    let (canvas, rig) = {
        let v = viewer.borrow();
        (v.canvas.clone(), v.rig)
    };
    let gpu = ViewerGpu::new(&canvas, &model, &texture, &rig).await?;
    Ok((model, gpu))
}
