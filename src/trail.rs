use crate::constants::{
    TRAIL_CONTAINER_CLASS, TRAIL_FADED_CLASS, TRAIL_FADE_CSS_SEC, TRAIL_IMAGES, TRAIL_ITEM_CLASS,
};
use crate::dom;
use fnv::FnvHashMap;
use folio_core::trail::{Trail, TrailConfig, TrailId, TrailItem};
use folio_core::TRAIL_IMAGE_SIZE_PX;
use web_sys as web;

/// Trail state plus the DOM nodes showing it, kept in step by id.
pub struct TrailLayer {
    pub trail: Trail,
    container: web::HtmlElement,
    nodes: FnvHashMap<TrailId, web::HtmlElement>,
    document: web::Document,
}

impl TrailLayer {
    pub fn mount(document: &web::Document) -> anyhow::Result<Self> {
        let container = dom::create_html(document, "div")?;
        container.set_class_name(TRAIL_CONTAINER_CLASS);
        for (prop, value) in [
            ("position", "fixed"),
            ("inset", "0"),
            ("pointer-events", "none"),
            ("overflow", "hidden"),
            ("z-index", "50"),
        ] {
            dom::set_style(&container, prop, value);
        }
        document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no <body>"))?
            .append_child(&container)
            .map_err(|e| anyhow::anyhow!("append trail container: {e:?}"))?;
        Ok(Self {
            trail: Trail::new(TrailConfig::with_images(TRAIL_IMAGES.len())),
            container,
            nodes: FnvHashMap::default(),
            document: document.clone(),
        })
    }

    pub fn push(&mut self, x: f32, y: f32, now: f64) {
        let (id, evicted) = self.trail.push(x, y, now);
        for old in evicted {
            self.remove_node(old);
        }
        if let Some(item) = self.trail.items().find(|i| i.id == id).cloned() {
            match self.spawn_node(&item) {
                Ok(el) => {
                    self.nodes.insert(id, el);
                }
                Err(e) => log::warn!("[trail] {e:#}"),
            }
        }
    }

    pub fn tick(&mut self, now: f64) {
        let changes = self.trail.tick(now);
        for id in changes.faded {
            if let Some(el) = self.nodes.get(&id) {
                _ = el.class_list().add_1(TRAIL_FADED_CLASS);
                dom::set_style(el, "opacity", "0");
            }
        }
        for id in changes.removed {
            self.remove_node(id);
        }
    }

    fn spawn_node(&self, item: &TrailItem) -> anyhow::Result<web::HtmlElement> {
        let el = dom::create_html(&self.document, "img")?;
        el.set_class_name(TRAIL_ITEM_CLASS);
        let src = TRAIL_IMAGES[item.image % TRAIL_IMAGES.len()];
        _ = el.set_attribute("src", src);
        _ = el.set_attribute("alt", "");
        let half = TRAIL_IMAGE_SIZE_PX * 0.5;
        let style = format!(
            "position:absolute;left:{}px;top:{}px;width:{s}px;height:{s}px;object-fit:cover;transition:opacity {}s ease-out",
            item.x - half,
            item.y - half,
            TRAIL_FADE_CSS_SEC,
            s = TRAIL_IMAGE_SIZE_PX,
        );
        _ = el.set_attribute("style", &style);
        self.container
            .append_child(&el)
            .map_err(|e| anyhow::anyhow!("append trail item: {e:?}"))?;
        Ok(el)
    }

    fn remove_node(&mut self, id: TrailId) {
        if let Some(el) = self.nodes.remove(&id) {
            el.remove();
        }
    }
}

impl Drop for TrailLayer {
    fn drop(&mut self) {
        for id in self.trail.clear() {
            self.remove_node(id);
        }
        self.container.remove();
    }
}
