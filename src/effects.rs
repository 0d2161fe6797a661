use crate::dom;
use fnv::FnvHashMap;
use folio_core::{Animator, TargetId, Transform};
use web_sys as web;

/// Maps animator targets to the DOM nodes they drive.
#[derive(Default)]
pub struct TargetMap {
    elements: FnvHashMap<TargetId, web::HtmlElement>,
    next: u32,
}

impl TargetMap {
    pub fn register(&mut self, anim: &mut Animator, el: web::HtmlElement) -> TargetId {
        let id = TargetId(self.next);
        self.next += 1;
        anim.register(id);
        self.elements.insert(id, el);
        id
    }

    /// Register the element with `id` if it exists.
    pub fn register_id(
        &mut self,
        anim: &mut Animator,
        document: &web::Document,
        id: &str,
    ) -> Option<TargetId> {
        dom::html_by_id(document, id).map(|el| self.register(anim, el))
    }

    /// Write the rendered transform of every dirty target to its node.
    pub fn apply(&self, anim: &Animator, dirty: &[TargetId]) {
        for &id in dirty {
            if let (Some(el), Some(t)) = (self.elements.get(&id), anim.transform(id)) {
                write_transform(el, &t);
            }
        }
    }

    /// Reset every node's inline transform and forget them all.
    pub fn clear(&mut self, anim: &mut Animator) {
        for (id, el) in self.elements.drain() {
            anim.remove_target(id);
            _ = el.style().remove_property("transform");
            _ = el.style().remove_property("opacity");
        }
    }
}

fn write_transform(el: &web::HtmlElement, t: &Transform) {
    dom::set_style(el, "transform", &t.to_css());
    dom::set_style(el, "opacity", &t.opacity.to_string());
}
