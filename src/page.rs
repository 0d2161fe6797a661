use crate::constants::APP_ROOT_ID;
use crate::dom;
use crate::effects::TargetMap;
use crate::letters::SplitHeading;
use crate::overlay::OverlayView;
use crate::trail::TrailLayer;
use folio_core::effects::{self, Marquee};
use folio_core::shell::{self, ids, PageContent};
use folio_core::{Animator, TargetId};
use instant::Instant;
use web_sys as web;

/// Everything on the page that animates, keyed for the frame loop and the
/// event handlers.
pub struct Page {
    clock: Instant,
    pub anim: Animator,
    pub targets: TargetMap,
    pub title: Option<SplitHeading>,
    pub cta: Option<TargetId>,
    pub brand: Option<TargetId>,
    pub video: Option<TargetId>,
    pub trail: Option<TrailLayer>,
    pub overlay: OverlayView,
}

impl Page {
    /// Render the page into `#app`, register its animated nodes and start
    /// the entrance and marquee.
    pub fn mount(document: &web::Document, content: &PageContent) -> anyhow::Result<Self> {
        let root = dom::html_by_id(document, APP_ROOT_ID)
            .ok_or_else(|| anyhow::anyhow!("missing #{APP_ROOT_ID}"))?;
        root.set_inner_html(&shell::render(content));

        let mut anim = Animator::new();
        let mut targets = TargetMap::default();

        let title = match dom::html_by_id(document, ids::HERO_TITLE) {
            Some(h) => Some(SplitHeading::mount(document, &h, &mut anim, &mut targets)?),
            None => None,
        };
        let hero = targets.register_id(&mut anim, document, ids::HERO_TITLE);
        let subtitle = targets.register_id(&mut anim, document, ids::HERO_SUBTITLE);
        let cta = targets.register_id(&mut anim, document, ids::CTA);
        let entrance: Vec<TargetId> = [hero, subtitle, cta].into_iter().flatten().collect();
        let brand = targets.register_id(&mut anim, document, ids::BRAND);
        let video = targets.register_id(&mut anim, document, ids::BACKGROUND_VIDEO);
        let ticker = targets.register_id(&mut anim, document, ids::TICKER);

        let trail = match TrailLayer::mount(document) {
            Ok(t) => Some(t),
            Err(e) => {
                log::warn!("[trail] disabled: {e:#}");
                None
            }
        };
        let overlay = OverlayView::new(dom::html_by_id(document, ids::CURSOR_OVERLAY));

        let mut page = Self {
            clock: Instant::now(),
            anim,
            targets,
            title,
            cta,
            brand,
            video,
            trail,
            overlay,
        };
        let now = page.now();
        effects::play_entrance(&mut page.anim, &entrance, now);
        if let Some(t) = ticker {
            Marquee::for_copies(content.ticker_repeats).start(&mut page.anim, t, now);
        }
        log::info!(
            "[page] mounted targets={} entrance={}",
            page.anim.len(),
            entrance.len()
        );
        Ok(page)
    }

    /// Seconds since mount.
    pub fn now(&self) -> f64 {
        self.clock.elapsed().as_secs_f64()
    }

    pub fn tick(&mut self) {
        let now = self.now();
        let dirty = self.anim.tick(now);
        self.targets.apply(&self.anim, &dirty);
        if let Some(trail) = &mut self.trail {
            trail.tick(now);
        }
    }

    pub fn unmount(&mut self) {
        self.targets.clear(&mut self.anim);
        // dropping the layer removes its container and every item
        self.trail = None;
        self.overlay.hide();
        log::info!("[page] unmounted");
    }
}
