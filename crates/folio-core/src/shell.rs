//! Static page layout.
//!
//! The shell is rendered once into the mount point as markup; everything
//! animated afterwards is looked up by the ids in [`ids`].

use std::fmt::Write as _;

pub mod ids {
    pub const BACKGROUND_VIDEO: &str = "background-video";
    pub const BRAND: &str = "navbar-brand";
    pub const TICKER: &str = "ticker";
    pub const HERO_TITLE: &str = "hero-title";
    pub const HERO_SUBTITLE: &str = "hero-subtitle";
    pub const CTA: &str = "cta-button";
    pub const VIEWER: &str = "viewer";
    pub const VIEWER_CANVAS: &str = "viewer-canvas";
    pub const VIEWER_FALLBACK: &str = "viewer-fallback";
    pub const CURSOR_OVERLAY: &str = "cursor-overlay";
}

/// Class carried by every work card; hovering one shows the cursor overlay.
pub const WORK_CARD_CLASS: &str = "work-card";

#[derive(Clone, Debug, PartialEq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorkCard {
    pub title: String,
    pub blurb: String,
    /// Shown under the cursor while the card is hovered.
    pub preview: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageContent {
    pub brand: String,
    pub nav: Vec<NavLink>,
    pub ticker: String,
    /// Copies of `ticker` laid end to end so the loop never shows a gap.
    pub ticker_repeats: usize,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub cta_label: String,
    pub cta_href: String,
    pub background_video: String,
    pub works: Vec<WorkCard>,
    pub about: String,
    pub contact_email: String,
}

fn link(label: &str, href: &str) -> NavLink {
    NavLink {
        label: label.to_string(),
        href: href.to_string(),
    }
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            brand: "Samuil".to_string(),
            nav: vec![
                link("Home", "#"),
                link("Work", "#work"),
                link("About", "#about"),
                link("Contact", "#contact"),
            ],
            ticker: "•GOOD JOB TRYING GOOD JOB WINNING GOOD JOB FAILING•".to_string(),
            ticker_repeats: 2,
            hero_title: "Hi, I'm Samuil Dimov".to_string(),
            hero_subtitle: "Creative Developer & Visual Storyteller".to_string(),
            cta_label: "View My Work".to_string(),
            cta_href: "#work".to_string(),
            background_video: "/background.mp4".to_string(),
            works: vec![
                WorkCard {
                    title: "Thrasher Cards".to_string(),
                    blurb: "A textured FBX model spinning in WebGPU.".to_string(),
                    preview: "/previews/thrashercards.png".to_string(),
                },
                WorkCard {
                    title: "Motion Studies".to_string(),
                    blurb: "Letter waves, magnetic buttons and a cursor trail.".to_string(),
                    preview: "/previews/motion.png".to_string(),
                },
            ],
            about: "Write something personal and professional about yourself here.".to_string(),
            contact_email: "you@example.com".to_string(),
        }
    }
}

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(content: &PageContent) -> String {
    let e = escape;
    let mut html = String::new();
    _ = write!(
        html,
        r#"<div class="app-container"><video id="{video_id}" class="background-video" autoplay muted loop playsinline src="{video}"></video>"#,
        video_id = ids::BACKGROUND_VIDEO,
        video = e(&content.background_video),
    );

    _ = write!(
        html,
        r#"<nav class="navbar"><div class="navbar-container"><div id="{id}" class="navbar-brand">{brand}</div><ul class="navbar-links">"#,
        id = ids::BRAND,
        brand = e(&content.brand),
    );
    for l in &content.nav {
        _ = write!(html, r#"<li><a href="{}">{}</a></li>"#, e(&l.href), e(&l.label));
    }
    html.push_str("</ul></div></nav>");

    _ = write!(
        html,
        r#"<div class="ticker-wrapper"><div id="{}" class="ticker">"#,
        ids::TICKER
    );
    for _ in 0..content.ticker_repeats.max(1) {
        _ = write!(html, "<strong>{}</strong>", e(&content.ticker));
    }
    html.push_str("</div></div>");

    _ = write!(
        html,
        r#"<div class="content-container"><section class="hero-section"><h1 id="{tid}" class="hero-title">{title}</h1><p id="{sid}" class="hero-subtitle">{subtitle}</p><a id="{cid}" href="{href}" class="cta-button">{cta}</a></section>"#,
        tid = ids::HERO_TITLE,
        title = e(&content.hero_title),
        sid = ids::HERO_SUBTITLE,
        subtitle = e(&content.hero_subtitle),
        cid = ids::CTA,
        href = e(&content.cta_href),
        cta = e(&content.cta_label),
    );

    _ = write!(
        html,
        r#"<section id="viewer-section" class="section"><div id="{vid}" class="viewer"><canvas id="{cid}"></canvas><div id="{fid}" class="viewer-fallback" style="display:none">Model unavailable</div></div></section>"#,
        vid = ids::VIEWER,
        cid = ids::VIEWER_CANVAS,
        fid = ids::VIEWER_FALLBACK,
    );

    html.push_str(r#"<section id="work" class="section"><h2>Selected Work</h2><div class="work-grid">"#);
    for w in &content.works {
        _ = write!(
            html,
            r#"<article class="{class}" data-preview="{preview}"><h3>{title}</h3><p>{blurb}</p></article>"#,
            class = WORK_CARD_CLASS,
            preview = e(&w.preview),
            title = e(&w.title),
            blurb = e(&w.blurb),
        );
    }
    html.push_str("</div></section>");

    _ = write!(
        html,
        r#"<section id="about" class="section"><h2>About Me</h2><p>{}</p></section>"#,
        e(&content.about)
    );
    _ = write!(
        html,
        r#"<section id="contact" class="section"><h2>Contact</h2><p>Drop me a line at <a href="mailto:{mail}">{mail}</a></p></section></div>"#,
        mail = e(&content.contact_email),
    );

    _ = write!(
        html,
        r#"<img id="{}" class="cursor-overlay" alt="" style="opacity:0"></div>"#,
        ids::CURSOR_OVERLAY
    );
    html
}
