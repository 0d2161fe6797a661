use anyhow::{anyhow, Context};
use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Decoded RGBA8 image, rows top to bottom.
pub struct Rgba {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Start a GET request. The download begins immediately; await the
/// returned future to get the response.
pub fn request(url: &str) -> anyhow::Result<JsFuture> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let init = web::RequestInit::new();
    init.set_method("GET");
    init.set_mode(web::RequestMode::SameOrigin);
    let req = web::Request::new_with_str_and_init(url, &init)
        .map_err(|e| anyhow!("request {url}: {e:?}"))?;
    Ok(JsFuture::from(window.fetch_with_request(&req)))
}

async fn ok_response(pending: JsFuture, url: &str) -> anyhow::Result<web::Response> {
    let resp: web::Response = pending
        .await
        .map_err(|e| anyhow!("fetch {url}: {e:?}"))?
        .dyn_into()
        .map_err(|_| anyhow!("fetch {url}: not a Response"))?;
    if !resp.ok() {
        return Err(anyhow!("fetch {url}: HTTP {}", resp.status()));
    }
    Ok(resp)
}

pub async fn bytes(pending: JsFuture, url: &str) -> anyhow::Result<Vec<u8>> {
    let resp = ok_response(pending, url).await?;
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| anyhow!("{e:?}"))?)
        .await
        .map_err(|e| anyhow!("read {url}: {e:?}"))?;
    Ok(Uint8Array::new(&buf).to_vec())
}

/// Decode an image response through the browser: blob, `ImageBitmap`, then
/// a scratch 2D canvas to read the pixels back.
pub async fn rgba(pending: JsFuture, url: &str) -> anyhow::Result<Rgba> {
    let resp = ok_response(pending, url).await?;
    let blob: web::Blob = JsFuture::from(resp.blob().map_err(|e| anyhow!("{e:?}"))?)
        .await
        .map_err(|e| anyhow!("read {url}: {e:?}"))?
        .dyn_into()
        .map_err(|_| anyhow!("{url}: not a Blob"))?;
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let bitmap: web::ImageBitmap = JsFuture::from(
        window
            .create_image_bitmap_with_blob(&blob)
            .map_err(|e| anyhow!("{e:?}"))?,
    )
    .await
    .map_err(|e| anyhow!("decode {url}: {e:?}"))?
    .dyn_into()
    .map_err(|_| anyhow!("{url}: not an ImageBitmap"))?;

    let (width, height) = (bitmap.width(), bitmap.height());
    if width == 0 || height == 0 {
        return Err(anyhow!("{url}: empty image"));
    }
    let document = window.document().context("no document")?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{e:?}"))?
        .dyn_into()
        .map_err(|_| anyhow!("canvas element"))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("{e:?}"))?
        .ok_or_else(|| anyhow!("2d context unavailable"))?
        .dyn_into()
        .map_err(|_| anyhow!("2d context type"))?;
    ctx.draw_image_with_image_bitmap(&bitmap, 0.0, 0.0)
        .map_err(|e| anyhow!("draw {url}: {e:?}"))?;
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(|e| anyhow!("read pixels {url}: {e:?}"))?;
    bitmap.close();
    Ok(Rgba {
        width,
        height,
        pixels: data.data().0,
    })
}
