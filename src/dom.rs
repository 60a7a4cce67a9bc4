use gallery_core::{GalleryConfig, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Element the gallery mounts into; falls back to `<body>`.
pub const MOUNT_ID: &str = "gallery-root";
/// Optional whitespace-separated image URL list on the mount element.
pub const IMAGES_ATTR: &str = "data-images";

const CANVAS_STYLE: &str = "display:block;width:100%;height:100%;touch-action:none;";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn mount_root(document: &web::Document) -> Option<web::Element> {
    document
        .get_element_by_id(MOUNT_ID)
        .or_else(|| document.body().map(Into::into))
}

/// Default config, with the image list taken from the mount element when present.
pub fn read_config(root: &web::Element) -> GalleryConfig {
    match root.get_attribute(IMAGES_ATTR) {
        Some(list) if !list.trim().is_empty() => {
            GalleryConfig::with_images(list.split_whitespace())
        }
        _ => GalleryConfig::default(),
    }
}

pub fn create_canvas(
    document: &web::Document,
    root: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    canvas
        .set_attribute("style", CANVAS_STYLE)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    root.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    sync_canvas_backing_size(&canvas);
    Ok(canvas)
}

/// Match the canvas backing store to its CSS size times the device pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Viewport {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
        // a hidden or collapsed canvas reports an empty viewport
        return Viewport::new(w_px, h_px);
    }
    Viewport::default()
}

/// Pointer position in canvas CSS pixels scaled to the backing store.
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> glam::Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = rect.width().max(1.0) as f32;
    let h = rect.height().max(1.0) as f32;
    glam::Vec2::new(
        x_css / w * canvas.width() as f32,
        y_css / h * canvas.height() as f32,
    )
}
