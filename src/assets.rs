use crate::frame::Clock;
use crate::overlay::Overlay;
use crate::SharedGallery;
use gallery_core::{AssetError, TextureImage};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn network(e: wasm_bindgen::JsValue) -> AssetError {
    AssetError::Network(format!("{:?}", e))
}

/// Fetch and decode one image.
pub async fn fetch_image(url: &str) -> Result<TextureImage, AssetError> {
    let window = web::window().ok_or_else(|| AssetError::Network("no window".into()))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(network)?
        .dyn_into()
        .map_err(network)?;
    if !resp.ok() {
        return Err(AssetError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(network)?)
        .await
        .map_err(network)?;
    let bytes = js_sys::Uint8Array::new(&buf).to_vec();
    TextureImage::decode(&bytes)
}

/// Start every image fetch. Each settles into the gallery on its own; the
/// overlay follows the reported progress.
pub fn load_all(gallery: &SharedGallery, overlay: &Overlay, clock: Clock) {
    let urls = gallery.borrow().config().image_urls.clone();
    log::info!("[assets] fetching {} images", urls.len());
    for (index, url) in urls.into_iter().enumerate() {
        let gallery = gallery.clone();
        let overlay = overlay.clone();
        spawn_local(async move {
            let result = fetch_image(&url).await;
            if let Err(e) = &result {
                log::debug!("[assets] {url}: {e}");
            }
            let progress = {
                let mut g = gallery.borrow_mut();
                if g.is_torn_down() {
                    return;
                }
                g.on_asset_settled(index, result, clock.now())
            };
            overlay.show(progress);
        });
    }
}
