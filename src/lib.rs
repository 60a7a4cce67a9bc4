#![cfg(target_arch = "wasm32")]
//! Browser front-end: mounts the gallery on a WebGPU canvas, wires DOM input
//! and the frame loop into [`gallery_core::Gallery`], and fetches the images.

use gallery_core::Gallery;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod assets;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

pub(crate) type SharedGallery = Rc<RefCell<Gallery<render::WebSurface>>>;

/// Everything owned by one mounted gallery.
struct Mount {
    gallery: SharedGallery,
    listeners: events::Listeners,
    frames: frame::FrameLoop,
    overlay: overlay::Overlay,
}

impl Mount {
    fn teardown(mut self) {
        let frames = &self.frames;
        let listeners = &mut self.listeners;
        let first = self.gallery.borrow_mut().teardown(|| {
            frames.cancel();
            let n = listeners.detach_all();
            log::debug!("[events] {n} listeners removed");
        });
        if first {
            self.overlay.remove();
        }
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<Mount>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("orbit-gallery starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Tear the gallery down: stop frames, detach listeners, release the GPU
/// surface and remove the canvas and overlays. Safe to call more than once.
#[wasm_bindgen]
pub fn unmount() {
    if let Some(mount) = MOUNTED.with(|m| m.borrow_mut().take()) {
        mount.teardown();
    }
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let root = dom::mount_root(&document)
        .ok_or_else(|| anyhow::anyhow!("missing #{} and <body>", dom::MOUNT_ID))?;
    let config = dom::read_config(&root);

    let canvas = dom::create_canvas(&document, &root)?;
    let overlay = overlay::Overlay::create(&document, &root)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let viewport = dom::sync_canvas_backing_size(&canvas);

    let surface = match render::WebSurface::new(canvas.clone()).await {
        Ok(s) => Some(s),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    };
    let gallery = match Gallery::mount(surface, config, viewport) {
        Ok(g) => g,
        Err(e) => {
            canvas.remove();
            overlay.remove();
            return Err(e.into());
        }
    };
    let gallery: SharedGallery = Rc::new(RefCell::new(gallery));
    let clock = frame::Clock::start();

    // listeners before the frame driver, then the fetches
    let listeners = events::attach(&canvas, gallery.clone(), clock)?;
    let progress = {
        let mut g = gallery.borrow_mut();
        g.start_frames(clock.now());
        g.progress()
    };
    overlay.show(progress);
    let frames = frame::FrameLoop::start(gallery.clone(), clock);
    assets::load_all(&gallery, &overlay, clock);

    // a second start replaces the first mount
    let previous = MOUNTED.with(|m| {
        m.borrow_mut().replace(Mount {
            gallery,
            listeners,
            frames,
            overlay,
        })
    });
    if let Some(old) = previous {
        old.teardown();
    }
    Ok(())
}
