// Shared fixtures for the host-side gallery tests.

#![allow(dead_code)]

use gallery_core::*;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

/// What the mock surface was asked to do, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    Build { panels: usize },
    Upload { panel: usize },
    Resize(Viewport),
    Render,
    Dispose,
}

/// Render surface that records calls into a shared log.
#[derive(Clone, Default)]
pub struct MockSurface {
    pub calls: Rc<RefCell<Vec<SurfaceCall>>>,
    pub fail_uploads: bool,
}

impl MockSurface {
    pub fn log(&self) -> Rc<RefCell<Vec<SurfaceCall>>> {
        self.calls.clone()
    }
}

impl RenderSurface for MockSurface {
    fn build(&mut self, scene: &SceneGraph) -> Result<(), SurfaceError> {
        self.calls.borrow_mut().push(SurfaceCall::Build {
            panels: scene.panel_count(),
        });
        Ok(())
    }

    fn upload_texture(&mut self, panel: usize, _image: &TextureImage) -> Result<(), SurfaceError> {
        if self.fail_uploads {
            return Err(SurfaceError::OutOfMemory);
        }
        self.calls.borrow_mut().push(SurfaceCall::Upload { panel });
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.calls.borrow_mut().push(SurfaceCall::Resize(viewport));
    }

    fn render(&mut self, _scene: &SceneGraph, _view: &FrameView) -> Result<(), SurfaceError> {
        self.calls.borrow_mut().push(SurfaceCall::Render);
        Ok(())
    }

    fn dispose(&mut self) {
        self.calls.borrow_mut().push(SurfaceCall::Dispose);
    }
}

pub const VIEWPORT: Viewport = Viewport {
    width: 1000,
    height: 1000,
};

pub fn small_config(images: usize) -> GalleryConfig {
    GalleryConfig {
        image_urls: (0..images).map(|i| format!("img-{i}.png")).collect(),
        seed: 7,
        star_count: 16,
        particle_count: 8,
        ring_radius: gallery_core::constants::RING_RADIUS,
    }
}

pub fn pixel() -> TextureImage {
    TextureImage {
        width: 1,
        height: 1,
        rgba: vec![255, 255, 255, 255],
    }
}

pub fn mount(images: usize) -> (Gallery<MockSurface>, Rc<RefCell<Vec<SurfaceCall>>>) {
    let surface = MockSurface::default();
    let log = surface.log();
    let mut gallery =
        Gallery::mount(Some(surface), small_config(images), VIEWPORT).expect("mount");
    gallery.start_frames(0.0);
    (gallery, log)
}

/// Settle every image successfully at `now`.
pub fn load_all(gallery: &mut Gallery<MockSurface>, now: f64) {
    for i in 0..gallery.config().image_count() {
        gallery.on_asset_settled(i, Ok(pixel()), now);
    }
}

/// Mounted, loaded, entry finished and idle rotation running.
pub fn settled_gallery() -> Gallery<MockSurface> {
    let (mut g, _) = mount(4);
    load_all(&mut g, 0.0);
    let mut t = 0.0;
    while t <= 6.1 {
        g.frame(t);
        t += 1.0 / 60.0;
    }
    g
}

/// Pixel position for a point in normalized device coordinates.
pub fn px(ndc_x: f32, ndc_y: f32) -> Vec2 {
    let w = VIEWPORT.width as f32;
    let h = VIEWPORT.height as f32;
    Vec2::new((ndc_x + 1.0) / 2.0 * w, (1.0 - ndc_y) / 2.0 * h)
}

pub fn run_frames(gallery: &mut Gallery<MockSurface>, from: f64, to: f64) {
    let mut t = from;
    while t <= to {
        gallery.frame(t);
        t += 1.0 / 60.0;
    }
}
