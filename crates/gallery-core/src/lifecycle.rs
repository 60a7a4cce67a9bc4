//! The mounted gallery: construction order, event entry points, the per-frame
//! step and teardown.
//!
//! One `Gallery` owns every component and the single [`SceneState`]; hosts
//! forward events into it and never touch the components directly. The
//! loaded flag lives in the asset tracker and gates all interaction.

use crate::assets::{AssetLoadTracker, LoadBatch, LoadProgress, TextureImage};
use crate::config::GalleryConfig;
use crate::error::{AssetError, InitError, SurfaceError};
use crate::frame::FrameDriver;
use crate::input::{command_for_code, InteractionController, KeyCommand, ResetTweens};
use crate::scene::{PanelTexture, SceneBuilder, SceneGraph};
use crate::sequence::{EntryPhase, EntrySequencer, IdleRotator};
use crate::state::{Camera, RingState, SceneState, ViewerState, Viewport};
use crate::tween::{Completion, Tweener};
use glam::{Mat4, Vec2};

/// Drawing backend capability.
pub trait RenderSurface {
    /// Create backend resources for the static scene. Called once at mount.
    fn build(&mut self, scene: &SceneGraph) -> Result<(), SurfaceError>;
    /// Attach decoded pixels to panel `panel`.
    fn upload_texture(&mut self, panel: usize, image: &TextureImage) -> Result<(), SurfaceError>;
    /// Never called with an empty viewport.
    fn resize(&mut self, viewport: Viewport);
    fn render(&mut self, scene: &SceneGraph, view: &FrameView) -> Result<(), SurfaceError>;
    /// Release backend resources. Called at most once.
    fn dispose(&mut self);
}

/// Per-frame transforms handed to the surface.
#[derive(Clone, Debug)]
pub struct FrameView {
    pub camera: Camera,
    pub ring: Mat4,
    pub particles: Mat4,
    pub stars: Mat4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Mounted,
    TornDown,
}

pub struct Gallery<S: RenderSurface> {
    config: GalleryConfig,
    graph: SceneGraph,
    state: SceneState,
    viewport: Viewport,
    tweens: Tweener,
    tracker: AssetLoadTracker,
    batch: LoadBatch,
    entry: EntrySequencer,
    idle: IdleRotator,
    input: InteractionController,
    driver: FrameDriver,
    surface: Option<S>,
    phase: Phase,
}

impl<S: RenderSurface> Gallery<S> {
    /// Build the scene on `surface`. Without a surface nothing is built.
    pub fn mount(
        surface: Option<S>,
        config: GalleryConfig,
        viewport: Viewport,
    ) -> Result<Self, InitError> {
        let mut surface = surface.ok_or(InitError::MissingSurface)?;
        let graph = SceneBuilder::new(&config).build();
        surface.build(&graph)?;
        if !viewport.is_empty() {
            surface.resize(viewport);
        }
        let total = config.image_count();
        let mut tracker = AssetLoadTracker::new();
        tracker.register(total);
        log::info!("[gallery] mounted with {total} images");
        Ok(Self {
            config,
            graph,
            state: SceneState::new(viewport),
            viewport,
            tweens: Tweener::new(),
            tracker,
            batch: LoadBatch::new(total),
            entry: EntrySequencer::new(),
            idle: IdleRotator::new(),
            input: InteractionController::new(),
            driver: FrameDriver::new(),
            surface: Some(surface),
            phase: Phase::Mounted,
        })
    }

    /// Start per-frame work. Call after input listeners are attached.
    pub fn start_frames(&mut self, now: f64) {
        if self.phase != Phase::Mounted {
            return;
        }
        self.driver.start(now);
        // nothing to fetch: the aggregate signal is already due
        if self.batch.take_completion() {
            self.finish_loading(now);
        }
    }

    /// Feed the outcome of fetching image `index`.
    pub fn on_asset_settled(
        &mut self,
        index: usize,
        result: Result<TextureImage, AssetError>,
        now: f64,
    ) -> LoadProgress {
        if self.phase != Phase::Mounted {
            return self.tracker.progress();
        }
        let ok = match result {
            Ok(image) => match self.upload(index, &image) {
                Ok(()) => {
                    self.tracker.on_item_loaded();
                    log::debug!("[assets] image {index} ready ({}x{})", image.width, image.height);
                    true
                }
                Err(e) => {
                    log::warn!("[assets] image {index} upload failed: {e}");
                    false
                }
            },
            Err(e) => {
                log::warn!("[assets] image {index} failed: {e}");
                false
            }
        };
        if !ok {
            self.graph.set_texture(index, PanelTexture::Fallback);
        }
        if let Some(status) = self.batch.settle(index, ok) {
            self.tracker.on_progress(status.fraction);
            if status.completed {
                self.finish_loading(now);
            }
        }
        self.tracker.progress()
    }

    fn upload(&mut self, index: usize, image: &TextureImage) -> Result<(), SurfaceError> {
        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| SurfaceError::Backend("surface released".into()))?;
        surface.upload_texture(index, image)?;
        self.graph.set_texture(index, PanelTexture::Ready);
        Ok(())
    }

    fn finish_loading(&mut self, now: f64) {
        if !self.tracker.on_all_loaded() {
            return;
        }
        log::info!(
            "[assets] all loaded ({} of {} failed)",
            self.batch.failed(),
            self.batch.total()
        );
        self.entry.start(&mut self.tweens, &self.state, now);
    }

    fn interactive(&self) -> bool {
        self.phase == Phase::Mounted && self.tracker.is_loaded()
    }

    pub fn on_pointer_down(&mut self, px: Vec2) {
        if !self.interactive() {
            return;
        }
        self.input.pointer_down(self.viewport.to_ndc(px));
    }

    pub fn on_pointer_move(&mut self, px: Vec2) -> bool {
        if !self.interactive() {
            return false;
        }
        let ndc = self.viewport.to_ndc(px);
        self.input.pointer_move(ndc, &mut self.state.ring)
    }

    pub fn on_pointer_up(&mut self) {
        if !self.interactive() {
            return;
        }
        self.input.pointer_up();
    }

    pub fn on_wheel(&mut self, delta_y: f64) -> bool {
        if !self.interactive() {
            return false;
        }
        self.input.wheel(delta_y, &mut self.state.viewer)
    }

    /// Handle a `KeyboardEvent.code`. Returns whether the key was consumed.
    pub fn on_key(&mut self, code: &str, now: f64) -> bool {
        if !self.interactive() {
            return false;
        }
        match command_for_code(code) {
            Some(KeyCommand::ResetView) => {
                self.reset_view(now);
                true
            }
            None => false,
        }
    }

    fn reset_view(&mut self, now: f64) -> ResetTweens {
        // one scripted driver per axis: a reset replaces the entry flight
        if self.entry.preempt(&mut self.tweens) {
            log::info!("[reset] entry sequence preempted");
            self.idle.start(&mut self.tweens, &self.state, now);
        }
        let started = self.input.reset(&mut self.tweens, &self.state, now);
        log::info!("[reset] returning to vantage point");
        started
    }

    /// Track the new viewport. Not gated on loading; empty sizes are skipped.
    pub fn on_resize(&mut self, viewport: Viewport) -> bool {
        if self.phase != Phase::Mounted {
            return false;
        }
        let Some(aspect) = viewport.aspect() else {
            log::debug!("[gallery] skipping resize to empty viewport");
            return false;
        };
        self.viewport = viewport;
        self.state.viewer.aspect = aspect;
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(viewport);
        }
        true
    }

    /// One display frame: tweens, completions, backdrop, then exactly one
    /// render. Returns `false` once the gallery has stopped.
    pub fn frame(&mut self, now: f64) -> bool {
        if self.phase != Phase::Mounted || !self.driver.is_running() {
            return false;
        }
        for completion in self.tweens.step(now, &mut self.state) {
            self.on_tween_complete(completion);
        }
        let loaded = self.tracker.is_loaded();
        if !self.driver.tick(now, loaded, &mut self.state.backdrop) {
            return false;
        }
        let view = self.frame_view();
        if let Some(surface) = self.surface.as_mut() {
            if let Err(e) = surface.render(&self.graph, &view) {
                log::error!("render error: {e}");
            }
        }
        true
    }

    /// Route a finished tween to whoever started it. Stale handles are ignored.
    pub fn on_tween_complete(&mut self, completion: Completion) {
        if self.phase != Phase::Mounted {
            return;
        }
        if self.entry.on_complete(completion.handle) {
            log::info!("[entry] finished at {:.3}s", completion.at);
            self.idle.start(&mut self.tweens, &self.state, completion.at);
        }
        self.input.on_complete(completion.handle, &self.tweens);
    }

    pub fn frame_view(&self) -> FrameView {
        FrameView {
            camera: self.state.viewer.camera(),
            ring: self.state.ring.model_matrix(),
            particles: self.state.backdrop.particle_matrix(),
            stars: self.state.backdrop.star_matrix(),
        }
    }

    /// Cancel every tween, stop the frame driver, run the host's `detach`
    /// (frame schedule and listeners), then release the surface. A second
    /// call does nothing and returns `false`.
    pub fn teardown(&mut self, detach: impl FnOnce()) -> bool {
        if self.phase == Phase::TornDown {
            return false;
        }
        self.phase = Phase::TornDown;
        self.entry.cancel(&mut self.tweens);
        self.idle.cancel(&mut self.tweens);
        self.input.clear(&mut self.tweens);
        let cancelled = self.tweens.cancel_all();
        self.driver.stop();
        detach();
        if let Some(mut surface) = self.surface.take() {
            surface.dispose();
        }
        log::info!("[gallery] torn down ({cancelled} stray tweens)");
        true
    }

    pub fn progress(&self) -> LoadProgress {
        self.tracker.progress()
    }

    pub fn is_loaded(&self) -> bool {
        self.tracker.is_loaded()
    }

    pub fn is_torn_down(&self) -> bool {
        self.phase == Phase::TornDown
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn viewer(&self) -> &ViewerState {
        &self.state.viewer
    }

    pub fn ring(&self) -> &RingState {
        &self.state.ring
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn tweens(&self) -> &Tweener {
        &self.tweens
    }

    pub fn entry_phase(&self) -> EntryPhase {
        self.entry.phase()
    }

    pub fn is_idle_rotating(&self) -> bool {
        self.idle.is_running(&self.tweens)
    }

    pub fn idle_handle(&self) -> Option<crate::tween::TweenHandle> {
        self.idle.handle()
    }

    pub fn reset_tweens(&self) -> Option<ResetTweens> {
        self.input.reset_tweens()
    }

    pub fn is_dragging(&self) -> bool {
        self.input.is_pressed()
    }

    pub fn is_frame_driver_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}
