use crate::SharedGallery;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Seconds since mount on a monotonic clock.
#[derive(Clone, Copy)]
pub struct Clock {
    epoch: Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }
}

#[derive(Default)]
struct LoopState {
    raf_id: Option<i32>,
    tick: Option<Closure<dyn FnMut()>>,
}

/// `requestAnimationFrame` loop feeding [`gallery_core::Gallery::frame`].
///
/// The tick closure owns a handle to the loop state so it can reschedule
/// itself; [`FrameLoop::cancel`] breaks that cycle.
pub struct FrameLoop {
    state: Rc<RefCell<LoopState>>,
}

fn request(state: &Rc<RefCell<LoopState>>) {
    let id = {
        let st = state.borrow();
        let (Some(window), Some(tick)) = (web::window(), st.tick.as_ref()) else {
            return;
        };
        window
            .request_animation_frame(tick.as_ref().unchecked_ref())
            .ok()
    };
    state.borrow_mut().raf_id = id;
}

impl FrameLoop {
    pub fn start(gallery: SharedGallery, clock: Clock) -> Self {
        let state = Rc::new(RefCell::new(LoopState::default()));
        let state_tick = state.clone();
        let tick = Closure::wrap(Box::new(move || {
            state_tick.borrow_mut().raf_id = None;
            let running = gallery.borrow_mut().frame(clock.now());
            if running {
                request(&state_tick);
            }
        }) as Box<dyn FnMut()>);
        state.borrow_mut().tick = Some(tick);
        request(&state);
        Self { state }
    }

    /// Cancel the pending frame and release the tick closure.
    pub fn cancel(&self) {
        let mut st = self.state.borrow_mut();
        if let Some(id) = st.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        st.tick = None;
    }
}
