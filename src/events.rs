use crate::dom;
use crate::frame::Clock;
use crate::SharedGallery;
use gallery_core::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Every DOM listener the gallery installed, so teardown can remove them.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Listener>,
}

impl Listeners {
    fn add(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if let Err(e) =
            target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::warn!("[events] failed to attach {kind}: {:?}", e);
            return;
        }
        self.entries.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
    }

    /// Remove every listener and drop its closure. Returns how many were removed.
    pub fn detach_all(&mut self) -> usize {
        let n = self.entries.len();
        for l in self.entries.drain(..) {
            _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref());
        }
        n
    }
}

pub fn attach(
    canvas: &web::HtmlCanvasElement,
    gallery: SharedGallery,
    clock: Clock,
) -> anyhow::Result<Listeners> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let mut listeners = Listeners::default();

    {
        let g = gallery.clone();
        let c = canvas.clone();
        listeners.add(canvas, "pointerdown", move |ev| {
            let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            // keep receiving moves and the release after leaving the canvas
            _ = c.set_pointer_capture(ev.pointer_id());
            g.borrow_mut()
                .on_pointer_down(dom::pointer_canvas_px(ev, &c));
        });
    }
    {
        let g = gallery.clone();
        let c = canvas.clone();
        listeners.add(canvas, "pointermove", move |ev| {
            if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
                g.borrow_mut()
                    .on_pointer_move(dom::pointer_canvas_px(ev, &c));
            }
        });
    }
    for kind in ["pointerup", "pointercancel"] {
        let g = gallery.clone();
        let c = canvas.clone();
        listeners.add(canvas, kind, move |ev| {
            if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
                _ = c.release_pointer_capture(ev.pointer_id());
            }
            g.borrow_mut().on_pointer_up();
        });
    }
    {
        let g = gallery.clone();
        listeners.add(canvas, "wheel", move |ev| {
            if let Some(ev) = ev.dyn_ref::<web::WheelEvent>() {
                if g.borrow_mut().on_wheel(ev.delta_y()) {
                    ev.prevent_default();
                }
            }
        });
    }
    {
        let g = gallery.clone();
        listeners.add(&document, "keydown", move |ev| {
            if let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() {
                if g.borrow_mut().on_key(&ev.code(), clock.now()) {
                    ev.prevent_default();
                }
            }
        });
    }
    {
        let g = gallery;
        let c = canvas.clone();
        listeners.add(&window, "resize", move |_| {
            let viewport: Viewport = dom::sync_canvas_backing_size(&c);
            g.borrow_mut().on_resize(viewport);
        });
    }
    log::debug!("[events] {} listeners attached", listeners.entries.len());
    Ok(listeners)
}
