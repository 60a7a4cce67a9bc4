// Loading screen and controls hint, driven by `LoadProgress`.

use gallery_core::LoadProgress;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const LOADING_TITLE: &str = "Loading Gallery...";
pub const CONTROLS_TITLE: &str = "Controls:";
pub const CONTROL_HINTS: [&str; 3] = [
    "Drag: Rotate view",
    "Scroll: Zoom in/out",
    "Space: Reset view",
];

const LOADING_STYLE: &str = "position:fixed;inset:0;display:flex;flex-direction:column;\
justify-content:center;align-items:center;z-index:50;\
background:linear-gradient(135deg,#6366f1,#9333ea);font-family:system-ui,sans-serif;";
const TITLE_STYLE: &str = "color:#fff;font-size:24px;font-weight:600;margin-bottom:20px;";
const TRACK_STYLE: &str = "width:320px;height:6px;border-radius:9999px;overflow:hidden;\
background:rgba(255,255,255,0.2);margin-bottom:10px;";
const BAR_STYLE: &str = "height:100%;width:0%;transition:width 300ms;\
background:linear-gradient(90deg,#f87171,#2dd4bf);";
const LABEL_STYLE: &str = "color:rgba(255,255,255,0.8);font-size:14px;";
const CONTROLS_STYLE: &str = "position:fixed;bottom:20px;left:20px;padding:16px;\
border-radius:8px;font:14px/1.6 system-ui,sans-serif;color:#fff;\
background:rgba(0,0,0,0.7);border:1px solid rgba(255,255,255,0.1);";

/// Percentage label, rounded to a whole number.
#[inline]
pub fn progress_label(percent: f32) -> String {
    format!("{}%", clamp_percent(percent).round() as u32)
}

/// CSS width of the progress bar.
#[inline]
pub fn bar_width(percent: f32) -> String {
    format!("{:.1}%", clamp_percent(percent))
}

fn clamp_percent(percent: f32) -> f32 {
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Which panel the page should show for a given load state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayView {
    Loading,
    Controls,
}

#[inline]
pub fn view_for(progress: LoadProgress) -> OverlayView {
    if progress.loaded {
        OverlayView::Controls
    } else {
        OverlayView::Loading
    }
}

fn styled_div(
    document: &web::Document,
    style: &str,
    text: Option<&str>,
) -> Result<web::HtmlElement, wasm_bindgen::JsValue> {
    let el = document.create_element("div")?;
    el.set_attribute("style", style)?;
    el.set_text_content(text);
    el.dyn_into::<web::HtmlElement>()
        .map_err(wasm_bindgen::JsValue::from)
}

/// DOM handles for the loading screen and the controls hint.
#[derive(Clone)]
pub struct Overlay {
    loading: web::HtmlElement,
    bar: web::HtmlElement,
    label: web::HtmlElement,
    controls: web::HtmlElement,
}

impl Overlay {
    pub fn create(
        document: &web::Document,
        root: &web::Element,
    ) -> Result<Self, wasm_bindgen::JsValue> {
        let loading = styled_div(document, LOADING_STYLE, None)?;
        let title = styled_div(document, TITLE_STYLE, Some(LOADING_TITLE))?;
        loading.append_child(&title)?;
        let track = styled_div(document, TRACK_STYLE, None)?;
        let bar = styled_div(document, BAR_STYLE, None)?;
        track.append_child(&bar)?;
        loading.append_child(&track)?;
        let label = styled_div(document, LABEL_STYLE, Some(&progress_label(0.0)))?;
        loading.append_child(&label)?;

        let controls = styled_div(document, CONTROLS_STYLE, None)?;
        let controls_title = styled_div(
            document,
            "font-weight:700;margin-bottom:8px;",
            Some(CONTROLS_TITLE),
        )?;
        controls.append_child(&controls_title)?;
        for hint in CONTROL_HINTS {
            let hint_el = styled_div(document, "", Some(hint))?;
            controls.append_child(&hint_el)?;
        }
        controls.set_hidden(true);

        root.append_child(&loading)?;
        root.append_child(&controls)?;
        Ok(Self {
            loading,
            bar,
            label,
            controls,
        })
    }

    pub fn show(&self, progress: LoadProgress) {
        match view_for(progress) {
            OverlayView::Loading => {
                _ = self
                    .bar
                    .style()
                    .set_property("width", &bar_width(progress.percent));
                self.label
                    .set_text_content(Some(&progress_label(progress.percent)));
            }
            OverlayView::Controls => {
                self.loading.set_hidden(true);
                self.controls.set_hidden(false);
            }
        }
    }

    pub fn remove(&self) {
        self.loading.remove();
        self.controls.remove();
    }
}
