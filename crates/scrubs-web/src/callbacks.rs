use js_sys::{Function, Reflect};
use scrubs::ScrubEvent;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

/// The optional `onInit`/`onStart`/`onScrub`/`onComplete` functions a page
/// passes at bind time. Missing or non-function entries are skipped.
#[derive(Debug, Default, Clone)]
pub struct JsCallbacks {
    on_init: Option<Function>,
    on_start: Option<Function>,
    on_scrub: Option<Function>,
    on_complete: Option<Function>,
}

impl JsCallbacks {
    pub fn from_js(value: &JsValue) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        Self {
            on_init: lookup(value, "onInit"),
            on_start: lookup(value, "onStart"),
            on_scrub: lookup(value, "onScrub"),
            on_complete: lookup(value, "onComplete"),
        }
    }

    /// Invoke the callback for `event` with the container as `this`.
    /// A throwing callback is logged and does not affect the scrubber.
    pub fn dispatch(&self, container: &HtmlElement, event: ScrubEvent) {
        let (callback, percent) = match event {
            ScrubEvent::Init => (&self.on_init, None),
            ScrubEvent::Start(p) => (&self.on_start, Some(p)),
            ScrubEvent::Scrub(p) => (&self.on_scrub, Some(p)),
            ScrubEvent::Complete(p) => (&self.on_complete, Some(p)),
        };
        let Some(callback) = callback else {
            return;
        };
        let result = match percent {
            Some(p) => callback.call1(container, &JsValue::from_f64(p)),
            None => callback.call0(container),
        };
        if let Err(err) = result {
            log::error!("scrubs: {:?} callback threw: {:?}", event, err);
        }
    }
}

fn lookup(object: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(object, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}
