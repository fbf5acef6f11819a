//! Browser bindings for Scrubs.
//!
//! Each bound container gets a [`runner::WebScrubber`] held in a
//! thread-local registry. JavaScript addresses instances by the numeric id
//! returned from `scrubs_bind`.

pub mod callbacks;
pub mod dom;
pub mod runner;

use std::cell::RefCell;
use std::rc::Rc;

use scrubs::{InstanceId, InstanceRegistry, ScrubsError, ScrubsOptions};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub use callbacks::JsCallbacks;
pub use runner::{Shared, WebScrubber};

/// Attribute recording which instance owns a container.
const ID_ATTRIBUTE: &str = "data-scrubs-id";

thread_local! {
    static REGISTRY: RefCell<InstanceRegistry<WebScrubber>> = RefCell::new(InstanceRegistry::new());
}

fn to_js(err: ScrubsError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Look up an instance and release the registry before touching it.
fn lookup(id: u32) -> Result<Rc<Shared>, ScrubsError> {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .get(InstanceId(id))
            .map(WebScrubber::shared)
    })
}

fn with_instance<R>(
    id: u32,
    op: impl FnOnce(&mut runner::DomScrubber) -> scrubs::Result<R>,
) -> Result<R, JsValue> {
    lookup(id).and_then(|shared| shared.run(op)).map_err(to_js)
}

/// Install console logging and the panic hook. `level` is a `log` level name
/// (`"error"` .. `"trace"`); anything else means info.
#[wasm_bindgen]
pub fn scrubs_init(level: Option<String>) {
    console_error_panic_hook::set_once();
    let level = level
        .as_deref()
        .and_then(|name| name.parse::<log::Level>().ok())
        .unwrap_or(log::Level::Info);
    let _ = console_log::init_with_level(level);
    log::info!("scrubs: initialized");
}

/// Turn `element` into a scrubber. Binding an element twice returns the
/// existing id.
#[wasm_bindgen]
pub fn scrubs_bind(
    element: HtmlElement,
    options_json: Option<String>,
    callbacks: JsValue,
) -> Result<u32, JsValue> {
    bind(element, options_json.as_deref().unwrap_or(""), &callbacks)
        .map(|id| id.0)
        .map_err(to_js)
}

fn bind(
    element: HtmlElement,
    options_json: &str,
    callbacks: &JsValue,
) -> scrubs::Result<InstanceId> {
    let has_markup = element.class_list().contains(dom::SCRUBBER_CLASS);
    if let Some(id) = existing_binding(bound_id(&element), has_markup)? {
        log::debug!("scrubs {}: already bound", id);
        return Ok(id);
    }

    let options = ScrubsOptions::from_json(options_json)?;
    let document = element
        .owner_document()
        .ok_or_else(|| ScrubsError::Dom("element is not in a document".into()))?;
    let capabilities = dom::capabilities(&document);
    let surface = dom::build_structure(&element, &options, &capabilities)?;

    let id = REGISTRY.with(|registry| registry.borrow_mut().allocate_id());
    element
        .set_attribute(ID_ATTRIBUTE, &id.0.to_string())
        .map_err(dom::dom_error)?;

    let web = WebScrubber::new(
        id,
        element,
        options,
        capabilities,
        surface,
        JsCallbacks::from_js(callbacks),
    );
    let shared = web.shared();
    REGISTRY.with(|registry| registry.borrow_mut().insert(id, web));

    // Deliver Init now that the registry is released.
    shared.run(|_| Ok(()))?;
    Ok(id)
}

/// A live id is reused. Markup left behind by a destroyed instance cannot be
/// rebuilt, since its placeholder clone would be taken for the before image.
fn existing_binding(
    live: Option<InstanceId>,
    has_markup: bool,
) -> scrubs::Result<Option<InstanceId>> {
    match (live, has_markup) {
        (Some(id), _) => Ok(Some(id)),
        (None, true) => Err(ScrubsError::AlreadyBuilt),
        (None, false) => Ok(None),
    }
}

fn bound_id(element: &HtmlElement) -> Option<InstanceId> {
    let id = element.get_attribute(ID_ATTRIBUTE)?.parse().ok().map(InstanceId)?;
    REGISTRY
        .with(|registry| registry.borrow().contains(id))
        .then_some(id)
}

/// Move to `percent`. `sticky` keeps the position for this call.
#[wasm_bindgen]
pub fn scrubs_scrub(id: u32, percent: f64, sticky: Option<bool>) -> Result<(), JsValue> {
    with_instance(id, |s| s.scrub(percent, sticky.unwrap_or(false)))
}

#[wasm_bindgen]
pub fn scrubs_reset(id: u32) -> Result<(), JsValue> {
    with_instance(id, |s| s.reset())
}

#[wasm_bindgen]
pub fn scrubs_start(id: u32) -> Result<(), JsValue> {
    with_instance(id, |s| s.start())
}

#[wasm_bindgen]
pub fn scrubs_end(id: u32) -> Result<(), JsValue> {
    with_instance(id, |s| s.end())
}

#[wasm_bindgen]
pub fn scrubs_percent(id: u32) -> Result<f64, JsValue> {
    with_instance(id, |s| s.percent())
}

/// Detach listeners, cancel pending frames and forget the instance.
/// The generated markup stays in place.
#[wasm_bindgen]
pub fn scrubs_destroy(id: u32) -> Result<(), JsValue> {
    let web = REGISTRY
        .with(|registry| registry.borrow_mut().remove(InstanceId(id)))
        .map_err(to_js)?;
    let shared = web.shared();
    drop(web);
    shared.run(|s| s.destroy()).map_err(to_js)?;
    if let Err(err) = shared.container().remove_attribute(ID_ATTRIBUTE) {
        log::warn!("scrubs #{id}: failed to clear id attribute: {err:?}");
    }
    Ok(())
}
