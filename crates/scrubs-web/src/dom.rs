//! DOM side of a scrubber: capability probing, the widget markup and the
//! surface that writes layer styles onto it.

use glam::Vec2;
use js_sys::Reflect;
use scrubs::{
    Capabilities, Layer, LayerStyle, Rect, Result, ScrubsError, ScrubsOptions, StyleProbe,
    Surface, TransformProperty, Width,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

pub const TRANSITION_ATTRIBUTE: &str = "data-transition";

const CONTROLS_HTML: &str =
    r#"<span class="scrubs-controls-bar"></span><span class="scrubs-controls-handle"></span>"#;

/// Class marking a container whose markup has been built.
pub const SCRUBBER_CLASS: &str = "scrubs-scrubber";

pub fn dom_error(err: JsValue) -> ScrubsError {
    ScrubsError::Dom(format!("{err:?}"))
}

/// Transient element attached to `<body>` for the capability probe.
/// Removed again when dropped.
pub struct DomProbe {
    window: Window,
    element: HtmlElement,
}

impl DomProbe {
    pub fn new(window: Window, document: &Document) -> Result<Self> {
        let body = document
            .body()
            .ok_or_else(|| ScrubsError::Dom("document has no body".into()))?;
        let element = create_div(document, "")?;
        body.append_child(&element).map_err(dom_error)?;
        Ok(Self { window, element })
    }
}

impl StyleProbe for DomProbe {
    fn has_property(&self, property: TransformProperty) -> bool {
        Reflect::get(&self.element.style(), &JsValue::from_str(property.style_key()))
            .map(|value| !value.is_undefined())
            .unwrap_or(false)
    }

    fn computed(&mut self, property: TransformProperty, value: &str) -> Option<String> {
        let style = self.element.style();
        Reflect::set(
            &style,
            &JsValue::from_str(property.style_key()),
            &JsValue::from_str(value),
        )
        .ok()?;
        let computed = self.window.get_computed_style(&self.element).ok()??;
        computed.get_property_value(property.css_name()).ok()
    }
}

impl Drop for DomProbe {
    fn drop(&mut self) {
        self.element.remove();
    }
}

/// Capabilities for this page, probing the DOM on first use only.
pub fn capabilities(document: &Document) -> Capabilities {
    Capabilities::shared(|| {
        let probe = web_sys::window()
            .ok_or_else(|| ScrubsError::Dom("no window".into()))
            .and_then(|window| DomProbe::new(window, document));
        match probe {
            Ok(mut probe) => Capabilities::detect(&mut probe),
            Err(err) => {
                log::warn!("scrubs: capability probe failed ({err}), using fallback");
                Capabilities::FALLBACK
            }
        }
    })
}

/// The three moving layers of one scrubber plus its container.
pub struct DomSurface {
    container: HtmlElement,
    overlay: HtmlElement,
    overlay_image: HtmlElement,
    controls: Option<HtmlElement>,
}

impl DomSurface {
    fn layer(&self, layer: Layer) -> Option<&HtmlElement> {
        match layer {
            Layer::Overlay => Some(&self.overlay),
            Layer::OverlayImage => Some(&self.overlay_image),
            Layer::Controls => self.controls.as_ref(),
        }
    }
}

impl Surface for DomSurface {
    fn apply(&mut self, style: &LayerStyle) {
        let Some(element) = self.layer(style.layer) else {
            return;
        };
        if let Err(err) = element
            .style()
            .set_property(style.property.css_name(), &style.value)
        {
            log::warn!("scrubs: failed to style {:?}: {:?}", style.layer, err);
        }
    }

    fn set_transitions(&mut self, enabled: bool) {
        let value = if enabled { "true" } else { "false" };
        if let Err(err) = self.container.set_attribute(TRANSITION_ATTRIBUTE, value) {
            log::warn!("scrubs: failed to toggle transitions: {:?}", err);
        }
    }
}

/// Rebuild the container's children into the scrubber markup:
///
/// ```text
/// .scrubs-scrubber[data-transition]
///   .scrubs-images
///     img.scrubs-image-placeholder        (clone of the before image)
///     .scrubs-image-container-before > img.scrubs-image
///     .scrubs-overlay.scrubs-image-container-after > img.scrubs-overlay-image
///   .scrubs-controls                      (when enabled)
/// ```
pub fn build_structure(
    container: &HtmlElement,
    options: &ScrubsOptions,
    capabilities: &Capabilities,
) -> Result<DomSurface> {
    let document = container
        .owner_document()
        .ok_or_else(|| ScrubsError::Dom("container is not in a document".into()))?;

    let images = container.query_selector_all("img").map_err(dom_error)?;
    if images.length() < 2 {
        return Err(ScrubsError::MissingImages {
            found: images.length(),
        });
    }
    if images.length() > 2 {
        log::warn!("scrubs: container holds {} images, using the first two", images.length());
    }
    let before = element_at(&images, 0)?;
    let after = element_at(&images, 1)?;

    let classes = container.class_list();
    classes.add_1(SCRUBBER_CLASS).map_err(dom_error)?;
    if options.vertical {
        classes.add_1("scrubs-vertical").map_err(dom_error)?;
    }
    if !capabilities.supports_transforms() {
        classes.add_1("scrubs-fallback").map_err(dom_error)?;
    }
    set_max_width(container, &before, options.width);
    container
        .set_attribute(TRANSITION_ATTRIBUTE, "true")
        .map_err(dom_error)?;

    let placeholder = before
        .clone_node()
        .map_err(dom_error)?
        .dyn_into::<Element>()
        .map_err(|_| ScrubsError::Dom("cloned image is not an element".into()))?;
    placeholder
        .class_list()
        .add_1("scrubs-image-placeholder")
        .map_err(dom_error)?;
    before.class_list().add_1("scrubs-image").map_err(dom_error)?;
    for class in ["scrubs-overlay-image", "scrubs-image", "scrubs-trans"] {
        after.class_list().add_1(class).map_err(dom_error)?;
    }

    let image_box = create_div(&document, "scrubs-images")?;
    let before_box = create_div(
        &document,
        "scrubs-image-container scrubs-image-container-before",
    )?;
    let overlay = create_div(
        &document,
        "scrubs-overlay scrubs-image-container scrubs-image-container-after scrubs-trans",
    )?;
    before_box.append_child(&before).map_err(dom_error)?;
    overlay.append_child(&after).map_err(dom_error)?;
    image_box.append_child(&placeholder).map_err(dom_error)?;
    image_box.append_child(&before_box).map_err(dom_error)?;
    image_box.append_child(&overlay).map_err(dom_error)?;
    container.append_child(&image_box).map_err(dom_error)?;

    let controls = if options.controls {
        let bar = create_div(&document, "scrubs-controls scrubs-trans")?;
        bar.set_inner_html(CONTROLS_HTML);
        container.append_child(&bar).map_err(dom_error)?;
        Some(bar)
    } else {
        None
    };

    Ok(DomSurface {
        container: container.clone(),
        overlay,
        overlay_image: after,
        controls,
    })
}

/// Container box in page coordinates (viewport rect plus scroll offset).
pub fn page_bounds(container: &HtmlElement) -> Rect {
    let rect = container.get_bounding_client_rect();
    let (scroll_x, scroll_y) = web_sys::window()
        .map(|w| (w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0)))
        .unwrap_or((0.0, 0.0));
    Rect::new(
        Vec2::new((rect.left() + scroll_x) as f32, (rect.top() + scroll_y) as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}

fn set_max_width(container: &HtmlElement, before: &HtmlElement, width: Width) {
    let value = match width {
        Width::Pixels(px) => format!("{px}px"),
        Width::Auto => match before.offset_width() {
            0 => {
                log::debug!("scrubs: before image has no width yet, leaving max-width unset");
                return;
            }
            px => format!("{px}px"),
        },
    };
    if let Err(err) = container.style().set_property("max-width", &value) {
        log::warn!("scrubs: failed to set max-width: {:?}", err);
    }
}

fn create_div(document: &Document, class: &str) -> Result<HtmlElement> {
    let div = document
        .create_element("div")
        .map_err(dom_error)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| ScrubsError::Dom("created div is not an HtmlElement".into()))?;
    if !class.is_empty() {
        div.set_class_name(class);
    }
    Ok(div)
}

fn element_at(list: &web_sys::NodeList, index: u32) -> Result<HtmlElement> {
    list.item(index)
        .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        .ok_or(ScrubsError::MissingImages { found: index })
}
