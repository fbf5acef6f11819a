use crate::api::types::{Axis, Layer};
use crate::core::capability::{Capabilities, TransformMode, TransformProperty};

/// Style property a layer offset is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleProperty {
    Transform(TransformProperty),
    Left,
    Right,
    Top,
    Bottom,
}

impl StyleProperty {
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Transform(p) => p.css_name(),
            StyleProperty::Left => "left",
            StyleProperty::Right => "right",
            StyleProperty::Top => "top",
            StyleProperty::Bottom => "bottom",
        }
    }
}

/// One style assignment for one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStyle {
    pub layer: Layer,
    pub property: StyleProperty,
    pub value: String,
}

/// Styles placing all three layers at `render_percent` (inverse space, already clamped).
///
/// The overlay and the control bar move back by the render percent; the overlay
/// image moves forward by the same amount so it stays put inside its mask.
pub fn layer_styles(caps: &Capabilities, axis: Axis, render_percent: f64) -> [LayerStyle; 3] {
    Layer::ALL.map(|layer| layer_style(caps, axis, layer, render_percent))
}

fn layer_style(caps: &Capabilities, axis: Axis, layer: Layer, r: f64) -> LayerStyle {
    let sign = match layer {
        Layer::OverlayImage => "",
        Layer::Overlay | Layer::Controls => "-",
    };

    let (property, value) = match (caps.mode, caps.property) {
        (TransformMode::ThreeD, Some(p)) => {
            let value = match axis {
                Axis::Horizontal => format!("translate3d({sign}{r}%,0,0)"),
                Axis::Vertical => format!("translate3d(0,{sign}{r}%,0)"),
            };
            (StyleProperty::Transform(p), value)
        }
        (TransformMode::TwoD, Some(p)) => {
            let value = match axis {
                Axis::Horizontal => format!("translateX({sign}{r}%)"),
                Axis::Vertical => format!("translateY({sign}{r}%)"),
            };
            (StyleProperty::Transform(p), value)
        }
        _ => {
            let property = match (axis, layer) {
                (Axis::Horizontal, Layer::OverlayImage) => StyleProperty::Left,
                (Axis::Horizontal, _) => StyleProperty::Right,
                (Axis::Vertical, Layer::OverlayImage) => StyleProperty::Top,
                (Axis::Vertical, _) => StyleProperty::Bottom,
            };
            (property, format!("{r}%"))
        }
    };

    LayerStyle {
        layer,
        property,
        value,
    }
}
