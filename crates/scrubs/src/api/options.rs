use serde::{Deserialize, Serialize};

use crate::api::types::Axis;
use crate::error::Result;

/// Percent the scrubber starts at (and resets to) when `startAt` is unusable.
pub const DEFAULT_START_AT: f64 = 50.0;
/// Default momentum amplitude multiplier.
pub const DEFAULT_FRICTION: f64 = 0.4;

/// Maximum width of the scrubber container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "WidthRepr", into = "WidthRepr")]
pub enum Width {
    /// Match the natural width of the before-image.
    #[default]
    Auto,
    /// Fixed width in CSS pixels.
    Pixels(f64),
}

/// Wire shape of [`Width`]: either `"auto"` or a number.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WidthRepr {
    Pixels(f64),
    Keyword(String),
}

impl TryFrom<WidthRepr> for Width {
    type Error = String;

    fn try_from(repr: WidthRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            WidthRepr::Pixels(px) if px.is_finite() && px > 0.0 => Ok(Width::Pixels(px)),
            // Unusable numbers degrade to auto rather than failing the bind.
            WidthRepr::Pixels(_) => Ok(Width::Auto),
            WidthRepr::Keyword(k) if k.eq_ignore_ascii_case("auto") => Ok(Width::Auto),
            WidthRepr::Keyword(k) => Err(format!(
                "unknown width `{k}`, expected \"auto\" or pixels"
            )),
        }
    }
}

impl From<Width> for WidthRepr {
    fn from(width: Width) -> Self {
        match width {
            Width::Auto => WidthRepr::Keyword("auto".to_owned()),
            Width::Pixels(px) => WidthRepr::Pixels(px),
        }
    }
}

/// Construction-time configuration for a scrubber.
/// Parsed from the JSON object the host passes at bind time; every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrubsOptions {
    /// Render the built-in control bar.
    pub controls: bool,
    /// Attach the built-in pointer handlers. When false the scrubber is
    /// driven only through its public operations.
    pub input: bool,
    /// Percent to start on and to return to on `reset()`.
    pub start_at: f64,
    /// Stay where released instead of snapping to the nearer edge.
    pub sticky: bool,
    /// Scrub along the Y axis.
    pub vertical: bool,
    /// Container max-width.
    pub width: Width,
    /// Continue moving after release, decaying toward a projected rest.
    pub momentum: bool,
    /// Momentum amplitude multiplier. Smaller means more resistance.
    pub friction: f64,
}

impl Default for ScrubsOptions {
    fn default() -> Self {
        Self {
            controls: true,
            input: true,
            start_at: DEFAULT_START_AT,
            sticky: false,
            vertical: false,
            width: Width::Auto,
            momentum: false,
            friction: DEFAULT_FRICTION,
        }
    }
}

impl ScrubsOptions {
    /// Parse options from a JSON object. A blank string yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let options: Self = serde_json::from_str(json)?;
        Ok(options.normalized())
    }

    /// Coerce unusable numeric values to their defaults.
    pub fn normalized(mut self) -> Self {
        self.start_at = coerce_start_at(self.start_at);
        if !self.friction.is_finite() {
            self.friction = DEFAULT_FRICTION;
        }
        self
    }

    pub fn axis(&self) -> Axis {
        if self.vertical {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }

    // -- Builder pattern --

    pub fn with_controls(mut self, controls: bool) -> Self {
        self.controls = controls;
        self
    }

    pub fn with_input(mut self, input: bool) -> Self {
        self.input = input;
        self
    }

    pub fn with_start_at(mut self, start_at: f64) -> Self {
        self.start_at = start_at;
        self
    }

    pub fn with_sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn with_vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    pub fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    pub fn with_momentum(mut self, friction: f64) -> Self {
        self.momentum = true;
        self.friction = friction;
        self
    }
}

/// `startAt` outside [0, 100] (or NaN) falls back to 50.
pub fn coerce_start_at(start_at: f64) -> f64 {
    if (0.0..=100.0).contains(&start_at) {
        start_at
    } else {
        DEFAULT_START_AT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_json_is_default() {
        let options = ScrubsOptions::from_json("  ").unwrap();
        assert_eq!(options, ScrubsOptions::default());
        assert!(options.controls);
        assert!(options.input);
        assert_eq!(options.start_at, 50.0);
        assert_eq!(options.friction, 0.4);
    }

    #[test]
    fn parse_camel_case_fields() {
        let json = r#"{
            "startAt": 75,
            "vertical": true,
            "momentum": true,
            "friction": 0.25,
            "width": 640
        }"#;
        let options = ScrubsOptions::from_json(json).unwrap();
        assert_eq!(options.start_at, 75.0);
        assert_eq!(options.axis(), Axis::Vertical);
        assert!(options.momentum);
        assert_eq!(options.friction, 0.25);
        assert_eq!(options.width, Width::Pixels(640.0));
        // Untouched fields keep their defaults.
        assert!(options.controls);
        assert!(!options.sticky);
    }

    #[test]
    fn out_of_range_start_at_coerces_to_fifty() {
        let options = ScrubsOptions::from_json(r#"{ "startAt": 140 }"#).unwrap();
        assert_eq!(options.start_at, 50.0);

        let options = ScrubsOptions::default().with_start_at(-3.0).normalized();
        assert_eq!(options.start_at, 50.0);

        let options = ScrubsOptions::default().with_start_at(f64::NAN).normalized();
        assert_eq!(options.start_at, 50.0);

        assert_eq!(coerce_start_at(0.0), 0.0);
        assert_eq!(coerce_start_at(100.0), 100.0);
    }

    #[test]
    fn width_accepts_auto_keyword() {
        let options = ScrubsOptions::from_json(r#"{ "width": "AUTO" }"#).unwrap();
        assert_eq!(options.width, Width::Auto);

        let options = ScrubsOptions::from_json(r#"{ "width": -20 }"#).unwrap();
        assert_eq!(options.width, Width::Auto);
    }

    #[test]
    fn unknown_width_keyword_is_rejected() {
        let err = ScrubsOptions::from_json(r#"{ "width": "wide" }"#).unwrap_err();
        assert!(err.to_string().contains("invalid scrubs options"), "{err}");
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(ScrubsOptions::from_json("{ startAt: }").is_err());
    }

    #[test]
    fn width_serializes_back_to_keyword() {
        let json = serde_json::to_string(&ScrubsOptions::default()).unwrap();
        assert!(json.contains(r#""width":"auto""#), "{json}");
        assert!(json.contains(r#""startAt":50.0"#), "{json}");
    }
}
