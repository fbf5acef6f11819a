//! Transform capability detection.
//!
//! The host is probed once per process: a transient element gets a known 2D
//! and a known 3D translation and the computed style is compared against the
//! canonical matrix strings a conforming engine reports. The result is an
//! immutable [`Capabilities`] record that every scrubber receives at
//! construction.

use std::sync::OnceLock;

/// 2D probe value applied to the transient element.
pub const PROBE_2D: &str = "translate(1px,1px)";
/// 3D probe value applied to the transient element.
pub const PROBE_3D: &str = "translate3d(1px,1px,1px)";
/// Computed value a host with 2D transforms reports for [`PROBE_2D`].
pub const EXPECTED_MATRIX_2D: &str = "matrix(1, 0, 0, 1, 1, 1)";
/// Computed value a host with 3D transforms reports for [`PROBE_3D`].
pub const EXPECTED_MATRIX_3D: &str = "matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 1, 1, 1, 1)";

/// Which positioning technique moves the layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMode {
    /// `translate3d`, composited on the GPU where available.
    ThreeD,
    /// `translateX` / `translateY`.
    TwoD,
    /// Absolute offsets (`left`/`right`/`top`/`bottom`), no transform.
    Fallback,
}

/// A (possibly vendor-prefixed) transform property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformProperty {
    Webkit,
    Opera,
    Ms,
    Moz,
    Standard,
}

impl TransformProperty {
    /// Probe order. When several exist the last one wins, so the
    /// unprefixed property is preferred.
    pub const CANDIDATES: [TransformProperty; 5] = [
        TransformProperty::Webkit,
        TransformProperty::Opera,
        TransformProperty::Ms,
        TransformProperty::Moz,
        TransformProperty::Standard,
    ];

    /// Key on a style declaration object (`element.style[key]`).
    pub fn style_key(self) -> &'static str {
        match self {
            TransformProperty::Webkit => "webkitTransform",
            TransformProperty::Opera => "OTransform",
            TransformProperty::Ms => "msTransform",
            TransformProperty::Moz => "MozTransform",
            TransformProperty::Standard => "transform",
        }
    }

    /// CSS property name.
    pub fn css_name(self) -> &'static str {
        match self {
            TransformProperty::Webkit => "-webkit-transform",
            TransformProperty::Opera => "-o-transform",
            TransformProperty::Ms => "-ms-transform",
            TransformProperty::Moz => "-moz-transform",
            TransformProperty::Standard => "transform",
        }
    }
}

/// Host access needed to probe transform support.
pub trait StyleProbe {
    /// Whether the host's style declarations know `property` at all.
    fn has_property(&self, property: TransformProperty) -> bool;

    /// Apply `value` to the probe element and read back the computed value.
    /// `None` when the host cannot compute styles.
    fn computed(&mut self, property: TransformProperty, value: &str) -> Option<String>;
}

/// Resolved positioning capabilities, shared read-only by every scrubber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub mode: TransformMode,
    /// Transform property to write. `None` when the host has none.
    pub property: Option<TransformProperty>,
}

static DETECTED: OnceLock<Capabilities> = OnceLock::new();

impl Capabilities {
    /// No transform support: positional offsets only.
    pub const FALLBACK: Capabilities = Capabilities {
        mode: TransformMode::Fallback,
        property: None,
    };

    pub fn new(mode: TransformMode, property: TransformProperty) -> Self {
        Self {
            mode,
            property: Some(property),
        }
    }

    /// Probe the host. Never fails: anything unexpected resolves to `Fallback`.
    pub fn detect<P: StyleProbe + ?Sized>(probe: &mut P) -> Self {
        let Some(property) = TransformProperty::CANDIDATES
            .iter()
            .rev()
            .copied()
            .find(|p| probe.has_property(*p))
        else {
            log::info!("scrubs: no transform property, using positional fallback");
            return Self::FALLBACK;
        };

        let matrix_2d = probe.computed(property, PROBE_2D);
        let matrix_3d = probe.computed(property, PROBE_3D);

        let mode = if matrix_3d.as_deref() == Some(EXPECTED_MATRIX_3D) {
            TransformMode::ThreeD
        } else if matrix_2d.as_deref() == Some(EXPECTED_MATRIX_2D) {
            TransformMode::TwoD
        } else {
            TransformMode::Fallback
        };

        log::info!("scrubs: transform mode {:?} via `{}`", mode, property.css_name());
        Self::new(mode, property)
    }

    /// Process-wide capabilities. `detect` runs on the first call only;
    /// later calls return the stored record without probing.
    pub fn shared(detect: impl FnOnce() -> Capabilities) -> Capabilities {
        *DETECTED.get_or_init(detect)
    }

    /// Whether any transform (2D or 3D) is usable.
    pub fn supports_transforms(&self) -> bool {
        self.property.is_some() && self.mode != TransformMode::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Table-driven probe: known properties and the computed value per probe input.
    struct TableProbe {
        known: Vec<TransformProperty>,
        computed: HashMap<&'static str, &'static str>,
        applied: Vec<(TransformProperty, String)>,
    }

    impl TableProbe {
        fn new(known: &[TransformProperty]) -> Self {
            Self {
                known: known.to_vec(),
                computed: HashMap::new(),
                applied: Vec::new(),
            }
        }

        fn reports(mut self, input: &'static str, output: &'static str) -> Self {
            self.computed.insert(input, output);
            self
        }
    }

    impl StyleProbe for TableProbe {
        fn has_property(&self, property: TransformProperty) -> bool {
            self.known.contains(&property)
        }

        fn computed(&mut self, property: TransformProperty, value: &str) -> Option<String> {
            self.applied.push((property, value.to_owned()));
            self.computed.get(value).map(|v| v.to_string())
        }
    }

    #[test]
    fn full_support_is_three_d() {
        let mut probe = TableProbe::new(&[TransformProperty::Standard])
            .reports(PROBE_2D, EXPECTED_MATRIX_2D)
            .reports(PROBE_3D, EXPECTED_MATRIX_3D);
        let caps = Capabilities::detect(&mut probe);
        assert_eq!(caps.mode, TransformMode::ThreeD);
        assert_eq!(caps.property, Some(TransformProperty::Standard));
        assert!(caps.supports_transforms());
    }

    #[test]
    fn flattened_three_d_is_two_d() {
        // A 2D-only engine flattens translate3d to a 2D matrix.
        let mut probe = TableProbe::new(&[TransformProperty::Ms])
            .reports(PROBE_2D, EXPECTED_MATRIX_2D)
            .reports(PROBE_3D, "matrix(1, 0, 0, 1, 1, 1)");
        let caps = Capabilities::detect(&mut probe);
        assert_eq!(caps.mode, TransformMode::TwoD);
        assert_eq!(caps.property, Some(TransformProperty::Ms));
    }

    #[test]
    fn unexpected_matrix_falls_back() {
        let mut probe = TableProbe::new(&[TransformProperty::Standard])
            .reports(PROBE_2D, "none")
            .reports(PROBE_3D, "none");
        let caps = Capabilities::detect(&mut probe);
        assert_eq!(caps.mode, TransformMode::Fallback);
        assert!(!caps.supports_transforms());
    }

    #[test]
    fn no_property_skips_probing() {
        let mut probe = TableProbe::new(&[]);
        let caps = Capabilities::detect(&mut probe);
        assert_eq!(caps, Capabilities::FALLBACK);
        assert!(probe.applied.is_empty());
    }

    #[test]
    fn unprefixed_property_wins() {
        let mut probe = TableProbe::new(&[
            TransformProperty::Webkit,
            TransformProperty::Standard,
        ])
        .reports(PROBE_3D, EXPECTED_MATRIX_3D);
        let caps = Capabilities::detect(&mut probe);
        assert_eq!(caps.property, Some(TransformProperty::Standard));
        assert!(probe
            .applied
            .iter()
            .all(|(p, _)| *p == TransformProperty::Standard));
    }

    #[test]
    fn shared_detects_once() {
        let first = Capabilities::shared(|| {
            Capabilities::new(TransformMode::TwoD, TransformProperty::Webkit)
        });
        let second = Capabilities::shared(|| panic!("capabilities probed twice"));
        assert_eq!(first, second);
    }
}
