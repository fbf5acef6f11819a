use std::fmt;

use glam::Vec2;

/// Identifies a bound scrubber (one per container element).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Primary axis the reveal boundary travels along. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    /// Component of `v` that lies along this axis.
    #[inline]
    pub fn pick(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }
}

/// Lifecycle notification emitted by a scrubber.
/// The host drains these after each call and forwards them to its callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrubEvent {
    /// The scrubber finished binding.
    Init,
    /// A drag began. Carries the canonical percent before the first sample.
    Start(f64),
    /// The boundary moved under live input.
    Scrub(f64),
    /// The boundary settled while input was inactive.
    Complete(f64),
}

/// The visual layers that move together with the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The mask clipping the after-image.
    Overlay,
    /// The after-image itself, counter-translated inside the mask.
    OverlayImage,
    /// The draggable control bar.
    Controls,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Overlay, Layer::OverlayImage, Layer::Controls];
}
