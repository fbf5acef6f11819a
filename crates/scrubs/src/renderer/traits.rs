//! Render surface contract.
//!
//! The engine never touches the host's node tree directly. It produces
//! [`LayerStyle`] assignments and transition toggles; a surface applies them.

use super::style::LayerStyle;

/// Where a scrubber's layer styles end up (DOM nodes in the browser bridge).
pub trait Surface {
    /// Write one style assignment to its layer.
    fn apply(&mut self, style: &LayerStyle);

    /// Enable or disable CSS transitions for discrete jumps.
    /// Disabled while input or momentum drives the layers frame by frame.
    fn set_transitions(&mut self, enabled: bool);
}

/// A surface that keeps everything it was given. Used by native hosts and tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub styles: Vec<LayerStyle>,
    pub transitions: Vec<bool>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent style written to `layer`.
    pub fn last(&self, layer: crate::api::types::Layer) -> Option<&LayerStyle> {
        self.styles.iter().rev().find(|s| s.layer == layer)
    }

    /// Current transition state (enabled until told otherwise).
    pub fn transitions_enabled(&self) -> bool {
        self.transitions.last().copied().unwrap_or(true)
    }
}

impl Surface for RecordingSurface {
    fn apply(&mut self, style: &LayerStyle) {
        self.styles.push(style.clone());
    }

    fn set_transitions(&mut self, enabled: bool) {
        self.transitions.push(enabled);
    }
}
