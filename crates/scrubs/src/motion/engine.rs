use crate::api::options::ScrubsOptions;
use crate::api::types::{Axis, ScrubEvent};
use crate::core::capability::Capabilities;
use crate::renderer::style::{layer_styles, LayerStyle};

/// Render percent above which a released, non-sticky boundary snaps to the far edge.
pub const SNAP_MIDPOINT: f64 = 50.0;

/// A request to move the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveRequest {
    /// Canonical percent to move to. `None` re-applies the stored percent.
    pub target: Option<f64>,
    /// Return to `startAt`. Never notifies.
    pub reset: bool,
    /// Keep the released position for this call even when the scrubber snaps.
    pub sticky: bool,
    /// Suppress the scrub/complete notification.
    pub silent: bool,
}

impl MoveRequest {
    pub fn to(percent: f64) -> Self {
        Self {
            target: Some(percent),
            ..Self::default()
        }
    }

    /// Re-apply the stored percent (release without momentum).
    pub fn current() -> Self {
        Self::default()
    }

    pub fn reset(start_at: f64) -> Self {
        Self {
            target: Some(start_at),
            reset: true,
            ..Self::default()
        }
    }

    pub fn sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }
}

/// Outcome of one [`MotionEngine::move_to`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    /// New canonical percent.
    pub percent: f64,
    /// `100 - percent`, the offset the layers were moved by.
    pub render_percent: f64,
    pub styles: [LayerStyle; 3],
    pub event: Option<ScrubEvent>,
}

/// Owns the canonical percent and the rules for turning a target into a
/// rendered position.
#[derive(Debug, Clone)]
pub struct MotionEngine {
    axis: Axis,
    sticky: bool,
    start_at: f64,
    capabilities: Capabilities,
    percent: f64,
}

impl MotionEngine {
    pub fn new(options: &ScrubsOptions, capabilities: Capabilities) -> Self {
        let start_at = crate::api::options::coerce_start_at(options.start_at);
        Self {
            axis: options.axis(),
            sticky: options.sticky,
            start_at,
            capabilities,
            percent: start_at,
        }
    }

    /// Canonical percent, always within [0, 100].
    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn start_at(&self) -> f64 {
        self.start_at
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Move the boundary. `input_active` distinguishes a live drag from a settle.
    pub fn move_to(&mut self, request: MoveRequest, input_active: bool) -> Move {
        let target = request
            .target
            .filter(|p| !p.is_nan())
            .unwrap_or(self.percent);

        let percent = if input_active {
            target
        } else if request.reset {
            self.start_at
        } else if !self.sticky && !request.sticky {
            // Past the midpoint in render space means nearer the start edge.
            if 100.0 - target > SNAP_MIDPOINT {
                0.0
            } else {
                100.0
            }
        } else {
            target
        };

        // Store the canonical value as given. The overlay recedes as the
        // reveal grows, so the layers are offset by the inverse.
        self.percent = percent.clamp(0.0, 100.0);
        let render = 100.0 - self.percent;

        let event = if request.reset || request.silent {
            None
        } else if input_active {
            Some(ScrubEvent::Scrub(self.percent))
        } else {
            Some(ScrubEvent::Complete(self.percent))
        };

        Move {
            percent: self.percent,
            render_percent: render,
            styles: layer_styles(&self.capabilities, self.axis, render),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capability::{TransformMode, TransformProperty};
    use crate::renderer::style::StyleProperty;

    fn engine(options: ScrubsOptions) -> MotionEngine {
        let caps = Capabilities::new(TransformMode::ThreeD, TransformProperty::Standard);
        MotionEngine::new(&options.normalized(), caps)
    }

    #[test]
    fn sticky_round_trip() {
        let mut e = engine(ScrubsOptions::default().with_sticky(true));
        let values = [
            0.0, 0.001, 0.1, 0.3, 0.5, 0.7, 12.0, 12.34, 30.0, 33.3, 49.0, 50.0, 51.0, 99.5, 100.0,
        ];
        for p in values {
            let m = e.move_to(MoveRequest::to(p), false);
            assert_eq!(m.percent, p);
            assert_eq!(e.percent(), p);
        }
    }

    #[test]
    fn live_input_never_snaps() {
        let mut e = engine(ScrubsOptions::default());
        let m = e.move_to(MoveRequest::to(30.0), true);
        assert_eq!(m.percent, 30.0);
        assert_eq!(m.render_percent, 70.0);
        assert_eq!(m.event, Some(ScrubEvent::Scrub(30.0)));
        assert_eq!(m.styles[0].value, "translate3d(-70%,0,0)");
    }

    #[test]
    fn clamps_out_of_range() {
        let mut e = engine(ScrubsOptions::default());
        assert_eq!(e.move_to(MoveRequest::to(140.0), true).percent, 100.0);
        assert_eq!(e.move_to(MoveRequest::to(-25.0), true).percent, 0.0);
        let mut sticky = engine(ScrubsOptions::default().with_sticky(true));
        assert_eq!(sticky.move_to(MoveRequest::to(1e9), false).percent, 100.0);
    }

    #[test]
    fn release_snaps_to_nearer_edge() {
        let mut e = engine(ScrubsOptions::default());
        // render 70 > 50 snaps to render 100, canonical 0.
        let m = e.move_to(MoveRequest::to(30.0), false);
        assert_eq!(m.render_percent, 100.0);
        assert_eq!(m.percent, 0.0);
        assert_eq!(m.event, Some(ScrubEvent::Complete(0.0)));

        // render 30 snaps to render 0, canonical 100.
        assert_eq!(e.move_to(MoveRequest::to(70.0), false).percent, 100.0);
        // render exactly 50 goes to 0.
        assert_eq!(e.move_to(MoveRequest::to(50.0), false).percent, 100.0);
    }

    #[test]
    fn per_call_sticky_overrides_snap() {
        let mut e = engine(ScrubsOptions::default());
        let m = e.move_to(MoveRequest::to(30.0).sticky(true), false);
        assert_eq!(m.percent, 30.0);
    }

    #[test]
    fn current_reapplies_stored_percent() {
        let mut e = engine(ScrubsOptions::default());
        e.move_to(MoveRequest::to(80.0), true);
        let m = e.move_to(MoveRequest::current(), false);
        assert_eq!(m.percent, 100.0);

        let mut nan = engine(ScrubsOptions::default().with_sticky(true));
        nan.move_to(MoveRequest::to(33.0), false);
        assert_eq!(nan.move_to(MoveRequest::to(f64::NAN), false).percent, 33.0);
    }

    #[test]
    fn reset_goes_to_start_silently() {
        let mut e = engine(ScrubsOptions::default().with_start_at(75.0));
        assert_eq!(e.percent(), 75.0);
        e.move_to(MoveRequest::to(10.0), true);
        let m = e.move_to(MoveRequest::reset(e.start_at()), false);
        assert_eq!(m.percent, 75.0);
        assert_eq!(m.event, None);
    }

    #[test]
    fn invalid_start_at_resets_to_fifty() {
        let e = engine(ScrubsOptions::default().with_start_at(250.0));
        assert_eq!(e.start_at(), 50.0);
        assert_eq!(e.percent(), 50.0);
    }

    #[test]
    fn fallback_capabilities_drive_offsets() {
        let mut e = MotionEngine::new(&ScrubsOptions::default(), Capabilities::FALLBACK);
        assert_eq!(*e.capabilities(), Capabilities::FALLBACK);
        let m = e.move_to(MoveRequest::to(40.0), true);
        assert_eq!(m.styles[0].property, StyleProperty::Right);
        assert_eq!(m.styles[0].value, "60%");
    }

    #[test]
    fn silent_move_has_no_event() {
        let mut e = engine(ScrubsOptions::default());
        let m = e.move_to(MoveRequest::to(100.0).silent(), false);
        assert_eq!(m.percent, 100.0);
        assert_eq!(m.event, None);
    }
}
