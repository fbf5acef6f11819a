// motion/momentum.rs
//
// Post-release inertia. A release fast enough launches a Fling: the boundary
// coasts toward `target` and the remaining offset decays exponentially with
// elapsed time. The decay is a pure function of time, so a frame that arrives
// late simply samples further along the curve.
//
// Usage:
//   let mut momentum = Momentum::new(0.4);
//   if momentum.release(percent, velocity, now).is_some() { /* schedule a frame */ }
//   match momentum.advance(frame_now) { Some(MomentumStep::Coast(p)) => .., .. }

/// Releases at or below this speed (percent per second) do not coast.
pub const VELOCITY_THRESHOLD: f64 = 10.0;
/// Decay time constant in milliseconds.
pub const TIME_CONSTANT_MS: f64 = 325.0;
/// Remaining offset (percent) below which the fling settles.
pub const SETTLE_DISTANCE: f64 = 1.0;

/// A launched coast toward a projected rest position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fling {
    /// Total projected travel: `friction * velocity`.
    pub amplitude: f64,
    /// Canonical percent the fling comes to rest at.
    pub target: f64,
    /// When the pointer was released.
    pub released_at_ms: f64,
}

impl Fling {
    /// Launch from `percent` with the release `velocity`.
    /// `None` when the release is too slow to coast.
    pub fn launch(
        percent: f64,
        velocity: f64,
        friction: f64,
        released_at_ms: f64,
    ) -> Option<Self> {
        if !(velocity.abs() > VELOCITY_THRESHOLD) {
            return None;
        }
        let amplitude = friction * velocity;
        Some(Self {
            amplitude,
            target: (percent + amplitude).round(),
            released_at_ms,
        })
    }

    /// Signed distance still to travel at `now_ms`: `-amplitude * e^(-t / 325)`.
    pub fn offset_at(&self, now_ms: f64) -> f64 {
        let elapsed = (now_ms - self.released_at_ms).max(0.0);
        -self.amplitude * (-elapsed / TIME_CONSTANT_MS).exp()
    }

    /// Where the boundary belongs at `now_ms`.
    pub fn step(&self, now_ms: f64) -> MomentumStep {
        let offset = self.offset_at(now_ms);
        if self.amplitude != 0.0 && offset.abs() > SETTLE_DISTANCE {
            MomentumStep::Coast(self.target + offset)
        } else {
            MomentumStep::Settle(self.target)
        }
    }
}

/// Result of advancing a fling by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MomentumStep {
    /// Still moving: render here (sticky) and request another frame.
    Coast(f64),
    /// Close enough: render exactly here (sticky) and stop.
    Settle(f64),
}

/// Momentum sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MomentumPhase {
    #[default]
    Idle,
    /// Launched, first frame not yet run.
    Released(Fling),
    /// At least one coasting frame has run.
    Settling(Fling),
}

/// Momentum state for one scrubber (`Idle -> Released -> Settling -> Idle`).
#[derive(Debug, Clone)]
pub struct Momentum {
    friction: f64,
    phase: MomentumPhase,
}

impl Momentum {
    pub fn new(friction: f64) -> Self {
        Self {
            friction,
            phase: MomentumPhase::Idle,
        }
    }

    pub fn phase(&self) -> MomentumPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != MomentumPhase::Idle
    }

    /// Pointer released at `percent` moving at `velocity`. Enters `Released`
    /// and returns the fling, or stays `Idle` for slow releases.
    pub fn release(&mut self, percent: f64, velocity: f64, now_ms: f64) -> Option<Fling> {
        let fling = Fling::launch(percent, velocity, self.friction, now_ms);
        self.phase = match fling {
            Some(f) => MomentumPhase::Released(f),
            None => MomentumPhase::Idle,
        };
        fling
    }

    /// Run one frame. `None` when idle.
    pub fn advance(&mut self, now_ms: f64) -> Option<MomentumStep> {
        let fling = match self.phase {
            MomentumPhase::Idle => return None,
            MomentumPhase::Released(f) | MomentumPhase::Settling(f) => f,
        };
        let step = fling.step(now_ms);
        self.phase = match step {
            MomentumStep::Coast(_) => MomentumPhase::Settling(fling),
            MomentumStep::Settle(_) => MomentumPhase::Idle,
        };
        Some(step)
    }

    /// Abandon any fling in progress.
    pub fn cancel(&mut self) {
        self.phase = MomentumPhase::Idle;
    }
}
