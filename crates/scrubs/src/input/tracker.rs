use crate::api::types::Axis;
use crate::input::event::Pointer;

/// Weight of the newest instantaneous velocity in the smoothed estimate.
pub const VELOCITY_SMOOTHING: f64 = 0.8;

/// A pointer position converted to a percentage along the scrub axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Truncated percent. Not clamped: values outside [0, 100] are possible
    /// when the pointer is outside the container.
    pub percent: f64,
    pub time_ms: f64,
}

/// Converts pointer positions into percentages and tracks a smoothed velocity
/// (percent per second) between consecutive samples.
#[derive(Debug, Clone)]
pub struct InputTracker {
    axis: Axis,
    last: Option<Sample>,
    delta_percent: f64,
    delta_ms: f64,
    velocity: f64,
}

impl InputTracker {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            last: None,
            delta_percent: 0.0,
            delta_ms: 0.0,
            velocity: 0.0,
        }
    }

    /// Percent of the container the pointer sits at. `None` when the
    /// container has no extent on the scrub axis.
    pub fn sample(&self, pointer: &Pointer) -> Option<Sample> {
        let size = self.axis.pick(pointer.bounds.size);
        if size.is_nan() || size <= 0.0 {
            return None;
        }
        let position = self.axis.pick(pointer.position) - self.axis.pick(pointer.bounds.origin);
        let percent = (100.0 * f64::from(position) / f64::from(size)).trunc();
        if !percent.is_finite() {
            return None;
        }
        Some(Sample {
            percent,
            time_ms: pointer.time_ms,
        })
    }

    /// Fold a sample into the delta and velocity estimate.
    pub fn record(&mut self, sample: Sample) {
        if let Some(last) = self.last {
            self.delta_percent = sample.percent - last.percent;
            self.delta_ms = sample.time_ms - last.time_ms;
        } else {
            self.delta_percent = 0.0;
            self.delta_ms = 0.0;
        }
        let instantaneous = 1000.0 * self.delta_percent / (1.0 + self.delta_ms);
        self.velocity =
            VELOCITY_SMOOTHING * instantaneous + (1.0 - VELOCITY_SMOOTHING) * self.velocity;
        self.last = Some(sample);
    }

    /// Sample and record in one step.
    pub fn track(&mut self, pointer: &Pointer) -> Option<Sample> {
        let sample = self.sample(pointer)?;
        self.record(sample);
        Some(sample)
    }

    /// Forget motion history. `origin` becomes the reference for the next delta.
    pub fn reset(&mut self, origin: Option<Sample>) {
        self.last = origin;
        self.delta_percent = 0.0;
        self.delta_ms = 0.0;
        self.velocity = 0.0;
    }

    /// Smoothed velocity in percent per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Last (percent, milliseconds) delta.
    pub fn delta(&self) -> (f64, f64) {
        (self.delta_percent, self.delta_ms)
    }

    pub fn last(&self) -> Option<Sample> {
        self.last
    }
}
