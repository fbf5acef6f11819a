use glam::Vec2;

/// Axis-aligned box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rect at the page origin with the given size.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }
}

/// A pointer position together with the container it was measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// Absolute (page) position of the pointer.
    pub position: Vec2,
    /// The container's page offset and size at the time of the event.
    pub bounds: Rect,
    /// Event time in milliseconds.
    pub time_ms: f64,
}

impl Pointer {
    pub fn new(position: Vec2, bounds: Rect, time_ms: f64) -> Self {
        Self {
            position,
            bounds,
            time_ms,
        }
    }
}

/// Pointer/touch input a scrubber understands.
/// Host-agnostic: mouse and touch both map onto these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse button or first touch went down inside the container.
    PointerDown(Pointer),
    /// The pointer moved while over the container.
    PointerMove(Pointer),
    /// The button or touch was released.
    PointerUp { time_ms: f64 },
    /// The sequence was interrupted (touch cancel, pointer left the container).
    PointerCancel { time_ms: f64 },
}

impl InputEvent {
    pub fn time_ms(&self) -> f64 {
        match self {
            InputEvent::PointerDown(p) | InputEvent::PointerMove(p) => p.time_ms,
            InputEvent::PointerUp { time_ms } | InputEvent::PointerCancel { time_ms } => *time_ms,
        }
    }
}
