pub mod api;
pub mod core;
pub mod error;
pub mod input;
pub mod motion;
pub mod renderer;
pub mod scrubber;

// Re-export key types at crate root for convenience
pub use api::options::{ScrubsOptions, Width, DEFAULT_FRICTION, DEFAULT_START_AT};
pub use api::types::{Axis, InstanceId, Layer, ScrubEvent};
pub use core::capability::{
    Capabilities, StyleProbe, TransformMode, TransformProperty, EXPECTED_MATRIX_2D,
    EXPECTED_MATRIX_3D, PROBE_2D, PROBE_3D,
};
pub use core::registry::InstanceRegistry;
pub use core::scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use error::{Result, ScrubsError};
pub use input::event::{InputEvent, Pointer, Rect};
pub use input::tracker::{InputTracker, Sample};
pub use motion::{Fling, Momentum, MomentumPhase, MomentumStep, MotionEngine, Move, MoveRequest};
pub use renderer::{layer_styles, LayerStyle, RecordingSurface, StyleProperty, Surface};
pub use scrubber::{DragState, Scrubber};
