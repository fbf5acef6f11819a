pub mod engine;
pub mod momentum;

pub use engine::{MotionEngine, Move, MoveRequest};
pub use momentum::{Fling, Momentum, MomentumPhase, MomentumStep};
