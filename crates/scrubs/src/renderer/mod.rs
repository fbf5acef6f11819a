pub mod style;
pub mod traits;

pub use style::{layer_styles, LayerStyle, StyleProperty};
pub use traits::{RecordingSurface, Surface};
