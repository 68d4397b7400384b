pub mod background;
pub mod enhance;

pub use background::remove_background;
pub use enhance::{enhance_color, scale_channel};
