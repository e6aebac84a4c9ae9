pub mod concave;
pub mod padding;

pub use concave::*;
pub use padding::*;
