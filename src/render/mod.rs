mod labels;
mod surface;

pub use labels::{LabelValue, TextLabel};
pub use surface::{PixelSurface, Rgba};
