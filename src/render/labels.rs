use serde::{Deserialize, Serialize};

use crate::render::surface::Rgba;

/// Raw numeric payload of one delegated text label.
///
/// The renderer never formats strings; hosts format these values with
/// whatever locale/precision rules they want and draw them at the given
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LabelValue {
    /// Absolute price level.
    Price(f64),
    /// Permyriad change; divide by 100 for a percent display.
    Rate(i64),
    /// Traded volume.
    Volume(f64),
    /// Calendar month boundary marker.
    MonthMark { year: i32, month: u32 },
}

/// One text draw call delegated to the host: payload, position, fill color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub value: LabelValue,
    pub x: f64,
    pub y: f64,
    pub color: Rgba,
}

impl TextLabel {
    #[must_use]
    pub const fn new(value: LabelValue, x: f64, y: f64, color: Rgba) -> Self {
        Self { value, x, y, color }
    }
}
