use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Rgba;

/// Construction-time configuration for a `ChartRenderer`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub style: ChartStyle,
    pub indicators: IndicatorConfig,
}

impl ChartConfig {
    /// Creates a config with the default palette and indicator tuning.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            style: ChartStyle::default(),
            indicators: IndicatorConfig::default(),
        }
    }
}

/// Overlay indicator tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub short_ma_window: usize,
    pub long_ma_window: usize,
    pub rsi_period: usize,
    pub parabolic_step: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            short_ma_window: 5,
            long_ma_window: 25,
            rsi_period: 14,
            parabolic_step: 0.02,
        }
    }
}

impl IndicatorConfig {
    pub fn validate(self) -> ChartResult<()> {
        if self.short_ma_window == 0 || self.long_ma_window == 0 {
            return Err(ChartError::InvalidData(
                "moving-average windows must be > 0".to_owned(),
            ));
        }
        if self.rsi_period < 2 {
            return Err(ChartError::InvalidData("rsi period must be >= 2".to_owned()));
        }
        if !self.parabolic_step.is_finite() || self.parabolic_step <= 0.0 {
            return Err(ChartError::InvalidData(
                "parabolic step must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Chart palette in boundary `0xRRGGBBAA` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub average_cost: Rgba,
    pub monthly_separator: Rgba,
    pub horizon_line: Rgba,
    pub text: Rgba,
    pub candle_up: Rgba,
    pub candle_down: Rgba,
    pub volume: Rgba,
    pub ma_short: Rgba,
    pub ma_long: Rgba,
    pub parabolic_up: Rgba,
    pub parabolic_down: Rgba,
    pub rsi_center: Rgba,
    pub rsi_support: Rgba,
    pub rsi_line: Rgba,
    pub rate_center: Rgba,
    pub rate_support: Rgba,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            average_cost: Rgba(0x00c4_ff80),
            monthly_separator: Rgba(0x0000_0040),
            horizon_line: Rgba(0x0000_0080),
            text: Rgba(0x0000_00ff),
            candle_up: Rgba(0xff00_00ff),
            candle_down: Rgba(0x00a0_50ff),
            volume: Rgba(0xffff_00ff),
            ma_short: Rgba(0x0080_ffff),
            ma_long: Rgba(0xff80_00ff),
            parabolic_up: Rgba(0xff88_ffff),
            parabolic_down: Rgba(0x88ff_88ff),
            rsi_center: Rgba(0x4040_40ff),
            rsi_support: Rgba(0x2020_20ff),
            rsi_line: Rgba(0x0000_00ff),
            rate_center: Rgba(0x00ff_80ff),
            rate_support: Rgba(0x00ff_80ff),
        }
    }
}
