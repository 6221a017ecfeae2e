//! pixelchart: software-rasterized OHLCV candlestick charts.
//!
//! This crate turns an ordered, newest-first price/volume series into a packed
//! RGBA pixel buffer: candlesticks, volume bars, moving averages, RSI and a
//! parabolic stop-and-reverse overlay, in absolute-price or
//! percentage-change display mode. The host owns presentation: it blits the
//! buffer wherever it wants and draws the raw-valued text labels the renderer
//! emits.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod ta;
pub mod telemetry;

pub use api::{ChartConfig, ChartRenderer};
pub use error::{ChartError, ChartResult};
