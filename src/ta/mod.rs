//! Streaming technical indicators.
//!
//! Each indicator consumes one observation per bar, walking the series from
//! oldest toward newest, and reports when it has accumulated enough history
//! to emit a meaningful value. The chart recomputes them from fresh instances
//! on every redraw; visible windows are small enough that incremental caching
//! has not been worth its complexity.

pub mod parabolic;
pub mod rsi;
pub mod window_mean;

pub use parabolic::ParabolicTracker;
pub use rsi::RelativeStrengthIndex;
pub use window_mean::WindowedMean;
