use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Calendar date split into ordered components at ingestion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChartDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl ChartDate {
    /// Parses a `YYYY-MM-DD` date string into its components.
    pub fn parse(text: &str) -> ChartResult<Self> {
        let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|err| ChartError::InvalidData(format!("malformed date `{text}`: {err}")))?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        })
    }
}

/// One trading-period record. Series are ordered newest first: index 0 is the
/// most recent bar, and every traversal that needs chronological order walks
/// the slice back to front.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: ChartDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Builds a validated bar from raw values.
    ///
    /// Invariants:
    /// - all price values and volume are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    /// - `volume >= 0`
    pub fn new(
        date: ChartDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> ChartResult<Self> {
        if !open.is_finite()
            || !high.is_finite()
            || !low.is_finite()
            || !close.is_finite()
            || !volume.is_finite()
        {
            return Err(ChartError::InvalidData(
                "bar values must be finite".to_owned(),
            ));
        }

        if low > high {
            return Err(ChartError::InvalidData("bar low must be <= high".to_owned()));
        }

        if open < low || open > high || close < low || close > high {
            return Err(ChartError::InvalidData(
                "bar open/close must be within low/high range".to_owned(),
            ));
        }

        if volume < 0.0 {
            return Err(ChartError::InvalidData("bar volume must be >= 0".to_owned()));
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Returns `true` when close price is strictly greater than open price.
    ///
    /// A doji (`open == close`) renders in the bearish color, matching the
    /// candle palette split.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close > self.open
    }
}

/// Per-bar change relative to the chronologically preceding close, in signed
/// permyriad (1/10000) units truncated toward zero. The oldest visible bar is
/// the all-zero baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBar {
    pub open: i64,
    pub high: i64,
    pub low: i64,
    pub close: i64,
}

impl RateBar {
    pub const ZERO: Self = Self {
        open: 0,
        high: 0,
        low: 0,
        close: 0,
    };

    /// Returns `true` when the permyriad close is strictly positive vs. open.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close > self.open
    }
}

/// Active vertical-axis interpretation for rendering and hover lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ChartMode {
    /// Absolute price units on the vertical axis.
    #[default]
    Price,
    /// Permyriad change relative to each bar's preceding close on the
    /// vertical axis.
    PercentChange,
}
