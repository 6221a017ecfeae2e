use crate::core::types::{Bar, RateBar};

/// Price/volume envelope of the visible window, gathered in one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub min_low: f64,
    pub max_high: f64,
    pub max_volume: f64,
}

impl WindowStats {
    /// Scans the visible prefix `bars[..date_range]` for the minimum low,
    /// maximum high and maximum volume. Older history is not inspected.
    #[must_use]
    pub fn scan(bars: &[Bar], date_range: usize) -> Self {
        debug_assert!(date_range >= 1 && date_range <= bars.len());

        let mut min_low = f64::INFINITY;
        let mut max_high = f64::NEG_INFINITY;
        let mut max_volume = 0.0_f64;

        for bar in &bars[..date_range] {
            min_low = min_low.min(bar.low);
            max_high = max_high.max(bar.high);
            max_volume = max_volume.max(bar.volume);
        }

        Self {
            min_low,
            max_high,
            max_volume,
        }
    }
}

/// Newest-first permyriad-change series derived from a visible window.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSeries {
    /// One entry per visible bar, same ordering as the source series. The
    /// entry for the oldest visible bar is `RateBar::ZERO`.
    pub bars: Vec<RateBar>,
    /// `(min derived low, max derived high)` over the window, excluding the
    /// zero baseline bar. `None` when fewer than two bars are visible.
    pub extremes: Option<(i64, i64)>,
}

/// Derives the percentage-change series for `bars[..date_range]`.
///
/// Walks from the oldest visible bar toward the newest, expressing each bar's
/// OHLC as permyriad change against the immediately preceding close,
/// truncated toward zero.
#[must_use]
pub fn derive_rate_series(bars: &[Bar], date_range: usize) -> RateSeries {
    debug_assert!(date_range >= 1 && date_range <= bars.len());

    let mut min_rate = i64::MAX;
    let mut max_rate = i64::MIN;
    let mut prev_close = bars[date_range - 1].close;
    let mut rates = vec![RateBar::ZERO];

    for bar in bars[..date_range.saturating_sub(1)].iter().rev() {
        let permyriad = |value: f64| ((value / prev_close - 1.0) * 10_000.0) as i64;
        let rate = RateBar {
            open: permyriad(bar.open),
            high: permyriad(bar.high),
            low: permyriad(bar.low),
            close: permyriad(bar.close),
        };

        max_rate = max_rate.max(rate.high);
        min_rate = min_rate.min(rate.low);

        rates.push(rate);
        prev_close = bar.close;
    }

    rates.reverse();

    let extremes = (date_range >= 2 && min_rate <= max_rate).then_some((min_rate, max_rate));
    RateSeries {
        bars: rates,
        extremes,
    }
}
