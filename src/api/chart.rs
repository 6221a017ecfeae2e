use tracing::{debug, trace, warn};

use crate::api::config::{ChartConfig, ChartStyle, IndicatorConfig};
use crate::core::{Bar, BandScale, ChartDate, ChartMode, RateBar, WindowStats, derive_rate_series};
use crate::error::{ChartError, ChartResult};
use crate::render::{LabelValue, PixelSurface, Rgba, TextLabel};
use crate::ta::{ParabolicTracker, RelativeStrengthIndex, WindowedMean};

/// Top row of the price/candlestick band.
const PRICE_BAND_TOP: f64 = 10.0;
/// Rows reserved below the price band for the volume band and axis labels.
const PRICE_BAND_BOTTOM_INSET: u32 = 110;
const VOLUME_TOP_INSET: u32 = 90;
const VOLUME_BOTTOM_INSET: u32 = 10;
/// RSI support band offset from the volume-band center, in pixels.
const RSI_SUPPORT_OFFSET_PX: f64 = 25.0;
/// Left axis-label gutter that gets alpha-faded after drawing.
const GUTTER_WIDTH_PX: f64 = 50.0;
const GUTTER_ALPHA_FACTOR: f64 = 0.25;
/// Permyriad level of the +/-5% guides in percentage-change mode.
const RATE_SUPPORT_PERMYRIAD: i64 = 500;
const MONTH_LABEL_RIGHT_INSET: f64 = 64.0;
const MONTH_LABEL_DROP_PX: f64 = 10.0;

/// Fixed horizontal band boundaries derived from the surface height.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BandLayout {
    price_top: f64,
    price_bottom: f64,
    volume_top: f64,
    volume_bottom: f64,
}

impl BandLayout {
    fn for_height(height: u32) -> ChartResult<Self> {
        if height <= PRICE_BAND_BOTTOM_INSET + PRICE_BAND_TOP as u32 {
            return Err(ChartError::InvalidData(format!(
                "surface height {height} leaves no room for the chart bands"
            )));
        }

        Ok(Self {
            price_top: PRICE_BAND_TOP,
            price_bottom: f64::from(height - PRICE_BAND_BOTTOM_INSET),
            volume_top: f64::from(height - VOLUME_TOP_INSET),
            volume_bottom: f64::from(height - VOLUME_BOTTOM_INSET),
        })
    }
}

/// Bar fields under a hovered pixel, plus the value the pixel row maps to.
///
/// In `PercentChange` mode the OHLC fields and `level` are permyriad changes
/// (divide by 100 for percent); in `Price` mode they are price units. `level`
/// is truncated toward zero and `None` when the active value range is
/// degenerate.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct HoverData {
    pub date: ChartDate,
    pub mode: ChartMode,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub level: Option<f64>,
}

/// Renders a newest-first OHLCV series into an owned `PixelSurface`.
///
/// One renderer binds to one surface for its whole life. `set_data` replaces
/// the series and redraws; `set_mode` redraws from cached window state.
/// Redraws are synchronous, deterministic and idempotent, so hosts re-render
/// on demand instead of patching incrementally.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    surface: PixelSurface,
    layout: BandLayout,
    style: ChartStyle,
    indicators: IndicatorConfig,
    mode: ChartMode,
    series: Vec<Bar>,
    rates: Vec<RateBar>,
    rate_extremes: Option<(i64, i64)>,
    stats: Option<WindowStats>,
    date_range: usize,
    candle_width: f64,
    average_costs: Vec<f64>,
    labels: Vec<TextLabel>,
}

impl ChartRenderer {
    /// Creates a renderer bound to a fresh surface of the configured size.
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.indicators.validate()?;
        let surface = PixelSurface::new(config.width, config.height)?;
        let layout = BandLayout::for_height(config.height)?;

        Ok(Self {
            surface,
            layout,
            style: config.style,
            indicators: config.indicators,
            mode: ChartMode::default(),
            series: Vec::new(),
            rates: Vec::new(),
            rate_extremes: None,
            stats: None,
            date_range: 0,
            candle_width: 0.0,
            average_costs: Vec::new(),
            labels: Vec::new(),
        })
    }

    #[must_use]
    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    /// The presentable pixel buffer.
    #[must_use]
    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    /// Text draw calls emitted by the last redraw, for the host to format
    /// and render.
    #[must_use]
    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    #[must_use]
    pub fn series(&self) -> &[Bar] {
        &self.series
    }

    /// Derived permyriad-change series, same newest-first order as `series`,
    /// one entry per visible bar.
    #[must_use]
    pub fn rate_series(&self) -> &[RateBar] {
        &self.rates
    }

    #[must_use]
    pub fn date_range(&self) -> usize {
        self.date_range
    }

    #[must_use]
    pub fn average_costs(&self) -> &[f64] {
        &self.average_costs
    }

    /// Close of the most recent bar, if data is loaded.
    #[must_use]
    pub fn last_close(&self) -> Option<f64> {
        self.series.first().map(|bar| bar.close)
    }

    /// Replaces the loaded series and redraws in the active mode.
    ///
    /// `date_range` is the number of newest bars to render and is clamped to
    /// the series length. `average_costs` holds zero or more price reference
    /// levels; each one inside the visible price range is drawn as a
    /// horizontal line in price mode.
    pub fn set_data(
        &mut self,
        series: Vec<Bar>,
        date_range: usize,
        average_costs: Vec<f64>,
    ) -> ChartResult<()> {
        if series.is_empty() {
            return Err(ChartError::InvalidData("series must not be empty".to_owned()));
        }
        if date_range == 0 {
            return Err(ChartError::InvalidData("date range must be > 0".to_owned()));
        }
        if average_costs.iter().any(|cost| !cost.is_finite()) {
            return Err(ChartError::InvalidData(
                "average costs must be finite".to_owned(),
            ));
        }

        if date_range > series.len() {
            warn!(
                requested = date_range,
                available = series.len(),
                "date range exceeds series length, clamping"
            );
        }
        let date_range = date_range.min(series.len());
        let stats = WindowStats::scan(&series, date_range);
        let rate_series = derive_rate_series(&series, date_range);

        debug!(
            bars = series.len(),
            date_range,
            min_low = stats.min_low,
            max_high = stats.max_high,
            max_volume = stats.max_volume,
            "set series data"
        );

        self.series = series;
        self.rates = rate_series.bars;
        self.rate_extremes = rate_series.extremes;
        self.stats = Some(stats);
        self.date_range = date_range;
        self.candle_width = f64::from(self.surface.width()) / date_range as f64;
        self.average_costs = average_costs;

        self.redraw();
        Ok(())
    }

    /// Switches between price and percentage-change display and redraws from
    /// the cached window state. No rescan happens.
    pub fn set_mode(&mut self, mode: ChartMode) {
        self.mode = mode;
        trace!(?mode, "set display mode");
        if self.date_range > 0 {
            self.redraw();
        }
    }

    /// Resolves the bar under pixel column `x` and the value pixel row `y`
    /// maps to in the active mode. Pure read.
    ///
    /// Bar index is `date_range - trunc(x / bar_width) - 1`, clamped to the
    /// visible window: column 0 is the oldest visible bar, the rightmost
    /// column is the newest (index 0).
    pub fn date_data(&self, x: f64, y: f64) -> ChartResult<HoverData> {
        if self.date_range == 0 {
            return Err(ChartError::InvalidData("no data loaded".to_owned()));
        }

        let index = (self.date_range as i64 - (x / self.candle_width) as i64 - 1)
            .clamp(0, self.date_range as i64 - 1) as usize;
        let bar = self.series[index];
        let rate = self.rates[index];

        Ok(match self.mode {
            ChartMode::Price => HoverData {
                date: bar.date,
                mode: self.mode,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
                level: self
                    .price_scale()
                    .map(|scale| scale.pixel_to_value(y) as f64),
            },
            ChartMode::PercentChange => HoverData {
                date: bar.date,
                mode: self.mode,
                open: rate.open as f64,
                high: rate.high as f64,
                low: rate.low as f64,
                close: rate.close as f64,
                volume: bar.volume,
                level: self
                    .rate_scale()
                    .map(|scale| scale.pixel_to_value(y) as f64),
            },
        })
    }

    fn price_scale(&self) -> Option<BandScale> {
        let stats = self.stats?;
        BandScale::new(
            stats.min_low,
            stats.max_high,
            self.layout.price_top,
            self.layout.price_bottom,
        )
        .ok()
    }

    fn rate_scale(&self) -> Option<BandScale> {
        let (min_rate, max_rate) = self.rate_extremes?;
        BandScale::new(
            min_rate as f64,
            max_rate as f64,
            self.layout.price_top,
            self.layout.price_bottom,
        )
        .ok()
    }

    fn redraw(&mut self) {
        trace!(mode = ?self.mode, date_range = self.date_range, "redraw");
        self.labels.clear();
        match self.mode {
            ChartMode::Price => self.draw_price_chart(),
            ChartMode::PercentChange => self.draw_rate_chart(),
        }
    }

    fn draw_price_chart(&mut self) {
        let scale = self.price_scale();
        self.draw_shared(scale, scale);

        if let Some(scale) = scale {
            let (min, max) = scale.domain();
            let width = f64::from(self.surface.width());

            for &cost in &self.average_costs {
                if cost > min && cost < max {
                    let y = scale.value_to_pixel(cost) as f64;
                    self.surface
                        .draw_line(0.0, y, width, y, self.style.average_cost);
                }
            }

            let max_range = max - min;
            let mut x = 0.0;
            for i in (0..self.date_range).rev() {
                let bar = self.series[i];
                self.draw_candle(x, bar.open, bar.high, bar.low, bar.close, scale, max_range);
                x += self.candle_width;
            }
        }

        self.fade_gutter();
        self.emit_shared_labels();
        if let Some(scale) = scale {
            self.emit_price_labels(scale);
        }
    }

    fn draw_rate_chart(&mut self) {
        let scale = self.rate_scale();
        self.draw_shared(scale, None);

        if let Some(scale) = scale {
            let (min, max) = scale.domain();
            let width = f64::from(self.surface.width());

            for (level, color) in [
                (0_i64, self.style.rate_center),
                (RATE_SUPPORT_PERMYRIAD, self.style.rate_support),
                (-RATE_SUPPORT_PERMYRIAD, self.style.rate_support),
            ] {
                let level = level as f64;
                if level >= min && level <= max {
                    let y = scale.value_to_pixel(level) as f64;
                    self.surface.draw_line(0.0, y, width, y, color);
                }
            }

            let max_range = max - min;
            let mut x = 0.0;
            for i in (0..self.date_range).rev() {
                let rate = self.rates[i];
                self.draw_candle(
                    x,
                    rate.open as f64,
                    rate.high as f64,
                    rate.low as f64,
                    rate.close as f64,
                    scale,
                    max_range,
                );
                x += self.candle_width;
            }
        }

        self.fade_gutter();
        self.emit_shared_labels();
        if let Some(scale) = scale {
            self.emit_rate_labels(scale);
        }
    }

    /// Grid, volume bars and indicator overlays shared by both modes.
    ///
    /// `range_scale` positions the value-extreme reference lines;
    /// `overlay_scale` maps moving-average and parabolic values and is `None`
    /// in percentage-change mode, where those overlays are not drawn. RSI
    /// lives in its own fixed band and is drawn in both modes.
    fn draw_shared(&mut self, range_scale: Option<BandScale>, overlay_scale: Option<BandScale>) {
        let Some(stats) = self.stats else {
            return;
        };

        self.surface.clear(Rgba::TRANSPARENT);

        let width = f64::from(self.surface.width());
        let height = f64::from(self.surface.height());
        let w = self.candle_width;

        // Vertical separators where the calendar month changes.
        let mut x = 0.0;
        let mut month = self.series[self.date_range - 1].date.month;
        for i in (0..self.date_range).rev() {
            let bar_month = self.series[i].date.month;
            if bar_month != month {
                self.surface
                    .draw_line(x, 0.0, x, height, self.style.monthly_separator);
                month = bar_month;
            }
            x += w;
        }

        // Reference lines at the vertical extremes of the active value range.
        if let Some(scale) = range_scale {
            let (min, max) = scale.domain();
            let min_pos = scale.value_to_pixel(min) as f64;
            let max_pos = scale.value_to_pixel(max) as f64;
            self.surface
                .draw_line(0.0, min_pos, width, min_pos, self.style.horizon_line);
            self.surface
                .draw_line(0.0, max_pos, width, max_pos, self.style.horizon_line);
        }

        // Volume band edges.
        let volume_top = self.layout.volume_top;
        let volume_bottom = self.layout.volume_bottom;
        self.surface
            .draw_line(0.0, volume_bottom, width, volume_bottom, self.style.horizon_line);
        self.surface
            .draw_line(0.0, volume_top, width, volume_top, self.style.horizon_line);

        // RSI center and support band, centered in the volume band.
        let rsi_center = (volume_bottom - volume_top) / 2.0 + volume_top;
        for (y, color) in [
            (rsi_center - RSI_SUPPORT_OFFSET_PX, self.style.rsi_support),
            (rsi_center, self.style.rsi_center),
            (rsi_center + RSI_SUPPORT_OFFSET_PX, self.style.rsi_support),
        ] {
            self.surface.draw_line(0.0, y, width, y, color);
        }

        // Volume bars, proportional to the window's maximum volume.
        if stats.max_volume > 0.0 {
            let band = volume_bottom - volume_top - 1.0;
            let mut x = 0.0;
            for i in (0..self.date_range).rev() {
                let volume = self.series[i].volume;
                let h = (volume / stats.max_volume * band) as i64;
                if h > 0 {
                    self.surface.draw_rect(
                        x,
                        volume_bottom - h as f64,
                        w,
                        h as f64,
                        self.style.volume,
                    );
                }
                x += w;
            }
        }

        self.draw_indicators(overlay_scale);
    }

    /// Walks the window oldest to newest, feeding the indicators and drawing
    /// their overlays. Starts `long_ma_window` bars before the window so the
    /// slowest indicator is warm at the left edge; the extra bars advance
    /// indicator state but draw nothing.
    fn draw_indicators(&mut self, overlay_scale: Option<BandScale>) {
        let mut short_ma = WindowedMean::new(self.indicators.short_ma_window);
        let mut long_ma = WindowedMean::new(self.indicators.long_ma_window);
        let mut rsi = RelativeStrengthIndex::new(self.indicators.rsi_period);
        let mut parabolic = ParabolicTracker::new(self.indicators.parabolic_step);

        let mut prev_short: Option<i64> = None;
        let mut prev_long: Option<i64> = None;
        let mut prev_rsi: Option<i64> = None;

        let len = self.series.len();
        let height = i64::from(self.surface.height());
        let w = self.candle_width;
        let warmup = self.indicators.long_ma_window;
        let mut x = 0.0;

        for i in (0..=self.date_range + warmup).rev() {
            if i >= len {
                continue;
            }
            let bar = self.series[i];
            let cx = w / 2.0 + x;
            // Connecting segments are drawn from the second visible bar on;
            // the first ready point of each indicator has no predecessor.
            let draws = i + 1 < self.date_range;

            if let Some(scale) = overlay_scale {
                if short_ma.push(bar.close) {
                    let v = scale.value_to_pixel(short_ma.mean());
                    if let Some(prev) = prev_short {
                        if draws {
                            self.surface.draw_line(
                                cx - w,
                                prev as f64,
                                cx,
                                v as f64,
                                self.style.ma_short,
                            );
                        }
                    }
                    prev_short = Some(v);
                }

                if long_ma.push(bar.close) {
                    let v = scale.value_to_pixel(long_ma.mean());
                    if let Some(prev) = prev_long {
                        if draws {
                            self.surface.draw_line(
                                cx - w,
                                prev as f64,
                                cx,
                                v as f64,
                                self.style.ma_long,
                            );
                        }
                    }
                    prev_long = Some(v);
                }

                let stop = parabolic.update(bar.low, bar.high, bar.close);
                if draws {
                    let v = scale.value_to_pixel(stop);
                    let color = if parabolic.is_uptrend() {
                        self.style.parabolic_up
                    } else {
                        self.style.parabolic_down
                    };
                    self.surface
                        .draw_rect(x + 1.0, (v - 1) as f64, w - 2.0, 3.0, color);
                }
            }

            if rsi.push(bar.close) {
                let v = height - rsi.value();
                if let Some(prev) = prev_rsi {
                    if draws {
                        self.surface.draw_line(
                            cx - w,
                            prev as f64,
                            cx,
                            v as f64,
                            self.style.rsi_line,
                        );
                    }
                }
                prev_rsi = Some(v);
            }

            if i < self.date_range {
                x += w;
            }
        }
    }

    /// Body spans open..close with a minimum height of one pixel; the wick
    /// spans low..high through the body center column.
    fn draw_candle(
        &mut self,
        x: f64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        scale: BandScale,
        max_range: f64,
    ) {
        let w = self.candle_width;
        let bullish = open < close;
        let top = scale.value_to_pixel(if bullish { close } else { open });
        let cx = ((w / 2.0) as i64 + x as i64) as f64;

        let band = self.layout.price_bottom - self.layout.price_top;
        let mut h = ((close - open).abs() / max_range * band) as i64;
        if h <= 0 {
            h = 1;
        }

        let color = if bullish {
            self.style.candle_up
        } else {
            self.style.candle_down
        };
        self.surface.draw_line(
            cx,
            scale.value_to_pixel(low) as f64,
            cx,
            scale.value_to_pixel(high) as f64,
            color,
        );
        self.surface.draw_rect(x, top as f64, w, h as f64, color);
    }

    /// Recedes the left axis-label gutter without recoloring it.
    fn fade_gutter(&mut self) {
        let height = f64::from(self.surface.height());
        self.surface
            .rect_alpha(0.0, 0.0, GUTTER_WIDTH_PX, height, GUTTER_ALPHA_FACTOR);
    }

    /// Labels shared by both modes: peak volume and month boundaries.
    fn emit_shared_labels(&mut self) {
        let Some(stats) = self.stats else {
            return;
        };
        let text = self.style.text;

        self.labels.push(TextLabel::new(
            LabelValue::Volume(stats.max_volume),
            0.0,
            self.layout.volume_top,
            text,
        ));

        let width = f64::from(self.surface.width());
        let w = self.candle_width;
        let mut x = 0.0;
        let mut month = self.series[self.date_range - 1].date.month;
        for i in (0..self.date_range).rev() {
            let date = self.series[i].date;
            if date.month != month {
                self.labels.push(TextLabel::new(
                    LabelValue::MonthMark {
                        year: date.year,
                        month: date.month,
                    },
                    x,
                    self.layout.price_bottom + MONTH_LABEL_DROP_PX,
                    text,
                ));
                month = date.month;
            }
            x += w;
            if x >= width - MONTH_LABEL_RIGHT_INSET {
                break;
            }
        }
    }

    fn emit_price_labels(&mut self, scale: BandScale) {
        let (min, max) = scale.domain();
        let text = self.style.text;

        self.labels.push(TextLabel::new(
            LabelValue::Price(min),
            0.0,
            scale.value_to_pixel(min) as f64,
            text,
        ));
        self.labels.push(TextLabel::new(
            LabelValue::Price(max),
            0.0,
            scale.value_to_pixel(max) as f64,
            text,
        ));

        for &cost in &self.average_costs {
            if cost > min && cost < max {
                self.labels.push(TextLabel::new(
                    LabelValue::Price(cost),
                    0.0,
                    scale.value_to_pixel(cost) as f64,
                    text,
                ));
            }
        }
    }

    fn emit_rate_labels(&mut self, scale: BandScale) {
        let Some((min_rate, max_rate)) = self.rate_extremes else {
            return;
        };
        let text = self.style.text;

        self.labels.push(TextLabel::new(
            LabelValue::Rate(min_rate),
            0.0,
            scale.value_to_pixel(min_rate as f64) as f64,
            text,
        ));
        self.labels.push(TextLabel::new(
            LabelValue::Rate(max_rate),
            0.0,
            scale.value_to_pixel(max_rate as f64) as f64,
            text,
        ));
        self.labels.push(TextLabel::new(
            LabelValue::Rate(0),
            0.0,
            scale.value_to_pixel(0.0) as f64,
            text,
        ));
        if max_rate > RATE_SUPPORT_PERMYRIAD {
            self.labels.push(TextLabel::new(
                LabelValue::Rate(RATE_SUPPORT_PERMYRIAD),
                0.0,
                scale.value_to_pixel(RATE_SUPPORT_PERMYRIAD as f64) as f64,
                text,
            ));
        }
        if min_rate < -RATE_SUPPORT_PERMYRIAD {
            self.labels.push(TextLabel::new(
                LabelValue::Rate(-RATE_SUPPORT_PERMYRIAD),
                0.0,
                scale.value_to_pixel(-RATE_SUPPORT_PERMYRIAD as f64) as f64,
                text,
            ));
        }
    }
}
