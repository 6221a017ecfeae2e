use pixelchart::api::{ChartConfig, ChartRenderer};
use pixelchart::core::{Bar, ChartDate, ChartMode, RateBar};
use pixelchart::render::Rgba;

fn bar(date: &str, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Bar {
    Bar::new(
        ChartDate::parse(date).expect("date"),
        open,
        high,
        low,
        close,
        volume,
    )
    .expect("bar")
}

/// Five trading days, newest first, spanning a month boundary.
fn sample_series() -> Vec<Bar> {
    vec![
        bar("2024-02-02", 104.0, 110.0, 103.0, 108.0, 1_500.0),
        bar("2024-02-01", 102.0, 106.0, 101.0, 104.0, 900.0),
        bar("2024-01-31", 100.0, 103.0, 99.0, 102.0, 1_200.0),
        bar("2024-01-30", 101.0, 102.0, 98.0, 100.0, 700.0),
        bar("2024-01-29", 100.0, 104.0, 100.0, 101.0, 2_000.0),
    ]
}

fn renderer() -> ChartRenderer {
    ChartRenderer::new(ChartConfig::new(200, 200)).expect("renderer")
}

fn buffer_contains(renderer: &ChartRenderer, color: Rgba) -> bool {
    let surface = renderer.surface();
    (0..i64::from(surface.height())).any(|y| {
        (0..i64::from(surface.width())).any(|x| surface.rgba_at(x, y) == Some(color))
    })
}

#[test]
fn construction_rejects_surface_too_small_for_bands() {
    assert!(ChartRenderer::new(ChartConfig::new(200, 100)).is_err());
    assert!(ChartRenderer::new(ChartConfig::new(200, 121)).is_ok());
}

#[test]
fn set_data_rejects_empty_series_and_zero_range() {
    let mut chart = renderer();
    assert!(chart.set_data(Vec::new(), 30, Vec::new()).is_err());
    assert!(chart.set_data(sample_series(), 0, Vec::new()).is_err());
}

#[test]
fn set_data_clamps_date_range_to_series_length() {
    let mut chart = renderer();
    chart
        .set_data(sample_series(), 50, Vec::new())
        .expect("set data");

    assert_eq!(chart.date_range(), 5);
}

#[test]
fn rate_series_has_zero_baseline_and_permyriad_steps() {
    let mut chart = renderer();
    chart
        .set_data(sample_series(), 5, Vec::new())
        .expect("set data");

    let rates = chart.rate_series();
    assert_eq!(rates.len(), 5);
    // Oldest visible bar is the baseline.
    assert_eq!(rates[4], RateBar::ZERO);
    // 2024-01-30 close 100 against prior close 101.
    assert_eq!(rates[3].close, ((100.0 / 101.0 - 1.0) * 10_000.0) as i64);
    // Newest bar: close 108 against prior close 104.
    assert_eq!(rates[0].close, ((108.0 / 104.0 - 1.0) * 10_000.0) as i64);
}

#[test]
fn redraw_paints_candles_and_volume_bars() {
    let style = ChartConfig::new(200, 200).style;
    let mut chart = renderer();
    chart
        .set_data(sample_series(), 5, Vec::new())
        .expect("set data");

    // The newest bar closed above its open and sits outside the faded
    // gutter, so the raw bullish color must survive somewhere.
    assert!(buffer_contains(&chart, style.candle_up));
    assert!(buffer_contains(&chart, style.candle_down));
    assert!(buffer_contains(&chart, style.volume));
}

#[test]
fn doji_body_still_renders_at_least_one_pixel_row() {
    let series = vec![
        bar("2024-02-02", 105.0, 110.0, 100.0, 105.0, 500.0),
        bar("2024-02-01", 100.0, 108.0, 99.0, 104.0, 400.0),
    ];
    let style = ChartConfig::new(200, 200).style;
    let mut chart = renderer();
    chart.set_data(series, 2, Vec::new()).expect("set data");

    // open == close renders in the bearish color with a 1px body.
    assert!(buffer_contains(&chart, style.candle_down));
}

#[test]
fn average_cost_line_drawn_only_when_inside_price_range() {
    let style = ChartConfig::new(200, 200).style;

    let mut held = renderer();
    held.set_data(sample_series(), 5, vec![105.0])
        .expect("set data");
    assert!(buffer_contains(&held, style.average_cost));

    let mut out_of_range = renderer();
    out_of_range
        .set_data(sample_series(), 5, vec![500.0])
        .expect("set data");
    assert!(!buffer_contains(&out_of_range, style.average_cost));
}

#[test]
fn redraw_is_deterministic_for_identical_input() {
    let mut first = renderer();
    let mut second = renderer();
    first
        .set_data(sample_series(), 5, vec![105.0])
        .expect("set data");
    second
        .set_data(sample_series(), 5, vec![105.0])
        .expect("set data");

    assert_eq!(first.surface().pixels(), second.surface().pixels());
}

#[test]
fn mode_toggle_round_trip_leaves_state_and_pixels_unchanged() {
    let mut chart = renderer();
    chart
        .set_data(sample_series(), 5, Vec::new())
        .expect("set data");

    let series_before = chart.series().to_vec();
    let rates_before = chart.rate_series().to_vec();
    let pixels_before = chart.surface().pixels().to_vec();

    chart.set_mode(ChartMode::PercentChange);
    assert_eq!(chart.mode(), ChartMode::PercentChange);
    assert_eq!(chart.series(), series_before.as_slice());
    assert_eq!(chart.rate_series(), rates_before.as_slice());

    chart.set_mode(ChartMode::Price);
    assert_eq!(chart.series(), series_before.as_slice());
    assert_eq!(chart.rate_series(), rates_before.as_slice());
    assert_eq!(chart.surface().pixels(), pixels_before.as_slice());
}

#[test]
fn percent_mode_with_single_bar_window_draws_no_candles() {
    let style = ChartConfig::new(200, 200).style;
    let mut chart = renderer();
    chart
        .set_data(sample_series(), 1, Vec::new())
        .expect("set data");
    chart.set_mode(ChartMode::PercentChange);

    // One visible bar yields no rate extremes: the grid is drawn but no
    // mapped geometry is.
    assert!(buffer_contains(&chart, style.horizon_line));
    assert!(!buffer_contains(&chart, style.candle_up));
    assert!(!buffer_contains(&chart, style.candle_down));
}

#[test]
fn month_boundary_draws_vertical_separator() {
    let style = ChartConfig::new(200, 200).style;
    let mut chart = renderer();
    chart
        .set_data(sample_series(), 5, Vec::new())
        .expect("set data");

    // Jan -> Feb three 40px bars in; nothing else paints the top rows.
    let surface = chart.surface();
    assert_eq!(surface.rgba_at(120, 0), Some(style.monthly_separator));
    assert_eq!(surface.rgba_at(80, 0), Some(Rgba::TRANSPARENT));
}

#[test]
fn last_close_reports_newest_bar() {
    let mut chart = renderer();
    assert_eq!(chart.last_close(), None);

    chart
        .set_data(sample_series(), 5, Vec::new())
        .expect("set data");
    assert_eq!(chart.last_close(), Some(108.0));
}
