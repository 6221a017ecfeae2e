pub mod scale;
pub mod types;
pub mod windowing;

pub use scale::BandScale;
pub use types::{Bar, ChartDate, ChartMode, RateBar};
pub use windowing::{RateSeries, WindowStats, derive_rate_series};
