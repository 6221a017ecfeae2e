mod chart;
mod config;
mod ingest;

pub use chart::{ChartRenderer, HoverData};
pub use config::{ChartConfig, ChartStyle, IndicatorConfig};
pub use ingest::series_from_json;
