use crate::error::{ChartError, ChartResult};

/// Value-to-pixel mapping over one horizontal band of the surface.
///
/// Maps a `[min, max]` value range onto the inverted-Y pixel rows
/// `[top_px, bottom_px]` (larger values sit higher on screen) and back.
/// Both directions truncate toward zero, preserving pixel-grid snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    min: f64,
    max: f64,
    top_px: f64,
    bottom_px: f64,
}

impl BandScale {
    /// Builds a scale for a value range over a pixel band.
    ///
    /// A degenerate range (`min == max`, non-finite bounds) or an empty band
    /// is rejected so that no non-finite coordinate can reach the surface.
    pub fn new(min: f64, max: f64, top_px: f64, bottom_px: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() || min == max {
            return Err(ChartError::InvalidData(
                "scale value range must be finite and non-zero".to_owned(),
            ));
        }

        if !top_px.is_finite() || !bottom_px.is_finite() || bottom_px <= top_px {
            return Err(ChartError::InvalidData(
                "scale pixel band must be finite and non-empty".to_owned(),
            ));
        }

        Ok(Self {
            min,
            max,
            top_px,
            bottom_px,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Maps a value to the pixel row it occupies within the band.
    #[must_use]
    pub fn value_to_pixel(self, value: f64) -> i64 {
        let range = self.max - self.min;
        let band = self.bottom_px - self.top_px;
        (band - (value - self.min) / range * band + self.top_px) as i64
    }

    /// Inverse of `value_to_pixel`, truncated toward zero.
    #[must_use]
    pub fn pixel_to_value(self, pixel: f64) -> i64 {
        let range = self.max - self.min;
        let band = self.bottom_px - self.top_px;
        (range - (pixel - self.top_px) / band * range + self.min) as i64
    }
}
