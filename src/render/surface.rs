use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Packed color in `0xRRGGBBAA` channel order, the only encoding that crosses
/// the crate boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    pub const TRANSPARENT: Self = Self(0);

    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[must_use]
    pub const fn blue(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[must_use]
    pub const fn alpha(self) -> u8 {
        self.0 as u8
    }

    /// Converts the boundary encoding into the buffer's storage order
    /// (least-significant byte red, most-significant byte alpha). This is the
    /// only place channel reordering happens.
    const fn to_native(self) -> u32 {
        let color = self.0;
        let r = (color >> 24) & 0xff;
        let g = (color >> 16) & 0xff;
        let b = (color >> 8) & 0xff;
        let a = color & 0xff;
        (a << 24) | (b << 16) | (g << 8) | r
    }

    const fn from_native(native: u32) -> Self {
        let a = (native >> 24) & 0xff;
        let b = (native >> 16) & 0xff;
        let g = (native >> 8) & 0xff;
        let r = native & 0xff;
        Self((r << 24) | (g << 16) | (b << 8) | a)
    }
}

/// Software rasterization target: a packed RGBA pixel buffer with line,
/// rectangle, alpha-fade and clear operations. Knows nothing about charts.
///
/// All coordinates are truncated toward zero before use, and every write is
/// bounds-checked; drawing that reaches outside the surface is clipped, not
/// an error.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelSurface {
    /// Creates a surface zero-initialized to transparent black.
    pub fn new(width: u32, height: u32) -> ChartResult<Self> {
        if width == 0 || height == 0 {
            return Err(ChartError::InvalidSurface { width, height });
        }

        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel cells in native storage order, for blitting.
    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Reads one pixel back in boundary `0xRRGGBBAA` encoding.
    #[must_use]
    pub fn rgba_at(&self, x: i64, y: i64) -> Option<Rgba> {
        self.index(x, y).map(|i| Rgba::from_native(self.pixels[i]))
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn plot(&mut self, x: i64, y: i64, native: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = native;
        }
    }

    /// Sets every pixel to `color`.
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color.to_native());
    }

    /// Draws a one-pixel line between two points, endpoints included.
    ///
    /// Horizontal and vertical lines fill the exact inclusive span between
    /// the endpoints regardless of argument order; everything else steps an
    /// integer Bresenham path.
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Rgba) {
        let (mut x1, mut y1) = (x1 as i64, y1 as i64);
        let (x2, y2) = (x2 as i64, y2 as i64);
        let native = color.to_native();

        if y1 == y2 {
            for x in x1.min(x2)..=x1.max(x2) {
                self.plot(x, y1, native);
            }
        } else if x1 == x2 {
            for y in y1.min(y2)..=y1.max(y2) {
                self.plot(x1, y, native);
            }
        } else {
            let dx = (x2 - x1).abs();
            let dy = (y2 - y1).abs();
            let sx = if x1 < x2 { 1 } else { -1 };
            let sy = if y1 < y2 { 1 } else { -1 };
            let mut err = dx - dy;

            loop {
                self.plot(x1, y1, native);
                if x1 == x2 && y1 == y2 {
                    break;
                }
                let e2 = err * 2;
                if e2 > -dy {
                    err -= dy;
                    x1 += sx;
                }
                if e2 < dx {
                    err += dx;
                    y1 += sy;
                }
            }
        }
    }

    /// Solid-fills the half-open rectangle of `w` columns by `h` rows
    /// starting at `(x, y)`.
    pub fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        let (x, y, w, h) = (x as i64, y as i64, w as i64, h as i64);
        let native = color.to_native();

        for row in y..y.saturating_add(h.max(0)) {
            for col in x..x.saturating_add(w.max(0)) {
                self.plot(col, row, native);
            }
        }
    }

    /// Multiplies the alpha channel of every non-transparent pixel in the
    /// rectangle by `factor` (fractional, truncating). Fully transparent
    /// pixels and color channels are left untouched; the result saturates
    /// at fully opaque, so a factor above 1.0 cannot wrap the channel.
    pub fn rect_alpha(&mut self, x: f64, y: f64, w: f64, h: f64, factor: f64) {
        let (x, y, w, h) = (x as i64, y as i64, w as i64, h as i64);

        for row in y..y.saturating_add(h.max(0)) {
            for col in x..x.saturating_add(w.max(0)) {
                let Some(i) = self.index(col, row) else {
                    continue;
                };
                let pixel = self.pixels[i];
                let alpha = pixel >> 24;
                if alpha != 0 {
                    let faded = ((alpha as f64 * factor) as u32).min(0xff);
                    self.pixels[i] = (pixel & 0x00ff_ffff) | (faded << 24);
                }
            }
        }
    }
}
