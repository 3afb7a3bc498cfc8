//! The mutable draw surface and its detached snapshots.
//!
//! The surface is a dense row-major RGB buffer. Variants repaint it in full
//! every frame; callers only ever see `Raster` snapshots, which are plain
//! owned data and safe to hold across subsequent draws.

use crate::color::{Color, Rgb8};
use crate::core::Canvas;

pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgb8>,
}

impl Surface {
    /// A fresh surface is fully black, so a raster extracted before the
    /// first draw is already well-defined.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            pixels: vec![Rgb8::BLACK; canvas.pixel_count()],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        let c = color.to_rgb8();
        self.pixels.fill(c);
    }

    /// Fill an axis-aligned rect, clipped to the surface. Coordinates may be
    /// negative or extend past the edges; only the visible part is painted.
    /// Translucent colors composite over the existing pixels.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let alpha = color.alpha();
        if alpha <= 0.0 || w == 0 || h == 0 {
            return;
        }

        let x0 = i64::from(x.max(0));
        let y0 = i64::from(y.max(0));
        let x1 = (i64::from(x) + i64::from(w)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(h)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let src = color.to_rgb8();
        for py in y0..y1 {
            let row = py as usize * self.width as usize;
            for px in x0..x1 {
                let idx = row + px as usize;
                self.pixels[idx] = if alpha >= 1.0 {
                    src
                } else {
                    blend(src, self.pixels[idx], alpha)
                };
            }
        }
    }

    /// Extract a detached copy of the current pixel grid.
    pub fn snapshot(&self) -> Raster {
        let rows = self
            .pixels
            .chunks(self.width as usize)
            .map(|row| row.to_vec())
            .collect();
        Raster { rows }
    }
}

fn blend(src: Rgb8, dst: Rgb8, alpha: f64) -> Rgb8 {
    fn mix(s: u8, d: u8, a: f64) -> u8 {
        (f64::from(s) * a + f64::from(d) * (1.0 - a)).round() as u8
    }

    Rgb8::new(
        mix(src.r, dst.r, alpha),
        mix(src.g, dst.g, alpha),
        mix(src.b, dst.b, alpha),
    )
}

/// An immutable W×H pixel grid, row-major, (0,0) top-left.
///
/// Serializes as a JSON array of rows, each row an array of
/// `{"r": _, "g": _, "b": _}` objects — the wire format an LED matrix
/// driver consumes — and round-trips losslessly.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Raster {
    rows: Vec<Vec<Rgb8>>,
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.rows.first().map_or(0, |r| r.len() as u32)
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgb8> {
        self.rows.get(y as usize)?.get(x as usize).copied()
    }

    pub fn rows(&self) -> &[Vec<Rgb8>] {
        &self.rows
    }

    pub fn pixels(&self) -> impl Iterator<Item = Rgb8> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// Flat `[r, g, b, r, g, b, ...]` bytes for image encoders.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.rows.len() * self.width() as usize * 3);
        for px in self.pixels() {
            out.extend_from_slice(&[px.r, px.g, px.b]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::core::Canvas;

    fn surface() -> Surface {
        Surface::new(Canvas::default())
    }

    #[test]
    fn new_surface_is_black() {
        let raster = surface().snapshot();
        assert_eq!(raster.width(), 64);
        assert_eq!(raster.height(), 64);
        assert!(raster.pixels().all(|p| p == Rgb8::BLACK));
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut s = surface();
        let red = Color::Rgb(Rgb8::new(255, 0, 0));

        // Straddles the top-left corner; only the inside quarter lands.
        s.fill_rect(-2, -2, 4, 4, red);
        let r = s.snapshot();
        assert_eq!(r.get(0, 0), Some(Rgb8::new(255, 0, 0)));
        assert_eq!(r.get(1, 1), Some(Rgb8::new(255, 0, 0)));
        assert_eq!(r.get(2, 2), Some(Rgb8::BLACK));

        // Entirely off-screen rects are no-ops.
        s.fill_rect(64, 64, 8, 8, red);
        s.fill_rect(-10, 0, 10, 1, red);
        assert_eq!(s.snapshot().get(63, 63), Some(Rgb8::BLACK));
    }

    #[test]
    fn fill_rect_survives_extreme_coordinates() {
        let mut s = surface();
        s.fill_rect(i32::MAX, 0, u32::MAX, 1, Color::Rgb(Rgb8::new(1, 1, 1)));
        s.fill_rect(i32::MIN, 0, 4, 1, Color::Rgb(Rgb8::new(1, 1, 1)));
        assert!(s.snapshot().pixels().all(|p| p == Rgb8::BLACK));
    }

    #[test]
    fn translucent_fill_composites_over_existing_pixels() {
        let mut s = surface();
        s.clear(Color::Rgb(Rgb8::new(0, 0, 100)));
        s.fill_rect(0, 0, 1, 1, Color::Rgb(Rgb8::new(200, 0, 0)).with_alpha(0.5));
        assert_eq!(s.snapshot().get(0, 0), Some(Rgb8::new(100, 0, 50)));
    }

    #[test]
    fn snapshot_is_detached_from_later_draws() {
        let mut s = surface();
        let before = s.snapshot();
        s.clear(Color::Rgb(Rgb8::new(255, 255, 255)));
        assert!(before.pixels().all(|p| p == Rgb8::BLACK));
        assert!(s.snapshot().pixels().all(|p| p == Rgb8::new(255, 255, 255)));
    }

    #[test]
    fn raster_json_is_array_of_rgb_objects() {
        let mut s = Surface::new(Canvas::new(2, 1).unwrap());
        s.fill_rect(1, 0, 1, 1, Color::Rgb(Rgb8::new(3, 2, 1)));
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([[{"r": 0, "g": 0, "b": 0}, {"r": 3, "g": 2, "b": 1}]])
        );
    }
}
