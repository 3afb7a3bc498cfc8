//! Structured color values and the global hue-rotation transform.
//!
//! Base colors are 24-bit RGB. A hue-shifted color stays HSL-represented
//! until it is quantized onto the surface; an unshifted color passes through
//! bit-exact. Alpha is an explicit field, not a syntax rewrite.

use std::fmt;
use std::str::FromStr;

use crate::error::{GlowgridError, GlowgridResult};

/// One LED: 8-bit red, green, blue. No alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb8 {
    type Err = GlowgridError;

    fn from_str(s: &str) -> GlowgridResult<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 {
            return Err(GlowgridError::color(format!(
                "hex color must be #RRGGBB, got \"{s}\""
            )));
        }

        fn hex_byte(pair: &str) -> GlowgridResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| GlowgridError::color(format!("invalid hex byte \"{pair}\"")))
        }

        Ok(Self {
            r: hex_byte(&hex[0..2])?,
            g: hex_byte(&hex[2..4])?,
            b: hex_byte(&hex[4..6])?,
        })
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// HSL + alpha with explicit numeric fields. `h` is in degrees and may be
/// outside [0, 360); it is normalized at quantization time. `s`, `l`, `a`
/// are in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

/// A displayable color: either an exact RGB triple (the unshifted fast path)
/// or an HSL-space value produced by hue rotation or gradient math.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Rgb(Rgb8),
    Hsla(Hsla),
}

impl Color {
    pub fn hsla(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self::Hsla(Hsla { h, s, l, a })
    }

    /// Replace the alpha channel. An opaque RGB color only leaves the exact
    /// representation when it actually becomes translucent.
    pub fn with_alpha(self, a: f64) -> Self {
        let a = a.clamp(0.0, 1.0);
        match self {
            Self::Rgb(c) if a >= 1.0 => Self::Rgb(c),
            Self::Rgb(c) => {
                let (h, s, l) = rgb_to_hsl(c);
                Self::Hsla(Hsla {
                    h: h * 360.0,
                    s,
                    l,
                    a,
                })
            }
            Self::Hsla(hsla) => Self::Hsla(Hsla { a, ..hsla }),
        }
    }

    pub fn alpha(self) -> f64 {
        match self {
            Self::Rgb(_) => 1.0,
            Self::Hsla(h) => h.a.clamp(0.0, 1.0),
        }
    }

    /// Quantize to an RGB triple, ignoring alpha (the surface applies alpha
    /// while compositing).
    pub fn to_rgb8(self) -> Rgb8 {
        match self {
            Self::Rgb(c) => c,
            Self::Hsla(hsla) => hsl_to_rgb(hsla.h, hsla.s, hsla.l),
        }
    }
}

impl From<Rgb8> for Color {
    fn from(c: Rgb8) -> Self {
        Self::Rgb(c)
    }
}

/// Rotate `base` around the hue wheel by `degrees`.
///
/// A shift that is congruent to 0 mod 360 returns the input unchanged,
/// bit-exact. Any other shift converts through HSL and stays HSL-represented.
/// Pure; never fails for any `Rgb8` input.
pub fn shift_hue(base: Rgb8, degrees: f64) -> Color {
    if degrees.rem_euclid(360.0) == 0.0 {
        return Color::Rgb(base);
    }

    let (h, s, l) = rgb_to_hsl(base);
    let mut h = h + degrees / 360.0;
    h -= h.floor(); // wrap into [0,1); negative shifts land here too

    Color::Hsla(Hsla {
        h: h * 360.0,
        s,
        l,
        a: 1.0,
    })
}

/// RGB -> HSL with normalized outputs (h in [0,1)).
///
/// Max-channel branch order is R, G, B; each branch yields a hue in [0,6)
/// before the final division.
fn rgb_to_hsl(c: Rgb8) -> (f64, f64, f64) {
    let r = f64::from(c.r) / 255.0;
    let g = f64::from(c.g) / 255.0;
    let b = f64::from(c.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

/// Standard HSL -> RGB conversion (sRGB space). `h` in degrees, any range.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb8 {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    fn to_u8(x: f64) -> u8 {
        (x.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    if s == 0.0 {
        let v = to_u8(l);
        return Rgb8::new(v, v, v);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgb8::new(
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

/// The color-transform capability handed to a variant for the duration of a
/// draw call. Carries the engine's current hue shift; every color a variant
/// paints goes through here so global recoloring stays uniform.
#[derive(Clone, Copy, Debug, Default)]
pub struct Palette {
    hue_shift: f64,
}

impl Palette {
    pub fn new(hue_shift: f64) -> Self {
        Self { hue_shift }
    }

    /// The `getColor` indirection: base color in, possibly-shifted color out.
    pub fn recolor(&self, base: Rgb8) -> Color {
        shift_hue(base, self.hue_shift)
    }

    /// Gradient colors are authored directly in HSL with the shift folded
    /// into the hue term.
    pub fn shifted_hsl(&self, h: f64, s: f64, l: f64) -> Color {
        Color::hsla(h + self.hue_shift, s, l, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_shift_is_bitexact_identity() {
        let c = Rgb8::new(0x8B, 0x45, 0x13);
        assert_eq!(shift_hue(c, 0.0), Color::Rgb(c));
    }

    #[test]
    fn full_turn_shifts_hit_the_identity_path() {
        let c = Rgb8::new(0xFF, 0xD7, 0x00);
        assert_eq!(shift_hue(c, 360.0), Color::Rgb(c));
        assert_eq!(shift_hue(c, -360.0), Color::Rgb(c));
        assert_eq!(shift_hue(c, 720.0), Color::Rgb(c));
    }

    #[test]
    fn red_plus_120_degrees_is_green() {
        let shifted = shift_hue(Rgb8::new(255, 0, 0), 120.0);
        assert_eq!(shifted.to_rgb8(), Rgb8::new(0, 255, 0));
    }

    #[test]
    fn negative_shift_wraps_positive() {
        // -240 and +120 land on the same hue.
        let a = shift_hue(Rgb8::new(255, 0, 0), -240.0);
        let b = shift_hue(Rgb8::new(255, 0, 0), 120.0);
        assert_eq!(a.to_rgb8(), b.to_rgb8());
    }

    #[test]
    fn gray_has_no_hue_or_saturation() {
        let Color::Hsla(hsla) = shift_hue(Rgb8::new(128, 128, 128), 90.0) else {
            panic!("gray with nonzero shift should take the HSL path");
        };
        // Achromatic input: hue stays at the shift itself, saturation zero,
        // so the quantized result is the same gray.
        assert_eq!(hsla.s, 0.0);
        let back = hsl_to_rgb(hsla.h, hsla.s, hsla.l);
        assert_eq!(back, Rgb8::new(128, 128, 128));
    }

    #[test]
    fn hex_parse_and_display_roundtrip() {
        let c: Rgb8 = "#FF4500".parse().unwrap();
        assert_eq!(c, Rgb8::new(0xFF, 0x45, 0x00));
        assert_eq!(c.to_string(), "#FF4500");
        assert_eq!("8b0080".parse::<Rgb8>().unwrap(), Rgb8::new(0x8B, 0x00, 0x80));
    }

    #[test]
    fn hex_parse_rejects_malformed_input() {
        assert!("#FFF".parse::<Rgb8>().is_err());
        assert!("#GGGGGG".parse::<Rgb8>().is_err());
        assert!("".parse::<Rgb8>().is_err());
    }

    #[test]
    fn with_alpha_applies_without_a_hue_shift() {
        // The translucent overlay must exist at hue shift 0 too.
        let c = Color::Rgb(Rgb8::new(255, 0, 255)).with_alpha(0.5);
        assert!((c.alpha() - 0.5).abs() < 1e-12);
        // Pure magenta survives the HSL detour exactly.
        assert_eq!(c.to_rgb8(), Rgb8::new(255, 0, 255));
    }

    #[test]
    fn with_alpha_opaque_keeps_exact_rgb() {
        let c = Color::Rgb(Rgb8::new(1, 2, 3)).with_alpha(1.0);
        assert_eq!(c, Color::Rgb(Rgb8::new(1, 2, 3)));
    }

    #[test]
    fn palette_recolor_matches_shift_hue() {
        let palette = Palette::new(180.0);
        let base = Rgb8::new(0, 255, 0);
        assert_eq!(palette.recolor(base), shift_hue(base, 180.0));
        assert_eq!(Palette::new(0.0).recolor(base), Color::Rgb(base));
    }

    #[test]
    fn shifted_hsl_folds_the_shift_into_hue() {
        let palette = Palette::new(60.0);
        let c = palette.shifted_hsl(300.0, 0.7, 0.5);
        assert_eq!(c.to_rgb8(), Color::hsla(360.0, 0.7, 0.5, 1.0).to_rgb8());
    }
}
