//! Matrix-style digital rain. The one variant that consumes the injected
//! RNG: drop columns, speeds, glyph flicker, and the glitch overlay are all
//! random. With the engine seeded the stream is reproducible; unseeded runs
//! intentionally are not.

use rand::{Rng, RngCore};

use crate::color::{Color, Palette, Rgb8};
use crate::surface::Surface;

use super::Animation;

const GREEN: Rgb8 = Rgb8::new(0x00, 0xFF, 0x00);
const DROP_COUNT: usize = 15;

pub struct DigitalRain {
    frame_count: u64,
    drops: Vec<Raindrop>,
    // Decided in update so draw stays a pure function of state.
    glitch: Option<(i32, i32)>,
}

struct Raindrop {
    x: i32,
    y: f32,
    speed: f32,
    glyph: u8, // 0 or 1
}

impl Raindrop {
    fn spawn(rng: &mut dyn RngCore) -> Self {
        Self {
            x: rng.gen_range(0..64),
            y: rng.r#gen::<f32>() * -64.0,
            speed: rng.r#gen::<f32>() * 2.0 + 1.0,
            glyph: rng.gen_range(0..2),
        }
    }

    /// Send the drop back above the top edge with a fresh column and glyph.
    fn recycle(&mut self, rng: &mut dyn RngCore) {
        self.y = rng.r#gen::<f32>() * -32.0;
        self.x = rng.gen_range(0..64);
        self.glyph = rng.gen_range(0..2);
    }
}

impl DigitalRain {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        Self {
            frame_count: 0,
            drops: (0..DROP_COUNT).map(|_| Raindrop::spawn(rng)).collect(),
            glitch: None,
        }
    }

    fn draw_glyph(surface: &mut Surface, drop: &Raindrop, color: Color) {
        let x = drop.x;
        let y = drop.y.floor() as i32;
        if drop.glyph == 0 {
            surface.fill_rect(x, y, 3, 1, color);
            surface.fill_rect(x, y + 1, 1, 3, color);
            surface.fill_rect(x + 2, y + 1, 1, 3, color);
            surface.fill_rect(x, y + 4, 3, 1, color);
        } else {
            surface.fill_rect(x + 1, y, 1, 5, color);
        }
    }
}

impl Animation for DigitalRain {
    fn update(&mut self, rng: &mut dyn RngCore) {
        self.frame_count += 1;

        for drop in &mut self.drops {
            drop.y += drop.speed;
            if drop.y > 64.0 {
                drop.recycle(rng);
            }

            // Occasional glyph flicker.
            if rng.gen_bool(0.1) {
                drop.glyph = rng.gen_range(0..2);
            }
        }

        self.glitch = rng
            .gen_bool(0.05)
            .then(|| (rng.gen_range(0..64), rng.gen_range(0..64)));
    }

    fn draw(&self, surface: &mut Surface, palette: &Palette) {
        surface.clear(Color::Rgb(Rgb8::BLACK));

        for drop in &self.drops {
            if drop.y < 0.0 || drop.y >= 64.0 {
                continue;
            }

            // Brightest at the head, fading with depth into the cell.
            let alpha = (1.0 - f64::from(drop.y % 8.0) / 8.0).max(0.3);
            let head = palette.recolor(GREEN).with_alpha(alpha);
            Self::draw_glyph(surface, drop, head);

            for i in 1..5 {
                let trail_y = drop.y - i as f32 * 2.0;
                if trail_y >= 0.0 {
                    let trail = palette
                        .recolor(GREEN)
                        .with_alpha(alpha * (1.0 - f64::from(i) * 0.2));
                    surface.fill_rect(drop.x + 1, trail_y.floor() as i32, 1, 1, trail);
                }
            }
        }

        if let Some((x, y)) = self.glitch {
            surface.fill_rect(x, y, 2, 2, palette.recolor(Rgb8::new(0xFF, 0xFF, 0x00)));
        }
    }
}
