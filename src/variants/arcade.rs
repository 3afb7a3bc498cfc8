//! Arcade-styled variants: pacman, space invaders, the zelda heart, and the
//! mario fireball.

use rand::RngCore;

use crate::color::{Color, Palette, Rgb8};
use crate::surface::Surface;

use super::{Animation, fill_rects};

const YELLOW: Rgb8 = Rgb8::new(0xFF, 0xFF, 0x00);
const BLACK: Color = Color::Rgb(Rgb8::BLACK);

/// Pacman crosses the screen eating a row of dots, then wraps around with
/// the dots restored.
pub struct Pacman {
    x: f32,
    y: i32,
    mouth_open: bool,
    frame_count: u64,
    dots: Vec<Dot>,
}

struct Dot {
    x: i32,
    eaten: bool,
}

impl Pacman {
    pub fn new() -> Self {
        Self {
            x: -16.0,
            y: 28,
            mouth_open: true,
            frame_count: 0,
            dots: (8..64)
                .step_by(8)
                .map(|x| Dot { x, eaten: false })
                .collect(),
        }
    }

    fn draw_body(&self, surface: &mut Surface, palette: &Palette) {
        let x = self.x.floor() as i32;
        let y = self.y;

        fill_rects(
            surface,
            palette.recolor(YELLOW),
            &[
                (x + 2, y, 8, 2),
                (x, y + 2, 12, 2),
                (x, y + 4, 12, 2),
                (x, y + 6, 12, 2),
                (x, y + 8, 12, 2),
                (x + 2, y + 10, 8, 2),
            ],
        );

        if self.mouth_open {
            fill_rects(surface, BLACK, &[(x + 8, y + 4, 4, 2), (x + 10, y + 6, 2, 2)]);
        }

        // Eye.
        surface.fill_rect(x + 4, y + 3, 2, 2, BLACK);
    }
}

impl Default for Pacman {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Pacman {
    fn update(&mut self, _rng: &mut dyn RngCore) {
        self.frame_count += 1;
        self.x += 1.5;

        // Mouth toggles every 5 ticks.
        if self.frame_count % 5 == 0 {
            self.mouth_open = !self.mouth_open;
        }

        for dot in &mut self.dots {
            if !dot.eaten && (self.x + 8.0 - dot.x as f32).abs() < 6.0 {
                dot.eaten = true;
            }
        }

        if self.x > 80.0 {
            self.x = -16.0;
            for dot in &mut self.dots {
                dot.eaten = false;
            }
        }
    }

    fn draw(&self, surface: &mut Surface, palette: &Palette) {
        surface.clear(BLACK);

        let dot_color = palette.recolor(YELLOW);
        for dot in &self.dots {
            if !dot.eaten {
                surface.fill_rect(dot.x, 32, 2, 2, dot_color);
            }
        }

        if self.x > -16.0 && self.x < 64.0 {
            self.draw_body(surface, palette);
        }
    }
}

/// A 3×5 invader formation descends in steps while the player ship hops
/// along the bottom edge.
pub struct SpaceInvaders {
    frame_count: u64,
    invaders: Vec<Invader>,
    player_x: i32,
}

struct Invader {
    x: i32,
    y: i32,
    row: usize,
}

const INVADER_ROW_COLORS: [Rgb8; 3] = [
    Rgb8::new(0x00, 0xFF, 0x00),
    Rgb8::new(0xFF, 0xFF, 0x00),
    Rgb8::new(0xFF, 0x00, 0xFF),
];
const PLAYER_Y: i32 = 54;

impl SpaceInvaders {
    pub fn new() -> Self {
        let mut invaders = Vec::with_capacity(15);
        for row in 0..3 {
            for col in 0..5 {
                invaders.push(Invader {
                    x: col * 12 + 4,
                    y: row as i32 * 10 + 8,
                    row,
                });
            }
        }
        Self {
            frame_count: 0,
            invaders,
            player_x: 28,
        }
    }
}

impl Default for SpaceInvaders {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for SpaceInvaders {
    fn update(&mut self, _rng: &mut dyn RngCore) {
        self.frame_count += 1;

        // Formation steps down every 30 ticks, rows reset once too low.
        if self.frame_count % 30 == 0 {
            for invader in &mut self.invaders {
                invader.y += 2;
                if invader.y > 50 {
                    invader.y = 8;
                }
            }
        }

        // Player hops every 45 ticks.
        if self.frame_count % 45 == 0 {
            self.player_x = ((self.player_x + 8) % 48) + 8;
        }
    }

    fn draw(&self, surface: &mut Surface, palette: &Palette) {
        surface.clear(BLACK);

        for invader in &self.invaders {
            let (x, y) = (invader.x, invader.y);
            fill_rects(
                surface,
                palette.recolor(INVADER_ROW_COLORS[invader.row]),
                &[
                    (x + 2, y, 4, 2),
                    (x, y + 2, 8, 2),
                    (x + 1, y + 4, 2, 2),
                    (x + 5, y + 4, 2, 2),
                ],
            );
        }

        let (x, y) = (self.player_x, PLAYER_Y);
        fill_rects(
            surface,
            palette.recolor(Rgb8::new(0x00, 0xFF, 0x00)),
            &[(x + 3, y, 2, 2), (x + 1, y + 2, 6, 2), (x, y + 4, 8, 2)],
        );
    }
}

/// The heart container pulses between 0.7x and 1.3x around the canvas
/// center.
pub struct ZeldaHeart {
    frame_count: u64,
    scale: f32,
    direction: f32,
}

const HEART: [(i32, i32, u32, u32); 9] = [
    (3, 0, 3, 2),
    (8, 0, 3, 2),
    (1, 2, 7, 2),
    (8, 2, 4, 2),
    (0, 4, 14, 2),
    (1, 6, 12, 2),
    (3, 8, 8, 2),
    (5, 10, 4, 2),
    (6, 12, 2, 2),
];

impl ZeldaHeart {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            scale: 1.0,
            direction: 1.0,
        }
    }

    /// Paint the heart pattern at `offset` in heart-local coordinates,
    /// scaled about the canvas center.
    fn draw_heart(&self, surface: &mut Surface, color: Color, ox: i32, oy: i32) {
        for (rx, ry, w, h) in HEART {
            let x = (32.0 + (ox + rx) as f32 * self.scale).floor() as i32;
            let y = (32.0 + (oy + ry) as f32 * self.scale).floor() as i32;
            let w = (w as f32 * self.scale).round().max(1.0) as u32;
            let h = (h as f32 * self.scale).round().max(1.0) as u32;
            surface.fill_rect(x, y, w, h, color);
        }
    }
}

impl Default for ZeldaHeart {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for ZeldaHeart {
    fn update(&mut self, _rng: &mut dyn RngCore) {
        self.frame_count += 1;

        self.scale += self.direction * 0.03;
        if self.scale > 1.3 {
            self.direction = -1.0;
        } else if self.scale < 0.7 {
            self.direction = 1.0;
        }
    }

    fn draw(&self, surface: &mut Surface, palette: &Palette) {
        surface.clear(BLACK);

        // Golden container, red fill.
        self.draw_heart(surface, palette.recolor(Rgb8::new(0xFF, 0xD7, 0x00)), -10, -10);
        self.draw_heart(surface, palette.recolor(Rgb8::new(0xFF, 0x00, 0x00)), -7, -7);
    }
}

/// A fireball bounces along the ground while crossing the screen.
pub struct MarioFireball {
    frame_count: u64,
    x: f32,
    y: i32,
    bounce: f32,
    bounce_direction: f32,
}

impl MarioFireball {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            x: -12.0,
            y: 44,
            bounce: 0.0,
            bounce_direction: -1.0,
        }
    }

    fn draw_fireball(&self, surface: &mut Surface, palette: &Palette) {
        let x = self.x.floor() as i32;
        let y = (self.y as f32 + self.bounce).floor() as i32;

        fill_rects(
            surface,
            palette.recolor(Rgb8::new(0xFF, 0x45, 0x00)),
            &[
                (x + 2, y, 6, 2),
                (x, y + 2, 10, 2),
                (x, y + 4, 10, 2),
                (x + 2, y + 6, 6, 2),
            ],
        );

        fill_rects(
            surface,
            palette.recolor(YELLOW),
            &[(x + 3, y + 2, 4, 2), (x + 3, y + 4, 4, 2)],
        );
    }
}

impl Default for MarioFireball {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for MarioFireball {
    fn update(&mut self, _rng: &mut dyn RngCore) {
        self.frame_count += 1;
        self.x += 1.5;

        self.bounce += self.bounce_direction * 1.5;
        if self.bounce < -16.0 {
            self.bounce_direction = 1.0;
        } else if self.bounce > 0.0 {
            self.bounce_direction = -1.0;
            self.bounce = 0.0;
        }

        if self.x > 76.0 {
            self.x = -12.0;
            self.bounce = 0.0;
        }
    }

    fn draw(&self, surface: &mut Surface, palette: &Palette) {
        surface.clear(BLACK);

        // Ground strip.
        surface.fill_rect(0, 52, 64, 12, palette.recolor(Rgb8::new(0x8B, 0x45, 0x13)));

        if self.x > -12.0 && self.x < 64.0 {
            self.draw_fireball(surface, palette);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::core::Canvas;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0)
    }

    #[test]
    fn pacman_wraps_and_restores_dots() {
        let mut rng = rng();
        let mut pacman = Pacman::new();

        // Enough ticks to cross the whole screen and wrap (x > 80 at 1.5/tick
        // from -16 takes 65 ticks).
        for _ in 0..65 {
            pacman.update(&mut rng);
        }
        assert!(pacman.x <= -16.0 + 1.5 + f32::EPSILON);
        assert!(pacman.dots.iter().all(|d| !d.eaten));
    }

    #[test]
    fn pacman_eats_dots_on_the_way() {
        let mut rng = rng();
        let mut pacman = Pacman::new();
        for _ in 0..30 {
            pacman.update(&mut rng);
        }
        assert!(pacman.dots.iter().any(|d| d.eaten));
    }

    #[test]
    fn pacman_mouth_toggles_every_five_ticks() {
        let mut rng = rng();
        let mut pacman = Pacman::new();
        assert!(pacman.mouth_open);
        for _ in 0..4 {
            pacman.update(&mut rng);
            assert!(pacman.mouth_open);
        }
        pacman.update(&mut rng);
        assert!(!pacman.mouth_open);
    }

    #[test]
    fn invader_rows_reset_instead_of_escaping() {
        let mut rng = rng();
        let mut invaders = SpaceInvaders::new();
        for _ in 0..30 * 40 {
            invaders.update(&mut rng);
        }
        assert!(invaders.invaders.iter().all(|i| i.y >= 8 && i.y <= 50));
    }

    #[test]
    fn invader_player_only_moves_on_the_45th_tick() {
        let mut rng = rng();
        let mut invaders = SpaceInvaders::new();
        for _ in 0..44 {
            invaders.update(&mut rng);
        }
        assert_eq!(invaders.player_x, 28);
        invaders.update(&mut rng);
        assert_eq!(invaders.player_x, ((28 + 8) % 48) + 8);
    }

    #[test]
    fn heart_scale_oscillates_within_bounds() {
        let mut rng = rng();
        let mut heart = ZeldaHeart::new();
        let mut seen_shrinking = false;
        for _ in 0..200 {
            heart.update(&mut rng);
            // One overshoot step past a bound is allowed before reversal.
            assert!(heart.scale > 0.7 - 0.031 && heart.scale < 1.3 + 0.031);
            if heart.direction < 0.0 {
                seen_shrinking = true;
            }
        }
        assert!(seen_shrinking);
    }

    #[test]
    fn fireball_bounce_stays_in_range() {
        let mut rng = rng();
        let mut fireball = MarioFireball::new();
        for _ in 0..300 {
            fireball.update(&mut rng);
            assert!(fireball.bounce >= -16.0 - 1.5 && fireball.bounce <= 0.0);
        }
    }

    #[test]
    fn fireball_wraps_with_bounce_reset() {
        let mut rng = rng();
        let mut fireball = MarioFireball::new();
        // From -12 at 1.5/tick, x exceeds 76 on tick 59.
        for _ in 0..59 {
            fireball.update(&mut rng);
        }
        assert_eq!(fireball.x, -12.0);
        assert_eq!(fireball.bounce, 0.0);
    }

    #[test]
    fn draws_fully_repaint_the_surface() {
        let mut rng = rng();
        let mut surface = Surface::new(Canvas::default());
        let palette = Palette::new(0.0);

        // Leave junk on the surface; the next draw must not show it.
        surface.clear(Color::Rgb(Rgb8::new(9, 9, 9)));
        let heart = ZeldaHeart::new();
        heart.draw(&mut surface, &palette);
        let raster = surface.snapshot();
        assert_eq!(raster.get(0, 0), Some(Rgb8::BLACK));

        let mut pacman = Pacman::new();
        pacman.update(&mut rng);
        pacman.draw(&mut surface, &palette);
        assert_eq!(surface.snapshot().get(0, 0), Some(Rgb8::BLACK));
    }
}
