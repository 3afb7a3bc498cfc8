//! Retrowave-styled variants: scrolling neon grid, sunset, synth car,
//! geometric mountains, and the neon cityscape.

use rand::RngCore;

use crate::color::{Color, Palette, Rgb8};
use crate::surface::Surface;

use super::{Animation, fill_rects};

const BLACK: Color = Color::Rgb(Rgb8::BLACK);
const CYAN: Rgb8 = Rgb8::new(0x00, 0xFF, 0xFF);
const MAGENTA: Rgb8 = Rgb8::new(0xFF, 0x00, 0xFF);
const WHITE: Rgb8 = Rgb8::new(0xFF, 0xFF, 0xFF);
const YELLOW: Rgb8 = Rgb8::new(0xFF, 0xFF, 0x00);

/// An endless grid scrolls diagonally past a pulsing center dot.
pub struct NeonGrid {
    frame_count: u64,
    grid_offset: f32,
}

impl NeonGrid {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            grid_offset: 0.0,
        }
    }
}

impl Default for NeonGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for NeonGrid {
    fn update(&mut self, _rng: &mut dyn RngCore) {
        self.frame_count += 1;
        self.grid_offset += 0.5;
        if self.grid_offset >= 8.0 {
            self.grid_offset = 0.0;
        }
    }

    fn draw(&self, surface: &mut Surface, palette: &Palette) {
        surface.clear(BLACK);

        let line = palette.recolor(CYAN);
        let mut x = -self.grid_offset;
        while x < 64.0 {
            surface.fill_rect(x.floor() as i32, 0, 1, 64, line);
            x += 8.0;
        }
        let mut y = -self.grid_offset;
        while y < 64.0 {
            surface.fill_rect(0, y.floor() as i32, 64, 1, line);
            y += 8.0;
        }

        // Center dot breathes on a sine envelope.
        let pulse = (self.frame_count as f64 * 0.3).sin() * 0.5 + 0.5;
        let alpha = pulse * 0.8 + 0.2;
        surface.fill_rect(30, 30, 4, 4, palette.recolor(MAGENTA).with_alpha(alpha));
    }
}

/// A sun drifts over a gradient sky above a gridded purple plain.
pub struct RetroSunset {
    frame_count: u64,
    sun_y: f32,
    direction: f32,
}

impl RetroSunset {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            sun_y: 32.0,
            direction: -1.0,
        }
    }
}

impl Default for RetroSunset {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for RetroSunset {
    fn update(&mut self, _rng: &mut dyn RngCore) {
        self.frame_count += 1;

        self.sun_y += self.direction * 0.3;
        if self.sun_y < 16.0 || self.sun_y > 48.0 {
            self.direction = -self.direction;
        }
    }

    fn draw(&self, surface: &mut Surface, palette: &Palette) {
        // Sky gradient, one row at a time.
        for y in 0..40 {
            let intensity = f64::from(y) / 40.0;
            let sky = palette.shifted_hsl(300.0, 0.70, 0.30 + intensity * 0.40);
            surface.fill_rect(0, y, 64, 1, sky);
        }

        surface.fill_rect(0, 40, 64, 24, palette.recolor(Rgb8::new(0x8B, 0x00, 0x80)));

        let grid = palette.recolor(MAGENTA);
        for x in (0..64).step_by(8) {
            surface.fill_rect(x, 40, 1, 24, grid);
        }
        for y in (40..64).step_by(4) {
            surface.fill_rect(0, y, 64, 1, grid);
        }

        let sun_y = self.sun_y.floor() as i32;
        surface.fill_rect(28, sun_y, 8, 8, palette.recolor(YELLOW));

        // Rays orbit the sun; skip the ones that leave the canvas.
        let ray = palette.recolor(Rgb8::new(0xFF, 0x80, 0x00));
        for i in 0..8 {
            let angle = (f64::from(i) / 8.0) * std::f64::consts::TAU
                + self.frame_count as f64 * 0.1;
            let x = 32.0 + angle.cos() * 12.0;
            let y = f64::from(self.sun_y) + 4.0 + angle.sin() * 12.0;
            if (0.0..64.0).contains(&x) && (0.0..64.0).contains(&y) {
                surface.fill_rect(x.floor() as i32, y.floor() as i32, 2, 2, ray);
            }
        }
    }
}

/// A synthwave car rides a scrolling road grid under deterministic
/// twinkling stars.
pub struct SynthCar {
    frame_count: u64,
    car_x: f32,
    road_offset: f32,
}

impl SynthCar {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            car_x: -20.0,
            road_offset: 0.0,
        }
    }

    fn draw_car(&self, surface: &mut Surface, palette: &Palette) {
        let x = self.car_x.floor() as i32;
        let y = 44;

        surface.fill_rect(x + 2, y, 8, 6, palette.recolor(Rgb8::new(0xFF, 0x00, 0x80)));
        surface.fill_rect(x + 3, y - 2, 6, 3, palette.recolor(Rgb8::new(0x80, 0x00, 0xFF)));
        fill_rects(
            surface,
            palette.recolor(WHITE),
            &[(x + 1, y + 5, 2, 2), (x + 9, y + 5, 2, 2)],
        );
        surface.fill_rect(x + 10, y + 2, 2, 2, palette.recolor(YELLOW));
    }
}

impl Default for SynthCar {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for SynthCar {
    fn update(&mut self, _rng: &mut dyn RngCore) {
        self.frame_count += 1;
        self.car_x += 1.0;
        self.road_offset += 2.0;

        if self.car_x > 80.0 {
            self.car_x = -20.0;
        }
        if self.road_offset >= 8.0 {
            self.road_offset = 0.0;
        }
    }

    fn draw(&self, surface: &mut Surface, palette: &Palette) {
        surface.clear(BLACK);

        let road = palette.recolor(Rgb8::new(0x00, 0x80, 0xFF));
        let mut x = -self.road_offset;
        while x < 64.0 {
            surface.fill_rect(x.floor() as i32, 40, 1, 24, road);
            x += 8.0;
        }
        for y in (40..64).step_by(4) {
            surface.fill_rect(0, y, 64, 1, road);
        }

        // Horizon line.
        surface.fill_rect(0, 39, 64, 2, palette.recolor(MAGENTA));

        if self.car_x > -12.0 && self.car_x < 64.0 {
            self.draw_car(surface, palette);
        }

        // Star field from a fixed lattice; twinkle phase comes off the
        // frame clock, so this stays fully deterministic.
        let star = palette.recolor(WHITE);
        for i in 0..20 {
            let x = (i * 23) % 64;
            let y = (i * 17) % 30;
            let twinkle = (self.frame_count as f64 * 0.2 + f64::from(i)).sin() * 0.5 + 0.5;
            if twinkle > 0.5 {
                surface.fill_rect(x, y, 1, 1, star);
            }
        }
    }
}

/// Static layered mountain silhouettes under a gradient sky, with floating
/// shapes that pulse in brightness.
pub struct GeometricMountains {
    frame_count: u64,
}

const BACK_MOUNTAINS: [(i32, i32, u32, u32); 3] =
    [(0, 32, 20, 32), (15, 24, 25, 40), (35, 28, 29, 36)];
const MIDDLE_MOUNTAINS: [(i32, i32, u32, u32); 3] =
    [(5, 36, 15, 28), (25, 30, 20, 34), (40, 34, 24, 30)];
const FRONT_MOUNTAINS: [(i32, i32, u32, u32); 3] =
    [(10, 40, 12, 24), (30, 38, 16, 26), (50, 42, 14, 22)];

impl GeometricMountains {
    pub fn new() -> Self {
        Self { frame_count: 0 }
    }
}

impl Default for GeometricMountains {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for GeometricMountains {
    fn update(&mut self, _rng: &mut dyn RngCore) {
        self.frame_count += 1;
    }

    fn draw(&self, surface: &mut Surface, palette: &Palette) {
        for y in 0..32 {
            let intensity = f64::from(y) / 32.0;
            let sky = palette.shifted_hsl(250.0, 0.80, 0.20 + intensity * 0.30);
            surface.fill_rect(0, y, 64, 1, sky);
        }

        // Back to front, darkest to brightest.
        fill_rects(
            surface,
            palette.recolor(Rgb8::new(0x4B, 0x00, 0x82)),
            &BACK_MOUNTAINS,
        );
        fill_rects(
            surface,
            palette.recolor(Rgb8::new(0x8A, 0x2B, 0xE2)),
            &MIDDLE_MOUNTAINS,
        );
        fill_rects(surface, palette.recolor(MAGENTA), &FRONT_MOUNTAINS);

        let pulse = (self.frame_count as f64 * 0.1).sin() * 0.3 + 0.7;
        let shape = palette.recolor(CYAN).with_alpha(pulse);
        // Triangle and square floaters.
        fill_rects(
            surface,
            shape,
            &[(15, 15, 6, 2), (16, 13, 4, 2), (17, 11, 2, 2), (45, 12, 6, 6)],
        );
    }
}

/// Eight neon towers with blinking windows, a flying car, and a periodic
/// laser column.
pub struct NeonCityscape {
    frame_count: u64,
    buildings: Vec<Building>,
}

struct Building {
    x: i32,
    height: u32,
    color: Rgb8,
}

impl NeonCityscape {
    pub fn new() -> Self {
        let layout: [(i32, u32, Rgb8); 8] = [
            (0, 20, Rgb8::new(0xFF, 0x00, 0x80)),
            (8, 32, Rgb8::new(0x00, 0x80, 0xFF)),
            (16, 16, Rgb8::new(0x00, 0xFF, 0x80)),
            (24, 28, Rgb8::new(0xFF, 0x80, 0x00)),
            (32, 24, Rgb8::new(0x80, 0x00, 0xFF)),
            (40, 36, Rgb8::new(0xFF, 0x00, 0x40)),
            (48, 12, Rgb8::new(0x40, 0xFF, 0x00)),
            (56, 20, Rgb8::new(0xFF, 0x40, 0x80)),
        ];
        Self {
            frame_count: 0,
            buildings: layout
                .into_iter()
                .map(|(x, height, color)| Building { x, height, color })
                .collect(),
        }
    }
}

impl Default for NeonCityscape {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for NeonCityscape {
    fn update(&mut self, _rng: &mut dyn RngCore) {
        self.frame_count += 1;
    }

    fn draw(&self, surface: &mut Surface, palette: &Palette) {
        surface.clear(BLACK);

        let window = palette.recolor(WHITE);
        for (i, building) in self.buildings.iter().enumerate() {
            let top = 64 - building.height as i32;
            surface.fill_rect(building.x, top, 8, building.height, palette.recolor(building.color));

            // Windows blink on a per-position sine phase.
            let mut y = top + 4;
            while y < 64 {
                let mut x = building.x + 2;
                while x < building.x + 6 {
                    let phase =
                        self.frame_count as f64 * 0.2 + i as f64 + f64::from(x) + f64::from(y);
                    if phase.sin() > 0.0 {
                        surface.fill_rect(x, y, 1, 2, window);
                    }
                    x += 3;
                }
                y += 6;
            }
        }

        // Flying car derived straight from the frame clock.
        let car_x = (self.frame_count as f64 * 1.5) % 80.0 - 16.0;
        if car_x > -12.0 && car_x < 64.0 {
            let x = car_x.floor() as i32;
            surface.fill_rect(x, 20, 8, 3, palette.recolor(MAGENTA));
            surface.fill_rect(x + 6, 21, 2, 1, palette.recolor(YELLOW));
        }

        // Laser fires for 5 of every 30 ticks.
        if self.frame_count % 30 < 5 {
            surface.fill_rect(32, 0, 1, 64, palette.recolor(CYAN));
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
    fn grid_offset_wraps_below_eight() {
        let mut rng = rng();
        let mut grid = NeonGrid::new();
        for _ in 0..100 {
            grid.update(&mut rng);
            assert!(grid.grid_offset < 8.0);
        }
    }

    #[test]
    fn sun_oscillates_between_bounds() {
        let mut rng = rng();
        let mut sunset = RetroSunset::new();
        let mut lowest = f32::MAX;
        let mut highest = f32::MIN;
        for _ in 0..500 {
            sunset.update(&mut rng);
            lowest = lowest.min(sunset.sun_y);
            highest = highest.max(sunset.sun_y);
        }
        // One overshoot step past each bound before the direction flips.
        assert!(lowest >= 16.0 - 0.31 && highest <= 48.0 + 0.31);
        assert!(lowest < 17.0 && highest > 47.0);
    }

    #[test]
    fn car_and_road_wrap_independently() {
        let mut rng = rng();
        let mut car = SynthCar::new();
        for _ in 0..400 {
            car.update(&mut rng);
            assert!(car.car_x <= 80.0);
            assert!(car.road_offset < 8.0);
        }
    }

    #[test]
    fn laser_duty_cycle_is_five_of_thirty() {
        let mut rng = rng();
        let mut city = NeonCityscape::new();
        let mut surface = Surface::new(Canvas::default());
        let palette = Palette::new(0.0);
        let mut lit = 0;
        for _ in 0..30 {
            city.update(&mut rng);
            city.draw(&mut surface, &palette);
            let raster = surface.snapshot();
            if raster.get(32, 0) == Some(CYAN) && raster.get(32, 63) == Some(CYAN) {
                lit += 1;
            }
        }
        assert_eq!(lit, 5);
    }

    #[test]
    fn gradient_backgrounds_cover_every_row() {
        let mut surface = Surface::new(Canvas::default());
        let palette = Palette::new(0.0);

        RetroSunset::new().draw(&mut surface, &palette);
        let raster = surface.snapshot();
        for y in 0..40 {
            assert_ne!(raster.get(0, y), Some(Rgb8::BLACK), "sky row {y} unpainted");
        }
        // Ground strip is painted too.
        assert_ne!(raster.get(2, 50), Some(Rgb8::BLACK));
    }

    #[test]
    fn mountain_shapes_pulse_visibly_at_zero_hue_shift() {
        let mut rng = rng();
        let mut mountains = GeometricMountains::new();
        let mut surface = Surface::new(Canvas::default());
        let palette = Palette::new(0.0);

        mountains.update(&mut rng);
        mountains.draw(&mut surface, &palette);
        // The floating square sits over the sky; translucent cyan must have
        // landed there even without a hue shift.
        let px = surface.snapshot().get(46, 13).unwrap();
        assert!(px.g > 0 && px.b > 0);
    }
}
