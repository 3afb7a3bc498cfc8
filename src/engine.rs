//! The frame-sampling animation engine.
//!
//! One engine owns one surface and at most one active variant. `tick` is the
//! continuous-playback path, gated to the configured frame rate;
//! `sample_frame` is the deterministic replay path, which renders into a
//! scratch surface so ongoing playback is never disturbed.
//!
//! The engine is a plain `&mut self` structure with no interior mutability:
//! it is single-threaded by construction, and callers that want to drive it
//! from multiple threads must wrap it in a `Mutex`.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::color::Palette;
use crate::core::{Canvas, Fps};
use crate::surface::{Raster, Surface};
use crate::variants::{Animation, VariantId};

/// Callback invoked after every successful tick with the freshly drawn
/// raster, the active variant id, and the frame index.
pub type MatrixObserver = Box<dyn FnMut(&Raster, VariantId, u64)>;

#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    pub canvas: Canvas,
    pub fps: Fps,
    /// Seed for the variant RNG. `None` seeds from OS entropy, which leaves
    /// the digital-rain variant nonreproducible run to run.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            fps: Fps::default(),
            seed: None,
        }
    }
}

pub struct Engine {
    canvas: Canvas,
    surface: Surface,
    frame_interval: Duration,
    hue_shift: f64,
    frame_index: u64,
    last_tick: Duration,
    active: Option<ActiveVariant>,
    rng: StdRng,
    observer: Option<MatrixObserver>,
}

struct ActiveVariant {
    id: VariantId,
    anim: Box<dyn Animation>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            canvas: config.canvas,
            surface: Surface::new(config.canvas),
            frame_interval: config.fps.frame_interval(),
            hue_shift: 0.0,
            frame_index: 0,
            last_tick: Duration::ZERO,
            active: None,
            rng,
            observer: None,
        }
    }

    /// 64×64 at 15 fps, unseeded.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Start a variant by typed id: the previous instance is discarded and
    /// the frame counter resets. The configured hue shift carries over.
    pub fn start(&mut self, id: VariantId) {
        tracing::debug!(variant = %id, "starting animation");
        let anim = id.instantiate(&mut self.rng);
        self.active = Some(ActiveVariant { id, anim });
        self.frame_index = 0;
    }

    /// Start a variant by wire tag. An unrecognized id silently leaves the
    /// engine idle: no active variant, ticks become no-ops. The render loop
    /// must never be crashable from the outside.
    pub fn start_animation(&mut self, id: &str) {
        match id.parse::<VariantId>() {
            Ok(id) => self.start(id),
            Err(_) => {
                tracing::warn!(id, "unknown animation id, engine going idle");
                self.active = None;
                self.frame_index = 0;
            }
        }
    }

    pub fn active_variant(&self) -> Option<VariantId> {
        self.active.as_ref().map(|a| a.id)
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn hue_shift(&self) -> f64 {
        self.hue_shift
    }

    /// Any real number is accepted; normalization happens inside the color
    /// transform. Takes effect on the next draw.
    pub fn set_hue_shift(&mut self, degrees: f64) {
        self.hue_shift = degrees;
    }

    pub fn set_matrix_update_callback<F>(&mut self, observer: F)
    where
        F: FnMut(&Raster, VariantId, u64) + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    /// Advance playback if a full frame interval has elapsed since the last
    /// accepted tick. On an accepted tick with an active variant the order
    /// is fixed: update, draw, frame increment, raster extraction, observer
    /// notification. Early ticks and idle ticks do nothing.
    pub fn tick(&mut self, now: Duration) {
        if now.saturating_sub(self.last_tick) < self.frame_interval {
            return;
        }

        let Some(active) = self.active.as_mut() else {
            self.last_tick = now;
            return;
        };

        active.anim.update(&mut self.rng);
        let palette = Palette::new(self.hue_shift);
        active.anim.draw(&mut self.surface, &palette);
        self.last_tick = now;
        self.frame_index += 1;

        if let Some(observer) = self.observer.as_mut() {
            let raster = self.surface.snapshot();
            observer(&raster, active.id, self.frame_index);
        }
    }

    /// Deterministic frame-accurate sampling: build the variant fresh, run
    /// exactly `frame` updates (0 draws the initial state), draw once, and
    /// return the raster. Renders into a scratch surface, so the playback
    /// surface, active variant, and frame counter are untouched. The frame
    /// index reported by playback observers lines up with this: for a
    /// deterministic variant, the raster at observer index `n` equals
    /// `sample_frame(id, n)`.
    ///
    /// For `digitalrain` the result depends on the engine RNG stream; seed
    /// the engine to make it reproducible.
    #[tracing::instrument(skip(self))]
    pub fn sample_frame(&mut self, id: VariantId, frame: u64) -> Raster {
        let mut anim = id.instantiate(&mut self.rng);
        for _ in 0..frame {
            anim.update(&mut self.rng);
        }

        let mut scratch = Surface::new(self.canvas);
        let palette = Palette::new(self.hue_shift);
        anim.draw(&mut scratch, &palette);
        scratch.snapshot()
    }

    /// String-id front door for external callers: `None` for unrecognized
    /// ids instead of an error.
    pub fn get_animation_matrix(&mut self, id: &str, frame: u64) -> Option<Raster> {
        let id = id.parse::<VariantId>().ok()?;
        Some(self.sample_frame(id, frame))
    }

    /// Detached copy of the playback surface. All-black before the first
    /// draw.
    pub fn extract_raster(&self) -> Raster {
        self.surface.snapshot()
    }
}
