//! The animation variant family.
//!
//! Every variant is an independent state machine behind the [`Animation`]
//! trait: `update` advances exactly one tick, `draw` repaints the whole
//! surface from current state. Variants never talk to the engine; they
//! borrow the surface and the color palette only for the duration of a
//! draw call.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;

use crate::color::{Color, Palette};
use crate::error::{GlowgridError, GlowgridResult};
use crate::surface::Surface;

mod arcade;
mod rain;
mod retrowave;

pub use arcade::{MarioFireball, Pacman, SpaceInvaders, ZeldaHeart};
pub use rain::DigitalRain;
pub use retrowave::{GeometricMountains, NeonCityscape, NeonGrid, RetroSunset, SynthCar};

/// Capability contract shared by all ten variants.
///
/// `update` must be a pure function of current state; the RNG parameter is
/// only consumed by the digital-rain variant, which is the one explicitly
/// nondeterministic animation in the family. `draw` is a total function of
/// state: it always starts from a full background clear and paints
/// axis-aligned rects in a fixed z-order.
pub trait Animation {
    fn update(&mut self, rng: &mut dyn RngCore);
    fn draw(&self, surface: &mut Surface, palette: &Palette);
}

/// The closed set of recognized animation ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantId {
    Pacman,
    SpaceInvaders,
    Zelda,
    Mario,
    NeonGrid,
    Sunset,
    SynthCar,
    Mountains,
    Cityscape,
    DigitalRain,
}

impl VariantId {
    pub const ALL: [VariantId; 10] = [
        VariantId::Pacman,
        VariantId::SpaceInvaders,
        VariantId::Zelda,
        VariantId::Mario,
        VariantId::NeonGrid,
        VariantId::Sunset,
        VariantId::SynthCar,
        VariantId::Mountains,
        VariantId::Cityscape,
        VariantId::DigitalRain,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VariantId::Pacman => "pacman",
            VariantId::SpaceInvaders => "spaceinvaders",
            VariantId::Zelda => "zelda",
            VariantId::Mario => "mario",
            VariantId::NeonGrid => "neongrid",
            VariantId::Sunset => "sunset",
            VariantId::SynthCar => "synthcar",
            VariantId::Mountains => "mountains",
            VariantId::Cityscape => "cityscape",
            VariantId::DigitalRain => "digitalrain",
        }
    }

    /// Construct a fresh instance of this variant. Only the digital-rain
    /// constructor consumes the RNG (for its initial drop field).
    pub fn instantiate(self, rng: &mut dyn RngCore) -> Box<dyn Animation> {
        match self {
            VariantId::Pacman => Box::new(Pacman::new()),
            VariantId::SpaceInvaders => Box::new(SpaceInvaders::new()),
            VariantId::Zelda => Box::new(ZeldaHeart::new()),
            VariantId::Mario => Box::new(MarioFireball::new()),
            VariantId::NeonGrid => Box::new(NeonGrid::new()),
            VariantId::Sunset => Box::new(RetroSunset::new()),
            VariantId::SynthCar => Box::new(SynthCar::new()),
            VariantId::Mountains => Box::new(GeometricMountains::new()),
            VariantId::Cityscape => Box::new(NeonCityscape::new()),
            VariantId::DigitalRain => Box::new(DigitalRain::new(rng)),
        }
    }

    /// Whether two equal-length update runs from a fresh instance always
    /// produce the same state (everything except the digital rain).
    pub fn is_deterministic(self) -> bool {
        !matches!(self, VariantId::DigitalRain)
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantId {
    type Err = GlowgridError;

    fn from_str(s: &str) -> GlowgridResult<Self> {
        VariantId::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| GlowgridError::validation(format!("unknown animation id \"{s}\"")))
    }
}

/// Sprite patterns are lists of (x, y, w, h) rects painted in one color.
pub(crate) fn fill_rects(surface: &mut Surface, color: Color, rects: &[(i32, i32, u32, u32)]) {
    for &(x, y, w, h) in rects {
        surface.fill_rect(x, y, w, h, color);
    }
}
