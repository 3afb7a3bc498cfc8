#![forbid(unsafe_code)]

pub mod color;
pub mod core;
pub mod engine;
pub mod error;
pub mod surface;
pub mod variants;

pub use color::{Color, Hsla, Palette, Rgb8, shift_hue};
pub use core::{Canvas, Fps};
pub use engine::{Engine, EngineConfig, MatrixObserver};
pub use error::{GlowgridError, GlowgridResult};
pub use surface::{Raster, Surface};
pub use variants::{Animation, VariantId};
