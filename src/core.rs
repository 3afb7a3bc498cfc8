use std::time::Duration;

use crate::error::{GlowgridError, GlowgridResult};

/// Frame rate as an exact rational, so intervals like 1000/15 ms never
/// accumulate rounding drift across long playback sessions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> GlowgridResult<Self> {
        if den == 0 {
            return Err(GlowgridError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(GlowgridError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of a single frame.
    pub fn frame_interval(self) -> Duration {
        Duration::from_secs_f64(f64::from(self.den) / f64::from(self.num))
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 15, den: 1 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> GlowgridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GlowgridError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Canvas {
    fn default() -> Self {
        // Reference LED matrix size.
        Self {
            width: 64,
            height: 64,
        }
    }
}
