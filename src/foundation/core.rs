use crate::foundation::error::{WavefieldError, WavefieldResult};

pub use kurbo::{BezPath, Point, Vec2};

/// Zero-based index of an animation frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Frame index as a noise/time coordinate.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

/// Rational frames-per-second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a validated fps value.
    pub fn new(num: u32, den: u32) -> WavefieldResult<Self> {
        if den == 0 {
            return Err(WavefieldError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(WavefieldError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }
}

/// Fixed-size drawing surface, read once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Check the surface is non-empty and fits the rasterizer's `u16` dimensions.
    pub fn validate(self) -> WavefieldResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WavefieldError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        self.size_u16().map(|_| ())
    }

    /// Surface size as `u16`, as required by `vello_cpu`.
    pub fn size_u16(self) -> WavefieldResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| WavefieldError::validation("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| WavefieldError::validation("canvas height exceeds u16"))?;
        Ok((w, h))
    }
}
