use crate::color::{ColorDef, Gradient};
use crate::foundation::error::{WavefieldError, WavefieldResult};
use serde::{Deserialize, Serialize};

/// Shape parameters of the wave field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Number of bands stacked top to bottom.
    pub num_paths: usize,
    /// Vertical swing of each band around its offset.
    pub wave_amplitude: f64,
    /// Interior vertices per band, plus one (the leading anchor takes index 0).
    pub num_waves: usize,
    /// Amplitude of the vertical noise term.
    pub noise_factor: f64,
    /// Divisor applied to coordinates before sampling noise.
    pub noise_scale: f64,
    /// Stroke width of the first band.
    pub min_stroke: f64,
    /// Stroke width growth, scaled by `sin(t)`.
    pub stroke_factor: f64,
    /// Geometric smoothing factor.
    pub smooth_factor: f64,
    /// Horizontal margin past both canvas edges.
    pub x_overshoot: f64,
    /// Amplitude of the horizontal noise warp.
    pub x_warp_amplitude: f64,
    /// Fraction of a band's vertical offset added to its x coordinates.
    pub x_shear: f64,
    /// Coordinate of the two off-canvas closing vertices.
    pub closing_extent: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            num_paths: 250,
            wave_amplitude: 40.0,
            num_waves: 15,
            noise_factor: 20.0,
            noise_scale: 100.0,
            min_stroke: 0.1,
            stroke_factor: 4.0,
            smooth_factor: 0.15,
            x_overshoot: 500.0,
            x_warp_amplitude: 200.0,
            x_shear: 0.5,
            closing_extent: 2000.0,
        }
    }
}

impl FieldConfig {
    /// Reject configurations that would divide by zero or produce non-finite geometry.
    pub fn validate(&self) -> WavefieldResult<()> {
        if self.num_paths < 2 {
            return Err(WavefieldError::validation(format!(
                "field.num_paths must be > 1 (got {})",
                self.num_paths
            )));
        }
        if self.num_waves < 2 {
            return Err(WavefieldError::validation(format!(
                "field.num_waves must be > 1 (got {})",
                self.num_waves
            )));
        }
        if !self.noise_scale.is_finite() || self.noise_scale == 0.0 {
            return Err(WavefieldError::validation(
                "field.noise_scale must be finite and non-zero",
            ));
        }
        let finite = [
            ("wave_amplitude", self.wave_amplitude),
            ("noise_factor", self.noise_factor),
            ("min_stroke", self.min_stroke),
            ("stroke_factor", self.stroke_factor),
            ("smooth_factor", self.smooth_factor),
            ("x_overshoot", self.x_overshoot),
            ("x_warp_amplitude", self.x_warp_amplitude),
            ("x_shear", self.x_shear),
            ("closing_extent", self.closing_extent),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(WavefieldError::validation(format!(
                    "field.{name} must be finite"
                )));
            }
        }
        if self.min_stroke < 0.0 {
            return Err(WavefieldError::validation("field.min_stroke must be >= 0"));
        }
        Ok(())
    }

    /// Normalized position of band `index`.
    pub fn band_t(&self, index: usize) -> f64 {
        index as f64 / (self.num_paths - 1) as f64
    }

    /// Vertical offset of the band at `t`, spanning `2 * amplitude` past both edges.
    pub fn y_offset(&self, t: f64, height: f64) -> f64 {
        (4.0 * self.wave_amplitude + height) * t - 2.0 * self.wave_amplitude
    }

    /// Stroke width of the band at `t`.
    pub fn stroke_width(&self, t: f64) -> f64 {
        self.min_stroke + self.stroke_factor * t.sin()
    }
}

/// Stroke and fill gradients sampled per band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Stroke color across bands.
    pub stroke: Gradient,
    /// Fill color across bands.
    pub fill: Gradient,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            stroke: Gradient::linear(
                ColorDef::from_rgb8(0xff, 0x44, 0x66),
                ColorDef::from_rgb8(0x44, 0x66, 0xff),
            ),
            fill: Gradient::linear(
                ColorDef::from_rgb8(0x11, 0x22, 0x44),
                ColorDef::from_rgb8(0x00, 0x00, 0x00),
            ),
        }
    }
}

impl Palette {
    /// Check both gradients.
    pub fn validate(&self) -> WavefieldResult<()> {
        self.stroke.validate()?;
        self.fill.validate()
    }
}
