use crate::color::ColorDef;
use crate::field::config::{FieldConfig, Palette};
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::WavefieldResult;
use crate::noise::{FieldNoise, NoiseSource};
use crate::render::path::SmoothPath;

/// An interior vertex of a [`WavePath`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    /// Horizontal coordinate, fixed after construction.
    pub x: f64,
    /// Vertical coordinate before any time-varying noise.
    pub y_base: f64,
    /// Index of the path segment this point drives.
    pub segment: usize,
}

/// One band of the field: a filled, stroked, smoothed ribbon.
#[derive(Clone, Debug)]
pub struct WavePath {
    index: usize,
    t: f64,
    y_offset: f64,
    fill: ColorDef,
    stroke: ColorDef,
    stroke_width: f64,
    path: SmoothPath,
    points: Vec<ControlPoint>,
}

impl WavePath {
    /// Band index in `[0, num_paths)`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Normalized band position in `[0, 1]`.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Vertical offset of the band.
    pub fn y_offset(&self) -> f64 {
        self.y_offset
    }

    /// Fill color.
    pub fn fill(&self) -> ColorDef {
        self.fill
    }

    /// Stroke color.
    pub fn stroke(&self) -> ColorDef {
        self.stroke
    }

    /// Stroke width.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Live render geometry.
    pub fn path(&self) -> &SmoothPath {
        &self.path
    }

    /// Interior control points in left-to-right order.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut SmoothPath, &[ControlPoint]) {
        (&mut self.path, &self.points)
    }
}

/// The complete set of bands for one session.
///
/// Topology is fixed at construction; only the live vertical coordinate of interior vertices
/// changes afterwards.
#[derive(Clone, Debug)]
pub struct WaveField {
    canvas: Canvas,
    paths: Vec<WavePath>,
}

impl WaveField {
    /// Surface the field was laid out for.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Bands, top to bottom.
    pub fn paths(&self) -> &[WavePath] {
        &self.paths
    }

    pub(crate) fn paths_mut(&mut self) -> &mut [WavePath] {
        &mut self.paths
    }
}

/// Lay out every band of the field.
///
/// Vertices are placed at frame 0: the live vertical coordinate includes the drift noise term for
/// `f = 0`, while each [`ControlPoint`] keeps the noise-free baseline.
#[tracing::instrument(skip(cfg, palette, noise), fields(num_paths = cfg.num_paths, num_waves = cfg.num_waves))]
pub fn build_field<N: NoiseSource>(
    cfg: &FieldConfig,
    palette: &Palette,
    canvas: Canvas,
    noise: &FieldNoise<N>,
) -> WavefieldResult<WaveField> {
    cfg.validate()?;
    palette.validate()?;
    canvas.validate()?;

    let width = f64::from(canvas.width);
    let height = f64::from(canvas.height);
    let scale = cfg.noise_scale;
    let amp = cfg.wave_amplitude;
    let steps = (cfg.num_waves - 1) as f64;

    let mut paths = Vec::with_capacity(cfg.num_paths);
    for index in 0..cfg.num_paths {
        let t = cfg.band_t(index);
        let y_offset = cfg.y_offset(t, height);

        let mut path = SmoothPath::new();
        path.add(Point::new(0.0, y_offset + amp));

        let mut points = Vec::with_capacity(cfg.num_waves - 1);
        for j in 1..cfg.num_waves {
            let s = j as f64 / steps;
            let x = -cfg.x_overshoot
                + (width + cfg.x_overshoot) * s
                + cfg.x_shear * y_offset
                + cfg.x_warp_amplitude * noise.warp.noise2(t / scale, s / scale);
            let delta = if j % 2 == 1 { -amp } else { amp };
            let y_base = y_offset + delta;
            let y_noise = cfg.noise_factor * noise.drift.noise3(x / scale, y_offset / scale, 0.0);

            path.add(Point::new(x, y_base + y_noise));
            points.push(ControlPoint {
                x,
                y_base,
                segment: j,
            });
        }

        path.smooth_geometric(cfg.smooth_factor);

        let e = cfg.closing_extent;
        path.add(Point::new(e, e));
        path.add(Point::new(-e, e));
        path.close();

        paths.push(WavePath {
            index,
            t,
            y_offset,
            fill: palette.fill.sample(t),
            stroke: palette.stroke.sample(t),
            stroke_width: cfg.stroke_width(t),
            path,
            points,
        });
    }

    tracing::debug!(paths = paths.len(), "wave field built");
    Ok(WaveField { canvas, paths })
}

#[cfg(test)]
#[path = "../../tests/unit/field/build.rs"]
mod tests;
