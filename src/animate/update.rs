use crate::field::build::{ControlPoint, WaveField};
use crate::field::config::FieldConfig;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::WavefieldResult;
use crate::noise::NoiseSource;
use crate::render::path::VertexAccess;

/// Live vertical coordinate of `point` at `frame`.
pub fn live_y<N: NoiseSource + ?Sized>(
    point: &ControlPoint,
    frame: FrameIndex,
    drift: &N,
    noise_factor: f64,
    noise_scale: f64,
) -> f64 {
    point.y_base
        + noise_factor
            * drift.noise3(
                point.x / noise_scale,
                point.y_base / noise_scale,
                frame.as_f64() / noise_scale,
            )
}

/// Write the live vertical coordinate of every control point into `target`.
///
/// Only the segments named by `points` are touched; x is never written.
pub fn animate_path<N: NoiseSource + ?Sized>(
    target: &mut dyn VertexAccess,
    points: &[ControlPoint],
    frame: FrameIndex,
    drift: &N,
    noise_factor: f64,
    noise_scale: f64,
) -> WavefieldResult<()> {
    for p in points {
        let y = live_y(p, frame, drift, noise_factor, noise_scale);
        target.set_vertex_y(p.segment, y)?;
    }
    Ok(())
}

/// Move every interior vertex of `field` to its position at `frame`.
///
/// Depends only on the stored baselines, so calling it twice for the same frame is a no-op.
pub fn apply_frame<N: NoiseSource + ?Sized>(
    field: &mut WaveField,
    frame: FrameIndex,
    drift: &N,
    cfg: &FieldConfig,
) -> WavefieldResult<()> {
    for wave in field.paths_mut() {
        let (path, points) = wave.parts_mut();
        animate_path(
            path,
            points,
            frame,
            drift,
            cfg.noise_factor,
            cfg.noise_scale,
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/animate/update.rs"]
mod tests;
