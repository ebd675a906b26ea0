//! Seeded coherent noise.
//!
//! The field uses two independent sources: `warp` displaces control points horizontally at
//! construction time, `drift` moves them vertically over time.

/// Simplex noise implementation.
pub mod simplex;

pub use simplex::Simplex;

/// A deterministic, continuous pseudo-random function.
///
/// Outputs depend only on the input coordinates and the seed fixed at construction, and lie in
/// `[-1, 1]`.
pub trait NoiseSource {
    /// Sample 2D noise.
    fn noise2(&self, x: f64, y: f64) -> f64;
    /// Sample 3D noise.
    fn noise3(&self, x: f64, y: f64, z: f64) -> f64;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &N {
    fn noise2(&self, x: f64, y: f64) -> f64 {
        (**self).noise2(x, y)
    }

    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).noise3(x, y, z)
    }
}

/// The pair of noise sources a wave field is built and animated with.
#[derive(Clone, Debug)]
pub struct FieldNoise<N = Simplex> {
    /// Horizontal displacement of control points (2D, construction only).
    pub warp: N,
    /// Vertical drift of control points (3D, construction and every frame).
    pub drift: N,
}

// Keeps the two permutation tables unrelated for the same user seed.
const WARP_SEED_SALT: u64 = 0x5741_5250_5741_5250;

impl FieldNoise<Simplex> {
    /// Build both sources from a single seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            warp: Simplex::new(seed ^ WARP_SEED_SALT),
            drift: Simplex::new(seed),
        }
    }
}
