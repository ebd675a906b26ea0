use crate::foundation::math::Rng64;
use crate::noise::NoiseSource;

static GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

const F2: f64 = 0.366_025_403_784_438_6; // 0.5 * (sqrt(3) - 1)
const G2: f64 = 0.211_324_865_405_187_1; // (3 - sqrt(3)) / 6
const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;

/// Seeded simplex noise in two and three dimensions.
///
/// The permutation table is a Fisher-Yates shuffle of `0..=255` driven by SplitMix64, so equal
/// seeds give bit-identical output on every platform.
#[derive(Clone)]
pub struct Simplex {
    perm: [u8; 512],
    perm_mod12: [u8; 512],
}

impl std::fmt::Debug for Simplex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simplex")
            .field("perm_head", &&self.perm[..8])
            .finish_non_exhaustive()
    }
}

impl Simplex {
    /// Build a noise function from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut base = [0u8; 256];
        for (i, v) in base.iter_mut().enumerate() {
            *v = i as u8;
        }
        let mut rng = Rng64::new(seed);
        for i in (1..base.len()).rev() {
            let j = rng.below_inclusive(i);
            base.swap(i, j);
        }

        let mut perm = [0u8; 512];
        let mut perm_mod12 = [0u8; 512];
        for i in 0..512 {
            perm[i] = base[i & 255];
            perm_mod12[i] = perm[i] % 12;
        }
        Self { perm, perm_mod12 }
    }

    fn p(&self, i: usize) -> usize {
        usize::from(self.perm[i])
    }

    fn g(&self, i: usize) -> &'static [f64; 3] {
        &GRAD3[usize::from(self.perm_mod12[i])]
    }
}

fn corner2(g: &[f64; 3], x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let t = t * t;
        t * t * (g[0] * x + g[1] * y)
    }
}

fn corner3(g: &[f64; 3], x: f64, y: f64, z: f64) -> f64 {
    let t = 0.6 - x * x - y * y - z * z;
    if t < 0.0 {
        0.0
    } else {
        let t = t * t;
        t * t * (g[0] * x + g[1] * y + g[2] * z)
    }
}

fn wrap(i: f64) -> usize {
    ((i as i64) & 255) as usize
}

impl NoiseSource for Simplex {
    fn noise2(&self, x: f64, y: f64) -> f64 {
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = wrap(i);
        let jj = wrap(j);
        let g0 = self.g(ii + self.p(jj));
        let g1 = self.g(ii + i1 + self.p(jj + j1));
        let g2 = self.g(ii + 1 + self.p(jj + 1));

        let n = corner2(g0, x0, y0) + corner2(g1, x1, y1) + corner2(g2, x2, y2);
        (70.0 * n).clamp(-1.0, 1.0)
    }

    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let s = (x + y + z) * F3;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let k = (z + s).floor();
        let t = (i + j + k) * G3;
        let x0 = x - (i - t);
        let y0 = y - (j - t);
        let z0 = z - (k - t);

        // Offsets of the second and third simplex corners.
        let ((i1, j1, k1), (i2, j2, k2)) = if x0 >= y0 {
            if y0 >= z0 {
                ((1, 0, 0), (1, 1, 0))
            } else if x0 >= z0 {
                ((1, 0, 0), (1, 0, 1))
            } else {
                ((0, 0, 1), (1, 0, 1))
            }
        } else if y0 < z0 {
            ((0, 0, 1), (0, 1, 1))
        } else if x0 < z0 {
            ((0, 1, 0), (0, 1, 1))
        } else {
            ((0, 1, 0), (1, 1, 0))
        };

        let x1 = x0 - i1 as f64 + G3;
        let y1 = y0 - j1 as f64 + G3;
        let z1 = z0 - k1 as f64 + G3;
        let x2 = x0 - i2 as f64 + 2.0 * G3;
        let y2 = y0 - j2 as f64 + 2.0 * G3;
        let z2 = z0 - k2 as f64 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let ii = wrap(i);
        let jj = wrap(j);
        let kk = wrap(k);
        let g0 = self.g(ii + self.p(jj + self.p(kk)));
        let g1 = self.g(ii + i1 + self.p(jj + j1 + self.p(kk + k1)));
        let g2 = self.g(ii + i2 + self.p(jj + j2 + self.p(kk + k2)));
        let g3 = self.g(ii + 1 + self.p(jj + 1 + self.p(kk + 1)));

        let n = corner3(g0, x0, y0, z0)
            + corner3(g1, x1, y1, z1)
            + corner3(g2, x2, y2, z2)
            + corner3(g3, x3, y3, z3);
        (32.0 * n).clamp(-1.0, 1.0)
    }
}
