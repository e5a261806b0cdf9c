//! Gradient noise for the cooling field.
//!
//! Multi-octave Perlin-style noise. Neighbouring samples are strongly
//! correlated, which is what makes the subtracted cooling read as drifting
//! smoke instead of per-pixel static.
//!
//! Each octave doubles the frequency of the previous one and quarters its
//! weight, summing three octaves by default.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Permutation table size (must be power of 2).
const PERM_SIZE: usize = 256;

/// One layer of the fractal sum.
#[derive(Clone, Debug)]
pub struct NoiseOctave {
    /// Multiplier applied to sample coordinates (higher = finer detail).
    pub frequency: f32,

    /// Weight of this layer in the normalized sum.
    pub amplitude: f32,
}

impl NoiseOctave {
    /// Create a new noise octave.
    #[must_use]
    pub fn new(frequency: f32, amplitude: f32) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }
}

/// Multi-octave gradient noise generator.
///
/// Deterministic given a seed.
#[derive(Clone, Debug)]
pub struct NoiseGenerator {
    /// Seed the permutation table was shuffled with.
    pub seed: u64,

    /// Octave configuration.
    pub octaves: Vec<NoiseOctave>,

    /// Doubled permutation table for gradient selection.
    perm: Vec<u8>,

    /// Gradient vectors for 2D noise (8 directions).
    gradients: [(f32, f32); 8],
}

impl NoiseGenerator {
    /// Create generator with the default three octaves
    /// (frequency ×1/×2/×4, weight 1, 1/4, 1/16).
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let octaves = vec![
            NoiseOctave::new(1.0, 1.0),
            NoiseOctave::new(2.0, 0.25),
            NoiseOctave::new(4.0, 0.0625),
        ];
        Self::with_octaves(seed, octaves)
    }

    /// Create generator with custom octaves.
    #[must_use]
    pub fn with_octaves(seed: u64, octaves: Vec<NoiseOctave>) -> Self {
        let perm = Self::generate_permutation(seed);
        let gradients = Self::generate_gradients();

        Self {
            seed,
            octaves,
            perm,
            gradients,
        }
    }

    /// Shuffle `0..=255` with a seeded RNG and double it so lookups
    /// of `perm[px] + py` never need a modulo.
    fn generate_permutation(seed: u64) -> Vec<u8> {
        let mut perm: Vec<u8> = (0..=255).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        perm.shuffle(&mut rng);

        let mut doubled = Vec::with_capacity(PERM_SIZE * 2);
        doubled.extend_from_slice(&perm);
        doubled.extend_from_slice(&perm);
        doubled
    }

    /// Unit vectors in 8 equally spaced directions.
    fn generate_gradients() -> [(f32, f32); 8] {
        use std::f32::consts::FRAC_1_SQRT_2;
        [
            (1.0, 0.0),
            (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
            (0.0, 1.0),
            (-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
            (-1.0, 0.0),
            (-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
            (0.0, -1.0),
            (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
        ]
    }

    /// Sample noise at a position, returns value in range [-1, 1].
    ///
    /// Normalized by the total octave amplitude; zero at integer lattice
    /// points when every octave frequency is an integer.
    #[must_use]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        if self.octaves.is_empty() {
            return 0.0;
        }

        let mut total = 0.0_f32;
        let mut amplitude_sum = 0.0_f32;

        for octave in &self.octaves {
            let nx = x * octave.frequency;
            let ny = y * octave.frequency;
            total += self.gradient_noise_2d(nx, ny) * octave.amplitude;
            amplitude_sum += octave.amplitude;
        }

        if amplitude_sum > 0.0 {
            (total / amplitude_sum).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }

    /// 2D gradient noise at a single point.
    fn gradient_noise_2d(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor() as i32;
        let y0 = y.floor() as i32;
        let x1 = x0 + 1;
        let y1 = y0 + 1;

        let fx = x - x.floor();
        let fy = y - y.floor();

        let sx = Self::fade(fx);
        let sy = Self::fade(fy);

        let n00 = self.gradient_dot(x0, y0, fx, fy);
        let n10 = self.gradient_dot(x1, y0, fx - 1.0, fy);
        let n01 = self.gradient_dot(x0, y1, fx, fy - 1.0);
        let n11 = self.gradient_dot(x1, y1, fx - 1.0, fy - 1.0);

        let nx0 = Self::lerp(n00, n10, sx);
        let nx1 = Self::lerp(n01, n11, sx);
        Self::lerp(nx0, nx1, sy)
    }

    fn gradient_dot(&self, ix: i32, iy: i32, dx: f32, dy: f32) -> f32 {
        let grad = self.gradients[self.hash(ix, iy)];
        grad.0 * dx + grad.1 * dy
    }

    /// Hash lattice coordinates to a gradient index.
    fn hash(&self, x: i32, y: i32) -> usize {
        let px = (x & 0xFF) as usize;
        let py = (y & 0xFF) as usize;
        (self.perm[self.perm[px] as usize + py] as usize) & 0x07
    }

    /// 6t^5 - 15t^4 + 10t^3
    #[inline]
    fn fade(t: f32) -> f32 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + t * (b - a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn noise_generator_produces_valid_range() {
        let gen = NoiseGenerator::new(12345);

        for i in 0..1000 {
            let x = (i as f32) * 0.73;
            let y = (i as f32) * 1.17;
            let value = gen.sample(x, y);

            assert!(
                (-1.0..=1.0).contains(&value),
                "Noise value {value} at ({x}, {y}) is outside [-1, 1] range"
            );
        }
    }

    #[test]
    fn noise_vanishes_on_lattice_points() {
        let gen = NoiseGenerator::new(7);
        for i in -5..5 {
            let v = gen.sample(i as f32, (i * 3) as f32);
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn noise_is_spatially_smooth() {
        let gen = NoiseGenerator::new(42);

        // Steps of 0.1 lattice units (one pixel at the default scale) never jump far
        for i in 0..500 {
            let x = (i as f32) * 0.1;
            let a = gen.sample(x, 3.3);
            let b = gen.sample(x + 0.1, 3.3);
            assert!(
                (a - b).abs() < 0.5,
                "Adjacent samples jumped from {a} to {b} at x={x}"
            );
        }
    }

    #[test]
    fn noise_deterministic_with_seed() {
        let gen1 = NoiseGenerator::new(999);
        let gen2 = NoiseGenerator::new(999);

        for i in 0..100 {
            let x = (i as f32) * 1.37;
            let y = (i as f32) * 1.93;
            assert_abs_diff_eq!(gen1.sample(x, y), gen2.sample(x, y));
        }

        let gen3 = NoiseGenerator::new(111);
        let differs = (0..100).any(|i| {
            let x = (i as f32) * 1.37;
            let y = (i as f32) * 1.93;
            (gen1.sample(x, y) - gen3.sample(x, y)).abs() > f32::EPSILON
        });
        assert!(differs, "Different seeds should produce different noise");
    }

    #[test]
    fn noise_empty_octaves_returns_zero() {
        let gen = NoiseGenerator::with_octaves(123, vec![]);

        for i in 0..10 {
            let value = gen.sample(i as f32 * 0.5, i as f32 * 0.7);
            assert_abs_diff_eq!(value, 0.0);
        }
    }
}
