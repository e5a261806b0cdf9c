//! Cooling field generation
//!
//! The cooling grid is sampled once per session from gradient noise:
//! coordinates are divided by `scale`, the sample is multiplied by
//! `amplitude`, negative values are clipped to zero and the result is rounded
//! to the nearest byte.

use super::noise::NoiseGenerator;
use crate::core_types::CoolingGrid;
use rayon::prelude::*;

/// Parameters for sampling the cooling field
#[derive(Debug, Clone, Copy)]
pub struct CoolingParams {
    /// Divisor applied to cell coordinates before sampling
    pub scale: f32,
    /// Multiplier applied to the [-1, 1] noise sample
    pub amplitude: f32,
}

impl Default for CoolingParams {
    fn default() -> Self {
        Self {
            scale: 10.0,
            amplitude: 10.0,
        }
    }
}

/// Cooling amount for one noise sample.
#[inline]
fn cooling_amount(sample: f32, amplitude: f32) -> u8 {
    (sample * amplitude).round().clamp(0.0, f32::from(u8::MAX)) as u8
}

/// Build the static cooling grid for a session.
///
/// Rows are filled in parallel; the result depends only on `seed`.
#[must_use]
pub fn generate_cooling_field(
    width: usize,
    height: usize,
    params: CoolingParams,
    seed: u64,
) -> CoolingGrid {
    let noise = NoiseGenerator::new(seed);
    let mut data = vec![0_u8; width * height];

    data.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let ny = y as f32 / params.scale;
            for (x, cell) in row.iter_mut().enumerate() {
                let nx = x as f32 / params.scale;
                *cell = cooling_amount(noise.sample(nx, ny), params.amplitude);
            }
        });

    CoolingGrid::from_vec(width, height, data)
}
