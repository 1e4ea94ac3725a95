//! Gaussian downsample for supersampled renders.

use glim_math::Vec3;

use crate::film::Film;

/// Supersampling factor used when the post-filter is enabled.
pub const FILTER_SCALE: u32 = 3;

/// 3x3 Gaussian kernel, weights summing to 16.
const KERNEL: [[f32; 3]; 3] = [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]];

/// Collapse a 3x-resolution film to its output size with a Gaussian tap
/// around every output pixel's source position.
///
/// Taps falling outside the film are skipped while the divisor stays 16,
/// so border pixels come out slightly darker.
pub fn gaussian_downsample(film: &Film) -> Film {
    let width = film.width / FILTER_SCALE;
    let height = film.height / FILTER_SCALE;
    let mut output = Film::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut color = Vec3::ZERO;
            for i in -1i64..=1 {
                for j in -1i64..=1 {
                    let x_pos = x as i64 * 3 + i;
                    let y_pos = y as i64 * 3 + j;
                    if x_pos < 0
                        || x_pos >= film.width as i64
                        || y_pos < 0
                        || y_pos >= film.height as i64
                    {
                        continue;
                    }
                    color += film.get(x_pos as u32, y_pos as u32)
                        * KERNEL[(i + 1) as usize][(j + 1) as usize];
                }
            }
            output.set(x, y, color / 16.0);
        }
    }

    output
}
