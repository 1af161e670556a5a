//! # Sensitivity Filter
//!
//! Separable Gaussian smoothing of a scalar field over the grid, used to
//! suppress checkerboard patterns in the density update.
//!
//! The kernel is truncated at `GAUSSIAN_TRUNCATE` standard deviations and
//! normalized. Samples beyond the grid edge are mirrored about the cell
//! boundary (`d c b a | a b c d | d c b a`), repeating as needed when the
//! kernel is wider than the axis.

use config::constants::gaussian_radius;
use density_grid::GridDims;

/// Normalized 1D Gaussian weights for `sigma`, of length `2r + 1`.
///
/// # Example
///
/// ```rust
/// use simp_optimizer::filter::gaussian_kernel;
///
/// let kernel = gaussian_kernel(1.5);
/// assert_eq!(kernel.len(), 13);
/// assert!((kernel.iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// ```
pub fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = gaussian_radius(sigma) as isize;
    let inv_two_var = 0.5 / (sigma * sigma);
    let mut weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-inv_two_var * (x * x) as f64).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

/// Smooths `field` with a Gaussian of standard deviation `sigma` along
/// x, then y, then z.
pub fn gaussian_filter(field: &[f64], dims: GridDims, sigma: f64) -> Vec<f64> {
    let kernel = gaussian_kernel(sigma);
    let mut current = field.to_vec();
    for axis in 0..3 {
        current = correlate_axis(&current, dims, axis, &kernel);
    }
    current
}

/// Maps an out-of-range position onto `[0, n)` by half-sample reflection.
fn reflect(position: isize, n: usize) -> usize {
    let n = n as isize;
    let period = 2 * n;
    let wrapped = position.rem_euclid(period);
    if wrapped < n {
        wrapped as usize
    } else {
        (period - 1 - wrapped) as usize
    }
}

fn correlate_axis(input: &[f64], dims: GridDims, axis: usize, kernel: &[f64]) -> Vec<f64> {
    let n = dims.axes()[axis];
    let stride = dims.stride(axis);
    let radius = (kernel.len() / 2) as isize;

    (0..input.len())
        .map(|index| {
            let (i, j, k) = dims.coords(index);
            let position = [i, j, k][axis];
            let line_start = index - position * stride;
            kernel
                .iter()
                .enumerate()
                .map(|(tap, weight)| {
                    let offset = position as isize + tap as isize - radius;
                    weight * input[line_start + reflect(offset, n) * stride]
                })
                .sum()
        })
        .collect()
}
