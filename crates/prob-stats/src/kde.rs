//! Bivariate Gaussian kernel density estimation on a regular grid.

use std::f64::consts::PI;

use prob_core::{ErrorInfo, ProbError};

/// Gaussian KDE for two-dimensional data with Scott's bandwidth rule.
///
/// The kernel covariance is the data covariance (denominator `N − 1`) scaled
/// by `N^(-1/6)` squared.
#[derive(Debug, Clone)]
pub struct GaussianKde2d {
    xs: Vec<f64>,
    ys: Vec<f64>,
    // Inverse kernel covariance, row-major 2×2.
    inv_cov: [f64; 4],
    norm: f64,
}

impl GaussianKde2d {
    /// Fits the estimator to paired samples.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, ProbError> {
        if xs.len() != ys.len() {
            return Err(ProbError::InvalidInput(
                ErrorInfo::new("kde-length", "x and y sample lengths differ")
                    .with_context("x_len", xs.len().to_string())
                    .with_context("y_len", ys.len().to_string()),
            ));
        }
        if xs.len() < 2 {
            return Err(ProbError::invalid_input(
                "kde-size",
                "kernel density estimation needs at least two points",
            ));
        }
        if xs.iter().chain(ys).any(|value| !value.is_finite()) {
            return Err(ProbError::invalid_input(
                "kde-non-finite",
                "kernel density input contains a non-finite value",
            ));
        }

        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;
        let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
        for (&x, &y) in xs.iter().zip(ys) {
            let dx = x - mean_x;
            let dy = y - mean_y;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }
        let factor = n.powf(-1.0 / 6.0);
        let scale = factor * factor / (n - 1.0);
        let (a, b, d) = (sxx * scale, sxy * scale, syy * scale);
        let det = a * d - b * b;
        if det.is_nan() || det <= 0.0 {
            return Err(ProbError::InvalidInput(
                ErrorInfo::new("kde-singular", "sample covariance is singular")
                    .with_context("determinant", det.to_string()),
            ));
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            inv_cov: [d / det, -b / det, -b / det, a / det],
            norm: 2.0 * PI * det.sqrt() * n,
        })
    }

    /// Density estimate at `(x, y)`.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let [i00, i01, i10, i11] = self.inv_cov;
        let total: f64 = self
            .xs
            .iter()
            .zip(&self.ys)
            .map(|(&xi, &yi)| {
                let dx = x - xi;
                let dy = y - yi;
                let q = dx * (i00 * dx + i01 * dy) + dy * (i10 * dx + i11 * dy);
                (-0.5 * q).exp()
            })
            .sum();
        total / self.norm
    }

    /// Evaluates the density on the mesh spanned by `x_axis` × `y_axis`.
    ///
    /// Row `i` corresponds to `y_axis[i]`, column `j` to `x_axis[j]`.
    pub fn evaluate_grid(&self, x_axis: &[f64], y_axis: &[f64]) -> Vec<Vec<f64>> {
        y_axis
            .iter()
            .map(|&y| x_axis.iter().map(|&x| self.evaluate(x, y)).collect())
            .collect()
    }
}

/// `num` evenly spaced values over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            (0..num)
                .map(|idx| {
                    if idx == num - 1 {
                        end
                    } else {
                        start + idx as f64 * step
                    }
                })
                .collect()
        }
    }
}

/// Coordinate matrices for a mesh, matching the row/column layout of
/// [`GaussianKde2d::evaluate_grid`].
pub fn meshgrid(x_axis: &[f64], y_axis: &[f64]) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let x_grid = y_axis.iter().map(|_| x_axis.to_vec()).collect();
    let y_grid = y_axis.iter().map(|&y| vec![y; x_axis.len()]).collect();
    (x_grid, y_grid)
}
