//! Matrix utility functions.

use faer::{Col, Mat};

/// Detect columns that are constant (zero variance).
pub fn detect_constant_columns(x: &Mat<f64>, tolerance: f64) -> Vec<bool> {
    let n_rows = x.nrows();

    if n_rows == 0 {
        return vec![true; x.ncols()];
    }

    (0..x.ncols())
        .map(|j| {
            let first = x[(0, j)];
            (1..n_rows).all(|i| (x[(i, j)] - first).abs() < tolerance)
        })
        .collect()
}

/// Center a matrix by subtracting column means.
pub fn center_columns(x: &Mat<f64>) -> (Mat<f64>, Col<f64>) {
    let n_rows = x.nrows();
    let means = Col::from_fn(x.ncols(), |j| {
        (0..n_rows).map(|i| x[(i, j)]).sum::<f64>() / n_rows as f64
    });
    let centered = Mat::from_fn(n_rows, x.ncols(), |i, j| x[(i, j)] - means[j]);

    (centered, means)
}

/// Center a vector by subtracting the mean.
pub fn center_vector(y: &Col<f64>) -> (Col<f64>, f64) {
    let n = y.nrows();
    let mean: f64 = y.iter().sum::<f64>() / n as f64;

    (Col::from_fn(n, |i| y[i] - mean), mean)
}

/// Prepend a column of ones to `x`, producing `[1 | X]`.
pub fn augmented_design(x: &Mat<f64>) -> Mat<f64> {
    Mat::from_fn(
        x.nrows(),
        x.ncols() + 1,
        |i, j| if j == 0 { 1.0 } else { x[(i, j - 1)] },
    )
}

/// Invert `X'X` for a full-rank design using QR with back-substitution.
///
/// Returns `None` when a diagonal entry of R falls below `tolerance`, which
/// signals a singular (or numerically singular) cross-product matrix.
pub fn cross_product_inverse(design: &Mat<f64>, tolerance: f64) -> Option<Mat<f64>> {
    let xtx = design.transpose() * design;
    let p = xtx.nrows();

    let qr = xtx.qr();
    let q = qr.compute_Q();
    let r = qr.R();

    // Scale the tolerance to the magnitude of X'X so large-valued columns do
    // not trip the singularity check.
    let scale = (0..p).map(|i| xtx[(i, i)].abs()).fold(1.0_f64, f64::max);
    if (0..p).any(|i| r[(i, i)].abs() < tolerance * scale) {
        return None;
    }

    let qt = q.transpose();
    let mut inverse = Mat::zeros(p, p);
    for col in 0..p {
        for i in (0..p).rev() {
            let mut sum = qt[(i, col)];
            for j in (i + 1)..p {
                sum -= r[(i, j)] * inverse[(j, col)];
            }
            inverse[(i, col)] = sum / r[(i, i)];
        }
    }

    Some(inverse)
}
