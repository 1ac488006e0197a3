//! Common test utilities and data sets.

#![allow(dead_code)]

use faer::{Col, Mat};
use regress_select::core::Dataset;

/// Motor Trend road tests (1974), mpg against four of the recorded variables.
pub mod mtcars {
    pub const MPG: [f64; 32] = [
        21.0, 21.0, 22.8, 21.4, 18.7, 18.1, 14.3, 24.4, 22.8, 19.2, 17.8, 16.4, 17.3, 15.2, 10.4,
        10.4, 14.7, 32.4, 30.4, 33.9, 21.5, 15.5, 15.2, 13.3, 19.2, 27.3, 26.0, 30.4, 15.8, 19.7,
        15.0, 21.4,
    ];

    pub const DISP: [f64; 32] = [
        160.0, 160.0, 108.0, 258.0, 360.0, 225.0, 360.0, 146.7, 140.8, 167.6, 167.6, 275.8, 275.8,
        275.8, 472.0, 460.0, 440.0, 78.7, 75.7, 71.1, 120.1, 318.0, 304.0, 350.0, 400.0, 79.0,
        120.3, 95.1, 351.0, 145.0, 301.0, 121.0,
    ];

    pub const HP: [f64; 32] = [
        110.0, 110.0, 93.0, 110.0, 175.0, 105.0, 245.0, 62.0, 95.0, 123.0, 123.0, 180.0, 180.0,
        180.0, 205.0, 215.0, 230.0, 66.0, 52.0, 65.0, 97.0, 150.0, 150.0, 245.0, 175.0, 66.0, 91.0,
        113.0, 264.0, 175.0, 335.0, 109.0,
    ];

    pub const WT: [f64; 32] = [
        2.620, 2.875, 2.320, 3.215, 3.440, 3.460, 3.570, 3.190, 3.150, 3.440, 3.440, 4.070, 3.730,
        3.780, 5.250, 5.424, 5.345, 2.200, 1.615, 1.835, 2.465, 3.520, 3.435, 3.840, 3.845, 1.935,
        2.140, 1.513, 3.170, 2.770, 3.570, 2.780,
    ];

    pub const QSEC: [f64; 32] = [
        16.46, 17.02, 18.61, 19.44, 17.02, 20.22, 15.84, 20.00, 22.90, 18.30, 18.90, 17.40, 17.60,
        18.00, 17.98, 17.82, 17.42, 19.47, 18.52, 19.90, 20.01, 16.87, 17.30, 15.41, 17.05, 18.90,
        16.70, 16.90, 14.50, 15.50, 14.60, 18.60,
    ];

}

/// `mpg ~ disp + hp + wt + qsec`, predictors in that order.
pub fn mtcars() -> Dataset {
    Dataset::from_columns(
        "mpg",
        &mtcars::MPG,
        &[
            ("disp", &mtcars::DISP),
            ("hp", &mtcars::HP),
            ("wt", &mtcars::WT),
            ("qsec", &mtcars::QSEC),
        ],
    )
    .expect("mtcars is a valid dataset")
}

/// `mpg ~ disp + hp`.
pub fn mtcars_disp_hp() -> Dataset {
    Dataset::from_columns(
        "mpg",
        &mtcars::MPG,
        &[("disp", &mtcars::DISP), ("hp", &mtcars::HP)],
    )
    .expect("mtcars is a valid dataset")
}

/// Hald's cement data: heat evolved against four ingredient shares.
pub fn hald() -> Dataset {
    Dataset::from_columns(
        "y",
        &[
            78.5, 74.3, 104.3, 87.6, 95.9, 109.2, 102.7, 72.5, 93.1, 115.9, 83.8, 113.3, 109.4,
        ],
        &[
            ("x1", &[7., 1., 11., 11., 7., 11., 3., 1., 2., 21., 1., 11., 10.]),
            ("x2", &[26., 29., 56., 31., 52., 55., 71., 31., 54., 47., 40., 66., 68.]),
            ("x3", &[6., 15., 8., 8., 6., 9., 17., 22., 18., 4., 23., 9., 8.]),
            ("x4", &[60., 52., 20., 47., 33., 22., 6., 44., 22., 26., 34., 12., 12.]),
        ],
    )
    .expect("hald is a valid dataset")
}

/// Generate simple linear data: y = x * beta + intercept + noise
pub fn generate_linear_data(
    n_samples: usize,
    n_features: usize,
    intercept: f64,
    noise_std: f64,
    seed: u64,
) -> (Mat<f64>, Col<f64>, Col<f64>) {
    // Simple deterministic "random" for reproducibility
    let mut rng_state = seed;
    let next_rand = |state: &mut u64| -> f64 {
        *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((*state >> 33) as f64) / (u32::MAX as f64) * 2.0 - 1.0
    };

    let mut x = Mat::zeros(n_samples, n_features);
    let mut y = Col::zeros(n_samples);
    let true_coefficients = Col::from_fn(n_features, |j| (j + 1) as f64);

    for i in 0..n_samples {
        let mut yi = intercept;
        for j in 0..n_features {
            x[(i, j)] = next_rand(&mut rng_state);
            yi += x[(i, j)] * true_coefficients[j];
        }
        yi += noise_std * next_rand(&mut rng_state);
        y[i] = yi;
    }

    (x, y, true_coefficients)
}

/// Wrap generated data as a dataset with predictors `x1..xk`.
pub fn linear_dataset(n_samples: usize, n_features: usize, noise_std: f64, seed: u64) -> Dataset {
    let (x, y, _) = generate_linear_data(n_samples, n_features, 1.0, noise_std, seed);
    (0..n_features)
        .fold(Dataset::new("y", y), |data, j| {
            data.and_then(|d| {
                d.with_predictor(format!("x{}", j + 1), Col::from_fn(n_samples, |i| x[(i, j)]))
            })
        })
        .expect("generated data is valid")
}

/// Generate data with collinear features.
pub fn generate_collinear_data(n_samples: usize) -> (Mat<f64>, Col<f64>) {
    let mut x = Mat::zeros(n_samples, 3);
    let mut y = Col::zeros(n_samples);

    for i in 0..n_samples {
        x[(i, 0)] = i as f64;
        x[(i, 1)] = 2.0 * i as f64; // Perfectly collinear with x0
        x[(i, 2)] = (i * i) as f64;
        y[i] = 1.0 + 2.0 * x[(i, 0)] + 3.0 * x[(i, 2)];
    }

    (x, y)
}

/// Generate data with constant columns.
pub fn generate_constant_column_data(n_samples: usize) -> (Mat<f64>, Col<f64>) {
    let mut x = Mat::zeros(n_samples, 3);
    let mut y = Col::zeros(n_samples);

    for i in 0..n_samples {
        x[(i, 0)] = i as f64;
        x[(i, 1)] = 5.0; // Constant column
        x[(i, 2)] = (i * 2) as f64;
        y[i] = 1.0 + 2.0 * x[(i, 0)] + 3.0 * x[(i, 2)];
    }

    (x, y)
}

/// Round to three decimals, the precision of published reference tables.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
