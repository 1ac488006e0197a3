//! Utility functions.

mod combinations;
mod matrix;

pub use combinations::{binomial, Combinations};
pub use matrix::{
    augmented_design, center_columns, center_vector, cross_product_inverse,
    detect_constant_columns,
};
