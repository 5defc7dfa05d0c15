//! Dense `Vector` and `Matrix` value types.
//!
//! Both own their storage exclusively and expose bounds-checked accessors
//! returning [`crate::error::Result`]. Binary and unary operations are
//! associated functions that never mutate their operands.
pub mod matrix;
pub mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
