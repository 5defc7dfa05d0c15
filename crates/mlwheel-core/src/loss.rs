//! Loss functions over matrices of predictions and targets.

use crate::error::{MathError, Result, Shape};
use crate::math::Matrix;

/// Mean squared error between `predictions` and `actual`.
///
/// Both matrices must share a shape. The squared differences are summed in
/// row-major order and divided by the number of cells; an empty pair of
/// matrices has no mean and is rejected.
pub fn mean_squared_error(predictions: &Matrix, actual: &Matrix) -> Result<f64> {
    let (rows, cols) = predictions.shape();
    if (rows, cols) != actual.shape() {
        let (a_rows, a_cols) = actual.shape();
        return Err(MathError::Shape {
            op: "mean_squared_error",
            left: Shape::Matrix(rows, cols),
            right: Shape::Matrix(a_rows, a_cols),
        });
    }
    if rows * cols == 0 {
        return Err(MathError::DegenerateInput {
            op: "mean_squared_error",
            reason: "mean of an empty matrix is undefined".to_string(),
        });
    }

    let mut squared_sum_diff = 0.0;
    for (p, a) in predictions.as_slice().iter().zip(actual.as_slice()) {
        let diff = p - a;
        squared_sum_diff += diff * diff;
    }
    Ok(squared_sum_diff / (rows * cols) as f64)
}
