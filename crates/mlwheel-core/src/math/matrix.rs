use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Axis, MathError, Result, Shape};
use crate::math::vector::Vector;

/// Dense `rows x cols` matrix of `f64`, stored row-major.
///
/// Arithmetic is exposed as associated functions taking borrowed operands
/// (`Matrix::add(&a, &b, false)`); results are always freshly allocated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

/// Unchecked wire form of [`Matrix`]; deserialization goes through
/// [`Matrix::from_shape_vec`] so the buffer length always matches the shape.
#[derive(Deserialize)]
struct RawMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = MathError;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        Matrix::from_shape_vec((raw.rows, raw.cols), raw.data)
    }
}

impl Matrix {
    /// Zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(MathError::Shape {
                op: "Matrix::from_shape_vec",
                left: Shape::Matrix(rows, cols),
                right: Shape::Vector(data.len()),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Builds a matrix from a list of rows. All rows must have the length of
    /// the first one; an empty list gives a `0 x 0` matrix.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(MathError::Shape {
                    op: "Matrix::from_rows",
                    left: Shape::Matrix(i, n_cols),
                    right: Shape::Vector(row.len()),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            data,
            rows: n_rows,
            cols: n_cols,
        })
    }

    /// Square identity matrix of size `n`.
    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::new(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn dims(&self) -> Shape {
        Shape::Matrix(self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check(&self, op: &'static str, row: usize, col: usize) -> Result<()> {
        if row >= self.rows {
            return Err(MathError::Bounds {
                op,
                axis: Axis::Row,
                index: row,
                extent: self.rows,
            });
        }
        if col >= self.cols {
            return Err(MathError::Bounds {
                op,
                axis: Axis::Col,
                index: col,
                extent: self.cols,
            });
        }
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check("Matrix::get", row, col)?;
        Ok(self.data[self.offset(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.check("Matrix::set", row, col)?;
        let offset = self.offset(row, col);
        self.data[offset] = value;
        Ok(())
    }

    pub fn row_slice(&self, row: usize) -> Result<&[f64]> {
        if row >= self.rows {
            return Err(MathError::Bounds {
                op: "Matrix::row_slice",
                axis: Axis::Row,
                index: row,
                extent: self.rows,
            });
        }
        let start = self.offset(row, 0);
        Ok(&self.data[start..start + self.cols])
    }

    pub fn row(&self, row: usize) -> Result<Vector> {
        self.row_slice(row).map(Vector::from_slice)
    }

    pub fn column(&self, col: usize) -> Result<Vector> {
        if col >= self.cols {
            return Err(MathError::Bounds {
                op: "Matrix::column",
                axis: Axis::Col,
                index: col,
                extent: self.cols,
            });
        }
        Ok((0..self.rows)
            .map(|row| self.data[self.offset(row, col)])
            .collect())
    }

    pub fn mapv<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }

    /// Element-wise `m1 + m2`, or `m1 - m2` when `subtract` is set.
    pub fn add(m1: &Matrix, m2: &Matrix, subtract: bool) -> Result<Matrix> {
        if m1.shape() != m2.shape() {
            return Err(MathError::Shape {
                op: if subtract { "subtract" } else { "add" },
                left: m1.dims(),
                right: m2.dims(),
            });
        }
        let sign = if subtract { -1.0 } else { 1.0 };
        let data = m1
            .data
            .iter()
            .zip(m2.data.iter())
            .map(|(a, b)| a + sign * b)
            .collect();
        Ok(Matrix {
            data,
            rows: m1.rows,
            cols: m1.cols,
        })
    }

    /// Matrix product by the plain triple loop; `m1.cols` must equal `m2.rows`.
    pub fn multiply(m1: &Matrix, m2: &Matrix) -> Result<Matrix> {
        if m1.cols != m2.rows {
            return Err(MathError::Shape {
                op: "multiply",
                left: m1.dims(),
                right: m2.dims(),
            });
        }
        debug!(
            "multiply: ({}, {}) x ({}, {})",
            m1.rows, m1.cols, m2.rows, m2.cols
        );

        let mut result = Matrix::new(m1.rows, m2.cols);
        for i in 0..m1.rows {
            for j in 0..m2.cols {
                let mut sum = 0.0;
                for k in 0..m1.cols {
                    sum += m1.data[m1.offset(i, k)] * m2.data[m2.offset(k, j)];
                }
                let offset = result.offset(i, j);
                result.data[offset] = sum;
            }
        }
        Ok(result)
    }

    pub fn transpose(m1: &Matrix) -> Matrix {
        let mut result = Matrix::new(m1.cols, m1.rows);
        for i in 0..m1.rows {
            for j in 0..m1.cols {
                let offset = result.offset(j, i);
                result.data[offset] = m1.data[m1.offset(i, j)];
            }
        }
        result
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Num rows: {} Num Cols: {}", self.rows, self.cols)?;
        for row in 0..self.rows {
            write!(f, "\n[")?;
            for col in 0..self.cols {
                let value = self.data[self.offset(row, col)];
                match f.precision() {
                    Some(p) => write!(f, "{:.*}", p, value)?,
                    None => write!(f, "{}", value)?,
                }
                if col + 1 != self.cols {
                    write!(f, ", ")?;
                }
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn from_shape_vec_checks_length() {
        assert!(Matrix::from_shape_vec((2, 3), vec![1.0; 5]).is_err());
        let m = Matrix::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.get(1, 0).unwrap(), 4.0);
    }

    #[test]
    fn bounds_error_names_the_axis() {
        let m = Matrix::new(2, 3);
        match m.get(0, 3).unwrap_err() {
            MathError::Bounds { axis, index, extent, .. } => {
                assert_eq!(axis, Axis::Col);
                assert_eq!(index, 3);
                assert_eq!(extent, 3);
            }
            other => panic!("unexpected error {:?}", other),
        }
        match m.get(2, 0).unwrap_err() {
            MathError::Bounds { axis, .. } => assert_eq!(axis, Axis::Row),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn row_and_column_views() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(m.row(1).unwrap().to_vec(), vec![3.0, 4.0]);
        assert_eq!(m.column(1).unwrap().to_vec(), vec![2.0, 4.0, 6.0]);
        assert!(m.column(2).is_err());
        assert!(m.row(3).is_err());
    }

    #[test]
    fn subtract_error_reports_subtract() {
        let err = Matrix::add(&Matrix::new(1, 2), &Matrix::new(2, 1), true).unwrap_err();
        assert_eq!(err.to_string(), "subtract: incompatible shapes (1, 2) and (2, 1)");
    }

    #[test]
    fn transpose_of_empty_swaps_dimensions() {
        let t = Matrix::transpose(&Matrix::new(0, 3));
        assert_eq!(t.shape(), (3, 0));
        assert!(t.as_slice().is_empty());
    }

    #[test]
    fn deserialize_rejects_mismatched_buffer() {
        let err = serde_json::from_str::<Matrix>(r#"{"data":[1.0],"rows":2,"cols":2}"#)
            .unwrap_err();
        assert!(err.to_string().contains("incompatible shapes (2, 2) and (1,)"));

        let overflow = format!(r#"{{"data":[],"rows":{},"cols":2}}"#, usize::MAX);
        assert!(serde_json::from_str::<Matrix>(&overflow).is_err());
    }

    #[test]
    fn deserialize_accepts_consistent_buffer() {
        let m: Matrix =
            serde_json::from_str(r#"{"data":[1.0,2.0,3.0,4.0],"rows":2,"cols":2}"#).unwrap();
        assert_eq!(m.get(1, 1).unwrap(), 4.0);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(serde_json::from_str::<Matrix>(&json).unwrap(), m);
    }

    #[test]
    fn display_dump() {
        let m = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 3.0]]).unwrap();
        assert_eq!(format!("{}", m), "Num rows: 2 Num Cols: 2\n[1, 0]\n[0, 3]");
    }
}
