use std::fmt;
use std::iter::FromIterator;
use std::slice::Iter;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{Axis, MathError, Result, Shape};

/// Fixed-length vector of `f64` values.
///
/// The length is set at construction and never changes; elements are only
/// mutated through [`Vector::set`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// Zero-filled vector of dimension `n`. `n == 0` gives an empty vector.
    pub fn new(n: usize) -> Self {
        Self { data: vec![0.0; n] }
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self { data }
    }

    pub fn from_slice(data: &[f64]) -> Self {
        Self::from_vec(data.to_vec())
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn shape(&self) -> Shape {
        Shape::Vector(self.size())
    }

    #[inline]
    fn check(&self, op: &'static str, i: usize) -> Result<()> {
        if i >= self.data.len() {
            return Err(MathError::Bounds {
                op,
                axis: Axis::Element,
                index: i,
                extent: self.data.len(),
            });
        }
        Ok(())
    }

    pub fn get(&self, i: usize) -> Result<f64> {
        self.check("Vector::get", i)?;
        Ok(self.data[i])
    }

    pub fn set(&mut self, i: usize, value: f64) -> Result<()> {
        self.check("Vector::set", i)?;
        self.data[i] = value;
        Ok(())
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn mapv<F>(&self, mut f: F) -> Vector
    where
        F: FnMut(f64) -> f64,
    {
        Vector::from_vec(self.data.iter().map(|&v| f(v)).collect())
    }

    /// Element-wise comparison within an absolute tolerance. Vectors of
    /// different sizes are never equal.
    pub fn approx_eq(&self, other: &Vector, tol: f64) -> bool {
        self.size() == other.size()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }

    /// Sum of `v1[i] * v2[i]`, accumulated in index order.
    pub fn dot_product(v1: &Vector, v2: &Vector) -> Result<f64> {
        if v1.size() != v2.size() {
            return Err(MathError::Shape {
                op: "dot_product",
                left: v1.shape(),
                right: v2.shape(),
            });
        }
        let mut sum = 0.0;
        for i in 0..v1.size() {
            sum += v1.data[i] * v2.data[i];
        }
        Ok(sum)
    }

    pub fn apply_scalar(v: &Vector, scalar: f64) -> Vector {
        v.mapv(|x| x * scalar)
    }

    /// Orthogonal projection of `orig` onto `onto`.
    ///
    /// Projecting onto the zero vector has no direction to project along and
    /// fails with [`MathError::DegenerateInput`] rather than producing NaNs.
    pub fn project(onto: &Vector, orig: &Vector) -> Result<Vector> {
        let along = Vector::dot_product(onto, orig)?;
        let norm_sq = Vector::dot_product(onto, onto)?;
        if norm_sq == 0.0 {
            return Err(MathError::DegenerateInput {
                op: "project",
                reason: "cannot project onto the zero vector".to_string(),
            });
        }
        let scale = along / norm_sq;
        trace!("project: scale = {} / {} = {}", along, norm_sq, scale);
        Ok(Vector::apply_scalar(onto, scale))
    }

    /// Euclidean length.
    pub fn l2_norm(&self) -> f64 {
        let mut sum_squares = 0.0;
        for v in self.data.iter() {
            sum_squares += v * v;
        }
        sum_squares.sqrt()
    }
}

impl From<Vec<f64>> for Vector {
    fn from(value: Vec<f64>) -> Self {
        Vector::from_vec(value)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.data
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            match f.precision() {
                Some(p) => write!(f, "{:.*}", p, value)?,
                None => write!(f, "{}", value)?,
            }
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
