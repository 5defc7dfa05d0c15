//! Seeded sampling of random vectors and matrices.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{MathError, Result};
use crate::math::{Matrix, Vector};

/// Random source for initialising vectors and matrices.
///
/// With a seed the sequence of draws is reproducible across runs.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                debug!("sampler: seeded with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    fn check_range(op: &'static str, low: f64, high: f64) -> Result<()> {
        let finite = low.is_finite() && high.is_finite() && (high - low).is_finite();
        if !finite || low >= high {
            return Err(MathError::DegenerateInput {
                op,
                reason: format!("invalid sampling range [{}, {})", low, high),
            });
        }
        Ok(())
    }

    /// Vector of `n` values drawn uniformly from `[low, high)`.
    pub fn uniform_vector(&mut self, n: usize, low: f64, high: f64) -> Result<Vector> {
        Self::check_range("uniform_vector", low, high)?;
        Ok((0..n).map(|_| self.rng.gen_range(low..high)).collect())
    }

    /// `rows x cols` matrix of values drawn uniformly from `[low, high)`,
    /// filled in row-major order.
    pub fn uniform_matrix(
        &mut self,
        rows: usize,
        cols: usize,
        low: f64,
        high: f64,
    ) -> Result<Matrix> {
        Self::check_range("uniform_matrix", low, high)?;
        let data = (0..rows * cols)
            .map(|_| self.rng.gen_range(low..high))
            .collect();
        Matrix::from_shape_vec((rows, cols), data)
    }

    /// Random permutation of `0..n`.
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut self.rng);
        indices
    }
}
