//! Scalar activation functions and their element-wise application.

use std::str::FromStr;

use crate::math::{Matrix, Vector};

/// Rectified linear unit, `max(0, x)`.
pub fn relu(x: f64) -> f64 {
    x.max(0.0)
}

/// Logistic sigmoid, `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

pub fn tanh(x: f64) -> f64 {
    x.tanh()
}

/// Supported activation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Relu,
    Sigmoid,
    Tanh,
}

impl Activation {
    pub fn name(&self) -> &'static str {
        match self {
            Activation::Relu => "relu",
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
        }
    }

    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Activation::Relu => relu(x),
            Activation::Sigmoid => sigmoid(x),
            Activation::Tanh => tanh(x),
        }
    }

    /// Derivative with respect to the input, evaluated at `x`.
    ///
    /// ReLU uses 0 at the kink.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Activation::Relu => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Sigmoid => {
                let s = sigmoid(x);
                s * (1.0 - s)
            }
            Activation::Tanh => {
                let t = tanh(x);
                1.0 - t * t
            }
        }
    }

    pub fn apply_vector(&self, v: &Vector) -> Vector {
        v.mapv(|x| self.apply(x))
    }

    pub fn apply_matrix(&self, m: &Matrix) -> Matrix {
        m.mapv(|x| self.apply(x))
    }
}

impl FromStr for Activation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relu" => Ok(Activation::Relu),
            "sigmoid" => Ok(Activation::Sigmoid),
            "tanh" => Ok(Activation::Tanh),
            _ => Err(format!(
                "Unknown activation: {}. Expected one of relu, sigmoid, tanh",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relu_clamps_negatives() {
        assert_eq!(relu(5.0), 5.0);
        assert_eq!(relu(-3.0), 0.0);
        assert_eq!(relu(0.0), 0.0);
    }

    #[test]
    fn sigmoid_saturates() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-10);
        assert!((sigmoid(100.0) - 1.0).abs() < 1e-10);
        assert!(sigmoid(-100.0).abs() < 1e-10);
    }

    #[test]
    fn tanh_saturates() {
        assert!(tanh(0.0).abs() < 1e-10);
        assert!((tanh(100.0) - 1.0).abs() < 1e-10);
        assert!((tanh(-100.0) + 1.0).abs() < 1e-10);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let h = 1e-6;
        for act in [Activation::Sigmoid, Activation::Tanh, Activation::Relu] {
            for &x in &[-1.5, -0.3, 0.4, 2.0] {
                let numeric = (act.apply(x + h) - act.apply(x - h)) / (2.0 * h);
                assert!(
                    (numeric - act.derivative(x)).abs() < 1e-6,
                    "{} at {}",
                    act.name(),
                    x
                );
            }
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("ReLU".parse::<Activation>().unwrap(), Activation::Relu);
        assert_eq!("tanh".parse::<Activation>().unwrap(), Activation::Tanh);
        assert!("softmax".parse::<Activation>().is_err());
    }

    #[test]
    fn apply_matrix_preserves_shape() {
        let m = Matrix::from_rows(vec![vec![-1.0, 2.0, -3.0]]).unwrap();
        let out = Activation::Relu.apply_matrix(&m);
        assert_eq!(out.shape(), (1, 3));
        assert_eq!(out.to_vec(), vec![0.0, 2.0, 0.0]);
    }
}
