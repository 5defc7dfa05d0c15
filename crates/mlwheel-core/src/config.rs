use serde::{Deserialize, Serialize};

use crate::random::Sampler;

/// Numeric settings shared by callers of the library.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MathConfig {
    /// Absolute tolerance used when comparing floating-point results.
    pub tolerance: f64,
    /// Digits after the decimal point in printed dumps.
    pub display_precision: usize,
    /// Seed for [`Sampler`]; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            display_precision: 4,
            seed: None,
        }
    }
}

impl MathConfig {
    pub fn new(tolerance: f64, display_precision: usize, seed: Option<u64>) -> Self {
        Self {
            tolerance,
            display_precision,
            seed,
        }
    }

    pub fn sampler(&self) -> Sampler {
        Sampler::new(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: MathConfig = serde_json::from_str(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.display_precision, 4);
        assert_eq!(cfg.tolerance, 1e-10);
    }

    #[test]
    fn seeded_config_gives_reproducible_sampler() {
        let cfg = MathConfig::new(1e-6, 2, Some(9));
        let a = cfg.sampler().uniform_vector(5, 0.0, 1.0).unwrap();
        let b = cfg.sampler().uniform_vector(5, 0.0, 1.0).unwrap();
        assert_eq!(a, b);
    }
}
