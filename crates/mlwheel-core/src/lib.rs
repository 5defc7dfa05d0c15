//! mlwheel-core: from-scratch numerical primitives for learning machine learning.
//!
//! This crate provides dense `Vector` and `Matrix` types with bounds-checked
//! access and basic linear algebra, scalar activation functions, a
//! mean-squared-error loss, a seeded random sampler, and a computation-graph
//! scaffold intended to grow into reverse-mode differentiation.
//!
//! Every fallible operation returns [`error::Result`]; bounds violations,
//! shape mismatches and degenerate inputs are distinct [`error::MathError`]
//! variants.
pub mod activation;
pub mod autograd;
pub mod config;
pub mod error;
pub mod loss;
pub mod math;
pub mod random;

pub use autograd::{ComputationGraph, NodeId};
pub use error::{MathError, Result};
pub use math::{Matrix, Vector};
