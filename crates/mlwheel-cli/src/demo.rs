//! Demo scenarios printed by `mlwheel demo <name>`.
//!
//! Each runner writes a human-readable dump to `out`; the format is for
//! people, not for parsing.

use std::io::Write;

use anyhow::Result;
use log::info;

use mlwheel_core::activation::Activation;
use mlwheel_core::autograd::{ComputationGraph, Value};
use mlwheel_core::config::MathConfig;
use mlwheel_core::loss::mean_squared_error;
use mlwheel_core::math::{Matrix, Vector};

fn reference_matrices() -> Result<(Matrix, Matrix)> {
    let m1 = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 3.0]])?;
    let m2 = Matrix::from_rows(vec![vec![1.0, 10.0], vec![3.0, 4.0]])?;
    Ok((m1, m2))
}

pub fn run_matrix_demo<W: Write>(out: &mut W, config: &MathConfig) -> Result<()> {
    let p = config.display_precision;
    let (m1, m2) = reference_matrices()?;
    writeln!(out, "m1:\n{:.*}\n", p, m1)?;
    writeln!(out, "m2:\n{:.*}\n", p, m2)?;

    writeln!(out, "m1 + m2:\n{:.*}\n", p, Matrix::add(&m1, &m2, false)?)?;
    writeln!(out, "m1 - m2:\n{:.*}\n", p, Matrix::add(&m1, &m2, true)?)?;

    let m3 = Matrix::multiply(&m1, &m2)?;
    writeln!(out, "m1 * m2:\n{:.*}\n", p, m3)?;
    writeln!(out, "transpose(m1 * m2):\n{:.*}", p, Matrix::transpose(&m3))?;
    Ok(())
}

pub fn run_vector_demo<W: Write>(out: &mut W, config: &MathConfig) -> Result<()> {
    let p = config.display_precision;
    let v = Vector::from_vec(vec![0.0, 1.0, 2.0, 0.0, 0.0]);
    let v2 = Vector::from_vec(vec![3.0, 4.0, 3.0, 0.0, 0.0]);

    writeln!(out, "v  = {:.*}", p, v)?;
    writeln!(out, "v2 = {:.*}", p, v2)?;
    writeln!(out, "v . v   = {:.*}", p, Vector::dot_product(&v, &v)?)?;
    writeln!(out, "|v|     = {:.*}", p, v.l2_norm())?;
    writeln!(out, "|v2|    = {:.*}", p, v2.l2_norm())?;
    writeln!(out, "v . v2  = {:.*}", p, Vector::dot_product(&v, &v2)?)?;
    let projection = Vector::project(&v2, &v)?;
    writeln!(out, "proj_v2(v) = {:.*}", p, projection)?;
    let reprojected = Vector::project(&v2, &projection)?;
    writeln!(
        out,
        "proj_v2(proj_v2(v)) == proj_v2(v) within {:e}: {}",
        config.tolerance,
        reprojected.approx_eq(&projection, config.tolerance)
    )?;
    Ok(())
}

pub fn run_activation_demo<W: Write>(out: &mut W, config: &MathConfig) -> Result<()> {
    let p = config.display_precision;
    let xs = [-2.0, -1.0, 0.0, 1.0, 2.0];
    writeln!(out, "x\trelu\tsigmoid\ttanh")?;
    for &x in xs.iter() {
        writeln!(
            out,
            "{:.*}\t{:.*}\t{:.*}\t{:.*}",
            p,
            x,
            p,
            Activation::Relu.apply(x),
            p,
            Activation::Sigmoid.apply(x),
            p,
            Activation::Tanh.apply(x)
        )?;
    }
    Ok(())
}

/// Records the matrix scenario plus an MSE against `m2` and seeds the
/// placeholder backward pass on the loss node.
pub fn run_graph_demo<W: Write>(out: &mut W, config: &MathConfig) -> Result<()> {
    let p = config.display_precision;
    let (m1, m2) = reference_matrices()?;
    let mut graph = ComputationGraph::new();

    let a = graph.add_node("input", vec![], m1.clone());
    let b = graph.add_node("input", vec![], m2.clone());
    let product = Matrix::multiply(&m1, &m2)?;
    let mul = graph.add_node("multiply", vec![a.into(), b.into()], product.clone());
    let loss = mean_squared_error(&product, &m2)?;
    let mse = graph.add_node("mse", vec![mul.into(), b.into()], loss);

    graph.backward_seed(mse)?;
    info!("graph demo recorded {} nodes", graph.len());

    for node in graph.nodes() {
        let inputs: Vec<String> = node.input_nodes().map(|id| id.to_string()).collect();
        let output = match &node.output {
            Value::Scalar(x) => format!("{:.*}", p, x),
            Value::Vector(v) => format!("vector{}", v.shape()),
            Value::Matrix(m) => format!("matrix{:?}", m.shape()),
        };
        let gradient = graph
            .get_gradient(node.id)
            .map_or_else(|| "-".to_string(), |g| format!("{:.*}", p, g));
        writeln!(
            out,
            "{}\t{}\tinputs=[{}]\toutput={}\tgrad={}",
            node.id,
            node.operation,
            inputs.join(", "),
            output,
            gradient
        )?;
    }
    Ok(())
}

pub fn run_random_demo<W: Write>(
    out: &mut W,
    config: &MathConfig,
    rows: usize,
    cols: usize,
) -> Result<()> {
    let mut sampler = config.sampler();
    let m = sampler.uniform_matrix(rows, cols, -1.0, 1.0)?;
    writeln!(out, "{:.*}", config.display_precision, m)?;
    Ok(())
}
