use std::error::Error;
use std::fmt;

/// Shape of an operand as reported in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Vector(usize),
    Matrix(usize, usize),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Vector(n) => write!(f, "({},)", n),
            Shape::Matrix(rows, cols) => write!(f, "({}, {})", rows, cols),
        }
    }
}

/// Axis of an indexed access, used to report which index was out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Element,
    Row,
    Col,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Element => write!(f, "element"),
            Axis::Row => write!(f, "row"),
            Axis::Col => write!(f, "column"),
        }
    }
}

/// Errors raised by the arithmetic engine and the computation graph.
///
/// Every variant carries the name of the operation that detected it so the
/// message is enough to diagnose the failing call.
#[derive(Debug, Clone, PartialEq)]
pub enum MathError {
    /// Index outside `[0, extent)` on some axis.
    Bounds {
        op: &'static str,
        axis: Axis,
        index: usize,
        extent: usize,
    },
    /// Operand shapes are incompatible for the operation.
    Shape {
        op: &'static str,
        left: Shape,
        right: Shape,
    },
    /// Input for which the operation has no finite answer (e.g. projecting onto
    /// the zero vector).
    DegenerateInput { op: &'static str, reason: String },
    /// Graph lookup for an identifier that was never assigned.
    UnknownNode { op: &'static str, id: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, MathError>;

impl MathError {
    pub fn is_bounds(&self) -> bool {
        matches!(self, MathError::Bounds { .. })
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, MathError::Shape { .. })
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, MathError::DegenerateInput { .. })
    }
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::Bounds {
                op,
                axis,
                index,
                extent,
            } => write!(
                f,
                "{}: {} index {} out of bounds for extent {}",
                op, axis, index, extent
            ),
            MathError::Shape { op, left, right } => write!(
                f,
                "{}: incompatible shapes {} and {}",
                op, left, right
            ),
            MathError::DegenerateInput { op, reason } => write!(f, "{}: {}", op, reason),
            MathError::UnknownNode { op, id, len } => write!(
                f,
                "{}: node {} does not exist in a graph of {} nodes",
                op, id, len
            ),
        }
    }
}

impl Error for MathError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_operation_and_dimensions() {
        let err = MathError::Shape {
            op: "add",
            left: Shape::Matrix(2, 3),
            right: Shape::Matrix(3, 2),
        };
        assert_eq!(err.to_string(), "add: incompatible shapes (2, 3) and (3, 2)");

        let err = MathError::Bounds {
            op: "get",
            axis: Axis::Row,
            index: 5,
            extent: 2,
        };
        assert_eq!(err.to_string(), "get: row index 5 out of bounds for extent 2");
    }

    #[test]
    fn predicates_distinguish_variants() {
        let err = MathError::DegenerateInput {
            op: "project",
            reason: "cannot project onto the zero vector".to_string(),
        };
        assert!(err.is_degenerate());
        assert!(!err.is_shape());
        assert!(!err.is_bounds());
    }
}
