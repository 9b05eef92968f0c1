//! Error taxonomy and student-facing message builder.
//!
//! Three shape-error kinds exist across the engine: `ParseShape`
//! (malformed literal, always surfaced), `OperationShape` (incompatible
//! operands, surfaced or converted to an incorrect grade per
//! configuration) and the comparison-time mismatch, which lives in the
//! grading crate. Everything else here is a residual numeric or usage
//! error and is always surfaced, since it means the computation is
//! undefined rather than merely mismatched.
//!
//! Messages are built from the descriptor phrases on [`Value`]
//! ("a vector of length 3", "a matrix of shape (rows: 2, cols: 2)")
//! spliced into per-operation templates.

use crate::value::Value;
use lingrade_ast::op::BinOp;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Malformed array literal; the submission cannot be graded at all.
    #[error("{0}")]
    ParseShape(String),

    /// Incompatible operand shapes for an arithmetic operator.
    #[error("{0}")]
    OperationShape(String),

    #[error("Cannot invert a singular matrix.")]
    SingularMatrix,

    #[error("Division by zero.")]
    DivisionByZero,

    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EvalResult<T> = Result<T, EvalError>;

impl EvalError {
    /// Shape errors that the raise/suppress configuration may convert
    /// into an ordinary incorrect grade. `ParseShape` is deliberately
    /// excluded: a malformed submission is never silently graded.
    pub fn is_operation_shape(&self) -> bool {
        matches!(self, EvalError::OperationShape(_))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        EvalError::Internal(msg.into())
    }

    // ---- operation templates ----

    /// "Cannot add/subtract a {left} with a {right}." and friends.
    pub fn binop_mismatch(op: BinOp, left: &Value, right: &Value) -> Self {
        let msg = match op {
            BinOp::Add | BinOp::Sub | BinOp::Mul => format!(
                "Cannot {} {} with {}.",
                op.verb(),
                left.describe(),
                right.describe()
            ),
            BinOp::Div => format!(
                "Cannot divide {} by {}.",
                left.describe(),
                right.describe()
            ),
            BinOp::Pow => format!(
                "Cannot raise {} to the power of {}.",
                left.describe(),
                right.describe()
            ),
        };
        EvalError::OperationShape(msg)
    }

    pub fn pow_non_square() -> Self {
        EvalError::OperationShape("Cannot raise a non-square matrix to powers.".to_string())
    }

    pub fn pow_bad_base(base: &Value) -> Self {
        EvalError::OperationShape(format!("Cannot raise {} to powers.", base.describe()))
    }

    pub fn pow_non_integer() -> Self {
        EvalError::OperationShape("Cannot raise a matrix to non-integer powers.".to_string())
    }

    pub fn pow_exponent_too_large(limit: i64) -> Self {
        EvalError::OperationShape(format!(
            "Cannot raise a matrix to powers of magnitude greater than {}.",
            limit
        ))
    }

    pub fn negative_powers_disabled() -> Self {
        EvalError::OperationShape(
            "Negative matrix powers have been disabled for this problem.".to_string(),
        )
    }

    pub fn function_needs_elementwise(name: &str, arg: &Value) -> Self {
        EvalError::OperationShape(format!(
            "Cannot apply {} to {}; array arguments require an explicit elementwise variant.",
            name,
            arg.describe()
        ))
    }

    // ---- literal templates ----

    pub fn ragged_rows() -> Self {
        EvalError::ParseShape(
            "Unable to parse this array: rows with an unequal number of entries.".to_string(),
        )
    }

    pub fn mixed_depth() -> Self {
        EvalError::ParseShape(
            "Unable to parse this array: entries mix numbers and rows at the same depth."
                .to_string(),
        )
    }

    pub fn empty_literal() -> Self {
        EvalError::ParseShape("Unable to parse this array: an empty row was entered.".to_string())
    }

    pub fn rank_exceeded(rank: usize, max_array_dim: usize) -> Self {
        let attempted = kind_for_rank(rank);
        let allowed = match max_array_dim {
            0 => "only scalars are".to_string(),
            1 => "only vectors are".to_string(),
            2 => "only vectors and matrices are".to_string(),
            n => format!("only arrays of rank at most {} are", n),
        };
        EvalError::ParseShape(format!(
            "Cannot enter a {} here: {} allowed in this entry.",
            attempted, allowed
        ))
    }
}

fn kind_for_rank(rank: usize) -> &'static str {
    match rank {
        1 => "vector",
        2 => "matrix",
        _ => "tensor",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addsub_template_names_both_descriptors() {
        let err = EvalError::binop_mismatch(
            BinOp::Add,
            &Value::vector([1.0, 2.0, 3.0]),
            &Value::vector([1.0, 2.0]),
        );
        assert_eq!(
            err.to_string(),
            "Cannot add/subtract a vector of length 3 with a vector of length 2."
        );
    }

    #[test]
    fn mul_template_names_both_lengths() {
        let err = EvalError::binop_mismatch(
            BinOp::Mul,
            &Value::vector([1.0, 2.0, 3.0]),
            &Value::vector([1.0, 2.0, 3.0, 4.0]),
        );
        assert_eq!(
            err.to_string(),
            "Cannot multiply a vector of length 3 with a vector of length 4."
        );
    }

    #[test]
    fn div_template_uses_by() {
        let err = EvalError::binop_mismatch(
            BinOp::Div,
            &Value::scalar(1.0),
            &Value::matrix([[1.0, 2.0], [3.0, 4.0]]),
        );
        assert_eq!(
            err.to_string(),
            "Cannot divide a scalar by a matrix of shape (rows: 2, cols: 2)."
        );
    }

    #[test]
    fn rank_limit_message_names_what_is_allowed() {
        let err = EvalError::rank_exceeded(2, 1);
        assert_eq!(
            err.to_string(),
            "Cannot enter a matrix here: only vectors are allowed in this entry."
        );
        let err = EvalError::rank_exceeded(3, 2);
        assert_eq!(
            err.to_string(),
            "Cannot enter a tensor here: only vectors and matrices are allowed in this entry."
        );
    }

    #[test]
    fn only_operation_shape_is_convertible() {
        assert!(EvalError::pow_non_square().is_operation_shape());
        assert!(!EvalError::ragged_rows().is_operation_shape());
        assert!(!EvalError::SingularMatrix.is_operation_shape());
        assert!(!EvalError::DivisionByZero.is_operation_shape());
    }
}
