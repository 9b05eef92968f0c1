//! Grading-time errors.
//!
//! A raised error reaches the student verbatim; whether a given
//! failure raises or merely grades incorrect is decided by the policy
//! in [`crate::compare`].

use lingrade_eval::error::EvalError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradeError {
    /// The student's answer has the wrong shape for this problem.
    #[error("{0}")]
    ComparisonShape(String),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type GradeResult<T> = Result<T, GradeError>;
