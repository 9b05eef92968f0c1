//! Shape-checked array arithmetic for grading math expressions.
//!
//! Values are scalars or dense row-major arrays (vectors, matrices,
//! tensors of any rank). All operators enforce strict shape rules with
//! no broadcasting, and every failure carries a student-readable
//! message built from shape descriptors.

pub mod config;
pub mod error;
pub mod eval;
pub mod linalg;
pub mod literal;
pub mod ops;
pub mod table;
pub mod value;

pub mod prelude {
    pub use crate::config::{ArrayConfig, MsgDetail, PartialCredit, ShapeMismatchPolicy, Tolerance};
    pub use crate::error::{EvalError, EvalResult};
    pub use crate::eval::{eval, Evaluator};
    pub use crate::table::FunctionTable;
    pub use crate::value::{ArrayValue, Value};
    pub use lingrade_ast::prelude::*;
}
