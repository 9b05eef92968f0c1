//! # lingrade AST
//!
//! Expression trees for the lingrade array grading engine.
//!
//! This crate is the boundary with the (external) entry parser: the
//! parser produces an [`expr::Expr`], the evaluator in `lingrade-eval`
//! reduces it. Array literals keep their nested row structure so that
//! shape validation can happen before any arithmetic.

pub mod expr;
pub mod op;
pub mod ser;

pub mod prelude {
    pub use crate::expr::Expr;
    pub use crate::op::BinOp;
}
