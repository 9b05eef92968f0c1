//! Operators accepted from the expression parser.
//!
//! The grading engine supports a deliberately small, closed operator set:
//! the five arithmetic operators of the entry language. Operator legality
//! over array operands is decided downstream by the semantics engine, not
//! here.

use serde::{Deserialize, Serialize};

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Pow, // ^
}

impl BinOp {
    /// Glyph used when rendering an expression back to entry syntax.
    pub fn glyph(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
        }
    }

    /// Verb used in student-facing error messages ("Cannot {verb} ...").
    pub fn verb(&self) -> &'static str {
        match self {
            BinOp::Add | BinOp::Sub => "add/subtract",
            BinOp::Mul => "multiply",
            BinOp::Div => "divide",
            BinOp::Pow => "raise",
        }
    }
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
