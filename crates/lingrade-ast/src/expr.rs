//! Expression trees handed over by the entry parser.
//!
//! The parser/tokenizer itself lives outside this workspace; what arrives
//! here is its already-parsed output. Array literals keep their nested
//! row structure (`Array` of `Array`) so the entry guard can validate
//! shape before any arithmetic happens.

use crate::op::BinOp;
use serde::{Deserialize, Serialize};

/// A parsed student or author expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Numeric literal
    Num(f64),
    /// Variable to be bound per trial
    Var(Box<str>),
    /// Array literal; entries may themselves be `Array` (matrix rows)
    Array(Vec<Expr>),
    /// Binary operation
    BinOp(BinOp, Box<Expr>, Box<Expr>),
    /// Unary numeric negation
    Neg(Box<Expr>),
    /// Named unary function call, e.g. `sin(x)`
    Call(Box<str>, Box<Expr>),
}

impl Expr {
    pub fn num(n: f64) -> Self {
        Expr::Num(n)
    }

    pub fn var(name: impl Into<Box<str>>) -> Self {
        Expr::Var(name.into())
    }

    pub fn array(entries: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Array(entries.into_iter().collect())
    }

    /// Rank-1 literal from plain numbers.
    pub fn vector(entries: impl IntoIterator<Item = f64>) -> Self {
        Expr::Array(entries.into_iter().map(Expr::Num).collect())
    }

    /// Rank-2 literal from rows of plain numbers.
    pub fn matrix<R>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = f64>,
    {
        Expr::Array(rows.into_iter().map(Expr::vector).collect())
    }

    pub fn binop(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinOp(op, Box::new(left), Box::new(right))
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Expr::binop(BinOp::Add, left, right)
    }

    pub fn sub(left: Expr, right: Expr) -> Self {
        Expr::binop(BinOp::Sub, left, right)
    }

    pub fn mul(left: Expr, right: Expr) -> Self {
        Expr::binop(BinOp::Mul, left, right)
    }

    pub fn div(left: Expr, right: Expr) -> Self {
        Expr::binop(BinOp::Div, left, right)
    }

    pub fn pow(left: Expr, right: Expr) -> Self {
        Expr::binop(BinOp::Pow, left, right)
    }

    pub fn neg(inner: Expr) -> Self {
        Expr::Neg(Box::new(inner))
    }

    pub fn call(name: impl Into<Box<str>>, arg: Expr) -> Self {
        Expr::Call(name.into(), Box::new(arg))
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{}", n),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Array(entries) => {
                write!(f, "[")?;
                for (i, e) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", e)?;
                }
                write!(f, "]")
            }
            Expr::BinOp(op, left, right) => write!(f, "({} {} {})", left, op, right),
            Expr::Neg(inner) => write!(f, "-{}", inner),
            Expr::Call(name, arg) => write!(f, "{}({})", name, arg),
        }
    }
}
