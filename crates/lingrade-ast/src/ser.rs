//! Serialization for parsed expressions.
//!
//! Hosts hand expressions to the grader as JSON; these helpers are the
//! only (de)serialization surface this workspace owns.

use crate::expr::Expr;
use thiserror::Error;

/// Serialization error
#[derive(Error, Debug)]
pub enum SerError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SerError>;

/// Serialize an expression to pretty-printed JSON.
pub fn to_json(expr: &Expr) -> Result<String> {
    Ok(serde_json::to_string_pretty(expr)?)
}

/// Serialize an expression to compact JSON (no whitespace).
pub fn to_json_compact(expr: &Expr) -> Result<String> {
    Ok(serde_json::to_string(expr)?)
}

/// Deserialize an expression from JSON.
pub fn from_json(json: &str) -> Result<Expr> {
    Ok(serde_json::from_str(json)?)
}

/// Write an expression to a JSON file.
pub fn save_json(expr: &Expr, path: impl AsRef<std::path::Path>) -> Result<()> {
    std::fs::write(path, to_json(expr)?)?;
    Ok(())
}

/// Read an expression from a JSON file.
pub fn load_json(path: impl AsRef<std::path::Path>) -> Result<Expr> {
    from_json(&std::fs::read_to_string(path)?)
}
