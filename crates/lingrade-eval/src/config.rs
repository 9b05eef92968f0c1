//! Grading configuration.
//!
//! Every knob has a serde default so a problem author can specify only
//! the fields they care about in JSON and inherit the rest.

use serde::{Deserialize, Serialize};

// ============================================================
// Tolerance
// ============================================================

/// Numeric tolerance for entry comparison. Relative tolerance is
/// measured against the author's value; an author entry of exactly
/// zero therefore demands an exact match under `Relative`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tolerance {
    Absolute(f64),
    Relative(f64),
}

impl Tolerance {
    /// True when the student entry is within tolerance of the author entry.
    pub fn accepts(&self, student: f64, author: f64) -> bool {
        let diff = (student - author).abs();
        match *self {
            Tolerance::Absolute(tol) => diff <= tol,
            Tolerance::Relative(tol) => diff <= tol * author.abs(),
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::Relative(1e-4)
    }
}

// ============================================================
// Partial credit
// ============================================================

/// Per-entry partial credit for array answers. `Proportional` awards
/// the fraction of entries that matched in every trial; `Fixed` awards
/// a flat grade whenever some but not all entries matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialCredit {
    Proportional,
    Fixed(f64),
}

// ============================================================
// Comparison-shape mismatch policy
// ============================================================

/// How much of the author's shape a mismatch message may reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MsgDetail {
    /// No message at all.
    None,
    /// Name the kind only ("a vector").
    Type,
    /// Full descriptor ("a vector of length 3").
    Shape,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeMismatchPolicy {
    /// Surface the mismatch as an error; otherwise grade it incorrect.
    pub is_raised: bool,
    pub msg_detail: MsgDetail,
}

impl Default for ShapeMismatchPolicy {
    fn default() -> Self {
        ShapeMismatchPolicy {
            is_raised: true,
            msg_detail: MsgDetail::Type,
        }
    }
}

// ============================================================
// ArrayConfig
// ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayConfig {
    /// Highest array rank a student may enter: 0 scalars only,
    /// 1 vectors, 2 matrices, 3+ tensors.
    pub max_array_dim: usize,
    /// Allow negative integer matrix powers (via matrix inversion).
    pub negative_powers: bool,
    /// Surface operation-shape errors; when false they grade incorrect
    /// with no detail.
    pub shape_errors: bool,
    /// Absolute override: all shape trouble grades incorrect with an
    /// empty message. Wins over `shape_errors` and `answer_shape_mismatch`.
    pub suppress_matrix_messages: bool,
    /// Apply scalar functions entrywise to array arguments.
    pub elementwise_fns: bool,
    pub answer_shape_mismatch: ShapeMismatchPolicy,
    pub tolerance: Tolerance,
    pub entry_partial_credit: Option<PartialCredit>,
    /// Attached to the outcome whenever partial credit lands strictly
    /// between 0 and 1.
    pub entry_partial_msg: String,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        ArrayConfig {
            max_array_dim: 1,
            negative_powers: true,
            shape_errors: true,
            suppress_matrix_messages: false,
            elementwise_fns: false,
            answer_shape_mismatch: ShapeMismatchPolicy::default(),
            tolerance: Tolerance::default(),
            entry_partial_credit: None,
            entry_partial_msg: "Some array entries are incorrect, partial credit awarded."
                .to_string(),
        }
    }
}
