//! The result handed back to the learning platform.

use serde::{Deserialize, Serialize};

/// A graded submission. `ok` is true only for full credit; partial
/// credit reports `ok: false` with a fractional grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub ok: bool,
    pub grade: f64,
    pub msg: String,
}

impl ComparisonOutcome {
    pub fn correct() -> Self {
        ComparisonOutcome {
            ok: true,
            grade: 1.0,
            msg: String::new(),
        }
    }

    pub fn incorrect(msg: impl Into<String>) -> Self {
        ComparisonOutcome {
            ok: false,
            grade: 0.0,
            msg: msg.into(),
        }
    }

    pub fn partial(grade: f64, msg: impl Into<String>) -> Self {
        ComparisonOutcome {
            ok: false,
            grade,
            msg: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_flat() {
        let out = ComparisonOutcome::partial(0.75, "close");
        let json = serde_json::to_string(&out).expect("serialize");
        assert_eq!(json, r#"{"ok":false,"grade":0.75,"msg":"close"}"#);
    }
}
