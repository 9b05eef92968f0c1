//! Comparison of evaluated answers across trials, and the policy that
//! decides whether a shape failure is raised or silently graded
//! incorrect.
//!
//! Policy precedence: `suppress_matrix_messages` wins over everything
//! and converts any shape trouble into a silent incorrect grade. Below
//! it, `shape_errors` governs operation-shape failures and
//! `answer_shape_mismatch` governs comparison-time mismatches. Parse
//! failures and numeric errors (singular matrix, division by zero,
//! unknown names) are never converted.

use lingrade_eval::config::{ArrayConfig, MsgDetail, PartialCredit};
use lingrade_eval::error::EvalError;
use lingrade_eval::value::Value;

use crate::error::{GradeError, GradeResult};
use crate::outcome::ComparisonOutcome;

/// Route an evaluation failure from the student's expression through
/// the error policy.
pub fn resolve_eval_error(err: EvalError, config: &ArrayConfig) -> GradeResult<ComparisonOutcome> {
    if !err.is_operation_shape() {
        return Err(err.into());
    }
    if config.suppress_matrix_messages {
        return Ok(ComparisonOutcome::incorrect(""));
    }
    if config.shape_errors {
        return Err(err.into());
    }
    // conversion always drops the detail; only raising behavior is
    // configurable for operation-shape errors
    Ok(ComparisonOutcome::incorrect(""))
}

/// Route a comparison-time shape mismatch through the mismatch policy.
fn resolve_mismatch(student: &Value, author: &Value, config: &ArrayConfig) -> GradeResult<ComparisonOutcome> {
    if config.suppress_matrix_messages {
        return Ok(ComparisonOutcome::incorrect(""));
    }
    let msg = mismatch_message(student, author, config.answer_shape_mismatch.msg_detail);
    if config.answer_shape_mismatch.is_raised {
        Err(GradeError::ComparisonShape(msg))
    } else {
        Ok(ComparisonOutcome::incorrect(msg))
    }
}

/// The student side always gets its full descriptor; the author side
/// reveals only as much as `msg_detail` allows.
fn mismatch_message(student: &Value, author: &Value, detail: MsgDetail) -> String {
    match detail {
        MsgDetail::None => String::new(),
        MsgDetail::Type => format!(
            "Expected answer to be a {}, but input is {}",
            author.kind(),
            student.describe()
        ),
        MsgDetail::Shape => format!(
            "Expected answer to be {}, but input is {}",
            author.describe(),
            student.describe()
        ),
    }
}

/// Compare the student's per-trial values against the author's.
///
/// Shape agreement is decided at the first trial; the callers'
/// sampling guarantees later trials keep the same shapes, so a
/// divergence is an internal fault rather than a student error. An
/// entry is correct only if it matches within tolerance in every
/// trial.
pub fn compare_trials(
    student: &[Value],
    author: &[Value],
    config: &ArrayConfig,
) -> GradeResult<ComparisonOutcome> {
    if student.is_empty() || student.len() != author.len() {
        return Err(EvalError::internal("mismatched trial counts").into());
    }

    let shape = author[0].shape();
    if student[0].shape() != shape {
        return resolve_mismatch(&student[0], &author[0], config);
    }
    for (s, a) in student.iter().zip(author).skip(1) {
        if s.shape() != shape || a.shape() != shape {
            return Err(EvalError::internal("trial shapes diverged").into());
        }
    }

    let n_entries: usize = shape.iter().product::<usize>().max(1);
    let mut correct = vec![true; n_entries];
    for (s, a) in student.iter().zip(author) {
        for (i, (sv, av)) in s.entries().iter().zip(a.entries()).enumerate() {
            if !config.tolerance.accepts(*sv, av) {
                correct[i] = false;
            }
        }
    }

    let n_correct = correct.iter().filter(|&&c| c).count();
    tracing::debug!(n_correct, n_entries, "entry comparison finished");
    if n_correct == n_entries {
        return Ok(ComparisonOutcome::correct());
    }
    if n_correct == 0 {
        return Ok(ComparisonOutcome::incorrect(""));
    }
    let grade = match config.entry_partial_credit {
        None => return Ok(ComparisonOutcome::incorrect("")),
        Some(PartialCredit::Proportional) => n_correct as f64 / n_entries as f64,
        Some(PartialCredit::Fixed(v)) => v,
    };
    let msg = if grade > 0.0 && grade < 1.0 {
        config.entry_partial_msg.clone()
    } else {
        String::new()
    };
    if grade >= 1.0 {
        Ok(ComparisonOutcome::correct())
    } else {
        Ok(ComparisonOutcome::partial(grade, msg))
    }
}
