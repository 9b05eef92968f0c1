//! The trial loop: evaluate both expressions over sampled variable
//! bindings and hand the per-trial values to the comparator.

use std::collections::HashMap;

use lingrade_ast::expr::Expr;
use lingrade_eval::config::ArrayConfig;
use lingrade_eval::eval::Evaluator;
use lingrade_eval::table::FunctionTable;
use lingrade_eval::value::Value;

use crate::compare;
use crate::error::GradeResult;
use crate::outcome::ComparisonOutcome;

/// Variable bindings for one trial.
pub type TrialBindings = HashMap<String, Value>;

/// Grade a student expression against the author's over a set of
/// trials.
///
/// Both expressions are evaluated under the same bindings each trial.
/// An author-side failure always propagates, since it means the
/// problem itself is broken. A student-side failure goes through the
/// error policy and short-circuits the loop, either raising or ending
/// grading with an incorrect outcome.
pub fn grade(
    student: &Expr,
    author: &Expr,
    trials: &[TrialBindings],
    functions: &FunctionTable,
    config: &ArrayConfig,
) -> GradeResult<ComparisonOutcome> {
    let mut student_values = Vec::with_capacity(trials.len());
    let mut author_values = Vec::with_capacity(trials.len());

    for (trial, bindings) in trials.iter().enumerate() {
        let mut ev = Evaluator::new(config.clone());
        *ev.functions_mut() = functions.clone();
        for (name, value) in bindings {
            ev.bind(name.clone(), value.clone());
        }

        let author_value = ev.eval(author)?;
        let student_value = match ev.eval(student) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(trial, %err, "student evaluation failed");
                return compare::resolve_eval_error(err, config);
            }
        };
        author_values.push(author_value);
        student_values.push(student_value);
    }

    let outcome = compare::compare_trials(&student_values, &author_values, config)?;
    tracing::debug!(grade = outcome.grade, ok = outcome.ok, "graded submission");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingrade_eval::error::EvalError;

    fn config(max_array_dim: usize) -> ArrayConfig {
        ArrayConfig {
            max_array_dim,
            ..ArrayConfig::default()
        }
    }

    fn trial(pairs: &[(&str, Value)]) -> TrialBindings {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn grades_equivalent_expressions_correct() {
        // 2*v against v + v
        let student = Expr::mul(Expr::num(2.0), Expr::var("v"));
        let author = Expr::add(Expr::var("v"), Expr::var("v"));
        let trials = vec![
            trial(&[("v", Value::vector([1.0, 2.0]))]),
            trial(&[("v", Value::vector([-3.0, 0.5]))]),
        ];
        let out = grade(
            &student,
            &author,
            &trials,
            &FunctionTable::default(),
            &config(1),
        )
        .unwrap();
        assert!(out.ok);
        assert_eq!(out.grade, 1.0);
    }

    #[test]
    fn coincidental_match_in_one_trial_is_not_enough() {
        // v equals 2*v only at the zero sample
        let student = Expr::var("v");
        let author = Expr::mul(Expr::num(2.0), Expr::var("v"));
        let trials = vec![
            trial(&[("v", Value::vector([0.0, 0.0]))]),
            trial(&[("v", Value::vector([1.0, 1.0]))]),
        ];
        let out = grade(
            &student,
            &author,
            &trials,
            &FunctionTable::default(),
            &config(1),
        )
        .unwrap();
        assert!(!out.ok);
    }

    #[test]
    fn student_shape_error_short_circuits() {
        let student = Expr::add(Expr::var("v"), Expr::num(1.0));
        let author = Expr::var("v");
        let trials = vec![trial(&[("v", Value::vector([1.0, 2.0]))])];
        let err = grade(
            &student,
            &author,
            &trials,
            &FunctionTable::default(),
            &config(1),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            crate::error::GradeError::Eval(EvalError::OperationShape(_))
        ));
    }

    #[test]
    fn undefined_variable_always_raises() {
        let student = Expr::var("w");
        let author = Expr::var("v");
        let trials = vec![trial(&[("v", Value::scalar(1.0))])];
        let mut cfg = config(1);
        cfg.suppress_matrix_messages = true;
        let err = grade(&student, &author, &trials, &FunctionTable::default(), &cfg).unwrap_err();
        assert!(matches!(
            err,
            crate::error::GradeError::Eval(EvalError::UndefinedVariable(_))
        ));
    }
}
