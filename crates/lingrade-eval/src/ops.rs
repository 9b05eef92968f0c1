//! Operator semantics over [`Value`].
//!
//! No broadcasting anywhere: a vector, a 1-row matrix and a 1-column
//! matrix are three distinct shapes and never interoperate. The one
//! concession is the additive identity, where a scalar operand equal
//! to exactly zero may be added to or subtracted from any array.

use crate::config::ArrayConfig;
use crate::error::{EvalError, EvalResult};
use crate::linalg;
use crate::table::FunctionTable;
use crate::value::{ArrayValue, Value};
use lingrade_ast::op::BinOp;

/// Apply a binary operator, enforcing the full shape casework.
pub fn apply_binary(
    op: BinOp,
    left: &Value,
    right: &Value,
    config: &ArrayConfig,
) -> EvalResult<Value> {
    match op {
        BinOp::Add => add_sub(op, left, right, |a, b| a + b),
        BinOp::Sub => add_sub(op, left, right, |a, b| a - b),
        BinOp::Mul => multiply(left, right),
        BinOp::Div => divide(left, right),
        BinOp::Pow => power(left, right, config),
    }
}

pub fn negate(value: &Value) -> Value {
    match value {
        Value::Scalar(x) => Value::scalar(-x.into_inner()),
        Value::Array(arr) => Value::Array(arr.map(|x| -x)),
    }
}

/// Apply a named function. `trans` and `tr` are array-aware built-ins;
/// everything else comes from the scalar table, and array arguments
/// are only mapped entrywise when the configuration opts in.
pub fn apply_function(
    name: &str,
    arg: &Value,
    functions: &FunctionTable,
    config: &ArrayConfig,
) -> EvalResult<Value> {
    match name {
        "trans" => return transpose(arg),
        "tr" => return trace(arg),
        _ => {}
    }
    let f = functions
        .get(name)
        .ok_or_else(|| EvalError::UnknownFunction(name.to_string()))?;
    match arg {
        Value::Scalar(x) => Ok(Value::scalar(f(x.into_inner()))),
        Value::Array(arr) => {
            if config.elementwise_fns {
                Ok(Value::Array(arr.map(f)))
            } else {
                Err(EvalError::function_needs_elementwise(name, arg))
            }
        }
    }
}

/// Transposition leaves scalars and vectors unchanged, matching the
/// usual convention for 1-d data.
fn transpose(arg: &Value) -> EvalResult<Value> {
    match arg {
        Value::Scalar(_) => Ok(arg.clone()),
        Value::Array(arr) if arr.is_vector() => Ok(arg.clone()),
        Value::Array(arr) if arr.is_matrix() => Ok(Value::Array(arr.transpose())),
        Value::Array(_) => Err(EvalError::OperationShape(format!(
            "Cannot take the transpose of {}.",
            arg.describe()
        ))),
    }
}

fn trace(arg: &Value) -> EvalResult<Value> {
    match arg {
        Value::Array(arr) if arr.is_square() => Ok(Value::scalar(arr.trace())),
        _ => Err(EvalError::OperationShape(format!(
            "Cannot take the trace of {}; a square matrix is required.",
            arg.describe()
        ))),
    }
}

// ============================================================
// Addition and subtraction
// ============================================================

fn add_sub(op: BinOp, left: &Value, right: &Value, f: fn(f64, f64) -> f64) -> EvalResult<Value> {
    match (left, right) {
        (Value::Scalar(a), Value::Scalar(b)) => {
            Ok(Value::scalar(f(a.into_inner(), b.into_inner())))
        }
        (Value::Array(a), Value::Array(b)) => match a.zip_with(b, f) {
            Some(out) => Ok(Value::Array(out)),
            None => Err(EvalError::binop_mismatch(op, left, right)),
        },
        // the additive identity is shape-agnostic
        (Value::Scalar(s), Value::Array(arr)) if s.into_inner() == 0.0 => {
            Ok(Value::Array(arr.map(|x| f(0.0, x))))
        }
        (Value::Array(arr), Value::Scalar(s)) if s.into_inner() == 0.0 => {
            Ok(Value::Array(arr.map(|x| f(x, 0.0))))
        }
        _ => Err(EvalError::binop_mismatch(op, left, right)),
    }
}

// ============================================================
// Multiplication
// ============================================================

fn multiply(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Scalar(a), Value::Scalar(b)) => {
            Ok(Value::scalar(a.into_inner() * b.into_inner()))
        }
        (Value::Scalar(s), Value::Array(arr)) | (Value::Array(arr), Value::Scalar(s)) => {
            let s = s.into_inner();
            Ok(Value::Array(arr.map(|x| s * x)))
        }
        (Value::Array(a), Value::Array(b)) => {
            if a.is_vector() && b.is_vector() {
                if a.len() == b.len() {
                    return Ok(Value::scalar(linalg::dot(a, b)));
                }
            } else if a.is_matrix() && b.is_vector() {
                if a.cols() == b.len() {
                    return Ok(Value::Array(linalg::matvec(a, b)));
                }
            } else if a.is_vector() && b.is_matrix() {
                if a.len() == b.rows() {
                    return Ok(Value::Array(linalg::vecmat(a, b)));
                }
            } else if a.is_matrix() && b.is_matrix() && a.cols() == b.rows() {
                return Ok(Value::Array(linalg::matmul(a, b)));
            }
            Err(EvalError::binop_mismatch(BinOp::Mul, left, right))
        }
    }
}

// ============================================================
// Division
// ============================================================

fn divide(left: &Value, right: &Value) -> EvalResult<Value> {
    let denom = match right {
        Value::Scalar(d) => d.into_inner(),
        Value::Array(_) => return Err(EvalError::binop_mismatch(BinOp::Div, left, right)),
    };
    if denom == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    match left {
        Value::Scalar(a) => Ok(Value::scalar(a.into_inner() / denom)),
        Value::Array(arr) => Ok(Value::Array(arr.map(|x| x / denom))),
    }
}

// ============================================================
// Exponentiation
// ============================================================

fn power(left: &Value, right: &Value, config: &ArrayConfig) -> EvalResult<Value> {
    let exponent = match right {
        Value::Scalar(k) => k.into_inner(),
        Value::Array(_) => return Err(EvalError::binop_mismatch(BinOp::Pow, left, right)),
    };
    match left {
        Value::Scalar(base) => {
            let base = base.into_inner();
            if base == 0.0 && exponent < 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(Value::scalar(base.powf(exponent)))
        }
        Value::Array(arr) if arr.is_matrix() => {
            if !arr.is_square() {
                return Err(EvalError::pow_non_square());
            }
            if exponent.fract() != 0.0 {
                return Err(EvalError::pow_non_integer());
            }
            if exponent.abs() > MAX_MATRIX_POWER as f64 {
                return Err(EvalError::pow_exponent_too_large(MAX_MATRIX_POWER));
            }
            let k = exponent as i64;
            if k < 0 && !config.negative_powers {
                return Err(EvalError::negative_powers_disabled());
            }
            matrix_power(arr, k)
        }
        Value::Array(_) => Err(EvalError::pow_bad_base(left)),
    }
}

/// Largest matrix power magnitude accepted from an entry. Binary
/// exponentiation keeps anything below this bound cheap.
const MAX_MATRIX_POWER: i64 = i32::MAX as i64;

/// Integer matrix power of a square matrix by repeated squaring.
/// Negative powers invert first, then exponentiate.
fn matrix_power(arr: &ArrayValue, k: i64) -> EvalResult<Value> {
    let mut base = if k < 0 {
        linalg::inverse(arr)?
    } else {
        arr.clone()
    };
    let mut out = linalg::identity(arr.rows());
    let mut n = k.unsigned_abs();
    while n > 0 {
        if n & 1 == 1 {
            out = linalg::matmul(&out, &base);
        }
        n >>= 1;
        if n > 0 {
            base = linalg::matmul(&base, &base);
        }
    }
    Ok(Value::Array(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ArrayConfig {
        ArrayConfig::default()
    }

    fn add(l: &Value, r: &Value) -> EvalResult<Value> {
        apply_binary(BinOp::Add, l, r, &cfg())
    }

    fn mul(l: &Value, r: &Value) -> EvalResult<Value> {
        apply_binary(BinOp::Mul, l, r, &cfg())
    }

    #[test]
    fn add_requires_identical_shapes() {
        let v3 = Value::vector([1.0, 2.0, 3.0]);
        let v2 = Value::vector([1.0, 2.0]);
        assert_eq!(add(&v3, &v3).unwrap().entries(), vec![2.0, 4.0, 6.0]);
        assert!(matches!(add(&v3, &v2), Err(EvalError::OperationShape(_))));
        // a vector and a 1-row matrix are distinct shapes
        let row = Value::matrix([[1.0, 2.0, 3.0]]);
        assert!(matches!(add(&v3, &row), Err(EvalError::OperationShape(_))));
    }

    #[test]
    fn zero_scalar_is_additive_identity() {
        let v = Value::vector([1.0, 2.0]);
        assert_eq!(add(&v, &Value::scalar(0.0)).unwrap(), v);
        let negated = apply_binary(BinOp::Sub, &Value::scalar(0.0), &v, &cfg()).unwrap();
        assert_eq!(negated.entries(), vec![-1.0, -2.0]);
        // a nonzero scalar still fails
        assert!(add(&v, &Value::scalar(1.0)).is_err());
    }

    #[test]
    fn multiplication_casework() {
        let v = Value::vector([1.0, 2.0]);
        let m = Value::matrix([[1.0, 2.0], [3.0, 4.0]]);
        // dot product
        assert_eq!(mul(&v, &v).unwrap(), Value::scalar(5.0));
        // scalar scaling in either order
        assert_eq!(
            mul(&Value::scalar(2.0), &v).unwrap().entries(),
            vec![2.0, 4.0]
        );
        // matrix-vector and vector-matrix differ
        assert_eq!(mul(&m, &v).unwrap().entries(), vec![5.0, 11.0]);
        assert_eq!(mul(&v, &m).unwrap().entries(), vec![7.0, 10.0]);
        // inner dimension mismatch
        let v3 = Value::vector([1.0, 2.0, 3.0]);
        assert!(matches!(mul(&m, &v3), Err(EvalError::OperationShape(_))));
    }

    #[test]
    fn division_only_by_nonzero_scalar() {
        let v = Value::vector([2.0, 4.0]);
        let half = apply_binary(BinOp::Div, &v, &Value::scalar(2.0), &cfg()).unwrap();
        assert_eq!(half.entries(), vec![1.0, 2.0]);
        assert_eq!(
            apply_binary(BinOp::Div, &v, &Value::scalar(0.0), &cfg()),
            Err(EvalError::DivisionByZero)
        );
        assert!(matches!(
            apply_binary(BinOp::Div, &Value::scalar(1.0), &v, &cfg()),
            Err(EvalError::OperationShape(_))
        ));
    }

    #[test]
    fn matrix_powers() {
        let m = Value::matrix([[1.0, 1.0], [0.0, 1.0]]);
        let squared = apply_binary(BinOp::Pow, &m, &Value::scalar(2.0), &cfg()).unwrap();
        assert_eq!(squared.entries(), vec![1.0, 2.0, 0.0, 1.0]);
        // zeroth power is the identity
        let id = apply_binary(BinOp::Pow, &m, &Value::scalar(0.0), &cfg()).unwrap();
        assert_eq!(id.entries(), vec![1.0, 0.0, 0.0, 1.0]);
        // negative power inverts
        let inv = apply_binary(BinOp::Pow, &m, &Value::scalar(-1.0), &cfg()).unwrap();
        assert_eq!(inv.entries(), vec![1.0, -1.0, 0.0, 1.0]);
    }

    #[test]
    fn large_matrix_powers_stay_cheap() {
        let d = Value::matrix([[2.0, 0.0], [0.0, 3.0]]);
        let out = apply_binary(BinOp::Pow, &d, &Value::scalar(10.0), &cfg()).unwrap();
        assert_eq!(out.entries(), vec![1024.0, 0.0, 0.0, 59049.0]);
        // an integral but absurd exponent is rejected, not looped over
        assert_eq!(
            apply_binary(BinOp::Pow, &d, &Value::scalar(1e18), &cfg()),
            Err(EvalError::pow_exponent_too_large(i32::MAX as i64))
        );
        assert_eq!(
            apply_binary(BinOp::Pow, &d, &Value::scalar(-1e18), &cfg()),
            Err(EvalError::pow_exponent_too_large(i32::MAX as i64))
        );
    }

    #[test]
    fn matrix_power_gates() {
        let rect = Value::matrix([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let m = Value::matrix([[1.0, 1.0], [0.0, 1.0]]);
        assert_eq!(
            apply_binary(BinOp::Pow, &rect, &Value::scalar(2.0), &cfg()),
            Err(EvalError::pow_non_square())
        );
        assert_eq!(
            apply_binary(BinOp::Pow, &m, &Value::scalar(0.5), &cfg()),
            Err(EvalError::pow_non_integer())
        );
        let mut no_neg = cfg();
        no_neg.negative_powers = false;
        assert_eq!(
            apply_binary(BinOp::Pow, &m, &Value::scalar(-1.0), &no_neg),
            Err(EvalError::negative_powers_disabled())
        );
        let singular = Value::matrix([[1.0, 2.0], [2.0, 4.0]]);
        assert_eq!(
            apply_binary(BinOp::Pow, &singular, &Value::scalar(-1.0), &cfg()),
            Err(EvalError::SingularMatrix)
        );
        assert_eq!(
            apply_binary(
                BinOp::Pow,
                &Value::vector([1.0, 2.0]),
                &Value::scalar(2.0),
                &cfg()
            ),
            Err(EvalError::pow_bad_base(&Value::vector([1.0, 2.0])))
        );
    }

    #[test]
    fn tensors_are_elementwise_only() {
        let t = Value::Array(crate::value::ArrayValue::from_parts(
            vec![2, 1, 1],
            vec![1.0, 2.0],
        ));
        assert_eq!(add(&t, &t).unwrap().entries(), vec![2.0, 4.0]);
        assert_eq!(
            mul(&Value::scalar(3.0), &t).unwrap().entries(),
            vec![3.0, 6.0]
        );
        assert!(matches!(mul(&t, &t), Err(EvalError::OperationShape(_))));
        assert!(matches!(
            apply_binary(BinOp::Pow, &t, &Value::scalar(2.0), &cfg()),
            Err(EvalError::OperationShape(_))
        ));
    }

    #[test]
    fn transpose_and_trace_builtins() {
        let table = FunctionTable::default();
        let m = Value::matrix([[1.0, 2.0], [3.0, 4.0]]);
        let t = apply_function("trans", &m, &table, &cfg()).unwrap();
        assert_eq!(t.entries(), vec![1.0, 3.0, 2.0, 4.0]);
        assert_eq!(
            apply_function("tr", &m, &table, &cfg()).unwrap(),
            Value::scalar(5.0)
        );
        // vectors pass through transposition untouched
        let v = Value::vector([1.0, 2.0]);
        assert_eq!(apply_function("trans", &v, &table, &cfg()).unwrap(), v);
        assert!(matches!(
            apply_function("tr", &v, &table, &cfg()),
            Err(EvalError::OperationShape(_))
        ));
    }

    #[test]
    fn functions_gate_on_elementwise() {
        let table = FunctionTable::default();
        let v = Value::vector([0.0, 1.0]);
        let err = apply_function("exp", &v, &table, &cfg());
        assert!(matches!(err, Err(EvalError::OperationShape(_))));
        let mut elementwise = cfg();
        elementwise.elementwise_fns = true;
        let out = apply_function("exp", &v, &table, &elementwise).unwrap();
        assert_eq!(out.entries(), vec![1.0, std::f64::consts::E]);
        assert_eq!(
            apply_function("nope", &v, &table, &cfg()),
            Err(EvalError::UnknownFunction("nope".to_string()))
        );
    }
}
