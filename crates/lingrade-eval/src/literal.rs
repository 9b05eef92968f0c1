//! Array-literal validation.
//!
//! A student-entered literal like `[[1, 2], [3, 4]]` arrives as nested
//! lists of numbers. Before any arithmetic touches it, the nesting is
//! checked for well-formedness: every row at a given depth must have
//! the same length, numbers and rows may not mix at one depth, and no
//! row may be empty. The resulting rank is then gated against the
//! entry's `max_array_dim`. Malformed literals surface as
//! [`EvalError::ParseShape`] regardless of any error-suppression
//! configuration.

use crate::error::{EvalError, EvalResult};
use crate::value::{ArrayValue, Value};

/// A raw nested literal, prior to shape validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested {
    Number(f64),
    List(Vec<Nested>),
}

impl Nested {
    pub fn number(x: f64) -> Self {
        Nested::Number(x)
    }

    pub fn list(items: impl Into<Vec<Nested>>) -> Self {
        Nested::List(items.into())
    }
}

/// Re-nest an evaluated value so it can appear inside an enclosing
/// literal. A literal like `[v, w]` whose entries are themselves
/// vector-valued stacks into a matrix, subject to the same guard.
pub fn value_to_nested(value: &Value) -> Nested {
    match value {
        Value::Scalar(x) => Nested::Number(x.into_inner()),
        Value::Array(arr) => array_to_nested(arr.shape(), arr.data()),
    }
}

fn array_to_nested(shape: &[usize], data: &[f64]) -> Nested {
    match shape {
        [] | [_] => Nested::List(data.iter().copied().map(Nested::Number).collect()),
        [n, rest @ ..] => {
            let stride = data.len() / n;
            Nested::List(
                data.chunks(stride)
                    .map(|chunk| array_to_nested(rest, chunk))
                    .collect(),
            )
        }
    }
}

/// Validate a nested literal and produce a dense array.
///
/// The shape is read off the nesting depth: a list of numbers is a
/// vector, a list of equal-length lists is a matrix, and so on. The
/// top level must be a list; a bare number is a scalar and never
/// reaches this guard.
pub fn evaluate_literal(nested: &Nested, max_array_dim: usize) -> EvalResult<ArrayValue> {
    let items = match nested {
        Nested::List(items) => items,
        Nested::Number(_) => {
            return Err(EvalError::internal("scalar literal routed to array guard"))
        }
    };

    let mut shape = Vec::new();
    measure(items, &mut shape)?;
    if shape.len() > max_array_dim {
        return Err(EvalError::rank_exceeded(shape.len(), max_array_dim));
    }

    let mut data = Vec::with_capacity(shape.iter().product());
    flatten(items, &mut data);
    Ok(ArrayValue::from_parts(shape, data))
}

/// Walk one level of nesting, recording its length and checking that
/// every sibling agrees on what lies below.
fn measure(items: &[Nested], shape: &mut Vec<usize>) -> EvalResult<()> {
    if items.is_empty() {
        return Err(EvalError::empty_literal());
    }
    shape.push(items.len());

    let any_list = items.iter().any(|item| matches!(item, Nested::List(_)));
    let any_number = items.iter().any(|item| matches!(item, Nested::Number(_)));
    if any_list && any_number {
        return Err(EvalError::mixed_depth());
    }
    if !any_list {
        return Ok(());
    }

    let mut sub_shape: Option<Vec<usize>> = None;
    for item in items {
        let Nested::List(inner) = item else {
            return Err(EvalError::mixed_depth());
        };
        let mut this_shape = Vec::new();
        measure(inner, &mut this_shape)?;
        match &sub_shape {
            None => sub_shape = Some(this_shape),
            Some(expected) if *expected == this_shape => {}
            Some(_) => return Err(EvalError::ragged_rows()),
        }
    }
    if let Some(sub) = sub_shape {
        shape.extend(sub);
    }
    Ok(())
}

fn flatten(items: &[Nested], out: &mut Vec<f64>) {
    for item in items {
        match item {
            Nested::Number(x) => out.push(*x),
            Nested::List(inner) => flatten(inner, out),
        }
    }
}
