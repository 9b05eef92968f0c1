//! Tree-walking expression evaluator.

use std::collections::HashMap;

use lingrade_ast::expr::Expr;

use crate::config::ArrayConfig;
use crate::error::{EvalError, EvalResult};
use crate::literal::{self, Nested};
use crate::ops;
use crate::table::FunctionTable;
use crate::value::Value;

/// Evaluates expressions against a set of variable bindings, a scalar
/// function table and a grading configuration.
#[derive(Debug, Clone)]
pub struct Evaluator {
    bindings: HashMap<String, Value>,
    functions: FunctionTable,
    config: ArrayConfig,
}

impl Evaluator {
    /// A fresh evaluator with the standard function table and the
    /// constants `pi` and `e` bound.
    pub fn new(config: ArrayConfig) -> Self {
        let mut ev = Evaluator {
            bindings: HashMap::new(),
            functions: FunctionTable::default(),
            config,
        };
        ev.bind("pi", Value::scalar(std::f64::consts::PI));
        ev.bind("e", Value::scalar(std::f64::consts::E));
        ev
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn functions_mut(&mut self) -> &mut FunctionTable {
        &mut self.functions
    }

    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Num(x) => Ok(Value::scalar(*x)),
            Expr::Var(name) => self
                .bindings
                .get(name.as_ref())
                .cloned()
                .ok_or_else(|| EvalError::UndefinedVariable(name.to_string())),
            Expr::Array(items) => {
                let nested = items
                    .iter()
                    .map(|item| Ok(literal::value_to_nested(&self.eval(item)?)))
                    .collect::<EvalResult<Vec<Nested>>>()?;
                let arr =
                    literal::evaluate_literal(&Nested::List(nested), self.config.max_array_dim)?;
                Ok(Value::Array(arr))
            }
            Expr::BinOp(op, left, right) => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                ops::apply_binary(*op, &left, &right, &self.config)
            }
            Expr::Neg(inner) => Ok(ops::negate(&self.eval(inner)?)),
            Expr::Call(name, arg) => {
                let arg = self.eval(arg)?;
                ops::apply_function(name, &arg, &self.functions, &self.config)
            }
        }
    }
}

/// One-shot evaluation with no variable bindings beyond the constants.
pub fn eval(expr: &Expr, config: &ArrayConfig) -> EvalResult<Value> {
    Evaluator::new(config.clone()).eval(expr)
}
