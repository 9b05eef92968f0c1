//! The scalar function table.

use std::collections::HashMap;

pub type ScalarFn = fn(f64) -> f64;

/// Named scalar functions available to expressions. Starts populated
/// with the standard math set; problem authors may register more.
#[derive(Debug, Clone)]
pub struct FunctionTable {
    fns: HashMap<String, ScalarFn>,
}

impl FunctionTable {
    pub fn empty() -> Self {
        FunctionTable {
            fns: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, f: ScalarFn) {
        self.fns.insert(name.into(), f);
    }

    pub fn get(&self, name: &str) -> Option<ScalarFn> {
        self.fns.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fns.contains_key(name)
    }
}

impl Default for FunctionTable {
    fn default() -> Self {
        let mut table = FunctionTable::empty();
        table.register("sin", f64::sin);
        table.register("cos", f64::cos);
        table.register("tan", f64::tan);
        table.register("sec", |x| 1.0 / x.cos());
        table.register("csc", |x| 1.0 / x.sin());
        table.register("cot", |x| 1.0 / x.tan());
        table.register("arcsin", f64::asin);
        table.register("arccos", f64::acos);
        table.register("arctan", f64::atan);
        table.register("sinh", f64::sinh);
        table.register("cosh", f64::cosh);
        table.register("tanh", f64::tanh);
        table.register("exp", f64::exp);
        table.register("ln", f64::ln);
        table.register("log10", f64::log10);
        table.register("sqrt", f64::sqrt);
        table.register("abs", f64::abs);
        table
    }
}
