//! Grading of array-valued math answers.
//!
//! Takes a student expression and an author expression, evaluates both
//! over sampled trials with `lingrade-eval`, compares the results
//! entrywise within tolerance and applies the configured raise/grade
//! policy to any shape failures along the way.

pub mod compare;
pub mod error;
pub mod outcome;
pub mod trials;

pub use outcome::ComparisonOutcome;
pub use trials::{grade, TrialBindings};

pub mod prelude {
    pub use crate::compare::compare_trials;
    pub use crate::error::{GradeError, GradeResult};
    pub use crate::outcome::ComparisonOutcome;
    pub use crate::trials::{grade, TrialBindings};
    pub use lingrade_eval::prelude::*;
}
