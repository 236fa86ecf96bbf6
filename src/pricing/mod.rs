//! Rate evaluation.
//!
//! Pure functions for nightly-rate math - no database access. Inputs come
//! from the repository layer, output goes to the calendar service.

pub mod engine;

pub use engine::{Evaluation, EvaluationContext, WEEKEND_RULE_NAME, evaluate, round_rate};
