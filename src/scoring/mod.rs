pub mod config;
pub mod engine;
pub mod score_fn;
pub mod threshold;
pub mod validation;
pub mod validator;

pub use config::*;
pub use engine::{Mutation, ScoringEngine, Undone};
pub use score_fn::{Fixed, ScoreFn};
pub use threshold::RangeOp;
pub use validation::validate_config;
pub use validator::{validate, Rejection, ScoreRange, ThresholdValidator, Verdict};
