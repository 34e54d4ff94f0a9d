//! Recovery response model.
//!
//! Pure functions from five bounded exposure inputs to a daily response and
//! its compounded cumulative effect.

mod engine;
mod inputs;

pub use engine::{
    compute_cumulative_effect, compute_daily_response, growth_ratio, DayProjection,
    ModelOutputs, RecoveryModel, UnitRatioPolicy,
};
pub use inputs::{
    InputLimits, ModelInputs, DAYS_APPLIED_MAX, LEARNING_MULTIPLIER_CAP, SCORE_MAX,
};
