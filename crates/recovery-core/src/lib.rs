//! # Recovery Simulator Core Library
//!
//! This library provides the computation behind the recovery response
//! simulator. Five bounded exposure inputs (struggle, duration, frequency,
//! days applied and learning multiplier) produce a daily response and its
//! compounded cumulative effect. Every operation is also available through
//! the standalone `recovery-cli` binary, which is a thin view layer over the
//! same functions.
//!
//! ## Architecture
//!
//! - **Model**: pure, stateless evaluation of [`ModelInputs`] into [`ModelOutputs`]
//! - **Format**: duration breakdowns and thousands separators for display
//! - **Config**: TOML-based defaults, limits and display settings
//!
//! ## Key Components
//!
//! - [`RecoveryModel`]: evaluator carrying the unit growth ratio policy
//! - [`Config`]: configuration management
//! - [`format_duration_breakdown`] / [`format_with_thousands_separator`]

pub mod config;
pub mod error;
pub mod format;
pub mod model;

pub use config::Config;
pub use error::{ConfigError, CoreError, ModelError};
pub use format::{
    format_duration_breakdown, format_with_separator, format_with_thousands_separator,
    DurationBreakdown,
};
pub use model::{
    compute_cumulative_effect, compute_daily_response, DayProjection, InputLimits, ModelInputs,
    ModelOutputs, RecoveryModel, UnitRatioPolicy,
};
