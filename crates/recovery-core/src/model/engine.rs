//! Recovery model: daily response and compounding cumulative effect.
//!
//! The daily response is the product of the three exposure scores. Each
//! following day the response grows by the learning multiplier, so the
//! cumulative effect over the horizon is a finite geometric series:
//!
//! ```text
//! r = 1 + learning_multiplier / 100
//! cumulative = daily_response * (r^days - 1) / (r - 1)
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::inputs::{ModelInputs, DAYS_APPLIED_MAX};
use crate::error::ModelError;
use crate::format::DurationBreakdown;

/// What to do when the growth ratio is exactly 1 (a 0% learning multiplier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitRatioPolicy {
    /// Fail with [`ModelError::DegenerateGrowthRatio`]
    #[default]
    Reject,
    /// Use the `r -> 1` limit, `daily_response * days_applied`
    Linear,
}

/// Everything derived from one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutputs {
    pub daily_response: u32,
    pub cumulative_effect: f64,
    pub duration_breakdown: DurationBreakdown,
}

impl ModelOutputs {
    /// Cumulative effect rounded to the nearest whole number, for display.
    pub fn rounded_cumulative_effect(&self) -> f64 {
        self.cumulative_effect.round()
    }
}

/// One day of a projected trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayProjection {
    /// 1-based day number
    pub day: u32,
    /// Response on this day alone
    pub response: f64,
    /// Sum of responses from day 1 through this day
    pub cumulative: f64,
}

/// Daily growth ratio for a learning multiplier given in percent.
pub fn growth_ratio(learning_multiplier: u32) -> f64 {
    1.0 + f64::from(learning_multiplier) / 100.0
}

/// Product of the three exposure scores.
///
/// # Errors
///
/// Returns [`ModelError::ResponseOverflow`] when the product exceeds `u32`,
/// which only unbounded scores can reach.
pub fn compute_daily_response(
    struggle: u32,
    duration: u32,
    frequency: u32,
) -> Result<u32, ModelError> {
    struggle
        .checked_mul(duration)
        .and_then(|p| p.checked_mul(frequency))
        .ok_or(ModelError::ResponseOverflow {
            struggle,
            duration,
            frequency,
        })
}

/// Geometric-series sum of `daily_response` compounded at
/// `learning_multiplier`% per day over `days_applied` days.
///
/// # Errors
///
/// Returns [`ModelError::DegenerateGrowthRatio`] when `learning_multiplier`
/// is 0, and [`ModelError::NonFiniteResult`] when the sum overflows.
pub fn compute_cumulative_effect(
    daily_response: u32,
    learning_multiplier: u32,
    days_applied: u32,
) -> Result<f64, ModelError> {
    let ratio = growth_ratio(learning_multiplier);
    let step = ratio - 1.0;
    if step == 0.0 {
        return Err(ModelError::DegenerateGrowthRatio { ratio });
    }

    let effect =
        f64::from(daily_response) * ((ratio.powf(f64::from(days_applied)) - 1.0) / step);
    if !effect.is_finite() {
        return Err(ModelError::NonFiniteResult {
            daily_response,
            learning_multiplier,
            days_applied,
        });
    }
    Ok(effect)
}

/// Stateless evaluator over [`ModelInputs`].
///
/// Holds only the unit-ratio policy, so one instance can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryModel {
    policy: UnitRatioPolicy,
}

impl RecoveryModel {
    /// Create a model that rejects a unit growth ratio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model with an explicit unit-ratio policy.
    pub fn with_policy(policy: UnitRatioPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnitRatioPolicy {
        self.policy
    }

    /// Cumulative effect with the configured unit-ratio policy applied.
    ///
    /// # Errors
    ///
    /// See [`compute_cumulative_effect`]; the degenerate ratio is only
    /// reported under [`UnitRatioPolicy::Reject`].
    pub fn cumulative_effect(
        &self,
        daily_response: u32,
        learning_multiplier: u32,
        days_applied: u32,
    ) -> Result<f64, ModelError> {
        match compute_cumulative_effect(daily_response, learning_multiplier, days_applied) {
            Err(ModelError::DegenerateGrowthRatio { ratio })
                if self.policy == UnitRatioPolicy::Linear =>
            {
                warn!(ratio, "unit growth ratio, using linear limit");
                Ok(f64::from(daily_response) * f64::from(days_applied))
            }
            other => other,
        }
    }

    /// Evaluate all outputs for `inputs`.
    ///
    /// Inputs are not validated here; callers bound them first with
    /// [`ModelInputs::validate`] or [`ModelInputs::clamp`].
    ///
    /// # Errors
    ///
    /// Propagates errors from [`RecoveryModel::cumulative_effect`].
    pub fn evaluate(&self, inputs: &ModelInputs) -> Result<ModelOutputs, ModelError> {
        let daily_response =
            compute_daily_response(inputs.struggle, inputs.duration, inputs.frequency)?;
        let cumulative_effect = self.cumulative_effect(
            daily_response,
            inputs.learning_multiplier,
            inputs.days_applied,
        )?;

        debug!(
            ?inputs,
            daily_response, cumulative_effect, "evaluated recovery model"
        );

        Ok(ModelOutputs {
            daily_response,
            cumulative_effect,
            duration_breakdown: DurationBreakdown::from_days(inputs.days_applied),
        })
    }

    /// Day-by-day projection of the response and its running total.
    ///
    /// The final point's `cumulative` matches [`RecoveryModel::evaluate`]
    /// up to floating-point rounding.
    ///
    /// # Errors
    ///
    /// Same conditions as [`RecoveryModel::evaluate`], plus
    /// [`ModelError::OutOfRange`] for a horizon beyond `DAYS_APPLIED_MAX`
    /// since one point is materialised per day.
    pub fn trajectory(&self, inputs: &ModelInputs) -> Result<Vec<DayProjection>, ModelError> {
        if inputs.days_applied > DAYS_APPLIED_MAX {
            return Err(ModelError::OutOfRange {
                field: "days_applied",
                value: inputs.days_applied,
                min: 1,
                max: DAYS_APPLIED_MAX,
            });
        }
        let daily_response =
            compute_daily_response(inputs.struggle, inputs.duration, inputs.frequency)?;
        // Run the closed form once so the policy and overflow checks match evaluate().
        self.cumulative_effect(
            daily_response,
            inputs.learning_multiplier,
            inputs.days_applied,
        )?;

        let ratio = growth_ratio(inputs.learning_multiplier);
        let mut points = Vec::with_capacity(inputs.days_applied as usize);
        let mut response = f64::from(daily_response);
        let mut cumulative = 0.0;
        for day in 1..=inputs.days_applied {
            cumulative += response;
            points.push(DayProjection {
                day,
                response,
                cumulative,
            });
            response *= ratio;
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_daily_response_is_product() {
        assert_eq!(compute_daily_response(5, 5, 5), Ok(125));
        assert_eq!(compute_daily_response(1, 1, 1), Ok(1));
        assert_eq!(compute_daily_response(10, 10, 10), Ok(1000));
        assert_eq!(compute_daily_response(2, 3, 7), Ok(42));
    }

    #[test]
    fn test_unbounded_scores_report_overflow() {
        let inputs = ModelInputs::new(2000, 2000, 2000, 10, 3);
        let expected = ModelError::ResponseOverflow {
            struggle: 2000,
            duration: 2000,
            frequency: 2000,
        };
        assert_eq!(RecoveryModel::new().evaluate(&inputs), Err(expected.clone()));
        assert_eq!(RecoveryModel::new().trajectory(&inputs), Err(expected));
        // Largest product that still fits.
        assert_eq!(compute_daily_response(65_536, 65_535, 1), Ok(4_294_901_760));
    }

    #[test]
    fn test_trajectory_rejects_unbounded_horizon() {
        let model = RecoveryModel::with_policy(UnitRatioPolicy::Linear);
        let err = model
            .trajectory(&ModelInputs::new(1, 1, 1, u32::MAX, 0))
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::OutOfRange { field: "days_applied", max: 365, .. }
        ));
        // evaluate() stays closed-form and accepts the same horizon.
        assert_eq!(
            model.evaluate(&ModelInputs::new(1, 1, 1, 1000, 0)).unwrap().cumulative_effect,
            1000.0
        );
    }

    #[test]
    fn test_cumulative_effect_regression_fixture() {
        let effect = compute_cumulative_effect(125, 3, 180).unwrap();
        assert!((effect - 847_930.664_802_505_8).abs() < 1e-3, "got {effect}");
        assert_eq!(effect.round(), 847_931.0);
    }

    #[test]
    fn test_single_day_is_daily_response() {
        let effect = compute_cumulative_effect(125, 3, 1).unwrap();
        assert!(approx_eq(effect, 125.0));
    }

    #[test]
    fn test_zero_learning_multiplier_is_rejected() {
        let err = compute_cumulative_effect(125, 0, 30).unwrap_err();
        assert_eq!(err, ModelError::DegenerateGrowthRatio { ratio: 1.0 });
    }

    #[test]
    fn test_linear_policy_uses_limit() {
        let model = RecoveryModel::with_policy(UnitRatioPolicy::Linear);
        assert_eq!(model.cumulative_effect(125, 0, 30).unwrap(), 3750.0);
        // Non-degenerate ratios are unaffected by the policy.
        assert_eq!(
            model.cumulative_effect(125, 3, 180).unwrap(),
            RecoveryModel::new().cumulative_effect(125, 3, 180).unwrap()
        );
    }

    #[test]
    fn test_reject_policy_propagates() {
        let inputs = ModelInputs::new(5, 5, 5, 30, 0);
        assert!(matches!(
            RecoveryModel::new().evaluate(&inputs),
            Err(ModelError::DegenerateGrowthRatio { .. })
        ));
    }

    #[test]
    fn test_upper_bounds_stay_finite() {
        let effect = compute_cumulative_effect(1000, 10, 365).unwrap();
        assert!(effect.is_finite());
        assert!(effect > 1.28e19 && effect < 1.29e19, "got {effect}");
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = compute_cumulative_effect(1000, 10, 100_000).unwrap_err();
        assert!(matches!(err, ModelError::NonFiniteResult { days_applied: 100_000, .. }));
    }

    #[test]
    fn test_evaluate_defaults() {
        let outputs = RecoveryModel::new().evaluate(&ModelInputs::default()).unwrap();
        assert_eq!(outputs.daily_response, 125);
        assert_eq!(outputs.rounded_cumulative_effect(), 847_931.0);
        assert_eq!(outputs.duration_breakdown, DurationBreakdown::from_days(180));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let model = RecoveryModel::new();
        let inputs = ModelInputs::new(7, 3, 9, 241, 6);
        let first = model.evaluate(&inputs).unwrap();
        let second = model.evaluate(&inputs).unwrap();
        assert_eq!(first.cumulative_effect.to_bits(), second.cumulative_effect.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn test_trajectory_ends_at_cumulative_effect() {
        let model = RecoveryModel::new();
        let inputs = ModelInputs::default();
        let points = model.trajectory(&inputs).unwrap();
        assert_eq!(points.len(), 180);
        assert_eq!(points[0].day, 1);
        assert_eq!(points[0].response, 125.0);
        assert_eq!(points[0].cumulative, 125.0);
        let last = points.last().unwrap();
        assert_eq!(last.day, 180);
        let expected = model.evaluate(&inputs).unwrap().cumulative_effect;
        assert!(approx_eq(last.cumulative, expected), "{} vs {}", last.cumulative, expected);
    }

    #[test]
    fn test_trajectory_grows_each_day() {
        let points = RecoveryModel::new()
            .trajectory(&ModelInputs::new(2, 2, 2, 10, 5))
            .unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].response > pair[0].response);
            assert!(pair[1].cumulative > pair[0].cumulative);
        }
    }

    #[test]
    fn test_trajectory_flat_under_linear_policy() {
        let points = RecoveryModel::with_policy(UnitRatioPolicy::Linear)
            .trajectory(&ModelInputs::new(2, 2, 2, 4, 0))
            .unwrap();
        let cumulative: Vec<f64> = points.iter().map(|p| p.cumulative).collect();
        assert_eq!(cumulative, vec![8.0, 16.0, 24.0, 32.0]);
    }

    #[test]
    fn test_model_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RecoveryModel>();
    }
}
