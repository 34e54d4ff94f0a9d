//! Model inputs and their bounds.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ModelError;

/// Upper bound shared by struggle, duration and frequency.
pub const SCORE_MAX: u32 = 10;
/// Longest simulated horizon, in days.
pub const DAYS_APPLIED_MAX: u32 = 365;
/// Hard cap on the learning multiplier (percent per day).
pub const LEARNING_MULTIPLIER_CAP: u32 = 10;

/// The five slider positions fed into one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInputs {
    /// Exposure-exercise difficulty (1-10)
    pub struggle: u32,
    /// Exposure-exercise length (1-10)
    pub duration: u32,
    /// Exposure repetitions (1-10)
    pub frequency: u32,
    /// Simulation horizon in days (1-365)
    pub days_applied: u32,
    /// Daily percentage improvement (1-10, or lower when capped)
    pub learning_multiplier: u32,
}

impl Default for ModelInputs {
    fn default() -> Self {
        Self {
            struggle: 5,
            duration: 5,
            frequency: 5,
            days_applied: 180,
            learning_multiplier: 3,
        }
    }
}

/// Inclusive bounds for every input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLimits {
    pub score_max: u32,
    pub days_applied_max: u32,
    pub learning_multiplier_max: u32,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            score_max: SCORE_MAX,
            days_applied_max: DAYS_APPLIED_MAX,
            learning_multiplier_max: LEARNING_MULTIPLIER_CAP,
        }
    }
}

impl InputLimits {
    /// Limits with a lower learning multiplier cap (the "gentle" variant uses 5).
    ///
    /// The cap is forced into `1..=LEARNING_MULTIPLIER_CAP`.
    pub fn with_learning_multiplier_max(max: u32) -> Self {
        Self {
            learning_multiplier_max: max.clamp(1, LEARNING_MULTIPLIER_CAP),
            ..Self::default()
        }
    }

    fn bounds(&self) -> [(&'static str, u32); 5] {
        [
            ("struggle", self.score_max),
            ("duration", self.score_max),
            ("frequency", self.score_max),
            ("days_applied", self.days_applied_max),
            ("learning_multiplier", self.learning_multiplier_max),
        ]
    }
}

impl ModelInputs {
    pub fn new(
        struggle: u32,
        duration: u32,
        frequency: u32,
        days_applied: u32,
        learning_multiplier: u32,
    ) -> Self {
        Self {
            struggle,
            duration,
            frequency,
            days_applied,
            learning_multiplier,
        }
    }

    fn values(&self) -> [u32; 5] {
        [
            self.struggle,
            self.duration,
            self.frequency,
            self.days_applied,
            self.learning_multiplier,
        ]
    }

    /// Check every field against `limits`, reporting the first violation.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::OutOfRange`] naming the offending field.
    pub fn validate(&self, limits: &InputLimits) -> Result<(), ModelError> {
        for ((field, max), value) in limits.bounds().into_iter().zip(self.values()) {
            if !(1..=max).contains(&value) {
                return Err(ModelError::OutOfRange {
                    field,
                    value,
                    min: 1,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Clamp every field into `limits`.
    pub fn clamp(&self, limits: &InputLimits) -> Self {
        let mut clamped = [0u32; 5];
        for (i, ((field, max), value)) in limits
            .bounds()
            .into_iter()
            .zip(self.values())
            .enumerate()
        {
            let bounded = value.clamp(1, max);
            if bounded != value {
                warn!(field, value, bounded, "input clamped into range");
            }
            clamped[i] = bounded;
        }
        let [struggle, duration, frequency, days_applied, learning_multiplier] = clamped;
        Self::new(struggle, duration, frequency, days_applied, learning_multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs_match_initial_sliders() {
        let inputs = ModelInputs::default();
        assert_eq!(inputs, ModelInputs::new(5, 5, 5, 180, 3));
        assert!(inputs.validate(&InputLimits::default()).is_ok());
    }

    #[test]
    fn test_validate_reports_first_violation() {
        let inputs = ModelInputs::new(5, 0, 11, 180, 3);
        let err = inputs.validate(&InputLimits::default()).unwrap_err();
        assert_eq!(
            err,
            ModelError::OutOfRange {
                field: "duration",
                value: 0,
                min: 1,
                max: 10,
            }
        );
    }

    #[test]
    fn test_validate_honours_learning_cap() {
        let gentle = InputLimits::with_learning_multiplier_max(5);
        let inputs = ModelInputs::new(5, 5, 5, 180, 7);
        assert!(inputs.validate(&InputLimits::default()).is_ok());
        assert!(matches!(
            inputs.validate(&gentle),
            Err(ModelError::OutOfRange { field: "learning_multiplier", max: 5, .. })
        ));
    }

    #[test]
    fn test_clamp_forces_every_field_into_range() {
        let raw = ModelInputs::new(0, 42, 10, 1000, 0);
        let clamped = raw.clamp(&InputLimits::default());
        assert_eq!(clamped, ModelInputs::new(1, 10, 10, 365, 1));
        assert!(clamped.validate(&InputLimits::default()).is_ok());
    }

    #[test]
    fn test_clamp_leaves_valid_inputs_alone() {
        let inputs = ModelInputs::new(3, 4, 2, 30, 5);
        assert_eq!(inputs.clamp(&InputLimits::default()), inputs);
    }

    #[test]
    fn test_learning_cap_is_bounded() {
        assert_eq!(InputLimits::with_learning_multiplier_max(0).learning_multiplier_max, 1);
        assert_eq!(InputLimits::with_learning_multiplier_max(50).learning_multiplier_max, 10);
    }
}
