//! Parameters for stabilization detection
//!
//! Distances are squared millimeters, durations are seconds of accumulated
//! frame time.

use billiard_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Time span of the cue ball history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CueBallWindowParameters {
    /// Minimum recorded history before statistics are trusted
    pub min_time: f64,

    /// Maximum recorded history
    pub max_time: f64,
}

impl Default for CueBallWindowParameters {
    fn default() -> Self {
        Self {
            min_time: 1.0,
            max_time: 2.0,
        }
    }
}

impl CueBallWindowParameters {
    pub fn validate(&self) -> Result<()> {
        validate_time_span("cue_ball.min_time", self.min_time, "cue_ball.max_time", self.max_time)
    }
}

/// Identity tracking and history span of the non-cue balls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationWindowParameters {
    /// Largest squared distance a ball may travel between two frames and
    /// still be recognized as the same ball
    pub max_tracking_squared_distance: f64,

    /// Minimum recorded history before statistics are trusted
    pub min_time: f64,

    /// Maximum recorded history
    pub max_time: f64,

    /// A vanished ball counts as lost only if it was tracked longer than this
    pub min_tracked_duration_before_lost: f64,

    /// A ball counts as stable only if it was tracked longer than this
    pub min_tracked_duration_before_counted: f64,
}

impl Default for PopulationWindowParameters {
    fn default() -> Self {
        Self {
            max_tracking_squared_distance: 10.0 * 10.0,
            min_time: 1.0,
            max_time: 2.0,
            min_tracked_duration_before_lost: 0.5,
            min_tracked_duration_before_counted: 0.5,
        }
    }
}

impl PopulationWindowParameters {
    pub fn validate(&self) -> Result<()> {
        validate_non_negative(
            "population.max_tracking_squared_distance",
            self.max_tracking_squared_distance,
        )?;
        validate_non_negative(
            "population.min_tracked_duration_before_lost",
            self.min_tracked_duration_before_lost,
        )?;
        validate_non_negative(
            "population.min_tracked_duration_before_counted",
            self.min_tracked_duration_before_counted,
        )?;
        validate_time_span("population.min_time", self.min_time, "population.max_time", self.max_time)
    }
}

/// Parameters for the stabilization classifier and its windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizationParameters {
    /// Detector type that marks the cue ball
    pub cue_ball_type: String,

    /// Largest squared distance from the last known cue ball position at
    /// which one of several cue ball candidates is still accepted
    pub maximum_cue_ball_tracking_squared_distance: f64,

    /// Largest squared average per-frame movement of a stable ball
    pub maximum_stable_average_squared_distance: f64,

    /// Number of moving balls tolerated on a stable table
    pub maximum_stable_unstable_balls: usize,

    /// Number of lost balls tolerated within the window on a stable table
    pub maximum_stable_lost_ball_count: usize,

    pub cue_ball: CueBallWindowParameters,

    pub population: PopulationWindowParameters,
}

impl Default for StabilizationParameters {
    fn default() -> Self {
        Self {
            cue_ball_type: "WHITE".to_string(),
            maximum_cue_ball_tracking_squared_distance: 10.0 * 10.0,
            maximum_stable_average_squared_distance: 1.5 * 1.5,
            maximum_stable_unstable_balls: 0,
            maximum_stable_lost_ball_count: 0,
            cue_ball: CueBallWindowParameters::default(),
            population: PopulationWindowParameters::default(),
        }
    }
}

impl StabilizationParameters {
    /// Create parameters for strict stability requirements
    ///
    /// Longer windows and a tighter movement bound; slower to report
    /// `Stable`, less likely to report it during a slow roll.
    pub fn strict() -> Self {
        Self {
            maximum_stable_average_squared_distance: 1.0,
            cue_ball: CueBallWindowParameters {
                min_time: 1.5,
                max_time: 3.0,
            },
            population: PopulationWindowParameters {
                min_time: 1.5,
                max_time: 3.0,
                min_tracked_duration_before_lost: 0.5,
                min_tracked_duration_before_counted: 1.0,
                ..PopulationWindowParameters::default()
            },
            ..Self::default()
        }
    }

    /// Create parameters for relaxed stability requirements
    ///
    /// Shorter windows and a looser movement bound, for noisy detectors.
    pub fn relaxed() -> Self {
        Self {
            maximum_stable_average_squared_distance: 2.5 * 2.5,
            maximum_stable_lost_ball_count: 1,
            cue_ball: CueBallWindowParameters {
                min_time: 0.5,
                max_time: 1.5,
            },
            population: PopulationWindowParameters {
                max_tracking_squared_distance: 15.0 * 15.0,
                min_time: 0.5,
                max_time: 1.5,
                min_tracked_duration_before_lost: 0.3,
                min_tracked_duration_before_counted: 0.3,
            },
            ..Self::default()
        }
    }

    /// Parse parameters from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Serialize parameters to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every threshold and time span
    pub fn validate(&self) -> Result<()> {
        if self.cue_ball_type.is_empty() {
            return Err(Error::InvalidParameter(
                "cue_ball_type must not be empty".to_string(),
            ));
        }
        validate_non_negative(
            "maximum_cue_ball_tracking_squared_distance",
            self.maximum_cue_ball_tracking_squared_distance,
        )?;
        validate_non_negative(
            "maximum_stable_average_squared_distance",
            self.maximum_stable_average_squared_distance,
        )?;
        self.cue_ball.validate()?;
        self.population.validate()
    }
}

fn validate_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::non_finite(name));
    }
    if value < 0.0 {
        return Err(Error::negative(name, value));
    }
    Ok(())
}

fn validate_time_span(min_name: &str, min_time: f64, max_name: &str, max_time: f64) -> Result<()> {
    validate_non_negative(min_name, min_time)?;
    validate_non_negative(max_name, max_time)?;
    if min_time > max_time {
        return Err(Error::inverted_range(min_name, max_name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(StabilizationParameters::default().validate().is_ok());
        assert!(StabilizationParameters::strict().validate().is_ok());
        assert!(StabilizationParameters::relaxed().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_time_span() {
        let mut params = StabilizationParameters::default();
        params.cue_ball.min_time = 3.0;
        let err = params.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid parameter: cue_ball.min_time must not exceed cue_ball.max_time"
        );
    }

    #[test]
    fn test_rejects_negative_and_non_finite() {
        let mut params = StabilizationParameters::default();
        params.population.min_tracked_duration_before_lost = -0.1;
        assert!(matches!(params.validate(), Err(Error::InvalidParameter(_))));

        let mut params = StabilizationParameters::default();
        params.maximum_stable_average_squared_distance = f64::NAN;
        assert!(params.validate().is_err());

        let mut params = StabilizationParameters::default();
        params.cue_ball_type.clear();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let params = StabilizationParameters::from_json(
            r#"{ "cue_ball_type": "CUE", "maximum_stable_lost_ball_count": 2 }"#,
        )
        .unwrap();
        assert_eq!(params.cue_ball_type, "CUE");
        assert_eq!(params.maximum_stable_lost_ball_count, 2);
        assert_eq!(params.population, PopulationWindowParameters::default());
    }

    #[test]
    fn test_from_json_validates() {
        let result = StabilizationParameters::from_json(
            r#"{ "population": { "max_tracking_squared_distance": 100.0, "min_time": 5.0,
                 "max_time": 2.0, "min_tracked_duration_before_lost": 0.5,
                 "min_tracked_duration_before_counted": 0.5 } }"#,
        );
        assert!(matches!(result, Err(Error::InvalidParameter(_))));

        let result = StabilizationParameters::from_json("not json");
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_json_round_trip_of_preset() {
        let strict = StabilizationParameters::strict();
        let json = strict.to_json().unwrap();
        assert_eq!(StabilizationParameters::from_json(&json).unwrap(), strict);
    }
}
