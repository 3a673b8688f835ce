//! Common types used in stabilization detection

use serde::{Deserialize, Serialize};
use std::fmt;

/// The stabilization status of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StabilizationStatus {
    /// Nothing decisive has been observed yet
    #[default]
    Unknown,

    /// No ball is moving; downstream computation may run
    Stable,

    /// Something on the table is moving
    Unstable,

    /// Several cue ball candidates and none close to the last known cue ball
    CueBallLost,
}

impl StabilizationStatus {
    /// Check if the table is at rest
    pub fn is_stable(&self) -> bool {
        matches!(self, StabilizationStatus::Stable)
    }
}

impl fmt::Display for StabilizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StabilizationStatus::Unknown => write!(f, "UNKNOWN"),
            StabilizationStatus::Stable => write!(f, "STABLE"),
            StabilizationStatus::Unstable => write!(f, "UNSTABLE"),
            StabilizationStatus::CueBallLost => write!(f, "CUE_BALL_LOST"),
        }
    }
}

/// A transition between two statuses, delivered to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilizationChange {
    pub previous: StabilizationStatus,
    pub current: StabilizationStatus,
}

impl fmt::Display for StabilizationChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.previous, self.current)
    }
}

/// Windowed statistics behind the most recent decisive evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StabilizationMetrics {
    /// Squared length of the cue ball's average per-frame movement (mm²)
    pub average_cue_ball_squared_movement: f64,

    /// Ids of tracked balls whose average movement exceeds the stable threshold
    pub unstable_ball_ids: Vec<String>,

    /// Reliably tracked balls that vanished within the window
    pub total_lost_ball_count: usize,

    /// Balls in the newest frame that have proven their persistence
    pub stable_ball_count: usize,

    /// All non-cue balls in the newest frame
    pub current_ball_count: usize,

    /// Stable-counted balls gained since the previous frame
    pub stable_ball_count_change: i64,

    /// Running average of the non-cue population over the window
    pub average_ball_count: f64,

    /// Windowed sum of per-frame average ball count changes
    pub total_average_ball_count_change: f64,
}

impl StabilizationMetrics {
    /// Check whether every visible ball has individually proven persistence
    pub fn all_balls_counted(&self) -> bool {
        self.current_ball_count == self.stable_ball_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_unknown() {
        assert_eq!(StabilizationStatus::default(), StabilizationStatus::Unknown);
        assert!(!StabilizationStatus::Unknown.is_stable());
        assert!(StabilizationStatus::Stable.is_stable());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(StabilizationStatus::CueBallLost.to_string(), "CUE_BALL_LOST");
        let change = StabilizationChange {
            previous: StabilizationStatus::Stable,
            current: StabilizationStatus::Unstable,
        };
        assert_eq!(change.to_string(), "STABLE -> UNSTABLE");
    }

    #[test]
    fn test_status_serializes_like_detector_enum() {
        let json = serde_json::to_string(&StabilizationStatus::CueBallLost).unwrap();
        assert_eq!(json, "\"CUE_BALL_LOST\"");
    }
}
