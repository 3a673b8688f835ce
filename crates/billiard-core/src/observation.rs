//! Per-frame ball detections

use crate::error::{Error, Result};
use crate::geometry::{Positioned, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Millimeters per meter, for detector output reported in meters
const MILLIMETERS_PER_METER: f64 = 1000.0;

/// One ball reported by the vision system for one frame
///
/// Observations are transient: the engine reads them during a single frame
/// and keeps only what it derives from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallObservation {
    /// Detector-assigned id, unique within a frame
    pub id: String,

    /// Ball type as reported by the detector (e.g. `"WHITE"`, `"RED"`)
    #[serde(rename = "type")]
    pub ball_type: String,

    /// Position in millimeters
    pub position: Vec2,
}

impl BallObservation {
    /// Create an observation from a position in millimeters
    pub fn new(id: impl Into<String>, ball_type: impl Into<String>, position: Vec2) -> Self {
        Self {
            id: id.into(),
            ball_type: ball_type.into(),
            position,
        }
    }

    /// Create an observation from detector coordinates in meters
    pub fn from_meters(
        id: impl Into<String>,
        ball_type: impl Into<String>,
        x: f64,
        y: f64,
    ) -> Self {
        Self::new(
            id,
            ball_type,
            Vec2::new(x * MILLIMETERS_PER_METER, y * MILLIMETERS_PER_METER),
        )
    }

    /// Same ball, moved to another position
    pub fn positioned_at(&self, position: Vec2) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    /// Check the reported ball type
    pub fn is_type(&self, ball_type: &str) -> bool {
        self.ball_type == ball_type
    }

    /// Reject observations with an empty id or a non-finite position
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidInput("ball id must not be empty".to_string()));
        }
        if !self.position.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "ball {} has a non-finite position",
                self.id
            )));
        }
        Ok(())
    }

    /// Parse one detector frame from a JSON array of observations
    ///
    /// Every observation is validated and ids must be unique within the frame.
    pub fn frame_from_json(json: &str) -> Result<Vec<Self>> {
        let frame: Vec<Self> = serde_json::from_str(json)?;
        {
            let mut ids = HashSet::with_capacity(frame.len());
            for observation in &frame {
                observation.validate()?;
                if !ids.insert(observation.id.as_str()) {
                    return Err(Error::InvalidInput(format!(
                        "duplicate ball id {} in frame",
                        observation.id
                    )));
                }
            }
        }
        Ok(frame)
    }
}

impl Positioned for BallObservation {
    #[inline]
    fn position(&self) -> Vec2 {
        self.position
    }
}
