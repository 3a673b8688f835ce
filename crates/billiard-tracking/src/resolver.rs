//! Selection of the cue ball among the detections of a frame

use crate::matcher::find_nearest_ball;
use billiard_core::{BallObservation, Vec2};
use tracing::debug;

/// Outcome of resolving the cue ball of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CueBallResolution<'a> {
    /// The detection taken as the cue ball
    Resolved(&'a BallObservation),
    /// No cue ball candidate in the frame
    Missing,
    /// Several candidates, none close enough to the last known position
    Lost,
}

impl<'a> CueBallResolution<'a> {
    pub fn cue_ball(&self) -> Option<&'a BallObservation> {
        match self {
            Self::Resolved(ball) => Some(*ball),
            Self::Missing | Self::Lost => None,
        }
    }
}

/// Picks the cue ball by type, falling back to proximity when the detector
/// reports several candidates
#[derive(Debug, Clone, PartialEq)]
pub struct CueBallResolver {
    cue_ball_type: String,
    max_tracking_squared_distance: f64,
}

impl CueBallResolver {
    pub fn new(cue_ball_type: impl Into<String>, max_tracking_squared_distance: f64) -> Self {
        Self {
            cue_ball_type: cue_ball_type.into(),
            max_tracking_squared_distance,
        }
    }

    pub fn cue_ball_type(&self) -> &str {
        &self.cue_ball_type
    }

    /// Resolve the cue ball of `observations`
    ///
    /// `last_position` is the most recent position of the cue ball history;
    /// without it several candidates cannot be told apart.
    pub fn resolve<'a>(
        &self,
        observations: &'a [BallObservation],
        last_position: Option<Vec2>,
    ) -> CueBallResolution<'a> {
        let candidates: Vec<&BallObservation> = observations
            .iter()
            .filter(|ball| ball.is_type(&self.cue_ball_type))
            .collect();

        match candidates.as_slice() {
            [] => CueBallResolution::Missing,
            [single] => CueBallResolution::Resolved(*single),
            _ => {
                let Some(last_position) = last_position else {
                    debug!(candidates = candidates.len(), "several cue balls and no history");
                    return CueBallResolution::Lost;
                };

                match find_nearest_ball(candidates.iter().copied(), &last_position) {
                    Some(nearest) if nearest.within(self.max_tracking_squared_distance) => {
                        debug!(
                            candidates = candidates.len(),
                            id = %nearest.ball.id,
                            distance = nearest.squared_distance.sqrt(),
                            "cue ball disambiguated"
                        );
                        CueBallResolution::Resolved(nearest.ball)
                    }
                    nearest => {
                        debug!(
                            candidates = candidates.len(),
                            distance = ?nearest.map(|n| n.squared_distance.sqrt()),
                            "no cue ball candidate near last position"
                        );
                        CueBallResolution::Lost
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> CueBallResolver {
        CueBallResolver::new("WHITE", 10.0 * 10.0)
    }

    fn frame() -> Vec<BallObservation> {
        vec![
            BallObservation::new("RED1", "RED", Vec2::new(400.0, 300.0)),
            BallObservation::new("WHITE1", "WHITE", Vec2::new(0.0, 0.0)),
            BallObservation::new("WHITE2", "WHITE", Vec2::new(200.0, 0.0)),
        ]
    }

    #[test]
    fn test_single_candidate_needs_no_history() {
        let observations = frame();
        let result = resolver().resolve(&observations[..2], None);
        assert_eq!(result.cue_ball().map(|b| b.id.as_str()), Some("WHITE1"));
    }

    #[test]
    fn test_missing_cue_ball() {
        let observations = frame();
        assert_eq!(resolver().resolve(&observations[..1], None), CueBallResolution::Missing);
    }

    #[test]
    fn test_picks_candidate_near_history() {
        let observations = frame();
        let result = resolver().resolve(&observations, Some(Vec2::new(197.0, 4.0)));
        assert_eq!(result.cue_ball().map(|b| b.id.as_str()), Some("WHITE2"));
    }

    #[test]
    fn test_lost_when_all_candidates_far() {
        let observations = frame();
        let result = resolver().resolve(&observations, Some(Vec2::new(100.0, 0.0)));
        assert_eq!(result, CueBallResolution::Lost);
    }

    #[test]
    fn test_lost_without_history() {
        let observations = frame();
        assert_eq!(resolver().resolve(&observations, None), CueBallResolution::Lost);
    }
}
