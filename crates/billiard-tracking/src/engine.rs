//! Entry point for a live detection stream
//!
//! [`StabilizationEngine`] owns a classifier, derives frame times from
//! detector timestamps and honors the tracking toggle. While tracking is off
//! frames are ignored and no history is kept.

use crate::classifier::StabilizationClassifier;
use crate::clock::FrameClock;
use crate::listener::{NullStabilizationListener, StabilizationListener};
use crate::parameters::StabilizationParameters;
use crate::types::{StabilizationMetrics, StabilizationStatus};
use billiard_core::{BallObservation, Result};
use std::time::Duration;
use tracing::{debug, info};

/// Tracking toggle, frame clock and classifier in one
///
/// Tracking starts disabled.
pub struct StabilizationEngine<L: StabilizationListener = NullStabilizationListener> {
    classifier: StabilizationClassifier<L>,
    clock: FrameClock,
    tracking: bool,
}

impl StabilizationEngine<NullStabilizationListener> {
    pub fn new(params: StabilizationParameters) -> Self {
        Self::with_listener(params, NullStabilizationListener)
    }

    /// Create an engine after validating `params`
    pub fn try_new(params: StabilizationParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self::new(params))
    }
}

impl<L: StabilizationListener> StabilizationEngine<L> {
    pub fn with_listener(params: StabilizationParameters, listener: L) -> Self {
        Self {
            classifier: StabilizationClassifier::with_listener(params, listener),
            clock: FrameClock::new(),
            tracking: false,
        }
    }

    /// Enable or disable tracking
    ///
    /// Disabling drops all history and returns to `Unknown` without a
    /// change notification.
    pub fn set_tracking(&mut self, enabled: bool) {
        if enabled == self.tracking {
            return;
        }
        self.tracking = enabled;
        if !enabled {
            self.classifier.clear();
            self.clock.reset();
        }
        info!(enabled, "stabilization tracking toggled");
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Process a frame arriving `delta_time` seconds after the previous one
    pub fn frame(&mut self, delta_time: f64, observations: &[BallObservation]) -> StabilizationStatus {
        if !self.tracking {
            debug!("tracking disabled, frame ignored");
            return self.classifier.status();
        }
        self.classifier.process_frame(delta_time, observations)
    }

    /// Process a frame stamped `timestamp` since any fixed epoch
    pub fn frame_at(&mut self, timestamp: Duration, observations: &[BallObservation]) -> StabilizationStatus {
        if !self.tracking {
            debug!("tracking disabled, frame ignored");
            return self.classifier.status();
        }
        let delta_time = self.clock.tick(timestamp);
        self.classifier.process_frame(delta_time, observations)
    }

    pub fn status(&self) -> StabilizationStatus {
        self.classifier.status()
    }

    pub fn metrics(&self) -> &StabilizationMetrics {
        self.classifier.metrics()
    }

    pub fn classifier(&self) -> &StabilizationClassifier<L> {
        &self.classifier
    }

    pub fn listener(&self) -> &L {
        self.classifier.listener()
    }

    pub fn listener_mut(&mut self) -> &mut L {
        self.classifier.listener_mut()
    }

    pub fn into_listener(self) -> L {
        self.classifier.into_listener()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StabilizationChange;
    use billiard_core::Vec2;

    fn table() -> Vec<BallObservation> {
        vec![
            BallObservation::new("WHITE1", "WHITE", Vec2::new(0.0, 0.0)),
            BallObservation::new("RED1", "RED", Vec2::new(400.0, 300.0)),
        ]
    }

    fn run_at_10hz<L: StabilizationListener>(engine: &mut StabilizationEngine<L>, frames: u64) {
        for frame in 0..frames {
            engine.frame_at(Duration::from_millis(frame * 100), &table());
        }
    }

    #[test]
    fn test_frames_ignored_while_disabled() {
        let mut engine = StabilizationEngine::new(StabilizationParameters::default());
        assert!(!engine.is_tracking());
        run_at_10hz(&mut engine, 30);
        assert_eq!(engine.status(), StabilizationStatus::Unknown);
        assert!(engine.classifier().cue_ball_window().is_empty());
    }

    #[test]
    fn test_timestamps_drive_warm_up() {
        let mut engine = StabilizationEngine::new(StabilizationParameters::default());
        engine.set_tracking(true);
        run_at_10hz(&mut engine, 30);
        assert_eq!(engine.status(), StabilizationStatus::Stable);
        assert!(engine.classifier().cue_ball_window().total_time() <= 2.0);
    }

    #[test]
    fn test_disable_clears_without_notification() {
        let mut engine = StabilizationEngine::with_listener(
            StabilizationParameters::default(),
            Vec::<StabilizationChange>::new(),
        );
        engine.set_tracking(true);
        run_at_10hz(&mut engine, 30);
        assert_eq!(engine.listener().len(), 1);

        engine.set_tracking(false);
        assert_eq!(engine.status(), StabilizationStatus::Unknown);
        assert!(engine.classifier().population_window().is_empty());
        assert_eq!(engine.listener().len(), 1);

        // History restarts from scratch, first frame has zero delta
        engine.set_tracking(true);
        engine.frame_at(Duration::from_secs(100), &table());
        assert_eq!(engine.classifier().cue_ball_window().total_time(), 0.0);
        assert_eq!(engine.status(), StabilizationStatus::Unknown);
    }
}
