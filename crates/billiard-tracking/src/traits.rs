//! Core traits for frame-based stability analysis

use crate::types::{StabilizationMetrics, StabilizationStatus};
use billiard_core::BallObservation;

/// Trait for analyzers that classify a stream of detection frames
pub trait FrameStabilityAnalyzer {
    /// Process one frame arriving `delta_time` seconds after the previous one
    fn process_frame(
        &mut self,
        delta_time: f64,
        observations: &[BallObservation],
    ) -> StabilizationStatus;

    /// Get current stability status
    fn current_status(&self) -> StabilizationStatus;

    /// Get the statistics behind the most recent decisive evaluation
    fn current_metrics(&self) -> StabilizationMetrics;

    /// Reset the analyzer state
    fn reset(&mut self);
}
