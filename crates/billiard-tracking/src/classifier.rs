//! Frame-by-frame table stabilization classification
//!
//! Every frame the cue ball is resolved and both windows are updated. Once
//! both windows are warmed up the windowed statistics decide between
//! `Stable` and `Unstable`; in between the previous status holds. The
//! listener hears about every transition and nothing else.

use crate::cue_window::CueBallWindow;
use crate::listener::{NullStabilizationListener, StabilizationListener};
use crate::parameters::StabilizationParameters;
use crate::population::BallPopulationWindow;
use crate::resolver::{CueBallResolution, CueBallResolver};
use crate::traits::FrameStabilityAnalyzer;
use crate::types::{StabilizationChange, StabilizationMetrics, StabilizationStatus};
use billiard_core::{squared_length, BallObservation, Result};
use tracing::{debug, instrument, trace};

/// Debounced classifier of table stability
///
/// # Type Parameters
///
/// - `L`: The listener notified of status transitions
pub struct StabilizationClassifier<L: StabilizationListener = NullStabilizationListener> {
    params: StabilizationParameters,
    resolver: CueBallResolver,
    cue_ball: CueBallWindow,
    population: BallPopulationWindow,
    status: StabilizationStatus,
    metrics: StabilizationMetrics,
    listener: L,
}

impl StabilizationClassifier<NullStabilizationListener> {
    /// Create a classifier without a listener
    pub fn new(params: StabilizationParameters) -> Self {
        Self::with_listener(params, NullStabilizationListener)
    }

    /// Create a classifier after validating `params`
    pub fn try_new(params: StabilizationParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self::new(params))
    }
}

impl Default for StabilizationClassifier<NullStabilizationListener> {
    fn default() -> Self {
        Self::new(StabilizationParameters::default())
    }
}

impl<L: StabilizationListener> StabilizationClassifier<L> {
    /// Create a classifier notifying `listener` of every transition
    pub fn with_listener(params: StabilizationParameters, listener: L) -> Self {
        Self {
            resolver: CueBallResolver::new(
                params.cue_ball_type.clone(),
                params.maximum_cue_ball_tracking_squared_distance,
            ),
            cue_ball: CueBallWindow::new(params.cue_ball),
            population: BallPopulationWindow::new(params.population, params.cue_ball_type.clone()),
            status: StabilizationStatus::Unknown,
            metrics: StabilizationMetrics::default(),
            params,
            listener,
        }
    }

    /// Classify one frame of detections
    ///
    /// `delta_time` is the time in seconds since the previous frame, zero for
    /// the first one. Returns the status after this frame.
    #[instrument(level = "trace", skip(self, observations), fields(balls = observations.len()))]
    pub fn process_frame(
        &mut self,
        delta_time: f64,
        observations: &[BallObservation],
    ) -> StabilizationStatus {
        let cue_ball = match self.resolver.resolve(observations, self.cue_ball.last_position()) {
            CueBallResolution::Resolved(cue_ball) => cue_ball,
            CueBallResolution::Missing => {
                trace!(status = %self.status, "no cue ball in frame");
                return self.status;
            }
            CueBallResolution::Lost => {
                self.transition(StabilizationStatus::CueBallLost, delta_time);
                return self.status;
            }
        };

        self.cue_ball.add(cue_ball.position, delta_time);
        self.population.add(observations, delta_time);

        if !self.cue_ball.warmed_up() || !self.population.warmed_up() {
            trace!(
                cue_ball_time = self.cue_ball.total_time(),
                population_time = self.population.total_time(),
                "windows warming up"
            );
            return self.status;
        }

        let metrics = self.evaluate();
        let next = if self.is_candidate_stable(&metrics) {
            if metrics.all_balls_counted() {
                StabilizationStatus::Stable
            } else {
                self.status
            }
        } else {
            StabilizationStatus::Unstable
        };

        trace!(
            average_cue_ball_movement = metrics.average_cue_ball_squared_movement.sqrt(),
            unstable = ?metrics.unstable_ball_ids,
            lost = metrics.total_lost_ball_count,
            stable = metrics.stable_ball_count,
            current = metrics.current_ball_count,
            stable_change = metrics.stable_ball_count_change,
            next = %next,
            "frame evaluated"
        );

        self.metrics = metrics;
        self.transition(next, delta_time);
        self.status
    }

    fn evaluate(&self) -> StabilizationMetrics {
        let threshold = self.params.maximum_stable_average_squared_distance;
        let unstable_ball_ids = self
            .population
            .newest_balls()
            .iter()
            .filter(|ball| squared_length(&ball.average_movement) > threshold)
            .map(|ball| ball.id.clone())
            .collect();

        StabilizationMetrics {
            average_cue_ball_squared_movement: squared_length(&self.cue_ball.average_movement()),
            unstable_ball_ids,
            total_lost_ball_count: self.population.total_lost_count(),
            stable_ball_count: self.population.stable_ball_count(),
            current_ball_count: self.population.current_ball_count(),
            stable_ball_count_change: self.population.stable_ball_count_change(),
            average_ball_count: self.population.average_ball_count(),
            total_average_ball_count_change: self.population.total_average_ball_count_change(),
        }
    }

    /// A newly stable-counted ball means something just settled or appeared
    fn is_candidate_stable(&self, metrics: &StabilizationMetrics) -> bool {
        metrics.average_cue_ball_squared_movement < self.params.maximum_stable_average_squared_distance
            && metrics.unstable_ball_ids.len() <= self.params.maximum_stable_unstable_balls
            && metrics.total_lost_ball_count <= self.params.maximum_stable_lost_ball_count
            && metrics.stable_ball_count_change < 1
    }

    fn transition(&mut self, next: StabilizationStatus, delta_time: f64) {
        if next == self.status {
            return;
        }
        let change = StabilizationChange {
            previous: self.status,
            current: next,
        };
        debug!(
            previous = %change.previous,
            current = %change.current,
            delta_time,
            "stabilization changed"
        );
        self.status = next;
        self.listener.on_stabilization_change(&change);
    }

    /// Drop all history and return to `Unknown` without notifying
    pub fn clear(&mut self) {
        self.cue_ball.clear();
        self.population.clear();
        self.status = StabilizationStatus::Unknown;
        self.metrics = StabilizationMetrics::default();
        debug!("stabilization history cleared");
    }

    pub fn status(&self) -> StabilizationStatus {
        self.status
    }

    pub fn metrics(&self) -> &StabilizationMetrics {
        &self.metrics
    }

    pub fn parameters(&self) -> &StabilizationParameters {
        &self.params
    }

    pub fn cue_ball_window(&self) -> &CueBallWindow {
        &self.cue_ball
    }

    pub fn population_window(&self) -> &BallPopulationWindow {
        &self.population
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }
}

impl<L: StabilizationListener> FrameStabilityAnalyzer for StabilizationClassifier<L> {
    fn process_frame(
        &mut self,
        delta_time: f64,
        observations: &[BallObservation],
    ) -> StabilizationStatus {
        StabilizationClassifier::process_frame(self, delta_time, observations)
    }

    fn current_status(&self) -> StabilizationStatus {
        self.status
    }

    fn current_metrics(&self) -> StabilizationMetrics {
        self.metrics.clone()
    }

    fn reset(&mut self) {
        self.clear();
    }
}
