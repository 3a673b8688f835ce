//! Time-bounded history of the cue ball

use crate::parameters::CueBallWindowParameters;
use crate::window::{TimeWindow, WindowAccumulator};
use billiard_core::Vec2;

/// Cue ball position at one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueBallSample {
    pub position: Vec2,
    /// Movement since the previous sample, zero for the first one
    pub movement: Vec2,
}

/// Summed movement of all samples in the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementTotals {
    pub movement: Vec2,
}

impl Default for MovementTotals {
    fn default() -> Self {
        Self {
            movement: Vec2::zeros(),
        }
    }
}

impl WindowAccumulator<CueBallSample> for MovementTotals {
    fn include(&mut self, sample: &CueBallSample) {
        self.movement += sample.movement;
    }

    fn exclude(&mut self, sample: &CueBallSample) {
        self.movement -= sample.movement;
    }
}

/// Sliding history of cue ball positions and per-frame movement
#[derive(Debug, Clone)]
pub struct CueBallWindow {
    window: TimeWindow<CueBallSample, MovementTotals>,
}

impl CueBallWindow {
    pub fn new(params: CueBallWindowParameters) -> Self {
        Self {
            window: TimeWindow::new(params.min_time, params.max_time),
        }
    }

    /// Record the cue ball position of a new frame
    pub fn add(&mut self, position: Vec2, delta_time: f64) {
        let movement = match self.last_position() {
            Some(previous) => position - previous,
            None => Vec2::zeros(),
        };
        self.window.push(CueBallSample { position, movement }, delta_time);
    }

    /// Most recently recorded position
    pub fn last_position(&self) -> Option<Vec2> {
        self.window.newest().map(|entry| entry.state.position)
    }

    /// Average per-frame movement over the window, zero when empty
    pub fn average_movement(&self) -> Vec2 {
        if self.window.is_empty() {
            return Vec2::zeros();
        }
        self.window.totals().movement / self.window.len() as f64
    }

    pub fn warmed_up(&self) -> bool {
        self.window.warmed_up()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn total_time(&self) -> f64 {
        self.window.total_time()
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn window() -> CueBallWindow {
        CueBallWindow::new(CueBallWindowParameters {
            min_time: 1.0,
            max_time: 2.0,
        })
    }

    #[test]
    fn test_first_sample_has_no_movement() {
        let mut cue = window();
        cue.add(Vec2::new(5.0, 5.0), 0.0);
        assert_eq!(cue.average_movement(), Vec2::zeros());
        assert_eq!(cue.last_position(), Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_average_movement_of_steady_roll() {
        let mut cue = window();
        cue.add(Vec2::zeros(), 0.0);
        for step in 1..=4 {
            cue.add(Vec2::new(4.0 * step as f64, 0.0), 0.1);
        }
        // 16mm over five samples
        let average = cue.average_movement();
        assert_relative_eq!(average.x, 16.0 / 5.0);
        assert_relative_eq!(average.y, 0.0);
    }

    #[test]
    fn test_eviction_keeps_totals_consistent() {
        let mut cue = window();
        cue.add(Vec2::zeros(), 0.0);
        for step in 1..=40 {
            cue.add(Vec2::new(step as f64, 0.0), 0.1);
        }
        assert!(cue.total_time() <= 2.0);
        assert!(cue.warmed_up());

        // Every live sample moved by exactly 1mm
        assert_relative_eq!(cue.average_movement().x, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_warm_up_and_clear() {
        let mut cue = window();
        cue.add(Vec2::zeros(), 0.0);
        for _ in 0..10 {
            cue.add(Vec2::zeros(), 0.1);
        }
        // Ten steps of 0.1s do not exceed 1.0s in floating point
        assert!(!cue.warmed_up());
        cue.add(Vec2::zeros(), 0.1);
        assert!(cue.warmed_up());

        cue.clear();
        assert!(cue.is_empty());
        assert!(!cue.warmed_up());
        assert_eq!(cue.last_position(), None);
        assert_eq!(cue.average_movement(), Vec2::zeros());
    }
}
