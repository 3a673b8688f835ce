//! Time-bounded history of all non-cue balls with identity chains
//!
//! Each frame becomes one window entry holding a [`TrackedBall`] per
//! observation. A tracked ball that continues a ball of the previous frame
//! links back to it, and that ball links forward in turn, so every physical
//! ball forms a chain through consecutive entries. Links are
//! `(sequence, slot)` pairs resolved through the window: once an entry is
//! evicted its sequence no longer resolves and chains simply end there.

use crate::matcher::find_nearest_ball;
use crate::parameters::PopulationWindowParameters;
use crate::window::{TimeWindow, TimedEntry, WindowAccumulator};
use billiard_core::{BallObservation, Positioned, Vec2};
use tracing::trace;

/// Address of a tracked ball: window entry sequence and slot within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BallLink {
    pub sequence: u64,
    pub slot: usize,
}

/// One ball of one frame, as part of an identity chain
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedBall {
    pub id: String,
    pub ball_type: String,
    pub position: Vec2,
    /// Movement since the matched ball of the previous frame
    pub movement: Vec2,
    /// Mean per-frame movement along the chain, computed once on creation
    pub average_movement: Vec2,
    /// Accumulated frame time since the chain started, in seconds
    pub tracked_duration: f64,
    previous: Option<BallLink>,
    next: Option<BallLink>,
}

impl TrackedBall {
    fn untracked(observation: &BallObservation) -> Self {
        Self {
            id: observation.id.clone(),
            ball_type: observation.ball_type.clone(),
            position: observation.position,
            movement: Vec2::zeros(),
            average_movement: Vec2::zeros(),
            tracked_duration: 0.0,
            previous: None,
            next: None,
        }
    }

    /// Raw address of the ball this one continues
    ///
    /// The addressed frame may have been evicted since; resolve through
    /// [`BallPopulationWindow::previous_of`] to reach the ball itself.
    pub fn previous_link(&self) -> Option<BallLink> {
        self.previous
    }

    /// Raw address of the ball continuing this one
    pub fn next_link(&self) -> Option<BallLink> {
        self.next
    }
}

impl Positioned for TrackedBall {
    #[inline]
    fn position(&self) -> Vec2 {
        self.position
    }
}

/// All tracked balls of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationFrame {
    pub balls: Vec<TrackedBall>,
    /// Reliably tracked balls of the previous frame that vanished in this one
    pub lost_count: usize,
    /// Balls tracked long enough to be trusted
    pub stable_ball_count: usize,
    /// Running average ball count of the window when this frame arrived
    pub average_ball_count: f64,
    pub average_ball_count_change: f64,
}

/// Window totals over all live frames
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PopulationTotals {
    pub lost_count: usize,
    pub ball_count: usize,
    pub average_ball_count_change: f64,
}

impl WindowAccumulator<PopulationFrame> for PopulationTotals {
    fn include(&mut self, frame: &PopulationFrame) {
        self.lost_count += frame.lost_count;
        self.ball_count += frame.balls.len();
        self.average_ball_count_change += frame.average_ball_count_change;
    }

    fn exclude(&mut self, frame: &PopulationFrame) {
        self.lost_count -= frame.lost_count;
        self.ball_count -= frame.balls.len();
        self.average_ball_count_change -= frame.average_ball_count_change;
    }
}

/// Sliding history of the non-cue ball population
#[derive(Debug, Clone)]
pub struct BallPopulationWindow {
    params: PopulationWindowParameters,
    cue_ball_type: String,
    window: TimeWindow<PopulationFrame, PopulationTotals>,
}

impl BallPopulationWindow {
    /// Create an empty window; observations of `cue_ball_type` are ignored
    pub fn new(params: PopulationWindowParameters, cue_ball_type: impl Into<String>) -> Self {
        Self {
            window: TimeWindow::new(params.min_time, params.max_time),
            params,
            cue_ball_type: cue_ball_type.into(),
        }
    }

    /// Record the observations of a new frame
    pub fn add(&mut self, observations: &[BallObservation], delta_time: f64) {
        let frame = match self.window.newest() {
            Some(previous) => self.track(previous, observations, delta_time),
            None => self.first_frame(observations),
        };

        let sequence = self.window.next_sequence();
        for (slot, ball) in frame.balls.iter().enumerate() {
            let Some(link) = ball.previous else {
                continue;
            };
            if let Some(matched) = self
                .window
                .get_mut(link.sequence)
                .and_then(|entry| entry.state.balls.get_mut(link.slot))
            {
                matched.next = Some(BallLink { sequence, slot });
            }
        }

        let evicted = self.window.push(frame, delta_time);
        if evicted > 0 {
            trace!(evicted, remaining = self.window.len(), "evicted population frames");
        }
    }

    fn first_frame(&self, observations: &[BallObservation]) -> PopulationFrame {
        let balls: Vec<TrackedBall> = self
            .non_cue(observations)
            .map(TrackedBall::untracked)
            .collect();
        trace!(balls = balls.len(), "first population frame");
        PopulationFrame {
            stable_ball_count: self.count_stable(&balls),
            lost_count: 0,
            average_ball_count: balls.len() as f64,
            average_ball_count_change: 0.0,
            balls,
        }
    }

    fn track(
        &self,
        previous: &TimedEntry<PopulationFrame>,
        observations: &[BallObservation],
        delta_time: f64,
    ) -> PopulationFrame {
        let previous_sequence = previous.sequence();
        let observations: Vec<&BallObservation> = self.non_cue(observations).collect();

        // Nearest previous ball of every observation, then one claimant per ball
        let nearest: Vec<_> = observations
            .iter()
            .map(|observation| find_nearest_ball(&previous.state.balls, &observation.position))
            .collect();
        let mut claimant: Vec<Option<(usize, f64)>> = vec![None; previous.state.balls.len()];
        for (index, candidate) in nearest.iter().enumerate() {
            let Some(candidate) = candidate else {
                continue;
            };
            if !candidate.within(self.params.max_tracking_squared_distance) {
                continue;
            }
            let claim = &mut claimant[candidate.index];
            if claim.map_or(true, |(_, distance)| candidate.squared_distance < distance) {
                *claim = Some((index, candidate.squared_distance));
            }
        }

        let mut balls = Vec::with_capacity(observations.len());
        for (index, (observation, candidate)) in observations.iter().zip(&nearest).enumerate() {
            let mut ball = TrackedBall::untracked(observation);

            match candidate {
                Some(nearest)
                    if claimant[nearest.index].map(|(winner, _)| winner) == Some(index) =>
                {
                    let matched = nearest.ball;
                    let link = BallLink {
                        sequence: previous_sequence,
                        slot: nearest.index,
                    };
                    ball.movement = observation.position - matched.position;
                    ball.average_movement = self.chain_average_movement(observation.position, link);
                    ball.tracked_duration = matched.tracked_duration + delta_time;
                    ball.previous = Some(link);
                    trace!(
                        id = %observation.id,
                        matched = %matched.id,
                        distance = nearest.squared_distance.sqrt(),
                        average_movement = ball.average_movement.norm(),
                        tracked_duration = ball.tracked_duration,
                        "ball tracked"
                    );
                }
                Some(nearest) if nearest.within(self.params.max_tracking_squared_distance) => {
                    trace!(
                        id = %observation.id,
                        nearest = %nearest.ball.id,
                        distance = nearest.squared_distance.sqrt(),
                        "ball already continued by a nearer observation, new chain"
                    );
                }
                Some(nearest) => {
                    trace!(
                        id = %observation.id,
                        nearest = %nearest.ball.id,
                        distance = nearest.squared_distance.sqrt(),
                        "ball too far from any tracked ball, new chain"
                    );
                }
                None => {
                    trace!(id = %observation.id, "no tracked balls, new chain");
                }
            }

            balls.push(ball);
        }

        let lost_count = self.count_lost(&previous.state.balls, &balls);
        let average_ball_count = self.average_ball_count();

        PopulationFrame {
            stable_ball_count: self.count_stable(&balls),
            lost_count,
            average_ball_count,
            average_ball_count_change: previous.state.average_ball_count - average_ball_count,
            balls,
        }
    }

    /// Count previous balls nobody continued and that were tracked long
    /// enough to be trusted; shorter-lived ones are dropped as ghosts
    fn count_lost(&self, previous: &[TrackedBall], current: &[TrackedBall]) -> usize {
        let mut continued = vec![false; previous.len()];
        for link in current.iter().filter_map(|ball| ball.previous) {
            continued[link.slot] = true;
        }

        let mut lost = 0;
        for (ball, _) in previous.iter().zip(continued).filter(|(_, c)| !c) {
            if ball.tracked_duration > self.params.min_tracked_duration_before_lost {
                trace!(id = %ball.id, tracked_duration = ball.tracked_duration, "ball lost");
                lost += 1;
            } else {
                trace!(id = %ball.id, tracked_duration = ball.tracked_duration, "short-lived ball dropped");
            }
        }
        lost
    }

    fn count_stable(&self, balls: &[TrackedBall]) -> usize {
        balls
            .iter()
            .filter(|ball| ball.tracked_duration > self.params.min_tracked_duration_before_counted)
            .count()
    }

    /// Mean of the per-step movements from `position` back to the chain start
    fn chain_average_movement(&self, position: Vec2, from: BallLink) -> Vec2 {
        let mut current = position;
        let mut total = Vec2::zeros();
        let mut steps = 0usize;
        let mut link = Some(from);

        while let Some(node) = link.and_then(|l| self.resolve(l)) {
            total += current - node.position;
            steps += 1;
            current = node.position;
            link = node.previous;
        }

        if steps == 0 {
            Vec2::zeros()
        } else {
            total / steps as f64
        }
    }

    fn non_cue<'a>(
        &'a self,
        observations: &'a [BallObservation],
    ) -> impl Iterator<Item = &'a BallObservation> + 'a {
        observations
            .iter()
            .filter(move |observation| !observation.is_type(&self.cue_ball_type))
    }

    /// Look up a live tracked ball
    pub fn resolve(&self, link: BallLink) -> Option<&TrackedBall> {
        self.window
            .get(link.sequence)
            .and_then(|entry| entry.state.balls.get(link.slot))
    }

    /// The ball `ball` continues, if it is still in the window
    pub fn previous_of(&self, ball: &TrackedBall) -> Option<&TrackedBall> {
        ball.previous.and_then(|link| self.resolve(link))
    }

    /// The ball continuing `ball`, if any
    pub fn next_of(&self, ball: &TrackedBall) -> Option<&TrackedBall> {
        ball.next.and_then(|link| self.resolve(link))
    }

    /// Whether `ball` is the oldest live ball of its chain, either because
    /// it started the chain or because its predecessor was evicted
    pub fn is_chain_start(&self, ball: &TrackedBall) -> bool {
        self.previous_of(ball).is_none()
    }

    /// Tracked balls of the newest frame
    pub fn newest_balls(&self) -> &[TrackedBall] {
        self.window
            .newest()
            .map(|entry| entry.state.balls.as_slice())
            .unwrap_or(&[])
    }

    /// Frames from newest to oldest
    pub fn history(&self) -> impl Iterator<Item = &TimedEntry<PopulationFrame>> + '_ {
        self.window.iter_newest_first()
    }

    pub fn warmed_up(&self) -> bool {
        self.window.warmed_up()
    }

    /// Stable-counted balls of the newest frame
    pub fn stable_ball_count(&self) -> usize {
        self.window
            .newest()
            .map_or(0, |entry| entry.state.stable_ball_count)
    }

    /// All balls of the newest frame
    pub fn current_ball_count(&self) -> usize {
        self.newest_balls().len()
    }

    /// Stable-counted balls gained between the two newest frames
    pub fn stable_ball_count_change(&self) -> i64 {
        let mut newest_first = self.window.iter_newest_first();
        match (newest_first.next(), newest_first.next()) {
            (Some(newest), Some(previous)) => {
                newest.state.stable_ball_count as i64 - previous.state.stable_ball_count as i64
            }
            _ => 0,
        }
    }

    /// Lost balls summed over the window
    pub fn total_lost_count(&self) -> usize {
        self.window.totals().lost_count
    }

    /// Average number of balls per frame over the window
    pub fn average_ball_count(&self) -> f64 {
        if self.window.is_empty() {
            return 0.0;
        }
        self.window.totals().ball_count as f64 / self.window.len() as f64
    }

    pub fn total_average_ball_count_change(&self) -> f64 {
        self.window.totals().average_ball_count_change
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
