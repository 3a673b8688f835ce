//! Nearest-neighbor association between a position and candidate balls

use billiard_core::{squared_distance, Positioned, Vec2};

/// Result of a nearest-neighbor search
#[derive(Debug)]
pub struct NearestBall<'a, B> {
    /// Index of the ball in the searched sequence
    pub index: usize,
    pub ball: &'a B,
    /// Squared distance to the query position, in mm²
    pub squared_distance: f64,
}

impl<'a, B> Clone for NearestBall<'a, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, B> Copy for NearestBall<'a, B> {}

impl<'a, B> NearestBall<'a, B> {
    /// Whether the match lies strictly within `max_squared_distance`
    pub fn within(&self, max_squared_distance: f64) -> bool {
        self.squared_distance < max_squared_distance
    }
}

/// Find the ball nearest to `position`
///
/// Returns `None` for an empty sequence. On exact ties the first ball
/// encountered wins.
pub fn find_nearest_ball<'a, B, I>(balls: I, position: &Vec2) -> Option<NearestBall<'a, B>>
where
    B: Positioned + 'a,
    I: IntoIterator<Item = &'a B>,
{
    let mut nearest: Option<NearestBall<'a, B>> = None;
    for (index, ball) in balls.into_iter().enumerate() {
        let distance = squared_distance(position, &ball.position());
        if nearest.as_ref().map_or(true, |n| distance < n.squared_distance) {
            nearest = Some(NearestBall {
                index,
                ball,
                squared_distance: distance,
            });
        }
    }
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use billiard_core::BallObservation;

    #[test]
    fn test_returns_nearest() {
        let white = BallObservation::new("WHITE1", "WHITE", Vec2::new(0.0, 0.0));
        let balls = vec![
            BallObservation::new("RED1", "RED", Vec2::new(400.0, 300.0)),
            white.clone(),
        ];

        let nearest = find_nearest_ball(&balls, &Vec2::new(100.0, 50.0)).unwrap();
        assert_eq!(nearest.ball, &white);
        assert_eq!(nearest.index, 1);
        assert_relative_eq!(nearest.squared_distance, 100.0 * 100.0 + 50.0 * 50.0);
    }

    #[test]
    fn test_empty_has_no_match() {
        let balls: Vec<BallObservation> = Vec::new();
        assert!(find_nearest_ball(&balls, &Vec2::zeros()).is_none());
    }

    #[test]
    fn test_first_wins_on_tie() {
        let balls = vec![Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0)];
        let nearest = find_nearest_ball(&balls, &Vec2::zeros()).unwrap();
        assert_eq!(nearest.index, 0);
    }

    #[test]
    fn test_within_is_strict() {
        let balls = vec![Vec2::new(10.0, 0.0)];
        let nearest = find_nearest_ball(&balls, &Vec2::zeros()).unwrap();
        assert!(!nearest.within(100.0));
        assert!(nearest.within(100.5));
    }
}
