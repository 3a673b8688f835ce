//! Planar geometry in table millimeters

use nalgebra::Vector2;

/// A position or displacement on the table plane, in millimeters
pub type Vec2 = Vector2<f64>;

/// Anything that sits at a position on the table
///
/// Implemented by raw observations and by tracked balls so the same
/// nearest-neighbor search serves cue ball disambiguation and identity
/// tracking.
pub trait Positioned {
    /// Position in millimeters
    fn position(&self) -> Vec2;
}

impl Positioned for Vec2 {
    #[inline]
    fn position(&self) -> Vec2 {
        *self
    }
}

/// Squared euclidean distance between two points, in mm²
#[inline]
pub fn squared_distance(a: &Vec2, b: &Vec2) -> f64 {
    (a - b).norm_squared()
}

/// Squared length of a displacement, in mm²
#[inline]
pub fn squared_length(v: &Vec2) -> f64 {
    v.norm_squared()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_squared_distance() {
        let a = Vec2::new(100.0, 50.0);
        let b = Vec2::new(400.0, 300.0);
        assert_relative_eq!(squared_distance(&a, &b), 300.0 * 300.0 + 250.0 * 250.0);
        assert_relative_eq!(squared_distance(&a, &a), 0.0);
    }

    #[test]
    fn test_squared_length() {
        assert_relative_eq!(squared_length(&Vec2::new(3.0, 4.0)), 25.0);
        assert_relative_eq!(squared_length(&Vec2::zeros()), 0.0);
    }

    proptest! {
        #[test]
        fn prop_squared_distance_is_symmetric(
            ax in -2000.0..2000.0f64, ay in -2000.0..2000.0f64,
            bx in -2000.0..2000.0f64, by in -2000.0..2000.0f64,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert!((squared_distance(&a, &b) - squared_distance(&b, &a)).abs() < 1e-9);
            prop_assert!(squared_distance(&a, &b) >= 0.0);
        }
    }
}
