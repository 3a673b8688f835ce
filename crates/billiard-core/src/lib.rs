//! Core types for billiard ball tracking
//!
//! This crate provides the vocabulary shared by the tracking crates: a 2D
//! millimeter vector, the per-frame ball observation reported by the vision
//! system, and the unified error type.
//!
//! All positions are expressed in millimeters in the table plane. Detector
//! output in meters can be converted with [`BallObservation::from_meters`].
//!
//! # Example
//!
//! ```rust
//! use billiard_core::{squared_distance, BallObservation, Vec2};
//!
//! let red = BallObservation::new("RED1", "RED", Vec2::new(400.0, 300.0));
//! let white = BallObservation::from_meters("WHITE1", "WHITE", 0.1, 0.05);
//!
//! assert!(white.is_type("WHITE"));
//! assert_eq!(squared_distance(&red.position, &white.position), 300.0 * 300.0 + 250.0 * 250.0);
//! ```

pub mod error;
pub mod geometry;
pub mod observation;

// Re-export core types
pub use error::{Error, Result};
pub use geometry::{squared_distance, squared_length, Positioned, Vec2};
pub use observation::BallObservation;
