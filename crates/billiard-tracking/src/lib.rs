//! Ball identity tracking and table stabilization detection
//!
//! This crate consumes a stream of noisy detection frames and decides
//! whether the table is at rest. It provides:
//!
//! - A generic time-bounded sliding window with incremental totals
//! - Nearest-neighbor ball matching
//! - Cue ball and ball population histories with per-ball identity chains
//! - Cue ball disambiguation among several candidates
//! - A debounced classifier that notifies a listener on every transition
//!
//! # Example
//!
//! ```rust
//! use billiard_core::{BallObservation, Vec2};
//! use billiard_tracking::{StabilizationClassifier, StabilizationParameters, StabilizationStatus};
//!
//! let mut classifier = StabilizationClassifier::new(StabilizationParameters::default());
//! let frame = vec![
//!     BallObservation::new("WHITE1", "WHITE", Vec2::new(0.0, 0.0)),
//!     BallObservation::new("RED1", "RED", Vec2::new(400.0, 300.0)),
//! ];
//!
//! let mut status = classifier.process_frame(0.0, &frame);
//! for _ in 0..20 {
//!     status = classifier.process_frame(0.1, &frame);
//! }
//! assert_eq!(status, StabilizationStatus::Stable);
//! ```

pub mod classifier;
pub mod clock;
pub mod cue_window;
pub mod engine;
pub mod listener;
pub mod matcher;
pub mod parameters;
pub mod population;
pub mod resolver;
pub mod traits;
pub mod types;
pub mod window;

pub use classifier::StabilizationClassifier;
pub use clock::FrameClock;
pub use cue_window::{CueBallSample, CueBallWindow};
pub use engine::StabilizationEngine;
pub use listener::{FnListener, NullStabilizationListener, StabilizationListener};
pub use matcher::{find_nearest_ball, NearestBall};
pub use parameters::{CueBallWindowParameters, PopulationWindowParameters, StabilizationParameters};
pub use population::{BallLink, BallPopulationWindow, PopulationFrame, TrackedBall};
pub use resolver::{CueBallResolution, CueBallResolver};
pub use traits::FrameStabilityAnalyzer;
pub use types::{StabilizationChange, StabilizationMetrics, StabilizationStatus};
pub use window::{TimeWindow, TimedEntry, WindowAccumulator};
