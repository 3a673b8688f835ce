//! # Billiard Stabilization
//!
//! Facade over the workspace crates. A vision system reports noisy ball
//! positions at irregular intervals; this toolkit tracks ball identities
//! across frames and decides when the table has come to rest.
//!
//! ## Crates
//!
//! - [`billiard_core`]: shared geometry, observations and the unified error type
//! - [`billiard_tracking`]: sliding windows, ball matching and the stabilization classifier
//!
//! ```rust
//! use billiard_stabilization::prelude::*;
//!
//! let mut engine = StabilizationEngine::new(StabilizationParameters::default());
//! engine.set_tracking(true);
//!
//! let frame = vec![
//!     BallObservation::new("WHITE1", "WHITE", Vec2::new(0.0, 0.0)),
//!     BallObservation::new("RED1", "RED", Vec2::new(400.0, 300.0)),
//! ];
//! let status = engine.frame(0.0, &frame);
//! assert_eq!(status, StabilizationStatus::Unknown);
//! ```

pub use billiard_core;
pub use billiard_tracking;

/// Commonly used types from all workspace crates
pub mod prelude {
    pub use billiard_core::{BallObservation, Error, Positioned, Result, Vec2};
    pub use billiard_tracking::{
        FnListener, FrameStabilityAnalyzer, NullStabilizationListener, StabilizationChange,
        StabilizationClassifier, StabilizationEngine, StabilizationListener,
        StabilizationMetrics, StabilizationParameters, StabilizationStatus,
    };
}
