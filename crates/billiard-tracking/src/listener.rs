//! Receivers of stabilization status transitions
//!
//! The classifier calls its listener exactly once for every frame whose
//! status differs from the status before that frame, and never otherwise.
//!
//! # Example
//!
//! ```rust
//! use billiard_tracking::{
//!     FnListener, StabilizationChange, StabilizationClassifier, StabilizationParameters,
//! };
//!
//! let mut changes = Vec::new();
//! let mut classifier = StabilizationClassifier::with_listener(
//!     StabilizationParameters::default(),
//!     FnListener::new(|change: &StabilizationChange| changes.push(*change)),
//! );
//! classifier.process_frame(0.0, &[]);
//! drop(classifier);
//! assert!(changes.is_empty());
//! ```

use crate::types::StabilizationChange;

/// Receiver of status transitions
pub trait StabilizationListener {
    fn on_stabilization_change(&mut self, change: &StabilizationChange);
}

/// Listener that ignores every transition
///
/// This is the default listener; its calls compile away.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStabilizationListener;

impl StabilizationListener for NullStabilizationListener {
    #[inline(always)]
    fn on_stabilization_change(&mut self, _change: &StabilizationChange) {}
}

/// Adapts a closure into a listener
pub struct FnListener<F> {
    callback: F,
}

impl<F: FnMut(&StabilizationChange)> FnListener<F> {
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F: FnMut(&StabilizationChange)> StabilizationListener for FnListener<F> {
    fn on_stabilization_change(&mut self, change: &StabilizationChange) {
        (self.callback)(change)
    }
}

/// Collects transitions, mostly useful in tests
impl StabilizationListener for Vec<StabilizationChange> {
    fn on_stabilization_change(&mut self, change: &StabilizationChange) {
        self.push(*change);
    }
}

impl<L: StabilizationListener + ?Sized> StabilizationListener for &mut L {
    fn on_stabilization_change(&mut self, change: &StabilizationChange) {
        (**self).on_stabilization_change(change)
    }
}
