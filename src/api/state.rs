//! Application state for the Work Tracker API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::tracker::WorkTracker;

/// Shared application state.
///
/// Holds the single tracker session all handlers operate on.
#[derive(Clone)]
pub struct AppState {
    tracker: Arc<WorkTracker>,
}

impl AppState {
    /// Creates a new application state around a tracker.
    pub fn new(tracker: WorkTracker) -> Self {
        Self::from_shared(Arc::new(tracker))
    }

    /// Creates a new application state around an already shared tracker.
    pub fn from_shared(tracker: Arc<WorkTracker>) -> Self {
        Self { tracker }
    }

    /// Returns the tracker session.
    pub fn tracker(&self) -> &WorkTracker {
        &self.tracker
    }
}
