//! State tracking for release operations.
//!
//! Tracks which pipeline stage has been reached during a single run.

mod release_state;

pub use release_state::{ReleaseCheckpoint, ReleaseFailure, ReleasePhase, ReleaseState};
