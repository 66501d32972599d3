//! In-memory progress tracking and its debounced sync to the store.

pub mod debouncer;
pub mod tracker;

pub use debouncer::{ProgressDebouncer, ProgressStore, DEFAULT_SYNC_DELAY};
pub use tracker::ProgressTracker;
