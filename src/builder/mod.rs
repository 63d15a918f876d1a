//! The primitive build-action boundary.
//!
//! Resolution schedules exactly one action kind — copy the current snapshot
//! to its generated output — and hands it to a sink. The real scheduler
//! lives outside this crate; the local executor here exists for
//! `berth plan --execute` and for verifying artifacts in tests.

pub mod actions;
pub mod executor;

pub use actions::{ActionSink, CopyAction, RecordedActions};
pub use executor::LocalExecutor;
