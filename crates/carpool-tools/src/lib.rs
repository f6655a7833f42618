//! Instrumentation shared by the carpool crates.
//!
//! The model builder and the HiGHS backend record resident memory around
//! their expensive stages and attach it to their trace output.

pub mod memory;

pub use memory::{MemoryError, MemoryTrail, MemorySnapshot, rss_mb};
