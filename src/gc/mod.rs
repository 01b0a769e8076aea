/*!
 * Garbage Collection Module
 * Mark-and-sweep collection and the root set
 */

pub mod collector;
pub mod root_set;

// Re-export for convenience
pub use collector::{GarbageCollector, GcStats};
pub use root_set::RootSet;
