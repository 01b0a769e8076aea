/*!
 * Visualization Module
 * ASCII renderers and reports over the heap's read-only surface
 */

pub mod layout;
pub mod stats;

// Re-export for convenience
pub use stats::GcReport;
