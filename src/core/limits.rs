/*!
 * Simulator Limits and Constants
 *
 * Centralized location for simulator-wide constants and magic numbers.
 */

/// Alignment of returned allocation addresses (8 bytes)
/// Every address handed out by `allocate` is a multiple of this value,
/// matching the word size of the simulated machine
pub const ALIGNMENT: usize = 8;

/// Default heap capacity (256 bytes)
/// Small enough that the ASCII visualizers stay readable
pub const DEFAULT_HEAP_SIZE: usize = 256;
