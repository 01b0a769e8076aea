/*!
 * Heap Types
 * Errors and statistics for the simulated heap
 */

use crate::core::types::{Address, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Heap operation result
pub type HeapResult<T> = Result<T, HeapError>;

/// Heap errors
///
/// Allocation failure due to insufficient space is not an error: `allocate`
/// signals it with `None` so callers can distinguish "no space" from an
/// invalid argument.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum HeapError {
    #[error("Invalid free: no allocated block at address 0x{0:x}")]
    InvalidFree(Address),

    #[error("Invalid access: address 0x{0:x} is not inside any allocated block")]
    InvalidAccess(Address),

    #[error("Unknown allocation strategy: {0}")]
    UnknownStrategy(String),
}

/// Heap occupancy statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HeapStats {
    pub heap_size: Size,
    pub allocated_bytes: Size,
    pub free_bytes: Size,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    pub usage_percentage: f64,
}

impl HeapStats {
    /// Fragmentation measured as the number of separate free blocks
    pub fn fragmentation(&self) -> usize {
        self.free_blocks
    }
}
