/*!
 * Heap Traits
 * Capability abstractions over the simulated heap
 */

use super::types::{HeapResult, HeapStats};
use crate::core::types::{Address, Size};

/// Allocation interface.
///
/// Exhaustion is not an error: `allocate` returns `None` when no free block
/// can satisfy the request, and `HeapError` is reserved for invalid
/// arguments.
pub trait Allocator {
    /// Allocate `size` bytes, returning the aligned start address
    fn allocate(&mut self, size: Size) -> Option<Address>;

    /// Release the allocation starting at `address`
    fn free(&mut self, address: Address) -> HeapResult<()>;

    /// Check whether an address is the start of a live allocation
    fn is_valid(&self, address: Address) -> bool;

    /// Size of the allocation starting at `address`
    fn block_size(&self, address: Address) -> Option<Size>;
}

/// Heap statistics provider
pub trait HeapInfo {
    /// Current occupancy statistics
    fn stats(&self) -> HeapStats;

    /// Memory info as (total, allocated, free)
    fn info(&self) -> (Size, Size, Size);
}
