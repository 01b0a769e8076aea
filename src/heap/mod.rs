/*!
 * Heap Module
 * Simulated heap state, construction, and accessors
 */

pub mod block;
pub mod strategy;
pub mod traits;
pub mod types;

mod access;
mod alloc;

// Re-export for convenience
pub use block::Block;
pub use strategy::AllocationStrategy;
pub use traits::{Allocator, HeapInfo};
pub use types::{HeapError, HeapResult, HeapStats};

use crate::core::limits::DEFAULT_HEAP_SIZE;
use crate::core::types::{Address, Size};
use crate::gc::{GarbageCollector, GcStats, RootSet};
use ahash::HashSet;
use log::{debug, info};

/// Simulated heap over a fixed-size byte buffer.
///
/// The buffer is tiled end-to-end by an ordered list of blocks, each either
/// free or allocated. `allocate` carves allocated blocks out of free ones
/// under the configured placement strategy, `free` coalesces neighbours
/// back together, and the owned root set seeds mark-and-sweep collection.
///
/// The heap is a single-threaded abstract machine: every operation is a
/// straight-line synchronous procedure and re-entering the heap from within
/// a reference walk is unsupported. Callers sharing a heap across threads
/// must confine it to one thread or wrap it in an external mutex.
pub struct SimulatedHeap {
    buffer: Vec<u8>,
    blocks: Vec<Block>,
    /// Start addresses of currently-allocated blocks
    allocations: HashSet<Address>,
    strategy: AllocationStrategy,
    /// Next-fit cursor into `blocks`, re-anchored after each allocation
    last_allocation_index: usize,
    root_set: RootSet,
}

impl SimulatedHeap {
    /// Create a heap of `size` bytes with a single free block covering it.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn new(size: Size) -> Self {
        assert!(size > 0, "heap size must be positive");
        info!("Simulated heap initialized with {} bytes", size);
        Self {
            buffer: vec![0; size],
            blocks: vec![Block::new(0, size)],
            allocations: HashSet::default(),
            strategy: AllocationStrategy::default(),
            last_allocation_index: 0,
            root_set: RootSet::new(),
        }
    }

    /// Create a heap with a placement strategy other than the default
    pub fn with_strategy(size: Size, strategy: AllocationStrategy) -> Self {
        let mut heap = Self::new(size);
        heap.strategy = strategy;
        heap
    }

    /// Set the placement strategy for future allocations
    pub fn set_strategy(&mut self, strategy: AllocationStrategy) {
        debug!("Allocation strategy set to {}", strategy);
        self.strategy = strategy;
    }

    pub fn strategy(&self) -> AllocationStrategy {
        self.strategy
    }

    /// Total size of the heap in bytes
    pub fn heap_size(&self) -> Size {
        self.buffer.len()
    }

    /// The ordered block list tiling the buffer
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    /// Iterate over the currently-allocated blocks, keyed by start address
    pub fn allocations(&self) -> impl Iterator<Item = (Address, &Block)> + '_ {
        self.blocks
            .iter()
            .filter(|block| !block.is_free())
            .map(|block| (block.start(), block))
    }

    /// Number of live allocations
    pub fn allocation_count(&self) -> usize {
        self.allocations.len()
    }

    /// Whether `address` is the start of a live allocation
    pub fn is_valid(&self, address: Address) -> bool {
        self.allocations.contains(&address)
    }

    /// Size of the allocation starting at `address`, if any
    pub fn block_size(&self, address: Address) -> Option<Size> {
        self.find_block(address).map(Block::size)
    }

    /// Find the allocated block starting exactly at `address`
    pub fn find_block(&self, address: Address) -> Option<&Block> {
        if !self.allocations.contains(&address) {
            return None;
        }
        self.block_index(address).map(|index| &self.blocks[index])
    }

    /// Mutable twin of [`find_block`](Self::find_block), used to attach
    /// references to an allocated block
    pub fn find_block_mut(&mut self, address: Address) -> Option<&mut Block> {
        if !self.allocations.contains(&address) {
            return None;
        }
        self.block_index(address)
            .map(|index| &mut self.blocks[index])
    }

    pub fn root_set(&self) -> &RootSet {
        &self.root_set
    }

    pub fn root_set_mut(&mut self) -> &mut RootSet {
        &mut self.root_set
    }

    /// Run a full mark-and-sweep collection cycle over this heap
    pub fn collect(&mut self) -> GcStats {
        GarbageCollector::new().collect(self)
    }

    /// Current occupancy statistics
    pub fn stats(&self) -> HeapStats {
        let mut allocated_bytes = 0;
        let mut free_bytes = 0;
        let mut allocated_blocks = 0;
        let mut free_blocks = 0;

        for block in &self.blocks {
            if block.is_free() {
                free_bytes += block.size();
                free_blocks += 1;
            } else {
                allocated_bytes += block.size();
                allocated_blocks += 1;
            }
        }

        HeapStats {
            heap_size: self.heap_size(),
            allocated_bytes,
            free_bytes,
            allocated_blocks,
            free_blocks,
            usage_percentage: allocated_bytes as f64 / self.heap_size() as f64 * 100.0,
        }
    }

    /// Memory info as (total, allocated, free)
    pub fn info(&self) -> (Size, Size, Size) {
        let stats = self.stats();
        (stats.heap_size, stats.allocated_bytes, stats.free_bytes)
    }

    /// Position in `blocks` of the block starting exactly at `address`.
    /// The block list is sorted by start, so a binary search suffices.
    pub(crate) fn block_index(&self, address: Address) -> Option<usize> {
        self.blocks
            .binary_search_by_key(&address, Block::start)
            .ok()
    }

    /// Position in `blocks` of the allocated block containing `address`
    pub(crate) fn containing_allocated_index(&self, address: Address) -> Option<usize> {
        let index = self
            .blocks
            .partition_point(|block| block.start() <= address)
            .checked_sub(1)?;
        let block = &self.blocks[index];
        (!block.is_free() && block.contains(address)).then_some(index)
    }
}

impl Default for SimulatedHeap {
    fn default() -> Self {
        Self::new(DEFAULT_HEAP_SIZE)
    }
}

// Implement trait interfaces
impl Allocator for SimulatedHeap {
    fn allocate(&mut self, size: Size) -> Option<Address> {
        SimulatedHeap::allocate(self, size)
    }

    fn free(&mut self, address: Address) -> HeapResult<()> {
        SimulatedHeap::free(self, address)
    }

    fn is_valid(&self, address: Address) -> bool {
        SimulatedHeap::is_valid(self, address)
    }

    fn block_size(&self, address: Address) -> Option<Size> {
        SimulatedHeap::block_size(self, address)
    }
}

impl HeapInfo for SimulatedHeap {
    fn stats(&self) -> HeapStats {
        SimulatedHeap::stats(self)
    }

    fn info(&self) -> (Size, Size, Size) {
        SimulatedHeap::info(self)
    }
}
