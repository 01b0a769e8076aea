/*!
 * Garbage Collector
 * Mark-and-sweep collection over the simulated heap
 */

use crate::core::serde::is_zero_usize;
use crate::core::types::{Address, Size};
use crate::heap::SimulatedHeap;
use log::{error, info};
use serde::{Deserialize, Serialize};

/// Result of one collection cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GcStats {
    #[serde(default, skip_serializing_if = "is_zero_usize")]
    pub freed_blocks: usize,
    #[serde(default, skip_serializing_if = "is_zero_usize")]
    pub freed_bytes: Size,
    #[serde(default, skip_serializing_if = "is_zero_usize")]
    pub live_blocks: usize,
    #[serde(default, skip_serializing_if = "is_zero_usize")]
    pub live_bytes: Size,
}

impl GcStats {
    /// Check if any memory was reclaimed
    pub fn freed_any(&self) -> bool {
        self.freed_blocks > 0 || self.freed_bytes > 0
    }
}

/// Mark-and-sweep collector.
///
/// Walks the reference graph from the heap's root set, marking every
/// reachable allocated block, then frees the allocated blocks the walk
/// never reached. Collection never fails: it reclaims what it can, leaves
/// every reachable block allocated with its mark cleared, and restores the
/// heap invariants (including coalescing of the freed regions).
#[derive(Debug, Default)]
pub struct GarbageCollector;

impl GarbageCollector {
    pub fn new() -> Self {
        Self
    }

    /// Run one full collection cycle
    pub fn collect(&mut self, heap: &mut SimulatedHeap) -> GcStats {
        info!(
            "Starting mark-and-sweep collection ({} roots)",
            heap.root_set().len()
        );

        self.mark(heap);
        let stats = self.sweep(heap);

        info!(
            "Collection complete: freed {} blocks ({} bytes), {} live blocks ({} bytes)",
            stats.freed_blocks, stats.freed_bytes, stats.live_blocks, stats.live_bytes
        );
        stats
    }

    /// Mark phase: flag every block reachable from the root set.
    ///
    /// Roots are snapshotted up front; stale roots (addresses that are not
    /// the start of an allocated block) are skipped.
    pub fn mark(&mut self, heap: &mut SimulatedHeap) {
        let roots: Vec<Address> = heap.root_set().iter().collect();
        for root in roots {
            self.mark_from(heap, root);
        }
    }

    /// Depth-first walk from one address. Unknown addresses, free blocks,
    /// and already-marked blocks terminate a branch; the marked check also
    /// makes reference cycles safe.
    fn mark_from(&mut self, heap: &mut SimulatedHeap, root: Address) {
        let mut pending = vec![root];
        while let Some(address) = pending.pop() {
            let Some(block) = heap.find_block_mut(address) else {
                continue;
            };
            if block.is_marked() {
                continue;
            }
            block.mark();
            pending.extend_from_slice(block.references());
        }
    }

    /// Sweep phase: free every allocated-but-unmarked block, then clear the
    /// marks on the survivors.
    ///
    /// Freeing coalesces and therefore mutates the block list, so the
    /// garbage addresses are snapshotted before any `free` call.
    fn sweep(&mut self, heap: &mut SimulatedHeap) -> GcStats {
        let mut stats = GcStats::default();

        let mut garbage: Vec<(Address, Size)> = Vec::new();
        for block in heap.blocks() {
            if block.is_free() {
                continue;
            }
            if block.is_marked() {
                stats.live_blocks += 1;
                stats.live_bytes += block.size();
            } else {
                garbage.push((block.start(), block.size()));
            }
        }

        for (address, size) in garbage {
            match heap.free(address) {
                Ok(()) => {
                    stats.freed_blocks += 1;
                    stats.freed_bytes += size;
                }
                Err(e) => error!("Sweep could not free block at 0x{:x}: {}", address, e),
            }
        }

        for block in heap.blocks_mut() {
            block.unmark();
        }

        stats
    }
}
