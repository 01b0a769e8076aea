/*!
 * Heap Allocation
 * Allocation, deallocation, and coalescing logic
 */

use super::block::Block;
use super::strategy::AllocationStrategy;
use super::types::{HeapError, HeapResult};
use super::SimulatedHeap;
use crate::core::limits::ALIGNMENT;
use crate::core::types::{Address, Size};
use log::{error, info, warn};

/// Round `address` up to the next multiple of the allocation alignment
fn align_up(address: Address) -> Address {
    let remainder = address % ALIGNMENT;
    if remainder == 0 {
        address
    } else {
        address + (ALIGNMENT - remainder)
    }
}

impl SimulatedHeap {
    /// Allocate `size` bytes using the configured placement strategy.
    ///
    /// Returns the aligned start address of the new allocation, or `None`
    /// when no free block can hold the request. The strategy proposes a
    /// single candidate; if alignment padding leaves that candidate too
    /// small, the allocation fails without trying other blocks. Zero-size
    /// requests are rejected.
    pub fn allocate(&mut self, size: Size) -> Option<Address> {
        if size == 0 {
            warn!("Rejected zero-size allocation request");
            return None;
        }

        let cursor = self.last_allocation_index;
        let Some(chosen) = self.strategy.select(&self.blocks, size, cursor) else {
            warn!(
                "Allocation of {} bytes failed: no free block fits ({})",
                size, self.strategy
            );
            return None;
        };

        self.allocate_from(chosen, size)
    }

    /// Carve an allocation of `size` bytes out of the free block at `index`,
    /// inserting a padding block in front when its start is misaligned and
    /// splitting off the remainder when it is larger than needed.
    fn allocate_from(&mut self, mut index: usize, size: Size) -> Option<Address> {
        let start = self.blocks[index].start();
        let aligned_start = align_up(start);
        let padding = aligned_start - start;

        // The candidate must hold the padding in addition to the request
        if self.blocks[index].size() < padding + size {
            warn!(
                "Allocation of {} bytes failed: block at 0x{:x} too small after {} padding bytes",
                size, start, padding
            );
            return None;
        }

        if padding > 0 {
            // Carve the misaligned prefix off as its own free block so the
            // returned address lands on an alignment boundary
            self.blocks.insert(index, Block::new(start, padding));
            index += 1;
            let block = &mut self.blocks[index];
            block.set_start(aligned_start);
            block.set_size(block.size() - padding);
        }

        if self.blocks[index].size() > size {
            let remainder_size = self.blocks[index].size() - size;
            let remainder = Block::new(aligned_start + size, remainder_size);
            self.blocks.insert(index + 1, remainder);
            self.blocks[index].set_size(size);
            info!(
                "Split block: keeping {} bytes, returning {} bytes at 0x{:x} to the free list",
                size,
                remainder_size,
                aligned_start + size
            );
        }

        let block = &mut self.blocks[index];
        block.set_free(false);
        // A recycled block may carry references from a previous life
        block.clear_references();
        self.allocations.insert(aligned_start);

        // Re-anchor the next-fit cursor on the allocated block so the next
        // scan resumes just after it
        if self.strategy == AllocationStrategy::NextFit {
            self.last_allocation_index = index;
        }

        info!(
            "Allocated {} bytes at 0x{:x} ({})",
            size, aligned_start, self.strategy
        );
        Some(aligned_start)
    }

    /// Release the allocation starting at `address`.
    ///
    /// The freed block is merged with its free neighbours (successor first,
    /// then predecessor) so no two adjacent free blocks remain.
    pub fn free(&mut self, address: Address) -> HeapResult<()> {
        if !self.allocations.contains(&address) {
            warn!(
                "Attempted to free invalid or already freed address 0x{:x}",
                address
            );
            return Err(HeapError::InvalidFree(address));
        }
        let Some(index) = self.block_index(address) else {
            error!("Allocation index out of sync at 0x{:x}", address);
            return Err(HeapError::InvalidFree(address));
        };

        self.allocations.remove(&address);
        let size = self.blocks[index].size();
        self.blocks[index].set_free(true);

        // Absorb a free successor, then fold into a free predecessor
        if index + 1 < self.blocks.len() && self.blocks[index + 1].is_free() {
            let absorbed = self.blocks.remove(index + 1);
            let block = &mut self.blocks[index];
            block.set_size(block.size() + absorbed.size());
        }
        if index > 0 && self.blocks[index - 1].is_free() {
            let absorbed = self.blocks.remove(index);
            let previous = &mut self.blocks[index - 1];
            previous.set_size(previous.size() + absorbed.size());
        }

        info!("Freed {} bytes at 0x{:x}", size, address);
        Ok(())
    }
}
