/*!
 * Memory Block
 * Metadata for one contiguous region of the heap buffer
 */

use crate::core::types::{Address, Size};
use serde::{Deserialize, Serialize};

/// One contiguous region of the simulated heap.
///
/// A block is either free or allocated. Allocated blocks may carry a list of
/// reference addresses (simulated pointers to other block starts) that the
/// collector follows during the mark phase. The mark flag is transient and
/// only meaningful while a collection cycle is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    start: Address,
    size: Size,
    free: bool,
    marked: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    references: Vec<Address>,
}

impl Block {
    /// New free block covering `[start, start + size)`
    pub(crate) fn new(start: Address, size: Size) -> Self {
        Self {
            start,
            size,
            free: true,
            marked: false,
            references: Vec::new(),
        }
    }

    pub fn start(&self) -> Address {
        self.start
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// One past the last byte of the block
    pub fn end(&self) -> Address {
        self.start + self.size
    }

    pub fn is_free(&self) -> bool {
        self.free
    }

    /// Whether `address` falls inside this block
    pub fn contains(&self, address: Address) -> bool {
        address >= self.start && address < self.end()
    }

    pub(crate) fn set_start(&mut self, start: Address) {
        self.start = start;
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub(crate) fn set_free(&mut self, free: bool) {
        self.free = free;
    }

    /// Flag the block as reachable for the current collection cycle
    pub fn mark(&mut self) {
        self.marked = true;
    }

    pub fn unmark(&mut self) {
        self.marked = false;
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// Append a simulated pointer to the block starting at `address`.
    ///
    /// The list is not deduplicated; the collector tolerates duplicates.
    pub fn add_reference(&mut self, address: Address) {
        self.references.push(address);
    }

    /// Remove the first occurrence of `address` from the reference list
    pub fn remove_reference(&mut self, address: Address) {
        if let Some(position) = self.references.iter().position(|&r| r == address) {
            self.references.remove(position);
        }
    }

    pub fn references(&self) -> &[Address] {
        &self.references
    }

    pub(crate) fn clear_references(&mut self) {
        self.references.clear();
    }
}
