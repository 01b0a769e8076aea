/*!
 * Heap Tests
 * Allocation, deallocation, coalescing, and exhaustion behaviour
 */

use crate::common::assert_heap_invariants;
use pretty_assertions::assert_eq;
use simheap::{Allocator, HeapError, HeapInfo, SimulatedHeap};

#[test]
fn test_heap_initialization() {
    let heap = SimulatedHeap::new(128);
    assert_eq!(heap.heap_size(), 128);
    assert_eq!(heap.blocks().len(), 1);
    assert!(heap.blocks()[0].is_free());
    assert_eq!(heap.allocation_count(), 0);

    let (total, allocated, free) = heap.info();
    assert_eq!(total, 128);
    assert_eq!(allocated, 0);
    assert_eq!(free, 128);

    assert_heap_invariants(&heap);
}

#[test]
fn test_basic_allocate_and_free() {
    let mut heap = SimulatedHeap::new(64);

    let ptr = heap.allocate(16).expect("allocation should succeed");
    assert_eq!(ptr, 0, "first allocation starts at address 0");
    assert_heap_invariants(&heap);

    heap.write(ptr, 42).unwrap();
    assert_eq!(heap.read(ptr).unwrap(), 42);

    heap.free(ptr).unwrap();
    assert_eq!(
        heap.read(ptr),
        Err(HeapError::InvalidAccess(ptr)),
        "reading freed memory fails"
    );
    assert_heap_invariants(&heap);
}

#[test]
fn test_multiple_allocations_are_distinct() {
    let mut heap = SimulatedHeap::new(128);

    let ptr1 = heap.allocate(16).unwrap();
    let ptr2 = heap.allocate(24).unwrap();
    let ptr3 = heap.allocate(8).unwrap();

    assert!(ptr1 != ptr2 && ptr2 != ptr3 && ptr1 != ptr3);
    assert_eq!(heap.allocation_count(), 3);
    assert_heap_invariants(&heap);

    heap.write(ptr1, 1).unwrap();
    heap.write(ptr2, 2).unwrap();
    heap.write(ptr3, 3).unwrap();

    assert_eq!(heap.read(ptr1).unwrap(), 1);
    assert_eq!(heap.read(ptr2).unwrap(), 2);
    assert_eq!(heap.read(ptr3).unwrap(), 3);
}

#[test]
fn test_exact_fit_does_not_split() {
    let mut heap = SimulatedHeap::new(64);
    let ptr = heap.allocate(64).unwrap();
    assert_eq!(ptr, 0);
    assert_eq!(heap.blocks().len(), 1, "exact fit leaves a single block");
    assert_heap_invariants(&heap);
}

#[test]
fn test_split_leaves_remainder_free() {
    let mut heap = SimulatedHeap::new(64);
    heap.allocate(16).unwrap();

    assert_eq!(heap.blocks().len(), 2);
    let remainder = &heap.blocks()[1];
    assert!(remainder.is_free());
    assert_eq!(remainder.start(), 16);
    assert_eq!(remainder.size(), 48);
    assert_heap_invariants(&heap);
}

#[test]
fn test_coalescing_merges_adjacent_free_blocks() {
    let mut heap = SimulatedHeap::new(128);

    let ptr1 = heap.allocate(16).unwrap();
    let ptr2 = heap.allocate(16).unwrap();
    let ptr3 = heap.allocate(16).unwrap();
    let initial_blocks = heap.blocks().len();

    heap.free(ptr2).unwrap();
    heap.free(ptr1).unwrap();
    assert!(
        heap.blocks().len() < initial_blocks,
        "freeing neighbours must coalesce"
    );
    assert_heap_invariants(&heap);

    heap.free(ptr3).unwrap();
    assert_eq!(heap.blocks().len(), 1, "all blocks coalesce into one");
    assert!(heap.blocks()[0].is_free());
    assert_heap_invariants(&heap);
}

#[test]
fn test_free_returns_heap_to_original_boundaries() {
    let mut heap = SimulatedHeap::new(64);
    let before: Vec<_> = heap.blocks().to_vec();

    let ptr = heap.allocate(24).unwrap();
    heap.free(ptr).unwrap();

    assert_eq!(heap.blocks().to_vec(), before);
    assert_heap_invariants(&heap);
}

#[test]
fn test_out_of_memory_is_not_an_error() {
    let mut heap = SimulatedHeap::new(128);

    assert_eq!(heap.allocate(129), None, "oversized request returns None");

    let full = heap.allocate(128).expect("entire heap fits");
    assert_eq!(full, 0);
    assert_eq!(heap.allocate(1), None, "full heap cannot allocate");
    assert_heap_invariants(&heap);
}

#[test]
fn test_small_heap_exhaustion() {
    let mut heap = SimulatedHeap::new(8);
    assert_eq!(heap.allocate(8), Some(0));
    assert_eq!(heap.allocate(1), None);
    assert_heap_invariants(&heap);
}

#[test]
fn test_zero_size_allocation_is_rejected() {
    let mut heap = SimulatedHeap::new(64);
    assert_eq!(heap.allocate(0), None);
    assert_heap_invariants(&heap);
}

#[test]
fn test_invalid_free() {
    let mut heap = SimulatedHeap::new(128);

    assert_eq!(heap.free(999), Err(HeapError::InvalidFree(999)));

    let ptr = heap.allocate(16).unwrap();
    heap.free(ptr).unwrap();
    assert_eq!(
        heap.free(ptr),
        Err(HeapError::InvalidFree(ptr)),
        "double free fails"
    );
    assert_heap_invariants(&heap);
}

#[test]
fn test_free_of_interior_address_fails() {
    let mut heap = SimulatedHeap::new(64);
    let ptr = heap.allocate(16).unwrap();

    assert_eq!(heap.free(ptr + 1), Err(HeapError::InvalidFree(ptr + 1)));
    assert!(heap.is_valid(ptr), "failed free must not disturb the block");
    assert_heap_invariants(&heap);
}

#[test]
fn test_find_block_and_block_size() {
    let mut heap = SimulatedHeap::new(64);
    let ptr = heap.allocate(16).unwrap();

    let block = heap.find_block(ptr).expect("allocated block is findable");
    assert_eq!(block.start(), ptr);
    assert_eq!(block.size(), 16);
    assert_eq!(heap.block_size(ptr), Some(16));

    assert!(heap.find_block(ptr + 1).is_none(), "lookup is by exact start");
    assert!(heap.find_block(16).is_none(), "free blocks are not returned");

    heap.free(ptr).unwrap();
    assert!(heap.find_block(ptr).is_none());
    assert_eq!(heap.block_size(ptr), None);
}

#[test]
fn test_stats_track_occupancy() {
    let mut heap = SimulatedHeap::new(128);
    heap.allocate(32).unwrap();

    let stats = heap.stats();
    assert_eq!(stats.heap_size, 128);
    assert_eq!(stats.allocated_bytes, 32);
    assert_eq!(stats.free_bytes, 96);
    assert_eq!(stats.allocated_blocks, 1);
    assert_eq!(stats.free_blocks, 1);
    assert_eq!(stats.fragmentation(), 1);
    assert!((stats.usage_percentage - 25.0).abs() < 0.001);
}

#[test]
fn test_repeated_allocations_and_frees() {
    let mut heap = SimulatedHeap::new(128);

    for i in 0..100u32 {
        let ptr = heap.allocate(8).expect("allocation should succeed");
        heap.write(ptr, (i % 256) as u8).unwrap();
        assert_eq!(heap.read(ptr).unwrap(), (i % 256) as u8);
        heap.free(ptr).unwrap();
        assert_heap_invariants(&heap);
    }

    assert_eq!(heap.blocks().len(), 1, "heap returns to a single free block");
    assert!(heap.blocks()[0].is_free());
}

#[test]
fn test_complex_allocation_pattern() {
    let mut heap = SimulatedHeap::new(128);

    let sizes = [8, 16, 8, 16, 8, 16];
    let ptrs: Vec<usize> = sizes
        .iter()
        .map(|&size| heap.allocate(size).expect("allocation should succeed"))
        .collect();
    assert_heap_invariants(&heap);

    heap.free(ptrs[1]).unwrap();
    heap.free(ptrs[3]).unwrap();
    heap.free(ptrs[5]).unwrap();
    assert_heap_invariants(&heap);

    let new1 = heap.allocate(8).expect("freed space is reusable");
    let new2 = heap.allocate(12).expect("freed space is reusable");
    assert_heap_invariants(&heap);

    heap.write(new1, 123).unwrap();
    heap.write(new2, 45).unwrap();
    assert_eq!(heap.read(new1).unwrap(), 123);
    assert_eq!(heap.read(new2).unwrap(), 45);
}

#[test]
fn test_default_heap_uses_default_capacity() {
    let heap = SimulatedHeap::default();
    assert_eq!(heap.heap_size(), 256);
    assert_heap_invariants(&heap);
}

#[test]
fn test_allocator_trait_is_usable_as_an_object() {
    fn exhaust(allocator: &mut dyn Allocator, size: usize) -> Vec<usize> {
        let mut ptrs = Vec::new();
        while let Some(ptr) = allocator.allocate(size) {
            ptrs.push(ptr);
        }
        ptrs
    }

    let mut heap = SimulatedHeap::new(64);
    let ptrs = exhaust(&mut heap, 16);
    assert_eq!(ptrs, vec![0, 16, 32, 48]);

    let allocator: &mut dyn Allocator = &mut heap;
    assert!(allocator.is_valid(16));
    assert_eq!(allocator.block_size(16), Some(16));
    allocator.free(16).unwrap();
    assert!(!allocator.is_valid(16));
}

#[test]
fn test_heap_info_trait_reports_totals() {
    fn utilization<H: HeapInfo>(heap: &H) -> f64 {
        heap.stats().usage_percentage
    }

    let mut heap = SimulatedHeap::new(64);
    heap.allocate(16).unwrap();
    assert!((utilization(&heap) - 25.0).abs() < 0.001);

    let (total, allocated, free) = HeapInfo::info(&heap);
    assert_eq!((total, allocated, free), (64, 16, 48));
}

#[test]
fn test_fragmented_heap_keeps_invariants() {
    let mut heap = SimulatedHeap::new(128);

    let ptrs: Vec<usize> = (0..10)
        .map(|_| heap.allocate(8).expect("allocation should succeed"))
        .collect();

    // Free every other block so no two freed blocks can coalesce
    for ptr in ptrs.iter().skip(1).step_by(2) {
        heap.free(*ptr).unwrap();
    }
    assert_heap_invariants(&heap);

    let free_blocks = heap.blocks().iter().filter(|b| b.is_free()).count();
    assert!(free_blocks > 1, "heap should be visibly fragmented");
}
