/*!
 * simheap - Simulated Heap with Tracing Garbage Collection
 *
 * A pedagogical heap simulator: allocation and deallocation over a
 * fixed-size byte buffer with selectable placement policies (first-fit,
 * best-fit, worst-fit, next-fit), 8-byte address alignment, free-block
 * coalescing, and a mark-and-sweep collector driven by an external root set
 * and per-block reference lists.
 *
 * No real OS memory is touched: addresses are indices into a simulated
 * buffer, and block "references" are plain addresses rather than owning
 * handles. The heap is a single-threaded abstract machine; callers that
 * share one across threads must confine it to a single thread or wrap it in
 * an external mutex.
 */

pub mod core;
pub mod gc;
pub mod heap;
pub mod visualization;

pub use gc::{GarbageCollector, GcStats, RootSet};
pub use heap::{
    AllocationStrategy, Allocator, Block, HeapError, HeapInfo, HeapResult, HeapStats, SimulatedHeap,
};
pub use visualization::GcReport;
