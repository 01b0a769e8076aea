/*!
 * simheap - Demonstration Driver
 *
 * Walks a small heap through the full lifecycle:
 * - best-fit allocation with 8-byte alignment
 * - rooting one block and letting the rest become garbage
 * - two mark-and-sweep cycles, with visualizations between the steps
 */

use log::info;
use simheap::visualization::{layout, stats};
use simheap::{AllocationStrategy, GarbageCollector, GcReport, SimulatedHeap};

fn main() {
    env_logger::init();

    info!("Simulated heap demo starting");

    // A 32-byte heap keeps every block visible in the per-byte layout
    let mut heap = SimulatedHeap::with_strategy(32, AllocationStrategy::BestFit);
    let mut gc = GarbageCollector::new();

    let a = heap.allocate(8).expect("first allocation should fit");
    let b = heap.allocate(8).expect("second allocation should fit");

    // Only `a` is rooted; everything else is garbage from the collector's
    // point of view
    heap.root_set_mut().add(a);

    println!("{}", layout::render_layout(&heap));
    println!("{}", layout::render_block_table(&heap));
    println!("{}", GcReport::capture(&mut heap));

    // A third allocation, then drop `b` manually
    let _c = heap.allocate(4).expect("third allocation should fit");
    heap.free(b).expect("b is allocated");

    // `c` was never rooted, so the collector reclaims it
    let cycle = gc.collect(&mut heap);
    println!(
        "First collection: {}",
        serde_json::to_string(&cycle).expect("stats serialize")
    );
    println!("{}", stats::render_usage(&heap));

    // Unroot `a` and collect again; the heap drains completely
    heap.root_set_mut().remove(a);
    let cycle = gc.collect(&mut heap);
    println!(
        "Second collection: {}",
        serde_json::to_string(&cycle).expect("stats serialize")
    );

    println!("{}", layout::render_memory_map(&heap));

    info!("Simulated heap demo complete");
}
