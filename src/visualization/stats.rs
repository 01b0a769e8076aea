/*!
 * Heap Reports
 * Derived occupancy and reachability statistics
 */

use crate::core::types::Size;
use crate::gc::GarbageCollector;
use crate::heap::SimulatedHeap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;

/// Reachability partition of the heap under the current root set.
///
/// `capture` runs a mark phase (without sweeping) to classify every
/// allocated block as live or garbage, then clears the marks again, so the
/// heap is left exactly as it was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GcReport {
    pub heap_size: Size,
    pub live_bytes: Size,
    pub garbage_bytes: Size,
    pub free_bytes: Size,
    /// Share of the heap holding reachable data
    pub utilization: f64,
}

impl GcReport {
    pub fn capture(heap: &mut SimulatedHeap) -> Self {
        GarbageCollector::new().mark(heap);

        let mut live_bytes = 0;
        let mut garbage_bytes = 0;
        let mut free_bytes = 0;
        for block in heap.blocks() {
            if block.is_free() {
                free_bytes += block.size();
            } else if block.is_marked() {
                live_bytes += block.size();
            } else {
                garbage_bytes += block.size();
            }
        }

        for block in heap.blocks_mut() {
            block.unmark();
        }

        Self {
            heap_size: heap.heap_size(),
            live_bytes,
            garbage_bytes,
            free_bytes,
            utilization: live_bytes as f64 / heap.heap_size() as f64 * 100.0,
        }
    }
}

impl fmt::Display for GcReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "GC HEAP STATISTICS")?;
        writeln!(f, "{}", "═".repeat(40))?;
        writeln!(f, "Total Heap Size:   {} bytes", self.heap_size)?;
        writeln!(f, "Live Allocated:    {} bytes", self.live_bytes)?;
        writeln!(f, "Garbage Allocated: {} bytes", self.garbage_bytes)?;
        writeln!(f, "Free Memory:       {} bytes", self.free_bytes)?;
        writeln!(f, "Memory Utilization: {:.1}%", self.utilization)?;
        write!(f, "{}", "═".repeat(40))
    }
}

/// Occupancy summary with a usage bar
pub fn render_usage(heap: &SimulatedHeap) -> String {
    let stats = heap.stats();
    let mut out = String::new();

    out.push_str("MEMORY STATISTICS\n");
    let _ = writeln!(out, "{}", "═".repeat(40));
    let _ = writeln!(out, "Total Heap Size:    {} bytes", stats.heap_size);
    let _ = writeln!(
        out,
        "Allocated Memory:   {} bytes ({} blocks)",
        stats.allocated_bytes, stats.allocated_blocks
    );
    let _ = writeln!(
        out,
        "Free Memory:        {} bytes ({} blocks)",
        stats.free_bytes, stats.free_blocks
    );
    let _ = writeln!(out, "Memory Utilization: {:.1}%", stats.usage_percentage);
    let _ = writeln!(
        out,
        "Fragmentation:      {} free blocks",
        stats.fragmentation()
    );

    let bar_length = 20;
    let filled = (stats.usage_percentage / 100.0 * bar_length as f64) as usize;
    out.push_str("Usage: [");
    for cell in 0..bar_length {
        out.push(if cell < filled { '█' } else { '░' });
    }
    let _ = writeln!(out, "] {:.1}%", stats.usage_percentage);
    let _ = writeln!(out, "{}", "═".repeat(40));
    out
}
