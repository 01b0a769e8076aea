/*!
 * Heap Layout Rendering
 * ASCII views of the block structure
 */

use crate::heap::SimulatedHeap;
use std::fmt::Write;

const ALLOCATED_GLYPH: char = '█';
const FREE_GLYPH: char = '░';
/// Bytes shown by the per-byte layout bar before truncating
const LAYOUT_WIDTH: usize = 50;

/// Per-byte bar of the heap with an address scale.
///
/// Allocated bytes render as `█`, free bytes as `░`; heaps larger than the
/// layout width are truncated with a byte-count tail.
pub fn render_layout(heap: &SimulatedHeap) -> String {
    let mut out = String::new();
    let shown = heap.heap_size().min(LAYOUT_WIDTH);

    out.push_str("HEAP MEMORY LAYOUT\n");
    let _ = writeln!(out, "{}", "═".repeat(60));

    out.push_str("Address: ");
    for address in (0..shown).step_by(5) {
        let _ = write!(out, "{:<5}", address);
    }
    out.push('\n');

    out.push_str("Memory:  ");
    for address in 0..shown {
        let allocated = heap
            .blocks()
            .iter()
            .any(|block| !block.is_free() && block.contains(address));
        out.push(if allocated { ALLOCATED_GLYPH } else { FREE_GLYPH });
    }
    if heap.heap_size() > LAYOUT_WIDTH {
        let _ = write!(out, "... (+{} more bytes)", heap.heap_size() - LAYOUT_WIDTH);
    }
    out.push('\n');
    out.push_str("Legend: █ = allocated, ░ = free\n");
    out
}

/// Numbered table of every block: start, size, status, and last byte
pub fn render_block_table(heap: &SimulatedHeap) -> String {
    let mut out = String::new();

    out.push_str("DETAILED BLOCK INFORMATION\n");
    let _ = writeln!(out, "{}", "═".repeat(60));
    let _ = writeln!(
        out,
        "{:<6} {:<8} {:<8} {:<14} {:<8}",
        "Block#", "Start", "Size", "Status", "End"
    );
    let _ = writeln!(out, "{}", "─".repeat(60));

    for (number, block) in heap.blocks().iter().enumerate() {
        let status = if block.is_free() {
            "[F] FREE"
        } else {
            "[A] ALLOCATED"
        };
        let _ = writeln!(
            out,
            "{:<6} {:<8} {:<8} {:<14} {:<8}",
            number,
            block.start(),
            block.size(),
            status,
            block.end() - 1
        );
    }
    out
}

/// Memory map with one proportional bar per block
pub fn render_memory_map(heap: &SimulatedHeap) -> String {
    let mut out = String::new();

    out.push_str("MEMORY MAP\n");
    let _ = writeln!(out, "{}", "═".repeat(60));

    // Scale bars so the whole heap spans roughly 40 characters
    let bytes_per_cell = (heap.heap_size() / 40).max(1);
    for block in heap.blocks() {
        let (status, glyph) = if block.is_free() {
            ("FREE", FREE_GLYPH)
        } else {
            ("USED", ALLOCATED_GLYPH)
        };
        let bar_length = (block.size() / bytes_per_cell).max(1);
        let bar: String = std::iter::repeat(glyph).take(bar_length).collect();
        let _ = writeln!(
            out,
            "0x{:04X} |{}| {} ({} bytes)",
            block.start(),
            bar,
            status,
            block.size()
        );
    }
    let _ = writeln!(out, "{}", "═".repeat(60));
    out
}
