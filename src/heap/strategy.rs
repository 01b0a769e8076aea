/*!
 * Placement Strategies
 * Selection rules for choosing among candidate free blocks
 */

use super::block::Block;
use super::types::HeapError;
use crate::core::types::Size;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placement policy used by `allocate` to pick a free block.
///
/// Each policy is a pure selector over the current block list: given the
/// blocks and a requested size, it proposes the index of a free block of at
/// least that size, or `None` when no free block qualifies. Alignment
/// padding and splitting happen afterwards in the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    /// First free block large enough, in address order
    FirstFit,
    /// Smallest free block large enough; earliest wins ties
    BestFit,
    /// Largest free block large enough; earliest wins ties
    WorstFit,
    /// First fit starting from the cursor left by the previous allocation,
    /// wrapping around the end of the block list
    NextFit,
}

impl AllocationStrategy {
    /// Choose the index of the free block to allocate from.
    ///
    /// `cursor` is only consulted by next-fit; the other policies ignore it.
    pub fn select(&self, blocks: &[Block], request: Size, cursor: usize) -> Option<usize> {
        match self {
            Self::FirstFit => Self::first_fit(blocks, request),
            Self::BestFit => Self::best_fit(blocks, request),
            Self::WorstFit => Self::worst_fit(blocks, request),
            Self::NextFit => Self::next_fit(blocks, request, cursor),
        }
    }

    fn first_fit(blocks: &[Block], request: Size) -> Option<usize> {
        blocks
            .iter()
            .position(|block| block.is_free() && block.size() >= request)
    }

    fn best_fit(blocks: &[Block], request: Size) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (index, block) in blocks.iter().enumerate() {
            if !block.is_free() || block.size() < request {
                continue;
            }
            if best.map_or(true, |b| block.size() < blocks[b].size()) {
                best = Some(index);
            }
        }
        best
    }

    fn worst_fit(blocks: &[Block], request: Size) -> Option<usize> {
        let mut worst: Option<usize> = None;
        for (index, block) in blocks.iter().enumerate() {
            if !block.is_free() || block.size() < request {
                continue;
            }
            if worst.map_or(true, |w| block.size() > blocks[w].size()) {
                worst = Some(index);
            }
        }
        worst
    }

    fn next_fit(blocks: &[Block], request: Size, cursor: usize) -> Option<usize> {
        let count = blocks.len();
        // The cursor may be stale after block inserts and removals; the
        // modulo wrap keeps any value usable.
        (0..count)
            .map(|offset| (cursor + offset) % count)
            .find(|&index| blocks[index].is_free() && blocks[index].size() >= request)
    }
}

impl Default for AllocationStrategy {
    fn default() -> Self {
        Self::FirstFit
    }
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::FirstFit => "first_fit",
            Self::BestFit => "best_fit",
            Self::WorstFit => "worst_fit",
            Self::NextFit => "next_fit",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for AllocationStrategy {
    type Err = HeapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_fit" => Ok(Self::FirstFit),
            "best_fit" => Ok(Self::BestFit),
            "worst_fit" => Ok(Self::WorstFit),
            "next_fit" => Ok(Self::NextFit),
            other => Err(HeapError::UnknownStrategy(other.to_string())),
        }
    }
}
