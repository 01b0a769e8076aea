/*!
 * Root Set
 * Externally supplied starting points for the mark phase
 */

use crate::core::types::Address;
use ahash::HashSet;

/// Unordered set of block start addresses treated as reachable without
/// further analysis.
///
/// Entries are plain addresses, not handles: an entry whose block has been
/// freed or never existed is tolerated and silently ignored by the
/// collector.
#[derive(Debug, Clone, Default)]
pub struct RootSet {
    roots: HashSet<Address>,
}

impl RootSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block start address to the root set.
    /// Returns false when the address was already present.
    pub fn add(&mut self, address: Address) -> bool {
        self.roots.insert(address)
    }

    /// Remove an address from the root set.
    /// Returns false when the address was not present.
    pub fn remove(&mut self, address: Address) -> bool {
        self.roots.remove(&address)
    }

    pub fn contains(&self, address: Address) -> bool {
        self.roots.contains(&address)
    }

    pub fn clear(&mut self) {
        self.roots.clear();
    }

    /// Iterate over the root addresses in no particular order
    pub fn iter(&self) -> impl Iterator<Item = Address> + '_ {
        self.roots.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
