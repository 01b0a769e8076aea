/*!
 * Heap Memory Access
 * Read and write operations on the simulated buffer
 */

use super::types::{HeapError, HeapResult};
use super::SimulatedHeap;
use crate::core::types::{Address, Size};
use log::{debug, warn};

impl SimulatedHeap {
    /// Write a byte at `address`.
    ///
    /// Fails with `InvalidAccess` unless the address lies inside a
    /// currently-allocated block.
    pub fn write(&mut self, address: Address, value: u8) -> HeapResult<()> {
        match self.containing_allocated_index(address) {
            Some(_) => {
                self.buffer[address] = value;
                debug!("Wrote byte at 0x{:x}", address);
                Ok(())
            }
            None => {
                warn!("Cannot write to free or invalid address 0x{:x}", address);
                Err(HeapError::InvalidAccess(address))
            }
        }
    }

    /// Read the byte at `address`.
    ///
    /// Fails with `InvalidAccess` unless the address lies inside a
    /// currently-allocated block.
    pub fn read(&self, address: Address) -> HeapResult<u8> {
        match self.containing_allocated_index(address) {
            Some(_) => {
                debug!("Read byte at 0x{:x}", address);
                Ok(self.buffer[address])
            }
            None => {
                warn!("Cannot read from free or invalid address 0x{:x}", address);
                Err(HeapError::InvalidAccess(address))
            }
        }
    }

    /// Write a slice of bytes starting at `address`.
    ///
    /// The whole range must lie inside a single allocated block.
    pub fn write_bytes(&mut self, address: Address, data: &[u8]) -> HeapResult<()> {
        let index = self
            .containing_allocated_index(address)
            .filter(|&i| address + data.len() <= self.blocks()[i].end())
            .ok_or(HeapError::InvalidAccess(address))?;

        let offset = address - self.blocks()[index].start();
        self.buffer[address..address + data.len()].copy_from_slice(data);
        debug!(
            "Wrote {} bytes at 0x{:x} (offset {} in block at 0x{:x})",
            data.len(),
            address,
            offset,
            self.blocks()[index].start()
        );
        Ok(())
    }

    /// Read `len` bytes starting at `address`.
    ///
    /// The whole range must lie inside a single allocated block.
    pub fn read_bytes(&self, address: Address, len: Size) -> HeapResult<Vec<u8>> {
        let index = self
            .containing_allocated_index(address)
            .filter(|&i| address + len <= self.blocks()[i].end())
            .ok_or(HeapError::InvalidAccess(address))?;

        debug!(
            "Read {} bytes at 0x{:x} (block at 0x{:x})",
            len,
            address,
            self.blocks()[index].start()
        );
        Ok(self.buffer[address..address + len].to_vec())
    }
}
