//! Process-wide store geometry
//!
//! The block count and per-block size are fixed at startup and must not
//! change across a table's lifetime without a full reset.

use serde::{Deserialize, Serialize};

/// Default number of blocks in the virtual store
pub const DEFAULT_TOTAL_BLOCKS: usize = 1000;

/// Default block size in kilobytes
pub const DEFAULT_BLOCK_SIZE_KB: f64 = 4.0;

/// Immutable store geometry, passed to the table at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Total number of blocks in the store
    pub total_blocks: usize,

    /// Size of a single block in kilobytes
    pub block_size_kb: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            total_blocks: DEFAULT_TOTAL_BLOCKS,
            block_size_kb: DEFAULT_BLOCK_SIZE_KB,
        }
    }
}

impl StoreConfig {
    pub fn new(total_blocks: usize, block_size_kb: f64) -> Self {
        StoreConfig {
            total_blocks,
            block_size_kb,
        }
    }

    /// Number of blocks required to hold `size_kb` kilobytes
    ///
    /// Rounds up to whole blocks; every file occupies at least one block.
    pub fn blocks_needed(&self, size_kb: f64) -> usize {
        ((size_kb / self.block_size_kb).ceil() as usize).max(1)
    }
}
