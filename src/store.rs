//! Main block store API
//!
//! [`BlockStore`] wraps the block table in a `parking_lot::RwLock` and is
//! the only path through which callers mutate it. Each compound operation
//! (search-then-occupy, free-on-delete, compaction, reset) runs under one
//! write guard, so no other table mutation can interleave inside it and a
//! block can never end up assigned to two files. Readers take the shared
//! guard and always observe a consistent point-in-time table.

use crate::allocator;
use crate::catalog::FileCatalog;
use crate::compactor::{self, CompactionReport};
use crate::config::StoreConfig;
use crate::error::Result;
use crate::fragmentation;
use crate::journal::{Action, Journal};
use crate::strategy::Strategy;
use crate::table::{BlockTable, BlockView, FileId};
use parking_lot::RwLock;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Shared block store
///
/// All operations are synchronous and run to completion or fail outright;
/// there is no background processing and no internal retry.
pub struct BlockStore {
    config: StoreConfig,
    table: RwLock<BlockTable>,
    journal: Journal,
}

impl BlockStore {
    /// Create a store with every block free
    pub fn new(config: StoreConfig) -> Self {
        BlockStore {
            table: RwLock::new(BlockTable::new(config.total_blocks)),
            config,
            journal: Journal::new(),
        }
    }

    /// Rebuild a store from persisted block views
    ///
    /// Indices missing from `views` come up free; present entries are kept
    /// as persisted.
    pub fn restore(config: StoreConfig, views: &[BlockView]) -> Self {
        BlockStore {
            table: RwLock::new(BlockTable::restore(config.total_blocks, views)),
            config,
            journal: Journal::new(),
        }
    }

    /// Load persisted block views from a JSON state file
    pub fn load<P: AsRef<Path>>(config: StoreConfig, path: P) -> Result<Self> {
        let file = File::open(path)?;
        let views: Vec<BlockView> = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self::restore(config, &views))
    }

    /// Persist the current block table as a JSON state file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let views = self.table.read().snapshot();
        let file = File::create(path)?;
        serde_json::to_writer(file, &views)?;
        Ok(())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn total_blocks(&self) -> usize {
        self.config.total_blocks
    }

    pub fn free_blocks(&self) -> usize {
        self.table.read().free_count()
    }

    /// Search for blocks and occupy them as one atomic step
    ///
    /// Derives the block count from `size_kb`, runs the strategy's search,
    /// and records ownership and chain pointers, all under a single write
    /// guard. On failure the table is untouched.
    pub fn allocate(&self, file_id: FileId, size_kb: f64, strategy: Strategy) -> Result<Vec<usize>> {
        let needed = self.config.blocks_needed(size_kb);

        let indices = {
            let mut table = self.table.write();
            let indices = allocator::find_blocks(&table, strategy, needed)?;
            table.occupy(file_id, &indices)?;
            indices
        };

        self.journal.record(
            Action::Allocate,
            format!(
                "Allocated {} blocks to file {} using {} allocation",
                indices.len(),
                file_id,
                strategy
            ),
        );
        Ok(indices)
    }

    /// Release every block owned by `file_id`
    ///
    /// Returns the number of blocks freed; a file owning nothing is a no-op.
    pub fn release(&self, file_id: FileId) -> usize {
        let freed = self.table.write().free(file_id);
        self.journal.record(
            Action::Release,
            format!("Released {} blocks of file {}", freed, file_id),
        );
        freed
    }

    /// Owner-adjacency fragmentation percentage in `[0, 100]`
    pub fn fragmentation_percent(&self) -> f64 {
        fragmentation::fragmentation_percent(&self.table.read())
    }

    /// Rebuild the table, packing each catalog file into a contiguous run
    pub fn defragment(&self, catalog: &dyn FileCatalog) -> Result<CompactionReport> {
        let report = {
            let mut table = self.table.write();
            compactor::defragment(&mut table, &self.config, catalog)?
        };

        self.journal.record(
            Action::Defragment,
            format!(
                "Defragmentation complete: {} files packed into {} blocks",
                report.relocated, report.blocks_in_use
            ),
        );
        Ok(report)
    }

    /// Read-only view of all blocks in index order
    pub fn snapshot(&self) -> Vec<BlockView> {
        self.table.read().snapshot()
    }

    /// Return every block to free
    ///
    /// Clears the journal first, then records the reset. Deleting catalog
    /// records is the caller's responsibility.
    pub fn reset(&self) {
        self.table.write().free_all();
        self.journal.clear();
        self.journal
            .record(Action::Reset, "System reset: block table reinitialized");
    }
}
