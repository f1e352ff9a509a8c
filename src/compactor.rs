//! Compaction (defragmentation)
//!
//! Clears all ownership, then replays the catalog in ascending creation
//! order, packing each file into the next contiguous run from a cursor
//! starting at block 0. Re-running with an unchanged catalog produces an
//! identical table. Compaction does not guarantee a zero fragmentation
//! score: compacted files stay byte-adjacent with differing owners, and the
//! metric counts exactly that adjacency.

use crate::catalog::FileCatalog;
use crate::config::StoreConfig;
use crate::error::Result;
use crate::table::{BlockTable, FileId};

/// Outcome of one compaction run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompactionReport {
    /// Files packed into their new runs
    pub relocated: usize,

    /// Blocks in use after compaction (the final cursor position)
    pub blocks_in_use: usize,

    /// Files skipped because their size record did not resolve
    ///
    /// The original behavior was to skip silently; surfacing the ids turns
    /// a swallowed data-integrity problem into a recoverable warning.
    pub skipped: Vec<FileId>,
}

/// Rebuild the table, assigning each file a fresh contiguous run
pub fn defragment(
    table: &mut BlockTable,
    config: &StoreConfig,
    catalog: &dyn FileCatalog,
) -> Result<CompactionReport> {
    table.free_all();

    let mut report = CompactionReport::default();
    let mut cursor = 0usize;

    for id in catalog.ids_in_creation_order() {
        let Some(size_kb) = catalog.size_kb(id) else {
            tracing::warn!(file_id = id, "Skipping file with no size record during compaction");
            report.skipped.push(id);
            continue;
        };

        let count = config.blocks_needed(size_kb);
        let run: Vec<usize> = (cursor..cursor + count).collect();
        table.occupy(id, &run)?;
        cursor += count;
        report.relocated += 1;
    }

    report.blocks_in_use = cursor;
    Ok(report)
}
