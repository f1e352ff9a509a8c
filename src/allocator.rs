//! Block search policies
//!
//! Pure searches over the table: finding blocks never mutates ownership.
//! The caller must hold the table exclusively across search-then-occupy,
//! otherwise two files can race onto the same blocks.

use crate::error::{AllocError, Result};
use crate::strategy::Strategy;
use crate::table::BlockTable;

/// Find `count` assignable block indices under `strategy`
///
/// Returns indices in the order they must be chained. On failure the table
/// is untouched and no partial result escapes.
pub fn find_blocks(table: &BlockTable, strategy: Strategy, count: usize) -> Result<Vec<usize>> {
    match strategy {
        Strategy::Contiguous => find_contiguous(table, count),
        // Indexed allocation is simulated with the linked search; only the
        // file's strategy label differs.
        Strategy::Linked | Strategy::Indexed => find_scattered(table, count),
    }
}

/// Leftmost first-fit run of `count` consecutive free blocks
fn find_contiguous(table: &BlockTable, count: usize) -> Result<Vec<usize>> {
    let mut run_start = 0;
    let mut run_len = 0;
    let mut largest_run = 0;

    for (index, block) in table.iter().enumerate() {
        if block.is_free() {
            if run_len == 0 {
                run_start = index;
            }
            run_len += 1;
            largest_run = largest_run.max(run_len);
            if run_len == count {
                return Ok((run_start..run_start + count).collect());
            }
        } else {
            run_len = 0;
        }
    }

    Err(AllocError::InsufficientContiguousSpace {
        needed: count,
        largest_run,
    })
}

/// First `count` free blocks in ascending index order
fn find_scattered(table: &BlockTable, count: usize) -> Result<Vec<usize>> {
    let mut found = Vec::with_capacity(count);
    for (index, block) in table.iter().enumerate() {
        if block.is_free() {
            found.push(index);
            if found.len() == count {
                return Ok(found);
            }
        }
    }

    Err(AllocError::InsufficientFreeBlocks {
        needed: count,
        available: found.len(),
    })
}
