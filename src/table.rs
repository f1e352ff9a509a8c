//! The block table
//!
//! Fixed-size array of block records; sole owner of block ownership state.
//! Blocks never move or get created/destroyed once the table is built.
//! Chain pointers form a singly linked sequence per file.

use crate::error::{AllocError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// File identifier assigned by the catalog
pub type FileId = u64;

/// A single block record
///
/// `next` is only meaningful while `owner` is present; it references the
/// next block in the owning file's chain, or is `None` at the chain end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Owning file, or `None` when free
    pub owner: Option<FileId>,

    /// Index of the next block in the same file's chain
    pub next: Option<usize>,
}

impl Block {
    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }
}

/// Read-only view of one block, as exposed by snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockView {
    pub index: usize,
    pub owner: Option<FileId>,
    pub next: Option<usize>,
}

/// The complete ordered set of blocks and their ownership state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockTable {
    blocks: Vec<Block>,
}

impl BlockTable {
    /// Create a table of `total_blocks` free blocks
    pub fn new(total_blocks: usize) -> Self {
        BlockTable {
            blocks: vec![Block::default(); total_blocks],
        }
    }

    /// Rebuild a table from persisted state
    ///
    /// Applies each supplied view at its index and fills only the indices
    /// missing from the persisted state with free blocks. Supplied entries
    /// are never altered, which makes repopulation restart-safe.
    pub fn restore(total_blocks: usize, views: &[BlockView]) -> Self {
        let mut table = BlockTable::new(total_blocks);
        for view in views {
            if view.index < total_blocks {
                table.blocks[view.index] = Block {
                    owner: view.owner,
                    next: view.next,
                };
            } else {
                tracing::warn!(
                    index = view.index,
                    total_blocks,
                    "Discarding persisted block outside table range"
                );
            }
        }
        table
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Assign `ordered` to `file_id` and link the chain pointers
    ///
    /// For `[b0, b1, .., bk]` sets `next(bi) = b(i+1)` and `next(bk) = None`.
    /// The caller guarantees every index was free or already owned by
    /// `file_id`; no overlap check happens here. That contract is what lets
    /// the compactor replace a file's blocks in place.
    pub fn occupy(&mut self, file_id: FileId, ordered: &[usize]) -> Result<()> {
        for &index in ordered {
            if index >= self.blocks.len() {
                return Err(AllocError::InvalidBlockIndex(index));
            }
        }

        for (i, &index) in ordered.iter().enumerate() {
            self.blocks[index] = Block {
                owner: Some(file_id),
                next: ordered.get(i + 1).copied(),
            };
        }
        Ok(())
    }

    /// Release every block owned by `file_id`
    ///
    /// Returns the number of blocks freed; 0 when the file owned nothing.
    pub fn free(&mut self, file_id: FileId) -> usize {
        let mut freed = 0;
        for block in &mut self.blocks {
            if block.owner == Some(file_id) {
                *block = Block::default();
                freed += 1;
            }
        }
        freed
    }

    /// Release every block in the table
    pub fn free_all(&mut self) {
        for block in &mut self.blocks {
            *block = Block::default();
        }
    }

    /// Read-only view of all blocks in index order
    pub fn snapshot(&self) -> Vec<BlockView> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(index, block)| BlockView {
                index,
                owner: block.owner,
                next: block.next,
            })
            .collect()
    }

    /// Number of free blocks
    pub fn free_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_free()).count()
    }

    /// Indices owned by `file_id`, in ascending order
    pub fn owned_by(&self, file_id: FileId) -> Vec<usize> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.owner == Some(file_id))
            .map(|(i, _)| i)
            .collect()
    }

    /// Walk a file's chain starting from its lowest-index owned block
    ///
    /// Stops on a broken link (free target, foreign owner, out of range) or
    /// after visiting more blocks than the file owns, so a corrupt cycle
    /// cannot loop forever.
    pub fn chain_of(&self, file_id: FileId) -> Vec<usize> {
        let owned = self.owned_by(file_id);
        let mut chain = Vec::with_capacity(owned.len());
        let mut cursor = owned.first().copied();

        while let Some(index) = cursor {
            if chain.len() > owned.len() {
                break;
            }
            match self.blocks.get(index) {
                Some(block) if block.owner == Some(file_id) => {
                    chain.push(index);
                    cursor = block.next;
                }
                _ => break,
            }
        }
        chain
    }

    /// Verify every file's blocks form one simple chain
    ///
    /// For each owner the chain walked from the lowest owned index must
    /// visit exactly the owned set, each block once.
    pub fn verify_chains(&self) -> Result<()> {
        let mut owners: HashMap<FileId, usize> = HashMap::new();
        for block in &self.blocks {
            if let Some(owner) = block.owner {
                *owners.entry(owner).or_insert(0) += 1;
            }
        }

        for (&file_id, &count) in &owners {
            let chain = self.chain_of(file_id);
            if chain.len() != count {
                return Err(AllocError::InvalidBlockIndex(
                    chain.last().copied().unwrap_or(0),
                ));
            }
        }
        Ok(())
    }
}
