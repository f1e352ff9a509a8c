use crate::table::FileId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AllocError {
    #[error("Not enough contiguous space: needed {needed} blocks, largest free run is {largest_run}")]
    InsufficientContiguousSpace { needed: usize, largest_run: usize },

    #[error("Not enough free blocks: needed {needed}, only {available} available")]
    InsufficientFreeBlocks { needed: usize, available: usize },

    #[error("Invalid allocation strategy: {0}")]
    InvalidStrategy(String),

    #[error("File not found: {0}")]
    FileNotFound(FileId),

    #[error("Block index out of range: {0}")]
    InvalidBlockIndex(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AllocError>;
