//! allocsim — file-allocation strategy simulator
//!
//! Simulates classic file-allocation strategies over a fixed-size virtual
//! block store, for visualizing operating-system storage management.
//!
//! ## Features
//!
//! - **Fixed block table**: ownership and chain pointers for every block
//! - **Three strategies**: `contiguous` (leftmost first-fit run), `linked`
//!   and `indexed` (scattered ascending collect; indexed is recorded as a
//!   label only, no separate index-block structure is built)
//! - **Fragmentation metric**: owner-adjacency transitions over the table
//! - **Compaction**: replays the catalog in creation order into contiguous
//!   runs from block 0
//! - **Action journal**: timestamped record of every mutating operation
//!
//! ## Example
//!
//! ```rust
//! use allocsim::{BlockStore, MemoryCatalog, StoreConfig, Strategy};
//!
//! let store = BlockStore::new(StoreConfig::default()); // 1000 x 4KB blocks
//! let mut catalog = MemoryCatalog::new();
//!
//! // A 10KB file needs 3 blocks; on an empty store they start at 0
//! let file = catalog.insert("notes.txt", 10.0, Strategy::Contiguous);
//! let blocks = store.allocate(file.id, file.size_kb, file.strategy).unwrap();
//! assert_eq!(blocks, vec![0, 1, 2]);
//!
//! // Adjacent files with different owners register as fragmentation
//! let other = catalog.insert("data.bin", 6.0, Strategy::Contiguous);
//! store.allocate(other.id, other.size_kb, other.strategy).unwrap();
//! assert_eq!(store.fragmentation_percent(), 0.1);
//!
//! // Compaction packs files back-to-back in creation order
//! store.defragment(&catalog).unwrap();
//! ```
//!
//! ## Concurrency
//!
//! [`BlockStore`] serializes every compound mutation (search-then-occupy,
//! release, compaction, reset) under a single write guard. Snapshots and
//! fragmentation queries run concurrently on the shared guard and always
//! see a consistent table.

pub mod allocator;
pub mod catalog;
pub mod compactor;
pub mod config;
pub mod error;
pub mod fragmentation;
pub mod journal;
pub mod store;
pub mod strategy;
pub mod table;

// Re-export commonly used types
pub use catalog::{FileCatalog, FileRecord, MemoryCatalog};
pub use compactor::CompactionReport;
pub use config::{StoreConfig, DEFAULT_BLOCK_SIZE_KB, DEFAULT_TOTAL_BLOCKS};
pub use error::{AllocError, Result};
pub use journal::{Action, Journal, JournalEntry};
pub use store::BlockStore;
pub use strategy::Strategy;
pub use table::{Block, BlockTable, BlockView, FileId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
