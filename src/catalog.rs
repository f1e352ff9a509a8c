//! File catalog
//!
//! The catalog owns file metadata; the block table only ever sees file ids.
//! The compactor consumes the catalog read-only through the [`FileCatalog`]
//! trait, so callers can replay files from any backing store.

use crate::error::{AllocError, Result};
use crate::strategy::Strategy;
use crate::table::FileId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata for one simulated file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Catalog-assigned identifier, ascending in creation order
    pub id: FileId,

    /// Display name
    pub name: String,

    /// File size in kilobytes
    pub size_kb: f64,

    /// Strategy the file was allocated under
    pub strategy: Strategy,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Read-only view of the catalog consumed by the compactor
pub trait FileCatalog {
    /// File ids in ascending creation order
    fn ids_in_creation_order(&self) -> Vec<FileId>;

    /// Stored size for a file, if its record still resolves
    fn size_kb(&self, id: FileId) -> Option<f64>;
}

/// In-memory catalog with autoincrementing ids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCatalog {
    files: BTreeMap<FileId, FileRecord>,
    next_id: FileId,
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCatalog {
    pub fn new() -> Self {
        MemoryCatalog {
            files: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Register a file and return its record
    pub fn insert(&mut self, name: impl Into<String>, size_kb: f64, strategy: Strategy) -> FileRecord {
        let record = FileRecord {
            id: self.next_id,
            name: name.into(),
            size_kb,
            strategy,
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.files.insert(record.id, record.clone());
        record
    }

    /// Remove a file's record
    pub fn remove(&mut self, id: FileId) -> Result<FileRecord> {
        self.files.remove(&id).ok_or(AllocError::FileNotFound(id))
    }

    pub fn get(&self, id: FileId) -> Option<&FileRecord> {
        self.files.get(&id)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Records in ascending creation order
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.values()
    }

    /// Drop every record, keeping the id sequence monotonic
    pub fn clear(&mut self) {
        self.files.clear();
    }
}

impl FileCatalog for MemoryCatalog {
    fn ids_in_creation_order(&self) -> Vec<FileId> {
        // BTreeMap iterates keys ascending; ids ascend in creation order
        self.files.keys().copied().collect()
    }

    fn size_kb(&self, id: FileId) -> Option<f64> {
        self.files.get(&id).map(|record| record.size_kb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_ascending_ids() {
        let mut catalog = MemoryCatalog::new();
        let a = catalog.insert("a.txt", 10.0, Strategy::Contiguous);
        let b = catalog.insert("b.txt", 6.0, Strategy::Linked);

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(catalog.ids_in_creation_order(), vec![1, 2]);
    }

    #[test]
    fn test_ids_stay_monotonic_after_delete() {
        let mut catalog = MemoryCatalog::new();
        let a = catalog.insert("a.txt", 4.0, Strategy::Contiguous);
        catalog.remove(a.id).unwrap();
        let b = catalog.insert("b.txt", 4.0, Strategy::Contiguous);

        assert_eq!(b.id, 2);
    }

    #[test]
    fn test_remove_unknown_file() {
        let mut catalog = MemoryCatalog::new();
        let result = catalog.remove(42);
        assert!(matches!(result, Err(AllocError::FileNotFound(42))));
    }

    #[test]
    fn test_size_lookup() {
        let mut catalog = MemoryCatalog::new();
        let a = catalog.insert("a.txt", 10.5, Strategy::Indexed);

        assert_eq!(catalog.size_kb(a.id), Some(10.5));
        assert_eq!(catalog.size_kb(999), None);
    }

    #[test]
    fn test_record_serialization() {
        let mut catalog = MemoryCatalog::new();
        let record = catalog.insert("a.txt", 12.0, Strategy::Linked);

        let json = serde_json::to_string(&record).unwrap();
        let restored: FileRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
    }
}
