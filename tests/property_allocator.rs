//! Property-based tests for allocator correctness
//!
//! Uses proptest to verify search and table invariants across many random
//! scenarios.

use allocsim::{allocator, BlockStore, BlockTable, MemoryCatalog, StoreConfig, Strategy};
use proptest::prelude::*;
use std::collections::HashSet;

/// Build a table with the given occupancy pattern, each used block owned by
/// its own one-block file
fn table_from_pattern(pattern: &[bool]) -> BlockTable {
    let mut table = BlockTable::new(pattern.len());
    for (index, &used) in pattern.iter().enumerate() {
        if used {
            table.occupy(1000 + index as u64, &[index]).unwrap();
        }
    }
    table
}

proptest! {
    #[test]
    fn prop_no_double_allocation(
        sizes in prop::collection::vec(1.0f64..100.0, 1..40)
    ) {
        let store = BlockStore::new(StoreConfig::default());
        let mut all_blocks = HashSet::new();

        for (idx, &size_kb) in sizes.iter().enumerate() {
            let strategy = match idx % 3 {
                0 => Strategy::Contiguous,
                1 => Strategy::Linked,
                _ => Strategy::Indexed,
            };
            let Ok(blocks) = store.allocate(idx as u64, size_kb, strategy) else {
                continue; // store full; failed search must not mutate
            };

            for &block in &blocks {
                prop_assert!(
                    all_blocks.insert(block),
                    "Block {} allocated twice",
                    block
                );
            }
        }

        prop_assert_eq!(store.free_blocks(), 1000 - all_blocks.len());
    }

    #[test]
    fn prop_scattered_result_strictly_ascending(
        pattern in prop::collection::vec(any::<bool>(), 1..200),
        count in 1usize..50
    ) {
        let table = table_from_pattern(&pattern);
        let free = pattern.iter().filter(|&&used| !used).count();

        match allocator::find_blocks(&table, Strategy::Linked, count) {
            Ok(blocks) => {
                prop_assert_eq!(blocks.len(), count);
                for pair in blocks.windows(2) {
                    prop_assert!(pair[0] < pair[1]);
                }
                for &b in &blocks {
                    prop_assert!(table.get(b).unwrap().is_free());
                }
            }
            Err(_) => prop_assert!(free < count),
        }
    }

    #[test]
    fn prop_contiguous_result_is_leftmost_fit(
        pattern in prop::collection::vec(any::<bool>(), 1..200),
        count in 1usize..20
    ) {
        let table = table_from_pattern(&pattern);

        // Naive reference: first window of `count` free blocks
        let expected = (0..pattern.len().saturating_sub(count - 1))
            .find(|&start| pattern[start..start + count].iter().all(|&used| !used));

        match allocator::find_blocks(&table, Strategy::Contiguous, count) {
            Ok(blocks) => {
                prop_assert_eq!(Some(blocks[0]), expected);
                for pair in blocks.windows(2) {
                    prop_assert_eq!(pair[1], pair[0] + 1);
                }
            }
            Err(_) => prop_assert!(expected.is_none()),
        }
    }

    #[test]
    fn prop_release_restores_free_count(
        sizes in prop::collection::vec(1.0f64..50.0, 1..20)
    ) {
        let store = BlockStore::new(StoreConfig::default());
        let mut allocated = Vec::new();

        for (idx, &size_kb) in sizes.iter().enumerate() {
            if store.allocate(idx as u64, size_kb, Strategy::Linked).is_ok() {
                allocated.push(idx as u64);
            }
        }

        for id in allocated {
            store.release(id);
        }
        prop_assert_eq!(store.free_blocks(), 1000);
    }

    #[test]
    fn prop_chains_always_intact(
        sizes in prop::collection::vec(1.0f64..60.0, 1..25),
        delete_mask in prop::collection::vec(any::<bool>(), 25)
    ) {
        let store = BlockStore::new(StoreConfig::default());
        let mut catalog = MemoryCatalog::new();

        for (idx, &size_kb) in sizes.iter().enumerate() {
            let strategy = if idx % 2 == 0 { Strategy::Contiguous } else { Strategy::Linked };
            let record = catalog.insert(format!("f{}", idx), size_kb, strategy);
            if store.allocate(record.id, size_kb, strategy).is_err() {
                catalog.remove(record.id).unwrap();
            }
        }

        let ids: Vec<_> = catalog.records().map(|r| r.id).collect();
        for (id, &delete) in ids.iter().zip(&delete_mask) {
            if delete {
                store.release(*id);
                catalog.remove(*id).unwrap();
            }
        }

        store.defragment(&catalog).unwrap();

        let snapshot = store.snapshot();
        let table = BlockTable::restore(snapshot.len(), &snapshot);
        table.verify_chains().unwrap();

        // Each surviving file owns exactly its required block count
        let config = StoreConfig::default();
        for record in catalog.records() {
            prop_assert_eq!(
                table.owned_by(record.id).len(),
                config.blocks_needed(record.size_kb)
            );
        }
    }

    #[test]
    fn prop_defragment_idempotent(
        sizes in prop::collection::vec(1.0f64..80.0, 0..20)
    ) {
        let store = BlockStore::new(StoreConfig::default());
        let mut catalog = MemoryCatalog::new();
        for (idx, &size_kb) in sizes.iter().enumerate() {
            catalog.insert(format!("f{}", idx), size_kb, Strategy::Linked);
        }

        if store.defragment(&catalog).is_ok() {
            let first = store.snapshot();
            store.defragment(&catalog).unwrap();
            prop_assert_eq!(store.snapshot(), first);
        }
    }
}
