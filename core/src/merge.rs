//! Merge-dedupe and tombstone filtering.
//!
//! This is the reconciliation core. A server-fetched collection and a
//! locally-held collection of the same entity kind are combined into one
//! ordered sequence with exactly one element per id.
//!
//! # Algorithm
//!
//! 1. Walk the first sequence, then the second
//! 2. Keep the first occurrence of every id, drop later ones
//! 3. Order is concatenation order of the kept elements
//!
//! Which sequence comes first is the call site's policy: pass the server
//! collection first to let server instances win, or existing state first to
//! preserve locally-added entries across a refetch.

use crate::{entity::Identified, tombstone::TombstoneSet};
use std::collections::HashSet;

/// Union of two sequences keyed by id, first occurrence wins.
///
/// Inputs are not mutated; the output is a fresh sequence containing every
/// distinct id exactly once, in concatenation order.
pub fn merge_by_id<T: Identified + Clone>(first: &[T], second: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(first.len() + second.len());
    let mut merged = Vec::with_capacity(first.len() + second.len());

    for item in first.iter().chain(second.iter()) {
        if seen.insert(item.id()) {
            merged.push(item.clone());
        }
    }

    merged
}

/// Drop every element whose id is tombstoned.
///
/// Absent ids are simply omitted, never an error, and applying the same set
/// twice yields the same result as once.
pub fn filter_deleted<T: Identified + Clone>(items: &[T], deleted: &TombstoneSet) -> Vec<T> {
    items
        .iter()
        .filter(|item| !deleted.contains(item.id()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Album;

    fn album(id: i64, title: &str) -> Album {
        Album {
            id,
            user_id: 1,
            title: title.into(),
        }
    }

    #[test]
    fn merge_keeps_server_instance_on_duplicate_id() {
        let server = vec![album(1, "one"), album(2, "two")];
        let local = vec![album(2, "two (local)"), album(3, "three")];

        let merged = merge_by_id(&server, &local);

        assert_eq!(
            merged.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        // First occurrence wins: the server's id 2 is retained.
        assert_eq!(merged[1].title, "two");
    }

    #[test]
    fn merge_with_empty_sides() {
        let albums = vec![album(1, "one"), album(2, "two")];

        assert_eq!(merge_by_id(&albums, &[]), albums);
        assert_eq!(merge_by_id(&[], &albums), albums);
        assert!(merge_by_id::<Album>(&[], &[]).is_empty());
    }

    #[test]
    fn merge_dedupes_within_one_side() {
        let noisy = vec![album(1, "first"), album(1, "second"), album(2, "two")];

        let merged = merge_by_id(&noisy, &[]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].title, "first");
    }

    #[test]
    fn merge_does_not_mutate_inputs() {
        let server = vec![album(1, "one")];
        let local = vec![album(1, "one (local)")];

        let _ = merge_by_id(&server, &local);

        assert_eq!(server[0].title, "one");
        assert_eq!(local[0].title, "one (local)");
    }

    #[test]
    fn filter_drops_exactly_tombstoned_ids() {
        let albums = vec![album(1, "one"), album(2, "two"), album(3, "three")];
        let mut deleted = TombstoneSet::new();
        deleted.insert(2);

        let visible = filter_deleted(&albums, &deleted);

        assert_eq!(visible.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn filter_with_empty_set_is_identity() {
        let albums = vec![album(1, "one"), album(2, "two")];
        assert_eq!(filter_deleted(&albums, &TombstoneSet::new()), albums);
    }

    #[test]
    fn filter_with_all_ids_empties_collection() {
        let albums = vec![album(1, "one"), album(2, "two")];
        let mut deleted = TombstoneSet::new();
        for a in &albums {
            deleted.insert(a.id);
        }

        assert!(filter_deleted(&albums, &deleted).is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let albums = vec![album(1, "one"), album(2, "two"), album(3, "three")];
        let mut deleted = TombstoneSet::new();
        deleted.insert(1);
        deleted.insert(3);

        let once = filter_deleted(&albums, &deleted);
        let twice = filter_deleted(&once, &deleted);

        assert_eq!(once, twice);
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashSet;

        fn arb_albums() -> impl Strategy<Value = Vec<Album>> {
            prop::collection::vec((-20i64..20, ".{0,8}"), 0..16).prop_map(|pairs| {
                pairs
                    .into_iter()
                    .map(|(id, title)| Album {
                        id,
                        user_id: 1,
                        title,
                    })
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn prop_merge_is_id_union(server in arb_albums(), local in arb_albums()) {
                let merged = merge_by_id(&server, &local);

                let merged_ids: HashSet<_> = merged.iter().map(|a| a.id).collect();
                let expected: HashSet<_> = server
                    .iter()
                    .chain(local.iter())
                    .map(|a| a.id)
                    .collect();

                prop_assert_eq!(&merged_ids, &expected);
                // Each id exactly once
                prop_assert_eq!(merged.len(), merged_ids.len());
            }

            #[test]
            fn prop_merge_prefers_first_sequence(server in arb_albums(), local in arb_albums()) {
                let merged = merge_by_id(&server, &local);

                for item in &merged {
                    let first_with_id = server
                        .iter()
                        .chain(local.iter())
                        .find(|a| a.id == item.id)
                        .unwrap();
                    prop_assert_eq!(item, first_with_id);
                }
            }

            #[test]
            fn prop_filter_never_leaks_tombstoned(
                albums in arb_albums(),
                dead in prop::collection::hash_set(-20i64..20, 0..10),
            ) {
                let mut deleted = TombstoneSet::new();
                for id in &dead {
                    deleted.insert(*id);
                }

                let visible = filter_deleted(&albums, &deleted);

                prop_assert!(visible.iter().all(|a| !dead.contains(&a.id)));
                // Exactly the non-tombstoned survive, order preserved
                let expected: Vec<_> = albums
                    .iter()
                    .filter(|a| !dead.contains(&a.id))
                    .cloned()
                    .collect();
                prop_assert_eq!(visible, expected);
            }
        }
    }
}
