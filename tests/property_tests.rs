use hashwatch::diff::diff;
use hashwatch::scanner::{ExclusionList, ExclusionMode};
use hashwatch::storage::{Snapshot, SnapshotStore};
use hashwatch::utils::hash::{hash_bytes, hash_reader};
use proptest::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tempfile::tempdir;

/// Snapshots over a small path alphabet so generated pairs overlap
fn snapshot_strategy() -> impl Strategy<Value = Snapshot> {
    prop::collection::vec(("/[a-e]{1,3}", prop::collection::vec(any::<u8>(), 0..8)), 0..20)
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(path, content)| (path, hash_bytes(&content)))
                .collect()
        })
}

proptest! {
    #[test]
    fn test_store_round_trip(snapshot in snapshot_strategy()) {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("hashes.json"));

        store.save(&snapshot).unwrap();
        let loaded = store.load().unwrap();
        prop_assert_eq!(&loaded, &snapshot);
        prop_assert!(loaded.paths().eq(snapshot.paths()));
    }

    #[test]
    fn test_diff_partitions_paths(old in snapshot_strategy(), new in snapshot_strategy()) {
        let report = diff(&old, &new);

        let added: HashSet<&String> = report.added.iter().collect();
        let deleted: HashSet<&String> = report.deleted.iter().collect();
        let modified: HashSet<&String> = report.modified.iter().collect();
        prop_assert!(added.is_disjoint(&deleted));
        prop_assert!(added.is_disjoint(&modified));
        prop_assert!(deleted.is_disjoint(&modified));

        for path in old.paths().chain(new.paths()) {
            let path = path.to_string();
            let expected_added = !old.contains(&path);
            let expected_deleted = !new.contains(&path);
            let expected_modified = !expected_added
                && !expected_deleted
                && old.get(&path) != new.get(&path);
            prop_assert_eq!(added.contains(&path), expected_added);
            prop_assert_eq!(deleted.contains(&path), expected_deleted);
            prop_assert_eq!(modified.contains(&path), expected_modified);
        }
    }

    #[test]
    fn test_diff_with_itself_is_clean(snapshot in snapshot_strategy()) {
        prop_assert!(diff(&snapshot, &snapshot).is_clean());
    }

    #[test]
    fn test_hash_ignores_chunk_size(
        data in prop::collection::vec(any::<u8>(), 0..20000),
        chunk_size in 1usize..9000,
    ) {
        let streamed = hash_reader(data.as_slice(), chunk_size).unwrap();
        prop_assert_eq!(streamed, hash_bytes(&data));
    }

    #[test]
    fn test_prefix_exclusion_covers_every_extension(
        prefix in "/[a-z]{1,6}(/[a-z]{1,6}){0,2}",
        suffix in "[a-z/]{0,12}",
    ) {
        let list = ExclusionList::new([prefix.clone()]);
        let candidate = format!("{prefix}{suffix}");
        prop_assert!(list.is_excluded(Path::new(&candidate)));
    }

    #[test]
    fn test_component_mode_is_stricter_than_prefix(
        prefix in "/[a-z]{1,6}",
        path in "/[a-z]{1,8}(/[a-z]{1,4}){0,2}",
    ) {
        let component = ExclusionList::with_mode([prefix.clone()], ExclusionMode::Component);
        let plain = ExclusionList::new([prefix]);
        if component.is_excluded(Path::new(&path)) {
            prop_assert!(plain.is_excluded(Path::new(&path)));
        }
    }
}
