/// Property tests for the diff: every script must replay into the new layout.
use std::collections::HashSet;

use proptest::prelude::*;
use resultsync_core::{
    compute_edit_script, verify_replay, ChangeType, FetchedRecord, SectionedSnapshot,
    SnapshotBuilder,
};

type Snapshot = SectionedSnapshot<u8, u8, ()>;

fn build(rows: &[(u8, u8)]) -> Snapshot {
    let mut builder = SnapshotBuilder::new();
    builder.extend(
        rows.iter()
            .map(|(object, section)| FetchedRecord::new(*object, *section, ())),
    );
    builder.finish().snapshot
}

fn rows() -> impl Strategy<Value = Vec<(u8, u8)>> {
    prop::collection::vec((0u8..40, 0u8..6), 0..50)
}

#[test]
fn prop_script_replays_into_new_layout() {
    proptest!(|(
        old_rows in rows(),
        new_rows in rows(),
        changed in prop::collection::hash_set(0u8..40, 0..10),
    )| {
        let old = build(&old_rows);
        let new = build(&new_rows);

        let script = compute_edit_script(&old, &new, &changed);

        prop_assert!(verify_replay(&old, &script, &new).is_ok());
        prop_assert_eq!(script.object_changes.len(), script.counts.object_edits());
        prop_assert_eq!(script.section_changes.len(), script.counts.section_edits());
        prop_assert!(
            script.counts.objects_inserted_with_sections
                + script.counts.objects_inserted
                + script.counts.objects_moved
                + script.counts.objects_updated
                <= new.object_count()
        );
    });
}

#[test]
fn prop_self_diff_is_empty() {
    proptest!(|(rows in rows())| {
        let snapshot = build(&rows);
        let script = compute_edit_script(&snapshot, &snapshot, &HashSet::new());
        prop_assert!(script.is_empty());
    });
}

#[test]
fn prop_permutation_within_sections_yields_only_moves() {
    proptest!(|(
        rows in rows(),
        seeds in prop::collection::vec(any::<u32>(), 50),
    )| {
        let old = build(&rows);

        // same sections in the same order, objects permuted inside each
        let mut permuted = Vec::new();
        for (section, objects) in old.layout() {
            let mut keyed: Vec<(u32, u8)> = objects
                .into_iter()
                .map(|object| (seeds[object as usize % seeds.len()], object))
                .collect();
            keyed.sort();
            permuted.extend(keyed.into_iter().map(|(_, object)| (object, section)));
        }
        let new = build(&permuted);
        prop_assert_eq!(new.sections().as_slice(), old.sections().as_slice());

        let script = compute_edit_script(&old, &new, &HashSet::new());

        prop_assert!(script.section_changes.is_empty());
        for change in &script.object_changes {
            let is_move = matches!(change.change, ChangeType::Move { .. });
            prop_assert!(is_move);
        }
        prop_assert!(verify_replay(&old, &script, &new).is_ok());
    });
}
