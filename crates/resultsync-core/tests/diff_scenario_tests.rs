/// Diff scenarios: expected edit scripts for small, hand-checked layouts.
mod common;

use std::collections::HashSet;

use common::{changed, layout, snapshot};
use resultsync_core::diff::{replay, ObjectChange, SectionChange};
use resultsync_core::{
    compute_edit_script, verify_replay, ChangeType, ComparatorChain, DelegateEvent, IndexPath,
    OrderedUniqueList, RecordingDelegate,
};

fn obj(object: &str, change: ChangeType) -> ObjectChange<String> {
    ObjectChange {
        object: object.to_string(),
        change,
    }
}

fn sec(section: &str, change: ChangeType) -> SectionChange<String> {
    SectionChange {
        section: section.to_string(),
        change,
    }
}

#[test]
fn test_shift_left_yields_delete_insert_and_moves() {
    // GIVEN old (A@0, B@1, C@2) and new (B@0, C@1, D@2)
    let old = snapshot(&[("s", &["A", "B", "C"])]);
    let new = snapshot(&[("s", &["B", "C", "D"])]);

    // WHEN diffing
    let script = compute_edit_script(&old, &new, &HashSet::new());

    // THEN A is deleted at 0, D inserted at 2, B and C move one slot left
    assert!(script.section_changes.is_empty());
    assert_eq!(
        script.object_changes,
        vec![
            obj("A", ChangeType::Delete { at: IndexPath::new(0, 0) }),
            obj("D", ChangeType::Insert { at: IndexPath::new(0, 2) }),
            obj(
                "B",
                ChangeType::Move {
                    from: IndexPath::new(0, 1),
                    to: IndexPath::new(0, 0),
                    content_changed: false
                }
            ),
            obj(
                "C",
                ChangeType::Move {
                    from: IndexPath::new(0, 2),
                    to: IndexPath::new(0, 1),
                    content_changed: false
                }
            ),
        ]
    );
    verify_replay(&old, &script, &new).unwrap();
}

#[test]
fn test_section_swap_yields_two_section_moves_only() {
    let old = snapshot(&[("X", &["a", "b"]), ("Y", &["c"])]);
    let new = snapshot(&[("Y", &["c"]), ("X", &["a", "b"])]);

    let script = compute_edit_script(&old, &new, &HashSet::new());

    assert_eq!(
        script.section_changes,
        vec![
            sec(
                "Y",
                ChangeType::Move {
                    from: IndexPath::for_section(1),
                    to: IndexPath::for_section(0),
                    content_changed: false
                }
            ),
            sec(
                "X",
                ChangeType::Move {
                    from: IndexPath::for_section(0),
                    to: IndexPath::for_section(1),
                    content_changed: false
                }
            ),
        ]
    );
    assert!(script.object_changes.is_empty());
    assert_eq!(script.counts.sections_moved, 2);
    verify_replay(&old, &script, &new).unwrap();
}

#[test]
fn test_identical_snapshots_emit_only_bracketing_callbacks() {
    let s = snapshot(&[("X", &["a", "b"]), ("Y", &["c"])]);
    let script = compute_edit_script(&s, &s, &HashSet::new());

    let mut recorder: RecordingDelegate<String, String> = RecordingDelegate::new();
    script.emit(&mut recorder);

    assert_eq!(
        recorder.events(),
        vec![DelegateEvent::WillChangeContent, DelegateEvent::DidChangeContent]
    );
}

#[test]
fn test_reorder_within_section_yields_moves_only() {
    let old = snapshot(&[("s", &["a", "b", "c", "d"])]);
    let new = snapshot(&[("s", &["d", "b", "a", "c"])]);

    let script = compute_edit_script(&old, &new, &HashSet::new());

    assert!(script
        .object_changes
        .iter()
        .all(|c| matches!(c.change, ChangeType::Move { .. })));
    assert_eq!(script.counts.objects_inserted, 0);
    assert_eq!(script.counts.objects_deleted, 0);
    // b stays at item 1
    assert_eq!(script.counts.objects_moved, 3);
    verify_replay(&old, &script, &new).unwrap();
}

#[test]
fn test_changed_and_moved_collapses_into_one_move() {
    let old = snapshot(&[("s", &["a", "b"])]);
    let new = snapshot(&[("s", &["b", "a"])]);

    let script = compute_edit_script(&old, &new, &changed(&["a"]));

    assert_eq!(script.counts.objects_updated, 0);
    assert!(script.object_changes.contains(&obj(
        "a",
        ChangeType::Move {
            from: IndexPath::new(0, 0),
            to: IndexPath::new(0, 1),
            content_changed: true
        }
    )));
    assert_eq!(script.object_changes.len(), 2);
}

#[test]
fn test_changed_in_place_is_update_with_previous_position() {
    let old = snapshot(&[("s", &["a", "b"]), ("t", &["c"])]);
    let new = snapshot(&[("t", &["c"]), ("s", &["a", "b"])]);

    let script = compute_edit_script(&old, &new, &changed(&["b"]));

    // the section moved but b kept its item ordinal
    assert_eq!(
        script.object_changes,
        vec![obj(
            "b",
            ChangeType::Update {
                at: IndexPath::new(1, 1),
                previous: IndexPath::new(0, 1)
            }
        )]
    );
    verify_replay(&old, &script, &new).unwrap();
}

#[test]
fn test_object_changing_section_is_delete_plus_insert() {
    let old = snapshot(&[("x", &["a", "b"]), ("y", &["c"])]);
    let new = snapshot(&[("x", &["b"]), ("y", &["c", "a"])]);

    let script = compute_edit_script(&old, &new, &HashSet::new());

    assert!(script
        .object_changes
        .contains(&obj("a", ChangeType::Delete { at: IndexPath::new(0, 0) })));
    assert!(script
        .object_changes
        .contains(&obj("a", ChangeType::Insert { at: IndexPath::new(1, 1) })));
    verify_replay(&old, &script, &new).unwrap();
}

#[test]
fn test_section_deletes_descend_and_inserts_ascend() {
    let old = snapshot(&[("p", &["1"]), ("q", &["2"]), ("r", &["3"])]);
    let new = snapshot(&[("n", &["4"]), ("q", &["2"]), ("m", &["5"])]);

    let script = compute_edit_script(&old, &new, &HashSet::new());

    let kinds: Vec<(String, ChangeType)> = script
        .section_changes
        .iter()
        .map(|c| (c.section.clone(), c.change))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("r".to_string(), ChangeType::Delete { at: IndexPath::for_section(2) }),
            ("p".to_string(), ChangeType::Delete { at: IndexPath::for_section(0) }),
            ("n".to_string(), ChangeType::Insert { at: IndexPath::for_section(0) }),
            ("m".to_string(), ChangeType::Insert { at: IndexPath::for_section(2) }),
        ]
    );
    assert_eq!(script.counts.objects_deleted_with_sections, 2);
    assert_eq!(script.counts.objects_inserted_with_sections, 2);

    let replayed = replay(&old, &script, &new).unwrap();
    assert_eq!(
        replayed,
        layout(&[("n", &["4"]), ("q", &["2"]), ("m", &["5"])])
    );
}

#[test]
fn test_object_deletes_descend_within_section() {
    let old = snapshot(&[("s", &["a", "b", "c", "d"])]);
    let new = snapshot(&[("s", &["b", "d"])]);

    let script = compute_edit_script(&old, &new, &HashSet::new());

    let deletes: Vec<IndexPath> = script
        .object_changes
        .iter()
        .filter_map(|c| match c.change {
            ChangeType::Delete { at } => Some(at),
            _ => None,
        })
        .collect();
    assert_eq!(deletes, vec![IndexPath::new(0, 2), IndexPath::new(0, 0)]);
    verify_replay(&old, &script, &new).unwrap();
}

#[test]
fn test_sorted_insertion_into_ascending_list() {
    let chain = ComparatorChain::natural();
    let mut list = OrderedUniqueList::from_vec(vec![1, 3, 7, 9]);

    assert_eq!(list.insert_sorted(5, &chain), Some(2));
    assert_eq!(list.as_slice(), &[1, 3, 5, 7, 9]);

    // already present at its sorted position
    assert_eq!(list.insert_sorted(5, &chain), None);
    assert_eq!(list.as_slice(), &[1, 3, 5, 7, 9]);
}

#[test]
fn test_script_serializes_with_tagged_changes() {
    let old = snapshot(&[("s", &["a"])]);
    let new = snapshot(&[("s", &["a", "b"])]);
    let script = compute_edit_script(&old, &new, &HashSet::new());

    let json = serde_json::to_value(&script).unwrap();
    assert_eq!(json["object_changes"][0]["object"], "b");
    assert_eq!(json["object_changes"][0]["change"]["kind"], "insert");
    assert_eq!(json["object_changes"][0]["change"]["at"]["item"], 1);
}
