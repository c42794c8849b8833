//! Edit script computation.
//!
//! The core entry point is [`compute_edit_script`], which compares two
//! snapshots section by section and object by object.

use std::collections::HashSet;
use std::hash::Hash;

use crate::change_set::ChangeSet;
use crate::collections::BiMap;
use crate::diff::model::{ChangeCounts, EditScript, ObjectChange, SectionChange};
use crate::model::{ChangeType, IndexPath};
use crate::snapshot::SectionedSnapshot;

/// A section present in both snapshots
struct SurvivingSection<'a, S> {
    section: &'a S,
    old_ordinal: usize,
    new_ordinal: usize,
}

/// Object-level edits collected across all surviving sections
struct ObjectEdits<O> {
    deletes: Vec<(O, IndexPath)>,
    inserts: Vec<(O, IndexPath)>,
    moves: Vec<(O, IndexPath, IndexPath, bool)>,
    updates: Vec<(O, IndexPath, IndexPath)>,
}

impl<O> Default for ObjectEdits<O> {
    fn default() -> Self {
        Self {
            deletes: Vec::new(),
            inserts: Vec::new(),
            moves: Vec::new(),
            updates: Vec::new(),
        }
    }
}

/// Compute the edit script that turns `old` into `new`
///
/// `changed` holds the identities the store reported as content-changed.
///
/// Sections present only in `old` are deleted at their old ordinal, sections
/// present only in `new` are inserted at their new ordinal, and sections
/// present in both at different ordinals are moved. Objects are diffed only
/// inside sections present in both; objects of inserted or deleted sections
/// travel with their section and are counted but not emitted.
///
/// Within a surviving section an object is inserted, deleted, moved (item
/// ordinal differs) or updated (same item ordinal, content changed). A move
/// of a changed object carries `content_changed: true` instead of a separate
/// update.
pub fn compute_edit_script<O, S, C>(
    old: &SectionedSnapshot<O, S, C>,
    new: &SectionedSnapshot<O, S, C>,
    changed: &HashSet<O>,
) -> EditScript<O, S>
where
    O: Hash + Eq + Clone,
    S: Hash + Eq + Clone,
{
    let mut counts = ChangeCounts::default();

    // 1. Section-level classification
    let mut old_sections: BiMap<usize, S> = old
        .sections()
        .iter()
        .enumerate()
        .map(|(ordinal, section)| (section.clone(), ordinal))
        .collect();
    let mut section_set: ChangeSet<S, usize> = ChangeSet::new();
    let mut section_moves = Vec::new();
    let mut surviving = Vec::new();

    for (new_ordinal, section) in new.sections().iter().enumerate() {
        match old_sections.remove_identity(section) {
            None => section_set.mark_inserted(section.clone()),
            Some(old_ordinal) => {
                if old_ordinal != new_ordinal {
                    section_moves.push((section.clone(), old_ordinal, new_ordinal));
                }
                surviving.push(SurvivingSection {
                    section,
                    old_ordinal,
                    new_ordinal,
                });
            }
        }
    }
    for (old_ordinal, section) in old_sections.drain() {
        section_set.mark_deleted(section, old_ordinal);
    }

    // 2. Objects travelling with whole sections
    for section in section_set.inserted() {
        if let Some(objects) = new.objects_in(section) {
            let mut arrived: ChangeSet<O, IndexPath> = ChangeSet::new();
            for object in objects {
                arrived.mark_inserted(object.clone());
            }
            counts.objects_inserted_with_sections += arrived.len();
        }
    }
    for (old_ordinal, section) in section_set.deleted().iter() {
        if let Some(objects) = old.objects_in(section) {
            let mut departed: ChangeSet<O, IndexPath> = ChangeSet::new();
            for (item, object) in objects.iter().enumerate() {
                departed.mark_deleted(object.clone(), IndexPath::new(*old_ordinal, item));
            }
            counts.objects_deleted_with_sections += departed.len();
        }
    }

    // 3. Object-level diff inside surviving sections
    let mut edits = ObjectEdits::default();
    for entry in &surviving {
        diff_section(old, new, changed, entry, &mut edits);
    }

    // 4. Order for emission
    let mut section_changes = Vec::new();

    let mut section_deletes: Vec<(S, usize)> = section_set
        .deleted()
        .iter()
        .map(|(ordinal, section)| (section.clone(), *ordinal))
        .collect();
    section_deletes.sort_by(|a, b| b.1.cmp(&a.1));
    counts.sections_deleted = section_deletes.len();
    section_changes.extend(section_deletes.into_iter().map(|(section, ordinal)| SectionChange {
        section,
        change: ChangeType::Delete {
            at: IndexPath::for_section(ordinal),
        },
    }));

    // inserted() is already in ascending new-ordinal order
    for section in section_set.inserted() {
        if let Some(ordinal) = new.section_ordinal(section) {
            counts.sections_inserted += 1;
            section_changes.push(SectionChange {
                section: section.clone(),
                change: ChangeType::Insert {
                    at: IndexPath::for_section(ordinal),
                },
            });
        }
    }

    counts.sections_moved = section_moves.len();
    section_changes.extend(section_moves.into_iter().map(|(section, from, to)| SectionChange {
        section,
        change: ChangeType::Move {
            from: IndexPath::for_section(from),
            to: IndexPath::for_section(to),
            content_changed: false,
        },
    }));

    let ObjectEdits {
        mut deletes,
        mut inserts,
        mut moves,
        mut updates,
    } = edits;
    deletes.sort_by(|a, b| b.1.cmp(&a.1));
    inserts.sort_by(|a, b| a.1.cmp(&b.1));
    moves.sort_by(|a, b| a.2.cmp(&b.2));
    updates.sort_by(|a, b| a.1.cmp(&b.1));

    counts.objects_deleted = deletes.len();
    counts.objects_inserted = inserts.len();
    counts.objects_moved = moves.len();
    counts.objects_updated = updates.len();

    let mut object_changes = Vec::with_capacity(counts.object_edits());
    object_changes.extend(deletes.into_iter().map(|(object, at)| ObjectChange {
        object,
        change: ChangeType::Delete { at },
    }));
    object_changes.extend(inserts.into_iter().map(|(object, at)| ObjectChange {
        object,
        change: ChangeType::Insert { at },
    }));
    object_changes.extend(
        moves
            .into_iter()
            .map(|(object, from, to, content_changed)| ObjectChange {
                object,
                change: ChangeType::Move {
                    from,
                    to,
                    content_changed,
                },
            }),
    );
    object_changes.extend(updates.into_iter().map(|(object, at, previous)| ObjectChange {
        object,
        change: ChangeType::Update { at, previous },
    }));

    EditScript {
        section_changes,
        object_changes,
        counts,
    }
}

/// Diff the objects of one section present in both snapshots
fn diff_section<O, S, C>(
    old: &SectionedSnapshot<O, S, C>,
    new: &SectionedSnapshot<O, S, C>,
    changed: &HashSet<O>,
    entry: &SurvivingSection<'_, S>,
    edits: &mut ObjectEdits<O>,
) where
    O: Hash + Eq + Clone,
    S: Hash + Eq + Clone,
{
    let Some(new_objects) = new.objects_in(entry.section) else {
        return;
    };

    // positions the objects held before this cycle, consumed as they are matched
    let mut previous: BiMap<IndexPath, O> = old
        .objects_in(entry.section)
        .map(|objects| {
            objects
                .iter()
                .enumerate()
                .map(|(item, object)| (object.clone(), IndexPath::new(entry.old_ordinal, item)))
                .collect()
        })
        .unwrap_or_default();

    let mut set: ChangeSet<O, IndexPath> = ChangeSet::new();
    let mut relocated = Vec::new();

    for (item, object) in new_objects.iter().enumerate() {
        match previous.remove_identity(object) {
            None => set.mark_inserted(object.clone()),
            Some(from) if changed.contains(object) => set.mark_updated(object.clone(), from),
            Some(from) if from.item != item => {
                relocated.push((object.clone(), from, IndexPath::new(entry.new_ordinal, item)));
            }
            Some(_) => {}
        }
    }
    for (from, object) in previous.drain() {
        set.mark_deleted(object, from);
    }

    let new_path = |object: &O| {
        new_objects
            .index_of(object)
            .map(|item| IndexPath::new(entry.new_ordinal, item))
    };

    for object in set.inserted() {
        if let Some(to) = new_path(object) {
            edits.inserts.push((object.clone(), to));
        }
    }
    for (from, object) in set.updated().iter() {
        if let Some(to) = new_path(object) {
            if from.item != to.item {
                edits.moves.push((object.clone(), *from, to, true));
            } else {
                edits.updates.push((object.clone(), to, *from));
            }
        }
    }
    for (from, object) in set.deleted().iter() {
        edits.deletes.push((object.clone(), *from));
    }
    edits
        .moves
        .extend(relocated.into_iter().map(|(object, from, to)| (object, from, to, false)));
}
