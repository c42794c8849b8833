//! Reference consumer for edit scripts.
//!
//! [`replay`] applies an [`EditScript`] to the old layout the way a batching
//! list view would: every removal is resolved against the old layout, every
//! insertion against the new one. It exists to check that a script really
//! turns the old snapshot into the new one.

use std::fmt::Debug;
use std::hash::Hash;

use crate::diff::model::EditScript;
use crate::errors::{Result, ResultSyncError};
use crate::model::{ChangeType, IndexPath};
use crate::snapshot::SectionedSnapshot;

type Layout<O, S> = Vec<(S, Vec<O>)>;

fn mismatch(reason: impl Into<String>) -> ResultSyncError {
    ResultSyncError::ReplayMismatch {
        reason: reason.into(),
    }
}

/// Old layout with vacated positions left as holes until compaction
struct Slots<O, S> {
    sections: Vec<Option<(S, Vec<Option<O>>)>>,
}

impl<O, S> Slots<O, S>
where
    O: Eq + Debug,
    S: Eq + Debug,
{
    fn object(&self, at: IndexPath) -> Result<&O> {
        self.sections
            .get(at.section)
            .and_then(|slot| slot.as_ref())
            .and_then(|(_, objects)| objects.get(at.item))
            .and_then(|object| object.as_ref())
            .ok_or_else(|| mismatch(format!("no object at old position {}", at)))
    }

    fn expect_object(&self, object: &O, at: IndexPath) -> Result<()> {
        let found = self.object(at)?;
        if found != object {
            return Err(mismatch(format!(
                "expected {:?} at old position {}, found {:?}",
                object, at, found
            )));
        }
        Ok(())
    }

    fn take_object(&mut self, object: &O, at: IndexPath) -> Result<O> {
        self.expect_object(object, at)?;
        self.sections[at.section]
            .as_mut()
            .and_then(|(_, objects)| objects[at.item].take())
            .ok_or_else(|| mismatch(format!("old position {} vacated twice", at)))
    }

    fn take_section(&mut self, section: &S, ordinal: usize) -> Result<(S, Vec<Option<O>>)> {
        let slot = self
            .sections
            .get_mut(ordinal)
            .ok_or_else(|| mismatch(format!("no section at old ordinal {}", ordinal)))?;
        match slot {
            Some((found, _)) if found == section => {}
            Some((found, _)) => {
                return Err(mismatch(format!(
                    "expected section {:?} at old ordinal {}, found {:?}",
                    section, ordinal, found
                )))
            }
            None => return Err(mismatch(format!("old section {} vacated twice", ordinal))),
        }
        slot.take()
            .ok_or_else(|| mismatch(format!("old section {} vacated twice", ordinal)))
    }
}

fn compact<O>(objects: Vec<Option<O>>) -> Vec<O> {
    objects.into_iter().flatten().collect()
}

/// Apply `script` to the layout of `old`
///
/// Contents of inserted sections are read from `data_source`, the snapshot
/// the script was computed against. Returns the resulting `(section,
/// objects)` layout, or [`ResultSyncError::ReplayMismatch`] when a change
/// refers to a position that does not hold the expected identity.
pub fn replay<O, S, C>(
    old: &SectionedSnapshot<O, S, C>,
    script: &EditScript<O, S>,
    data_source: &SectionedSnapshot<O, S, C>,
) -> Result<Layout<O, S>>
where
    O: Hash + Eq + Clone + Debug,
    S: Hash + Eq + Clone + Debug,
{
    let mut slots = Slots {
        sections: old
            .layout()
            .into_iter()
            .map(|(section, objects)| Some((section, objects.into_iter().map(Some).collect())))
            .collect(),
    };

    // Removals, all in old coordinates
    let mut object_arrivals: Vec<(O, IndexPath)> = Vec::new();
    let mut updates: Vec<(&O, IndexPath)> = Vec::new();
    for change in &script.object_changes {
        match change.change {
            ChangeType::Delete { at } => {
                slots.take_object(&change.object, at)?;
            }
            ChangeType::Move { from, to, .. } => {
                let object = slots.take_object(&change.object, from)?;
                object_arrivals.push((object, to));
            }
            ChangeType::Update { at, previous } => {
                slots.expect_object(&change.object, previous)?;
                updates.push((&change.object, at));
            }
            ChangeType::Insert { at } => object_arrivals.push((change.object.clone(), at)),
        }
    }

    let mut section_arrivals: Vec<(S, Vec<O>, usize)> = Vec::new();
    for change in &script.section_changes {
        match change.change {
            ChangeType::Delete { at } => {
                slots.take_section(&change.section, at.section)?;
            }
            ChangeType::Move { from, to, .. } => {
                let (section, objects) = slots.take_section(&change.section, from.section)?;
                section_arrivals.push((section, compact(objects), to.section));
            }
            ChangeType::Insert { at } => {
                let objects = data_source
                    .objects_in(&change.section)
                    .map(|objects| objects.as_slice().to_vec())
                    .unwrap_or_default();
                section_arrivals.push((change.section.clone(), objects, at.section));
            }
            ChangeType::Update { .. } => {
                return Err(mismatch(format!(
                    "section {:?} cannot be updated",
                    change.section
                )))
            }
        }
    }

    let mut layout: Layout<O, S> = slots
        .sections
        .into_iter()
        .flatten()
        .map(|(section, objects)| (section, compact(objects)))
        .collect();

    // Insertions, all in new coordinates, lowest first
    section_arrivals.sort_by_key(|(_, _, ordinal)| *ordinal);
    for (section, objects, ordinal) in section_arrivals {
        if ordinal > layout.len() {
            return Err(mismatch(format!(
                "section {:?} inserted at {} beyond {} sections",
                section,
                ordinal,
                layout.len()
            )));
        }
        layout.insert(ordinal, (section, objects));
    }

    object_arrivals.sort_by_key(|(_, at)| *at);
    for (object, at) in object_arrivals {
        let (_, objects) = layout
            .get_mut(at.section)
            .ok_or_else(|| mismatch(format!("no section at new ordinal {}", at.section)))?;
        if at.item > objects.len() {
            return Err(mismatch(format!(
                "object {:?} inserted at {} beyond {} items",
                object,
                at,
                objects.len()
            )));
        }
        objects.insert(at.item, object);
    }

    for (object, at) in updates {
        let found = layout
            .get(at.section)
            .and_then(|(_, objects)| objects.get(at.item));
        if found != Some(object) {
            return Err(mismatch(format!(
                "updated object {:?} is not at new position {}",
                object, at
            )));
        }
    }

    Ok(layout)
}

/// Check that replaying `script` over `old` reproduces the layout of `new`
pub fn verify_replay<O, S, C>(
    old: &SectionedSnapshot<O, S, C>,
    script: &EditScript<O, S>,
    new: &SectionedSnapshot<O, S, C>,
) -> Result<()>
where
    O: Hash + Eq + Clone + Debug,
    S: Hash + Eq + Clone + Debug,
{
    let replayed = replay(old, script, new)?;
    let expected = new.layout();
    if replayed != expected {
        return Err(mismatch(format!(
            "replayed layout {:?} differs from {:?}",
            replayed, expected
        )));
    }
    Ok(())
}
