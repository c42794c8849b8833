use std::collections::HashSet;

use resultsync_core::{
    ControllerConfig, FetchedRecord, MemoryStore, RecordingDelegate, ResultsController,
    SectionedSnapshot, SnapshotBuilder,
};

pub type Snapshot = SectionedSnapshot<String, String, u32>;
pub type Records = Vec<FetchedRecord<String, String, u32>>;
pub type TestController =
    ResultsController<MemoryStore<String, String, u32>, RecordingDelegate<String, String>>;

/// Records for a `(section, objects)` layout, contents numbered in order
#[allow(dead_code)]
pub fn records(layout: &[(&str, &[&str])]) -> Records {
    let mut content = 0;
    let mut out = Vec::new();
    for (section, objects) in layout {
        for object in *objects {
            content += 1;
            out.push(FetchedRecord::new(
                object.to_string(),
                section.to_string(),
                content,
            ));
        }
    }
    out
}

/// Snapshot for a `(section, objects)` layout
#[allow(dead_code)]
pub fn snapshot(layout: &[(&str, &[&str])]) -> Snapshot {
    let mut builder = SnapshotBuilder::new();
    builder.extend(records(layout));
    builder.finish().snapshot
}

/// Set of changed identities
#[allow(dead_code)]
pub fn changed(objects: &[&str]) -> HashSet<String> {
    objects.iter().map(|o| o.to_string()).collect()
}

/// Controller over a memory store seeded with `layout`, plus a handle on its
/// recorded delegate events
#[allow(dead_code)]
pub fn controller(
    name: &str,
    layout: &[(&str, &[&str])],
) -> (TestController, RecordingDelegate<String, String>) {
    let recorder = RecordingDelegate::new();
    let store = MemoryStore::new(format!("{}-store", name)).with_records(records(layout));
    let controller = ResultsController::new(store, recorder.clone(), ControllerConfig::named(name));
    (controller, recorder)
}

/// Owned layout for comparisons
#[allow(dead_code)]
pub fn layout(layout: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    layout
        .iter()
        .map(|(section, objects)| {
            (
                section.to_string(),
                objects.iter().map(|o| o.to_string()).collect(),
            )
        })
        .collect()
}
