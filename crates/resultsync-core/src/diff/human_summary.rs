//! Human-readable summary renderer for edit scripts.

use std::fmt::Debug;

use crate::diff::model::EditScript;
use crate::model::ChangeType;

/// Render a Markdown summary of an [`EditScript`].
///
/// Intended for review output from the CLI and for debugging delegates.
/// It is informational only and does not affect the structured script.
pub fn render_human_summary<O: Debug, S: Debug>(script: &EditScript<O, S>) -> String {
    let mut out = String::new();

    out.push_str("## Edit Script\n\n");

    let counts = &script.counts;
    out.push_str(&format!(
        "| | Inserted | Deleted | Moved | Updated |\n\
         |---|---|---|---|---|\n\
         | Sections | {} | {} | {} | - |\n\
         | Objects | {} | {} | {} | {} |\n\n",
        counts.sections_inserted,
        counts.sections_deleted,
        counts.sections_moved,
        counts.objects_inserted,
        counts.objects_deleted,
        counts.objects_moved,
        counts.objects_updated,
    ));

    if counts.objects_inserted_with_sections > 0 || counts.objects_deleted_with_sections > 0 {
        out.push_str(&format!(
            "_{} object(s) arrived and {} left with whole sections._\n\n",
            counts.objects_inserted_with_sections, counts.objects_deleted_with_sections
        ));
    }

    if script.is_empty() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    if !script.section_changes.is_empty() {
        out.push_str("### Section Changes\n\n");
        for change in &script.section_changes {
            out.push_str(&format!(
                "- **{}** `{:?}` {}\n",
                change.change.label(),
                change.section,
                describe(&change.change, true)
            ));
        }
        out.push('\n');
    }

    if !script.object_changes.is_empty() {
        out.push_str("### Object Changes\n\n");
        for change in &script.object_changes {
            out.push_str(&format!(
                "- **{}** `{:?}` {}\n",
                change.change.label(),
                change.object,
                describe(&change.change, false)
            ));
        }
        out.push('\n');
    }

    out
}

fn describe(change: &ChangeType, section_level: bool) -> String {
    let at = |path: &crate::model::IndexPath| {
        if section_level {
            format!("#{}", path.section)
        } else {
            path.to_string()
        }
    };
    match change {
        ChangeType::Delete { at: path } => format!("at {}", at(path)),
        ChangeType::Insert { at: path } => format!("at {}", at(path)),
        ChangeType::Move {
            from,
            to,
            content_changed,
        } => {
            let suffix = if *content_changed {
                " (content changed)"
            } else {
                ""
            };
            format!("{} → {}{}", at(from), at(to), suffix)
        }
        ChangeType::Update { at: path, .. } => format!("at {}", at(path)),
    }
}
