use serde::{Deserialize, Serialize};

use super::IndexPath;

/// The kind of change reported to a delegate, with the positions it involves
///
/// Deletes and move sources are expressed against the layout before the
/// batch; inserts, move destinations and update targets against the layout
/// after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeType {
    /// Removed from `at` (pre-batch coordinates)
    Delete { at: IndexPath },
    /// Added at `at` (post-batch coordinates)
    Insert { at: IndexPath },
    /// Relocated from `from` to `to`; `content_changed` asks the consumer to
    /// refresh the moved element as well
    Move {
        from: IndexPath,
        to: IndexPath,
        content_changed: bool,
    },
    /// Content refreshed in place; `previous` is where it was before the batch
    Update { at: IndexPath, previous: IndexPath },
}

impl ChangeType {
    /// The pre-batch index path, if the element existed before the batch
    pub fn index_path(&self) -> Option<IndexPath> {
        match self {
            ChangeType::Delete { at } => Some(*at),
            ChangeType::Insert { .. } => None,
            ChangeType::Move { from, .. } => Some(*from),
            ChangeType::Update { previous, .. } => Some(*previous),
        }
    }

    /// The post-batch index path, if the element exists after the batch
    pub fn new_index_path(&self) -> Option<IndexPath> {
        match self {
            ChangeType::Delete { .. } => None,
            ChangeType::Insert { at } => Some(*at),
            ChangeType::Move { to, .. } => Some(*to),
            ChangeType::Update { at, .. } => Some(*at),
        }
    }

    /// Short label used in summaries and logs
    pub fn label(&self) -> &'static str {
        match self {
            ChangeType::Delete { .. } => "delete",
            ChangeType::Insert { .. } => "insert",
            ChangeType::Move { .. } => "move",
            ChangeType::Update { .. } => "update",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_paths_per_kind() {
        let a = IndexPath::new(0, 1);
        let b = IndexPath::new(1, 0);
        assert_eq!(ChangeType::Delete { at: a }.index_path(), Some(a));
        assert_eq!(ChangeType::Delete { at: a }.new_index_path(), None);
        assert_eq!(ChangeType::Insert { at: b }.index_path(), None);
        assert_eq!(ChangeType::Insert { at: b }.new_index_path(), Some(b));
        let mv = ChangeType::Move {
            from: a,
            to: b,
            content_changed: false,
        };
        assert_eq!(mv.index_path(), Some(a));
        assert_eq!(mv.new_index_path(), Some(b));
    }

    #[test]
    fn test_serde_tagging() {
        let change = ChangeType::Insert {
            at: IndexPath::new(0, 2),
        };
        let json = serde_json::to_value(change).unwrap();
        assert_eq!(json["kind"], "insert");
        assert_eq!(json["at"]["item"], 2);
    }
}
