//! A single version-control change record

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How a file was touched in the change set under analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
}

/// One modified source location, as reported by the VCS diffing stage.
///
/// The graph core stores these verbatim; interpreting them (mapping changed
/// lines onto graph vertices) is the selection stage's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Change {
    /// Repository-relative path of the changed file.
    pub path: PathBuf,
    pub kind: ChangeKind,
    /// Line numbers touched by the change, empty for deletions.
    pub lines: Vec<u32>,
}

impl Change {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind, lines: Vec<u32>) -> Self {
        Change {
            path: path.into(),
            kind,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_roundtrips_through_json() {
        let change = Change::new("src/billing/invoice.rs", ChangeKind::Modified, vec![10, 11, 42]);

        let json = serde_json::to_string(&change).unwrap();
        let back: Change = serde_json::from_str(&json).unwrap();

        assert_eq!(change, back);
    }

    #[test]
    fn deleted_files_carry_no_lines() {
        let change = Change::new("src/legacy.rs", ChangeKind::Deleted, vec![]);
        assert!(change.lines.is_empty());
    }
}
