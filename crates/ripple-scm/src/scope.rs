//! Opaque container for the change records of one analysis run

use serde::{Deserialize, Serialize};

/// The set of change records supplied to an analysis run.
///
/// Opaque to the graph core: it is stored at construction and handed to the
/// selection stage verbatim. Generic over the record type so the core never
/// grows a dependency on any particular diff format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeScope<C> {
    changes: Vec<C>,
}

impl<C> ChangeScope<C> {
    pub fn new(changes: Vec<C>) -> Self {
        ChangeScope { changes }
    }

    pub fn changes(&self) -> &[C] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.changes.iter()
    }
}

// Manual impl: the derive would demand C: Default for no reason.
impl<C> Default for ChangeScope<C> {
    fn default() -> Self {
        ChangeScope { changes: Vec::new() }
    }
}

impl<'a, C> IntoIterator for &'a ChangeScope<C> {
    type Item = &'a C;
    type IntoIter = std::slice::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::{Change, ChangeKind};

    #[test]
    fn scope_exposes_changes_verbatim() {
        let changes = vec![
            Change::new("a.rs", ChangeKind::Added, vec![1]),
            Change::new("b.rs", ChangeKind::Modified, vec![7, 9]),
        ];
        let scope = ChangeScope::new(changes.clone());

        assert_eq!(scope.len(), 2);
        assert_eq!(scope.changes(), &changes[..]);

        // Iteration preserves the order the diffing stage produced.
        let paths: Vec<_> = scope.iter().map(|c| c.path.clone()).collect();
        assert_eq!(paths, vec![changes[0].path.clone(), changes[1].path.clone()]);
    }

    #[test]
    fn default_scope_is_empty() {
        let scope: ChangeScope<Change> = ChangeScope::default();
        assert!(scope.is_empty());
    }
}
