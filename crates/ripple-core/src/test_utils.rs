//! Test utilities for Ripple

use std::fs;
use std::path::PathBuf;

use ripple_scm::{Change, ChangeKind, ChangeScope};
use tempfile::TempDir;

use crate::{Context, Link, LinkType, Vertex};

/// A method-call link between two plain actors.
pub fn call(caller: &str, callee: &str) -> Link {
    typed(caller, callee, LinkType::MethodCall)
}

/// A link of the given type between two plain actors.
pub fn typed(caller: &str, callee: &str, link_type: LinkType) -> Link {
    Link::new(Vertex::new(caller), Vertex::new(callee), link_type)
}

/// A context filtered to the `com.acme.` namespace, with throwaway roots.
pub fn acme_context() -> Context {
    Context::new(
        &["src"],
        &["test"],
        Some("com.acme.".to_string()),
        ChangeScope::default(),
    )
    .unwrap()
}

/// A context that admits everything.
pub fn unfiltered_context() -> Context {
    Context::new(&["src"], &["test"], None, ChangeScope::default()).unwrap()
}

/// A small change scope with a couple of records.
pub fn sample_scope() -> ChangeScope<Change> {
    ChangeScope::new(vec![
        Change::new("src/acme/billing.rs", ChangeKind::Modified, vec![12, 13]),
        Change::new("src/acme/ledger.rs", ChangeKind::Added, vec![1]),
    ])
}

/// Scratch analysis roots on disk: two test roots and one source root.
///
/// Returns the holding tempdir plus the root paths in configuration order.
pub fn scratch_roots() -> (TempDir, Vec<PathBuf>, Vec<PathBuf>) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let test_roots = vec![root.join("t1"), root.join("t2")];
    let src_roots = vec![root.join("s1")];

    for dir in test_roots.iter().chain(src_roots.iter()) {
        fs::create_dir_all(dir).unwrap();
    }

    (temp_dir, test_roots, src_roots)
}
