//! The shared analysis context — admission control, snapshot reads, and the
//! location traversal driver
//!
//! A [`Context`] is handed to every scanner worker of one analysis run. All
//! mutable state sits behind a single mutex so that an admission (filter
//! stamp, type adoption, set insertion) is observed atomically; readers take
//! a consistent snapshot under the same lock and then iterate freely.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use ripple_scm::{Change, ChangeScope};
use thiserror::Error;
use tracing::{debug, trace};

use crate::model::{Link, LinkType, Vertex};

/// Errors raised while building a context.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("cannot resolve analysis root {path:?}")]
    Location {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// True when the actor falls inside the configured namespace filter.
///
/// Pure function of its arguments: no filter means everything is in scope.
fn in_scope(actor: &str, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(prefix) => actor.starts_with(prefix),
    }
}

/// Everything producers mutate, under one lock.
#[derive(Debug, Default)]
struct ContextState {
    links: HashSet<Link>,
    adopted: HashSet<LinkType>,
    current_location: Option<PathBuf>,
}

/// Shared assembly point for the dependency graph of one analysis run.
///
/// Concurrent scanner workers submit discovered links through
/// [`Context::add_link`]; the selection stage reads a stable snapshot via
/// [`Context::links`] whenever it likes. The context itself spawns nothing;
/// it is a passively synchronized value passed around by the caller.
pub struct Context {
    filter: Option<String>,
    src_locations: Vec<PathBuf>,
    test_locations: Vec<PathBuf>,
    change_scope: Arc<ChangeScope<Change>>,
    state: Mutex<ContextState>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("Context")
            .field("filter", &self.filter)
            .field("link_count", &state.links.len())
            .field("adopted", &state.adopted)
            .finish()
    }
}

impl Context {
    /// Build a context for one analysis run.
    ///
    /// Root paths are resolved to absolute form up front; they are not
    /// required to exist — a bad root surfaces later, when the traversal
    /// action tries to use it.
    pub fn new<P, Q>(
        src_locations: &[P],
        test_locations: &[Q],
        filter: Option<String>,
        change_scope: ChangeScope<Change>,
    ) -> Result<Self, ContextError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        Ok(Context {
            filter,
            src_locations: normalize_locations(src_locations)?,
            test_locations: normalize_locations(test_locations)?,
            change_scope: Arc::new(change_scope),
            state: Mutex::new(ContextState::default()),
        })
    }

    fn state(&self) -> MutexGuard<'_, ContextState> {
        self.state.lock().unwrap()
    }

    /// The namespace filter this context admits against, if any.
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Source roots, absolute, in configuration order.
    pub fn src_locations(&self) -> &[PathBuf] {
        &self.src_locations
    }

    /// Test roots, absolute, in configuration order.
    pub fn test_locations(&self) -> &[PathBuf] {
        &self.test_locations
    }

    /// The change records supplied for this run, stored verbatim.
    pub fn change_scope(&self) -> &ChangeScope<Change> {
        &self.change_scope
    }

    fn vertex_in_scope(&self, vertex: &Vertex) -> bool {
        in_scope(&vertex.actor, self.filter.as_deref())
    }

    /// Offer one discovered link to the graph. Returns how many edges were
    /// actually inserted (0 or 1).
    ///
    /// A link is admitted when either endpoint falls inside the namespace
    /// filter, or when both endpoints are boundary elements (synthetic
    /// markers carry structural information the filter was never meant to
    /// drop). On admission the link's type is recorded as adopted even when
    /// the edge itself turns out to be a duplicate.
    pub fn add_link(&self, link: Link) -> usize {
        let admissible = self.vertex_in_scope(&link.caller)
            || self.vertex_in_scope(&link.callee)
            || (link.caller.special && link.callee.special);
        if !admissible {
            trace!("rejected out-of-scope link: {}", link);
            return 0;
        }

        let mut state = self.state();
        state.adopted.insert(link.link_type);
        let stamped = link.stamped(self.filter.as_deref());
        if state.links.insert(stamped) { 1 } else { 0 }
    }

    /// Offer a batch of links. Each link is admitted atomically on its own;
    /// the batch as a whole is just a convenience.
    pub fn add_links(&self, links: impl IntoIterator<Item = Link>) -> usize {
        links.into_iter().map(|link| self.add_link(link)).sum()
    }

    /// A point-in-time copy of the edge set, safe to iterate while other
    /// workers keep admitting. Order is unspecified.
    pub fn links(&self) -> Vec<Link> {
        self.state().links.iter().cloned().collect()
    }

    /// Number of edges currently admitted.
    pub fn link_count(&self) -> usize {
        self.state().links.len()
    }

    /// True when every given link type has been admitted at least once in
    /// this context's history. Adoption never shrinks.
    pub fn is_adopted(&self, link_types: &[LinkType]) -> bool {
        let state = self.state();
        link_types.iter().all(|t| state.adopted.contains(t))
    }

    /// The root most recently entered by the traversal driver.
    ///
    /// Best-effort telemetry only: the driver overwrites this as it
    /// advances, so a concurrent reader learns *some recent* root, nothing
    /// stronger. Never feed it back into admission decisions.
    pub fn current_location(&self) -> Option<PathBuf> {
        self.state().current_location.clone()
    }

    /// Walk every configured root, test roots first, then source roots,
    /// each in configuration order.
    ///
    /// The current-location cursor is updated before the action runs, so
    /// code reachable from the action can ask where the top-level scan is.
    /// A failing action aborts the walk immediately; edges admitted from
    /// earlier roots stay in the graph. The lock is never held while the
    /// action runs.
    pub fn for_each_location<F>(&self, mut action: F) -> anyhow::Result<()>
    where
        F: FnMut(&Path) -> anyhow::Result<()>,
    {
        for location in self.test_locations.iter().chain(self.src_locations.iter()) {
            self.state().current_location = Some(location.clone());
            debug!("scanning location: {}", location.display());
            action(location)?;
        }
        Ok(())
    }

    /// Derive a scratch context for a scoped unit of work.
    ///
    /// Shares the roots, filter, and change scope of this context, but
    /// starts with an empty edge set, an empty adopted-type set, and its own
    /// cursor initialized from this context's current location. Lets a
    /// worker accumulate without contending on the parent's lock; fold the
    /// results back with [`Context::absorb`].
    pub fn local(&self) -> Context {
        Context {
            filter: self.filter.clone(),
            src_locations: self.src_locations.clone(),
            test_locations: self.test_locations.clone(),
            change_scope: Arc::clone(&self.change_scope),
            state: Mutex::new(ContextState {
                links: HashSet::new(),
                adopted: HashSet::new(),
                current_location: self.current_location(),
            }),
        }
    }

    /// Merge another context's results into this one. Returns how many edges
    /// were new to this context.
    ///
    /// Union semantics: edges keep the filter stamp they were originally
    /// admitted under, and adopted types are unioned. Commutative and
    /// idempotent, so local contexts can be folded back in any order. A
    /// snapshot of `other` is taken before this context's lock is acquired,
    /// so no two locks are ever held at once.
    pub fn absorb(&self, other: &Context) -> usize {
        let (other_links, other_adopted) = {
            let other_state = other.state();
            (
                other_state.links.iter().cloned().collect::<Vec<_>>(),
                other_state.adopted.clone(),
            )
        };

        let mut state = self.state();
        state.adopted.extend(other_adopted);
        other_links
            .into_iter()
            .filter(|link| state.links.insert(link.clone()))
            .count()
    }
}

fn normalize_locations<P: AsRef<Path>>(locations: &[P]) -> Result<Vec<PathBuf>, ContextError> {
    locations
        .iter()
        .map(|location| {
            std::path::absolute(location.as_ref()).map_err(|source| ContextError::Location {
                path: location.as_ref().to_path_buf(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::in_scope;

    #[test]
    fn in_scope_is_a_plain_prefix_predicate() {
        assert!(in_scope("com.acme.Foo#bar", Some("com.acme.")));
        assert!(!in_scope("org.lib.Baz#qux", Some("com.acme.")));
        assert!(!in_scope("com.acm", Some("com.acme.")));
    }

    #[test]
    fn no_filter_means_everything_in_scope() {
        assert!(in_scope("anything at all", None));
        assert!(in_scope("", None));
    }
}
