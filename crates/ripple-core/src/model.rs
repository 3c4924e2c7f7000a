//! Core data structures for the dependency graph

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// One code element discovered by static analysis.
///
/// The `actor` is the fully-qualified identity of the element (package, type
/// and member path joined into one string) and is what namespace filtering
/// matches against. A vertex is immutable once built; the graph never
/// touches it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    pub actor: String,
    /// Boundary/synthetic marker (framework-injected entry points and the
    /// like), exempt from namespace filtering.
    pub special: bool,
}

impl Vertex {
    pub fn new(actor: impl Into<String>) -> Self {
        Vertex {
            actor: actor.into(),
            special: false,
        }
    }

    /// A boundary element that stays eligible regardless of any filter.
    pub fn special(actor: impl Into<String>) -> Self {
        Vertex {
            actor: actor.into(),
            special: true,
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.actor)
    }
}

/// What kind of relationship a link represents.
///
/// The set is owned by the scanner side; the graph only relies on identity
/// and equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    MethodCall,
    StaticCall,
    Inheritance,
    Implementation,
    FieldAccess,
    Annotation,
    EntryPoint,
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkType::MethodCall => "method-call",
            LinkType::StaticCall => "static-call",
            LinkType::Inheritance => "inheritance",
            LinkType::Implementation => "implementation",
            LinkType::FieldAccess => "field-access",
            LinkType::Annotation => "annotation",
            LinkType::EntryPoint => "entry-point",
        };
        f.write_str(name)
    }
}

/// A directed, typed edge between two code elements.
///
/// Identity is structural over `(caller, callee, link_type)`: the edge set
/// is a set, not a multiset, and resubmitting an equal edge is a no-op. The
/// `filter` stamp records which namespace filter was in force when the edge
/// was admitted; it is baked into a fresh value by the context at admission
/// time and never participates in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub caller: Vertex,
    pub callee: Vertex,
    pub link_type: LinkType,
    /// `None` until admitted; set by [`crate::Context`].
    pub filter: Option<String>,
}

impl Link {
    pub fn new(caller: Vertex, callee: Vertex, link_type: LinkType) -> Self {
        Link {
            caller,
            callee,
            link_type,
            filter: None,
        }
    }

    /// A copy of this link with the admitting filter baked in.
    pub(crate) fn stamped(&self, filter: Option<&str>) -> Self {
        Link {
            caller: self.caller.clone(),
            callee: self.callee.clone(),
            link_type: self.link_type,
            filter: filter.map(str::to_owned),
        }
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.caller == other.caller
            && self.callee == other.callee
            && self.link_type == other.link_type
    }
}

impl Eq for Link {}

impl Hash for Link {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.caller.hash(state);
        self.callee.hash(state);
        self.link_type.hash(state);
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -[{}]-> {}",
            self.caller, self.link_type, self.callee
        )
    }
}
