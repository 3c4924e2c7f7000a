//! Ripple SCM — version-control change records and the change scope handed
//! to an analysis run

pub mod change;
pub mod scope;

pub use change::{Change, ChangeKind};
pub use scope::ChangeScope;
