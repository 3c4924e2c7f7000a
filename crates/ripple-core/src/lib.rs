//! Ripple Core — concurrent graph assembly and admission control for
//! test-impact analysis

pub mod context;
pub mod model;


#[cfg(test)]
pub mod test_utils;

pub use context::{Context, ContextError};
pub use model::{Link, LinkType, Vertex};
