//! Node tree produced by the markup tree builder.
//!
//! Nodes live in an append-only arena and are addressed by [`NodeId`].
//! The tree is immutable once the builder hands it out.

pub mod node;
pub mod tree;

pub use node::*;
pub use tree::Dom;
