//! Parse-tree node hierarchy.
//!
//! The tree is a strict ownership tree: every child is exclusively owned by
//! its parent (`Box`/`Vec`/`Option<Box>`), created during a single parser
//! reduction and never re-owned elsewhere.
//!
//! # Module Structure
//!
//! - `node`: `ParseNode`, the closed `NodeKind` sum, child enumeration
//! - `node_type`: the `NodeType` tag enum for dispatch without structural
//!   type tests
//! - `builder`: two-phase builders for nodes whose last pieces arrive after
//!   the main construction point (`case`/`else`)

mod builder;
mod node;
mod node_type;

pub use builder::CaseBuilder;
pub use node::{ChildNodes, HashPair, NodeKind, ParseNode};
pub use node_type::NodeType;

#[cfg(test)]
mod tests;
