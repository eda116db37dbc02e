//! Per-frame residue contact graphs and the traversal helpers shared by the
//! shortest-path centralities.

pub mod contact;
pub mod paths;

pub use contact::{ContactGraph, GraphError};
