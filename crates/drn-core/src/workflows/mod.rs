//! # Workflows Module
//!
//! End-to-end entry points that tie the core algorithms and the engine
//! together.
//!
//! - **Network Workflow** ([`network`]) - Reads a trajectory, builds a contact
//!   network per frame, computes centralities and aggregates them across
//!   frames.
//! - **Structure Mapping** ([`mapping`]) - Writes aggregated values onto a
//!   reference structure as mmCIF B-factors.

pub mod mapping;
pub mod network;
