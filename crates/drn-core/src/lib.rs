//! # DRN++ Core Library
//!
//! A library for analysing molecular dynamics trajectories of proteins through
//! Dynamic Residue Networks (DRNs): per-frame contact graphs over one
//! representative atom per residue, whose graph centralities are computed frame by
//! frame and reduced to per-residue summary statistics.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Topology`, `Frame`),
//!   structured atom selections, the contact graph builder, the centrality
//!   algorithms, and file I/O (PDB frame sources, graph interchange formats,
//!   numeric tables, mmCIF and plots).
//!
//! - **[`engine`]: The Pipeline.** The stateful layer that drives frames through
//!   graph construction and metric computation, accumulates the `Dataset`, applies
//!   the failure policy and reduces everything into aggregate tables.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that tie the engine
//!   and core together, such as the full network analysis and the mapping of
//!   aggregate statistics back onto a 3D structure.

pub mod core;
pub mod engine;
pub mod workflows;
