//! # Core Module
//!
//! Fundamental building blocks of DRN++: the molecular data models, atom
//! selection, the contact graph and the centrality algorithms evaluated on it.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, topologies and trajectory frames
//! - **Atom Selection** ([`selection`]) - Structured predicates choosing one node atom per residue
//! - **Contact Graphs** ([`graph`]) - Distance-threshold residue networks and breadth-first traversals
//! - **Centralities** ([`metrics`]) - The closed set of per-node graph metrics
//! - **File I/O** ([`io`]) - PDB frame sources and every output format the pipeline produces
//!
//! Everything in this module is free of pipeline state: a frame and a selection
//! always produce the same graph, and a graph always produces the same metric
//! vectors.

pub mod graph;
pub mod io;
pub mod metrics;
pub mod models;
pub mod selection;
