//! # Core Models Module
//!
//! Data structures describing a molecular system as it moves through a trajectory.
//!
//! ## Key Components
//!
//! - [`atom`] - Static identity of one atom (name, residue, chain, element)
//! - [`residue`] - Amino-acid residue name classification
//! - [`topology`] - The static atom layout shared by every frame of a trajectory
//! - [`frame`] - One timestep: a shared topology plus one coordinate per atom
//!
//! ## Usage
//!
//! ```ignore
//! use drnkit::core::models::{atom::Atom, frame::Frame, topology::Topology};
//! use nalgebra::Point3;
//! use std::sync::Arc;
//!
//! let topology = Arc::new(Topology::from_atoms(vec![
//!     Atom::new(1, "CA", "GLY", 1, 'A'),
//! ]));
//! let frame = Frame::new(1, topology, vec![Point3::new(0.0, 0.0, 0.0)])?;
//! ```

pub mod atom;
pub mod frame;
pub mod residue;
pub mod topology;
