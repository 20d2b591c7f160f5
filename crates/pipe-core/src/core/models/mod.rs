//! # Core Models Module
//!
//! The data structures PIPE computes on. A [`structure::Structure`] is parsed once from a
//! PDB file and is read-only afterwards; residues inside it are addressed through stable
//! slot-map ids ([`ids`]) and identified across files by [`residue::ResidueKey`].
//!
//! - [`atom`] - coordinates, occupancy and B-factor of a single atom
//! - [`residue`] - residues and the `name.chain.seq` residue key
//! - [`chain`] - ordered residue lists per chain identifier
//! - [`structure`] - the complete parsed model with lookup maps
//! - [`cluster`] - docking-decoy clusters and their representatives
//! - [`ids`] - slot-map key types

pub mod atom;
pub mod chain;
pub mod cluster;
pub mod ids;
pub mod residue;
pub mod structure;
