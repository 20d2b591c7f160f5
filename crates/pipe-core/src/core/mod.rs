//! # Core Module
//!
//! Data models and file I/O shared by every pipeline step.
//!
//! - **Structure representation** ([`models`]) - atoms, residues, chains, structures, clusters
//!   and the [`ResidueKey`](models::residue::ResidueKey) value type used for residue identity
//! - **File I/O** ([`io`]) - PDB reading and pre-formatting, residue-list (tope) files and
//!   HADDOCK cluster files
//! - **Utilities** ([`utils`]) - record classification and geometry helpers

pub mod io;
pub mod models;
pub mod utils;
