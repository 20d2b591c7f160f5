//! # PIPE Core Library
//!
//! Structure-level building blocks for the PIPE antibody-antigen docking workflow: extracting
//! predicted epitope/paratope residues from B-factor annotated structures, and filtering
//! docking-decoy clusters by how well their interfaces agree with those predictions.
//!
//! ## Architecture
//!
//! The library keeps the same three layers throughout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `ResidueKey`,
//!   `Cluster`) and the file formats PIPE reads and writes (PDB, residue lists, cluster
//!   files).
//!
//! - **[`engine`]: The Logic Core.** Configuration, errors, progress reporting and the
//!   geometric tasks: B-factor selection, contact detection, proximity expansion and
//!   fractional contact scoring.
//!
//! - **[`workflows`]: The Public API.** One entry point per pipeline step, tying `core` and
//!   `engine` together. Each workflow runs once over its inputs and returns plain values.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod test_utils;
