//! Provides input/output for the file formats PIPE works with.
//!
//! Structure files are read through the [`traits::StructureFile`] trait. Line-oriented list
//! files (residue lists, cluster files) implement [`traits::ListReader`], [`traits::ListWriter`]
//! or both, depending on which direction PIPE uses them in. All of them supply path-based
//! helpers on top of reader/writer primitives.

pub mod clusters;
pub mod pdb;
pub mod preformat;
pub mod tope;
pub mod traits;
