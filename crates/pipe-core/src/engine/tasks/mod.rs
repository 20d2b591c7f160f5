//! Computational units used by the workflows.
//!
//! Each task takes a parsed structure (or residue keys derived from one) and returns plain
//! values. Distances are always measured between representative alpha-carbon atoms.

pub mod bfactor;
pub mod contacts;
pub mod proximity;
pub mod scoring;
