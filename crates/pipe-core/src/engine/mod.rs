//! # Engine Module
//!
//! The computational layer of PIPE: everything between parsed files and finished results.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Cutoffs, thresholds, chain selections and B-factor
//!   criteria, with builders that validate them
//! - **Error Handling** ([`error`]) - The engine-level error type wrapping lower-layer failures
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for front-ends
//! - **Tasks** ([`tasks`]) - Hot-residue selection, contact detection, proximity expansion
//!   and fractional contact scoring
//!
//! Tasks are pure functions over a read-only [`Structure`](crate::core::models::structure::Structure);
//! nothing here keeps state between calls.

pub mod config;
pub mod error;
pub mod progress;
pub mod tasks;
