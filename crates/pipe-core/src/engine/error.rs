use thiserror::Error;

use super::config::ConfigError;
use super::tasks::scoring::ScoringError;
use crate::core::io::clusters::ClusterFileError;
use crate::core::io::pdb::PdbError;
use crate::core::io::preformat::PreformatError;
use crate::core::io::tope::TopeError;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load structure '{path}': {source}", path = path.display())]
    StructureLoad {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Failed to pre-format '{path}': {source}", path = path.display())]
    Preformat {
        path: PathBuf,
        #[source]
        source: PreformatError,
    },

    #[error("Residue list error in '{path}': {source}", path = path.display())]
    ResidueList {
        path: PathBuf,
        #[source]
        source: TopeError,
    },

    #[error("Cluster file error in '{path}': {source}", path = path.display())]
    ClusterFile {
        path: PathBuf,
        #[source]
        source: ClusterFileError,
    },

    #[error("Chain '{chain}' not found in structure")]
    MissingChain { chain: char },

    #[error("Residue list '{path}' is empty", path = path.display())]
    EmptyPrediction { path: PathBuf },

    #[error("Cluster {index} has no representative")]
    EmptyCluster { index: usize },

    #[error("Contact scoring failed: {source}")]
    Scoring {
        #[from]
        source: ScoringError,
    },

    #[error("Failed to write score report '{path}': {source}", path = path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error on '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
