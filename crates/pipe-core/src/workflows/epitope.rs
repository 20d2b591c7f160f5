use super::{load_structure, residue_keys, sibling_path};
use crate::core::io::tope::TopeFile;
use crate::core::io::traits::ListWriter;
use crate::core::models::residue::ResidueKey;
use crate::engine::config::EpitopeConfig;
use crate::engine::error::EngineError;
use crate::engine::tasks::bfactor::select_hot_residues;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

pub const RESIDUES_SUFFIX: &str = "_residues.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpitopeResult {
    pub residues: Vec<ResidueKey>,
    pub output: PathBuf,
}

/// Extracts the predicted epitope of an EpiPred-annotated antigen into `<stem>_residues.txt`.
#[instrument(skip_all, name = "epitope_workflow", fields(input = %input.display()))]
pub fn run(input: &Path, config: &EpitopeConfig) -> Result<EpitopeResult, EngineError> {
    let structure = load_structure(input)?;
    let hot = select_hot_residues(&structure, config.hot_residues.criterion);
    let residues = residue_keys(&structure, &hot, config.hot_residues.chain_qualified);

    if residues.is_empty() {
        warn!("No residue matched the B-factor criterion; writing an empty list.");
    }

    let output = sibling_path(input, RESIDUES_SUFFIX);
    TopeFile::write_to_path(&residues, &output).map_err(|source| EngineError::ResidueList {
        path: output.clone(),
        source,
    })?;

    info!(count = residues.len(), output = %output.display(), "Epitope residues written.");
    Ok(EpitopeResult { residues, output })
}
