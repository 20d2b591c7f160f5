use super::sibling_path;
use crate::core::io::preformat::{PreformatSummary, preformat};
use crate::engine::error::EngineError;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// How the cleaned file is named when no explicit output path is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// `<stem>_format.pdb`
    #[default]
    Format,
    /// `new_<file name>`
    Prefix,
}

impl OutputStyle {
    pub fn output_path(&self, input: &Path) -> PathBuf {
        match self {
            OutputStyle::Format => sibling_path(input, "_format.pdb"),
            OutputStyle::Prefix => {
                let name = input
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                input.with_file_name(format!("new_{}", name))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreformatResult {
    pub output: PathBuf,
    pub summary: PreformatSummary,
}

/// Cleans one PDB file for docking.
///
/// Nothing is written when the input holds no coordinate or terminator records.
#[instrument(skip_all, name = "preformat_workflow", fields(input = %input.display()))]
pub fn run(
    input: &Path,
    output: Option<&Path>,
    style: OutputStyle,
) -> Result<PreformatResult, EngineError> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| style.output_path(input));

    let file = File::open(input).map_err(|source| EngineError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    let mut buffer = Vec::new();
    let summary = preformat(&mut BufReader::new(file), &mut buffer).map_err(|source| {
        EngineError::Preformat {
            path: input.to_path_buf(),
            source,
        }
    })?;

    fs::write(&output, buffer).map_err(|source| EngineError::Io {
        path: output.clone(),
        source,
    })?;

    info!(
        output = %output.display(),
        records = summary.records_written,
        terminators_added = summary.terminators_added,
        "Pre-formatted structure written."
    );
    Ok(PreformatResult { output, summary })
}
