use super::epitope::RESIDUES_SUFFIX;
use super::{load_structure, residue_keys, sibling_path};
use crate::core::io::tope::TopeFile;
use crate::core::io::traits::ListWriter;
use crate::core::models::residue::ResidueKey;
use crate::engine::config::{BlockedPartition, ParatopeConfig};
use crate::engine::error::EngineError;
use crate::engine::tasks::bfactor::select_hot_residues;
use crate::engine::tasks::proximity::{expand_safe_zone, partition_by_chain};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

pub const BLOCKED_SUFFIX: &str = "_blockedresidues.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParatopeResult {
    /// Predicted paratope residues.
    pub paratope: Vec<ResidueKey>,
    /// Paratope plus every residue near it.
    pub safe: Vec<ResidueKey>,
    /// Every residue outside the safe zone.
    pub blocked: Vec<ResidueKey>,
    pub paratope_output: PathBuf,
    /// Blocked-residue files: one combined list, or one per chain.
    pub blocked_outputs: Vec<PathBuf>,
}

fn write_list(keys: &[ResidueKey], path: PathBuf) -> Result<PathBuf, EngineError> {
    TopeFile::write_to_path(keys, &path).map_err(|source| EngineError::ResidueList {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Extracts the predicted paratope of an i-Patch-annotated antibody and the residues to
/// block during docking.
///
/// Writes `<stem>_residues.txt`, then either `<stem>_blockedresidues.txt` or one
/// `<stem>_blocked<C>.txt` per chain.
#[instrument(skip_all, name = "paratope_workflow", fields(input = %input.display()))]
pub fn run(input: &Path, config: &ParatopeConfig) -> Result<ParatopeResult, EngineError> {
    let qualified = config.hot_residues.chain_qualified;
    let structure = load_structure(input)?;

    let hot = select_hot_residues(&structure, config.hot_residues.criterion);
    if hot.is_empty() {
        warn!("No residue matched the B-factor criterion; every residue will be blocked.");
    }
    let zone = expand_safe_zone(&structure, &hot, config.safe_zone.cutoff);

    let paratope = residue_keys(&structure, &hot, qualified);
    let safe = residue_keys(&structure, &zone.safe, qualified);
    let blocked = residue_keys(&structure, &zone.blocked, qualified);

    let paratope_output = write_list(&paratope, sibling_path(input, RESIDUES_SUFFIX))?;

    let blocked_outputs = match &config.safe_zone.partition {
        BlockedPartition::Combined => {
            vec![write_list(&blocked, sibling_path(input, BLOCKED_SUFFIX))?]
        }
        partition => partition_by_chain(&structure, &zone.blocked, partition)
            .into_iter()
            .map(|(chain, ids)| {
                let keys = residue_keys(&structure, &ids, qualified);
                write_list(&keys, sibling_path(input, &format!("_blocked{}.txt", chain)))
            })
            .collect::<Result<Vec<_>, _>>()?,
    };

    info!(
        paratope = paratope.len(),
        safe = safe.len(),
        blocked = blocked.len(),
        files = blocked_outputs.len() + 1,
        "Paratope and blocked residues written."
    );
    Ok(ParatopeResult {
        paratope,
        safe,
        blocked,
        paratope_output,
        blocked_outputs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{BfactorCriterion, HotResidueConfig, SafeZoneConfig};
    use crate::test_utils::{CaSpec, write_ca_only_pdb};
    use std::fs;
    use tempfile::tempdir;

    const ANTIBODY: &[CaSpec<'static>] = &[
        ("TYR", 'B', 32, (0.0, 0.0, 0.0), 35.0),
        ("SER", 'B', 33, (12.0, 0.0, 0.0), 3.0),
        ("GLY", 'B', 90, (40.0, 0.0, 0.0), 0.0),
        ("ASN", 'C', 50, (0.0, 15.0, 0.0), 12.0),
        ("THR", 'C', 51, (0.0, 60.0, 0.0), 0.0),
    ];

    fn config(cutoff: f64, partition: BlockedPartition) -> ParatopeConfig {
        ParatopeConfig {
            hot_residues: HotResidueConfig {
                criterion: BfactorCriterion::AtLeast(10.0),
                chain_qualified: true,
            },
            safe_zone: SafeZoneConfig { cutoff, partition },
        }
    }

    #[test]
    fn combined_blocked_list() {
        let dir = tempdir().unwrap();
        let input = write_ca_only_pdb(dir.path(), "antibody", ANTIBODY);

        let result = run(&input, &config(20.0, BlockedPartition::Combined)).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("antibody_residues.txt")).unwrap(),
            "TYR.B.32\nASN.C.50\n"
        );
        assert_eq!(
            result.blocked_outputs,
            vec![dir.path().join("antibody_blockedresidues.txt")]
        );
        assert_eq!(
            fs::read_to_string(&result.blocked_outputs[0]).unwrap(),
            "GLY.B.90\nTHR.C.51\n"
        );
        assert_eq!(result.safe.len() + result.blocked.len(), ANTIBODY.len());
    }

    #[test]
    fn per_chain_blocked_lists() {
        let dir = tempdir().unwrap();
        let input = write_ca_only_pdb(dir.path(), "antibody", ANTIBODY);

        let result = run(
            &input,
            &config(20.0, BlockedPartition::PerChain(vec!['B', 'C'])),
        )
        .unwrap();

        assert_eq!(
            result.blocked_outputs,
            vec![
                dir.path().join("antibody_blockedB.txt"),
                dir.path().join("antibody_blockedC.txt"),
            ]
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("antibody_blockedB.txt")).unwrap(),
            "GLY.B.90\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("antibody_blockedC.txt")).unwrap(),
            "THR.C.51\n"
        );
    }

    #[test]
    fn smaller_cutoff_blocks_more() {
        let dir = tempdir().unwrap();
        let input = write_ca_only_pdb(dir.path(), "antibody", ANTIBODY);

        let wide = run(&input, &config(20.0, BlockedPartition::Combined)).unwrap();
        let narrow = run(&input, &config(10.0, BlockedPartition::Combined)).unwrap();

        assert!(wide.blocked.iter().all(|k| narrow.blocked.contains(k)));
        assert!(narrow.blocked.contains(&ResidueKey::new("SER", Some('B'), 33)));
        assert_eq!(wide.paratope, narrow.paratope);
    }
}
