//! # Workflows Module
//!
//! One entry point per PIPE step. Each workflow loads its inputs, runs the engine tasks
//! and returns what it produced; the ones that own an output naming convention also write
//! their files.
//!
//! - **Pre-formatting** ([`preformat`]) - Clean PDB files before docking
//! - **Epitope extraction** ([`epitope`]) - EpiPred-annotated antigen to residue list
//! - **Paratope extraction** ([`paratope`]) - i-Patch-annotated antibody to residue list,
//!   plus the blocked residues outside the safe zone
//! - **Cluster naming** ([`name_clusters`]) - FCC model indices to structure names
//! - **Cluster filtering** ([`filter`]) - Keep clusters whose interface agrees with the
//!   predictions

pub mod epitope;
pub mod filter;
pub mod name_clusters;
pub mod paratope;
pub mod preformat;

use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::models::ids::ResidueId;
use crate::core::models::residue::ResidueKey;
use crate::core::models::structure::Structure;
use crate::engine::error::EngineError;
use itertools::Itertools;
use std::path::{Path, PathBuf};

pub(crate) fn load_structure(path: &Path) -> Result<Structure, EngineError> {
    PdbFile::read_from_path(path).map_err(|source| EngineError::StructureLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// `<dir>/<stem><suffix>` next to `input`, where `stem` drops only the last extension.
pub(crate) fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, suffix))
}

/// Residue keys for `ids`, optionally without chain identifiers (duplicates then collapse).
pub(crate) fn residue_keys(
    structure: &Structure,
    ids: &[ResidueId],
    chain_qualified: bool,
) -> Vec<ResidueKey> {
    ids.iter()
        .filter_map(|&id| structure.residue_key(id))
        .map(|key| {
            if chain_qualified {
                key
            } else {
                key.unqualified()
            }
        })
        .unique()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ca_only_pdb;
    use std::io::Cursor;

    #[test]
    fn sibling_path_drops_only_the_last_extension() {
        assert_eq!(
            sibling_path(Path::new("data/pdb1.pdb"), "_residues.txt"),
            PathBuf::from("data/pdb1_residues.txt")
        );
        assert_eq!(
            sibling_path(Path::new("ab.model.pdb"), "_format.pdb"),
            PathBuf::from("ab.model_format.pdb")
        );
        assert_eq!(
            sibling_path(Path::new("antigen"), "_residues.txt"),
            PathBuf::from("antigen_residues.txt")
        );
    }

    #[test]
    fn inputs_differing_in_a_middle_segment_get_distinct_outputs() {
        let a = sibling_path(Path::new("runs/lig.epi1.pdb"), "_residues.txt");
        let b = sibling_path(Path::new("runs/lig.epi2.pdb"), "_residues.txt");
        assert_eq!(a, PathBuf::from("runs/lig.epi1_residues.txt"));
        assert_ne!(a, b);
    }

    #[test]
    fn unqualified_keys_collapse_across_chains() {
        let structure = PdbFile::read_from(&mut Cursor::new(
            ca_only_pdb(&[
                ("ALA", 'B', 10, (0.0, 0.0, 0.0), 0.0),
                ("ALA", 'C', 10, (5.0, 0.0, 0.0), 0.0),
                ("GLY", 'C', 11, (9.0, 0.0, 0.0), 0.0),
            ])
            .into_bytes(),
        ))
        .unwrap();
        let ids: Vec<_> = structure.residues_iter().map(|(id, _)| id).collect();

        assert_eq!(residue_keys(&structure, &ids, true).len(), 3);
        assert_eq!(
            residue_keys(&structure, &ids, false),
            vec![
                ResidueKey::new("ALA", None, 10),
                ResidueKey::new("GLY", None, 11),
            ]
        );
    }
}
