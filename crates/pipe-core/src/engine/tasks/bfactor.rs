use crate::core::models::ids::ResidueId;
use crate::core::models::structure::Structure;
use crate::engine::config::BfactorCriterion;
use tracing::{debug, instrument};

/// Residues with at least one atom whose B-factor satisfies `criterion`.
///
/// Residues come back in structure order (chain by chain, then file order), each once.
#[instrument(skip_all, name = "hot_residue_selection_task")]
pub fn select_hot_residues(structure: &Structure, criterion: BfactorCriterion) -> Vec<ResidueId> {
    let selected: Vec<ResidueId> = structure
        .residues_iter()
        .filter(|(_, residue)| {
            residue
                .atoms()
                .iter()
                .filter_map(|&atom_id| structure.atom(atom_id))
                .any(|atom| criterion.accepts(atom.b_factor))
        })
        .map(|(id, _)| id)
        .collect();

    debug!(?criterion, count = selected.len(), "Selected hot residues.");
    selected
}
