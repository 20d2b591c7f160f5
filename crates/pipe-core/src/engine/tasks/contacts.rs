use crate::core::models::residue::ResidueKey;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::is_within;
use crate::engine::config::ContactConfig;
use crate::engine::error::EngineError;
use itertools::Itertools;
use nalgebra::Point3;
use tracing::{debug, instrument, trace};

/// Interface residues on each side of a receptor/ligand pair, first-seen order, no repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSets {
    pub receptor: Vec<ResidueKey>,
    pub ligand: Vec<ResidueKey>,
}

/// Keys and alpha-carbon positions for one chain; residues without an alpha carbon are left out.
fn representative_positions(
    structure: &Structure,
    chain: char,
) -> Result<Vec<(ResidueKey, Point3<f64>)>, EngineError> {
    let residues = structure
        .residues_in_chain(chain)
        .ok_or(EngineError::MissingChain { chain })?;

    Ok(residues
        .iter()
        .filter_map(|&id| {
            let key = structure.residue_key(id)?;
            match structure.representative_position(id) {
                Some(position) => Some((key, position)),
                None => {
                    trace!(residue = %key, "Residue has no alpha carbon; skipping.");
                    None
                }
            }
        })
        .collect())
}

/// Finds every receptor/ligand residue pair whose alpha carbons are closer than the cutoff.
///
/// Both residues of each such pair end up in the result. The search is the plain
/// all-against-all comparison.
///
/// # Errors
///
/// Returns [`EngineError::MissingChain`] if either chain is absent from the structure.
#[instrument(skip_all, name = "contact_detection_task")]
pub fn detect_contacts(
    structure: &Structure,
    config: &ContactConfig,
) -> Result<ContactSets, EngineError> {
    let receptor = representative_positions(structure, config.receptor_chain)?;
    let ligand = representative_positions(structure, config.ligand_chain)?;

    let pairs: Vec<(&ResidueKey, &ResidueKey)> = receptor
        .iter()
        .cartesian_product(ligand.iter())
        .filter(|((_, p1), (_, p2))| is_within(p1, p2, config.cutoff))
        .map(|((k1, _), (k2, _))| (k1, k2))
        .collect();

    let contacts = ContactSets {
        receptor: pairs.iter().map(|(k, _)| *k).unique().cloned().collect(),
        ligand: pairs.iter().map(|(_, k)| *k).unique().cloned().collect(),
    };

    debug!(
        receptor_chain = %config.receptor_chain,
        ligand_chain = %config.ligand_chain,
        pairs = pairs.len(),
        receptor_contacts = contacts.receptor.len(),
        ligand_contacts = contacts.ligand.len(),
        "Contact detection complete."
    );
    Ok(contacts)
}
