use crate::core::models::ids::ResidueId;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::is_within;
use crate::engine::config::BlockedPartition;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// A split of every residue in a structure into those near the hot residues and the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SafeZone {
    /// Hot residues plus their neighbours, in structure order.
    pub safe: Vec<ResidueId>,
    /// Everything else, in structure order.
    pub blocked: Vec<ResidueId>,
}

/// Expands `seeds` to every residue whose alpha carbon lies within `cutoff` of a seed's.
///
/// Seeds are always safe, even when they lack an alpha carbon. Every residue of the
/// structure lands in exactly one of the two lists.
#[instrument(skip_all, name = "proximity_expansion_task")]
pub fn expand_safe_zone(structure: &Structure, seeds: &[ResidueId], cutoff: f64) -> SafeZone {
    let seed_set: HashSet<ResidueId> = seeds.iter().copied().collect();
    let seed_positions: Vec<_> = seeds
        .iter()
        .filter_map(|&id| structure.representative_position(id))
        .collect();

    let (safe, blocked): (Vec<ResidueId>, Vec<ResidueId>) = structure
        .residues_iter()
        .map(|(id, _)| id)
        .partition(|id| {
            seed_set.contains(id)
                || structure.representative_position(*id).is_some_and(|pos| {
                    seed_positions
                        .iter()
                        .any(|seed_pos| is_within(&pos, seed_pos, cutoff))
                })
        });

    debug!(
        seeds = seed_set.len(),
        cutoff,
        safe = safe.len(),
        blocked = blocked.len(),
        "Safe zone expanded."
    );
    SafeZone { safe, blocked }
}

/// Groups residues by chain according to `partition`.
///
/// Listed chains appear in the given order and are present even when empty. `AllChains`
/// follows structure order. `Combined` returns an empty list; callers write a single file.
pub fn partition_by_chain(
    structure: &Structure,
    residues: &[ResidueId],
    partition: &BlockedPartition,
) -> Vec<(char, Vec<ResidueId>)> {
    let chains: Vec<char> = match partition {
        BlockedPartition::Combined => return Vec::new(),
        BlockedPartition::PerChain(chains) => chains.clone(),
        BlockedPartition::AllChains => structure.chains_iter().map(|(_, c)| c.id).collect(),
    };

    let chain_of = |id: ResidueId| {
        structure
            .residue(id)
            .and_then(|r| structure.chain(r.chain_id))
            .map(|c| c.id)
    };

    chains
        .into_iter()
        .map(|chain| {
            let members = residues
                .iter()
                .copied()
                .filter(|&id| chain_of(id) == Some(chain))
                .collect();
            (chain, members)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pdb::PdbFile;
    use crate::core::io::traits::StructureFile;
    use crate::test_utils::{CaSpec, atom_line, ca_only_pdb};
    use std::io::Cursor;

    const ANTIBODY: &[CaSpec<'static>] = &[
        ("TYR", 'H', 1, (0.0, 0.0, 0.0), 40.0),
        ("SER", 'H', 2, (15.0, 0.0, 0.0), 0.0),
        ("GLY", 'H', 3, (35.0, 0.0, 0.0), 0.0),
        ("ASN", 'L', 1, (0.0, 19.9, 0.0), 0.0),
        ("THR", 'L', 2, (0.0, 20.0, 0.0), 0.0),
    ];

    fn parse(text: &str) -> Structure {
        PdbFile::read_from(&mut Cursor::new(text.as_bytes())).unwrap()
    }

    fn ids(structure: &Structure) -> Vec<ResidueId> {
        structure.residues_iter().map(|(id, _)| id).collect()
    }

    fn names(structure: &Structure, ids: &[ResidueId]) -> Vec<String> {
        ids.iter()
            .map(|&id| structure.residue_key(id).unwrap().to_string())
            .collect()
    }

    #[test]
    fn safe_zone_includes_seed_and_strict_neighbours() {
        let structure = parse(&ca_only_pdb(ANTIBODY));
        let all = ids(&structure);
        let zone = expand_safe_zone(&structure, &all[..1], 20.0);

        assert_eq!(
            names(&structure, &zone.safe),
            vec!["TYR.H.1", "SER.H.2", "ASN.L.1"]
        );
        assert_eq!(names(&structure, &zone.blocked), vec!["GLY.H.3", "THR.L.2"]);
    }

    #[test]
    fn safe_and_blocked_partition_the_population() {
        let structure = parse(&ca_only_pdb(ANTIBODY));
        let all = ids(&structure);

        for cutoff in [0.0, 5.0, 20.0, 100.0] {
            let zone = expand_safe_zone(&structure, &all[1..2], cutoff);
            let safe: HashSet<_> = zone.safe.iter().collect();
            let blocked: HashSet<_> = zone.blocked.iter().collect();
            assert!(safe.is_disjoint(&blocked));
            assert_eq!(safe.len() + blocked.len(), all.len());
            assert!(zone.safe.contains(&all[1]));
        }
    }

    #[test]
    fn seed_without_alpha_carbon_is_safe_but_expands_nothing() {
        let text = [
            atom_line(1, "N", "TYR", 'H', 1, (0.0, 0.0, 0.0), 40.0),
            atom_line(2, "CA", "SER", 'H', 2, (1.0, 0.0, 0.0), 0.0),
        ]
        .join("\n");
        let structure = parse(&text);
        let all = ids(&structure);
        let zone = expand_safe_zone(&structure, &all[..1], 20.0);
        assert_eq!(zone.safe, vec![all[0]]);
        assert_eq!(zone.blocked, vec![all[1]]);
    }

    #[test]
    fn no_seeds_blocks_everything() {
        let structure = parse(&ca_only_pdb(ANTIBODY));
        let zone = expand_safe_zone(&structure, &[], 20.0);
        assert!(zone.safe.is_empty());
        assert_eq!(zone.blocked, ids(&structure));
    }

    #[test]
    fn per_chain_partition_lists_requested_chains_even_when_empty() {
        let structure = parse(&ca_only_pdb(ANTIBODY));
        let all = ids(&structure);
        let groups = partition_by_chain(
            &structure,
            &all,
            &BlockedPartition::PerChain(vec!['L', 'C']),
        );

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, 'L');
        assert_eq!(names(&structure, &groups[0].1), vec!["ASN.L.1", "THR.L.2"]);
        assert_eq!(groups[1], ('C', Vec::new()));
    }

    #[test]
    fn all_chains_partition_follows_structure_order() {
        let structure = parse(&ca_only_pdb(ANTIBODY));
        let all = ids(&structure);
        let groups = partition_by_chain(&structure, &all, &BlockedPartition::AllChains);
        let chains: Vec<char> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(chains, vec!['H', 'L']);
        assert_eq!(groups[0].1.len() + groups[1].1.len(), all.len());

        assert!(partition_by_chain(&structure, &all, &BlockedPartition::Combined).is_empty());
    }
}
