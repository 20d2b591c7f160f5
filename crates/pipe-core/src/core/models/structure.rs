use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::{Residue, ResidueKey};
use nalgebra::Point3;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Key used to look residues up inside a chain: sequence number plus insertion code.
type ResidueLookupKey = (ChainId, isize, Option<char>);

/// A parsed structure: chains of residues of atoms.
///
/// Storage uses slot maps so ids stay stable; iteration over chains and residues follows
/// the order in which they were added, which for parsed files is file order. A structure
/// is built once (see [`StructureBuilder`]) and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    atoms: SlotMap<AtomId, Atom>,
    residues: SlotMap<ResidueId, Residue>,
    chains: SlotMap<ChainId, Chain>,
    /// Chains in insertion order.
    chain_order: Vec<ChainId>,
    residue_id_map: HashMap<ResidueLookupKey, ResidueId>,
    chain_id_map: HashMap<char, ChainId>,
}

impl Structure {
    /// Creates a new, empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Returns an iterator over all atoms, in the order they were added.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Returns an iterator over all residues, chain by chain, in file order.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.chains_iter().flat_map(move |(_, chain)| {
            chain
                .residues()
                .iter()
                .map(move |&id| (id, &self.residues[id]))
        })
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over all chains, in the order they were added.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order.iter().map(move |&id| (id, &self.chains[id]))
    }

    /// Finds a chain ID by its single-character identifier.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Residues of the chain with the given identifier, or `None` if there is no such chain.
    pub fn residues_in_chain(&self, id: char) -> Option<&[ResidueId]> {
        self.find_chain_by_id(id)
            .and_then(|chain_id| self.chains.get(chain_id))
            .map(Chain::residues)
    }

    /// The `name.chain.seq` identity of a residue.
    pub fn residue_key(&self, id: ResidueId) -> Option<ResidueKey> {
        let residue = self.residues.get(id)?;
        let chain = self.chains.get(residue.chain_id)?;
        Some(ResidueKey::new(&residue.name, Some(chain.id), residue.number))
    }

    /// Position of the residue's representative (alpha carbon) atom.
    ///
    /// Returns `None` when the residue does not exist or has no alpha carbon.
    pub fn representative_position(&self, id: ResidueId) -> Option<Point3<f64>> {
        let residue = self.residues.get(id)?;
        let atom_id = residue.representative_atom()?;
        self.atoms.get(atom_id).map(|atom| atom.position)
    }

    /// Adds a new chain to the structure or returns the existing one.
    pub fn add_chain(&mut self, id: char) -> ChainId {
        if let Some(&existing) = self.chain_id_map.get(&id) {
            return existing;
        }
        let chain_id = self.chains.insert(Chain::new(id));
        self.chain_id_map.insert(id, chain_id);
        self.chain_order.push(chain_id);
        chain_id
    }

    /// Adds a new residue to a chain or returns the existing one.
    ///
    /// Returns `None` if the chain does not exist.
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        insertion_code: Option<char>,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, residue_number, insertion_code);

        if let Some(&existing) = self.residue_id_map.get(&key) {
            return Some(existing);
        }

        let residue_id = self
            .residues
            .insert(Residue::new(residue_number, insertion_code, name, chain_id));
        self.residue_id_map.insert(key, residue_id);
        chain.residues.push(residue_id);
        Some(residue_id)
    }

    /// Adds an atom to a residue.
    ///
    /// Returns `None` if the residue does not exist.
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }

        let name = atom.name.clone();
        let atom_id = self.atoms.insert(Atom { residue_id, ..atom });
        self.residues[residue_id].add_atom(&name, atom_id);
        Some(atom_id)
    }
}

/// Incremental construction of a [`Structure`] from a stream of coordinate records.
///
/// The builder tracks the current chain and residue so a reader only has to announce
/// boundaries; repeated announcements of an existing chain or residue reuse it.
#[derive(Default)]
pub struct StructureBuilder {
    structure: Structure,
    current_chain: Option<ChainId>,
    current_residue: Option<ResidueId>,
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_chain(&mut self, id: char) -> &mut Self {
        self.current_chain = Some(self.structure.add_chain(id));
        self.current_residue = None;
        self
    }

    /// Starts (or resumes) a residue in the current chain.
    ///
    /// Returns `None` when no chain has been started.
    pub fn start_residue(
        &mut self,
        number: isize,
        insertion_code: Option<char>,
        name: &str,
    ) -> Option<&mut Self> {
        let chain_id = self.current_chain?;
        self.current_residue =
            self.structure
                .add_residue(chain_id, number, insertion_code, name);
        Some(self)
    }

    /// Adds an atom to the current residue.
    ///
    /// Returns `None` when no residue has been started.
    pub fn add_atom(&mut self, atom: Atom) -> Option<AtomId> {
        let residue_id = self.current_residue?;
        self.structure.add_atom_to_residue(residue_id, atom)
    }

    pub fn is_empty(&self) -> bool {
        self.structure.atoms.is_empty()
    }

    pub fn build(self) -> Structure {
        self.structure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    struct TestRefs {
        chain_a: ChainId,
        gly: ResidueId,
        ala: ResidueId,
        ser_b: ResidueId,
    }

    fn create_standard_test_structure() -> (Structure, TestRefs) {
        let mut structure = Structure::new();

        let chain_a = structure.add_chain('A');
        let gly = structure.add_residue(chain_a, 1, None, "GLY").unwrap();
        structure
            .add_atom_to_residue(gly, Atom::new("N", gly, Point3::new(0.0, 0.0, 0.0)))
            .unwrap();
        structure
            .add_atom_to_residue(gly, Atom::new("CA", gly, Point3::new(1.4, 0.0, 0.0)))
            .unwrap();

        let ala = structure.add_residue(chain_a, 2, None, "ALA").unwrap();
        structure
            .add_atom_to_residue(ala, Atom::new("N", ala, Point3::new(2.0, 1.0, 0.0)))
            .unwrap();

        let chain_b = structure.add_chain('B');
        let ser_b = structure.add_residue(chain_b, 1, None, "SER").unwrap();
        structure
            .add_atom_to_residue(ser_b, Atom::new("CA", ser_b, Point3::new(5.0, 0.0, 0.0)))
            .unwrap();

        (
            structure,
            TestRefs {
                chain_a,
                gly,
                ala,
                ser_b,
            },
        )
    }

    #[test]
    fn structure_creation_and_access() {
        let (structure, refs) = create_standard_test_structure();

        assert_eq!(structure.atoms_iter().count(), 4);
        assert_eq!(structure.residues_iter().count(), 3);
        assert_eq!(structure.chains_iter().count(), 2);
        assert!(structure.find_chain_by_id('C').is_none());
        assert_eq!(structure.find_chain_by_id('A'), Some(refs.chain_a));
        assert_eq!(
            structure.residues_in_chain('A'),
            Some(&[refs.gly, refs.ala][..])
        );
    }

    #[test]
    fn residues_iter_follows_chain_then_file_order() {
        let (structure, refs) = create_standard_test_structure();
        let ids: Vec<_> = structure.residues_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![refs.gly, refs.ala, refs.ser_b]);
    }

    #[test]
    fn residue_key_includes_chain_identifier() {
        let (structure, refs) = create_standard_test_structure();
        assert_eq!(
            structure.residue_key(refs.ser_b),
            Some(ResidueKey::new("SER", Some('B'), 1))
        );
    }

    #[test]
    fn representative_position_requires_alpha_carbon() {
        let (structure, refs) = create_standard_test_structure();
        assert_eq!(
            structure.representative_position(refs.gly),
            Some(Point3::new(1.4, 0.0, 0.0))
        );
        assert_eq!(structure.representative_position(refs.ala), None);
    }

    #[test]
    fn add_chain_and_residue_are_idempotent() {
        let (mut structure, refs) = create_standard_test_structure();
        assert_eq!(structure.add_chain('A'), refs.chain_a);
        assert_eq!(
            structure.add_residue(refs.chain_a, 1, None, "GLY"),
            Some(refs.gly)
        );
        assert_eq!(structure.residues_in_chain('A').unwrap().len(), 2);
    }

    #[test]
    fn add_atom_sets_parent_residue() {
        let (mut structure, refs) = create_standard_test_structure();
        let stray = Atom::new("CB", ResidueId::default(), Point3::origin());
        let atom_id = structure.add_atom_to_residue(refs.ala, stray).unwrap();
        assert_eq!(structure.atom(atom_id).unwrap().residue_id, refs.ala);
    }

    #[test]
    fn builder_requires_chain_and_residue_before_atoms() {
        let mut builder = StructureBuilder::new();
        assert!(builder.start_residue(1, None, "ALA").is_none());
        assert!(
            builder
                .add_atom(Atom::new("CA", ResidueId::default(), Point3::origin()))
                .is_none()
        );
        assert!(builder.is_empty());

        builder.start_chain('H');
        builder.start_residue(1, None, "ALA").unwrap();
        builder
            .add_atom(Atom::new("CA", ResidueId::default(), Point3::origin()))
            .unwrap();
        let structure = builder.build();
        assert_eq!(structure.residues_in_chain('H').unwrap().len(), 1);
    }
}
