use super::ids::{AtomId, ChainId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name of the atom whose position stands in for the whole residue in distance checks.
pub const REPRESENTATIVE_ATOM_NAME: &str = "CA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub number: isize,                      // Residue sequence number from source file
    pub insertion_code: Option<char>,       // PDB insertion code, if any
    pub name: String,                       // Name of the residue (e.g., "ALA", "GLY")
    pub chain_id: ChainId,                  // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,          // Atoms belonging to this residue, in file order
    atom_name_map: HashMap<String, AtomId>, // Map from atom name to its stable ID
}

impl Residue {
    pub(crate) fn new(
        number: isize,
        insertion_code: Option<char>,
        name: &str,
        chain_id: ChainId,
    ) -> Self {
        Self {
            number,
            insertion_code,
            name: name.to_string(),
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        // First occurrence wins, matching how alternate locations are collapsed on read.
        self.atom_name_map
            .entry(atom_name.to_string())
            .or_insert(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    /// The alpha carbon, if the residue has one.
    pub fn representative_atom(&self) -> Option<AtomId> {
        self.get_atom_id_by_name(REPRESENTATIVE_ATOM_NAME)
    }
}

/// Identity of a residue across files: `(name, chain, sequence number)`.
///
/// Residue-list files write this as `ALA.A.10`, or `ALA.10` when the chain is left out.
/// A key without a chain is *unqualified*; see [`ResidueKey::matches`] for how it compares
/// against qualified keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub name: String,
    pub chain: Option<char>,
    pub number: isize,
}

impl ResidueKey {
    pub fn new(name: &str, chain: Option<char>, number: isize) -> Self {
        Self {
            name: name.to_string(),
            chain,
            number,
        }
    }

    pub fn is_qualified(&self) -> bool {
        self.chain.is_some()
    }

    /// Returns the same key with the chain identifier dropped.
    pub fn unqualified(&self) -> Self {
        Self {
            name: self.name.clone(),
            chain: None,
            number: self.number,
        }
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.chain {
            Some(chain) => write!(f, "{}.{}.{}", self.name, chain, self.number),
            None => write!(f, "{}.{}", self.name, self.number),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseResidueKeyError {
    #[error("expected 'name.chain.seq' or 'name.seq', found '{0}'")]
    InvalidFormat(String),
    #[error("residue name is empty in '{0}'")]
    EmptyName(String),
    #[error("chain identifier must be a single character in '{0}'")]
    InvalidChain(String),
    #[error("invalid sequence number in '{0}'")]
    InvalidNumber(String),
}

impl FromStr for ResidueKey {
    type Err = ParseResidueKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('.').collect();
        let (name, chain, number) = match parts.as_slice() {
            [name, number] => (*name, None, *number),
            [name, chain, number] => {
                let mut chars = chain.chars();
                let chain = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return Err(ParseResidueKeyError::InvalidChain(s.to_string())),
                };
                (*name, Some(chain), *number)
            }
            _ => return Err(ParseResidueKeyError::InvalidFormat(s.to_string())),
        };

        if name.is_empty() {
            return Err(ParseResidueKeyError::EmptyName(s.to_string()));
        }
        let number = number
            .parse::<isize>()
            .map_err(|_| ParseResidueKeyError::InvalidNumber(s.to_string()))?;

        Ok(Self::new(name, chain, number))
    }
}
