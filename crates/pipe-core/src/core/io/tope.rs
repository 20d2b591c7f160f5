use crate::core::io::traits::{ListFormat, ListReader, ListWriter};
use crate::core::models::residue::{ParseResidueKeyError, ResidueKey};
use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseResidueKeyError,
    },
}

/// Residue-list files: one `name.chain.seq` (or `name.seq`) key per line, no header.
pub struct TopeFile;

impl ListFormat for TopeFile {
    type Item = ResidueKey;
    type Error = TopeError;
}

impl ListReader for TopeFile {
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<ResidueKey>, TopeError> {
        let mut keys = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            if line.trim().is_empty() {
                continue;
            }
            let key = line.parse().map_err(|source| TopeError::Parse {
                line: line_num + 1,
                source,
            })?;
            keys.push(key);
        }
        Ok(keys)
    }
}

impl ListWriter for TopeFile {
    fn write_to(items: &[ResidueKey], writer: &mut impl Write) -> Result<(), TopeError> {
        for key in items {
            writeln!(writer, "{}", key)?;
        }
        Ok(())
    }
}

/// An immutable, de-duplicated set of residue keys that remembers insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopeSet {
    keys: Vec<ResidueKey>,
    index: HashSet<ResidueKey>,
    chainless: HashSet<ResidueKey>,
}

impl TopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a residue-list file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TopeError> {
        Ok(TopeFile::read_from_path(path)?.into_iter().collect())
    }

    /// Inserts a key, returning `false` if it was already present.
    pub fn insert(&mut self, key: ResidueKey) -> bool {
        if self.index.contains(&key) {
            return false;
        }
        self.index.insert(key.clone());
        self.chainless.insert(key.unqualified());
        self.keys.push(key);
        true
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResidueKey> {
        self.keys.iter()
    }

    pub fn as_slice(&self) -> &[ResidueKey] {
        &self.keys
    }

    /// Exact membership.
    pub fn contains(&self, key: &ResidueKey) -> bool {
        self.index.contains(key)
    }

    /// Chain-aware membership: a key without a chain identifier, on either side, matches the
    /// same residue name and number on any chain.
    pub fn contains_match(&self, other: &ResidueKey) -> bool {
        if other.is_qualified() {
            self.index.contains(other) || self.index.contains(&other.unqualified())
        } else {
            self.chainless.contains(other)
        }
    }
}

impl FromIterator<ResidueKey> for TopeSet {
    fn from_iter<I: IntoIterator<Item = ResidueKey>>(iter: I) -> Self {
        let mut set = Self::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

impl<'a> IntoIterator for &'a TopeSet {
    type Item = &'a ResidueKey;
    type IntoIter = std::slice::Iter<'a, ResidueKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn read(text: &str) -> Result<Vec<ResidueKey>, TopeError> {
        TopeFile::read_from(&mut Cursor::new(text.as_bytes()))
    }

    #[test]
    fn reads_keys_and_skips_blank_lines() {
        let keys = read("ALA.A.10\n\n  GLY.11  \n\t\nTYR.H.-2\n").unwrap();
        assert_eq!(
            keys,
            vec![
                ResidueKey::new("ALA", Some('A'), 10),
                ResidueKey::new("GLY", None, 11),
                ResidueKey::new("TYR", Some('H'), -2),
            ]
        );
    }

    #[test]
    fn reports_line_number_of_malformed_key() {
        match read("ALA.A.10\n\nnot-a-residue\n") {
            Err(TopeError::Parse { line, source }) => {
                assert_eq!(line, 3);
                assert!(matches!(source, ParseResidueKeyError::InvalidFormat(_)));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn write_then_load_through_filesystem() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pdb1_residues.txt");
        let keys = vec![
            ResidueKey::new("ALA", Some('A'), 10),
            ResidueKey::new("SER", Some('B'), 3),
        ];
        TopeFile::write_to_path(&keys, &path).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "ALA.A.10\nSER.B.3\n"
        );
        let set = TopeSet::load(&path).unwrap();
        assert_eq!(set.as_slice(), keys.as_slice());
    }

    #[test]
    fn set_deduplicates_and_keeps_first_seen_order() {
        let set: TopeSet = [
            ResidueKey::new("GLY", Some('A'), 2),
            ResidueKey::new("ALA", Some('A'), 1),
            ResidueKey::new("GLY", Some('A'), 2),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
        let names: Vec<_> = set.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, vec!["GLY", "ALA"]);
    }

    #[test]
    fn contains_match_lets_unqualified_keys_match_any_chain() {
        let set: TopeSet = [
            ResidueKey::new("ALA", None, 10),
            ResidueKey::new("SER", Some('B'), 3),
        ]
        .into_iter()
        .collect();

        assert!(set.contains_match(&ResidueKey::new("ALA", Some('A'), 10)));
        assert!(set.contains_match(&ResidueKey::new("ALA", Some('C'), 10)));
        assert!(set.contains_match(&ResidueKey::new("SER", Some('B'), 3)));
        assert!(!set.contains_match(&ResidueKey::new("SER", Some('A'), 3)));
        assert!(!set.contains(&ResidueKey::new("ALA", Some('A'), 10)));
    }

    #[test]
    fn unqualified_query_matches_a_key_on_any_chain() {
        let set: TopeSet = [ResidueKey::new("LYS", Some('B'), 5)].into_iter().collect();

        assert!(set.contains_match(&ResidueKey::new("LYS", None, 5)));
        assert!(!set.contains_match(&ResidueKey::new("LYS", None, 6)));
        assert!(!set.contains_match(&ResidueKey::new("ASP", None, 5)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        assert!(matches!(
            TopeSet::load("/no/such/residues.txt"),
            Err(TopeError::Io(_))
        ));
    }
}
