use crate::core::io::traits::{ListFormat, ListReader, ListWriter};
use crate::core::models::cluster::Cluster;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

const ARROW: &str = "->";
const CLUSTER_KEYWORD: &str = "Cluster";
/// FCC output lines are `Cluster <n> -> <members...>`; members start at this token.
const FCC_FIRST_MEMBER_TOKEN: usize = 3;

#[derive(Debug, Error)]
pub enum ClusterFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: ClusterParseErrorKind,
    },
    #[error("Cluster {cluster} refers to model {index}, which is not in the structure list")]
    UnknownIndex { cluster: usize, index: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClusterParseErrorKind {
    #[error("cluster has no members")]
    NoMembers,
    #[error("invalid model index '{0}'")]
    InvalidIndex(String),
}

fn parse_error(line: usize, kind: ClusterParseErrorKind) -> ClusterFileError {
    ClusterFileError::Parse { line, kind }
}

/// Parses one whitespace-tokenised cluster line.
///
/// Returns `Ok(None)` for blank lines.
fn parse_cluster_line(line: &str, line_num: usize) -> Result<Option<Cluster>, ClusterFileError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(None);
    }

    let (label, rest) = match tokens.iter().position(|t| *t == ARROW) {
        Some(arrow) => {
            let label = tokens[..arrow]
                .iter()
                .rev()
                .find(|t| **t != CLUSTER_KEYWORD)
                .map(|t| t.to_string());
            (label, &tokens[arrow + 1..])
        }
        None => (None, tokens.get(2..).unwrap_or(&[])),
    };

    let (size_marker, members) = match rest {
        [first, second, ..] if second.parse::<i64>().is_err() => match first.parse::<usize>() {
            Ok(size) => (Some(size), &rest[1..]),
            Err(_) => (None, rest),
        },
        _ => (None, rest),
    };

    if members.is_empty() {
        return Err(parse_error(line_num, ClusterParseErrorKind::NoMembers));
    }

    Ok(Some(Cluster::new(
        label,
        size_marker,
        members.iter().map(|m| m.to_string()).collect(),
    )))
}

/// Cluster files consumed by the cluster filter.
///
/// Each line is `Cluster <n> -> [size] <representative> <member>...`. The label is kept only
/// for echoing retained clusters back out; a leading integer followed by a decoy name is a
/// size marker, not a member. Lines without an arrow lose their first two tokens.
pub struct ClusterFile;

impl ListFormat for ClusterFile {
    type Item = Cluster;
    type Error = ClusterFileError;
}

impl ListReader for ClusterFile {
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Cluster>, ClusterFileError> {
        let mut clusters = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            if let Some(cluster) = parse_cluster_line(&line, line_num + 1)? {
                clusters.push(cluster);
            }
        }
        Ok(clusters)
    }
}

impl ListWriter for ClusterFile {
    fn write_to(items: &[Cluster], writer: &mut impl Write) -> Result<(), ClusterFileError> {
        for cluster in items {
            writeln!(writer, "{}", cluster.retained_tokens().join(" "))?;
        }
        Ok(())
    }
}

/// Raw FCC clustering output: each cluster is the list of 1-based model indices.
pub struct FccClusterFile;

impl ListFormat for FccClusterFile {
    type Item = Vec<usize>;
    type Error = ClusterFileError;
}

impl ListReader for FccClusterFile {
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Vec<usize>>, ClusterFileError> {
        let mut clusters = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            let indices = tokens
                .iter()
                .skip(FCC_FIRST_MEMBER_TOKEN)
                .map(|t| {
                    t.parse::<usize>().map_err(|_| {
                        parse_error(
                            line_num + 1,
                            ClusterParseErrorKind::InvalidIndex(t.to_string()),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if indices.is_empty() {
                return Err(parse_error(line_num + 1, ClusterParseErrorKind::NoMembers));
            }
            clusters.push(indices);
        }
        Ok(clusters)
    }
}

/// The structure list used for clustering: line `n` names model `n`.
///
/// Blank lines are skipped but still advance the numbering, so indices always refer to
/// physical line numbers. Names have their last extension removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureList {
    names: BTreeMap<usize, String>,
}

impl StructureList {
    pub fn read_from(reader: &mut impl BufRead) -> Result<Self, ClusterFileError> {
        let mut names = BTreeMap::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let entry = line.trim();
            if entry.is_empty() {
                continue;
            }
            let stem = Path::new(entry).with_extension("");
            names.insert(line_num + 1, stem.to_string_lossy().into_owned());
        }
        Ok(Self { names })
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ClusterFileError> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(&index).map(String::as_str)
    }

    /// Maps the model indices of cluster number `cluster` to structure names.
    pub fn resolve(&self, cluster: usize, indices: &[usize]) -> Result<Vec<String>, ClusterFileError> {
        indices
            .iter()
            .map(|&index| {
                self.name(index)
                    .map(str::to_string)
                    .ok_or(ClusterFileError::UnknownIndex { cluster, index })
            })
            .collect()
    }
}

/// A cluster whose members have been translated to structure names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCluster {
    pub number: usize,
    pub names: Vec<String>,
}

impl NamedCluster {
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} {}",
            CLUSTER_KEYWORD,
            self.number,
            ARROW,
            self.names.join(" ")
        )
    }
}

/// `Cluster <n> -> <name>...` files, the hand-off between naming and filtering.
///
/// Only written here; the filter reads them back through [`ClusterFile`].
pub struct NamedClusterFile;

impl ListFormat for NamedClusterFile {
    type Item = NamedCluster;
    type Error = ClusterFileError;
}

impl ListWriter for NamedClusterFile {
    fn write_to(items: &[NamedCluster], writer: &mut impl Write) -> Result<(), ClusterFileError> {
        for cluster in items {
            writeln!(writer, "{}", cluster.to_line())?;
        }
        Ok(())
    }
}
