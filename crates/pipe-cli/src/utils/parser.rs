use pipe::engine::config::BlockedPartition;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("File not found: '{0}'.")]
    MissingFile(String),

    #[error("Not a directory: '{0}'.")]
    NotADirectory(String),

    #[error("Invalid chain identifier '{0}'. Expected a single character.")]
    InvalidChain(String),

    #[error("Chain list cannot be empty. Use 'all' to split every chain.")]
    EmptyChainList,
}

/// Chains that get their own blocked-residue file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainSelection {
    All,
    Only(Vec<char>),
}

impl From<ChainSelection> for BlockedPartition {
    fn from(selection: ChainSelection) -> Self {
        match selection {
            ChainSelection::All => BlockedPartition::AllChains,
            ChainSelection::Only(chains) => BlockedPartition::PerChain(chains),
        }
    }
}

pub fn existing_file(s: &str) -> Result<PathBuf, ParseError> {
    let path = PathBuf::from(s);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ParseError::MissingFile(s.to_string()))
    }
}

pub fn existing_dir(s: &str) -> Result<PathBuf, ParseError> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(ParseError::NotADirectory(s.to_string()))
    }
}

/// Parses `all` or a comma-separated list of chain identifiers such as `B,C`.
pub fn parse_chain_selection(s: &str) -> Result<ChainSelection, ParseError> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("all") {
        return Ok(ChainSelection::All);
    }

    let mut chains = Vec::new();
    for token in trimmed.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                if !chains.contains(&c) {
                    chains.push(c);
                }
            }
            _ => return Err(ParseError::InvalidChain(token.to_string())),
        }
    }

    if chains.is_empty() {
        Err(ParseError::EmptyChainList)
    } else {
        Ok(ChainSelection::Only(chains))
    }
}
