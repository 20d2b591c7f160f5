use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How a B-factor value selects atoms.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FileCriterion {
    Equal,
    AtLeast,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileContactConfig {
    pub cutoff: Option<f64>,
    #[serde(rename = "receptor-chain")]
    pub receptor_chain: Option<char>,
    #[serde(rename = "ligand-chain")]
    pub ligand_chain: Option<char>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileEpitopeConfig {
    #[serde(rename = "b-factor")]
    pub b_factor: Option<f64>,
    pub criterion: Option<FileCriterion>,
    #[serde(rename = "chain-qualified")]
    pub chain_qualified: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileParatopeConfig {
    #[serde(rename = "b-factor")]
    pub b_factor: Option<f64>,
    pub criterion: Option<FileCriterion>,
    #[serde(rename = "chain-qualified")]
    pub chain_qualified: Option<bool>,
    #[serde(rename = "safe-zone-cutoff")]
    pub safe_zone_cutoff: Option<f64>,
    #[serde(rename = "split-blocked")]
    pub split_blocked: Option<bool>,
    /// `"all"` or a comma-separated chain list.
    #[serde(rename = "blocked-chains")]
    pub blocked_chains: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileFilterConfig {
    #[serde(rename = "paratope-threshold")]
    pub paratope_threshold: Option<f64>,
    #[serde(rename = "epitope-threshold")]
    pub epitope_threshold: Option<f64>,
    #[serde(rename = "decoy-dir")]
    pub decoy_dir: Option<PathBuf>,
    #[serde(rename = "skip-missing")]
    pub skip_missing: Option<bool>,
    pub output: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub contacts: Option<FileContactConfig>,
    pub epitope: Option<FileEpitopeConfig>,
    pub paratope: Option<FileParatopeConfig>,
    pub filter: Option<FileFilterConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parses_every_section() {
        let config = FileConfig::from_toml(
            r#"
            [contacts]
            cutoff = 8.0
            receptor-chain = "H"
            ligand-chain = "A"

            [epitope]
            b-factor = 100.0
            criterion = "equal"

            [paratope]
            criterion = "at-least"
            safe-zone-cutoff = 15.0
            blocked-chains = "all"

            [filter]
            paratope-threshold = 0.3
            skip-missing = true
            "#,
        )
        .unwrap();

        let contacts = config.contacts.unwrap();
        assert_eq!(contacts.cutoff, Some(8.0));
        assert_eq!(contacts.receptor_chain, Some('H'));
        assert_eq!(config.epitope.unwrap().criterion, Some(FileCriterion::Equal));
        let paratope = config.paratope.unwrap();
        assert_eq!(paratope.criterion, Some(FileCriterion::AtLeast));
        assert_eq!(paratope.blocked_chains.as_deref(), Some("all"));
        let filter = config.filter.unwrap();
        assert_eq!(filter.paratope_threshold, Some(0.3));
        assert_eq!(filter.epitope_threshold, None);
        assert_eq!(filter.skip_missing, Some(true));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("[filter]\nthreshold = 0.3\n").is_err());
        assert!(FileConfig::from_toml("[docking]\n").is_err());
    }

    #[test]
    fn from_file_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipe.toml");
        fs::write(&path, "[contacts]\ncutoff = \"far\"\n").unwrap();

        match FileConfig::from_file(&path) {
            Err(CliError::ConfigParse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn from_file_reports_path_when_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        match FileConfig::from_file(&path) {
            Err(CliError::ConfigRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
