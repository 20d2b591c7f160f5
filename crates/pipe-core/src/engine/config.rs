use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_CONTACT_CUTOFF: f64 = 7.5;
pub const DEFAULT_RECEPTOR_CHAIN: char = 'A';
pub const DEFAULT_LIGAND_CHAIN: char = 'B';
pub const DEFAULT_FCC_THRESHOLD: f64 = 0.25;
pub const DEFAULT_EPITOPE_B_FACTOR: f64 = 100.0;
pub const DEFAULT_PARATOPE_B_FACTOR: f64 = 10.0;
pub const DEFAULT_SAFE_ZONE_CUTOFF: f64 = 20.0;
pub const DEFAULT_BLOCKED_CHAINS: [char; 2] = ['B', 'C'];

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

fn require_positive_distance(parameter: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            parameter,
            reason: format!("expected a positive distance in angstroms, got {}", value),
        })
    }
}

fn require_fraction(parameter: &'static str, value: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            parameter,
            reason: format!("expected a fraction between 0 and 1, got {}", value),
        })
    }
}

/// Which chains face each other at a docking interface, and how close counts as contact.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactConfig {
    pub receptor_chain: char,
    pub ligand_chain: char,
    /// Alpha-carbon distance below which two residues are in contact (angstroms, strict).
    pub cutoff: f64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            receptor_chain: DEFAULT_RECEPTOR_CHAIN,
            ligand_chain: DEFAULT_LIGAND_CHAIN,
            cutoff: DEFAULT_CONTACT_CUTOFF,
        }
    }
}

impl ContactConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive_distance("cutoff", self.cutoff)?;
        if self.receptor_chain == self.ligand_chain {
            return Err(ConfigError::InvalidValue {
                parameter: "ligand_chain",
                reason: format!(
                    "receptor and ligand must be different chains (both are '{}')",
                    self.ligand_chain
                ),
            });
        }
        Ok(())
    }
}

/// How an atom's B-factor marks its residue as predicted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BfactorCriterion {
    /// The B-factor equals the value exactly (EpiPred writes 100 for epitope atoms).
    Equal(f64),
    /// The B-factor is at least the value (i-Patch scores).
    AtLeast(f64),
}

impl BfactorCriterion {
    pub fn accepts(&self, b_factor: f64) -> bool {
        match *self {
            BfactorCriterion::Equal(value) => b_factor == value,
            BfactorCriterion::AtLeast(value) => b_factor >= value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotResidueConfig {
    pub criterion: BfactorCriterion,
    /// Write residues as `name.chain.seq` rather than `name.seq`.
    pub chain_qualified: bool,
}

/// How the blocked residues are written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockedPartition {
    /// One list with every blocked residue.
    Combined,
    /// One list per listed chain, written even when empty.
    PerChain(Vec<char>),
    /// One list per chain present in the structure.
    AllChains,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SafeZoneConfig {
    /// Alpha-carbon distance from a hot residue within which residues stay unblocked.
    pub cutoff: f64,
    pub partition: BlockedPartition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EpitopeConfig {
    pub hot_residues: HotResidueConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParatopeConfig {
    pub hot_residues: HotResidueConfig,
    pub safe_zone: SafeZoneConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub contacts: ContactConfig,
    /// A cluster needs a paratope score strictly above this.
    pub paratope_threshold: f64,
    /// ...and at least one epitope score strictly above this.
    pub epitope_threshold: f64,
    /// Directory holding `<representative>.pdb` files.
    pub decoy_dir: PathBuf,
    /// Drop clusters whose representative cannot be loaded instead of failing.
    pub skip_missing: bool,
}

#[derive(Default)]
pub struct EpitopeConfigBuilder {
    criterion: Option<BfactorCriterion>,
    chain_qualified: Option<bool>,
}

impl EpitopeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criterion(mut self, criterion: BfactorCriterion) -> Self {
        self.criterion = Some(criterion);
        self
    }
    pub fn chain_qualified(mut self, qualified: bool) -> Self {
        self.chain_qualified = Some(qualified);
        self
    }

    pub fn build(self) -> Result<EpitopeConfig, ConfigError> {
        Ok(EpitopeConfig {
            hot_residues: HotResidueConfig {
                criterion: self
                    .criterion
                    .ok_or(ConfigError::MissingParameter("criterion"))?,
                chain_qualified: self
                    .chain_qualified
                    .ok_or(ConfigError::MissingParameter("chain_qualified"))?,
            },
        })
    }
}

#[derive(Default)]
pub struct ParatopeConfigBuilder {
    criterion: Option<BfactorCriterion>,
    chain_qualified: Option<bool>,
    safe_zone_cutoff: Option<f64>,
    partition: Option<BlockedPartition>,
}

impl ParatopeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criterion(mut self, criterion: BfactorCriterion) -> Self {
        self.criterion = Some(criterion);
        self
    }
    pub fn chain_qualified(mut self, qualified: bool) -> Self {
        self.chain_qualified = Some(qualified);
        self
    }
    pub fn safe_zone_cutoff(mut self, cutoff: f64) -> Self {
        self.safe_zone_cutoff = Some(cutoff);
        self
    }
    pub fn partition(mut self, partition: BlockedPartition) -> Self {
        self.partition = Some(partition);
        self
    }

    pub fn build(self) -> Result<ParatopeConfig, ConfigError> {
        let cutoff = self
            .safe_zone_cutoff
            .ok_or(ConfigError::MissingParameter("safe_zone_cutoff"))?;
        if !(cutoff.is_finite() && cutoff >= 0.0) {
            return Err(ConfigError::InvalidValue {
                parameter: "safe_zone_cutoff",
                reason: format!("expected a non-negative distance, got {}", cutoff),
            });
        }
        let partition = self
            .partition
            .ok_or(ConfigError::MissingParameter("partition"))?;
        if matches!(&partition, BlockedPartition::PerChain(chains) if chains.is_empty()) {
            return Err(ConfigError::InvalidValue {
                parameter: "blocked_chains",
                reason: "at least one chain is required".to_string(),
            });
        }

        Ok(ParatopeConfig {
            hot_residues: HotResidueConfig {
                criterion: self
                    .criterion
                    .ok_or(ConfigError::MissingParameter("criterion"))?,
                chain_qualified: self
                    .chain_qualified
                    .ok_or(ConfigError::MissingParameter("chain_qualified"))?,
            },
            safe_zone: SafeZoneConfig { cutoff, partition },
        })
    }
}

#[derive(Default)]
pub struct FilterConfigBuilder {
    receptor_chain: Option<char>,
    ligand_chain: Option<char>,
    cutoff: Option<f64>,
    paratope_threshold: Option<f64>,
    epitope_threshold: Option<f64>,
    decoy_dir: Option<PathBuf>,
    skip_missing: bool,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receptor_chain(mut self, chain: char) -> Self {
        self.receptor_chain = Some(chain);
        self
    }
    pub fn ligand_chain(mut self, chain: char) -> Self {
        self.ligand_chain = Some(chain);
        self
    }
    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn paratope_threshold(mut self, threshold: f64) -> Self {
        self.paratope_threshold = Some(threshold);
        self
    }
    pub fn epitope_threshold(mut self, threshold: f64) -> Self {
        self.epitope_threshold = Some(threshold);
        self
    }
    pub fn decoy_dir(mut self, dir: PathBuf) -> Self {
        self.decoy_dir = Some(dir);
        self
    }
    pub fn skip_missing(mut self, skip: bool) -> Self {
        self.skip_missing = skip;
        self
    }

    pub fn build(self) -> Result<FilterConfig, ConfigError> {
        let contacts = ContactConfig {
            receptor_chain: self
                .receptor_chain
                .ok_or(ConfigError::MissingParameter("receptor_chain"))?,
            ligand_chain: self
                .ligand_chain
                .ok_or(ConfigError::MissingParameter("ligand_chain"))?,
            cutoff: self.cutoff.ok_or(ConfigError::MissingParameter("cutoff"))?,
        };
        contacts.validate()?;

        Ok(FilterConfig {
            contacts,
            paratope_threshold: require_fraction(
                "paratope_threshold",
                self.paratope_threshold
                    .ok_or(ConfigError::MissingParameter("paratope_threshold"))?,
            )?,
            epitope_threshold: require_fraction(
                "epitope_threshold",
                self.epitope_threshold
                    .ok_or(ConfigError::MissingParameter("epitope_threshold"))?,
            )?,
            decoy_dir: self
                .decoy_dir
                .ok_or(ConfigError::MissingParameter("decoy_dir"))?,
            skip_missing: self.skip_missing,
        })
    }
}
