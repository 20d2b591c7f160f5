use pipe::engine::config as core_config;
use pipe::workflows::{filter, name_clusters};
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub cutoff: f64,
    pub receptor_chain: char,
    pub ligand_chain: char,
    pub paratope_threshold: f64,
    pub epitope_threshold: f64,
    pub epitope_b_factor: f64,
    pub paratope_b_factor: f64,
    pub safe_zone_cutoff: f64,
    pub blocked_chains: Vec<char>,
    pub chain_qualified: bool,
    pub skip_missing: bool,
    pub decoy_dir: PathBuf,
    pub filter_output: PathBuf,
    pub named_clusters_output: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            cutoff: core_config::DEFAULT_CONTACT_CUTOFF,
            receptor_chain: core_config::DEFAULT_RECEPTOR_CHAIN,
            ligand_chain: core_config::DEFAULT_LIGAND_CHAIN,
            paratope_threshold: core_config::DEFAULT_FCC_THRESHOLD,
            epitope_threshold: core_config::DEFAULT_FCC_THRESHOLD,
            epitope_b_factor: core_config::DEFAULT_EPITOPE_B_FACTOR,
            paratope_b_factor: core_config::DEFAULT_PARATOPE_B_FACTOR,
            safe_zone_cutoff: core_config::DEFAULT_SAFE_ZONE_CUTOFF,
            blocked_chains: core_config::DEFAULT_BLOCKED_CHAINS.to_vec(),
            chain_qualified: true,
            skip_missing: false,
            decoy_dir: PathBuf::from("."),
            filter_output: PathBuf::from(filter::DEFAULT_OUTPUT),
            named_clusters_output: PathBuf::from(name_clusters::DEFAULT_OUTPUT),
        }
    }
}
