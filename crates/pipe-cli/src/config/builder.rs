use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileCriterion};
use super::models::FilterAppConfig;
use crate::cli::{ConfigArgs, FilterArgs, HotResidueArgs, ParatopeArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use pipe::engine::config::{self as core_config, BfactorCriterion, BlockedPartition};
use std::path::PathBuf;
use std::str::FromStr;

/// Reads the optional config file and layers `--set` overrides on top of it.
pub fn load_file_config(args: &ConfigArgs) -> Result<FileConfig> {
    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    apply_set_values(file_config, &args.set_values)
}

pub fn build_epitope_config(
    args: &HotResidueArgs,
    file_config: &FileConfig,
) -> Result<core_config::EpitopeConfig> {
    let defaults = DefaultsConfig::default();
    let file = file_config.epitope.clone().unwrap_or_default();

    let criterion = resolve_criterion(
        args,
        file.criterion,
        file.b_factor,
        BfactorCriterion::Equal(defaults.epitope_b_factor),
    );

    core_config::EpitopeConfigBuilder::new()
        .criterion(criterion)
        .chain_qualified(resolve_chain_qualified(args, file.chain_qualified, &defaults))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

pub fn build_paratope_config(
    args: &ParatopeArgs,
    file_config: &FileConfig,
) -> Result<core_config::ParatopeConfig> {
    let defaults = DefaultsConfig::default();
    let file = file_config.paratope.clone().unwrap_or_default();

    let criterion = resolve_criterion(
        &args.hot_residues,
        file.criterion,
        file.b_factor,
        BfactorCriterion::AtLeast(defaults.paratope_b_factor),
    );
    let safe_zone_cutoff = args
        .safe_zone_cutoff
        .or(file.safe_zone_cutoff)
        .unwrap_or(defaults.safe_zone_cutoff);

    let split = args.split_blocked
        || args.blocked_chains.is_some()
        || file.split_blocked.unwrap_or(false);
    let partition = if !split {
        BlockedPartition::Combined
    } else if let Some(selection) = &args.blocked_chains {
        selection.clone().into()
    } else if let Some(list) = &file.blocked_chains {
        parser::parse_chain_selection(list)
            .map_err(|e| CliError::Config(format!("paratope.blocked-chains: {}", e)))?
            .into()
    } else {
        BlockedPartition::PerChain(defaults.blocked_chains.clone())
    };

    core_config::ParatopeConfigBuilder::new()
        .criterion(criterion)
        .chain_qualified(resolve_chain_qualified(
            &args.hot_residues,
            file.chain_qualified,
            &defaults,
        ))
        .safe_zone_cutoff(safe_zone_cutoff)
        .partition(partition)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

pub fn build_filter_config(args: &FilterArgs, file_config: &FileConfig) -> Result<FilterAppConfig> {
    let defaults = DefaultsConfig::default();
    let contacts = file_config.contacts.clone().unwrap_or_default();
    let filter = file_config.filter.clone().unwrap_or_default();

    let cutoff = args
        .cutoff
        .or(contacts.cutoff)
        .unwrap_or(defaults.cutoff);
    let paratope_threshold = args
        .threshold
        .or(filter.paratope_threshold)
        .unwrap_or(defaults.paratope_threshold);
    let epitope_threshold = args
        .threshold
        .or(filter.epitope_threshold)
        .unwrap_or(defaults.epitope_threshold);
    let decoy_dir = args
        .decoy_dir
        .clone()
        .or(filter.decoy_dir)
        .unwrap_or(defaults.decoy_dir);
    let skip_missing = args.skip_missing || filter.skip_missing.unwrap_or(defaults.skip_missing);

    let core_config = core_config::FilterConfigBuilder::new()
        .receptor_chain(contacts.receptor_chain.unwrap_or(defaults.receptor_chain))
        .ligand_chain(contacts.ligand_chain.unwrap_or(defaults.ligand_chain))
        .cutoff(cutoff)
        .paratope_threshold(paratope_threshold)
        .epitope_threshold(epitope_threshold)
        .decoy_dir(decoy_dir)
        .skip_missing(skip_missing)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(FilterAppConfig {
        output: args
            .output
            .clone()
            .or(filter.output)
            .unwrap_or(defaults.filter_output),
        core_config,
    })
}

fn resolve_criterion(
    args: &HotResidueArgs,
    file_kind: Option<FileCriterion>,
    file_value: Option<f64>,
    default: BfactorCriterion,
) -> BfactorCriterion {
    let default_value = match default {
        BfactorCriterion::Equal(v) | BfactorCriterion::AtLeast(v) => v,
    };
    let value = args.b_factor.or(file_value).unwrap_or(default_value);

    let kind = if args.exact {
        FileCriterion::Equal
    } else if args.at_least {
        FileCriterion::AtLeast
    } else {
        file_kind.unwrap_or(match default {
            BfactorCriterion::Equal(_) => FileCriterion::Equal,
            BfactorCriterion::AtLeast(_) => FileCriterion::AtLeast,
        })
    };

    match kind {
        FileCriterion::Equal => BfactorCriterion::Equal(value),
        FileCriterion::AtLeast => BfactorCriterion::AtLeast(value),
    }
}

fn resolve_chain_qualified(
    args: &HotResidueArgs,
    file_value: Option<bool>,
    defaults: &DefaultsConfig,
) -> bool {
    if args.unqualified {
        false
    } else {
        file_value.unwrap_or(defaults.chain_qualified)
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

fn parse_criterion(key: &str, value_str: &str) -> Result<FileCriterion> {
    match value_str.trim() {
        "equal" => Ok(FileCriterion::Equal),
        "at-least" => Ok(FileCriterion::AtLeast),
        _ => Err(CliError::Config(format!(
            "Invalid criterion for {}: {}. Expected 'equal' or 'at-least'.",
            key, value_str
        ))),
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "contacts.cutoff" => {
                config.contacts.get_or_insert_with(Default::default).cutoff =
                    Some(parse_value(key, value_str, "float")?);
            }
            "contacts.receptor-chain" => {
                config
                    .contacts
                    .get_or_insert_with(Default::default)
                    .receptor_chain = Some(parse_value(key, value_str, "chain")?);
            }
            "contacts.ligand-chain" => {
                config
                    .contacts
                    .get_or_insert_with(Default::default)
                    .ligand_chain = Some(parse_value(key, value_str, "chain")?);
            }
            "epitope.b-factor" => {
                config.epitope.get_or_insert_with(Default::default).b_factor =
                    Some(parse_value(key, value_str, "float")?);
            }
            "epitope.criterion" => {
                config.epitope.get_or_insert_with(Default::default).criterion =
                    Some(parse_criterion(key, value_str)?);
            }
            "epitope.chain-qualified" => {
                config
                    .epitope
                    .get_or_insert_with(Default::default)
                    .chain_qualified = Some(parse_value(key, value_str, "boolean")?);
            }
            "paratope.b-factor" => {
                config.paratope.get_or_insert_with(Default::default).b_factor =
                    Some(parse_value(key, value_str, "float")?);
            }
            "paratope.criterion" => {
                config.paratope.get_or_insert_with(Default::default).criterion =
                    Some(parse_criterion(key, value_str)?);
            }
            "paratope.chain-qualified" => {
                config
                    .paratope
                    .get_or_insert_with(Default::default)
                    .chain_qualified = Some(parse_value(key, value_str, "boolean")?);
            }
            "paratope.safe-zone-cutoff" => {
                config
                    .paratope
                    .get_or_insert_with(Default::default)
                    .safe_zone_cutoff = Some(parse_value(key, value_str, "float")?);
            }
            "paratope.split-blocked" => {
                config
                    .paratope
                    .get_or_insert_with(Default::default)
                    .split_blocked = Some(parse_value(key, value_str, "boolean")?);
            }
            "paratope.blocked-chains" => {
                parser::parse_chain_selection(value_str)
                    .map_err(|e| CliError::Config(format!("{}: {}", key, e)))?;
                config
                    .paratope
                    .get_or_insert_with(Default::default)
                    .blocked_chains = Some(value_str.to_string());
            }
            "filter.paratope-threshold" => {
                config
                    .filter
                    .get_or_insert_with(Default::default)
                    .paratope_threshold = Some(parse_value(key, value_str, "float")?);
            }
            "filter.epitope-threshold" => {
                config
                    .filter
                    .get_or_insert_with(Default::default)
                    .epitope_threshold = Some(parse_value(key, value_str, "float")?);
            }
            "filter.decoy-dir" => {
                config.filter.get_or_insert_with(Default::default).decoy_dir =
                    Some(PathBuf::from(value_str));
            }
            "filter.skip-missing" => {
                config
                    .filter
                    .get_or_insert_with(Default::default)
                    .skip_missing = Some(parse_value(key, value_str, "boolean")?);
            }
            "filter.output" => {
                config.filter.get_or_insert_with(Default::default).output =
                    Some(PathBuf::from(value_str));
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
