use crate::utils::parser::{ChainSelection, existing_dir, existing_file, parse_chain_selection};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "PIPE CLI - Prepare antibody-antigen structures for docking and filter docked clusters by their predicted interface.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Configuration sources shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true, value_name = "PATH", value_parser = existing_file)]
    pub config: Option<PathBuf>,

    /// Override a configuration value (e.g., -S filter.paratope-threshold=0.3).
    /// Can be used multiple times.
    #[arg(short = 'S', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Strip a PDB file down to its coordinate records and terminate it with TER and END.
    Preformat(PreformatArgs),
    /// Extract the predicted epitope from an EpiPred-annotated antigen.
    Epitope(EpitopeArgs),
    /// Extract the predicted paratope and the residues to block from an i-Patch-annotated antibody.
    Paratope(ParatopeArgs),
    /// Translate FCC cluster indices into structure names.
    NameClusters(NameClustersArgs),
    /// Keep the docked clusters whose representative agrees with the predicted interface.
    Filter(FilterArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyleArg {
    /// Write `<stem>_format.pdb`.
    #[default]
    Format,
    /// Write `new_<file name>`.
    Prefix,
}

/// Arguments for the `preformat` subcommand.
#[derive(Args, Debug)]
pub struct PreformatArgs {
    /// PDB file to clean.
    #[arg(value_name = "PDB", value_parser = existing_file)]
    pub input: PathBuf,

    /// Output path. Defaults to a name derived from the input and `--style`.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Naming style for the derived output path.
    #[arg(long, value_enum, default_value_t = OutputStyleArg::Format)]
    pub style: OutputStyleArg,
}

/// Options shared by the epitope and paratope extractors.
#[derive(Args, Debug, Default, Clone)]
pub struct HotResidueArgs {
    /// B-factor value that marks a predicted interface atom.
    #[arg(short, long, value_name = "FLOAT")]
    pub b_factor: Option<f64>,

    /// Accept atoms whose B-factor equals the value exactly.
    #[arg(long, conflicts_with = "at_least")]
    pub exact: bool,

    /// Accept atoms whose B-factor is at least the value.
    #[arg(long)]
    pub at_least: bool,

    /// Write residues as NAME.NUMBER without the chain identifier.
    #[arg(long)]
    pub unqualified: bool,
}

/// Arguments for the `epitope` subcommand.
#[derive(Args, Debug)]
pub struct EpitopeArgs {
    /// EpiPred-annotated antigen PDB file.
    #[arg(value_name = "PDB", value_parser = existing_file)]
    pub input: PathBuf,

    #[command(flatten)]
    pub hot_residues: HotResidueArgs,
}

/// Arguments for the `paratope` subcommand.
#[derive(Args, Debug)]
pub struct ParatopeArgs {
    /// i-Patch-annotated antibody PDB file.
    #[arg(value_name = "PDB", value_parser = existing_file)]
    pub input: PathBuf,

    #[command(flatten)]
    pub hot_residues: HotResidueArgs,

    /// Alpha-carbon distance in Angstroms within which residues near the paratope stay unblocked.
    #[arg(short = 'r', long, value_name = "FLOAT")]
    pub safe_zone_cutoff: Option<f64>,

    /// Write one blocked-residue file per chain instead of a combined list.
    #[arg(long)]
    pub split_blocked: bool,

    /// Chains that get their own blocked-residue file ('all' or e.g. 'B,C'). Implies --split-blocked.
    #[arg(long, value_name = "LIST", value_parser = parse_chain_selection)]
    pub blocked_chains: Option<ChainSelection>,
}

/// Arguments for the `name-clusters` subcommand.
#[derive(Args, Debug)]
pub struct NameClustersArgs {
    /// FCC cluster output (`Cluster N -> i j ...`).
    #[arg(value_name = "CLUSTER_OUT", value_parser = existing_file)]
    pub cluster_out: PathBuf,

    /// Structure list the FCC indices refer to, one file name per line.
    #[arg(value_name = "FILE_LIST", value_parser = existing_file)]
    pub file_list: PathBuf,

    /// File the named clusters are appended to.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `filter` subcommand.
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Cluster file; the first member after the optional size marker is the representative decoy.
    #[arg(value_name = "CLUSTERS", value_parser = existing_file)]
    pub clusters: PathBuf,

    /// Predicted epitope residue list. Repeat for every alternative epitope.
    #[arg(short, long = "epitope", required = true, value_name = "PATH", value_parser = existing_file)]
    pub epitopes: Vec<PathBuf>,

    /// Predicted paratope residue list.
    #[arg(short, long, required = true, value_name = "PATH", value_parser = existing_file)]
    pub paratope: PathBuf,

    /// Directory holding the decoy PDB files.
    #[arg(short, long, value_name = "DIR", value_parser = existing_dir)]
    pub decoy_dir: Option<PathBuf>,

    /// Alpha-carbon contact cutoff in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Fraction of predicted residues that must be recovered, for both paratope and epitope.
    #[arg(short, long, value_name = "FRACTION")]
    pub threshold: Option<f64>,

    /// Drop clusters whose representative decoy cannot be loaded or lacks a docking chain,
    /// instead of failing.
    #[arg(long)]
    pub skip_missing: bool,

    /// File the retained clusters are appended to.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write a CSV report with every cluster's scores.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}
