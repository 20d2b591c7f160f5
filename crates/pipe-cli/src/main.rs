mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run_app(cli) {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app(cli: Cli) -> Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 PIPE CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let command_result = config::load_file_config(&cli.config).and_then(|file_config| {
        match cli.command {
            Commands::Preformat(args) => {
                info!("Dispatching to 'preformat' command.");
                commands::preformat::run(args)
            }
            Commands::Epitope(args) => {
                info!("Dispatching to 'epitope' command.");
                commands::epitope::run(args, &file_config)
            }
            Commands::Paratope(args) => {
                info!("Dispatching to 'paratope' command.");
                commands::paratope::run(args, &file_config)
            }
            Commands::NameClusters(args) => {
                info!("Dispatching to 'name-clusters' command.");
                commands::name_clusters::run(args)
            }
            Commands::Filter(args) => {
                info!("Dispatching to 'filter' command.");
                commands::filter::run(args, &file_config)
            }
        }
    });

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}
