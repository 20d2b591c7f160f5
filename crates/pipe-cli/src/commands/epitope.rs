use crate::cli::EpitopeArgs;
use crate::config::{FileConfig, build_epitope_config};
use crate::error::Result;
use pipe::workflows::epitope;
use tracing::info;

pub fn run(args: EpitopeArgs, file_config: &FileConfig) -> Result<()> {
    let config = build_epitope_config(&args.hot_residues, file_config)?;
    info!("Extracting epitope from {:?}", &args.input);

    let result = epitope::run(&args.input, &config)?;

    if result.residues.is_empty() {
        println!(
            "Warning: no epitope residues found. Wrote an empty list to: {}",
            result.output.display()
        );
    } else {
        println!(
            "✓ {} epitope residue(s) written to: {}",
            result.residues.len(),
            result.output.display()
        );
    }
    Ok(())
}
