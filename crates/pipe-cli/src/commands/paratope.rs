use crate::cli::ParatopeArgs;
use crate::config::{FileConfig, build_paratope_config};
use crate::error::Result;
use pipe::workflows::paratope;
use tracing::info;

pub fn run(args: ParatopeArgs, file_config: &FileConfig) -> Result<()> {
    let config = build_paratope_config(&args, file_config)?;
    info!("Extracting paratope from {:?}", &args.input);

    let result = paratope::run(&args.input, &config)?;

    println!(
        "✓ {} paratope residue(s) written to: {}",
        result.paratope.len(),
        result.paratope_output.display()
    );
    println!(
        "  {} residue(s) within {:.1} Å stay unblocked; {} blocked.",
        result.safe.len(),
        config.safe_zone.cutoff,
        result.blocked.len()
    );
    for path in &result.blocked_outputs {
        println!("  Blocked residues written to: {}", path.display());
    }
    Ok(())
}
