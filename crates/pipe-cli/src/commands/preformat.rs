use crate::cli::{OutputStyleArg, PreformatArgs};
use crate::error::{CliError, Result};
use pipe::workflows::preformat::{self, OutputStyle};
use tracing::info;

impl From<OutputStyleArg> for OutputStyle {
    fn from(style: OutputStyleArg) -> Self {
        match style {
            OutputStyleArg::Format => OutputStyle::Format,
            OutputStyleArg::Prefix => OutputStyle::Prefix,
        }
    }
}

pub fn run(args: PreformatArgs) -> Result<()> {
    if args.output.as_deref() == Some(args.input.as_path()) {
        return Err(CliError::Argument(format!(
            "Output path {:?} would overwrite the input.",
            &args.input
        )));
    }
    info!("Pre-formatting {:?}", &args.input);
    let result = preformat::run(&args.input, args.output.as_deref(), args.style.into())?;

    println!(
        "✓ {} record(s) written to: {}",
        result.summary.records_written,
        result.output.display()
    );
    if result.summary.terminators_added {
        println!("  Appended TER/END terminators.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const ATOM: &str =
        "ATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C";

    #[test]
    fn prefix_style_writes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("antigen.pdb");
        fs::write(&input, format!("HEADER    TEST\n{}\n", ATOM)).unwrap();

        run(PreformatArgs {
            input: input.clone(),
            output: None,
            style: OutputStyleArg::Prefix,
        })
        .unwrap();

        let written = fs::read_to_string(dir.path().join("new_antigen.pdb")).unwrap();
        assert_eq!(written, format!("{}\nTER\nEND\n", ATOM));
    }

    #[test]
    fn refuses_to_overwrite_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("antigen.pdb");
        fs::write(&input, format!("{}\n", ATOM)).unwrap();

        let result = run(PreformatArgs {
            input: input.clone(),
            output: Some(input.clone()),
            style: OutputStyleArg::Format,
        });
        assert!(matches!(result, Err(CliError::Argument(_))));
        assert_eq!(fs::read_to_string(&input).unwrap(), format!("{}\n", ATOM));
    }

    #[test]
    fn structure_without_records_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.pdb");
        fs::write(&input, "REMARK empty\n").unwrap();

        let result = run(PreformatArgs {
            input,
            output: Some(dir.path().join("out.pdb")),
            style: OutputStyleArg::Format,
        });
        assert!(result.is_err());
        assert!(!dir.path().join("out.pdb").exists());
    }
}
