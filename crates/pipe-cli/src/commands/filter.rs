use crate::cli::FilterArgs;
use crate::config::{FileConfig, build_filter_config};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pipe::engine::progress::{Progress, ProgressReporter};
use pipe::workflows::filter::{self, Predictions};
use tracing::{info, warn};

pub fn run(args: FilterArgs, file_config: &FileConfig) -> Result<()> {
    let app_config = build_filter_config(&args, file_config)?;
    let config = &app_config.core_config;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    reporter.report(Progress::PhaseStart {
        name: "Loading predictions and clusters",
    });
    let predictions = Predictions::load(&args.paratope, &args.epitopes)?;
    let clusters = filter::load_clusters(&args.clusters)?;
    reporter.report(Progress::PhaseFinish);

    println!(
        "Filtering {} cluster(s) against {} epitope prediction(s)...",
        clusters.len(),
        predictions.epitopes.len()
    );
    let result = filter::run(&clusters, &predictions, config, &reporter)?;

    filter::write_retained(&result, &app_config.output)?;
    let retained = result.retained().count();
    info!(
        "Retained {} of {} cluster(s); appended to {:?}",
        retained,
        clusters.len(),
        &app_config.output
    );

    if !result.skipped.is_empty() {
        warn!(
            "{} cluster(s) skipped because their representative could not be loaded.",
            result.skipped.len()
        );
        println!(
            "Warning: skipped {} cluster(s) with unreadable representatives.",
            result.skipped.len()
        );
    }

    if let Some(report_path) = &args.report {
        filter::write_report(&result, report_path)?;
        println!("  Score report written to: {}", report_path.display());
    }

    println!(
        "✓ {} of {} cluster(s) retained. Appended to: {}",
        retained,
        clusters.len(),
        app_config.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn ca_line(serial: usize, res_name: &str, chain: char, seq: isize, x: f64) -> String {
        format!(
            "ATOM  {:>5}  CA  {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}           C",
            serial, res_name, chain, seq, x, 0.0, 0.0, 1.0, 0.0
        )
    }

    fn write_decoy(dir: &Path, name: &str, ligand_x: f64) {
        let lines = [
            ca_line(1, "TYR", 'A', 32, 0.0),
            ca_line(2, "LYS", 'B', 7, ligand_x),
        ];
        fs::write(
            dir.join(format!("{}.pdb", name)),
            format!("{}\nTER\nEND\n", lines.join("\n")),
        )
        .unwrap();
    }

    #[test]
    fn filters_clusters_and_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        write_decoy(dir.path(), "decoy_1", 5.0);
        write_decoy(dir.path(), "decoy_2", 30.0);

        let clusters = dir.path().join("clusters.txt");
        fs::write(&clusters, "Cluster 1 -> 2 decoy_1\nCluster 2 -> 2 decoy_2\n").unwrap();
        let paratope = dir.path().join("paratope.txt");
        fs::write(&paratope, "TYR.A.32\n").unwrap();
        let epitope = dir.path().join("epitope.txt");
        fs::write(&epitope, "LYS.B.7\n").unwrap();
        let output = dir.path().join("filtered.txt");
        let report = dir.path().join("report.csv");

        run(
            FilterArgs {
                clusters,
                epitopes: vec![epitope],
                paratope,
                decoy_dir: Some(dir.path().to_path_buf()),
                cutoff: None,
                threshold: None,
                skip_missing: false,
                output: Some(output.clone()),
                report: Some(report.clone()),
            },
            &FileConfig::default(),
        )
        .unwrap();

        let filtered = fs::read_to_string(&output).unwrap();
        assert!(filtered.contains("decoy_1"));
        assert!(!filtered.contains("decoy_2"));

        let csv = fs::read_to_string(&report).unwrap();
        assert_eq!(csv.lines().count(), 3);
    }
}
