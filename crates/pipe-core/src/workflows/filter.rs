use super::load_structure;
use crate::core::io::clusters::ClusterFile;
use crate::core::io::tope::TopeSet;
use crate::core::io::traits::{ListReader, ListWriter};
use crate::core::models::cluster::Cluster;
use crate::core::models::structure::Structure;
use crate::engine::config::{ConfigError, FilterConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::contacts::detect_contacts;
use crate::engine::tasks::scoring::{fractional_contact_score, passes_threshold};
use itertools::Itertools;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_OUTPUT: &str = "filteredclusters.txt";
const DECOY_EXTENSION: &str = "pdb";

/// The predicted interface residues every cluster is compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predictions {
    /// Antibody side, scored against contacts on the receptor chain.
    pub paratope: TopeSet,
    /// Antigen side, scored against contacts on the ligand chain. Any one may pass.
    pub epitopes: Vec<TopeSet>,
}

impl Predictions {
    /// Loads and checks the residue lists.
    ///
    /// # Errors
    ///
    /// Fails if any list cannot be read, if any list is empty, or if no epitope list is given.
    pub fn load(paratope: &Path, epitopes: &[PathBuf]) -> Result<Self, EngineError> {
        if epitopes.is_empty() {
            return Err(ConfigError::MissingParameter("epitope").into());
        }
        Ok(Self {
            paratope: load_prediction(paratope)?,
            epitopes: epitopes
                .iter()
                .map(|path| load_prediction(path))
                .collect::<Result<_, _>>()?,
        })
    }
}

fn load_prediction(path: &Path) -> Result<TopeSet, EngineError> {
    let set = TopeSet::load(path).map_err(|source| EngineError::ResidueList {
        path: path.to_path_buf(),
        source,
    })?;
    if set.is_empty() {
        return Err(EngineError::EmptyPrediction {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), residues = set.len(), "Loaded prediction.");
    Ok(set)
}

/// Scores of one representative structure against the predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceScores {
    pub paratope: f64,
    pub epitopes: Vec<f64>,
}

impl InterfaceScores {
    pub fn is_retained(&self, config: &FilterConfig) -> bool {
        passes_threshold(self.paratope, config.paratope_threshold)
            && self
                .epitopes
                .iter()
                .any(|&score| passes_threshold(score, config.epitope_threshold))
    }
}

/// Detects the interface of `structure` and scores it against `predictions`.
pub fn score_structure(
    structure: &Structure,
    predictions: &Predictions,
    config: &FilterConfig,
) -> Result<InterfaceScores, EngineError> {
    let contacts = detect_contacts(structure, &config.contacts)?;
    let paratope = fractional_contact_score(&contacts.receptor, &predictions.paratope)?;
    let epitopes = predictions
        .epitopes
        .iter()
        .map(|epitope| fractional_contact_score(&contacts.ligand, epitope))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(InterfaceScores { paratope, epitopes })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterEvaluation {
    /// 1-based position of the cluster in the input.
    pub index: usize,
    pub cluster: Cluster,
    pub scores: InterfaceScores,
    pub retained: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterResult {
    /// Every cluster that was scored, in input order.
    pub evaluations: Vec<ClusterEvaluation>,
    /// Clusters dropped because their representative could not be loaded or lacks a chain.
    pub skipped: Vec<Cluster>,
}

impl FilterResult {
    /// Retained clusters in input order.
    pub fn retained(&self) -> impl Iterator<Item = &Cluster> {
        self.evaluations
            .iter()
            .filter(|e| e.retained)
            .map(|e| &e.cluster)
    }
}

pub fn load_clusters(path: &Path) -> Result<Vec<Cluster>, EngineError> {
    ClusterFile::read_from_path(path).map_err(|source| EngineError::ClusterFile {
        path: path.to_path_buf(),
        source,
    })
}

fn representative_path(config: &FilterConfig, representative: &str) -> PathBuf {
    config
        .decoy_dir
        .join(format!("{}.{}", representative, DECOY_EXTENSION))
}

/// Keeps the clusters whose representative decoy agrees with the predicted interface.
///
/// A cluster is retained when its paratope score is above the paratope threshold and at
/// least one epitope score is above the epitope threshold. A representative that cannot be
/// loaded, or lacks the receptor or ligand chain, aborts the run unless `skip_missing` is set,
/// in which case the cluster is dropped.
#[instrument(skip_all, name = "filter_workflow")]
pub fn run(
    clusters: &[Cluster],
    predictions: &Predictions,
    config: &FilterConfig,
    reporter: &ProgressReporter,
) -> Result<FilterResult, EngineError> {
    config.contacts.validate()?;
    info!(
        clusters = clusters.len(),
        epitopes = predictions.epitopes.len(),
        cutoff = config.contacts.cutoff,
        "Filtering clusters."
    );

    reporter.report(Progress::TaskStart {
        total_steps: clusters.len() as u64,
    });

    let mut result = FilterResult::default();
    for (i, cluster) in clusters.iter().enumerate() {
        let index = i + 1;
        let representative = cluster
            .representative()
            .ok_or(EngineError::EmptyCluster { index })?;

        let path = representative_path(config, representative);
        let scores = match load_structure(&path)
            .and_then(|structure| score_structure(&structure, predictions, config))
        {
            Ok(scores) => scores,
            Err(e) if config.skip_missing && is_unusable_representative(&e) => {
                warn!(cluster = index, path = %path.display(), error = %e, "Skipping cluster.");
                reporter.report(Progress::Message(format!(
                    "Skipped cluster {}: {}",
                    index, e
                )));
                reporter.report(Progress::TaskIncrement);
                result.skipped.push(cluster.clone());
                continue;
            }
            Err(e) => return Err(e),
        };

        let retained = scores.is_retained(config);
        debug!(
            cluster = index,
            representative,
            paratope = scores.paratope,
            epitopes = ?scores.epitopes,
            retained,
            "Cluster evaluated."
        );

        reporter.report(Progress::ClusterEvaluated {
            representative: representative.to_string(),
            retained,
        });
        reporter.report(Progress::TaskIncrement);

        result.evaluations.push(ClusterEvaluation {
            index,
            cluster: cluster.clone(),
            scores,
            retained,
        });
    }
    reporter.report(Progress::TaskFinish);

    info!(
        evaluated = result.evaluations.len(),
        retained = result.retained().count(),
        skipped = result.skipped.len(),
        "Cluster filtering complete."
    );
    Ok(result)
}

/// Errors confined to one representative decoy, which `skip_missing` may step over.
fn is_unusable_representative(error: &EngineError) -> bool {
    matches!(
        error,
        EngineError::StructureLoad { .. } | EngineError::MissingChain { .. }
    )
}

/// Appends the retained clusters to `path`, one space-joined line each.
pub fn write_retained(result: &FilterResult, path: &Path) -> Result<(), EngineError> {
    let retained: Vec<Cluster> = result.retained().cloned().collect();
    ClusterFile::append_to_path(&retained, path).map_err(|source| EngineError::ClusterFile {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    cluster: String,
    representative: &'a str,
    paratope_fcc: String,
    epitope_fcc: String,
    retained: bool,
}

fn format_score(score: f64) -> String {
    format!("{:.4}", score)
}

/// Writes one CSV row per evaluated cluster.
pub fn write_report(result: &FilterResult, path: &Path) -> Result<(), EngineError> {
    let report_error = |source| EngineError::Report {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(report_error)?;
    for evaluation in &result.evaluations {
        writer
            .serialize(ReportRow {
                cluster: evaluation
                    .cluster
                    .label
                    .clone()
                    .unwrap_or_else(|| evaluation.index.to_string()),
                representative: evaluation.cluster.representative().unwrap_or_default(),
                paratope_fcc: format_score(evaluation.scores.paratope),
                epitope_fcc: evaluation
                    .scores
                    .epitopes
                    .iter()
                    .map(|&score| format_score(score))
                    .join(";"),
                retained: evaluation.retained,
            })
            .map_err(report_error)?;
    }
    writer.flush().map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}
