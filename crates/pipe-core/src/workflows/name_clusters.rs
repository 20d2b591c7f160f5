use crate::core::io::clusters::{
    ClusterFileError, FccClusterFile, NamedCluster, NamedClusterFile, StructureList,
};
use crate::core::io::traits::{ListReader, ListWriter};
use crate::engine::error::EngineError;
use std::path::Path;
use tracing::{info, instrument};

pub const DEFAULT_OUTPUT: &str = "namedclusters.txt";

fn cluster_error(path: &Path) -> impl FnOnce(ClusterFileError) -> EngineError {
    let path = path.to_path_buf();
    move |source| EngineError::ClusterFile { path, source }
}

/// Translates FCC model indices into structure names and appends the result to `output`.
///
/// Clusters are numbered by their position in `cluster_out`. Either every cluster resolves
/// and all of them are appended, or nothing is written.
#[instrument(skip_all, name = "name_clusters_workflow")]
pub fn run(
    cluster_out: &Path,
    structure_list: &Path,
    output: &Path,
) -> Result<Vec<NamedCluster>, EngineError> {
    let clusters =
        FccClusterFile::read_from_path(cluster_out).map_err(cluster_error(cluster_out))?;
    let list = StructureList::read_from_path(structure_list)
        .map_err(cluster_error(structure_list))?;

    let named = clusters
        .iter()
        .enumerate()
        .map(|(i, indices)| {
            let number = i + 1;
            list.resolve(number, indices)
                .map(|names| NamedCluster { number, names })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(cluster_error(structure_list))?;

    NamedClusterFile::append_to_path(&named, output).map_err(cluster_error(output))?;

    info!(
        clusters = named.len(),
        structures = list.len(),
        output = %output.display(),
        "Named clusters appended."
    );
    Ok(named)
}
