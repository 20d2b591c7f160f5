use crate::cli::NameClustersArgs;
use crate::config::defaults::DefaultsConfig;
use crate::error::Result;
use pipe::workflows::name_clusters;
use tracing::info;

pub fn run(args: NameClustersArgs) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| DefaultsConfig::default().named_clusters_output);
    info!(
        "Naming clusters from {:?} using {:?}",
        &args.cluster_out, &args.file_list
    );

    let named = name_clusters::run(&args.cluster_out, &args.file_list, &output)?;

    for cluster in &named {
        println!("{}", cluster.to_line());
    }
    println!(
        "✓ {} named cluster(s) appended to: {}",
        named.len(),
        output.display()
    );
    Ok(())
}
