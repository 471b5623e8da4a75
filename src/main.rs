use clap::Parser;
use phylogroups::Error;
use phylogroups::cluster::MembershipOptions;
use phylogroups::pipeline::{self, DEFAULT_CLUSTER_OUT, DEFAULT_PROFILE_OUT, RunConfig};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Cluster a tree's vertices according to the lengths of its edges.
///
/// Every edge longer than the cutoff separates two clusters. Writes a
/// profile tree (one vertex per cluster) and a listing of the vertex
/// names in each cluster.
#[derive(Debug, Parser)]
#[command(name = "phylogroups", version, about)]
struct Cli {
    /// File name of the Newick tree
    treefile: PathBuf,

    /// Cutoff of edge length: longer edges separate clusters
    #[arg(allow_negative_numbers = true)]
    edge_len_cutoff: f64,

    /// File name to output the cluster membership listing
    #[arg(short = 'c', long, default_value = DEFAULT_CLUSTER_OUT)]
    cluster_out: PathBuf,

    /// File name to output the profile tree
    #[arg(short = 'p', long, default_value = DEFAULT_PROFILE_OUT)]
    profile_out: PathBuf,

    /// Add an `@` line with each cluster's original subtree in Newick format
    #[arg(long)]
    with_subtrees: bool,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            tree_file: cli.treefile,
            cutoff: cli.edge_len_cutoff,
            cluster_out: cli.cluster_out,
            profile_out: cli.profile_out,
            membership: MembershipOptions {
                with_subtrees: cli.with_subtrees,
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // PHYLOGROUPS_LOG takes precedence over -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PHYLOGROUPS_LOG")
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig::from(cli);
    if let Err(e) = pipeline::run(&config) {
        eprintln!("Error: {}", e);

        let exit_code = match e {
            Error::Parse(_) | Error::MalformedTree { .. } => 2,
            Error::InvalidCutoff(_) => 3,
            Error::Io { .. } => 4,
        };
        process::exit(exit_code);
    }
}
