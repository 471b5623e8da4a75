//! End-to-end clustering run: read tree, cluster, write both artifacts.

use crate::cluster::{ClusterBuilder, MembershipOptions, membership_to_string, synthesize_profile};
use crate::error::{Error, Result};
use crate::model::PhyloTree;
use crate::newick::{NewickParser, NewickStyle, to_newick};
use crate::parser::ByteParser;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempPath};
use tracing::{debug, info, warn};

/// Default file name of the cluster membership listing.
pub const DEFAULT_CLUSTER_OUT: &str = "cluster.fasta";

/// Default file name of the profile tree.
pub const DEFAULT_PROFILE_OUT: &str = "profile.nwk";

/// Configuration of a clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Newick file holding the tree to cluster
    pub tree_file: PathBuf,
    /// Edges strictly longer than this are cluster boundaries
    pub cutoff: f64,
    /// Where to write the membership listing
    pub cluster_out: PathBuf,
    /// Where to write the profile tree
    pub profile_out: PathBuf,
    /// Membership listing options
    pub membership: MembershipOptions,
}

impl RunConfig {
    /// Creates a configuration with default output paths.
    pub fn new<P: Into<PathBuf>>(tree_file: P, cutoff: f64) -> Self {
        Self {
            tree_file: tree_file.into(),
            cutoff,
            cluster_out: PathBuf::from(DEFAULT_CLUSTER_OUT),
            profile_out: PathBuf::from(DEFAULT_PROFILE_OUT),
            membership: MembershipOptions::default(),
        }
    }
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Vertices of the original tree
    pub num_vertices: usize,
    /// Clusters produced, including the root cluster
    pub num_clusters: usize,
}

/// Artifacts of clustering one tree, rendered but not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedOutput {
    /// Profile tree as one Newick line
    pub profile: String,
    /// Cluster membership listing
    pub membership: String,
    pub summary: RunSummary,
}

/// Runs the whole pipeline as configured.
///
/// Either both output files are written, or none (on any error).
///
/// # Errors
/// * [Error::InvalidCutoff] - if the cutoff is not finite
/// * [Error::Io] - if the tree file cannot be read or an output cannot be written
/// * [Error::Parse] / [Error::MalformedTree] - if the tree is malformed
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    if !config.cutoff.is_finite() {
        return Err(Error::InvalidCutoff(config.cutoff));
    }

    let tree = read_tree(&config.tree_file)?;
    info!(
        path = %config.tree_file.display(),
        num_vertices = tree.num_vertices(),
        num_leaves = tree.num_leaves(),
        "parsed tree"
    );

    let output = render(&tree, config.cutoff, config.membership)?;
    write_all_or_nothing(&[
        (config.profile_out.as_path(), output.profile.as_str()),
        (config.cluster_out.as_path(), output.membership.as_str()),
    ])?;

    info!(
        num_clusters = output.summary.num_clusters,
        num_boundaries = output.summary.num_clusters - 1,
        cutoff = config.cutoff,
        profile = %config.profile_out.display(),
        membership = %config.cluster_out.display(),
        "wrote clustering results"
    );
    Ok(output.summary)
}

/// Reads and parses the Newick file at `path`.
pub fn read_tree(path: &Path) -> Result<PhyloTree> {
    let byte_parser = ByteParser::from_file(path).map_err(|e| Error::io(path, e))?;
    Ok(NewickParser::new_defaults().parse_single(byte_parser)?)
}

/// Clusters `tree` and renders both artifacts in memory.
pub fn render(tree: &PhyloTree, cutoff: f64, membership: MembershipOptions) -> Result<RenderedOutput> {
    let clusters = ClusterBuilder::new(cutoff).build(tree)?;
    let profile_tree = synthesize_profile(&clusters);

    let mut profile = to_newick(&profile_tree, NewickStyle::AllNames);
    profile.push('\n');

    Ok(RenderedOutput {
        profile,
        membership: membership_to_string(&clusters, membership),
        summary: RunSummary {
            num_vertices: tree.num_vertices(),
            num_clusters: clusters.len(),
        },
    })
}

/// Writes each `(path, contents)` pair, all or nothing.
///
/// Contents are first staged in temporary files next to their targets and
/// only then moved into place. A file already at a target is first moved
/// aside to a sibling backup. If any step fails, every target touched so
/// far gets its previous file back (or is removed if it had none).
/// Backups are deleted once all outputs are in place.
fn write_all_or_nothing(outputs: &[(&Path, &str)]) -> Result<()> {
    let mut staged = Vec::with_capacity(outputs.len());
    for &(path, contents) in outputs {
        let mut file = NamedTempFile::new_in(parent_dir(path)).map_err(|e| Error::io(path, e))?;
        file.write_all(contents.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), bytes = contents.len(), "staged output");
        staged.push((path, file));
    }

    let mut replaced: Vec<Replaced<'_>> = Vec::with_capacity(staged.len());
    for (path, file) in staged {
        let backup = match move_aside(path) {
            Ok(backup) => backup,
            Err(e) => {
                roll_back(replaced);
                return Err(Error::io(path, e));
            }
        };
        if let Err(e) = file.persist(path) {
            // Nothing was created at `path`, only a moved-aside file needs restoring
            if backup.is_some() {
                replaced.push(Replaced { path, backup });
            }
            roll_back(replaced);
            return Err(Error::io(path, e.error));
        }
        replaced.push(Replaced { path, backup });
    }

    // Dropping the backups deletes them
    Ok(())
}

/// A target written by this run, with its previous file if there was one.
struct Replaced<'a> {
    path: &'a Path,
    backup: Option<TempPath>,
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Moves an existing regular file at `path` to a fresh sibling path.
///
/// # Returns
/// * `Ok(Some(backup))` - the previous file now lives at `backup`
/// * `Ok(None)` - there was no regular file at `path`
fn move_aside(path: &Path) -> io::Result<Option<TempPath>> {
    if !path.is_file() {
        return Ok(None);
    }
    let backup = tempfile::Builder::new()
        .prefix(".phylogroups-")
        .suffix(".bak")
        .tempfile_in(parent_dir(path))?
        .into_temp_path();
    fs::rename(path, &backup)?;
    debug!(path = %path.display(), backup = %backup.display(), "moved previous output aside");
    Ok(Some(backup))
}

/// Puts previous files back in place, latest target first.
fn roll_back(replaced: Vec<Replaced<'_>>) {
    for Replaced { path, backup } in replaced.into_iter().rev() {
        let restored = match &backup {
            Some(backup) => fs::rename(backup, path),
            None => fs::remove_file(path),
        };
        if let Err(e) = restored {
            warn!(path = %path.display(), error = %e, "could not restore previous output");
        }
    }
}
