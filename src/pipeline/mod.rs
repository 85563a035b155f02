// Pipeline orchestration — from a corpus to the nearest-relative graph.

pub mod collect;

use anyhow::{Context, Result};
use tracing::info;

use crate::corpus::CommentCorpus;
use crate::relatedness::{self, RelatednessGraph};

/// How many communities to analyze and how many comments to read from each.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub communities: usize,
    pub comments_per_community: usize,
    pub show_progress: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            communities: 50,
            comments_per_community: 10_000,
            show_progress: true,
        }
    }
}

/// Everything a run produces.
#[derive(Debug)]
pub struct RunOutput {
    pub graph: RelatednessGraph,
    /// Community name -> number of unique commenters, in listing order.
    pub member_counts: Vec<(String, usize)>,
    pub failed: Vec<String>,
}

/// Run the full analysis against a corpus.
///
/// Listing the communities is required; individual comment fetches may fail.
pub async fn run(corpus: &dyn CommentCorpus, options: &RunOptions) -> Result<RunOutput> {
    let communities = corpus
        .popular_communities(options.communities)
        .await
        .context("Could not determine which communities to analyze")?;
    info!(count = communities.len(), "Analyzing communities");

    let collection = collect::collect_memberships(
        corpus,
        &communities,
        options.comments_per_community,
        options.show_progress,
    )
    .await;

    let member_counts = communities
        .iter()
        .map(|name| {
            let count = collection.sets.get(name).map_or(0, |set| set.len());
            (name.clone(), count)
        })
        .collect();

    let graph = relatedness::relatedness_graph(&collection.sets);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Built nearest-relative graph"
    );

    Ok(RunOutput {
        graph,
        member_counts,
        failed: collection.failed,
    })
}
