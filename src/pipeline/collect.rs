// Membership collection: fetch every community's commenters, one at a time.
//
// Fetches run sequentially. Each raw author list is folded into its set as
// soon as it arrives, so only one list is held in memory at a time. A
// community whose fetch fails is logged and kept with an empty set; it then
// shows up as an isolated node instead of aborting the whole run.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use crate::corpus::CommentCorpus;
use crate::relatedness::membership::{membership_set, MembershipSets};

/// Result of a collection run.
#[derive(Debug, Default)]
pub struct Collection {
    pub sets: MembershipSets,
    /// Communities whose fetch failed and were kept with an empty set.
    pub failed: Vec<String>,
}

/// Fetch up to `limit` comment authors per community and build member sets.
///
/// Every name in `communities` is present in the result.
pub async fn collect_memberships(
    corpus: &dyn CommentCorpus,
    communities: &[String],
    limit: usize,
    show_progress: bool,
) -> Collection {
    let mut collection = Collection::default();

    let pb = if show_progress {
        ProgressBar::new(communities.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template("  Fetching [{bar:30}] {pos}/{len} {msg} ({eta})") {
        pb.set_style(style);
    }

    for community in communities {
        pb.set_message(format!("r/{community}"));

        let members = match corpus.comment_authors(community, limit).await {
            Ok(authors) => membership_set(authors),
            Err(e) => {
                warn!(
                    community = %community,
                    error = %format!("{e:#}"),
                    "Failed to fetch comments, continuing with no commenters"
                );
                collection.failed.push(community.clone());
                Default::default()
            }
        };

        debug!(
            community = %community,
            unique_authors = members.len(),
            "Built membership set"
        );

        collection
            .sets
            .entry(community.clone())
            .or_default()
            .extend(members);
        pb.inc(1);
    }
    pb.finish_and_clear();

    collection
}
