// Comment corpus trait — the seam between fetching and analysis.
//
// The pipeline only needs two things from a data source: which communities
// to look at, and who commented in each. `RedditClient` is the real
// implementation; tests plug in an in-memory one.

use anyhow::Result;
use async_trait::async_trait;

/// A source of communities and their recent commenters.
#[async_trait]
pub trait CommentCorpus: Send + Sync {
    /// Names of up to `limit` communities to analyze, most popular first.
    async fn popular_communities(&self, limit: usize) -> Result<Vec<String>>;

    /// Authors of up to `limit` recent comments in `community`, newest first.
    /// Deleted or anonymous authors are `None`.
    async fn comment_authors(&self, community: &str, limit: usize) -> Result<Vec<Option<String>>>;
}
