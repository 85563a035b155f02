// Comment listing — recent commenters of one subreddit.
//
// `/r/{name}/comments` returns the newest comments first. Reddit stops
// paginating somewhere around a thousand items regardless of `limit`, so
// large limits are a ceiling rather than a promise.

use anyhow::{Context, Result};
use tracing::info;

use super::client::RedditClient;
use super::listing::CommentData;

/// Fetch the authors of up to `limit` recent comments in `community`.
///
/// Deleted and removed authors come back as `None`, in listing order.
pub async fn fetch_comment_authors(
    client: &RedditClient,
    community: &str,
    limit: usize,
) -> Result<Vec<Option<String>>> {
    let path = format!("/r/{community}/comments");
    let comments: Vec<CommentData> = client
        .collect_listing(&path, limit)
        .await
        .with_context(|| format!("Failed to fetch comments for r/{community}"))?;

    let authors: Vec<Option<String>> = comments.iter().map(CommentData::author_name).collect();

    info!(
        community = community,
        comments = authors.len(),
        deleted = authors.iter().filter(|a| a.is_none()).count(),
        "Collected comment authors"
    );

    Ok(authors)
}
