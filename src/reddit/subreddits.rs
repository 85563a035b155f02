// Popular subreddit discovery.

use anyhow::{Context, Result};
use tracing::info;

use super::client::RedditClient;
use super::listing::SubredditData;

/// Front-page pseudo-subreddit that leads the popular listing.
pub const FRONT_PAGE: &str = "Home";

/// Fetch the names of the `limit` most popular subreddits, most popular first.
pub async fn fetch_popular(client: &RedditClient, limit: usize) -> Result<Vec<String>> {
    // One extra so that dropping the front page still leaves `limit`.
    let listed: Vec<SubredditData> = client
        .collect_listing("/subreddits/popular", limit.saturating_add(1))
        .await
        .context("Failed to list popular subreddits")?;

    let names = select_communities(listed.into_iter().map(|s| s.display_name), limit);

    info!(count = names.len(), "Selected popular subreddits");
    Ok(names)
}

/// Drop the front page and repeated names, keep listing order, cap at `limit`.
pub fn select_communities<I>(names: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut selected: Vec<String> = Vec::new();
    for name in names {
        if selected.len() >= limit {
            break;
        }
        if name.eq_ignore_ascii_case(FRONT_PAGE) || selected.contains(&name) {
            continue;
        }
        selected.push(name);
    }
    selected
}
