// Reddit API client — OAuth login, popular subreddits, comment listings.
//
// Each submodule handles one area of the API surface. `RedditClient`
// implements `CommentCorpus`, which is all the pipeline depends on.

pub mod client;
pub mod comments;
pub mod listing;
pub mod retry;
pub mod subreddits;

pub use client::RedditClient;
