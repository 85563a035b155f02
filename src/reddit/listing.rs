// Serde types for Reddit's listing envelope and the two payloads we read.
//
// Every paginated endpoint wraps its items as
//   {"kind": "Listing", "data": {"after": "t1_xyz", "children": [{"kind": ..., "data": {...}}]}}

use serde::Deserialize;

/// Author name Reddit reports for deleted or removed accounts.
pub const DELETED_AUTHOR: &str = "[deleted]";

#[derive(Debug, Deserialize)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListingData<T> {
    /// Cursor for the next page; `None` on the last page.
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub children: Vec<Thing<T>>,
}

/// One listing entry. `kind` is `t1` for comments, `t5` for subreddits.
#[derive(Debug, Deserialize)]
pub struct Thing<T> {
    #[serde(default)]
    pub kind: String,
    pub data: T,
}

/// The only comment field we need.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentData {
    #[serde(default)]
    pub author: Option<String>,
}

impl CommentData {
    /// Author name, or `None` for deleted/removed/anonymous authors.
    pub fn author_name(&self) -> Option<String> {
        match self.author.as_deref() {
            None | Some("") | Some(DELETED_AUTHOR) => None,
            Some(name) => Some(name.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubredditData {
    pub display_name: String,
}

/// Body of the OAuth token endpoint. Bad credentials come back as
/// `{"error": "invalid_grant"}` with a 200 status.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
}

impl TokenResponse {
    pub fn into_access_token(self) -> anyhow::Result<String> {
        match (self.access_token, self.error) {
            (Some(token), None) if !token.is_empty() => Ok(token),
            (_, Some(error)) => anyhow::bail!("Reddit rejected the credentials: {error}"),
            _ => anyhow::bail!("Reddit token response had no access_token"),
        }
    }
}
