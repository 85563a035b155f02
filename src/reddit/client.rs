// Authenticated Reddit API client.
//
// Uses the OAuth2 password grant of a Reddit "script" app: client id and
// secret as HTTP basic auth, the account's username and password in the
// form body. The resulting bearer token is good for an hour, which is
// longer than a full run.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::listing::{Listing, TokenResponse};
use super::retry::{with_retry, HttpStatusError, RetryPolicy};
use super::{comments, subreddits};
use crate::config::Config;
use crate::corpus::CommentCorpus;

/// Host that issues OAuth tokens.
pub const DEFAULT_AUTH_URL: &str = "https://www.reddit.com";

/// Host that serves API calls made with a bearer token.
pub const DEFAULT_API_URL: &str = "https://oauth.reddit.com";

/// Reddit's maximum page size for listings.
pub const PAGE_SIZE: usize = 100;

/// Thin reqwest wrapper holding a bearer token.
///
/// Constructed once from `Config` and passed by reference to whatever
/// needs to fetch; there is no global client.
pub struct RedditClient {
    client: reqwest::Client,
    api_url: String,
    access_token: String,
    retry: RetryPolicy,
}

impl RedditClient {
    /// Log in against the production Reddit endpoints.
    pub async fn login(config: &Config) -> Result<Self> {
        Self::login_at(config, DEFAULT_AUTH_URL, DEFAULT_API_URL).await
    }

    /// Log in against explicit auth and API base URLs.
    pub async fn login_at(config: &Config, auth_url: &str, api_url: &str) -> Result<Self> {
        config.require_reddit()?;

        let client = reqwest::Client::builder()
            .user_agent(user_agent(&config.username))
            .build()
            .context("Failed to build HTTP client")?;

        let token_url = format!("{}/api/v1/access_token", auth_url.trim_end_matches('/'));
        let response = client
            .post(&token_url)
            .basic_auth(&config.client_id, Some(&config.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", config.username.as_str()),
                ("password", config.password.as_str()),
            ])
            .send()
            .await
            .context("Reddit token request failed")?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::Error::new(HttpStatusError {
                status,
                url: token_url,
                body,
            }))
            .context("Reddit authentication failed");
        }

        let access_token = response
            .json::<TokenResponse>()
            .await
            .context("Failed to parse Reddit token response")?
            .into_access_token()?;

        info!(user = %config.username, "Authenticated with Reddit");

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token,
            retry: RetryPolicy::default(),
        })
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// GET an API path and deserialize the JSON body, retrying transient errors.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        with_retry(&self.retry, || self.get_once(path, params)).await
    }

    async fn get_once<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.api_url, path);

        debug!(path = path, "Reddit GET request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(params)
            .query(&[("raw_json", "1")])
            .send()
            .await
            .with_context(|| format!("Reddit request failed: {path}"))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::Error::new(HttpStatusError { status, url, body }));
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {path} response"))
    }

    /// Collect up to `limit` items from a paginated listing, following `after`.
    pub async fn collect_listing<T: DeserializeOwned>(
        &self,
        path: &str,
        limit: usize,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut after: Option<String> = None;

        while items.len() < limit {
            let page_size = (limit - items.len()).min(PAGE_SIZE).to_string();
            let mut params: Vec<(&str, &str)> = vec![("limit", page_size.as_str())];
            if let Some(ref cursor) = after {
                params.push(("after", cursor.as_str()));
            }

            let listing: Listing<T> = self.get_json(path, &params).await?;
            let page_len = listing.data.children.len();

            items.extend(
                listing
                    .data
                    .children
                    .into_iter()
                    .take(limit - items.len())
                    .map(|thing| thing.data),
            );

            debug!(
                page_items = page_len,
                total_collected = items.len(),
                "Fetched listing page for {}",
                path
            );

            after = listing.data.after;
            if after.is_none() || page_len == 0 {
                break;
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl CommentCorpus for RedditClient {
    async fn popular_communities(&self, limit: usize) -> Result<Vec<String>> {
        subreddits::fetch_popular(self, limit).await
    }

    async fn comment_authors(&self, community: &str, limit: usize) -> Result<Vec<Option<String>>> {
        comments::fetch_comment_authors(self, community, limit).await
    }
}

/// Reddit asks for a descriptive, unique user agent naming the account.
pub fn user_agent(username: &str) -> String {
    format!(
        "relgraph/{} (subreddit relatedness graph; by /u/{username})",
        env!("CARGO_PKG_VERSION")
    )
}
