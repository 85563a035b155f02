use std::env;

use anyhow::Result;

/// Reddit credential variables, in the order they are reported when missing.
pub const CREDENTIAL_VARS: [&str; 4] = [
    "REDDIT_CLIENT_ID",
    "REDDIT_SECRET",
    "REDDIT_USER",
    "REDDIT_PASS",
];

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// OAuth client id of the Reddit "script" app.
    pub client_id: String,
    /// OAuth client secret of the Reddit "script" app.
    pub client_secret: String,
    /// Reddit account the script app belongs to.
    pub username: String,
    pub password: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing variables load as empty strings; call `require_reddit`
    /// before touching the network.
    pub fn load() -> Result<Self> {
        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).unwrap_or_default();

        Self {
            client_id: get("REDDIT_CLIENT_ID"),
            client_secret: get("REDDIT_SECRET"),
            username: get("REDDIT_USER"),
            password: get("REDDIT_PASS"),
        }
    }

    /// Names of the credential variables that are unset or blank.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let values = [
            &self.client_id,
            &self.client_secret,
            &self.username,
            &self.password,
        ];
        CREDENTIAL_VARS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect()
    }

    /// Check that all four Reddit credentials are configured.
    /// Call this before any network operation.
    pub fn require_reddit(&self) -> Result<()> {
        let missing = self.missing_credentials();
        if !missing.is_empty() {
            anyhow::bail!(
                "Missing Reddit credentials: {}. Add them to your .env file.\n\
                 See .env.example for the required variables.",
                missing.join(", ")
            );
        }
        Ok(())
    }
}
