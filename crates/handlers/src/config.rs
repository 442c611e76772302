//! Pipeline trigger configuration.

use crate::errors::ConfigError;
use std::fmt;

/// Environment variable holding the build endpoint URL
pub const URL_VAR: &str = "JENKINS_URL";
/// Environment variable holding the Jenkins user
pub const USER_VAR: &str = "JENKINS_USER";
/// Environment variable holding the Jenkins API token
pub const TOKEN_VAR: &str = "JENKINS_TOKEN";

/// Where and as whom the pipeline trigger posts.
#[derive(Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Build endpoint, e.g. `https://jenkins.example.com/job/app/build`
    pub url: String,
    /// Basic auth user
    pub user: String,
    /// Basic auth password (Jenkins API token)
    pub token: String,
}

impl PipelineConfig {
    /// Create a configuration, checking that the URL is absolute http(s).
    pub fn new(
        url: impl Into<String>,
        user: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let url = url.into();
        validate_url(&url)?;
        Ok(Self {
            url,
            user: user.into(),
            token: token.into(),
        })
    }

    /// Load from `JENKINS_URL`, `JENKINS_USER` and `JENKINS_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingVar {
                    name: name.to_string(),
                })
        };

        Self::new(get(URL_VAR)?, get(USER_VAR)?, get(TOKEN_VAR)?)
    }
}

// Keep the token out of logs.
impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

fn validate_url(url: &str) -> Result<(), ConfigError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
