//! Explicit configuration for the dispatch client.

use thiserror::Error;

/// Environment variable holding the dispatch endpoint.
pub const DISPATCH_URL_VAR: &str = "DISPATCH_URL";

/// Environment variable holding the bearer token.
pub const TOKEN_VAR: &str = "PAT";

/// Errors raised while loading [`DispatchConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration error: environment variable {variable} is not set")]
    Missing { variable: &'static str },

    #[error("Configuration error: environment variable {variable} is empty")]
    Empty { variable: &'static str },
}

/// Bearer token used in the `Authorization` header.
///
/// `Debug` output is redacted so the token never reaches logs.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for use in a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Target endpoint and credentials for the outbound dispatch.
///
/// The URL is kept as configured; a malformed URL surfaces as a dispatch
/// error on the invocation that tries to use it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    pub url: String,
    pub token: BearerToken,
}

impl DispatchConfig {
    pub fn new(url: impl Into<String>, token: BearerToken) -> Self {
        Self {
            url: url.into(),
            token,
        }
    }

    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = required(&lookup, DISPATCH_URL_VAR)?;
        let token = required(&lookup, TOKEN_VAR)?;
        Ok(Self::new(url, BearerToken::new(token)))
    }
}

fn required<F>(lookup: &F, variable: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(variable) {
        None => Err(ConfigError::Missing { variable }),
        Some(value) if value.is_empty() => Err(ConfigError::Empty { variable }),
        Some(value) => Ok(value),
    }
}
