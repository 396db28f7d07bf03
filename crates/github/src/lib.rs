//! Pipeline relay GitHub adapter.
//!
//! Implements the [`notification::Dispatcher`] port by POSTing a
//! `repository_dispatch` event to the configured endpoint with `reqwest`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. Endpoint,
//! credentials, headers, and HTTP transport details are handled here; the
//! [`notification`] crate never sees them.
//!
//! ## Configuration
//!
//! [`DispatchConfig`] is an explicit value passed to
//! [`RepositoryDispatchClient::new`]. It is usually read from the `DISPATCH_URL`
//! and `PAT` environment variables via [`DispatchConfig::from_env`].

pub mod client;
pub mod config;

pub use client::{ClientError, RepositoryDispatchClient, GITHUB_V3_ACCEPT};
pub use config::{BearerToken, ConfigError, DispatchConfig, DISPATCH_URL_VAR, TOKEN_VAR};
