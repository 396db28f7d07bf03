//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Relays successful pipeline notifications to a repository_dispatch webhook.
///
/// The dispatch endpoint and bearer token are read from `DISPATCH_URL` and
/// `PAT`.
#[derive(Debug, Parser)]
#[command(name = "pipeline-relay", version, about)]
pub struct Cli {
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub mode: TriggerMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum TriggerMode {
    /// Serve notifications from the AWS Lambda runtime API.
    Lambda,
    /// Handle one notification envelope and print the outcome.
    Invoke {
        /// Envelope file; stdin when omitted.
        #[arg(long, value_name = "PATH")]
        event: Option<PathBuf>,
    },
}
