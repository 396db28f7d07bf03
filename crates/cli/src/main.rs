//! Pipeline relay entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse arguments** — select the trigger mode and log level.
//! 2. **Wire observability** — configure `tracing-subscriber` with a JSON layer
//!    and, when `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an OpenTelemetry OTLP
//!    exporter.
//! 3. **Load configuration** — read [`github::DispatchConfig`] from the
//!    environment and construct the dispatch client and
//!    [`notification::NotificationHandler`].
//! 4. **Run the event source** — based on [`args::TriggerMode`]:
//!    - `Lambda` — serve invocations from the Lambda runtime API.
//!    - `Invoke` — handle one envelope from `--event` or stdin and print
//!      `OK` or `SKIP`.

mod args;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use github::{DispatchConfig, RepositoryDispatchClient};
use listener::{LambdaEventSource, SingleShotEventSource};
use notification::NotificationHandler;
use tracing::{error, info};

use crate::args::{Cli, TriggerMode};
use crate::telemetry::{init_telemetry, shutdown_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let telemetry = TelemetryConfig::from_lookup(&cli.log_level, |key| std::env::var(key).ok());
    let provider = init_telemetry(&telemetry)?;

    let result = run(cli.mode).await;
    if let Err(err) = &result {
        let message = format!("{err:#}");
        error!(error = %message, "Relay terminated with error");
    }

    shutdown_telemetry(provider);
    result
}

async fn run(mode: TriggerMode) -> Result<()> {
    let config = DispatchConfig::from_env().context("loading dispatch configuration")?;
    info!(url = %config.url, "Loaded dispatch configuration");

    let client = RepositoryDispatchClient::new(config)?;
    let handler = NotificationHandler::new(client);

    match mode {
        TriggerMode::Lambda => {
            LambdaEventSource::new(Arc::new(handler)).run().await?;
        }
        TriggerMode::Invoke { event } => {
            let outcome = match event {
                Some(path) => {
                    let file = tokio::fs::File::open(&path)
                        .await
                        .with_context(|| format!("opening event file {}", path.display()))?;
                    SingleShotEventSource::new(file).run(&handler).await?
                }
                None => {
                    SingleShotEventSource::new(tokio::io::stdin())
                        .run(&handler)
                        .await?
                }
            };
            println!("{outcome}");
        }
    }

    Ok(())
}
