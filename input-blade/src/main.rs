//! Line-oriented driver for the chat input blade.
//!
//! Wires services from configuration, resolves the current user, then sends
//! each line read from standard input as a chat message. State changes and
//! published messages are reported through structured logs. Without
//! `RUST_LOG` the log filter defaults to `info`, so published messages show.

use std::sync::Arc;

use color_eyre::eyre::{Context, Result, eyre};
use input_blade::composition::{BladeSettings, ServiceRegistry};
use input_blade::domain::{InputViewModel, SendOutcome, SkipReason};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_FILTER: &str = "info";

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(log_filter())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        BladeSettings::load().map_err(|err| eyre!("failed to load blade settings: {err}"))?;
    let registry =
        ServiceRegistry::from_settings(&settings).wrap_err("failed to build service registry")?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to create Tokio runtime")?;
    runtime.block_on(run(registry))
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

async fn run(registry: ServiceRegistry) -> Result<()> {
    let mut view_model = InputViewModel::connect(&registry.services(), Arc::new(DefaultClock)).await;
    if !view_model.state().enabled() {
        warn!(
            feedback = view_model.state().feedback_message(),
            "input blade disabled"
        );
        return Ok(());
    }
    info!("input blade ready; reading messages from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.wrap_err("failed to read stdin")? {
        match view_model.send_text(line).await {
            Ok(SendOutcome::Sent) => {}
            Ok(SendOutcome::Skipped(SkipReason::EmptyText)) => {
                info!("ignoring empty message");
            }
            Ok(SendOutcome::Skipped(SkipReason::Disabled)) => {
                warn!("input blade disabled; message dropped");
            }
            Err(error) => warn!(%error, "message was not delivered"),
        }
    }
    Ok(())
}
