// src/lib.rs

pub mod actions;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod watch;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{RegistrationSpec, load_and_validate};
use crate::watch::{AsyncWatcher, CheckOutcome};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - watcher registration
/// - the repeated polling loop (the core itself never loops or sleeps)
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let entries = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&entries);
        return Ok(());
    }

    let mut watcher = AsyncWatcher::new();
    for (index, entry) in entries.into_iter().enumerate() {
        info!("registering: {}", entry.describe());
        watcher
            .register_actions(entry.spec, entry.trigger, entry.actions)
            .with_context(|| format!("registering watch entry #{index}"))?;
    }

    if args.once {
        report_outcome(&watcher.check().await);
        return Ok(());
    }

    info!(
        interval_ms = args.interval_ms,
        "watching; press Ctrl+C to stop"
    );

    let mut ticker = tokio::time::interval(Duration::from_millis(args.interval_ms.max(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("stopped by user");
                break;
            }
            _ = ticker.tick() => {
                report_outcome(&watcher.check().await);
            }
        }
    }

    Ok(())
}

/// Surface a check's collected failures without ever aborting the loop.
fn report_outcome(outcome: &CheckOutcome) {
    if !outcome.events.is_empty() {
        debug!(events = outcome.events.len(), "check dispatched changes");
    }
    for err in &outcome.errors {
        warn!(error = %err, "check failure");
    }
}

/// Simple dry-run output: print each entry as it would be registered.
fn print_dry_run(entries: &[RegistrationSpec]) {
    println!("watchfs dry-run");
    println!("entries ({}):", entries.len());
    for entry in entries {
        println!("  - {}", entry.describe());
    }

    debug!("dry-run complete (no watching)");
}
