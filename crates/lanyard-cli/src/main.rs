//! lanyard: watch a Discord user's presence from the terminal.
//!
//! Fetches a snapshot over HTTP and follows live updates over the Lanyard
//! socket, reprinting the presence card on every change until Ctrl-C.

mod cli;
mod render;
mod settings;

use std::future::Future;
use std::process::ExitCode;

use tokio::sync::{mpsc, watch};

use lanyard_common::{ConfigError, LanyardError};
use lanyard_config::{toml_loader, LanyardConfig};
use lanyard_presence::{
    HttpFetcher, PresenceClient, PresenceEvent, PresenceRecord, PresenceSnapshot, SnapshotFetcher,
};

use crate::cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let loaded = match &args.config {
        Some(path) => toml_loader::load_from_path(path),
        None => lanyard_config::load_config(),
    };
    let (config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (LanyardConfig::default(), Some(e)),
    };

    let directive = settings::log_directive(&args, &config);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| directive.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = load_error {
        report_config_error(&e);
    }

    match run(args, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "lanyard failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn report_config_error(e: &ConfigError) {
    match e {
        ConfigError::FileNotFound(_) => tracing::warn!("{e}, using defaults"),
        _ => tracing::error!(error = %e, "Failed to load config, using defaults"),
    }
}

async fn run(args: Args, config: LanyardConfig) -> Result<ExitCode, LanyardError> {
    if args.print_config {
        println!("{}", lanyard_config::config_to_json(&config));
        return Ok(ExitCode::SUCCESS);
    }

    let Some(user_id) = settings::user_id(&args, &config) else {
        eprintln!("error: no user id given and presence.user_id is not set");
        return Ok(ExitCode::FAILURE);
    };
    let client_config = settings::client_config(&config.presence, args.reconnect);

    if args.once {
        let fetcher = HttpFetcher::new(&client_config.api_base, client_config.request_timeout)?;
        return match fetcher.fetch(&user_id).await {
            Ok(record) => {
                print_record(&record, args.json)?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{e}");
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let mut client = PresenceClient::new(user_id, client_config)?;
    let snapshots = client.watch();
    let events = client.activate();
    tracing::info!(user_id = client.user_id(), "Watching presence");

    follow(snapshots, events, tokio::signal::ctrl_c(), args.json).await?;

    client.deactivate();
    Ok(ExitCode::SUCCESS)
}

/// Print every snapshot change and log every event until `shutdown`
/// resolves.
async fn follow<F: Future>(
    mut snapshots: watch::Receiver<PresenceSnapshot>,
    mut events: mpsc::Receiver<PresenceEvent>,
    shutdown: F,
    json: bool,
) -> Result<(), LanyardError> {
    print_snapshot(&snapshots.borrow_and_update().clone(), json)?;

    tokio::pin!(shutdown);
    let mut events_open = true;
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                tracing::info!("Interrupted, shutting down");
                break;
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                print_snapshot(&snapshot, json)?;
            }
            event = events.recv(), if events_open => match event {
                Some(event) => log_event(&event),
                // Session task finished; keep showing the last snapshot.
                None => events_open = false,
            },
        }
    }
    Ok(())
}

fn log_event(event: &PresenceEvent) {
    match event {
        PresenceEvent::Connected => tracing::info!("Connected to Lanyard socket"),
        PresenceEvent::Record(record) => {
            tracing::debug!(
                status = %record.status,
                activities = record.activities.len(),
                "Presence record"
            );
        }
        PresenceEvent::Disconnected => tracing::warn!("Lanyard socket disconnected"),
        PresenceEvent::Error(e) => tracing::warn!(error = %e, "Presence error"),
    }
}

fn print_snapshot(snapshot: &PresenceSnapshot, json: bool) -> Result<(), LanyardError> {
    if json {
        if let Some(record) = &snapshot.record {
            return print_record(record, true);
        }
        if let Some(reason) = snapshot.error() {
            eprintln!("{reason}");
        }
        return Ok(());
    }
    print!("{}", render::render_snapshot(snapshot, chrono::Utc::now()));
    println!();
    Ok(())
}

fn print_record(record: &PresenceRecord, json: bool) -> Result<(), LanyardError> {
    if json {
        let line = serde_json::to_string(record)
            .map_err(|e| LanyardError::Other(format!("failed to serialize record: {e}")))?;
        println!("{line}");
    } else {
        print!("{}", render::render_record(record, chrono::Utc::now()));
    }
    Ok(())
}
