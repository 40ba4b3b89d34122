//! CLI entry point for cerberus-gate.

mod cli;

use cerberus_gate::config::{default_storage_dir, load_config_with_diagnostics, Config, IssuerBaseUrl};
use cerberus_gate::location::{Location, NavigationState, PageContext};
use cerberus_gate::login::LoginFlow;
use cerberus_gate::navigation::Navigation;
use cerberus_gate::redirect::resolve;
use cerberus_gate::router::Router;
use cerberus_gate::session::{InMemorySession, SessionCollaborator, User};
use cerberus_gate::storage::{BrowserStorage, FileStore};
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();
    let args = cli::Args::parse();

    let mut config = match load_config_with_diagnostics(args.config.as_deref()) {
        Ok(loaded) => {
            for warning in &loaded.diagnostics.deprecations {
                eprintln!("warning: {warning}");
            }
            loaded.config
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(raw) = &args.issuer {
        match IssuerBaseUrl::new(raw) {
            Ok(issuer) => config.issuer = issuer,
            Err(e) => {
                eprintln!("error: --issuer: {e}");
                std::process::exit(1);
            }
        }
    }

    if let Err(msg) = run(args.command, &config).await {
        eprintln!("error: {msg}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CERBERUS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: cli::Command, config: &Config) -> Result<(), String> {
    match command {
        cli::Command::Resolve { candidate } => {
            println!("{}", resolve(&config.issuer, candidate.as_deref()));
            Ok(())
        }
        cli::Command::Navigate {
            href,
            referrer,
            from,
            signed_in,
        } => {
            let storage = file_storage(config)?;
            let location = Location::parse(&href)
                .map_err(|e| format!("`{href}` is not an absolute address: {e}"))?
                .with_state(from.map(NavigationState::from_destination));
            let page = PageContext::new(location, referrer);

            let session = if signed_in {
                InMemorySession::new().signed_in(User::new("cli", "cli@localhost", None))
            } else {
                InMemorySession::new()
            };
            session.check_auth().await;

            let router = Router::new(&config.issuer, &storage);
            let (landed, outcome) = router.settle(page, &session);
            tracing::info!(landed = landed.location.href(), "navigation settled");
            print_json(&json!({
                "landed": landed.location.href(),
                "outcome": outcome,
            }))
        }
        cli::Command::CompleteLogin => {
            let storage = file_storage(config)?;
            let outcome = LoginFlow::new(&config.issuer, &storage)
                .finish_sign_in()
                .map(Navigation::external)
                .unwrap_or(Navigation::Stay);
            print_json(&json!({ "outcome": outcome }))
        }
        cli::Command::ResetStorage => {
            let (session_path, local_path) = storage_paths(config)?;
            for path in [session_path, local_path] {
                FileStore::new(&path)
                    .clear()
                    .map_err(|e| format!("failed to clear `{}`: {e}", path.display()))?;
            }
            Ok(())
        }
    }
}

fn storage_paths(config: &Config) -> Result<(PathBuf, PathBuf), String> {
    let fallback = config
        .storage
        .dir
        .clone()
        .or_else(default_storage_dir)
        .ok_or_else(|| {
            "unable to resolve a storage directory; set CERBERUS_STORAGE_DIR".to_string()
        })?;
    Ok((
        config.storage.session_file(&fallback),
        config.storage.local_file(&fallback),
    ))
}

fn file_storage(config: &Config) -> Result<BrowserStorage, String> {
    let (session_path, local_path) = storage_paths(config)?;
    Ok(BrowserStorage::new(
        Arc::new(FileStore::new(session_path)),
        Arc::new(FileStore::new(local_path)),
    ))
}

fn print_json(value: &serde_json::Value) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}
