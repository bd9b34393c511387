use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;

use crate::{
    api::{ApiClient, ApiEnvelope, ApiError},
    app::{init_config, AppConfig, AppState},
    store::{Persistor, StateStore},
};

use super::{Commands, HttpMethod};

/// Handle CLI subcommands
pub async fn run(config: AppConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Init => {
            println!("Initializing Gangway configuration...");
            init_config()?;
            println!("Configuration initialized successfully!");
            Ok(())
        }
        Commands::Status => show_status(&config),
        Commands::Login { name, token } => login(&name, &token),
        Commands::Logout => logout(),
        Commands::Request {
            method,
            path,
            query,
            body,
        } => request(config, method, &path, query.as_deref(), body.as_deref()).await,
    }
}

/// Open the store at its default location. Login and logout need no
/// HTTP client, so they skip the full wiring.
fn open_store() -> Result<StateStore> {
    let persistor = Persistor::at_default_location()?;
    Ok(StateStore::open(persistor))
}

fn login(name: &str, token: &str) -> Result<()> {
    let store = open_store()?;
    store.login(name, token);
    println!("Logged in as {}", name.green());
    Ok(())
}

fn logout() -> Result<()> {
    let store = open_store()?;
    let name = store.identity();
    store.logout();
    if name.is_empty() {
        println!("Logged out");
    } else {
        println!("Logged out {}", name.yellow());
    }
    Ok(())
}

/// Show configuration and session status
fn show_status(config: &AppConfig) -> Result<()> {
    let store = open_store()?;
    let snapshot = store.snapshot();

    println!("Gangway Status:");
    println!();

    // Check configuration
    if config.base_url.is_empty() {
        println!("  [WARNING] Base URL: Not set (export GANGWAY_BASE_URL)");
    } else {
        println!("  [OK] Base URL: {}", config.base_url);
    }
    println!("  [OK] Timeout: {}s", config.timeout_secs);
    println!(
        "  [OK] Headers: language={} platform={} version={}",
        config.language, config.platform, config.version
    );

    // Check session
    println!("\n  Session:");
    if snapshot.auth.is_logged_in() {
        println!("    • Identity: {}", snapshot.auth.name.green());
        println!("    • Credential: present");
    } else {
        println!("    • Not logged in");
    }

    // Transient slice; a fresh process always starts this at zero
    println!("\n  Activity (transient):");
    println!("    • Requests this run: {}", snapshot.activity.request_count);
    if let Some(endpoint) = &snapshot.activity.last_endpoint {
        println!("    • Last endpoint: {}", endpoint);
    }

    println!("\n  State file: {}", store.persist_path().display());
    println!();
    Ok(())
}

/// Perform one API call and print the envelope as JSON
async fn request(
    config: AppConfig,
    method: HttpMethod,
    path: &str,
    query: Option<&str>,
    body: Option<&str>,
) -> Result<()> {
    let state = AppState::init(config)?;

    let body = match body {
        Some(raw) => {
            Some(serde_json::from_str::<Value>(raw).context("Request body is not valid JSON")?)
        }
        None => None,
    };

    state.store.record_request(path);
    match perform(&state.client, method, path, query, body).await {
        Ok(envelope) => {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(())
        }
        Err(error) => {
            eprintln!(
                "{} {} (status {})",
                "Request failed:".red(),
                error.message,
                error.status
            );
            std::process::exit(1);
        }
    }
}

/// Map the CLI verb onto the matching client operation
async fn perform(
    client: &ApiClient,
    method: HttpMethod,
    path: &str,
    query: Option<&str>,
    body: Option<Value>,
) -> Result<ApiEnvelope<Value>, ApiError> {
    match method {
        HttpMethod::Get => client.get(path, query).await,
        HttpMethod::Post => client.post(path, body.unwrap_or(Value::Null)).await,
        HttpMethod::Put => client.put(path, body.unwrap_or(Value::Null)).await,
        HttpMethod::Patch => client.patch(path, body.unwrap_or(Value::Null)).await,
        HttpMethod::Delete => client.delete(path).await,
    }
}
