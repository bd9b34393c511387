use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gangway")]
#[command(version = "0.1.0")]
#[command(about = "A typed API-gateway client with a persisted session", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Show configuration and session status (default)
    Status,
    /// Store an identity and credential for later requests
    Login {
        /// Identity name to store
        name: String,
        /// Bearer credential attached to outgoing requests
        #[arg(short, long)]
        token: String,
    },
    /// Clear the stored identity and credential
    Logout,
    /// Perform one API call and print the envelope
    Request {
        /// HTTP method
        #[arg(value_enum)]
        method: HttpMethod,
        /// Endpoint path relative to the base address (e.g. /profile)
        path: String,
        /// Raw query suffix appended to the path (e.g. "?page=2")
        #[arg(short, long)]
        query: Option<String>,
        /// JSON body for methods that carry one
        #[arg(short, long)]
        body: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}
