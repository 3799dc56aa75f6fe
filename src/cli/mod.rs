//! CLI interface for forgedesk

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "forgedesk")]
#[command(version)]
#[command(about = "Login and route protection for the workshop management app", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new forgedesk.toml configuration file
    Init,

    /// Start the HTTP server and web UI
    Serve {
        /// Host to bind to (defaults to the config value)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the config value)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Log in against a running server and store the session locally
    Login {
        #[arg(short, long, env = "FORGEDESK_EMAIL")]
        email: String,

        #[arg(short, long, env = "FORGEDESK_PASSWORD", hide_env_values = true)]
        password: String,

        /// Server base URL (defaults to the config value)
        #[arg(short, long)]
        server: Option<String>,
    },

    /// Clear the locally stored session
    Logout,

    /// Show the identity in the locally stored session
    Whoami {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Evaluate the route guard for a path without a server
    Check {
        /// Request path, e.g. /dashboard/x
        path: String,

        /// Token cookie or bearer value to present
        #[arg(long)]
        token: Option<String>,

        /// User cookie value to present
        #[arg(long)]
        user: Option<String>,
    },

    /// Encode or decode session tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
pub enum TokenAction {
    /// Encode a token for a user id and email
    Issue {
        #[arg(long)]
        id: u32,

        #[arg(long)]
        email: String,
    },

    /// Decode a token and print its claims
    Decode {
        token: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
