//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Muse - plan, schedule, and analyze your content
#[derive(Parser)]
#[command(name = "muse")]
#[command(about = "Self-hosted content planner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "muse.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Show database status (users, content, size)
    Status,

    /// Manage users (list, add)
    Users {
        #[command(subcommand)]
        action: Option<UsersAction>,
    },

    /// Export a user's content as CSV
    Export {
        /// Name of the user whose content to export
        #[arg(short, long)]
        user: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run one reminder pass immediately
    ///
    /// Requires mail configuration (MUSE_MAIL_URL, MUSE_MAIL_SENDER).
    Remind {
        /// Lookahead window in hours
        #[arg(long, default_value = "24")]
        lookahead: i64,
    },
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// List users
    List,

    /// Create a user
    Add {
        /// Display name (also the login name)
        #[arg(short, long)]
        name: String,

        /// Email address (reminder digests go here)
        #[arg(short, long)]
        email: String,

        /// Initial password
        #[arg(short, long)]
        password: String,
    },
}
