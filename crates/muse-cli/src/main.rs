//! Muse CLI - content planner
//!
//! Usage:
//!   muse init                  Initialize database
//!   muse users add ...         Create a user
//!   muse serve --port 3000     Start web server
//!   muse export --user maya    Export content as CSV
//!   muse remind                Run one reminder pass

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(&cli.db, &host, port, static_dir.as_deref()).await,
        Commands::Status => commands::cmd_status(&cli.db),
        Commands::Users { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(UsersAction::List) => commands::cmd_users_list(&db),
                Some(UsersAction::Add {
                    name,
                    email,
                    password,
                }) => commands::cmd_users_add(&db, &name, &email, &password),
            }
        }
        Commands::Export { user, output } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_export(&db, &user, output.as_deref())
        }
        Commands::Remind { lookahead } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_remind(&db, lookahead).await
        }
    }
}
