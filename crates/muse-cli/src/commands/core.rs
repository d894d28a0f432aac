//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show database status

use std::path::Path;

use anyhow::{Context, Result};
use muse_core::db::Database;

/// Open the database, creating/migrating it as needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Create a user: muse users add --name maya --email maya@example.com --password ...");
    println!("  2. Start web UI: muse serve");

    Ok(())
}

pub fn cmd_status(db_path: &Path) -> Result<()> {
    use std::fs;

    println!();
    println!("Muse Status");
    println!("   ─────────────────────────────────────────────");

    // Database path
    println!("   Database: {}", db_path.display());

    // Check if database file exists and get size
    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }

        let db = open_db(db_path)?;
        println!();
        println!("   Users: {}", db.list_users()?.len());
        println!("   Content items: {}", db.count_content()?);
        println!("   Library items: {}", db.count_library_items()?);
    } else {
        println!("   Size: (database not initialized)");
        println!();
        println!("   Run 'muse init' to create it.");
    }

    Ok(())
}
