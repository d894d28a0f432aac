//! Web server command implementation

use std::path::Path;

use anyhow::Result;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    let db = open_db(db_path)?;

    println!("Starting Muse server...");
    println!("   Database: {}", db_path.display());
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    println!("   Listening on http://{}:{}", host, port);

    let static_dir = static_dir.and_then(|p| p.to_str());
    muse_server::serve(db, host, port, static_dir).await
}
