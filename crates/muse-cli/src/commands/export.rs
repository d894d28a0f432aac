//! Content export command implementation

use std::path::Path;

use anyhow::{Context, Result};
use muse_core::db::Database;
use muse_core::export::export_content_csv;

pub fn cmd_export(db: &Database, user_name: &str, output: Option<&Path>) -> Result<()> {
    let user = db
        .get_user_by_name(user_name)?
        .with_context(|| format!("User '{}' not found", user_name))?;

    let items = db.list_content(user.id)?;

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            export_content_csv(&items, file)?;
            println!("Exported {} item(s) to {}", items.len(), path.display());
        }
        None => {
            export_content_csv(&items, std::io::stdout().lock())?;
        }
    }

    Ok(())
}
