//! User management command implementations

use anyhow::Result;
use muse_core::db::Database;

pub fn cmd_users_list(db: &Database) -> Result<()> {
    let users = db.list_users()?;

    if users.is_empty() {
        println!("No users yet. Create one with 'muse users add'.");
        return Ok(());
    }

    println!();
    println!("{:<5} {:<20} {:<30} {:<10}", "ID", "Name", "Email", "Reminders");
    println!("{}", "─".repeat(68));
    for user in users {
        println!(
            "{:<5} {:<20} {:<30} {:<10}",
            user.id,
            user.name,
            user.email,
            if user.reminders_enabled { "on" } else { "off" }
        );
    }

    Ok(())
}

pub fn cmd_users_add(db: &Database, name: &str, email: &str, password: &str) -> Result<()> {
    let user = db.create_user(name, email, password)?;
    println!("Created user {} (id {}, {})", user.name, user.id, user.email);
    Ok(())
}
