//! Manual reminder pass command implementation

use anyhow::{bail, Result};
use muse_core::db::Database;
use muse_core::mail::HttpMailer;
use muse_server::run_reminder_pass;

pub async fn cmd_remind(db: &Database, lookahead_hours: i64) -> Result<()> {
    let mailer = match HttpMailer::from_env() {
        Some(mailer) => mailer,
        None => bail!("Mail is not configured (set MUSE_MAIL_URL and MUSE_MAIL_SENDER)"),
    };

    println!("Running reminder pass ({}h lookahead)...", lookahead_hours);

    let now = chrono::Utc::now().naive_utc();
    let sent = run_reminder_pass(db, &mailer, now, lookahead_hours).await?;

    if sent > 0 {
        println!("Sent {} digest(s).", sent);
    } else {
        println!("Nothing to send.");
    }

    Ok(())
}
