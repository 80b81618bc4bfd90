use super::Context;
use anyhow::anyhow;
use clap::{Args, Subcommand};
use spot::NotificationLog;
use std::sync::MutexGuard;

#[derive(Debug, Args)]
pub struct NotificationsArgs {
    #[command(subcommand)]
    pub action: Option<NotificationAction>,
}

#[derive(Debug, Subcommand)]
pub enum NotificationAction {
    /// Show the log, newest first (default)
    List {
        /// Only unread entries
        #[arg(long)]
        unread: bool,
    },
    /// Mark one entry as read
    Read { id: i64 },
    /// Mark every entry as read
    ReadAll,
    Delete { id: i64 },
    /// Remove every entry
    Clear,
}

pub fn execute(ctx: &Context, args: NotificationsArgs) -> anyhow::Result<()> {
    let mut log = lock(ctx)?;
    match args.action.unwrap_or(NotificationAction::List { unread: false }) {
        NotificationAction::List { unread } => {
            let entries: Vec<_> = log
                .entries()
                .iter()
                .filter(|n| !unread || !n.is_read)
                .collect();
            if entries.is_empty() {
                println!("No notifications");
            }
            for n in entries {
                println!(
                    "{} {}  {}  [{}] {}",
                    if n.is_read { " " } else { "*" },
                    n.id,
                    n.timestamp.format("%Y-%m-%d %H:%M"),
                    n.title,
                    n.message
                );
            }
            println!("{} unread", log.unread_count());
        }
        NotificationAction::Read { id } => {
            if !log.mark_read(id)? {
                return Err(anyhow!("no notification with id {id}"));
            }
        }
        NotificationAction::ReadAll => println!("{} marked read", log.mark_all_read()?),
        NotificationAction::Delete { id } => {
            if !log.delete(id)? {
                return Err(anyhow!("no notification with id {id}"));
            }
        }
        NotificationAction::Clear => println!("{} removed", log.clear_all()?),
    }
    Ok(())
}

fn lock(ctx: &Context) -> anyhow::Result<MutexGuard<'_, NotificationLog>> {
    ctx.activity
        .lock()
        .map_err(|_| anyhow!("activity log lock poisoned"))
}
