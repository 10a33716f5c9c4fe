//! Append-only activity log for movie mutations.
//!
//! Every accepted entry travels through one unbounded channel to a single
//! writer task that owns the file, so lines are never interleaved and are
//! written in the order they were recorded. Recording never waits on disk I/O,
//! and because the writer is detached from request handling, entries queued by
//! a cancelled request are still written.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;

/// Mutating action performed on a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieAction {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for MovieAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieAction::Create => write!(f, "Create"),
            MovieAction::Update => write!(f, "Update"),
            MovieAction::Delete => write!(f, "Delete"),
        }
    }
}

/// One line of the activity log
#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Local>,
    pub action: MovieAction,
    pub movie_id: i32,
    pub price: Decimal,
    pub category_id: i32,
}

impl ActivityEntry {
    pub fn new(action: MovieAction, movie_id: i32, price: Decimal, category_id: i32) -> Self {
        Self {
            timestamp: Local::now(),
            action,
            movie_id,
            price,
            category_id,
        }
    }

    /// `timestamp | action | movieId | price | categoryId`, price with two decimals
    pub fn format_line(&self) -> String {
        let mut price = self.price.round_dp(2);
        price.rescale(2);

        format!(
            "{} | {} | {} | {} | {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.action,
            self.movie_id,
            price,
            self.category_id
        )
    }
}

enum Command {
    Append(ActivityEntry),
    Flush(oneshot::Sender<()>),
}

/// Handle to the movie activity log writer
pub struct ActivityLog {
    tx: UnboundedSender<Command>,
    path: PathBuf,
}

impl ActivityLog {
    /// Open (or create) the log file, creating parent directories, and spawn
    /// the writer task.
    pub async fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        let (tx, rx) = unbounded_channel::<Command>();
        let writer_path = path.clone();
        tokio::spawn(async move {
            writer(file, rx, writer_path).await;
        });

        Ok(Self { tx, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Queue an entry. Never blocks; write failures are logged, not returned.
    pub fn record(&self, entry: ActivityEntry) {
        if self.tx.send(Command::Append(entry)).is_err() {
            tracing::error!(
                "Activity log writer for {} has stopped, entry dropped",
                self.path.display()
            );
        }
    }

    /// Wait until every entry recorded before this call has been written
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(ack_tx)).is_err() {
            return;
        }
        let _ = ack_rx.await;
    }
}

async fn writer(mut file: File, mut rx: UnboundedReceiver<Command>, path: PathBuf) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Append(entry) => {
                let mut line = entry.format_line();
                line.push('\n');

                if let Err(e) = file.write_all(line.as_bytes()).await {
                    tracing::error!("Failed to write activity log {}: {:?}", path.display(), e);
                    continue;
                }
                if let Err(e) = file.flush().await {
                    tracing::error!("Failed to flush activity log {}: {:?}", path.display(), e);
                }
            }
            Command::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }

    tracing::debug!("Activity log writer for {} stopped", path.display());
}
