//! Debounced background persistence.
//!
//! The store hands a full-state snapshot to the writer thread after every
//! mutation; each snapshot resets the quiet-period timer, so a burst of
//! rapid mutations collapses into a single durable write of the final
//! state. The writer owns the database outright, which keeps the store
//! free of locks: the two sides only share immutable snapshots.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread::JoinHandle;
use std::time::Duration;

use log::{error, warn};

use crate::database::{Database, KEY_JOURNAL, KEY_SELECTION, KEY_WORKSPACES};
use crate::models::{JournalEntry, Workspace};
use crate::store::Selection;

/// Quiet period before a pending snapshot is written out
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Immutable full copy of the store's persisted state
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub workspaces: Vec<Workspace>,
    pub journal: Vec<JournalEntry>,
    pub selection: Selection,
}

enum Message {
    /// Replace the pending snapshot and restart the quiet-period timer
    Schedule(Box<Snapshot>),
    /// Write this snapshot now, then acknowledge
    Flush(Box<Snapshot>, SyncSender<()>),
    Shutdown,
}

/// Handle to the background writer thread
pub struct Autosave {
    tx: Sender<Message>,
    handle: Option<JoinHandle<()>>,
}

impl Autosave {
    /// Move the database into a writer thread and start the debounce loop
    pub fn spawn(database: Database, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let handle = std::thread::spawn(move || writer_loop(database, rx, debounce));
        Self {
            tx,
            handle: Some(handle),
        }
    }

    /// Queue a snapshot for the next debounced write.
    /// Fire-and-forget: never blocks the mutating caller.
    pub fn schedule(&self, snapshot: Snapshot) {
        if self.tx.send(Message::Schedule(Box::new(snapshot))).is_err() {
            warn!("autosave writer is gone; snapshot dropped");
        }
    }

    /// Write a snapshot immediately and wait for the write to finish.
    /// Supersedes any pending debounced snapshot.
    pub fn flush(&self, snapshot: Snapshot) {
        let (ack_tx, ack_rx) = mpsc::sync_channel(0);
        if self
            .tx
            .send(Message::Flush(Box::new(snapshot), ack_tx))
            .is_err()
        {
            warn!("autosave writer is gone; flush skipped");
            return;
        }
        let _ = ack_rx.recv();
    }
}

impl Drop for Autosave {
    fn drop(&mut self) {
        let _ = self.tx.send(Message::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn writer_loop(database: Database, rx: Receiver<Message>, debounce: Duration) {
    let mut pending: Option<Box<Snapshot>> = None;

    loop {
        // With a snapshot pending, wait at most one quiet period for the
        // next message; the timeout is the debounce firing.
        let message = if pending.is_some() {
            match rx.recv_timeout(debounce) {
                Ok(message) => Some(message),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match rx.recv() {
                Ok(message) => Some(message),
                Err(_) => break,
            }
        };

        match message {
            Some(Message::Schedule(snapshot)) => pending = Some(snapshot),
            Some(Message::Flush(snapshot, ack)) => {
                pending = None;
                persist(&database, &snapshot);
                let _ = ack.send(());
            }
            Some(Message::Shutdown) => break,
            None => {
                if let Some(snapshot) = pending.take() {
                    persist(&database, &snapshot);
                }
            }
        }
    }

    // Drain the pending snapshot on graceful shutdown. A killed process
    // still loses it; callers wanting a guarantee flush first.
    if let Some(snapshot) = pending.take() {
        persist(&database, &snapshot);
    }
}

/// Write every collection under its key. Failures are logged and skipped:
/// the in-memory store stays the source of truth and the next mutation
/// schedules a fresh write.
fn persist(database: &Database, snapshot: &Snapshot) {
    if let Err(e) = database.save(KEY_WORKSPACES, &snapshot.workspaces) {
        error!("autosave failed for '{KEY_WORKSPACES}': {e}");
    }
    if let Err(e) = database.save(KEY_JOURNAL, &snapshot.journal) {
        error!("autosave failed for '{KEY_JOURNAL}': {e}");
    }
    if let Err(e) = database.save(KEY_SELECTION, &snapshot.selection) {
        error!("autosave failed for '{KEY_SELECTION}': {e}");
    }
}
