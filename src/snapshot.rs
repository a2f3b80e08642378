//! Snapshot persistence
//!
//! The whole progression state is one JSON blob, rewritten in full after
//! every mutation. Loading is infallible from the caller's point of view:
//! a missing, unreadable, or corrupt snapshot falls back to first-run
//! defaults with a log line, never a user-visible error. Saves run on a
//! detached thread with an owned copy of the state, so mutations are never
//! blocked; a crash before the write lands loses at most the latest update.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::progression::UserProgression;

/// File name of the snapshot inside the data directory.
const SNAPSHOT_FILE: &str = "progress.json";

/// Loads and saves the progression snapshot at a fixed path.
///
/// Every save carries a generation number and the write is skipped when a
/// newer generation already reached the file, so a slow detached save can
/// never clobber a later one.
#[derive(Debug, Clone)]
pub struct SnapshotGateway {
    path: PathBuf,
    next_generation: Arc<AtomicU64>,
    /// Generation of the last write that reached the file.
    written: Arc<Mutex<u64>>,
}

impl SnapshotGateway {
    /// Gateway at the default location (`~/.trailpoints/progress.json`).
    pub fn open_default() -> Self {
        let dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".trailpoints");
        Self::at(dir.join(SNAPSHOT_FILE))
    }

    /// Gateway at a specific snapshot path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            next_generation: Arc::new(AtomicU64::new(1)),
            written: Arc::new(Mutex::new(0)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, falling back to defaults on any failure.
    pub fn load(&self) -> UserProgression {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no snapshot yet, starting fresh");
            return UserProgression::default();
        }
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to load snapshot, using defaults");
                UserProgression::default()
            }
        }
    }

    fn try_load(&self) -> Result<UserProgression> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to parse {}", self.path.display()))
    }

    /// Write the snapshot, creating the parent directory if needed.
    pub fn save(&self, state: &UserProgression) -> Result<()> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        self.write(generation, state)
    }

    /// Fire-and-forget save on a detached thread. Failures are logged and
    /// swallowed; the in-memory state stays authoritative until the next
    /// successful save.
    pub fn save_detached(&self, state: UserProgression) {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        let gateway = self.clone();
        std::thread::spawn(move || {
            if let Err(e) = gateway.write(generation, &state) {
                warn!(path = %gateway.path.display(), error = %e, "failed to save snapshot");
            }
        });
    }

    fn write(&self, generation: u64, state: &UserProgression) -> Result<()> {
        let mut written = match self.written.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if generation < *written {
            debug!(path = %self.path.display(), "skipping stale snapshot write");
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(state).context("failed to serialize snapshot")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        *written = generation;
        Ok(())
    }
}
