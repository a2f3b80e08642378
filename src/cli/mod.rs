//! CLI command implementations

pub mod achievements;
pub mod activity;
pub mod challenges;
pub mod leaderboard;
pub mod reset;
pub mod shop;
pub mod status;

use std::path::PathBuf;

use trailpoints::{ProgressionStore, SnapshotGateway};

/// Open the store at the given snapshot path, or the default location.
pub fn open_store(data: Option<PathBuf>) -> ProgressionStore {
    let gateway = match data {
        Some(path) => SnapshotGateway::at(path),
        None => SnapshotGateway::open_default(),
    };
    ProgressionStore::load_or_default(gateway)
}
