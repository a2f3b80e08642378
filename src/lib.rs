//! Trailpoints - progression and rewards engine
//!
//! Trailpoints is the gamification core of a fitness/travel companion app:
//! it tracks levels and XP, daily activity streaks, achievements, daily
//! challenges, a points economy, and a rewards shop. The engine is a local,
//! client-held ledger: all state lives in a single [`UserProgression`]
//! snapshot that is loaded once at startup and rewritten after every
//! mutation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   activity / challenge / shop actions
//! │  App / CLI   ├──────────────┐
//! └──────────────┘              ▼
//!                      ┌──────────────────┐
//!                      │ ProgressionStore │── levels, streaks,
//!                      └────────┬─────────┘   achievements, shop
//!                               ▼
//!                  ~/.trailpoints/progress.json
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = ProgressionStore::load_or_default(SnapshotGateway::open_default());
//!
//! let summary = store.complete_activity(&ActivityInput {
//!     activity_type: "running".into(),
//!     distance_km: 5.2,
//!     duration_secs: 1800,
//! });
//! println!("+{} points, streak {}", summary.points, summary.streak);
//! ```
//!
//! The store is single-writer by construction (`&mut self` everywhere);
//! callers with concurrent surfaces must serialize access, e.g. behind an
//! `Arc<Mutex<ProgressionStore>>`.

pub mod leaderboard;
pub mod progression;
pub mod snapshot;

pub use progression::{
    ActivityInput, ActivitySummary, LevelProgress, LevelUp, PointsCategory, ProgressionStore,
    PurchaseError, UserProgression,
};
pub use snapshot::SnapshotGateway;
