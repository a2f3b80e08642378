//! Progression engine
//!
//! The components of the rewards system, leaves first: the level curve, the
//! streak tracker, the achievement catalog and engine, the daily challenge
//! assigner, the rewards shop, and the [`ProgressionStore`] aggregate that
//! ties them together and owns the mutable state.

pub mod achievements;
pub mod challenges;
pub mod levels;
pub mod shop;
pub mod store;
pub mod streaks;

pub use achievements::{AchievementCategory, AchievementDef, AchievementState, Rarity, Unlock};
pub use challenges::{ChallengeKind, ChallengeTemplate, DailyChallenge, DAILY_CHALLENGE_COUNT};
pub use levels::{LevelDefinition, LevelProgress, MAX_LEVEL};
pub use shop::{PurchaseError, RewardCategory, RewardItem};
pub use store::{
    ActivityInput, ActivitySummary, LevelUp, PointsBreakdown, PointsCategory, ProgressionStore,
    Purchase, UserProgression, WeeklyGoal,
};
pub use streaks::{StreakChange, StreakUpdate};
