//! Achievement catalog and unlock engine
//!
//! The catalog is static; per-user progress lives in [`AchievementState`]
//! entries inside the snapshot. Unlocking is terminal: once `unlocked` is
//! set the entry never reverts, re-evaluation never re-awards, and
//! `progress` is monotonically non-decreasing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of signal drives an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    /// Distance covered in a single run (km).
    Distance,
    /// Lifetime number of completed activities.
    Count,
    /// Consecutive-day activity streak.
    Streak,
    /// Social shares of completed activities.
    Social,
    /// Driven by surfaces outside the engine (trips, events).
    Special,
}

impl AchievementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Count => "count",
            Self::Streak => "streak",
            Self::Social => "social",
            Self::Special => "special",
        }
    }
}

/// Display rarity, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub rarity: Rarity,
    /// Points awarded into the achievements bucket on unlock.
    pub points: u64,
    /// XP awarded on unlock.
    pub xp: u64,
    /// Threshold the category signal must reach.
    pub requirement: f64,
}

/// All achievement definitions
pub static ACHIEVEMENTS: &[AchievementDef] = &[
    // === DISTANCE (single run) ===
    AchievementDef {
        id: "first_5k",
        name: "First 5K",
        description: "Run 5 km in a single activity",
        category: AchievementCategory::Distance,
        rarity: Rarity::Common,
        points: 25,
        xp: 50,
        requirement: 5.0,
    },
    AchievementDef {
        id: "road_10k",
        name: "Road 10K",
        description: "Run 10 km in a single activity",
        category: AchievementCategory::Distance,
        rarity: Rarity::Uncommon,
        points: 50,
        xp: 100,
        requirement: 10.0,
    },
    AchievementDef {
        id: "half_marathon",
        name: "Half Marathon",
        description: "Run 21.1 km in a single activity",
        category: AchievementCategory::Distance,
        rarity: Rarity::Rare,
        points: 150,
        xp: 300,
        requirement: 21.1,
    },
    AchievementDef {
        id: "marathon",
        name: "Marathon",
        description: "Run 42.2 km in a single activity",
        category: AchievementCategory::Distance,
        rarity: Rarity::Epic,
        points: 400,
        xp: 800,
        requirement: 42.2,
    },
    // === COUNT (lifetime activities) ===
    AchievementDef {
        id: "first_activity",
        name: "First Steps",
        description: "Complete your first activity",
        category: AchievementCategory::Count,
        rarity: Rarity::Common,
        points: 10,
        xp: 20,
        requirement: 1.0,
    },
    AchievementDef {
        id: "ten_activities",
        name: "Regular",
        description: "Complete 10 activities",
        category: AchievementCategory::Count,
        rarity: Rarity::Common,
        points: 30,
        xp: 60,
        requirement: 10.0,
    },
    AchievementDef {
        id: "fifty_activities",
        name: "Dedicated",
        description: "Complete 50 activities",
        category: AchievementCategory::Count,
        rarity: Rarity::Uncommon,
        points: 100,
        xp: 200,
        requirement: 50.0,
    },
    AchievementDef {
        id: "century_club",
        name: "Century Club",
        description: "Complete 100 activities",
        category: AchievementCategory::Count,
        rarity: Rarity::Rare,
        points: 250,
        xp: 500,
        requirement: 100.0,
    },
    // === STREAK ===
    AchievementDef {
        id: "streak_3",
        name: "Warming Up",
        description: "Keep a 3-day activity streak",
        category: AchievementCategory::Streak,
        rarity: Rarity::Common,
        points: 20,
        xp: 40,
        requirement: 3.0,
    },
    AchievementDef {
        id: "streak_7",
        name: "Week Warrior",
        description: "Keep a 7-day activity streak",
        category: AchievementCategory::Streak,
        rarity: Rarity::Uncommon,
        points: 75,
        xp: 150,
        requirement: 7.0,
    },
    AchievementDef {
        id: "streak_30",
        name: "Unstoppable",
        description: "Keep a 30-day activity streak",
        category: AchievementCategory::Streak,
        rarity: Rarity::Epic,
        points: 300,
        xp: 600,
        requirement: 30.0,
    },
    // === SOCIAL ===
    AchievementDef {
        id: "first_share",
        name: "Show and Tell",
        description: "Share an activity with your crew",
        category: AchievementCategory::Social,
        rarity: Rarity::Common,
        points: 15,
        xp: 30,
        requirement: 1.0,
    },
    AchievementDef {
        id: "social_butterfly",
        name: "Social Butterfly",
        description: "Share 10 activities",
        category: AchievementCategory::Social,
        rarity: Rarity::Uncommon,
        points: 60,
        xp: 120,
        requirement: 10.0,
    },
    // === SPECIAL ===
    AchievementDef {
        id: "globetrotter",
        name: "Globetrotter",
        description: "Complete an activity in a different country",
        category: AchievementCategory::Special,
        rarity: Rarity::Legendary,
        points: 500,
        xp: 1000,
        requirement: 1.0,
    },
];

impl AchievementDef {
    /// Get achievement definition by ID
    pub fn get(id: &str) -> Option<&'static AchievementDef> {
        ACHIEVEMENTS.iter().find(|a| a.id == id)
    }

    pub fn total_count() -> usize {
        ACHIEVEMENTS.len()
    }
}

/// Per-user progress for one achievement, persisted in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementState {
    pub id: String,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl AchievementState {
    fn locked(id: &str) -> Self {
        Self {
            id: id.to_string(),
            progress: 0.0,
            unlocked: false,
            unlocked_at: None,
        }
    }

    /// Fresh per-user state for the full catalog.
    pub fn seed_catalog() -> Vec<AchievementState> {
        ACHIEVEMENTS.iter().map(|a| Self::locked(a.id)).collect()
    }

    /// Append locked entries for catalog achievements missing from an older
    /// snapshot. Entries for ids no longer in the catalog are kept as-is.
    pub fn sync_catalog(states: &mut Vec<AchievementState>) {
        for def in ACHIEVEMENTS {
            if !states.iter().any(|s| s.id == def.id) {
                states.push(Self::locked(def.id));
            }
        }
    }

    pub fn definition(&self) -> Option<&'static AchievementDef> {
        AchievementDef::get(&self.id)
    }
}

/// A newly unlocked achievement with its rewards.
#[derive(Debug, Clone, PartialEq)]
pub struct Unlock {
    pub id: String,
    pub name: &'static str,
    pub points: u64,
    pub xp: u64,
}

fn unlock(state: &mut AchievementState, def: &'static AchievementDef, now: DateTime<Utc>) -> Unlock {
    state.progress = def.requirement;
    state.unlocked = true;
    state.unlocked_at = Some(now);
    Unlock {
        id: state.id.clone(),
        name: def.name,
        points: def.points,
        xp: def.xp,
    }
}

/// Evaluate a single-event signal (e.g. distance of one run) against every
/// locked achievement in `category`. Progress only moves when one event
/// meets the full requirement; a 5 km run is no progress toward a 10 km one.
pub fn record_event(
    states: &mut [AchievementState],
    category: AchievementCategory,
    value: f64,
    now: DateTime<Utc>,
) -> Vec<Unlock> {
    let mut unlocks = Vec::new();
    for state in states.iter_mut() {
        let Some(def) = state.definition() else {
            continue;
        };
        if def.category != category || state.unlocked {
            continue;
        }
        if value >= def.requirement {
            unlocks.push(unlock(state, def, now));
        }
    }
    unlocks
}

/// Evaluate a cumulative total (lifetime count, streak length, shares)
/// against every locked achievement in `category`. Progress tracks the best
/// observed total and never decreases.
pub fn record_total(
    states: &mut [AchievementState],
    category: AchievementCategory,
    total: f64,
    now: DateTime<Utc>,
) -> Vec<Unlock> {
    let mut unlocks = Vec::new();
    for state in states.iter_mut() {
        let Some(def) = state.definition() else {
            continue;
        };
        if def.category != category || state.unlocked {
            continue;
        }
        if total >= def.requirement {
            unlocks.push(unlock(state, def, now));
        } else {
            state.progress = state.progress.max(total.min(def.requirement));
        }
    }
    unlocks
}
