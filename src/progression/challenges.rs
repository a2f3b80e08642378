//! Daily challenge system
//!
//! Three challenges are drawn from a fixed template pool each calendar day.
//! Assignment is anchored to the date it was made: reopening the app on the
//! same day keeps the current set and its completion flags, and a fresh set
//! is drawn only when the day changes. Completion is terminal per instance.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of challenges assigned per day.
pub const DAILY_CHALLENGE_COUNT: usize = 3;

/// What a challenge asks the user to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    Distance,
    Duration,
    Count,
    Social,
}

impl ChallengeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Duration => "duration",
            Self::Count => "count",
            Self::Social => "social",
        }
    }
}

/// Challenge template in the fixed pool.
#[derive(Debug, Clone)]
pub struct ChallengeTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: ChallengeKind,
    pub points: u64,
    pub xp: u64,
}

/// The template pool daily sets are drawn from.
pub static CHALLENGE_POOL: &[ChallengeTemplate] = &[
    ChallengeTemplate {
        id: "dc_morning_5k",
        title: "Morning 5K",
        description: "Cover 5 km before the day runs away",
        kind: ChallengeKind::Distance,
        points: 30,
        xp: 60,
    },
    ChallengeTemplate {
        id: "dc_half_hour",
        title: "Half Hour Mover",
        description: "Stay active for 30 minutes",
        kind: ChallengeKind::Duration,
        points: 20,
        xp: 40,
    },
    ChallengeTemplate {
        id: "dc_double_up",
        title: "Double Up",
        description: "Complete two activities today",
        kind: ChallengeKind::Count,
        points: 35,
        xp: 70,
    },
    ChallengeTemplate {
        id: "dc_city_walk",
        title: "City Walk",
        description: "Walk 3 km around town",
        kind: ChallengeKind::Distance,
        points: 15,
        xp: 30,
    },
    ChallengeTemplate {
        id: "dc_endurance_hour",
        title: "Endurance Hour",
        description: "Keep moving for a full hour",
        kind: ChallengeKind::Duration,
        points: 40,
        xp: 80,
    },
    ChallengeTemplate {
        id: "dc_share_it",
        title: "Share It",
        description: "Share today's activity with your crew",
        kind: ChallengeKind::Social,
        points: 15,
        xp: 30,
    },
    ChallengeTemplate {
        id: "dc_trail_10",
        title: "Trail Ten",
        description: "Cover 10 km on any route",
        kind: ChallengeKind::Distance,
        points: 50,
        xp: 100,
    },
    ChallengeTemplate {
        id: "dc_early_start",
        title: "Early Start",
        description: "Finish an activity before 9 AM",
        kind: ChallengeKind::Count,
        points: 25,
        xp: 50,
    },
];

impl ChallengeTemplate {
    /// Get template by ID
    pub fn get(id: &str) -> Option<&'static ChallengeTemplate> {
        CHALLENGE_POOL.iter().find(|c| c.id == id)
    }
}

/// One assigned challenge instance, persisted in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub id: String,
    pub title: String,
    pub kind: ChallengeKind,
    pub points: u64,
    pub xp: u64,
    #[serde(default)]
    pub completed: bool,
}

impl DailyChallenge {
    fn from_template(template: &ChallengeTemplate) -> Self {
        Self {
            id: template.id.to_string(),
            title: template.title.to_string(),
            kind: template.kind,
            points: template.points,
            xp: template.xp,
            completed: false,
        }
    }
}

/// Draw today's set: shuffle the pool and take the first
/// [`DAILY_CHALLENGE_COUNT`]. Repeats across consecutive days are allowed.
pub fn assign_daily(rng: &mut impl Rng) -> Vec<DailyChallenge> {
    let mut pool: Vec<&ChallengeTemplate> = CHALLENGE_POOL.iter().collect();
    pool.shuffle(rng);
    pool.into_iter()
        .take(DAILY_CHALLENGE_COUNT)
        .map(DailyChallenge::from_template)
        .collect()
}
