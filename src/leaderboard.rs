//! Leaderboard stub
//!
//! The leaderboard is answered from fixture data, not computed from
//! progression state. This is the boundary to a future ranking service;
//! the engine only renders whatever standings that collaborator supplies.

/// One row of the standings.
#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: &'static str,
    pub points: u64,
    pub level: u32,
}

/// Mock standings served until the ranking service exists.
static STANDINGS: &[LeaderboardEntry] = &[
    LeaderboardEntry {
        rank: 1,
        name: "Mara K.",
        points: 12840,
        level: 19,
    },
    LeaderboardEntry {
        rank: 2,
        name: "Jonas W.",
        points: 11275,
        level: 18,
    },
    LeaderboardEntry {
        rank: 3,
        name: "Priya S.",
        points: 9930,
        level: 16,
    },
    LeaderboardEntry {
        rank: 4,
        name: "Tom B.",
        points: 8415,
        level: 15,
    },
    LeaderboardEntry {
        rank: 5,
        name: "Lena F.",
        points: 7060,
        level: 14,
    },
    LeaderboardEntry {
        rank: 6,
        name: "Diego R.",
        points: 5890,
        level: 12,
    },
    LeaderboardEntry {
        rank: 7,
        name: "Aiko T.",
        points: 4475,
        level: 11,
    },
    LeaderboardEntry {
        rank: 8,
        name: "Sam O.",
        points: 3210,
        level: 9,
    },
];

/// Current standings.
pub fn standings() -> &'static [LeaderboardEntry] {
    STANDINGS
}
