//! Streak tracking system
//!
//! Computes day-over-day continuation of the activity streak. The logic is
//! a pure function over calendar days so it can be tested without a clock;
//! the store applies the resulting state and the milestone bonus.

use chrono::{Local, NaiveDate};

/// Points awarded into the achievements bucket on every 7th streak day.
pub const MILESTONE_POINTS: u64 = 50;
/// XP awarded on every 7th streak day.
pub const MILESTONE_XP: u64 = 100;

/// How the streak moved on this update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Second activity on the same calendar day; nothing changes.
    Unchanged,
    /// Activity on the day after the previous one; streak grew by one.
    Extended,
    /// First activity ever, or a gap of two or more days; streak restarts at 1.
    Started,
}

/// Result of a streak update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakUpdate {
    pub streak: u32,
    pub longest: u32,
    pub last_activity_date: NaiveDate,
    pub change: StreakChange,
    /// True when this update crossed a 7-day multiple (7, 14, 21, ...).
    pub milestone: bool,
}

/// Advance the streak for an activity completed on `today`.
///
/// `longest` only ever grows; a reset leaves the historical best intact.
pub fn update(
    today: NaiveDate,
    last_activity_date: Option<NaiveDate>,
    current: u32,
    longest: u32,
) -> StreakUpdate {
    if last_activity_date == Some(today) {
        return StreakUpdate {
            streak: current,
            longest,
            last_activity_date: today,
            change: StreakChange::Unchanged,
            milestone: false,
        };
    }

    let yesterday = today.pred_opt();
    let (streak, change) = if last_activity_date.is_some() && last_activity_date == yesterday {
        (current + 1, StreakChange::Extended)
    } else {
        (1, StreakChange::Started)
    };

    StreakUpdate {
        streak,
        longest: longest.max(streak),
        last_activity_date: today,
        change,
        milestone: change == StreakChange::Extended && streak % 7 == 0,
    }
}

/// Today's date in the device's local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
