//! Progression store - the aggregate root
//!
//! Owns the [`UserProgression`] state and the mutation API used by the rest
//! of the app. Every mutation runs to completion on `&mut self`, then the
//! new snapshot is handed to the gateway as a fire-and-forget save. There is
//! no rollback across the multi-field mutation of an activity completion; a
//! crash between mutation and save loses at most the latest update.

use chrono::{Datelike, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::achievements::{self, AchievementCategory, AchievementState, Unlock};
use super::challenges::{self, DailyChallenge};
use super::levels::{self, LevelProgress, MAX_LEVEL};
use super::shop::{self, PurchaseError};
use super::streaks;
use crate::snapshot::SnapshotGateway;

/// Points awarded for sharing an activity.
const SHARE_POINTS: u64 = 10;
/// XP awarded for sharing an activity.
const SHARE_XP: u64 = 15;

/// Where earned points are attributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsCategory {
    Activities,
    Challenges,
    Social,
    Achievements,
}

impl PointsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activities => "activities",
            Self::Challenges => "challenges",
            Self::Social => "social",
            Self::Achievements => "achievements",
        }
    }
}

/// Lifetime points earned per source. Purchases spend from `total_points`
/// only, so the buckets keep their full history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsBreakdown {
    pub activities: u64,
    pub challenges: u64,
    pub social: u64,
    pub achievements: u64,
}

impl PointsBreakdown {
    fn bucket_mut(&mut self, category: PointsCategory) -> &mut u64 {
        match category {
            PointsCategory::Activities => &mut self.activities,
            PointsCategory::Challenges => &mut self.challenges,
            PointsCategory::Social => &mut self.social,
            PointsCategory::Achievements => &mut self.achievements,
        }
    }
}

/// Rolling weekly goal counters, reset when the ISO week changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyGoal {
    pub activities: u32,
    pub distance_km: f64,
    /// Monday of the week the counters belong to.
    pub week_start: Option<NaiveDate>,
}

impl WeeklyGoal {
    fn bump(&mut self, today: NaiveDate, distance_km: f64) {
        let monday = today - chrono::Duration::days(today.weekday().num_days_from_monday() as i64);
        if self.week_start != Some(monday) {
            self.activities = 0;
            self.distance_km = 0.0;
            self.week_start = Some(monday);
        }
        self.activities += 1;
        self.distance_km += distance_km;
    }
}

/// The whole persisted progression state, one snapshot blob.
///
/// Missing fields default on load, so snapshots written by older app
/// versions keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProgression {
    pub level: u32,
    pub xp: u64,
    pub total_points: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_activity_date: Option<NaiveDate>,
    pub points_breakdown: PointsBreakdown,
    pub weekly_goal: WeeklyGoal,
    /// Lifetime completed activities (drives count achievements).
    pub total_activities: u64,
    /// Lifetime social shares (drives social achievements).
    pub total_shares: u64,
    pub achievements: Vec<AchievementState>,
    pub daily_challenges: Vec<DailyChallenge>,
    /// Day the current challenge set was assigned; a new set is drawn only
    /// when this differs from today.
    pub challenges_assigned_on: Option<NaiveDate>,
    pub purchased_rewards: std::collections::BTreeSet<String>,
}

impl Default for UserProgression {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            total_points: 0,
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
            points_breakdown: PointsBreakdown::default(),
            weekly_goal: WeeklyGoal::default(),
            total_activities: 0,
            total_shares: 0,
            achievements: AchievementState::seed_catalog(),
            daily_challenges: Vec::new(),
            challenges_assigned_on: None,
            purchased_rewards: std::collections::BTreeSet::new(),
        }
    }
}

/// Outcome of an XP award.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub leveled_up: bool,
    pub new_level: Option<u32>,
}

impl LevelUp {
    fn none() -> Self {
        Self {
            leveled_up: false,
            new_level: None,
        }
    }
}

/// A completed activity as reported by the tracking surface.
#[derive(Debug, Clone)]
pub struct ActivityInput {
    pub activity_type: String,
    pub distance_km: f64,
    pub duration_secs: u64,
}

/// Everything a completed activity earned, for the celebration screen.
#[derive(Debug, Clone)]
pub struct ActivitySummary {
    /// Activity points (after the streak multiplier, before achievements).
    pub points: u64,
    /// Activity XP (after the streak multiplier, before achievements).
    pub xp: u64,
    pub streak: u32,
    /// Whether this activity crossed a 7-day streak milestone.
    pub milestone: bool,
    pub leveled_up: bool,
    pub new_level: Option<u32>,
    pub unlocked: Vec<Unlock>,
}

/// Receipt for a successful reward purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub id: String,
    pub cost: u64,
    pub remaining_points: u64,
}

/// Aggregate root over all progression state.
///
/// Single-writer by construction: every mutation takes `&mut self`, so two
/// callers can never interleave read-modify-write cycles on the same
/// fields. Wrap the store in a mutex if multiple surfaces need it.
pub struct ProgressionStore {
    state: UserProgression,
    gateway: SnapshotGateway,
    rng: StdRng,
}

impl ProgressionStore {
    /// Load the snapshot (or defaults), reconcile the achievement catalog,
    /// and make sure today has a challenge set.
    pub fn load_or_default(gateway: SnapshotGateway) -> Self {
        Self::with_rng(gateway, StdRng::from_entropy())
    }

    /// Like [`load_or_default`](Self::load_or_default) with a caller-provided
    /// RNG, so tests get deterministic challenge assignment.
    pub fn with_rng(gateway: SnapshotGateway, rng: StdRng) -> Self {
        let mut state = gateway.load();
        AchievementState::sync_catalog(&mut state.achievements);
        let mut store = Self {
            state,
            gateway,
            rng,
        };
        store.refresh_daily_challenges();
        store
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> &UserProgression {
        &self.state
    }

    /// Progress through the current level for the profile header.
    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::new(self.state.level, self.state.xp)
    }

    // ========================================
    // XP & POINTS
    // ========================================

    /// Award XP and handle at most one level-up.
    ///
    /// Deliberately does not cascade: an award large enough to cross two
    /// thresholds applies one level and parks the excess, and the next
    /// award levels again. Keeping the ceiling makes every level-up an
    /// event the UI can celebrate one at a time.
    pub fn add_xp(&mut self, amount: u64) -> LevelUp {
        let result = self.add_xp_mut(amount);
        self.persist();
        result
    }

    fn add_xp_mut(&mut self, amount: u64) -> LevelUp {
        self.state.xp += amount;
        let required = levels::xp_required(self.state.level);
        if self.state.level < MAX_LEVEL && self.state.xp >= required {
            self.state.level += 1;
            self.state.xp -= required;
            info!(level = self.state.level, "leveled up");
            return LevelUp {
                leveled_up: true,
                new_level: Some(self.state.level),
            };
        }
        LevelUp::none()
    }

    /// Award points into a bucket.
    pub fn add_points(&mut self, amount: u64, category: PointsCategory) {
        self.add_points_mut(amount, category);
        self.persist();
    }

    fn add_points_mut(&mut self, amount: u64, category: PointsCategory) {
        self.state.total_points += amount;
        *self.state.points_breakdown.bucket_mut(category) += amount;
    }

    // ========================================
    // ACTIVITIES
    // ========================================

    /// Record a completed activity: base rewards, duration bonus, streak
    /// update with milestone, streak multiplier, weekly goal counters, and
    /// achievement evaluation - one logical transaction, one trailing save.
    pub fn complete_activity(&mut self, input: &ActivityInput) -> ActivitySummary {
        self.complete_activity_on(input, streaks::today())
    }

    /// Clock-injected variant of [`complete_activity`](Self::complete_activity).
    pub fn complete_activity_on(
        &mut self,
        input: &ActivityInput,
        today: NaiveDate,
    ) -> ActivitySummary {
        let mut points = (input.distance_km * 10.0).floor() as u64;
        let mut xp = (input.distance_km * 20.0).floor() as u64;

        let hours = input.duration_secs as f64 / 3600.0;
        if hours > 1.0 {
            points += (hours * 10.0).floor() as u64;
            xp += (hours * 20.0).floor() as u64;
        }

        let update = streaks::update(
            today,
            self.state.last_activity_date,
            self.state.current_streak,
            self.state.longest_streak,
        );
        self.state.current_streak = update.streak;
        self.state.longest_streak = update.longest;
        self.state.last_activity_date = Some(update.last_activity_date);

        let mut bonus_xp = 0;
        if update.milestone {
            self.add_points_mut(streaks::MILESTONE_POINTS, PointsCategory::Achievements);
            bonus_xp += streaks::MILESTONE_XP;
            info!(streak = update.streak, "streak milestone reached");
        }

        // A week-long streak multiplies the activity rewards
        if update.streak >= 7 {
            points = (points as f64 * 1.5).floor() as u64;
            xp = (xp as f64 * 1.5).floor() as u64;
        }

        self.add_points_mut(points, PointsCategory::Activities);
        self.state.weekly_goal.bump(today, input.distance_km);
        self.state.total_activities += 1;

        let now = Utc::now();
        let mut unlocked = Vec::new();
        if input.activity_type == "running" {
            unlocked.extend(achievements::record_event(
                &mut self.state.achievements,
                AchievementCategory::Distance,
                input.distance_km,
                now,
            ));
        }
        unlocked.extend(achievements::record_total(
            &mut self.state.achievements,
            AchievementCategory::Count,
            self.state.total_activities as f64,
            now,
        ));
        unlocked.extend(achievements::record_total(
            &mut self.state.achievements,
            AchievementCategory::Streak,
            update.streak as f64,
            now,
        ));
        for unlock in &unlocked {
            self.add_points_mut(unlock.points, PointsCategory::Achievements);
            bonus_xp += unlock.xp;
        }

        // One XP award per activity keeps the one-level-per-action ceiling
        let level_up = self.add_xp_mut(xp + bonus_xp);

        debug!(
            activity = %input.activity_type,
            distance_km = input.distance_km,
            points,
            xp,
            streak = update.streak,
            "activity recorded"
        );
        self.persist();

        ActivitySummary {
            points,
            xp,
            streak: update.streak,
            milestone: update.milestone,
            leveled_up: level_up.leveled_up,
            new_level: level_up.new_level,
            unlocked,
        }
    }

    /// Attribute a social share: social points, share total, and social
    /// achievement evaluation.
    pub fn record_social_share(&mut self) -> Vec<Unlock> {
        self.state.total_shares += 1;
        self.add_points_mut(SHARE_POINTS, PointsCategory::Social);

        let unlocked = achievements::record_total(
            &mut self.state.achievements,
            AchievementCategory::Social,
            self.state.total_shares as f64,
            Utc::now(),
        );
        let mut bonus_xp = SHARE_XP;
        for unlock in &unlocked {
            self.add_points_mut(unlock.points, PointsCategory::Achievements);
            bonus_xp += unlock.xp;
        }
        self.add_xp_mut(bonus_xp);
        self.persist();
        unlocked
    }

    /// Push externally driven achievement progress (special category:
    /// trips, events). Returns the unlock if this crossed the requirement.
    pub fn advance_achievement(&mut self, id: &str, progress: f64) -> Option<Unlock> {
        let state = self.state.achievements.iter_mut().find(|a| a.id == id)?;
        let def = state.definition()?;
        if state.unlocked {
            return None;
        }
        state.progress = state.progress.max(progress.min(def.requirement));

        let mut result = None;
        if state.progress >= def.requirement {
            state.unlocked = true;
            state.unlocked_at = Some(Utc::now());
            let unlock = Unlock {
                id: state.id.clone(),
                name: def.name,
                points: def.points,
                xp: def.xp,
            };
            self.add_points_mut(unlock.points, PointsCategory::Achievements);
            self.add_xp_mut(unlock.xp);
            result = Some(unlock);
        }
        self.persist();
        result
    }

    // ========================================
    // DAILY CHALLENGES
    // ========================================

    /// Draw a fresh challenge set if today differs from the assignment day.
    /// Same-day calls (including app restarts) keep the current set.
    pub fn refresh_daily_challenges(&mut self) {
        self.refresh_daily_challenges_on(streaks::today());
    }

    /// Clock-injected variant of
    /// [`refresh_daily_challenges`](Self::refresh_daily_challenges).
    pub fn refresh_daily_challenges_on(&mut self, today: NaiveDate) {
        if self.state.challenges_assigned_on == Some(today) {
            return;
        }
        self.state.daily_challenges = challenges::assign_daily(&mut self.rng);
        self.state.challenges_assigned_on = Some(today);
        debug!(day = %today, "assigned daily challenges");
        self.persist();
    }

    /// Complete a challenge from today's set. Returns false (and changes
    /// nothing) when the id is unknown or the instance is already done.
    pub fn complete_daily_challenge(&mut self, id: &str) -> bool {
        let Some(challenge) = self
            .state
            .daily_challenges
            .iter_mut()
            .find(|c| c.id == id && !c.completed)
        else {
            return false;
        };
        challenge.completed = true;
        let (points, xp) = (challenge.points, challenge.xp);

        self.add_points_mut(points, PointsCategory::Challenges);
        self.add_xp_mut(xp);
        self.persist();
        true
    }

    // ========================================
    // REWARDS SHOP
    // ========================================

    /// Buy a reward: validate, deduct the cost exactly once, record
    /// ownership. Failures leave the state untouched.
    pub fn purchase_reward(&mut self, id: &str) -> Result<Purchase, PurchaseError> {
        let item = shop::validate(id, self.state.total_points, &self.state.purchased_rewards)?;
        self.state.total_points -= item.cost;
        self.state.purchased_rewards.insert(item.id.to_string());
        self.persist();
        info!(reward = item.id, cost = item.cost, "reward purchased");
        Ok(Purchase {
            id: item.id.to_string(),
            cost: item.cost,
            remaining_points: self.state.total_points,
        })
    }

    // ========================================
    // MAINTENANCE
    // ========================================

    /// Wipe all progression back to first-run defaults.
    pub fn reset(&mut self) {
        self.state = UserProgression::default();
        self.refresh_daily_challenges();
        self.persist();
    }

    fn persist(&self) {
        self.gateway.save_detached(self.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (ProgressionStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let gateway = SnapshotGateway::at(dir.path().join("progress.json"));
        let store = ProgressionStore::with_rng(gateway, StdRng::seed_from_u64(7));
        (store, dir)
    }

    fn run(distance_km: f64, duration_secs: u64) -> ActivityInput {
        ActivityInput {
            activity_type: "running".to_string(),
            distance_km,
            duration_secs,
        }
    }

    #[test]
    fn test_add_xp_levels_up_with_carry() {
        let (mut store, _dir) = test_store();
        store.state.xp = 90;

        let result = store.add_xp(20);
        assert!(result.leveled_up);
        assert_eq!(result.new_level, Some(2));
        assert_eq!(store.snapshot().level, 2);
        assert_eq!(store.snapshot().xp, 10);
    }

    #[test]
    fn test_add_xp_applies_at_most_one_level() {
        let (mut store, _dir) = test_store();

        // 1000 XP crosses level 1 (100) and would cross level 2 (150) too
        let result = store.add_xp(1000);
        assert_eq!(result.new_level, Some(2));
        assert_eq!(store.snapshot().level, 2);
        assert_eq!(store.snapshot().xp, 900);

        // The parked excess levels on the next award
        let result = store.add_xp(0);
        assert_eq!(result.new_level, Some(3));
        assert_eq!(store.snapshot().xp, 750);
    }

    #[test]
    fn test_add_points_feeds_bucket_and_total() {
        let (mut store, _dir) = test_store();
        store.add_points(40, PointsCategory::Activities);
        store.add_points(25, PointsCategory::Social);

        let state = store.snapshot();
        assert_eq!(state.total_points, 65);
        assert_eq!(state.points_breakdown.activities, 40);
        assert_eq!(state.points_breakdown.social, 25);
        assert_eq!(state.points_breakdown.challenges, 0);
    }

    #[test]
    fn test_complete_activity_base_rewards() {
        let (mut store, _dir) = test_store();
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let summary = store.complete_activity_on(&run(2.0, 600), day);
        assert_eq!(summary.points, 20);
        assert_eq!(summary.xp, 40);
        assert_eq!(summary.streak, 1);
        assert!(!summary.milestone);

        let state = store.snapshot();
        assert_eq!(state.points_breakdown.activities, 20);
        assert_eq!(state.weekly_goal.activities, 1);
        assert_eq!(state.total_activities, 1);
        assert_eq!(state.last_activity_date, Some(day));
    }

    #[test]
    fn test_duration_bonus_only_past_one_hour() {
        let (mut store, _dir) = test_store();
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        // Exactly one hour: no bonus
        let summary = store.complete_activity_on(&run(2.0, 3600), day);
        assert_eq!(summary.points, 20);

        // two hours: floor(2.0*10)=20 points, floor(2.0*20)=40 xp extra
        let (mut store, _dir) = test_store();
        let summary = store.complete_activity_on(&run(2.0, 7200), day);
        assert_eq!(summary.points, 40);
        assert_eq!(summary.xp, 80);
    }

    #[test]
    fn test_running_distance_unlocks_achievement() {
        let (mut store, _dir) = test_store();
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let summary = store.complete_activity_on(&run(6.0, 1800), day);
        assert!(summary.unlocked.iter().any(|u| u.id == "first_5k"));

        let state = store.snapshot();
        let badge = state.achievements.iter().find(|a| a.id == "first_5k").unwrap();
        assert!(badge.unlocked);
        assert!(badge.unlocked_at.is_some());
    }

    #[test]
    fn test_cycling_distance_does_not_count() {
        let (mut store, _dir) = test_store();
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let input = ActivityInput {
            activity_type: "cycling".to_string(),
            distance_km: 25.0,
            duration_secs: 3000,
        };

        let summary = store.complete_activity_on(&input, day);
        assert!(summary.unlocked.iter().all(|u| u.id != "first_5k"));
    }

    #[test]
    fn test_challenge_assignment_is_date_anchored() {
        let (mut store, _dir) = test_store();
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        store.refresh_daily_challenges_on(day);
        let first: Vec<_> = store.snapshot().daily_challenges.clone();
        assert_eq!(first.len(), challenges::DAILY_CHALLENGE_COUNT);

        // Same day again (e.g. app restart): set survives
        store.refresh_daily_challenges_on(day);
        assert_eq!(store.snapshot().daily_challenges, first);

        // Next day: a fresh assignment replaces it
        let next = day.succ_opt().unwrap();
        store.refresh_daily_challenges_on(next);
        assert_eq!(store.snapshot().challenges_assigned_on, Some(next));
        assert!(store.snapshot().daily_challenges.iter().all(|c| !c.completed));
    }

    #[test]
    fn test_complete_daily_challenge_is_terminal() {
        let (mut store, _dir) = test_store();
        let id = store.snapshot().daily_challenges[0].id.clone();
        let points = store.snapshot().daily_challenges[0].points;

        assert!(store.complete_daily_challenge(&id));
        assert_eq!(store.snapshot().points_breakdown.challenges, points);

        // Completing again is a no-op with no double award
        assert!(!store.complete_daily_challenge(&id));
        assert_eq!(store.snapshot().points_breakdown.challenges, points);
    }

    #[test]
    fn test_completed_challenge_survives_same_day_refresh() {
        let (mut store, _dir) = test_store();
        let day = store.snapshot().challenges_assigned_on.unwrap();
        let id = store.snapshot().daily_challenges[0].id.clone();
        store.complete_daily_challenge(&id);

        store.refresh_daily_challenges_on(day);
        let challenge = store
            .snapshot()
            .daily_challenges
            .iter()
            .find(|c| c.id == id)
            .unwrap();
        assert!(challenge.completed);
    }

    #[test]
    fn test_unknown_challenge_id_is_rejected() {
        let (mut store, _dir) = test_store();
        assert!(!store.complete_daily_challenge("dc_not_a_thing"));
        assert_eq!(store.snapshot().total_points, 0);
    }

    #[test]
    fn test_purchase_deducts_exactly_once() {
        let (mut store, _dir) = test_store();
        store.add_points(500, PointsCategory::Activities);

        let purchase = store.purchase_reward("theme_midnight").unwrap();
        assert_eq!(purchase.cost, 150);
        assert_eq!(purchase.remaining_points, 350);
        assert!(store.snapshot().purchased_rewards.contains("theme_midnight"));

        // Repurchase is rejected without side effects
        let err = store.purchase_reward("theme_midnight").unwrap_err();
        assert_eq!(err, PurchaseError::AlreadyOwned("theme_midnight".to_string()));
        assert_eq!(store.snapshot().total_points, 350);
        assert_eq!(store.snapshot().purchased_rewards.len(), 1);
    }

    #[test]
    fn test_failed_purchase_changes_nothing() {
        let (mut store, _dir) = test_store();
        store.add_points(100, PointsCategory::Activities);

        let err = store.purchase_reward("route_heatmap").unwrap_err();
        assert_eq!(
            err,
            PurchaseError::InsufficientPoints {
                needed: 500,
                available: 100
            }
        );
        assert_eq!(store.snapshot().total_points, 100);
        assert!(store.snapshot().purchased_rewards.is_empty());
    }

    #[test]
    fn test_social_share_feeds_social_bucket() {
        let (mut store, _dir) = test_store();
        let unlocked = store.record_social_share();
        assert!(unlocked.iter().any(|u| u.id == "first_share"));

        let state = store.snapshot();
        assert_eq!(state.total_shares, 1);
        assert_eq!(state.points_breakdown.social, SHARE_POINTS);
    }

    #[test]
    fn test_advance_achievement_drives_special() {
        let (mut store, _dir) = test_store();
        let unlock = store.advance_achievement("globetrotter", 1.0).unwrap();
        assert_eq!(unlock.points, 500);
        assert_eq!(store.snapshot().points_breakdown.achievements, 500);

        // Terminal: a second push awards nothing
        assert!(store.advance_achievement("globetrotter", 5.0).is_none());
        assert_eq!(store.snapshot().points_breakdown.achievements, 500);
    }

    #[test]
    fn test_weekly_goal_resets_on_week_change() {
        let (mut store, _dir) = test_store();
        // 2025-03-10 is a Monday
        let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        store.complete_activity_on(&run(3.0, 900), monday);
        store.complete_activity_on(&run(4.0, 900), monday.succ_opt().unwrap());
        assert_eq!(store.snapshot().weekly_goal.activities, 2);

        let next_monday = monday + chrono::Duration::days(7);
        store.complete_activity_on(&run(2.0, 600), next_monday);
        let goal = &store.snapshot().weekly_goal;
        assert_eq!(goal.activities, 1);
        assert!((goal.distance_km - 2.0).abs() < f64::EPSILON);
    }
}
