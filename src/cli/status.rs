//! Status command implementation

use trailpoints::ProgressionStore;

/// Show level, XP, points, and streak at a glance.
pub fn status_command(store: &ProgressionStore) {
    let state = store.snapshot();
    let progress = store.level_progress();

    println!(
        "Level {} - {} ({}%)",
        state.level, progress.title, progress.percent
    );
    println!("  XP:     {} / {}", progress.current_xp, progress.required_xp);
    println!("  Points: {}", state.total_points);
    println!(
        "    activities {}, challenges {}, social {}, achievements {}",
        state.points_breakdown.activities,
        state.points_breakdown.challenges,
        state.points_breakdown.social,
        state.points_breakdown.achievements
    );
    println!(
        "  Streak: {} day(s), longest {}",
        state.current_streak, state.longest_streak
    );

    let goal = &state.weekly_goal;
    println!(
        "  This week: {} activities, {:.1} km",
        goal.activities, goal.distance_km
    );

    let unlocked = state.achievements.iter().filter(|a| a.unlocked).count();
    println!(
        "  Achievements: {}/{} unlocked",
        unlocked,
        state.achievements.len()
    );
}
