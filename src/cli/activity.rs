//! Activity and share command implementations

use trailpoints::{ActivityInput, ProgressionStore};

/// Record a completed activity and print what it earned.
pub fn activity_command(
    store: &mut ProgressionStore,
    activity_type: &str,
    distance_km: f64,
    duration_secs: u64,
) {
    let summary = store.complete_activity(&ActivityInput {
        activity_type: activity_type.to_string(),
        distance_km,
        duration_secs,
    });

    println!(
        "{} recorded: {:.1} km in {} min",
        activity_type,
        distance_km,
        duration_secs / 60
    );
    println!("  +{} points, +{} XP", summary.points, summary.xp);
    println!("  Streak: {} day(s)", summary.streak);

    if summary.milestone {
        println!("  Streak milestone! +50 points, +100 XP");
    }
    for unlock in &summary.unlocked {
        println!(
            "  Achievement unlocked: {} (+{} points, +{} XP)",
            unlock.name, unlock.points, unlock.xp
        );
    }
    if let Some(level) = summary.new_level {
        println!("  Level up! You are now level {}", level);
    }
}

/// Share the latest activity.
pub fn share_command(store: &mut ProgressionStore) {
    let unlocked = store.record_social_share();
    println!("Shared with your crew. +10 points, +15 XP");
    for unlock in &unlocked {
        println!(
            "  Achievement unlocked: {} (+{} points, +{} XP)",
            unlock.name, unlock.points, unlock.xp
        );
    }
}
