//! Challenges command implementation

use trailpoints::ProgressionStore;

/// Show today's challenges, or complete one by id.
pub fn challenges_command(store: &mut ProgressionStore, complete: Option<String>) {
    if let Some(id) = complete {
        if store.complete_daily_challenge(&id) {
            println!("Challenge `{}` completed!", id);
        } else {
            eprintln!("Challenge `{}` is unknown or already completed.", id);
        }
        return;
    }

    let state = store.snapshot();
    println!("Today's challenges:\n");
    for challenge in &state.daily_challenges {
        let marker = if challenge.completed { "x" } else { " " };
        println!(
            "  [{}] {} - {} (+{} points, +{} XP)",
            marker, challenge.id, challenge.title, challenge.points, challenge.xp
        );
    }
}
