//! Achievements command implementation

use trailpoints::ProgressionStore;

/// List every achievement with progress and unlock state.
pub fn achievements_command(store: &ProgressionStore) {
    let state = store.snapshot();
    println!("Achievements:\n");

    for achievement in &state.achievements {
        let Some(def) = achievement.definition() else {
            continue;
        };
        if achievement.unlocked {
            let when = achievement
                .unlocked_at
                .map(|t| t.format(" on %Y-%m-%d").to_string())
                .unwrap_or_default();
            println!("  [x] {} ({}){}", def.name, def.rarity.label(), when);
        } else {
            println!(
                "  [ ] {} ({}) - {}/{}",
                def.name,
                def.rarity.label(),
                achievement.progress,
                def.requirement
            );
        }
        println!("      {}", def.description);
    }
}
