//! Leaderboard command implementation

use trailpoints::leaderboard;

/// Print the standings.
pub fn leaderboard_command() {
    println!("Leaderboard:\n");
    for entry in leaderboard::standings() {
        println!(
            "  #{} {} - {} points (level {})",
            entry.rank, entry.name, entry.points, entry.level
        );
    }
}
