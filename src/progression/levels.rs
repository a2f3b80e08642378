//! XP and Level system
//!
//! Defines the level curve, titles, and XP calculations. The curve is
//! exponential: each level requires 1.5x the XP of the previous one,
//! starting at 100 XP for level 1. The full table is computed once and
//! cached; queries never re-derive it.

use once_cell::sync::Lazy;

/// Highest reachable level.
pub const MAX_LEVEL: u32 = 100;

/// Level definition
#[derive(Debug, Clone)]
pub struct LevelDefinition {
    pub level: u32,
    /// XP that must be accumulated at this level to reach the next one.
    pub xp_required: u64,
    pub title: &'static str,
}

/// All level definitions for 1..=MAX_LEVEL, sorted by level.
static LEVELS: Lazy<Vec<LevelDefinition>> = Lazy::new(|| {
    (1..=MAX_LEVEL)
        .map(|level| LevelDefinition {
            level,
            xp_required: curve(level),
            title: title_for_level(level),
        })
        .collect()
});

/// `floor(100 * 1.5^(level-1))`
///
/// Saturates near the top of the table where the raw value no longer fits
/// in a u64; nobody grinds that far on foot.
fn curve(level: u32) -> u64 {
    (100.0 * 1.5f64.powi(level as i32 - 1)).floor() as u64
}

/// XP needed to clear the given level. Levels outside 1..=MAX_LEVEL are
/// clamped to the nearest table entry.
pub fn xp_required(level: u32) -> u64 {
    definition(level).xp_required
}

/// Title for a level, by fixed threshold bands.
pub fn title_for_level(level: u32) -> &'static str {
    match level {
        90.. => "Legend",
        75..=89 => "Grandmaster",
        60..=74 => "Master",
        45..=59 => "Expert",
        30..=44 => "Trailblazer",
        20..=29 => "Adventurer",
        10..=19 => "Explorer",
        _ => "Beginner",
    }
}

/// Look up the cached definition for a level (clamped to the table bounds).
pub fn definition(level: u32) -> &'static LevelDefinition {
    let idx = level.clamp(1, MAX_LEVEL) as usize - 1;
    &LEVELS[idx]
}

/// Progress within the current level, as shown by the profile surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelProgress {
    /// Percent of the current level cleared (0-100).
    pub percent: u32,
    pub current_xp: u64,
    pub required_xp: u64,
    pub title: &'static str,
}

impl LevelProgress {
    pub fn new(level: u32, xp: u64) -> Self {
        let def = definition(level);
        let percent = if def.xp_required == 0 {
            100
        } else {
            ((xp.saturating_mul(100)) / def.xp_required).min(100) as u32
        };
        Self {
            percent,
            current_xp: xp,
            required_xp: def.xp_required,
            title: def.title,
        }
    }
}
