//! Rewards shop
//!
//! A static catalog of point-redeemable unlocks and the purchase validator.
//! Purchases are one-way: an owned reward can never be bought again and
//! there are no refunds. The validator is stateless; the store applies the
//! deduction and ownership insert.

use std::collections::BTreeSet;

use thiserror::Error;

/// What a reward unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardCategory {
    /// Cosmetic profile customizations.
    Customization,
    /// App feature unlocks.
    Feature,
    /// Temporary progression boosts.
    Boost,
}

impl RewardCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Customization => "Customization",
            Self::Feature => "Feature",
            Self::Boost => "Boost",
        }
    }
}

/// Reward catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardItem {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: u64,
    pub category: RewardCategory,
}

/// The static reward catalog.
pub static REWARD_CATALOG: &[RewardItem] = &[
    RewardItem {
        id: "avatar_frame_gold",
        name: "Gold Avatar Frame",
        cost: 200,
        category: RewardCategory::Customization,
    },
    RewardItem {
        id: "theme_midnight",
        name: "Midnight Theme",
        cost: 150,
        category: RewardCategory::Customization,
    },
    RewardItem {
        id: "badge_flair",
        name: "Badge Flair Pack",
        cost: 100,
        category: RewardCategory::Customization,
    },
    RewardItem {
        id: "route_heatmap",
        name: "Route Heatmap",
        cost: 500,
        category: RewardCategory::Feature,
    },
    RewardItem {
        id: "advanced_stats",
        name: "Advanced Stats",
        cost: 400,
        category: RewardCategory::Feature,
    },
    RewardItem {
        id: "custom_goals",
        name: "Custom Goals",
        cost: 300,
        category: RewardCategory::Feature,
    },
    RewardItem {
        id: "xp_weekend",
        name: "Double XP Weekend",
        cost: 250,
        category: RewardCategory::Boost,
    },
    RewardItem {
        id: "streak_shield",
        name: "Streak Shield",
        cost: 350,
        category: RewardCategory::Boost,
    },
];

impl RewardItem {
    /// Get catalog entry by ID
    pub fn get(id: &str) -> Option<&'static RewardItem> {
        REWARD_CATALOG.iter().find(|r| r.id == id)
    }
}

/// Why a purchase was refused. All variants are user-facing and recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("no reward with id `{0}` exists")]
    NotFound(String),
    #[error("not enough points: need {needed}, have {available}")]
    InsufficientPoints { needed: u64, available: u64 },
    #[error("reward `{0}` is already owned")]
    AlreadyOwned(String),
}

/// Validate a purchase against the catalog, the spendable balance, and the
/// owned set. Returns the catalog entry to apply; mutates nothing.
pub fn validate(
    id: &str,
    total_points: u64,
    owned: &BTreeSet<String>,
) -> Result<&'static RewardItem, PurchaseError> {
    let item = RewardItem::get(id).ok_or_else(|| PurchaseError::NotFound(id.to_string()))?;
    if owned.contains(id) {
        return Err(PurchaseError::AlreadyOwned(id.to_string()));
    }
    if total_points < item.cost {
        return Err(PurchaseError::InsufficientPoints {
            needed: item.cost,
            available: total_points,
        });
    }
    Ok(item)
}
