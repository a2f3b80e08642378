//! Shop command implementation

use trailpoints::progression::shop::REWARD_CATALOG;
use trailpoints::ProgressionStore;

/// Browse the catalog, or buy a reward by id.
pub fn shop_command(store: &mut ProgressionStore, buy: Option<String>) {
    if let Some(id) = buy {
        match store.purchase_reward(&id) {
            Ok(purchase) => {
                println!(
                    "Purchased `{}` for {} points ({} remaining).",
                    purchase.id, purchase.cost, purchase.remaining_points
                );
            }
            Err(e) => {
                eprintln!("Purchase failed: {}", e);
            }
        }
        return;
    }

    let state = store.snapshot();
    println!("Rewards shop ({} points available):\n", state.total_points);
    for item in REWARD_CATALOG {
        let marker = if state.purchased_rewards.contains(item.id) {
            "owned"
        } else {
            "     "
        };
        println!(
            "  [{}] {} - {} ({} points, {})",
            marker,
            item.id,
            item.name,
            item.cost,
            item.category.label()
        );
    }
}
