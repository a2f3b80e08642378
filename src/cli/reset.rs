//! Reset command implementation

use std::io::{self, Write};

use anyhow::Result;

use trailpoints::ProgressionStore;

/// Wipe all progression after confirmation.
pub fn reset_command(store: &mut ProgressionStore, force: bool) -> Result<()> {
    if !force {
        print!("This wipes all progression. Type `yes` to continue: ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if answer.trim() != "yes" {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.reset();
    println!("Progression reset to defaults.");
    Ok(())
}
