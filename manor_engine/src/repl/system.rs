//! `repl::system` module
//!
//! Contains repl loop handlers for quitting and for input that is not a command.

use anyhow::Result;
use log::info;

use crate::entity::Entity;
use crate::repl::ReplControl;
use crate::{View, ViewItem, World};

/// Quit the game.
///
/// # Errors
/// - if no player is registered
pub fn quit_handler(world: &World, view: &mut View) -> Result<ReplControl> {
    let player = world.player()?;
    info!("{} quit with {} {}s", player.name(), player.money, world.currency);
    info!("ending inventory:");
    for entry in player.inventory().entries() {
        info!("- {}x {} ({})", entry.amount, entry.item.name(), entry.item.id());
    }
    view.push(ViewItem::EngineMessage("Game stopped by Player.".to_string()));
    Ok(ReplControl::Quit)
}

/// Report input with fewer than two words.
pub fn malformed_handler(view: &mut View) {
    view.push(ViewItem::ActionFailure("Commands need to have at least 2 words!".to_string()));
}

/// Report input that matches no command.
pub fn unknown_handler(view: &mut View) {
    view.push(ViewItem::ActionFailure("I don't understand what you mean.".to_string()));
}
