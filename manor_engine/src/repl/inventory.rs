//! `repl::inventory` module
//!
//! Contains repl loop handlers for showing and picking up items.

use anyhow::Result;
use log::{info, warn};

use crate::component::Kind;
use crate::entity::Entity;
use crate::{View, ViewItem, World};

/// Show the player's money and inventory.
///
/// # Errors
/// - if no player is registered
pub fn inv_handler(world: &World, view: &mut View) -> Result<()> {
    let player = world.player()?;
    view.push(ViewItem::Inventory {
        money: format!("Current money: {} {}s", player.money, world.currency),
        listing: player.inventory().render(player.name(), None),
    });
    Ok(())
}

/// Pick up one unit of an item lying in the player's location.
///
/// # Errors
/// - if the player's location cannot be found
pub fn take_handler(world: &mut World, view: &mut View, thing: &str) -> Result<()> {
    let (player, location) = world.player_and_location_mut()?;
    let Some(item) = location.inventory.find_by_name(thing).cloned() else {
        view.push(ViewItem::ActionFailure(format!(
            "Nothing with that name can be taken from the {}.",
            location.name()
        )));
        return Ok(());
    };
    match player.take_from(&mut location.inventory, &item, 1) {
        Ok(()) => {
            view.push(ViewItem::ActionSuccess(format!("{} added to inventory.", item.name())));
            info!("player took '{}' from '{}'", item.internal_key(), location.internal_key());
        },
        Err(err) => {
            warn!("take '{}' rejected: {err}", item.internal_key());
            view.push(ViewItem::ActionFailure(err.to_string()));
        },
    }
    Ok(())
}

/// Take one unit of an item out of a co-located, unlocked container.
///
/// # Errors
/// - if the player's location cannot be found
pub fn take_from_handler(world: &mut World, view: &mut View, thing: &str, container_name: &str) -> Result<()> {
    let container_id = {
        let location = world.player_location()?;
        let Some(container) = world
            .find_by_name(container_name, Some(Kind::Container))
            .and_then(|entity| entity.container())
        else {
            view.push(ViewItem::ActionFailure("This container does not exist.".to_string()));
            return Ok(());
        };
        if container.location != Some(location.id()) {
            view.push(ViewItem::ActionFailure(format!(
                "You need to be in the same location as the {} to take from it!",
                container.name()
            )));
            return Ok(());
        }
        if !container.lock.is_unlocked() {
            view.push(ViewItem::ActionFailure(format!("The {} is locked!", container.name())));
            return Ok(());
        }
        container.id()
    };

    let (player, container) = world.player_and_container_mut(container_id)?;
    let Some(item) = container.inventory.find_by_name(thing).cloned() else {
        view.push(ViewItem::ActionFailure(format!(
            "Nothing with that name can be taken from the {}.",
            container.name()
        )));
        return Ok(());
    };
    match player.take_from(&mut container.inventory, &item, 1) {
        Ok(()) => {
            view.push(ViewItem::ActionSuccess(format!("{} added to inventory.", item.name())));
            info!("player took '{}' from container '{}'", item.internal_key(), container.internal_key());
        },
        Err(err) => {
            warn!("take '{}' rejected: {err}", item.internal_key());
            view.push(ViewItem::ActionFailure(err.to_string()));
        },
    }
    Ok(())
}
