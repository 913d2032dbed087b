//! `repl::item` module
//!
//! Contains repl loop handlers for opening and unlocking doors and containers.

use anyhow::{Result, anyhow};
use log::info;

use crate::barrier::UnlockOutcome;
use crate::entity::Entity;
use crate::helpers::capitalize;
use crate::location::Location;
use crate::world::{LockTarget, Openable};
use crate::{View, ViewItem, World};

/// Open a door or look into a container.
///
/// # Errors
/// - if the player's location cannot be found
pub fn open_handler(world: &World, view: &mut View, thing: &str) -> Result<()> {
    let location = world.player_location()?;
    let Some(target) = world.find_openable(thing) else {
        let message = if world.find_by_name(thing, None).is_some() {
            format!("You can't open the {thing}.")
        } else {
            "No such thing exists to be opened!".to_string()
        };
        view.push(ViewItem::ActionFailure(message));
        return Ok(());
    };
    if !is_reachable(target, location) {
        view.push(ViewItem::ActionFailure(
            "You need to be in the same location as the object you want to open.".to_string(),
        ));
        return Ok(());
    }

    match target {
        Openable::Container(container) => {
            if container.lock.is_unlocked() {
                view.push(ViewItem::ContainerContents(container.inventory.render(container.name(), None)));
                info!("player opened container '{}'", container.internal_key());
            } else {
                view.push(ViewItem::ActionFailure(
                    "You need to unlock this before you can open it!".to_string(),
                ));
            }
        },
        Openable::Door(door) => {
            if door.is_unlocked() {
                view.push(ViewItem::ActionSuccess(format!(
                    "You open the {}. You can go through now.",
                    door.name()
                )));
            } else {
                view.push(ViewItem::ActionFailure(format!(
                    "You need to unlock the {} first!",
                    door.name()
                )));
            }
        },
    }
    Ok(())
}

/// Unlock a door or container with a key from the player's inventory.
///
/// # Errors
/// - if the player's location cannot be found
pub fn unlock_handler(world: &mut World, view: &mut View, thing: &str) -> Result<()> {
    let (target, name, required_key) = {
        let location = world.player_location()?;
        let Some(openable) = world.find_openable(thing) else {
            view.push(ViewItem::ActionFailure(format!(
                "\"{}\" is not something that can be unlocked!",
                capitalize(thing)
            )));
            return Ok(());
        };
        if !is_reachable(openable, location) {
            view.push(ViewItem::ActionFailure(
                "You need to be in the same location to unlock this!".to_string(),
            ));
            return Ok(());
        }
        if openable.is_unlocked() {
            view.push(ViewItem::ActionSuccess(
                UnlockOutcome::AlreadyUnlocked.report(openable.name(), ""),
            ));
            return Ok(());
        }
        let required_key = openable.lock().and_then(|lock| lock.required_key());
        (openable.target(), openable.name().to_string(), required_key)
    };

    let key = required_key.and_then(|key_id| world.player().ok()?.inventory().get(key_id).cloned());
    let Some(key) = key else {
        view.push(ViewItem::ActionFailure(
            "You are missing the correct key to unlock this!".to_string(),
        ));
        return Ok(());
    };

    let outcome = match target {
        LockTarget::Door(id) => world.barrier_mut(id).and_then(|door| door.unlock(&key)),
        LockTarget::Container(id) => world.container_mut(id).map(|container| container.unlock(&key)),
    }
    .ok_or_else(|| anyhow!("'{name}' vanished while being unlocked"))?;

    let report = outcome.report(&name, key.name());
    if outcome.is_wrong_key() {
        view.push(ViewItem::ActionFailure(report));
    } else {
        view.push(ViewItem::ActionSuccess(report));
    }
    Ok(())
}

/// Containers must stand in the location; doors must be one of its walls.
fn is_reachable(target: Openable<'_>, location: &Location) -> bool {
    match target {
        Openable::Door(door) => location.has_wall(door.id()),
        Openable::Container(container) => container.location == Some(location.id()),
    }
}
