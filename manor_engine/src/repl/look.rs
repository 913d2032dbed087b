//! `repl::look` module
//!
//! Contains repl loop handlers for inspecting the surroundings.

use anyhow::Result;
use log::info;

use crate::entity::Entity;
use crate::location::Side;
use crate::world::{EntityRef, IntegrityError};
use crate::{View, ViewItem, World};

/// Describe the player's current location and the items lying in it.
///
/// # Errors
/// - if the player's location cannot be found
pub fn look_around_handler(world: &World, view: &mut View) -> Result<()> {
    let location = world.player_location()?;
    view.push(ViewItem::LocationDescription {
        name: location.name().to_string(),
        description: location.describe(),
    });
    info!("player looked around '{}'", location.internal_key());
    Ok(())
}

/// Describe the barrier on one side of the player's location.
///
/// # Errors
/// - if the player's location or the barrier cannot be found
pub fn look_direction_handler(world: &World, view: &mut View, side: Side) -> Result<()> {
    let location = world.player_location()?;
    let wall_id = location.wall(side);
    let barrier = world.barrier(wall_id).ok_or(IntegrityError::UnknownBarrier(wall_id))?;
    view.push(ViewItem::BarrierDescription {
        name: barrier.name().to_string(),
        description: barrier.description().to_string(),
    });
    info!("player looked {side} at '{}'", barrier.internal_key());
    Ok(())
}

/// Describe a named object the player can see.
///
/// Visible are co-located components, the location's own barriers, items lying
/// around and items in the player's inventory.
///
/// # Errors
/// - if the player's location cannot be found
pub fn look_at_handler(world: &World, view: &mut View, thing: &str) -> Result<()> {
    let location = world.player_location()?;
    let player = world.player()?;
    let Some(entity) = world.find_by_name(thing, None) else {
        view.push(ViewItem::ActionFailure("No such thing here.".to_string()));
        return Ok(());
    };
    let visible = world.is_at(entity, location)
        || matches!(entity, EntityRef::Item(item)
            if location.inventory.contains(item.id()) || player.inventory().contains(item.id()));
    if visible {
        view.push(ViewItem::EntityDescription {
            name: entity.name().to_string(),
            description: entity.description().to_string(),
        });
        info!("player looked at {} '{}'", entity.kind(), entity.name());
    } else {
        view.push(ViewItem::ActionFailure(format!("There is no {} here.", entity.name())));
    }
    Ok(())
}
