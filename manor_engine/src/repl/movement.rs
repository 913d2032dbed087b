//! `repl::movement` module
//!
//! Contains the repl loop handler for moving between locations.

use anyhow::Result;
use log::{error, info, warn};

use crate::entity::Entity;
use crate::location::Side;
use crate::world::IntegrityError;
use crate::{View, ViewItem, World};

/// Move the player through the door on the given side, if it is unlocked.
///
/// # Errors
/// - if the player's location or its barrier cannot be found
pub fn go_handler(world: &mut World, view: &mut View, direction: &str) -> Result<()> {
    let Some(side) = Side::from_token(direction) else {
        warn!("unrecognized direction '{direction}'");
        view.push(ViewItem::ActionFailure(format!("'{direction}' is not a valid direction!")));
        return Ok(());
    };

    let (origin_id, door_name) = {
        let origin = world.player_location()?;
        let wall_id = origin.wall(side);
        let barrier = world.barrier(wall_id).ok_or(IntegrityError::UnknownBarrier(wall_id))?;
        if !barrier.is_door() {
            view.push(ViewItem::ActionFailure("You cannot go there!".to_string()));
            return Ok(());
        }
        if !barrier.is_unlocked() {
            view.push(ViewItem::ActionFailure(format!("'{}' is locked.", barrier.name())));
            info!("player tried locked door '{}'", barrier.internal_key());
            return Ok(());
        }
        (origin.id(), barrier.name().to_string())
    };

    let destination = match world.adjacent_through(origin_id, side) {
        Ok(Some(destination)) => destination.id(),
        Ok(None) => {
            view.push(ViewItem::ActionFailure("You cannot go there!".to_string()));
            return Ok(());
        },
        Err(err) => {
            error!("{err}");
            view.push(ViewItem::Error(format!("You can't go that way: {err}.")));
            return Ok(());
        },
    };

    world.move_player(destination)?;
    let location = world.player_location()?;
    view.push(ViewItem::TransitionMessage(format!("You go through the {door_name}.")));
    view.push(ViewItem::LocationDescription {
        name: location.name().to_string(),
        description: location.describe(),
    });
    info!("player moved {side} to '{}'", location.internal_key());
    Ok(())
}
