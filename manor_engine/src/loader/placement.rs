//! Final loading pass: put characters, the player and containers where they belong.

use anyhow::{Context, Result};
use log::debug;
use manor_data::{Id, ScenarioDef, placement};

use crate::World;
use crate::component::Kind;
use crate::entity::Entity;

/// Resolve every component `location` field to a registered location.
///
/// # Errors
/// Returns an error if a location key is unknown.
pub fn place_components(world: &mut World, def: &ScenarioDef) -> Result<()> {
    let placements = def
        .characters
        .iter()
        .map(|(key, c)| (Kind::Character, key, c.location.as_ref()))
        .chain(def.players.iter().map(|(key, p)| (Kind::Player, key, p.location.as_ref())))
        .chain(def.containers.iter().map(|(key, c)| (Kind::Container, key, c.location.as_ref())));

    for (kind, key, raw) in placements {
        place_one(world, kind, key, raw)?;
    }
    Ok(())
}

fn place_one(world: &mut World, kind: Kind, key: &str, raw: Option<&Id>) -> Result<()> {
    let location = match placement(raw) {
        Some(location_key) => Some(
            world
                .location_by_key(location_key)
                .map(Entity::id)
                .with_context(|| format!("{kind} '{key}' is placed in unknown location '{location_key}'"))?,
        ),
        None => None,
    };
    world.place(kind, key, location)?;
    debug!("{kind} '{key}' placed at {:?}", placement(raw));
    Ok(())
}
