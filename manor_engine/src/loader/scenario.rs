//! Builds registry contents from a [`ScenarioDef`].

use anyhow::{Context, Result};
use log::info;
use manor_data::{LocationDef, ScenarioDef, StockToken};
use uuid::Uuid;

use crate::barrier::Barrier;
use crate::component::{Character, Component, Container, Item, ItemKind, Kind, MONEY_KEY, Player};
use crate::config::GameConfig;
use crate::entity::Entity;
use crate::ledger::Ledger;
use crate::location::{Location, Walls};
use crate::World;

/// Internal key of the barrier used for sides a location leaves unspecified.
pub const DEFAULT_WALL_KEY: &str = "solid_wall";

/// Register every definition in the scenario, in dependency order.
///
/// Locations are left where the scenario puts them only after [`super::placement::place_components`].
///
/// # Errors
/// Returns an error on duplicate keys or unresolved references.
pub fn build_world_from_def(def: &ScenarioDef, config: &GameConfig, player_name: Option<&str>) -> Result<World> {
    let mut world = World::new(&config.currency, config.price_column);

    for (key, item) in &def.items {
        // the money item always carries the configured currency name
        let name = if key == MONEY_KEY { config.currency.as_str() } else { item.name.as_str() };
        let item = Item::new(ItemKind::Plain, Some(name), Some(key.as_str()), &item.description, item.price);
        world.register(Component::Item(item))?;
    }
    for (key, item) in &def.keys {
        let item = Item::new(ItemKind::Key, Some(item.name.as_str()), Some(key.as_str()), &item.description, item.price);
        world.register(Component::Item(item))?;
    }
    for (key, door) in &def.doors {
        let required = required_key(&world, door.key.as_deref())
            .with_context(|| format!("resolving key of door '{key}'"))?;
        world.register_barrier(Barrier::door(&door.name, Some(key.as_str()), &door.description, required))?;
    }
    for (key, barrier) in &def.barriers {
        world.register_barrier(Barrier::wall(barrier.name.as_deref(), Some(key.as_str()), &barrier.description))?;
    }
    for (key, location_def) in &def.locations {
        let location = build_location(&mut world, key, location_def)?;
        world.register_location(location)?;
    }
    for (key, character_def) in &def.characters {
        let mut character = Character::new(
            Some(character_def.name.as_str()),
            Some(key.as_str()),
            &character_def.description,
            &character_def.text,
        );
        fill_ledger(&world, &mut character.inventory, &character_def.inventory)
            .with_context(|| format!("stocking character '{key}'"))?;
        world.register(Component::Character(character))?;
    }
    for (key, player_def) in &def.players {
        let name = player_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .or(player_def.name.as_deref().filter(|name| !name.trim().is_empty()))
            .unwrap_or(&config.default_player_name);
        let mut player = Player::new(Some(name), Some(key.as_str()), &player_def.description, player_def.money);
        for token in &player_def.inventory {
            let (item, amount) = resolve_token(&world, token).with_context(|| format!("stocking player '{key}'"))?;
            player.receive(&item, amount)?;
        }
        world.register(Component::Player(player))?;
    }
    for (key, container_def) in &def.containers {
        let required = required_key(&world, container_def.key.as_deref())
            .with_context(|| format!("resolving key of container '{key}'"))?;
        let mut container = Container::new(Some(container_def.name.as_str()), Some(key.as_str()), &container_def.description, required);
        fill_ledger(&world, &mut container.inventory, &container_def.inventory)
            .with_context(|| format!("stocking container '{key}'"))?;
        world.register(Component::Container(container))?;
    }
    info!("world built from scenario");
    Ok(world)
}

fn build_location(world: &mut World, key: &str, def: &LocationDef) -> Result<Location> {
    let walls = Walls {
        north: wall_id(world, def.north_wall.as_deref())?,
        south: wall_id(world, def.south_wall.as_deref())?,
        west: wall_id(world, def.west_wall.as_deref())?,
        east: wall_id(world, def.east_wall.as_deref())?,
    };
    let mut location = Location::new(&def.name, Some(key), &def.description, &def.inv_description, walls);
    fill_ledger(world, &mut location.inventory, &def.inventory).with_context(|| format!("stocking location '{key}'"))?;
    Ok(location)
}

/// Id of a referenced barrier, or of the shared default wall when the side is left open.
fn wall_id(world: &mut World, reference: Option<&str>) -> Result<Uuid> {
    match reference {
        Some(key) => world
            .barrier_by_key(key)
            .map(Entity::id)
            .with_context(|| format!("no door or barrier '{key}'")),
        None => default_wall(world),
    }
}

fn default_wall(world: &mut World) -> Result<Uuid> {
    if let Some(wall) = world.barrier_by_key(DEFAULT_WALL_KEY) {
        return Ok(wall.id());
    }
    let wall = Barrier::wall(
        Some("Solid Wall"),
        Some(DEFAULT_WALL_KEY),
        "A solid wall. There is no way through here.",
    );
    Ok(world.register_barrier(wall)?)
}

fn required_key(world: &World, key: Option<&str>) -> Result<Option<Uuid>> {
    key.map(|key| {
        world
            .item_by_key(Kind::Key, key)
            .map(Entity::id)
            .with_context(|| format!("no key '{key}'"))
    })
    .transpose()
}

/// Parse a stock token and find its item (items first, then keys).
fn resolve_token(world: &World, token: &str) -> Result<(Item, u32)> {
    let StockToken { item, amount } = token.parse::<StockToken>()?;
    let found = world
        .item_by_key(Kind::Item, &item)
        .or_else(|| world.item_by_key(Kind::Key, &item))
        .with_context(|| format!("no item or key '{item}'"))?;
    Ok((found.clone(), amount))
}

fn fill_ledger(world: &World, ledger: &mut Ledger, tokens: &[String]) -> Result<()> {
    for token in tokens {
        let (item, amount) = resolve_token(world, token)?;
        ledger.add(&item, amount)?;
    }
    Ok(())
}
