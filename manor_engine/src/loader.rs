//! Loader utilities for building a [`World`] from a scenario file.
//!
//! Loading runs in three steps: the JSON scenario is read and validated as a whole,
//! the world is built kind by kind, and a final pass places characters, the player
//! and containers into their locations.

pub mod placement;
pub mod scenario;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{info, warn};
use manor_data::{ScenarioDef, validate_scenario};

use crate::World;
use crate::component::Kind;
use crate::config::GameConfig;
use crate::entity::Entity;
use crate::loader::placement::place_components;
use crate::loader::scenario::build_world_from_def;

/// Load the world named by the config.
///
/// `player_name` overrides the scenario's player name when it is not blank.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, validation, or missing references.
pub fn load_world(config: &GameConfig, player_name: Option<&str>) -> Result<World> {
    let path = config.scenario_path();
    let scenario = load_scenario(&path).context("while loading scenario from file")?;
    build_world(&scenario, config, player_name)
}

/// Read a scenario document from JSON.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_scenario(path: &Path) -> Result<ScenarioDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading scenario from '{}'", path.display()))?;
    let scenario: ScenarioDef =
        serde_json::from_str(&text).with_context(|| format!("parsing scenario from '{}'", path.display()))?;
    info!("scenario loaded from '{}'", path.display());
    Ok(scenario)
}

/// Validate, build and place a scenario that is already in memory.
///
/// # Errors
/// Returns an aggregated validation error or any error from building the world.
pub fn build_world(scenario: &ScenarioDef, config: &GameConfig, player_name: Option<&str>) -> Result<World> {
    validate_scenario_def(scenario)?;
    let mut world =
        build_world_from_def(scenario, config, player_name).context("while building world from scenario")?;
    place_components(&mut world, scenario).context("while placing components")?;

    for kind in Kind::COMPONENTS {
        info!("{} {kind} entries added to World", world.components_of_kind(kind).len());
    }
    info!("{} locations added to World", world.all_locations().len());
    info!("{} barriers added to World", world.all_barriers().len());
    for problem in world.unpaired_doors() {
        warn!("{problem}");
    }
    let start = world.player_location().context("player has no starting location")?;
    info!("player \"{}\" starts in '{}'", world.player()?.name(), start.internal_key());
    Ok(world)
}

/// Validate the scenario and return a single aggregated error.
fn validate_scenario_def(scenario: &ScenarioDef) -> Result<()> {
    let errors = validate_scenario(scenario);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("scenario validation failed:\n{details}");
}
