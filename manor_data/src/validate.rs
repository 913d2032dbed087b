use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Validation error for malformed or missing references in a `ScenarioDef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in a `ScenarioDef`.
///
/// ```
/// use manor_data::{LocationDef, PlayerDef, ScenarioDef, validate_scenario};
///
/// let mut scenario = ScenarioDef::default();
/// scenario.locations.insert(
///     "hall".into(),
///     LocationDef {
///         name: "Hall".into(),
///         description: "A draughty hall.".into(),
///         inv_description: "On the floor you see".into(),
///         north_wall: None,
///         south_wall: None,
///         west_wall: None,
///         east_wall: None,
///         inventory: Vec::new(),
///     },
/// );
/// scenario.players.insert(
///     "player".into(),
///     PlayerDef {
///         name: None,
///         description: "A visitor.".into(),
///         money: 3,
///         inventory: Vec::new(),
///         location: Some("hall".into()),
///     },
/// );
/// assert!(validate_scenario(&scenario).is_empty());
/// ```
pub fn validate_scenario(scenario: &ScenarioDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut stockable = HashSet::new();
    let mut keys = HashSet::new();
    let mut walls = HashSet::new();
    let mut locations = HashSet::new();

    // Items and keys are separate kinds but share every inventory list.
    track_ids("item", scenario.items.keys().map(String::as_str), &mut stockable, &mut errors);
    track_ids("key", scenario.keys.keys().map(String::as_str), &mut keys, &mut errors);
    stockable.extend(keys.iter().cloned());

    // Doors and barriers end up in the same barrier catalog.
    track_ids("door", scenario.doors.keys().map(String::as_str), &mut walls, &mut errors);
    track_ids("barrier", scenario.barriers.keys().map(String::as_str), &mut walls, &mut errors);
    track_ids(
        "location",
        scenario.locations.keys().map(String::as_str),
        &mut locations,
        &mut errors,
    );

    let ids = IdSets {
        stockable: &stockable,
        keys: &keys,
        walls: &walls,
        locations: &locations,
    };

    if scenario.players.len() != 1 {
        errors.push(ValidationError::InvalidValue {
            context: format!("expected exactly one player, found {}", scenario.players.len()),
        });
    }

    for (id, door) in &scenario.doors {
        if let Some(key) = &door.key {
            check_ref("key", key, ids.keys, format!("lock of door '{id}'"), &mut errors);
        }
    }

    for (id, container) in &scenario.containers {
        if let Some(key) = &container.key {
            check_ref("key", key, ids.keys, format!("lock of container '{id}'"), &mut errors);
        }
        validate_stock(&container.inventory, &ids, &format!("inventory of container '{id}'"), &mut errors);
        validate_placement(container.location.as_ref(), &ids, &format!("container '{id}'"), &mut errors);
    }

    for (id, location) in &scenario.locations {
        for (side, wall) in [
            ("north", &location.north_wall),
            ("south", &location.south_wall),
            ("west", &location.west_wall),
            ("east", &location.east_wall),
        ] {
            if let Some(wall) = wall {
                check_ref(
                    "door or barrier",
                    wall,
                    ids.walls,
                    format!("{side} wall of location '{id}'"),
                    &mut errors,
                );
            }
        }
        validate_stock(&location.inventory, &ids, &format!("items in location '{id}'"), &mut errors);
    }

    for (id, character) in &scenario.characters {
        validate_stock(&character.inventory, &ids, &format!("inventory of character '{id}'"), &mut errors);
        validate_placement(character.location.as_ref(), &ids, &format!("character '{id}'"), &mut errors);
    }

    for (id, player) in &scenario.players {
        validate_stock(&player.inventory, &ids, &format!("inventory of player '{id}'"), &mut errors);
        if placement(player.location.as_ref()).is_none() {
            errors.push(ValidationError::InvalidValue {
                context: format!("player '{id}' has no starting location"),
            });
        }
        validate_placement(player.location.as_ref(), &ids, &format!("player '{id}'"), &mut errors);
    }

    errors
}

struct IdSets<'a> {
    stockable: &'a HashSet<String>,
    keys: &'a HashSet<String>,
    walls: &'a HashSet<String>,
    locations: &'a HashSet<String>,
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    set: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !set.insert(id.to_string()) {
            errors.push(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

fn check_ref(kind: &'static str, id: &str, set: &HashSet<String>, context: String, errors: &mut Vec<ValidationError>) {
    if !set.contains(id) {
        errors.push(ValidationError::MissingReference {
            kind,
            id: id.to_string(),
            context,
        });
    }
}

fn validate_stock(tokens: &[String], ids: &IdSets<'_>, context: &str, errors: &mut Vec<ValidationError>) {
    for raw in tokens {
        match raw.parse::<StockToken>() {
            Ok(token) => check_ref("item or key", &token.item, ids.stockable, context.to_string(), errors),
            Err(err) => errors.push(ValidationError::InvalidValue {
                context: format!("{context}: {err}"),
            }),
        }
    }
}

fn validate_placement(raw: Option<&Id>, ids: &IdSets<'_>, context: &str, errors: &mut Vec<ValidationError>) {
    if let Some(location) = placement(raw) {
        check_ref("location", location, ids.locations, format!("location of {context}"), errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(json: &str) -> ScenarioDef {
        serde_json::from_str(json).unwrap()
    }

    const MINIMAL: &str = r#"{
        "Item": { "lantern": { "name": "Lantern", "description": "Brass.", "price": 5 } },
        "Key": { "brass_key": { "name": "Brass Key", "description": "Small." } },
        "Door": { "oak_door": { "name": "Oak Door", "description": "Heavy.", "key": "brass_key" } },
        "Barrier": { "wall": { "description": "Bare stone." } },
        "Location": {
            "hall": { "name": "Hall", "description": "Big.", "inv_description": "You see",
                      "north_wall": "oak_door", "south_wall": "wall", "west_wall": "wall", "east_wall": "wall",
                      "inventory": ["lantern(2)"] },
            "study": { "name": "Study", "description": "Quiet.", "inv_description": "You see",
                       "north_wall": "wall", "south_wall": "oak_door", "west_wall": "wall", "east_wall": "wall" }
        },
        "Character": { "merchant": { "name": "Merchant", "description": "Shrewd.", "text": "Buy!",
                                     "inventory": ["lantern"], "location": "hall" } },
        "Player": { "player": { "description": "You.", "money": 0, "inventory": [], "location": "hall" } },
        "Container": { "chest": { "name": "Chest", "description": "Oak.", "key": "brass_key",
                                  "inventory": ["brass_key"], "location": "None" } }
    }"#;

    #[test]
    fn consistent_scenario_has_no_errors() {
        assert_eq!(validate_scenario(&scenario(MINIMAL)), Vec::new());
    }

    #[test]
    fn missing_key_reference_is_reported() {
        let mut def = scenario(MINIMAL);
        def.doors.get_mut("oak_door").unwrap().key = Some("iron_key".into());
        let errors = validate_scenario(&def);
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::MissingReference { kind: "key", id, .. } if id == "iron_key"
        )));
    }

    #[test]
    fn door_and_barrier_sharing_a_key_collide() {
        let mut def = scenario(MINIMAL);
        let wall = def.barriers["wall"].clone();
        def.barriers.insert("oak_door".into(), wall);
        let errors = validate_scenario(&def);
        assert!(errors.contains(&ValidationError::DuplicateId {
            kind: "barrier",
            id: "oak_door".into()
        }));
    }

    #[test]
    fn unknown_stock_and_bad_counts_are_reported() {
        let mut def = scenario(MINIMAL);
        def.characters
            .get_mut("merchant")
            .unwrap()
            .inventory
            .extend(["crowbar".to_string(), "lantern(0)".to_string()]);
        let errors = validate_scenario(&def);
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::MissingReference { id, .. } if id == "crowbar"
        )));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidValue { .. })));
    }

    #[test]
    fn player_needs_a_starting_location() {
        let mut def = scenario(MINIMAL);
        def.players.get_mut("player").unwrap().location = None;
        let errors = validate_scenario(&def);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn two_players_are_rejected() {
        let mut def = scenario(MINIMAL);
        let player = def.players["player"].clone();
        def.players.insert("second".into(), player);
        assert!(!validate_scenario(&def).is_empty());
    }
}
