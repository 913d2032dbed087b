use std::fs;
use std::path::{Path, PathBuf};

use manor_engine as me;
use me::*;
use serde_json::json;
use tempfile::TempDir;

fn small_scenario() -> serde_json::Value {
    json!({
        "Item": { "money": { "name": "Money", "description": "Coins." } },
        "Key": {},
        "Door": {},
        "Barrier": {},
        "Location": {
            "cell": { "name": "Cell", "description": "Four bare walls.", "inv_description": "You see", "inventory": ["money"] }
        },
        "Character": {},
        "Player": {
            "player": { "name": null, "description": "You.", "money": 1, "inventory": ["money(2)"], "location": "cell" }
        },
        "Container": {
            "crate": { "name": "Crate", "description": "Empty.", "key": null, "inventory": [], "location": "None" }
        }
    })
}

fn write_game(dir: &TempDir, scenario: &serde_json::Value, extra_toml: &str) -> PathBuf {
    let scenario_path = dir.path().join("scenario.json");
    fs::write(&scenario_path, scenario.to_string()).unwrap();
    let config_path = dir.path().join("manor.toml");
    let toml = format!("scenario = {:?}\n{extra_toml}", scenario_path.display().to_string());
    fs::write(&config_path, toml).unwrap();
    config_path
}

fn load(config_path: &Path, player_name: Option<&str>) -> anyhow::Result<World> {
    let config = GameConfig::load(config_path);
    load_world(&config, player_name)
}

#[test]
fn loads_world_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_game(&dir, &small_scenario(), "currency = \"Silver Penny\"\ndefault_player_name = \"Wanderer\"");
    let world = load(&config, None).unwrap();

    let player = world.player().unwrap();
    assert_eq!(player.name(), "Wanderer");
    // starting money plus the two coins from the inventory list
    assert_eq!(player.money, 3);
    assert!(player.inventory().is_empty());
    assert_eq!(world.currency, "Silver Penny");
    assert!(world.find_stock_item("silver penny").is_some());
}

#[test]
fn prompt_name_wins_over_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_game(&dir, &small_scenario(), "");
    let world = load(&config, Some("  Ada ")).unwrap();
    assert_eq!(world.player().unwrap().name(), "Ada");

    let blank = load(&config, Some("   ")).unwrap();
    assert_eq!(blank.player().unwrap().name(), GameConfig::default().default_player_name);
}

#[test]
fn rooms_sharing_default_walls_are_not_connected() {
    let mut scenario = small_scenario();
    scenario["Location"] = json!({
        "attic": { "name": "Attic", "description": "Dusty.", "inv_description": "", "inventory": [] },
        "cellar": { "name": "Cellar", "description": "Damp.", "inv_description": "", "inventory": [] }
    });
    scenario["Player"]["player"]["location"] = json!("cellar");
    let dir = tempfile::tempdir().unwrap();
    let config = write_game(&dir, &scenario, "");
    let mut world = load(&config, None).unwrap();

    let cellar = world.location_by_key("cellar").unwrap();
    let north = cellar.wall(Side::North);
    assert!(world.get_adjacent(cellar.id(), north).unwrap().is_none());
    assert!(world.unpaired_doors().is_empty());

    let mut view = View::new();
    process_line(&mut world, &mut view, "go north");
    assert_eq!(view.transcript(), "You cannot go there!");
    assert_eq!(world.player_location().unwrap().name(), "Cellar");
}

#[test]
fn open_sides_get_the_shared_solid_wall() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_game(&dir, &small_scenario(), "");
    let world = load(&config, None).unwrap();
    let cell = world.player_location().unwrap();
    let wall = world.barrier(cell.wall(Side::North)).unwrap();
    assert_eq!(wall.internal_key(), "solid_wall");
    assert!(Side::ALL.into_iter().all(|side| cell.wall(side) == wall.id()));
    assert_eq!(world.all_barriers().len(), 1);
}

#[test]
fn none_location_means_nowhere() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_game(&dir, &small_scenario(), "");
    let world = load(&config, None).unwrap();
    let crate_box = world
        .find_by_name("crate", Some(Kind::Container))
        .and_then(|e| e.container())
        .unwrap();
    assert_eq!(crate_box.location, None);
}

#[test]
fn broken_references_fail_validation() {
    let dir = tempfile::tempdir().unwrap();
    let mut scenario = small_scenario();
    scenario["Door"] = json!({ "gate": { "name": "Gate", "description": "Iron.", "key": "missing_key" } });
    scenario["Player"]["player"]["location"] = json!("attic");
    let config = write_game(&dir, &scenario, "");
    let err = load(&config, None).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("scenario validation failed"), "{message}");
    assert!(message.contains("missing_key"), "{message}");
    assert!(message.contains("attic"), "{message}");
}

#[test]
fn unreadable_scenario_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_game(&dir, &small_scenario(), "");
    fs::write(dir.path().join("scenario.json"), "{ not json").unwrap();
    assert!(load(&config, None).is_err());
}

#[test]
fn shipped_manor_can_be_escaped() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let config = GameConfig {
        scenario: data.join("scenario.json"),
        ..GameConfig::load(&data.join("manor.toml"))
    };
    let mut world = load_world(&config, Some("Tester")).unwrap();
    let mut view = View::new();
    let walkthrough = [
        "take gold coin",
        "take gold coin",
        "take gold coin",
        "take brass key from umbrella stand",
        "unlock oak door",
        "go north",
        "unlock chest",
        "take gold coin from chest",
        "go south",
        "go east",
        "buy iron key",
        "go west",
        "go north",
        "unlock garden gate",
        "go north",
    ];
    for line in walkthrough {
        assert_eq!(process_line(&mut world, &mut view, line), ReplControl::Continue, "{line}");
    }
    assert_eq!(world.player_location().unwrap().name(), "Garden", "{}", view.transcript());
    assert_eq!(world.player().unwrap().money, 2);
}
