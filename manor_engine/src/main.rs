#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Manor **
//! Find your way out of the manor.

use manor_engine::repl::input::{InputEvent, InputManager, world_names};
use manor_engine::style::GameStyle;
use manor_engine::{Entity, GameConfig, MANOR_VERSION, load_world, run_repl};

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

fn main() -> Result<()> {
    env_logger::init();
    info!("Start: manor v{MANOR_VERSION}");
    let config = GameConfig::load_default();
    let mut input = InputManager::new();

    println!("{:^60}", "THE MANOR".bright_yellow().underline());
    let player_name = match input.read_line(&"\nEnter your name: ".prompt_style().to_string())? {
        InputEvent::Line(name) => name.trim().to_string(),
        InputEvent::Eof | InputEvent::Interrupted => {
            println!("\nGame stopped by keyboard interrupt.");
            return Ok(());
        },
    };

    info!("loading world from '{}'", config.scenario_path().display());
    let mut world = load_world(&config, Some(&player_name)).context("while loading the manor")?;
    info!("world loaded successfully");
    input.learn_names(world_names(&world));

    let player = world.player()?;
    println!("\n{}", config.welcome_message(player.name()).description_style());
    println!("{}\n", player.description());

    run_repl(&mut world, &mut input)
}
