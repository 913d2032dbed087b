//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop. This module and its submodules
//! implement the command handlers that act on the [`World`].

pub mod input;
pub mod inventory;
pub mod item;
pub mod look;
pub mod movement;
pub mod npc;
pub mod system;

pub use inventory::*;
pub use item::*;
pub use look::*;
pub use movement::*;
pub use npc::*;
pub use system::*;

use anyhow::Result;
use log::{error, info};

use crate::command::{Command, parse_command};
use crate::style::GameStyle;
use crate::{View, ViewItem, World};

use input::{InputEvent, InputManager};

/// Control flow signal used by handlers to exit the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run the main read–eval–print loop until the player quits.
///
/// End of input counts as `exit`; Ctrl-C stops the game right away.
///
/// # Errors
/// - Returns an error if input can no longer be read at all.
pub fn run_repl(world: &mut World, input_manager: &mut InputManager) -> Result<()> {
    let mut view = View::new();
    let prompt = "\n> ".prompt_style().to_string();
    loop {
        let line = match input_manager.read_line(&prompt)? {
            InputEvent::Line(line) => line,
            InputEvent::Eof => "exit".to_string(),
            InputEvent::Interrupted => {
                view.push(ViewItem::EngineMessage("Game stopped by keyboard interrupt.".to_string()));
                view.flush();
                info!("game stopped by keyboard interrupt");
                break;
            },
        };
        let control = process_line(world, &mut view, &line);
        view.flush();
        if control == ReplControl::Quit {
            break;
        }
    }
    Ok(())
}

/// Interpret one line of player input against the world.
///
/// Handler errors are logged and reported in the view; they never end the session.
pub fn process_line(world: &mut World, view: &mut View, line: &str) -> ReplControl {
    let command = parse_command(line);
    info!("player command: {command:?}");
    match dispatch(world, view, &command) {
        Ok(control) => control,
        Err(err) => {
            error!("error while handling {command:?}: {err:#}");
            view.push(ViewItem::Error(format!("Something is wrong with this world: {err}")));
            ReplControl::Continue
        },
    }
}

fn dispatch(world: &mut World, view: &mut View, command: &Command) -> Result<ReplControl> {
    #[allow(clippy::enum_glob_use)]
    use Command::*;
    match command {
        ShowInventory => inv_handler(world, view)?,
        LookAround => look_around_handler(world, view)?,
        LookAt(thing) => look_at_handler(world, view, thing)?,
        LookDirection(side) => look_direction_handler(world, view, *side)?,
        Open(thing) => open_handler(world, view, thing)?,
        Go(direction) => go_handler(world, view, direction)?,
        Unlock(thing) => unlock_handler(world, view, thing)?,
        Take(thing) => take_handler(world, view, thing)?,
        TakeFrom { item, container } => take_from_handler(world, view, item, container)?,
        TalkTo(character) => talk_to_handler(world, view, character)?,
        Buy(thing) => buy_handler(world, view, thing)?,
        Quit => return quit_handler(world, view),
        Malformed => malformed_handler(view),
        Unknown => unknown_handler(view),
    }
    Ok(ReplControl::Continue)
}
