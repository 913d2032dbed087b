#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! World model and command interpreter for a small turn-based text adventure.

pub const MANOR_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod barrier;
pub mod command;
pub mod component;
pub mod config;
pub mod data_paths;
pub mod entity;
pub mod helpers;
pub mod idgen;
pub mod ledger;
pub mod loader;
pub mod location;
pub mod repl;
pub mod style;
pub mod view;
pub mod world;

// Re-exports for convenience
pub use barrier::{Barrier, Lock, UnlockOutcome};
pub use component::{Character, Component, Container, Item, ItemKind, Kind, Player};
pub use config::GameConfig;
pub use entity::{Entity, Identity};
pub use ledger::{Ledger, LedgerError};
pub use loader::{build_world, load_world};
pub use location::{Location, Side};
pub use repl::{ReplControl, process_line, run_repl};
pub use view::{View, ViewItem};
pub use world::{IntegrityError, RegistryError, World};
