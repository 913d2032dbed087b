//! Locations and their four sides.
//!
//! A [`Location`] is a place the player can stand in. Each of its four sides is bounded by
//! exactly one barrier; two locations are neighbours when they share a barrier on opposite
//! sides. Locations also hold a ledger of items lying around.

use std::fmt::Display;

use uuid::Uuid;
use variantly::Variantly;

use crate::entity::{Entity, Identity};
use crate::helpers::{indefinite_article, join_with_and};
use crate::idgen::NAMESPACE_LOCATION;
use crate::ledger::Ledger;

/// Lead-in used when a location has no item preamble of its own.
pub const DEFAULT_PREAMBLE: &str = "Lying around you see";
/// Text for a location with nothing in its ledger.
pub const NOTHING_HERE: &str = "There are no items lying around in this location.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Variantly)]
pub enum Side {
    North,
    South,
    West,
    East,
}

impl Side {
    /// Sides in the order they are checked when looking for a barrier.
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::West, Side::East];

    pub fn opposite(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::South => Side::North,
            Side::West => Side::East,
            Side::East => Side::West,
        }
    }

    /// Parse a direction word, e.g. "north" or "n".
    pub fn from_token(token: &str) -> Option<Side> {
        match token.to_lowercase().as_str() {
            "north" | "n" => Some(Side::North),
            "south" | "s" => Some(Side::South),
            "west" | "w" => Some(Side::West),
            "east" | "e" => Some(Side::East),
            _ => None,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Side::North => "north",
            Side::South => "south",
            Side::West => "west",
            Side::East => "east",
        };
        f.write_str(text)
    }
}

/// Barrier ids on each side of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub north: Uuid,
    pub south: Uuid,
    pub west: Uuid,
    pub east: Uuid,
}

impl Walls {
    pub fn get(&self, side: Side) -> Uuid {
        match side {
            Side::North => self.north,
            Side::South => self.south,
            Side::West => self.west,
            Side::East => self.east,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    identity: Identity,
    pub walls: Walls,
    pub inventory: Ledger,
    /// Lead-in sentence for the list of items lying around.
    pub inventory_preamble: String,
}

impl Entity for Location {
    fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl Location {
    pub fn new(name: &str, internal_key: Option<&str>, description: &str, inventory_preamble: &str, walls: Walls) -> Self {
        Self {
            identity: Identity::new(&NAMESPACE_LOCATION, Some(name), internal_key, description),
            walls,
            inventory: Ledger::new(),
            inventory_preamble: inventory_preamble.to_string(),
        }
    }

    pub fn wall(&self, side: Side) -> Uuid {
        self.walls.get(side)
    }

    /// First side (north, south, west, east) bounded by the barrier, if any.
    pub fn side_of(&self, barrier_id: Uuid) -> Option<Side> {
        Side::ALL.into_iter().find(|side| self.wall(*side) == barrier_id)
    }

    pub fn has_wall(&self, barrier_id: Uuid) -> bool {
        self.side_of(barrier_id).is_some()
    }

    /// Description followed by what is lying around.
    pub fn describe(&self) -> String {
        format!("{} {}", self.description(), self.items_clause())
    }

    /// "{preamble} a 'Rope', an 'Apple', and a 'Torch'." or [`NOTHING_HERE`].
    pub fn items_clause(&self) -> String {
        if self.inventory.is_empty() {
            return NOTHING_HERE.to_string();
        }
        let preamble = if self.inventory_preamble.trim().is_empty() {
            DEFAULT_PREAMBLE
        } else {
            self.inventory_preamble.trim()
        };
        let names: Vec<String> = self
            .inventory
            .entries()
            .iter()
            .map(|entry| {
                let name = entry.item.name();
                format!("{} '{name}'", indefinite_article(name))
            })
            .collect();
        format!("{preamble} {}.", join_with_and(&names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Item, ItemKind};

    fn walls() -> Walls {
        Walls {
            north: Uuid::from_u128(1),
            south: Uuid::from_u128(2),
            west: Uuid::from_u128(3),
            east: Uuid::from_u128(1),
        }
    }

    #[test]
    fn opposite_sides() {
        for side in Side::ALL {
            assert_ne!(side, side.opposite());
            assert_eq!(side, side.opposite().opposite());
        }
    }

    #[test]
    fn direction_tokens() {
        assert_eq!(Side::from_token("North"), Some(Side::North));
        assert_eq!(Side::from_token("e"), Some(Side::East));
        assert_eq!(Side::from_token("up"), None);
    }

    #[test]
    fn side_of_prefers_north_south_west_east_order() {
        let room = Location::new("Hall", None, "A hall.", "", walls());
        assert_eq!(room.side_of(Uuid::from_u128(1)), Some(Side::North));
        assert_eq!(room.side_of(Uuid::from_u128(3)), Some(Side::West));
        assert_eq!(room.side_of(Uuid::from_u128(9)), None);
    }

    #[test]
    fn empty_location_says_so() {
        let room = Location::new("Hall", None, "A hall.", "You see", walls());
        assert_eq!(room.describe(), format!("A hall. {NOTHING_HERE}"));
    }

    #[test]
    fn lists_items_with_articles() {
        let mut room = Location::new("Hall", None, "A hall.", "On the floor lie", walls());
        for name in ["Torch", "Apple", "Rope"] {
            room.inventory
                .add(&Item::new(ItemKind::Plain, Some(name), None, "", 1), 1)
                .unwrap();
        }
        assert_eq!(
            room.items_clause(),
            "On the floor lie an 'Apple', a 'Rope', and a 'Torch'."
        );
    }
}
