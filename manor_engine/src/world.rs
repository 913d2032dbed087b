//! The world registry.
//!
//! [`World`] owns every location, barrier and component of a running game in per-kind
//! catalogs kept in registration order. It resolves names to entities, answers adjacency
//! questions between locations and hands out the split mutable borrows the command
//! handlers need to move items between ledgers.

use log::debug;
use thiserror::Error;
use uuid::Uuid;
use variantly::Variantly;

use crate::barrier::{Barrier, Lock};
use crate::component::{Character, Component, Container, Item, Kind, Player};
use crate::entity::Entity;
use crate::ledger::PriceColumn;
use crate::location::{Location, Side};

/// Rejected registrations and lookups by internal key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("a {kind} with internal key '{key}' is already registered")]
    DuplicateKey { kind: Kind, key: String },
    #[error("no {kind} with internal key '{key}' is registered")]
    UnknownKey { kind: Kind, key: String },
    #[error("a location with internal key '{0}' is already registered")]
    DuplicateLocation(String),
    #[error("a player is already registered; only one is allowed")]
    SecondPlayer,
}

/// Broken structure discovered while the game runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("no player has been registered")]
    NoPlayer,
    #[error("player '{0}' is not in any location")]
    PlayerNowhere(String),
    #[error("no location with id {0}")]
    UnknownLocation(Uuid),
    #[error("no barrier with id {0}")]
    UnknownBarrier(Uuid),
    #[error("no component with id {0}")]
    UnknownComponent(Uuid),
    #[error("barrier {barrier} is not a wall of location '{location}'")]
    NotAWall { location: String, barrier: Uuid },
    #[error("door '{door}' on the {side} side of '{location}' leads to no other location")]
    UnpairedDoor { door: String, location: String, side: Side },
}

/// Borrowed view of any registered entity other than a location.
#[derive(Debug, Clone, Copy, Variantly)]
pub enum EntityRef<'a> {
    Item(&'a Item),
    Character(&'a Character),
    Player(&'a Player),
    Container(&'a Container),
    Barrier(&'a Barrier),
}

impl<'a> EntityRef<'a> {
    pub fn as_entity(&self) -> &'a dyn Entity {
        match *self {
            EntityRef::Item(item) => item,
            EntityRef::Character(character) => character,
            EntityRef::Player(player) => player,
            EntityRef::Container(container) => container,
            EntityRef::Barrier(barrier) => barrier,
        }
    }

    pub fn id(&self) -> Uuid {
        self.as_entity().id()
    }

    pub fn name(&self) -> &'a str {
        self.as_entity().name()
    }

    pub fn description(&self) -> &'a str {
        self.as_entity().description()
    }

    pub fn kind(&self) -> Kind {
        match self {
            EntityRef::Item(item) if item.is_key() => Kind::Key,
            EntityRef::Item(_) => Kind::Item,
            EntityRef::Character(_) => Kind::Character,
            EntityRef::Player(_) => Kind::Player,
            EntityRef::Container(_) => Kind::Container,
            EntityRef::Barrier(barrier) if barrier.is_door() => Kind::Door,
            EntityRef::Barrier(_) => Kind::Barrier,
        }
    }

    /// Location of placeable components. Items, keys and barriers have none.
    pub fn location(&self) -> Option<Uuid> {
        match self {
            EntityRef::Character(character) => character.location,
            EntityRef::Player(player) => player.location(),
            EntityRef::Container(container) => container.location,
            EntityRef::Item(_) | EntityRef::Barrier(_) => None,
        }
    }
}

/// Something the player can open or unlock.
#[derive(Debug, Clone, Copy, Variantly)]
pub enum Openable<'a> {
    Door(&'a Barrier),
    Container(&'a Container),
}

/// Owned handle to an [`Openable`], for use after the borrow ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTarget {
    Door(Uuid),
    Container(Uuid),
}

impl<'a> Openable<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            Openable::Door(door) => door.name(),
            Openable::Container(container) => container.name(),
        }
    }

    pub fn lock(&self) -> Option<&'a Lock> {
        match *self {
            Openable::Door(door) => door.lock(),
            Openable::Container(container) => Some(&container.lock),
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.lock().is_some_and(Lock::is_unlocked)
    }

    pub fn target(&self) -> LockTarget {
        match self {
            Openable::Door(door) => LockTarget::Door(door.id()),
            Openable::Container(container) => LockTarget::Container(container.id()),
        }
    }
}

/// Complete state of the running game.
#[derive(Debug, Clone, Default)]
pub struct World {
    locations: Vec<Location>,
    barriers: Vec<Barrier>,
    items: Vec<Item>,
    keys: Vec<Item>,
    characters: Vec<Character>,
    players: Vec<Player>,
    containers: Vec<Container>,
    /// Display name of the money item.
    pub currency: String,
    /// Column prices are aligned to in merchant listings.
    pub price_column: usize,
}

impl World {
    pub fn new(currency: &str, price_column: usize) -> Self {
        Self {
            currency: currency.to_string(),
            price_column,
            ..Self::default()
        }
    }

    /// Add a component to its kind's catalog.
    ///
    /// # Errors
    /// - `DuplicateKey` if the kind already holds an entity with the same internal key
    /// - `SecondPlayer` if a player is already registered
    pub fn register(&mut self, component: Component) -> Result<Uuid, RegistryError> {
        let kind = component.kind();
        let id = component.identity().id();
        if self.components_of_kind(kind).iter().any(|entity| entity.id() == id) {
            return Err(RegistryError::DuplicateKey {
                kind,
                key: component.identity().internal_key().to_string(),
            });
        }
        let key = component.identity().internal_key().to_string();
        match component {
            Component::Item(item) if item.is_key() => self.keys.push(item),
            Component::Item(item) => self.items.push(item),
            Component::Character(character) => self.characters.push(character),
            Component::Player(player) => {
                if !self.players.is_empty() {
                    return Err(RegistryError::SecondPlayer);
                }
                self.players.push(player);
            },
            Component::Container(container) => self.containers.push(container),
        }
        debug!("registered {kind} '{key}' ({id})");
        Ok(id)
    }

    /// Add a barrier. Doors and plain barriers share one key space.
    ///
    /// # Errors
    /// - `DuplicateKey` if a barrier with the same internal key exists
    pub fn register_barrier(&mut self, barrier: Barrier) -> Result<Uuid, RegistryError> {
        let id = barrier.id();
        if self.barriers.iter().any(|b| b.id() == id) {
            return Err(RegistryError::DuplicateKey {
                kind: if barrier.is_door() { Kind::Door } else { Kind::Barrier },
                key: barrier.internal_key().to_string(),
            });
        }
        debug!("registered barrier '{}' ({id})", barrier.internal_key());
        self.barriers.push(barrier);
        Ok(id)
    }

    /// Add a location.
    ///
    /// # Errors
    /// - `DuplicateLocation` if a location with the same internal key exists
    pub fn register_location(&mut self, location: Location) -> Result<Uuid, RegistryError> {
        let id = location.id();
        if self.locations.iter().any(|l| l.id() == id) {
            return Err(RegistryError::DuplicateLocation(location.internal_key().to_string()));
        }
        debug!("registered location '{}' ({id})", location.internal_key());
        self.locations.push(location);
        Ok(id)
    }

    /// First entity whose display name matches, ignoring case.
    ///
    /// Searches items, keys, characters, the player and containers, then barriers. A kind
    /// filter restricts the search; `Door` and `Barrier` tell doors and walls apart.
    pub fn find_by_name(&self, name: &str, kind: Option<Kind>) -> Option<EntityRef<'_>> {
        let wanted = |k: Kind| kind.is_none_or(|w| w == k);
        if wanted(Kind::Item)
            && let Some(item) = self.items.iter().find(|i| i.is_named(name))
        {
            return Some(EntityRef::Item(item));
        }
        if wanted(Kind::Key)
            && let Some(key) = self.keys.iter().find(|k| k.is_named(name))
        {
            return Some(EntityRef::Item(key));
        }
        if wanted(Kind::Character)
            && let Some(character) = self.characters.iter().find(|c| c.is_named(name))
        {
            return Some(EntityRef::Character(character));
        }
        if wanted(Kind::Player)
            && let Some(player) = self.players.iter().find(|p| p.is_named(name))
        {
            return Some(EntityRef::Player(player));
        }
        if wanted(Kind::Container)
            && let Some(container) = self.containers.iter().find(|c| c.is_named(name))
        {
            return Some(EntityRef::Container(container));
        }
        self.barriers
            .iter()
            .find(|b| b.is_named(name) && wanted(if b.is_door() { Kind::Door } else { Kind::Barrier }))
            .map(EntityRef::Barrier)
    }

    /// An item or key that can sit in a ledger, by display name.
    pub fn find_stock_item(&self, name: &str) -> Option<&Item> {
        self.items
            .iter()
            .chain(self.keys.iter())
            .find(|item| item.is_named(name))
    }

    /// A container or door with the given name. Containers win over doors.
    pub fn find_openable(&self, name: &str) -> Option<Openable<'_>> {
        self.containers
            .iter()
            .find(|c| c.is_named(name))
            .map(Openable::Container)
            .or_else(|| {
                self.barriers
                    .iter()
                    .find(|b| b.is_door() && b.is_named(name))
                    .map(Openable::Door)
            })
    }

    pub fn all_locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn all_barriers(&self) -> &[Barrier] {
        &self.barriers
    }

    /// Every registered entity of `kind`, in registration order.
    pub fn components_of_kind(&self, kind: Kind) -> Vec<EntityRef<'_>> {
        match kind {
            Kind::Item => self.items.iter().map(EntityRef::Item).collect(),
            Kind::Key => self.keys.iter().map(EntityRef::Item).collect(),
            Kind::Character => self.characters.iter().map(EntityRef::Character).collect(),
            Kind::Player => self.players.iter().map(EntityRef::Player).collect(),
            Kind::Container => self.containers.iter().map(EntityRef::Container).collect(),
            Kind::Door => self.barriers.iter().filter(|b| b.is_door()).map(EntityRef::Barrier).collect(),
            Kind::Barrier => self.barriers.iter().filter(|b| !b.is_door()).map(EntityRef::Barrier).collect(),
        }
    }

    pub fn location(&self, id: Uuid) -> Option<&Location> {
        self.locations.iter().find(|l| l.id() == id)
    }

    pub fn location_by_key(&self, key: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.internal_key() == key)
    }

    pub fn barrier(&self, id: Uuid) -> Option<&Barrier> {
        self.barriers.iter().find(|b| b.id() == id)
    }

    pub fn barrier_mut(&mut self, id: Uuid) -> Option<&mut Barrier> {
        self.barriers.iter_mut().find(|b| b.id() == id)
    }

    pub fn barrier_by_key(&self, key: &str) -> Option<&Barrier> {
        self.barriers.iter().find(|b| b.internal_key() == key)
    }

    /// An item (`Kind::Item`) or key (`Kind::Key`) by internal key.
    pub fn item_by_key(&self, kind: Kind, key: &str) -> Option<&Item> {
        let catalog = match kind {
            Kind::Item => &self.items,
            Kind::Key => &self.keys,
            _ => return None,
        };
        catalog.iter().find(|item| item.internal_key() == key)
    }

    pub fn character(&self, id: Uuid) -> Option<&Character> {
        self.characters.iter().find(|c| c.id() == id)
    }

    pub fn container(&self, id: Uuid) -> Option<&Container> {
        self.containers.iter().find(|c| c.id() == id)
    }

    pub fn container_mut(&mut self, id: Uuid) -> Option<&mut Container> {
        self.containers.iter_mut().find(|c| c.id() == id)
    }

    /// The merchant at a location: the first character placed there, in registration order.
    pub fn merchant_at(&self, location_id: Uuid) -> Option<&Character> {
        self.characters.iter().find(|c| c.location == Some(location_id))
    }

    /// Whether an entity is present at (or, for barriers, bounds) a location.
    pub fn is_at(&self, entity: EntityRef<'_>, location: &Location) -> bool {
        match entity {
            EntityRef::Barrier(barrier) => location.has_wall(barrier.id()),
            other => other.location() == Some(location.id()),
        }
    }

    /// Set the location of a placeable component by internal key.
    ///
    /// # Errors
    /// - `UnknownKey` if no character, player or container of `kind` has that key
    pub fn place(&mut self, kind: Kind, key: &str, location: Option<Uuid>) -> Result<(), RegistryError> {
        let slot = match kind {
            Kind::Character => self
                .characters
                .iter_mut()
                .find(|c| c.internal_key() == key)
                .map(|c| &mut c.location),
            Kind::Player => self
                .players
                .iter_mut()
                .find(|p| p.internal_key() == key)
                .map(|p| &mut p.character.location),
            Kind::Container => self
                .containers
                .iter_mut()
                .find(|c| c.internal_key() == key)
                .map(|c| &mut c.location),
            _ => None,
        };
        let slot = slot.ok_or_else(|| RegistryError::UnknownKey {
            kind,
            key: key.to_string(),
        })?;
        *slot = location;
        Ok(())
    }

    /// The player.
    ///
    /// # Errors
    /// - `NoPlayer` if none was registered
    pub fn player(&self) -> Result<&Player, IntegrityError> {
        self.players.first().ok_or(IntegrityError::NoPlayer)
    }

    /// # Errors
    /// - `NoPlayer` if none was registered
    pub fn player_mut(&mut self) -> Result<&mut Player, IntegrityError> {
        self.players.first_mut().ok_or(IntegrityError::NoPlayer)
    }

    /// The location the player stands in.
    ///
    /// # Errors
    /// - `NoPlayer`, `PlayerNowhere` or `UnknownLocation` when that location cannot be found
    pub fn player_location(&self) -> Result<&Location, IntegrityError> {
        let player = self.player()?;
        let location_id = player
            .location()
            .ok_or_else(|| IntegrityError::PlayerNowhere(player.name().to_string()))?;
        self.location(location_id)
            .ok_or(IntegrityError::UnknownLocation(location_id))
    }

    /// Move the player to another location.
    ///
    /// # Errors
    /// - `NoPlayer` or `UnknownLocation`
    pub fn move_player(&mut self, destination: Uuid) -> Result<(), IntegrityError> {
        if self.location(destination).is_none() {
            return Err(IntegrityError::UnknownLocation(destination));
        }
        self.player_mut()?.character.location = Some(destination);
        Ok(())
    }

    /// The player together with the location they stand in.
    ///
    /// # Errors
    /// Same as [`World::player_location`].
    pub fn player_and_location_mut(&mut self) -> Result<(&mut Player, &mut Location), IntegrityError> {
        let player = self.players.first_mut().ok_or(IntegrityError::NoPlayer)?;
        let location_id = player
            .location()
            .ok_or_else(|| IntegrityError::PlayerNowhere(player.name().to_string()))?;
        let location = self
            .locations
            .iter_mut()
            .find(|l| l.id() == location_id)
            .ok_or(IntegrityError::UnknownLocation(location_id))?;
        Ok((player, location))
    }

    /// # Errors
    /// - `NoPlayer` or `UnknownComponent`
    pub fn player_and_container_mut(&mut self, container_id: Uuid) -> Result<(&mut Player, &mut Container), IntegrityError> {
        let player = self.players.first_mut().ok_or(IntegrityError::NoPlayer)?;
        let container = self
            .containers
            .iter_mut()
            .find(|c| c.id() == container_id)
            .ok_or(IntegrityError::UnknownComponent(container_id))?;
        Ok((player, container))
    }

    /// # Errors
    /// - `NoPlayer` or `UnknownComponent`
    pub fn player_and_character_mut(&mut self, character_id: Uuid) -> Result<(&mut Player, &mut Character), IntegrityError> {
        let player = self.players.first_mut().ok_or(IntegrityError::NoPlayer)?;
        let character = self
            .characters
            .iter_mut()
            .find(|c| c.id() == character_id)
            .ok_or(IntegrityError::UnknownComponent(character_id))?;
        Ok((player, character))
    }

    /// The location on the far side of `barrier_id`, seen from `from`.
    ///
    /// `Ok(None)` means the barrier is a plain wall. Walls never lead anywhere, even
    /// when another location shows the same wall on its mirror side.
    ///
    /// # Errors
    /// - `UnknownLocation` if `from` is not registered
    /// - `NotAWall` if the barrier does not bound `from`
    /// - `UnpairedDoor` if the barrier is a door with no location on its far side
    pub fn get_adjacent(&self, from: Uuid, barrier_id: Uuid) -> Result<Option<&Location>, IntegrityError> {
        let origin = self.location(from).ok_or(IntegrityError::UnknownLocation(from))?;
        let side = origin.side_of(barrier_id).ok_or_else(|| IntegrityError::NotAWall {
            location: origin.name().to_string(),
            barrier: barrier_id,
        })?;
        self.adjacent_through(from, side)
    }

    /// The location behind one side of `from`. See [`World::get_adjacent`].
    ///
    /// # Errors
    /// Same as [`World::get_adjacent`], plus `UnknownBarrier` for a dangling wall id.
    pub fn adjacent_through(&self, from: Uuid, side: Side) -> Result<Option<&Location>, IntegrityError> {
        let origin = self.location(from).ok_or(IntegrityError::UnknownLocation(from))?;
        let barrier_id = origin.wall(side);
        let barrier = self
            .barrier(barrier_id)
            .ok_or(IntegrityError::UnknownBarrier(barrier_id))?;
        if !barrier.is_door() {
            return Ok(None);
        }
        let mirror = side.opposite();
        self.locations
            .iter()
            .find(|l| l.id() != from && l.wall(mirror) == barrier_id)
            .map(Some)
            .ok_or_else(|| IntegrityError::UnpairedDoor {
                door: barrier.name().to_string(),
                location: origin.name().to_string(),
                side,
            })
    }

    /// Every door side that leads nowhere.
    pub fn unpaired_doors(&self) -> Vec<IntegrityError> {
        let mut problems = Vec::new();
        for location in &self.locations {
            for side in Side::ALL {
                let is_door = self.barrier(location.wall(side)).is_some_and(Barrier::is_door);
                if is_door && let Err(err) = self.adjacent_through(location.id(), side) {
                    problems.push(err);
                }
            }
        }
        problems
    }

    /// Currency and column used when rendering merchant stock.
    pub fn pricing(&self) -> PriceColumn<'_> {
        PriceColumn {
            currency: &self.currency,
            width: self.price_column,
        }
    }
}
