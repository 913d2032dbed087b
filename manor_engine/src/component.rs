//! Components: items, keys, characters, the player and containers.
//!
//! Components are the entities the registry holds in per-kind catalogs. Characters, the
//! player and containers own a [`Ledger`]; items and keys are the things that ledgers count.

use std::fmt::Display;

use log::info;
use uuid::Uuid;
use variantly::Variantly;

use crate::barrier::{Lock, UnlockOutcome};
use crate::entity::{Entity, Identity};
use crate::idgen::{NAMESPACE_CHARACTER, NAMESPACE_CONTAINER, NAMESPACE_ITEM, NAMESPACE_KEY, NAMESPACE_PLAYER};
use crate::ledger::{Ledger, LedgerError, checked_total};

/// Internal key of the item that stands for money. Taking it raises the player's balance.
pub const MONEY_KEY: &str = "money";

/// The kinds of registered objects. `Door` and `Barrier` only occur as barriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Item,
    Key,
    Character,
    Player,
    Container,
    Door,
    Barrier,
}

impl Kind {
    /// Component kinds in name-resolution order.
    pub const COMPONENTS: [Kind; 5] = [Kind::Item, Kind::Key, Kind::Character, Kind::Player, Kind::Container];
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Kind::Item => "Item",
            Kind::Key => "Key",
            Kind::Character => "Character",
            Kind::Player => "Player",
            Kind::Container => "Container",
            Kind::Door => "Door",
            Kind::Barrier => "Barrier",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Plain,
    Key,
}

/// Something that can be held in a ledger. Keys are items that also fit a lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    identity: Identity,
    pub price: u32,
    kind: ItemKind,
}

impl Entity for Item {
    fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl Item {
    pub fn new(kind: ItemKind, name: Option<&str>, internal_key: Option<&str>, description: &str, price: u32) -> Self {
        let namespace = match kind {
            ItemKind::Plain => &NAMESPACE_ITEM,
            ItemKind::Key => &NAMESPACE_KEY,
        };
        Self {
            identity: Identity::new(namespace, name, internal_key, description),
            price,
            kind,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn is_key(&self) -> bool {
        self.kind == ItemKind::Key
    }

    pub fn is_money(&self) -> bool {
        self.kind == ItemKind::Plain && self.internal_key() == MONEY_KEY
    }
}

/// A non-player character. Characters hold stock and may act as a merchant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    identity: Identity,
    pub location: Option<Uuid>,
    pub inventory: Ledger,
    /// Line spoken when talked to.
    pub text: String,
}

impl Entity for Character {
    fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl Character {
    pub fn new(name: Option<&str>, internal_key: Option<&str>, description: &str, text: &str) -> Self {
        Self::in_namespace(&NAMESPACE_CHARACTER, name, internal_key, description, text)
    }

    fn in_namespace(
        namespace: &Uuid,
        name: Option<&str>,
        internal_key: Option<&str>,
        description: &str,
        text: &str,
    ) -> Self {
        Self {
            identity: Identity::new(namespace, name, internal_key, description),
            location: None,
            inventory: Ledger::new(),
            text: text.to_string(),
        }
    }
}

/// The single player. A character with a money balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub character: Character,
    pub money: u32,
}

impl Entity for Player {
    fn identity(&self) -> &Identity {
        self.character.identity()
    }
}

impl Player {
    pub fn new(name: Option<&str>, internal_key: Option<&str>, description: &str, money: u32) -> Self {
        Self {
            character: Character::in_namespace(&NAMESPACE_PLAYER, name, internal_key, description, ""),
            money,
        }
    }

    pub fn location(&self) -> Option<Uuid> {
        self.character.location
    }

    pub fn inventory(&self) -> &Ledger {
        &self.character.inventory
    }

    pub fn has_enough_money(&self, cost: u32) -> bool {
        self.money >= cost
    }

    /// Add items to the player's possessions. Money goes straight to the balance.
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount` is zero
    pub fn receive(&mut self, item: &Item, amount: u32) -> Result<(), LedgerError> {
        if item.is_money() {
            if amount == 0 {
                return Err(LedgerError::InvalidAmount {
                    item: item.internal_key().to_string(),
                    amount,
                });
            }
            self.money = checked_total(item, self.money, amount)?;
            return Ok(());
        }
        self.character.inventory.add(item, amount)?;
        Ok(())
    }

    /// Move `amount` units of `item` from `source` into the player's possessions.
    ///
    /// # Errors
    /// Any [`LedgerError`] from removing the units; nothing changes in that case.
    pub fn take_from(&mut self, source: &mut Ledger, item: &Item, amount: u32) -> Result<(), LedgerError> {
        if item.is_money() {
            let money = checked_total(item, self.money, amount)?;
            source.remove(item, amount)?;
            self.money = money;
            Ok(())
        } else {
            source.transfer_to(&mut self.character.inventory, item, amount)
        }
    }

    /// Buy one unit of `item` out of a merchant's stock.
    ///
    /// Returns `Ok(false)` without changing anything if the player cannot afford it.
    ///
    /// # Errors
    /// Any [`LedgerError`] from the stock transfer.
    pub fn purchase(&mut self, stock: &mut Ledger, item: &Item) -> Result<bool, LedgerError> {
        if !self.has_enough_money(item.price) {
            return Ok(false);
        }
        self.take_from(stock, item, 1)?;
        self.money -= item.price;
        info!(
            "{} bought '{}' for {}, {} left",
            self.name(),
            item.internal_key(),
            item.price,
            self.money
        );
        Ok(true)
    }
}

/// A lockable box of items placed in a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    identity: Identity,
    pub location: Option<Uuid>,
    pub inventory: Ledger,
    pub lock: Lock,
}

impl Entity for Container {
    fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl Container {
    pub fn new(name: Option<&str>, internal_key: Option<&str>, description: &str, required_key: Option<Uuid>) -> Self {
        Self {
            identity: Identity::new(&NAMESPACE_CONTAINER, name, internal_key, description),
            location: None,
            inventory: Ledger::new(),
            lock: Lock::new(required_key),
        }
    }

    pub fn unlock(&mut self, key: &Item) -> UnlockOutcome {
        let outcome = self.lock.unlock(key);
        info!("unlock container '{}' with '{}': {outcome:?}", self.name(), key.internal_key());
        outcome
    }
}

/// An owned component, as handed to the registry.
#[derive(Debug, Clone, Variantly)]
pub enum Component {
    Item(Item),
    Character(Character),
    Player(Player),
    Container(Container),
}

impl Component {
    pub fn kind(&self) -> Kind {
        match self {
            Component::Item(item) if item.is_key() => Kind::Key,
            Component::Item(_) => Kind::Item,
            Component::Character(_) => Kind::Character,
            Component::Player(_) => Kind::Player,
            Component::Container(_) => Kind::Container,
        }
    }

    pub fn identity(&self) -> &Identity {
        match self {
            Component::Item(item) => item.identity(),
            Component::Character(character) => character.identity(),
            Component::Player(player) => player.identity(),
            Component::Container(container) => container.identity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money() -> Item {
        Item::new(ItemKind::Plain, Some("Gold Coin"), Some(MONEY_KEY), "shiny", 1)
    }

    fn apple() -> Item {
        Item::new(ItemKind::Plain, Some("Apple"), None, "red", 2)
    }

    #[test]
    fn item_and_key_identities_differ() {
        let item = Item::new(ItemKind::Plain, Some("Crest"), None, "", 1);
        let key = Item::new(ItemKind::Key, Some("Crest"), None, "", 1);
        assert_eq!(item.internal_key(), key.internal_key());
        assert_ne!(item.id(), key.id());
    }

    #[test]
    fn character_and_player_identities_differ() {
        let character = Character::new(Some("Ada"), None, "", "");
        let player = Player::new(Some("Ada"), None, "", 0);
        assert_ne!(character.id(), player.id());
    }

    #[test]
    fn money_goes_to_balance() {
        let mut player = Player::new(Some("Ada"), None, "", 2);
        player.receive(&money(), 3).unwrap();
        assert_eq!(player.money, 5);
        assert!(player.inventory().is_empty());
    }

    #[test]
    fn taking_money_from_a_ledger() {
        let mut player = Player::new(Some("Ada"), None, "", 0);
        let mut floor = Ledger::new();
        floor.add(&money(), 2).unwrap();
        player.take_from(&mut floor, &money(), 1).unwrap();
        assert_eq!(player.money, 1);
        assert_eq!(floor.amount_of(money().id()), 1);
    }

    #[test]
    fn money_past_the_limit_is_refused() {
        let mut player = Player::new(Some("Ada"), None, "", u32::MAX);
        let err = player.receive(&money(), 1).unwrap_err();
        assert!(matches!(err, LedgerError::Overflow { .. }));
        assert_eq!(player.money, u32::MAX);

        let mut floor = Ledger::new();
        floor.add(&money(), 2).unwrap();
        assert!(player.take_from(&mut floor, &money(), 2).is_err());
        assert_eq!(floor.amount_of(money().id()), 2);
        assert_eq!(player.money, u32::MAX);
    }

    #[test]
    fn purchase_moves_one_unit_and_debits() {
        let mut player = Player::new(Some("Ada"), None, "", 5);
        let mut stock = Ledger::new();
        stock.add(&apple(), 3).unwrap();
        assert!(player.purchase(&mut stock, &apple()).unwrap());
        assert_eq!(player.money, 3);
        assert_eq!(stock.amount_of(apple().id()), 2);
        assert_eq!(player.inventory().amount_of(apple().id()), 1);
    }

    #[test]
    fn purchase_without_funds_changes_nothing() {
        let mut player = Player::new(Some("Ada"), None, "", 1);
        let mut stock = Ledger::new();
        stock.add(&apple(), 1).unwrap();
        assert!(!player.purchase(&mut stock, &apple()).unwrap());
        assert_eq!(player.money, 1);
        assert_eq!(stock.amount_of(apple().id()), 1);
        assert!(player.inventory().is_empty());
    }

    #[test]
    fn component_kind_follows_item_kind() {
        let key = Item::new(ItemKind::Key, Some("Brass Key"), None, "", 1);
        assert_eq!(Component::Item(key).kind(), Kind::Key);
        assert_eq!(Component::Item(apple()).kind(), Kind::Item);
    }
}
