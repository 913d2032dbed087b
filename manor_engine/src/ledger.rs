//! Inventory ledger.
//!
//! A [`Ledger`] is the quantity-tracked item collection owned by a location, a character,
//! the player or a container. Entries are unique per item identity, always hold at least
//! one unit, and are kept sorted by the item's internal key. Every mutation either fully
//! applies or leaves the ledger untouched.

use log::debug;
use thiserror::Error;
use uuid::Uuid;

use crate::Item;
use crate::entity::Entity;

/// Rejected ledger operations. None of them mutate the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("cannot move {amount} of '{item}': amounts must be at least 1")]
    InvalidAmount { item: String, amount: u32 },
    #[error("there is no '{item}' here")]
    ItemNotFound { item: String },
    #[error("not enough '{item}' available: wanted {requested}, only {held} left")]
    InsufficientQuantity { item: String, requested: u32, held: u32 },
    #[error("cannot hold more '{item}': {held} held, {amount} more is too many")]
    Overflow { item: String, held: u32, amount: u32 },
}

/// `held + amount`, or `Overflow` if that does not fit.
///
/// # Errors
/// - `Overflow` when the sum exceeds `u32::MAX`
pub fn checked_total(item: &Item, held: u32, amount: u32) -> Result<u32, LedgerError> {
    held.checked_add(amount).ok_or_else(|| LedgerError::Overflow {
        item: item.internal_key().to_string(),
        held,
        amount,
    })
}

/// One row of a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub item: Item,
    pub amount: u32,
}

/// Settings for the price column of a listing.
#[derive(Debug, Clone, Copy)]
pub struct PriceColumn<'a> {
    pub currency: &'a str,
    /// Column at which every price ends up right-aligned.
    pub width: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` units of `item`, merging with an existing entry or inserting a new one in order.
    ///
    /// Returns the amount now held.
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount` is zero
    /// - `Overflow` if the merged amount would not fit
    pub fn add(&mut self, item: &Item, amount: u32) -> Result<u32, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount {
                item: item.internal_key().to_string(),
                amount,
            });
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| e.item.id() == item.id()) {
            entry.amount = checked_total(item, entry.amount, amount)?;
            debug!(
                "{} already in ledger, count raised to {}",
                item.internal_key(),
                entry.amount
            );
            return Ok(entry.amount);
        }
        let index = self
            .entries
            .partition_point(|e| sort_key(&e.item) < sort_key(item));
        self.entries.insert(
            index,
            LedgerEntry {
                item: item.clone(),
                amount,
            },
        );
        debug!("{} added to ledger at row {index}", item.internal_key());
        Ok(amount)
    }

    /// Remove `amount` units of `item`, deleting the entry when it runs out.
    ///
    /// Returns the amount still held.
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount` is zero
    /// - `ItemNotFound` if the item has no entry
    /// - `InsufficientQuantity` if fewer than `amount` units are held
    pub fn remove(&mut self, item: &Item, amount: u32) -> Result<u32, LedgerError> {
        let index = self.checked_position(item, amount)?;
        let entry = &mut self.entries[index];
        if entry.amount == amount {
            self.entries.remove(index);
            debug!("{} removed from ledger", item.internal_key());
            Ok(0)
        } else {
            entry.amount -= amount;
            debug!("{} count lowered to {}", item.internal_key(), entry.amount);
            Ok(entry.amount)
        }
    }

    /// Move `amount` units of `item` from this ledger into `other`.
    ///
    /// # Errors
    /// Same as [`Ledger::remove`], plus `Overflow` if `other` cannot hold that many;
    /// on error neither ledger changes.
    pub fn transfer_to(&mut self, other: &mut Ledger, item: &Item, amount: u32) -> Result<(), LedgerError> {
        self.checked_position(item, amount)?;
        checked_total(item, other.amount_of(item.id()), amount)?;
        self.remove(item, amount)?;
        other.add(item, amount)?;
        Ok(())
    }

    /// Membership test by item identity.
    pub fn contains(&self, item_id: Uuid) -> bool {
        self.entries.iter().any(|e| e.item.id() == item_id)
    }

    /// Number of units held of an item (zero if absent).
    pub fn amount_of(&self, item_id: Uuid) -> u32 {
        self.entries
            .iter()
            .find(|e| e.item.id() == item_id)
            .map_or(0, |e| e.amount)
    }

    /// The held item with the given identity.
    pub fn get(&self, item_id: Uuid) -> Option<&Item> {
        self.entries.iter().map(|e| &e.item).find(|item| item.id() == item_id)
    }

    /// First held item whose display name matches `name`, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.entries.iter().map(|e| &e.item).find(|item| item.is_named(name))
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total units across all entries.
    pub fn total_units(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.amount)).sum()
    }

    /// Numbered listing of the ledger, e.g. ` 2) 12x Torch`, with an optional price column.
    pub fn render(&self, owner_name: &str, prices: Option<PriceColumn<'_>>) -> String {
        if self.entries.is_empty() {
            return format!("{owner_name}'s inventory is empty.");
        }
        let index_width = self.entries.len().to_string().len();
        let amount_width = self
            .entries
            .iter()
            .map(|e| e.amount.to_string().len())
            .max()
            .unwrap_or(1);

        let mut listing = format!("{owner_name}'s inventory:");
        for (row, entry) in self.entries.iter().enumerate() {
            let mut line = format!(
                "{:>index_width$}) {:>amount_width$}x {}",
                row + 1,
                entry.amount,
                entry.item.name()
            );
            if let Some(column) = prices {
                let price = entry.item.price.to_string();
                let pad_to = column.width.saturating_sub(price.len());
                let used = line.chars().count();
                // keep at least one leader dot so long names stay readable
                let dots = pad_to.saturating_sub(used).max(1);
                line.push_str(&format!("{}{price} {}/piece", ".".repeat(dots), column.currency));
            }
            listing.push('\n');
            listing.push_str(&line);
        }
        listing
    }

    /// Position of `item`, provided `amount` units could be removed from it.
    fn checked_position(&self, item: &Item, amount: u32) -> Result<usize, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount {
                item: item.internal_key().to_string(),
                amount,
            });
        }
        let index = self
            .entries
            .iter()
            .position(|e| e.item.id() == item.id())
            .ok_or_else(|| LedgerError::ItemNotFound {
                item: item.internal_key().to_string(),
            })?;
        let held = self.entries[index].amount;
        if held < amount {
            return Err(LedgerError::InsufficientQuantity {
                item: item.internal_key().to_string(),
                requested: amount,
                held,
            });
        }
        Ok(index)
    }
}

fn sort_key(item: &Item) -> (&str, Uuid) {
    (item.internal_key(), item.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ItemKind;

    fn item(name: &str, price: u32) -> Item {
        Item::new(ItemKind::Plain, Some(name), None, "test item", price)
    }

    fn keys_in_order(ledger: &Ledger) -> Vec<String> {
        ledger
            .entries()
            .iter()
            .map(|e| e.item.internal_key().to_string())
            .collect()
    }

    #[test]
    fn add_keeps_entries_sorted_by_internal_key() {
        let mut ledger = Ledger::new();
        for name in ["Torch", "Apple", "Rope", "Bread", "Zither", "Map"] {
            ledger.add(&item(name, 1), 1).unwrap();
        }
        assert_eq!(keys_in_order(&ledger), ["apple", "bread", "map", "rope", "torch", "zither"]);
    }

    #[test]
    fn add_merges_amounts_for_same_item() {
        let mut ledger = Ledger::new();
        let torch = item("Torch", 2);
        ledger.add(&torch, 2).unwrap();
        assert_eq!(ledger.add(&torch, 3).unwrap(), 5);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.amount_of(torch.id()), 5);
    }

    #[test]
    fn add_rejects_zero_amount() {
        let mut ledger = Ledger::new();
        let err = ledger.add(&item("Torch", 1), 0).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount { amount: 0, .. }));
        assert!(ledger.is_empty());
    }

    #[test]
    fn add_then_remove_restores_previous_entries() {
        let mut ledger = Ledger::new();
        let rope = item("Rope", 1);
        let torch = item("Torch", 1);
        ledger.add(&rope, 2).unwrap();
        let before = ledger.clone();
        for amount in [1, 4, 9] {
            ledger.add(&torch, amount).unwrap();
            ledger.remove(&torch, amount).unwrap();
            assert_eq!(ledger, before);
            ledger.add(&rope, amount).unwrap();
            ledger.remove(&rope, amount).unwrap();
            assert_eq!(ledger, before);
        }
    }

    #[test]
    fn removing_too_many_changes_nothing() {
        let mut ledger = Ledger::new();
        let torch = item("Torch", 1);
        ledger.add(&torch, 2).unwrap();
        let before = ledger.clone();
        let err = ledger.remove(&torch, 3).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientQuantity {
                item: "torch".into(),
                requested: 3,
                held: 2
            }
        );
        assert_eq!(ledger, before);
        assert_eq!(ledger.total_units(), 2);
    }

    #[test]
    fn removing_last_unit_deletes_entry() {
        let mut ledger = Ledger::new();
        let torch = item("Torch", 1);
        ledger.add(&torch, 2).unwrap();
        assert_eq!(ledger.remove(&torch, 1).unwrap(), 1);
        assert_eq!(ledger.remove(&torch, 1).unwrap(), 0);
        assert!(!ledger.contains(torch.id()));
        assert!(ledger.is_empty());
    }

    #[test]
    fn overflowing_add_is_rejected_without_change() {
        let mut ledger = Ledger::new();
        let sand = item("Sand", 1);
        ledger.add(&sand, u32::MAX - 1).unwrap();
        let before = ledger.clone();
        let err = ledger.add(&sand, 2).unwrap_err();
        assert_eq!(
            err,
            LedgerError::Overflow {
                item: "sand".into(),
                held: u32::MAX - 1,
                amount: 2
            }
        );
        assert_eq!(ledger, before);
        assert_eq!(ledger.add(&sand, 1).unwrap(), u32::MAX);
    }

    #[test]
    fn overflowing_transfer_leaves_both_sides_alone() {
        let sand = item("Sand", 1);
        let mut from = Ledger::new();
        let mut to = Ledger::new();
        from.add(&sand, 5).unwrap();
        to.add(&sand, u32::MAX).unwrap();
        let (from_before, to_before) = (from.clone(), to.clone());
        assert!(matches!(
            from.transfer_to(&mut to, &sand, 1),
            Err(LedgerError::Overflow { .. })
        ));
        assert_eq!(from, from_before);
        assert_eq!(to, to_before);
    }

    #[test]
    fn removing_absent_item_is_not_found() {
        let mut ledger = Ledger::new();
        let err = ledger.remove(&item("Torch", 1), 1).unwrap_err();
        assert!(matches!(err, LedgerError::ItemNotFound { .. }));
    }

    #[test]
    fn item_and_key_with_same_internal_key_stay_separate() {
        let mut ledger = Ledger::new();
        let plain = Item::new(ItemKind::Plain, Some("Crest"), None, "", 1);
        let key = Item::new(ItemKind::Key, Some("Crest"), None, "", 1);
        ledger.add(&plain, 1).unwrap();
        ledger.add(&key, 1).unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn transfer_is_all_or_nothing() {
        let mut from = Ledger::new();
        let mut to = Ledger::new();
        let torch = item("Torch", 1);
        from.add(&torch, 1).unwrap();
        assert!(from.transfer_to(&mut to, &torch, 2).is_err());
        assert_eq!(from.amount_of(torch.id()), 1);
        assert!(to.is_empty());
        from.transfer_to(&mut to, &torch, 1).unwrap();
        assert!(from.is_empty());
        assert_eq!(to.amount_of(torch.id()), 1);
    }

    #[test]
    fn find_by_name_ignores_case() {
        let mut ledger = Ledger::new();
        ledger.add(&item("Brass Lantern", 1), 1).unwrap();
        assert!(ledger.find_by_name("brass lantern").is_some());
        assert!(ledger.find_by_name("lantern").is_none());
    }

    #[test]
    fn render_empty_ledger() {
        assert_eq!(Ledger::new().render("Cook", None), "Cook's inventory is empty.");
    }

    #[test]
    fn render_pads_index_and_amount_columns() {
        let mut ledger = Ledger::new();
        let names = ["A1", "A2", "A3", "A4", "A5", "A6", "A7", "A8", "A9", "B1"];
        for name in names {
            ledger.add(&item(name, 1), 1).unwrap();
        }
        ledger.add(&item("A1", 1), 11).unwrap();
        let listing = ledger.render("Ada", None);
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines[0], "Ada's inventory:");
        assert_eq!(lines[1], " 1) 12x A1");
        assert_eq!(lines[2], " 2)  1x A2");
        assert_eq!(lines[10], "10)  1x B1");
    }

    #[test]
    fn render_right_aligns_prices() {
        let mut ledger = Ledger::new();
        ledger.add(&item("Apple", 1), 3).unwrap();
        ledger.add(&item("Lantern", 15), 1).unwrap();
        let listing = ledger.render(
            "Cook",
            Some(PriceColumn {
                currency: "Gold Coin",
                width: 25,
            }),
        );
        let lines: Vec<&str> = listing.lines().skip(1).collect();
        assert_eq!(lines[0], "1) 3x Apple.............1 Gold Coin/piece");
        assert_eq!(lines[1], "2) 1x Lantern..........15 Gold Coin/piece");
        let end_of_price = |line: &str| line.find(" Gold").unwrap();
        assert_eq!(end_of_price(lines[0]), end_of_price(lines[1]));
    }
}
