use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Internal key used to cross-reference definitions inside a scenario file.
pub type Id = String;

/// Placeholder some scenario files use instead of a JSON `null` location.
pub const NO_LOCATION: &str = "None";

/// Top-level scenario document, keyed by component kind and then by internal key.
///
/// Maps are ordered by internal key, which is also the order in which the engine
/// registers the entries of each kind.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScenarioDef {
    #[serde(rename = "Item", default)]
    pub items: BTreeMap<Id, ItemDef>,
    #[serde(rename = "Key", default)]
    pub keys: BTreeMap<Id, KeyDef>,
    #[serde(rename = "Door", default)]
    pub doors: BTreeMap<Id, DoorDef>,
    #[serde(rename = "Barrier", default)]
    pub barriers: BTreeMap<Id, BarrierDef>,
    #[serde(rename = "Location", default)]
    pub locations: BTreeMap<Id, LocationDef>,
    #[serde(rename = "Character", default)]
    pub characters: BTreeMap<Id, CharacterDef>,
    #[serde(rename = "Player", default)]
    pub players: BTreeMap<Id, PlayerDef>,
    #[serde(rename = "Container", default)]
    pub containers: BTreeMap<Id, ContainerDef>,
}

fn default_price() -> u32 {
    1
}

/// A plain item that can lie around, be carried, or be sold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub name: String,
    pub description: String,
    #[serde(default = "default_price")]
    pub price: u32,
}

/// An item that opens one or more locks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyDef {
    pub name: String,
    pub description: String,
    #[serde(default = "default_price")]
    pub price: u32,
}

/// A wall segment with a lock. `key` names the key item, or `None` for a door that is never locked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorDef {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub key: Option<Id>,
}

/// An impassable wall segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarrierDef {
    #[serde(default)]
    pub name: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationDef {
    pub name: String,
    pub description: String,
    /// Start of the sentence that lists the items lying in the location.
    #[serde(default)]
    pub inv_description: String,
    #[serde(default)]
    pub north_wall: Option<Id>,
    #[serde(default)]
    pub south_wall: Option<Id>,
    #[serde(default)]
    pub west_wall: Option<Id>,
    #[serde(default)]
    pub east_wall: Option<Id>,
    #[serde(default)]
    pub inventory: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDef {
    pub name: String,
    pub description: String,
    /// Line spoken when the player talks to this character.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default)]
    pub location: Option<Id>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDef {
    /// Usually replaced by the name the player picks at startup.
    #[serde(default)]
    pub name: Option<String>,
    pub description: String,
    #[serde(default)]
    pub money: u32,
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default)]
    pub location: Option<Id>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerDef {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub key: Option<Id>,
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default)]
    pub location: Option<Id>,
}

/// Normalize a `location` field: `null`, `"None"` and blank strings all mean "nowhere".
pub fn placement(raw: Option<&Id>) -> Option<&str> {
    raw.map(|loc| loc.trim())
        .filter(|loc| !loc.is_empty() && *loc != NO_LOCATION)
}

/// One entry of an `inventory` list: an item's internal key with an optional
/// parenthesized repetition count, e.g. `"torch"` or `"torch(3)"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockToken {
    pub item: Id,
    pub amount: u32,
}

/// Reasons a stock token cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockTokenError {
    MissingItem(String),
    BadAmount(String),
    ZeroAmount(String),
}

impl fmt::Display for StockTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockTokenError::MissingItem(raw) => write!(f, "stock token '{raw}' names no item"),
            StockTokenError::BadAmount(raw) => write!(f, "stock token '{raw}' has an unreadable amount"),
            StockTokenError::ZeroAmount(raw) => write!(f, "stock token '{raw}' must stock at least one unit"),
        }
    }
}

impl std::error::Error for StockTokenError {}

impl FromStr for StockToken {
    type Err = StockTokenError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let (item, amount) = match trimmed.split_once('(') {
            Some((item, rest)) => {
                let count = rest
                    .strip_suffix(')')
                    .ok_or_else(|| StockTokenError::BadAmount(raw.to_string()))?
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| StockTokenError::BadAmount(raw.to_string()))?;
                (item.trim(), count)
            },
            None => (trimmed, 1),
        };
        if item.is_empty() {
            return Err(StockTokenError::MissingItem(raw.to_string()));
        }
        if amount == 0 {
            return Err(StockTokenError::ZeroAmount(raw.to_string()));
        }
        Ok(StockToken {
            item: item.to_string(),
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_token_stocks_one_unit() {
        let token: StockToken = "torch".parse().unwrap();
        assert_eq!(token.item, "torch");
        assert_eq!(token.amount, 1);
    }

    #[test]
    fn counted_token_stocks_many_units() {
        let token: StockToken = "torch(3)".parse().unwrap();
        assert_eq!(token.item, "torch");
        assert_eq!(token.amount, 3);
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(matches!("torch(x)".parse::<StockToken>(), Err(StockTokenError::BadAmount(_))));
        assert!(matches!("torch(3".parse::<StockToken>(), Err(StockTokenError::BadAmount(_))));
        assert!(matches!("(2)".parse::<StockToken>(), Err(StockTokenError::MissingItem(_))));
        assert!(matches!("torch(0)".parse::<StockToken>(), Err(StockTokenError::ZeroAmount(_))));
    }

    #[test]
    fn placement_treats_none_sentinel_as_nowhere() {
        assert_eq!(placement(Some(&"None".to_string())), None);
        assert_eq!(placement(Some(&"  ".to_string())), None);
        assert_eq!(placement(None), None);
        assert_eq!(placement(Some(&"hall".to_string())), Some("hall"));
    }

    #[test]
    fn scenario_reads_kind_keyed_json() {
        let json = r#"{
            "Item": { "coin": { "name": "Coin", "description": "Shiny.", "price": 2 } },
            "Key": { "brass_key": { "name": "Brass Key", "description": "Small." } },
            "Location": { "hall": { "name": "Hall", "description": "Big.", "north_wall": "oak_door" } }
        }"#;
        let def: ScenarioDef = serde_json::from_str(json).unwrap();
        assert_eq!(def.items["coin"].price, 2);
        assert_eq!(def.keys["brass_key"].price, 1);
        assert_eq!(def.locations["hall"].north_wall.as_deref(), Some("oak_door"));
        assert!(def.locations["hall"].south_wall.is_none());
        assert!(def.players.is_empty());
    }
}
