//! Identity fields shared by every game object.
//!
//! Every location, barrier and component carries an [`Identity`]: a display name, an
//! internal key and a description. The internal key is fixed at creation and is what
//! the registry, the ledgers and the locks use to tell objects apart.

use uuid::Uuid;

use crate::idgen::uuid_from_token;

/// Display name given to objects created without one.
pub const UNNAMED: &str = "unnamed object";

/// Common identity of a game object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: Uuid,
    internal_key: String,
    pub name: String,
    pub description: String,
}

impl Identity {
    /// Create an identity in the given kind namespace.
    ///
    /// A missing name becomes [`UNNAMED`]; a missing internal key is derived from the name.
    pub fn new(namespace: &Uuid, name: Option<&str>, internal_key: Option<&str>, description: &str) -> Self {
        let name = name.unwrap_or(UNNAMED).to_string();
        let internal_key = internal_key.map_or_else(|| derive_internal_key(&name), str::to_string);
        Self {
            id: uuid_from_token(namespace, &internal_key),
            internal_key,
            name,
            description: description.to_string(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn internal_key(&self) -> &str {
        &self.internal_key
    }
}

/// Lowercase the display name and replace spaces with underscores.
pub fn derive_internal_key(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Methods common to any object in the world.
pub trait Entity {
    fn identity(&self) -> &Identity;

    fn id(&self) -> Uuid {
        self.identity().id()
    }
    fn internal_key(&self) -> &str {
        self.identity().internal_key()
    }
    fn name(&self) -> &str {
        &self.identity().name
    }
    fn description(&self) -> &str {
        &self.identity().description
    }
    /// Case-insensitive exact match against the display name.
    fn is_named(&self, query: &str) -> bool {
        self.name().to_lowercase() == query.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idgen::NAMESPACE_ITEM;

    #[test]
    fn internal_key_is_derived_from_name() {
        let identity = Identity::new(&NAMESPACE_ITEM, Some("Rusty Old Key"), None, "");
        assert_eq!(identity.internal_key(), "rusty_old_key");
    }

    #[test]
    fn explicit_internal_key_wins() {
        let identity = Identity::new(&NAMESPACE_ITEM, Some("Lantern"), Some("lamp_1"), "");
        assert_eq!(identity.internal_key(), "lamp_1");
    }

    #[test]
    fn missing_name_gets_placeholder() {
        let identity = Identity::new(&NAMESPACE_ITEM, None, None, "");
        assert_eq!(identity.name, UNNAMED);
        assert_eq!(identity.internal_key(), "unnamed_object");
    }

    #[test]
    fn id_follows_internal_key_not_name() {
        let a = Identity::new(&NAMESPACE_ITEM, Some("Lamp"), Some("lamp"), "");
        let b = Identity::new(&NAMESPACE_ITEM, Some("Other Lamp"), Some("lamp"), "");
        assert_eq!(a.id(), b.id());
    }
}
