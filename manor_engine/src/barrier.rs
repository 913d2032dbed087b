//! Barrier module
//!
//! Every side of a location is closed off by a [`Barrier`]. A plain barrier is just a wall;
//! a door is a barrier that carries a [`Lock`] and can be walked through once unlocked.
//! Containers reuse the same [`Lock`] type.

use log::info;
use uuid::Uuid;
use variantly::Variantly;

use crate::entity::{Entity, Identity};
use crate::idgen::NAMESPACE_BARRIER;
use crate::{Item, ItemKind};

/// Lock state of a door or a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lock {
    required_key: Option<Uuid>,
    unlocked: bool,
}

impl Lock {
    /// A lock without a required key starts (and stays) unlocked.
    pub fn new(required_key: Option<Uuid>) -> Self {
        Self {
            required_key,
            unlocked: required_key.is_none(),
        }
    }

    pub fn required_key(&self) -> Option<Uuid> {
        self.required_key
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Try to unlock with `key`. Once unlocked, a lock never locks again.
    pub fn unlock(&mut self, key: &Item) -> UnlockOutcome {
        if self.unlocked {
            return UnlockOutcome::AlreadyUnlocked;
        }
        if key.kind() == ItemKind::Key && self.required_key == Some(key.id()) {
            self.unlocked = true;
            UnlockOutcome::Unlocked
        } else {
            UnlockOutcome::WrongKey
        }
    }
}

/// Result of an unlock attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Variantly)]
pub enum UnlockOutcome {
    AlreadyUnlocked,
    Unlocked,
    WrongKey,
}

impl UnlockOutcome {
    /// Player-facing report for an unlock attempt on `target` using `key`.
    pub fn report(self, target: &str, key: &str) -> String {
        match self {
            UnlockOutcome::AlreadyUnlocked => format!("{target} is already unlocked."),
            UnlockOutcome::Unlocked => format!("{target} has been unlocked with the {key}."),
            UnlockOutcome::WrongKey => format!("The {key} does not fit. {target} stays locked."),
        }
    }
}

/// A wall, or a door when it has a lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barrier {
    identity: Identity,
    lock: Option<Lock>,
}

impl Entity for Barrier {
    fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl Barrier {
    /// A plain, impassable barrier.
    pub fn wall(name: Option<&str>, internal_key: Option<&str>, description: &str) -> Self {
        Self {
            identity: Identity::new(&NAMESPACE_BARRIER, name, internal_key, description),
            lock: None,
        }
    }

    /// A door, locked if `required_key` is given.
    pub fn door(name: &str, internal_key: Option<&str>, description: &str, required_key: Option<Uuid>) -> Self {
        Self {
            identity: Identity::new(&NAMESPACE_BARRIER, Some(name), internal_key, description),
            lock: Some(Lock::new(required_key)),
        }
    }

    pub fn is_door(&self) -> bool {
        self.lock.is_some()
    }

    pub fn lock(&self) -> Option<&Lock> {
        self.lock.as_ref()
    }

    /// True only for doors that have been unlocked (or never needed a key).
    pub fn is_unlocked(&self) -> bool {
        self.lock.is_some_and(|lock| lock.is_unlocked())
    }

    /// Try to unlock the door with `key`. Plain walls have nothing to unlock and return `None`.
    pub fn unlock(&mut self, key: &Item) -> Option<UnlockOutcome> {
        let name = self.identity.name.clone();
        let lock = self.lock.as_mut()?;
        let outcome = lock.unlock(key);
        info!("unlock door '{name}' with '{}': {outcome:?}", key.internal_key());
        Some(outcome)
    }
}
