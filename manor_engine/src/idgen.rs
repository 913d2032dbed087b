//! ** idgen module **
//! Namespaces and helpers for generating stable v5 uuids for registered entities.
//!
//! Each entity kind gets its own namespace, so an `Item` and a `Key` that share an
//! internal key still receive different identities.
use uuid::Uuid;

pub const NAMESPACE_LOCATION: Uuid = uuid::uuid!("4f0d7c52-8a1e-4a4b-9c53-3f2a6d1b7e01");

pub const NAMESPACE_BARRIER: Uuid = uuid::uuid!("b6a1e3d9-5c27-4f8e-a0d4-91c7e2f36a12");

pub const NAMESPACE_ITEM: Uuid = uuid::uuid!("47d2aad8-22cc-4dd4-bf9f-b9eddc4fe2cf");

pub const NAMESPACE_KEY: Uuid = uuid::uuid!("d3c8f0a7-6b19-4e52-8f3d-2a7b9c1e5f24");

pub const NAMESPACE_CHARACTER: Uuid = uuid::uuid!("99897a5d-4297-4bdc-832e-29df86925063");

pub const NAMESPACE_PLAYER: Uuid = uuid::uuid!("1e5b7a93-0c4d-4d6f-b2e8-7f9a3c6d1b35");

pub const NAMESPACE_CONTAINER: Uuid = uuid::uuid!("8c2f4e61-9d3a-4b7c-a5e0-6b1d8f2c4a46");

/// Generate a v5 UUID for an internal key within the given namespace.
pub fn uuid_from_token(namespace: &Uuid, token: &str) -> Uuid {
    Uuid::new_v5(namespace, token.as_bytes())
}
