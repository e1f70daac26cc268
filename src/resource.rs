//! Resources - server-owned records mirrored by the client-side stores.

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that a `ResourceStore` can cache.
///
/// Usually implemented with `#[derive(Resource)]`.
pub trait Resource: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static {
    /// The collection name for this resource type (e.g., "listings", "rooms").
    /// Used in logs and notices.
    const COLLECTION: &'static str;

    /// Returns the identity used to match items on update and delete.
    fn id(&self) -> &str;
}

/// Replace the item whose identity matches `item`, keeping every other entry in place.
///
/// Returns `false` when no entry has that identity (the collection is left untouched).
pub(crate) fn replace_by_id<M: Resource>(items: &mut [M], item: M) -> bool {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(slot) => {
            *slot = item;
            true
        }
        None => false,
    }
}

/// Remove the item with the given identity, preserving the order of the remainder.
pub(crate) fn remove_by_id<M: Resource>(items: &mut Vec<M>, id: &str) -> bool {
    let before = items.len();
    items.retain(|existing| existing.id() != id);
    items.len() != before
}
