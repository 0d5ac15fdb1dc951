//! Item Mutation Gateway
//!
//! Operation entry points the render layer calls on user action. Each
//! validates locally before touching the store, then delegates. Ownership
//! is checked by the caller with `can_mutate` beforehand; the remote store
//! stays authoritative and may still answer `Forbidden`.

use crate::domain::{DomainResult, Item, ItemDraft, ItemPatch, ItemStatus};
use crate::repository::ItemMutation;

/// Report a new lost or found item.
///
/// Rejects locally (no round trip) when title, location, or contact info
/// is missing. The store assigns `id` and `created_at`; the reporting
/// user becomes the owner.
pub async fn report_item<M: ItemMutation + ?Sized>(
    repo: &M,
    draft: ItemDraft,
) -> DomainResult<Item> {
    draft.validate()?;
    repo.create(&draft).await
}

/// Apply an edit to an existing item
pub async fn update_item<M: ItemMutation + ?Sized>(
    repo: &M,
    id: u64,
    patch: ItemPatch,
) -> DomainResult<Item> {
    patch.validate()?;
    repo.update(id, &patch).await
}

/// Move an item through its lifecycle (searching → found → claimed)
pub async fn change_status<M: ItemMutation + ?Sized>(
    repo: &M,
    id: u64,
    status: ItemStatus,
) -> DomainResult<Item> {
    repo.set_status(id, status).await
}

/// Remove an item. Irreversible; on success the caller must treat the
/// record as gone.
pub async fn delete_item<M: ItemMutation + ?Sized>(repo: &M, id: u64) -> DomainResult<()> {
    repo.delete(id).await
}
