//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for item access.
//! Implementations can use the remote REST store, in-memory, etc.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainResult, Item, ItemDraft, ItemFilter, ItemPatch, ItemStatus};

/// Normalized, paginated outcome of a query against the item store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ResultSet {
    pub items: Vec<Item>,
    /// Total matching records, when the store reports it
    pub total: Option<u64>,
    pub page: Option<u32>,
}

impl ResultSet {
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            items,
            total: None,
            page: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Read side of the item store
#[async_trait]
pub trait ItemQuery: Send + Sync {
    /// Retrieve items matching `filter`
    async fn query(&self, filter: &ItemFilter) -> DomainResult<ResultSet>;

    /// Fetch a single item; `None` when it does not exist
    async fn get(&self, id: u64) -> DomainResult<Option<Item>>;

    /// Retrieve the current user's own reports
    async fn my_items(&self, filter: &ItemFilter) -> DomainResult<ResultSet>;
}

/// Write side of the item store.
///
/// Ownership checks are the caller's responsibility (`can_mutate`); the
/// remote store stays authoritative and may still answer `Forbidden`.
#[async_trait]
pub trait ItemMutation: Send + Sync {
    /// Create a new item; the store assigns `id` and `created_at`
    async fn create(&self, draft: &ItemDraft) -> DomainResult<Item>;

    /// Apply a partial update to an existing item
    async fn update(&self, id: u64, patch: &ItemPatch) -> DomainResult<Item>;

    /// Move an item through its lifecycle
    async fn set_status(&self, id: u64, status: ItemStatus) -> DomainResult<Item>;

    /// Remove an item. Terminal; there is no soft delete.
    async fn delete(&self, id: u64) -> DomainResult<()>;
}
