//! In-Memory Item Repository
//!
//! Test implementation of the store contracts. Mirrors the remote store's
//! observable semantics: server-assigned ids and timestamps, kind/status/
//! search filtering, `created_at` ordering, pagination, and ownership
//! enforcement on mutations.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::domain::{
    DomainError, DomainResult, Item, ItemDraft, ItemFilter, ItemKind, ItemPatch, ItemStatus,
    KindFilter, SortOrder, StatusFilter,
};
use super::traits::{ItemMutation, ItemQuery, ResultSet};

pub struct MemoryItemRepository {
    items: Mutex<Vec<Item>>,
    next_id: Mutex<u64>,
    /// Subject all mutations and `my_items` run as
    current_user: u64,
}

impl MemoryItemRepository {
    pub fn new() -> Self {
        Self::with_user(1)
    }

    pub fn with_user(current_user: u64) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            current_user,
        }
    }

    /// Seed a pre-existing record, keeping the id counter consistent
    pub async fn seed(&self, item: Item) {
        let mut next_id = self.next_id.lock().await;
        *next_id = (*next_id).max(item.id + 1);
        self.items.lock().await.push(item);
    }

    /// Deterministic stand-in for a server clock: one second per id
    fn assigned_timestamp(id: u64) -> DateTime<Utc> {
        DateTime::UNIX_EPOCH + Duration::seconds(id as i64)
    }

    fn matches(filter: &ItemFilter, item: &Item) -> bool {
        let kind_ok = match filter.kind {
            KindFilter::All => true,
            KindFilter::Lost => item.kind == ItemKind::Lost,
            KindFilter::Found => item.kind == ItemKind::Found,
        };
        let status_ok = match filter.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => item.status == status,
        };
        let search = filter.search_trimmed().to_lowercase();
        let search_ok = search.is_empty()
            || item.title.to_lowercase().contains(&search)
            || item.description.to_lowercase().contains(&search);
        kind_ok && status_ok && search_ok
    }

    fn select(filter: &ItemFilter, items: &[Item]) -> ResultSet {
        let mut matched: Vec<Item> = items
            .iter()
            .filter(|item| Self::matches(filter, item))
            .cloned()
            .collect();
        matched.sort_by(|a, b| match filter.sort {
            SortOrder::Newest => b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)),
            SortOrder::Oldest => a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)),
        });
        let total = matched.len() as u64;
        if let (Some(page), Some(size)) = (filter.page, filter.page_size) {
            let start = (page.saturating_sub(1) as usize) * size as usize;
            matched = matched.into_iter().skip(start).take(size as usize).collect();
        }
        ResultSet {
            items: matched,
            total: Some(total),
            page: filter.page,
        }
    }

    fn authorize(&self, item: &Item) -> DomainResult<()> {
        if item.owner_id != self.current_user {
            return Err(DomainError::Forbidden(format!(
                "item {} belongs to another user",
                item.id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemQuery for MemoryItemRepository {
    async fn query(&self, filter: &ItemFilter) -> DomainResult<ResultSet> {
        let items = self.items.lock().await;
        Ok(Self::select(filter, &items))
    }

    async fn get(&self, id: u64) -> DomainResult<Option<Item>> {
        let items = self.items.lock().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn my_items(&self, filter: &ItemFilter) -> DomainResult<ResultSet> {
        let items = self.items.lock().await;
        let mine: Vec<Item> = items
            .iter()
            .filter(|item| item.owner_id == self.current_user)
            .cloned()
            .collect();
        Ok(Self::select(filter, &mine))
    }
}

#[async_trait]
impl ItemMutation for MemoryItemRepository {
    async fn create(&self, draft: &ItemDraft) -> DomainResult<Item> {
        let mut next_id = self.next_id.lock().await;
        let id = *next_id;
        *next_id += 1;

        let created_at = Self::assigned_timestamp(id);
        let item = Item {
            id,
            kind: draft.kind,
            title: draft.title.trim().to_string(),
            description: draft
                .description
                .clone()
                .unwrap_or_else(|| "No description provided".to_string()),
            location: draft.location.trim().to_string(),
            contact_info: draft.contact_info.trim().to_string(),
            occurred_at: Some(draft.occurred_at.unwrap_or(created_at)),
            status: ItemStatus::default(),
            photo: draft.photo.as_ref().map(|p| p.file_name.clone()),
            owner_id: self.current_user,
            created_at,
        };
        self.items.lock().await.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: u64, patch: &ItemPatch) -> DomainResult<Item> {
        let mut items = self.items.lock().await;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("item {} not found", id)))?;
        self.authorize(item)?;
        apply_patch(item, patch);
        Ok(item.clone())
    }

    async fn set_status(&self, id: u64, status: ItemStatus) -> DomainResult<Item> {
        let mut items = self.items.lock().await;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("item {} not found", id)))?;
        self.authorize(item)?;
        item.status = status;
        Ok(item.clone())
    }

    async fn delete(&self, id: u64) -> DomainResult<()> {
        let mut items = self.items.lock().await;
        let item = items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("item {} not found", id)))?;
        self.authorize(item)?;
        items.retain(|item| item.id != id);
        Ok(())
    }
}

fn apply_patch(item: &mut Item, patch: &ItemPatch) {
    if let Some(title) = &patch.title {
        item.title = title.clone();
    }
    if let Some(description) = &patch.description {
        item.description = description.clone();
    }
    if let Some(location) = &patch.location {
        item.location = location.clone();
    }
    if let Some(contact_info) = &patch.contact_info {
        item.contact_info = contact_info.clone();
    }
    if let Some(occurred_at) = patch.occurred_at {
        item.occurred_at = Some(occurred_at);
    }
    if let Some(status) = patch.status {
        item.status = status;
    }
    if let Some(photo) = &patch.photo {
        item.photo = Some(photo.file_name.clone());
    }
}
