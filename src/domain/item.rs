//! Item Entity
//!
//! A reported lost or found object. Both kinds live in one collection on
//! the remote store, disambiguated by `kind`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Lost vs. found classification, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Lost,
    Found,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Lost => "lost",
            ItemKind::Found => "found",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "found" => ItemKind::Found,
            _ => ItemKind::Lost,
        }
    }
}

/// Item lifecycle status
///
/// The store's canonical vocabulary is `dicari` / `ditemukan` / `diclaim`.
/// Older records may still carry `open` / `claimed`; those parse as aliases
/// of Searching / Claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ItemStatus {
    /// Still being looked for (`dicari`)
    #[default]
    #[serde(rename = "dicari", alias = "open")]
    Searching,
    /// Located / resolved (`ditemukan`)
    #[serde(rename = "ditemukan")]
    Found,
    /// Returned to its owner (`diclaim`)
    #[serde(rename = "diclaim", alias = "claimed")]
    Claimed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Searching => "dicari",
            ItemStatus::Found => "ditemukan",
            ItemStatus::Claimed => "diclaim",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "ditemukan" => ItemStatus::Found,
            "diclaim" | "claimed" => ItemStatus::Claimed,
            _ => ItemStatus::Searching,
        }
    }
}

/// A reported lost or found item
///
/// Field aliases absorb the wire-shape drift of the remote store
/// (`name`/`title`, `userId`/`user_id`, `date`, `contact`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, shared namespace across both kinds
    pub id: u64,
    /// Lost or found, immutable after creation
    #[serde(rename = "item_type", alias = "type", alias = "kind")]
    pub kind: ItemKind,
    /// Item name
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    /// How to reach the reporter
    #[serde(default, alias = "contact")]
    pub contact_info: String,
    /// When the loss/find happened
    #[serde(default, alias = "date")]
    pub occurred_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: ItemStatus,
    /// Opaque reference to a stored photo, never interpreted here
    #[serde(default)]
    pub photo: Option<String>,
    /// Reporting user, immutable after creation
    #[serde(alias = "userId", alias = "user_id")]
    pub owner_id: u64,
    /// Server-assigned; default sort and feed ranking key
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Create an item with empty free-text fields and epoch timestamps
    pub fn new(id: u64, kind: ItemKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            description: String::new(),
            location: String::new(),
            contact_info: String::new(),
            occurred_at: None,
            status: ItemStatus::default(),
            photo: None,
            owner_id: 0,
            created_at: DateTime::UNIX_EPOCH,
        }
    }
}

impl Entity for Item {
    type Id = u64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(ItemStatus::Searching.as_str(), "dicari");
        assert_eq!(ItemStatus::from_str("ditemukan"), ItemStatus::Found);
        assert_eq!(ItemStatus::from_str("diclaim"), ItemStatus::Claimed);
    }

    #[test]
    fn test_status_legacy_aliases() {
        assert_eq!(ItemStatus::from_str("open"), ItemStatus::Searching);
        assert_eq!(ItemStatus::from_str("claimed"), ItemStatus::Claimed);

        let parsed: ItemStatus = serde_json::from_str("\"open\"").unwrap();
        assert_eq!(parsed, ItemStatus::Searching);
        let parsed: ItemStatus = serde_json::from_str("\"claimed\"").unwrap();
        assert_eq!(parsed, ItemStatus::Claimed);
    }

    #[test]
    fn test_item_wire_aliases() {
        let json = r#"{
            "id": 7,
            "type": "found",
            "name": "Blue backpack",
            "contact": "081234",
            "userId": 42,
            "date": "2024-05-01T08:00:00Z",
            "createdAt": "2024-05-02T10:30:00Z",
            "status": "open"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.kind, ItemKind::Found);
        assert_eq!(item.title, "Blue backpack");
        assert_eq!(item.contact_info, "081234");
        assert_eq!(item.owner_id, 42);
        assert_eq!(item.status, ItemStatus::Searching);
        assert!(item.occurred_at.is_some());
    }

    #[test]
    fn test_item_creation() {
        let item = Item::new(1, ItemKind::Lost, "Wallet");
        assert_eq!(item.id(), 1);
        assert_eq!(item.kind, ItemKind::Lost);
        assert_eq!(item.status, ItemStatus::Searching);
        assert!(item.photo.is_none());
    }
}
