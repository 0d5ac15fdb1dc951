//! Mutation Inputs
//!
//! Draft and patch shapes accepted by the mutation gateway, with the local
//! validation that runs before any network call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};
use super::item::{ItemKind, ItemStatus};

/// Raw photo payload attached to a create/update.
///
/// Treated as an opaque blob; content is the remote store's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Input for reporting a new item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ItemDraft {
    pub kind: ItemKind,
    pub title: String,
    pub location: String,
    pub contact_info: String,
    pub description: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub photo: Option<PhotoUpload>,
}

impl ItemDraft {
    pub fn new(kind: ItemKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Reject drafts missing a required field, before any round trip.
    pub fn validate(&self) -> DomainResult<()> {
        for (field, value) in [
            ("title", &self.title),
            ("location", &self.location),
            ("contact_info", &self.contact_info),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::ValidationFailed(format!(
                    "{} must not be empty",
                    field
                )));
            }
        }
        Ok(())
    }
}

/// Partial update for an existing item; `None` fields are left untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact_info: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub status: Option<ItemStatus>,
    #[serde(skip)]
    pub photo: Option<PhotoUpload>,
}

impl ItemPatch {
    /// Reject patches that would wipe a required field or carry nothing
    pub fn validate(&self) -> DomainResult<()> {
        if self.is_empty() {
            return Err(DomainError::ValidationFailed(
                "nothing to update".to_string(),
            ));
        }
        for (field, value) in [
            ("title", &self.title),
            ("location", &self.location),
            ("contact_info", &self.contact_info),
        ] {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(DomainError::ValidationFailed(format!(
                        "{} must not be empty",
                        field
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.contact_info.is_none()
            && self.occurred_at.is_none()
            && self.status.is_none()
            && self.photo.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ItemDraft {
        ItemDraft {
            kind: ItemKind::Found,
            title: "Umbrella".to_string(),
            location: "Library, 2nd floor".to_string(),
            contact_info: "0812-000".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_draft_passes() {
        assert!(complete_draft().validate().is_ok());
    }

    #[test]
    fn test_blank_location_rejected() {
        let mut draft = complete_draft();
        draft.location = "   ".to_string();
        match draft.validate() {
            Err(DomainError::ValidationFailed(msg)) => assert!(msg.contains("location")),
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_contact_rejected() {
        let mut draft = complete_draft();
        draft.contact_info.clear();
        assert!(matches!(
            draft.validate(),
            Err(DomainError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_empty_patch_detected() {
        assert!(ItemPatch::default().is_empty());
        let patch = ItemPatch {
            status: Some(ItemStatus::Claimed),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
