//! Session & Ownership Guard
//!
//! Read-only view of the authentication collaborator. The session is
//! passed explicitly into whatever needs it; there is no global singleton.

use serde::{Deserialize, Serialize};

use super::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Authenticated subject as reported by the session collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub role: Role,
}

/// Current session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Session {
    pub authenticated: bool,
    pub user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn logged_in(user: User) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated && self.user.is_some()
    }
}

/// Whether the current session may edit or delete `item`.
///
/// True iff the session is authenticated and the user either owns the item
/// or holds the admin role. Re-evaluate at every decision point; identity
/// and role can change between checks.
pub fn can_mutate(session: &Session, item: &Item) -> bool {
    match (&session.user, session.authenticated) {
        (Some(user), true) => user.id == item.owner_id || user.role == Role::Admin,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemKind;

    fn owned_item(owner_id: u64) -> Item {
        let mut item = Item::new(10, ItemKind::Lost, "Keys");
        item.owner_id = owner_id;
        item
    }

    #[test]
    fn test_anonymous_cannot_mutate() {
        let item = owned_item(1);
        assert!(!can_mutate(&Session::anonymous(), &item));
    }

    #[test]
    fn test_unauthenticated_user_cannot_mutate_own_item() {
        let item = owned_item(1);
        let session = Session {
            authenticated: false,
            user: Some(User { id: 1, role: Role::User }),
        };
        assert!(!can_mutate(&session, &item));
    }

    #[test]
    fn test_owner_can_mutate() {
        let item = owned_item(1);
        let session = Session::logged_in(User { id: 1, role: Role::User });
        assert!(can_mutate(&session, &item));
    }

    #[test]
    fn test_admin_can_mutate_any_item() {
        let item = owned_item(99);
        let session = Session::logged_in(User { id: 1, role: Role::Admin });
        assert!(can_mutate(&session, &item));
    }

    #[test]
    fn test_other_user_cannot_mutate() {
        let item = owned_item(99);
        let session = Session::logged_in(User { id: 1, role: Role::User });
        assert!(!can_mutate(&session, &item));
    }
}
