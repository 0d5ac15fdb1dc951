//! Return Point Core
//!
//! Item directory and session-gated mutation subsystem of the Return
//! Point lost & found app. Layered architecture:
//! - domain: Core entities, filters, session guard, and business rules
//! - repository: Item store abstractions and the remote REST client
//! - feed: Recent-activity merge of the lost and found streams
//! - controller: Debounced filter/search state machine
//! - commands: Mutation gateway called by the render layer
//!
//! Rendering, routing, and credential handling live outside this crate;
//! they consume the published snapshots and call the gateway.

pub mod commands;
pub mod controller;
pub mod domain;
pub mod feed;
pub mod repository;

pub use controller::{ListHandle, ListPhase, ListSnapshot, SEARCH_DEBOUNCE};
pub use domain::{
    can_mutate, DomainError, DomainResult, Item, ItemDraft, ItemFilter, ItemKind, ItemPatch,
    ItemStatus, KindFilter, PhotoUpload, Role, Session, SortOrder, StatusFilter, User,
};
pub use feed::{merge_recent, recent_feed, RECENT_FEED_CAP};
pub use repository::{ItemMutation, ItemQuery, RemoteItemRepository, ResultSet};
