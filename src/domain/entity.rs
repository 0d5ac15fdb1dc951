//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Every failure surfaced to a caller falls into one of these buckets:
/// - `ValidationFailed`: rejected locally, before any network traffic
/// - `FetchFailed`: network failure, malformed payload, or a generic
///   remote 4xx/5xx
/// - `Forbidden`: the remote store rejected a mutation the local guard
///   allowed
/// - `NotFound`: the target record does not exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainError {
    ValidationFailed(String),
    FetchFailed(String),
    Forbidden(String),
    NotFound(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::ValidationFailed(msg) => write!(f, "Validation failed: {}", msg),
            DomainError::FetchFailed(msg) => write!(f, "Fetch failed: {}", msg),
            DomainError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
