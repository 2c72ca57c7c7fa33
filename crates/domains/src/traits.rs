//! # Core Traits (Ports)
//!
//! Persistence seams the host application implements. The core never talks
//! to a database directly: it receives a fully materialized aggregate, works
//! on it in memory, and hands it back through these traits.
//!
//! Implementations are expected to write the aggregate back atomically
//! (conditional update or per-thread serialization); the core's operations
//! are deterministic over their input so they are safe to retry.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Thread;

/// Storage contract for thread aggregates.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ThreadRepo: Send + Sync {
    /// Loads the full aggregate (thread, reply tree, votes) by id.
    async fn get_thread(&self, id: Uuid) -> anyhow::Result<Option<Thread>>;

    /// Persists the whole aggregate back, replacing the stored copy.
    async fn save_thread(&self, thread: &Thread) -> anyhow::Result<()>;

    /// Removes the aggregate. Returns `false` when no such thread existed.
    async fn delete_thread(&self, id: Uuid) -> anyhow::Result<bool>;
}

/// Storage contract for the slice of the user record this core touches.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Overwrites a user's derived reputation score. Reputation is a
    /// projection recomputed from vote sets, never adjusted incrementally.
    async fn set_reputation(&self, user: Uuid, reputation: u32) -> anyhow::Result<()>;
}
