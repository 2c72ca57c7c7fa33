//! # Integration Test Support
//!
//! In-memory implementations of the persistence ports, backing the scenario
//! tests in `tests/`. They imitate a document store: whole aggregates in,
//! whole aggregates out.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use domains::models::Thread;
use domains::traits::{ThreadRepo, UserRepo};
use services::ThreadService;
use uuid::Uuid;

/// Whole-aggregate store keyed by thread id.
#[derive(Default)]
pub struct InMemoryThreadRepo {
    threads: Mutex<HashMap<Uuid, Thread>>,
}

impl InMemoryThreadRepo {
    /// Direct read for assertions, bypassing the service.
    pub fn stored(&self, id: Uuid) -> Option<Thread> {
        self.threads.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl ThreadRepo for InMemoryThreadRepo {
    async fn get_thread(&self, id: Uuid) -> anyhow::Result<Option<Thread>> {
        Ok(self.threads.lock().unwrap().get(&id).cloned())
    }

    async fn save_thread(&self, thread: &Thread) -> anyhow::Result<()> {
        self.threads
            .lock()
            .unwrap()
            .insert(thread.id, thread.clone());
        Ok(())
    }

    async fn delete_thread(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.threads.lock().unwrap().remove(&id).is_some())
    }
}

/// Reputation projections keyed by user id.
#[derive(Default)]
pub struct InMemoryUserRepo {
    reputations: Mutex<HashMap<Uuid, u32>>,
}

impl InMemoryUserRepo {
    pub fn reputation_of(&self, user: Uuid) -> Option<u32> {
        self.reputations.lock().unwrap().get(&user).copied()
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn set_reputation(&self, user: Uuid, reputation: u32) -> anyhow::Result<()> {
        self.reputations.lock().unwrap().insert(user, reputation);
        Ok(())
    }
}

/// Wires a [`ThreadService`] to fresh in-memory ports and returns all three.
pub fn fresh_service() -> (
    ThreadService,
    Arc<InMemoryThreadRepo>,
    Arc<InMemoryUserRepo>,
) {
    let threads = Arc::new(InMemoryThreadRepo::default());
    let users = Arc::new(InMemoryUserRepo::default());
    let service = ThreadService::new(threads.clone(), users.clone());
    (service, threads, users)
}
