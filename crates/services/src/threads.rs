//! # Thread Service
//!
//! Every operation loads the thread through [`ThreadRepo`] and runs the pure
//! engine functions against the in-memory aggregate before writing it back
//! whole. Authentication happens upstream: `requester` ids and the
//! `is_privileged` flag arrive pre-resolved and are trusted here.

use std::sync::Arc;

use chrono::Utc;
use domains::error::{AppError, Result};
use domains::models::{net_score, Reply, Thread, VoteKind};
use domains::traits::{ThreadRepo, UserRepo};
use uuid::Uuid;

use crate::reply_tree;
use crate::votes::{self, VoteOutcome};

/// Partial update for a thread; `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct ThreadPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub pinned: Option<bool>,
    pub locked: Option<bool>,
}

pub struct ThreadService {
    threads: Arc<dyn ThreadRepo>,
    users: Arc<dyn UserRepo>,
}

fn internal(err: anyhow::Error) -> AppError {
    AppError::Internal(err.to_string())
}

impl ThreadService {
    pub fn new(threads: Arc<dyn ThreadRepo>, users: Arc<dyn UserRepo>) -> Self {
        Self { threads, users }
    }

    async fn load(&self, id: Uuid) -> Result<Thread> {
        self.threads
            .get_thread(id)
            .await
            .map_err(internal)?
            .ok_or(AppError::NotFound("thread", id))
    }

    async fn save(&self, thread: &Thread) -> Result<()> {
        self.threads.save_thread(thread).await.map_err(internal)
    }

    /// Creates a new thread aggregate and persists it.
    #[tracing::instrument(skip(self, title, content, tags))]
    pub async fn create_thread(
        &self,
        author: Uuid,
        category: Uuid,
        title: String,
        content: String,
        tags: Vec<Uuid>,
    ) -> Result<Thread> {
        let thread = Thread::new(author, category, title, content, tags)?;
        self.save(&thread).await?;
        tracing::info!(thread = %thread.id, "thread created");
        Ok(thread)
    }

    /// Loads a thread for display, counting the view.
    pub async fn fetch_thread(&self, id: Uuid) -> Result<Thread> {
        let mut thread = self.load(id).await?;
        thread.views += 1;
        self.save(&thread).await?;
        Ok(thread)
    }

    /// Applies a partial update. Only the author or a privileged identity may
    /// edit; title/body changes mark the thread edited, flag flips do not.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_thread(
        &self,
        id: Uuid,
        requester: Uuid,
        is_privileged: bool,
        patch: ThreadPatch,
    ) -> Result<Thread> {
        let mut thread = self.load(id).await?;
        if thread.author != requester && !is_privileged {
            return Err(AppError::Forbidden(
                "only the author or a moderator may edit a thread".to_string(),
            ));
        }

        let rewrites = patch.title.is_some() || patch.content.is_some();
        if let Some(title) = patch.title {
            thread.set_title(title)?;
        }
        if let Some(content) = patch.content {
            thread.set_content(content)?;
        }
        if let Some(pinned) = patch.pinned {
            thread.is_pinned = pinned;
        }
        if let Some(locked) = patch.locked {
            thread.is_locked = locked;
        }
        if rewrites {
            thread.is_edited = true;
            thread.edited_at = Some(Utc::now());
        }
        thread.updated_at = Utc::now();

        self.save(&thread).await?;
        Ok(thread)
    }

    /// Deletes a whole aggregate, replies and votes included.
    #[tracing::instrument(skip(self))]
    pub async fn delete_thread(
        &self,
        id: Uuid,
        requester: Uuid,
        is_privileged: bool,
    ) -> Result<()> {
        let thread = self.load(id).await?;
        if thread.author != requester && !is_privileged {
            return Err(AppError::Forbidden(
                "only the author or a moderator may delete a thread".to_string(),
            ));
        }
        let deleted = self.threads.delete_thread(id).await.map_err(internal)?;
        if !deleted {
            return Err(AppError::NotFound("thread", id));
        }
        tracing::info!(thread = %id, "thread deleted");
        Ok(())
    }

    /// Attaches a reply, top-level or under `parent_id` at any depth.
    /// Locked threads accept no replies.
    #[tracing::instrument(skip(self, content))]
    pub async fn add_reply(
        &self,
        thread_id: Uuid,
        author: Uuid,
        content: String,
        parent_id: Option<Uuid>,
    ) -> Result<Thread> {
        let mut thread = self.load(thread_id).await?;
        if thread.is_locked {
            return Err(AppError::Forbidden("thread is locked".to_string()));
        }
        let reply = Reply::new(author, content, parent_id)?;
        reply_tree::insert(&mut thread.replies, parent_id, reply)?;
        thread.updated_at = Utc::now();
        self.save(&thread).await?;
        Ok(thread)
    }

    /// Rewrites a reply body; author only.
    #[tracing::instrument(skip(self, content))]
    pub async fn edit_reply(
        &self,
        thread_id: Uuid,
        reply_id: Uuid,
        editor: Uuid,
        content: String,
    ) -> Result<Thread> {
        let mut thread = self.load(thread_id).await?;
        reply_tree::update(&mut thread.replies, reply_id, content, editor)?;
        thread.updated_at = Utc::now();
        self.save(&thread).await?;
        Ok(thread)
    }

    /// Removes a reply and its whole subtree; author or privileged.
    #[tracing::instrument(skip(self))]
    pub async fn delete_reply(
        &self,
        thread_id: Uuid,
        reply_id: Uuid,
        requester: Uuid,
        is_privileged: bool,
    ) -> Result<Thread> {
        let mut thread = self.load(thread_id).await?;
        reply_tree::remove(&mut thread.replies, reply_id, requester, is_privileged)?;
        thread.updated_at = Utc::now();
        self.save(&thread).await?;
        Ok(thread)
    }

    /// Votes on the thread itself, then recomputes the author's reputation
    /// from this thread's vote set and writes it through.
    #[tracing::instrument(skip(self))]
    pub async fn vote_thread(
        &self,
        thread_id: Uuid,
        voter: Uuid,
        kind: VoteKind,
    ) -> Result<VoteOutcome> {
        let mut thread = self.load(thread_id).await?;
        let user_vote = votes::apply_vote(&mut thread.votes, voter, kind);
        let score = net_score(&thread.votes);
        self.save(&thread).await?;

        self.users
            .set_reputation(thread.author, votes::reputation_for(score))
            .await
            .map_err(internal)?;

        Ok(VoteOutcome { score, user_vote })
    }

    /// Votes on one reply. Reply votes do not feed reputation.
    #[tracing::instrument(skip(self))]
    pub async fn vote_reply(
        &self,
        thread_id: Uuid,
        reply_id: Uuid,
        voter: Uuid,
        kind: VoteKind,
    ) -> Result<VoteOutcome> {
        let mut thread = self.load(thread_id).await?;
        let outcome = votes::vote_reply(&mut thread.replies, reply_id, voter, kind)?;
        self.save(&thread).await?;
        Ok(outcome)
    }
}
