//! # Domain Models
//!
//! These structs represent the core entities of Rusty-Forum.
//! We use UUID v7 for time-ordered, globally unique identification.
//!
//! A `Thread` is the aggregate root: its reply tree and vote sets are
//! embedded in the document and load/persist as one unit. Callers mutate
//! the aggregate in memory and hand it back to a `ThreadRepo` whole.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Maximum number of tags attached to a single thread.
pub const MAX_THREAD_TAGS: usize = 5;
/// Maximum thread title length, in characters.
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum thread body length, in characters.
pub const MAX_CONTENT_LEN: usize = 10_000;
/// Maximum reply body length, in characters.
pub const MAX_REPLY_LEN: usize = 5_000;

/// The two stances a user can take on a votable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Upvote,
    Downvote,
}

/// One user's vote on one votable entity (a thread or a reply).
///
/// Vote sets hold at most one entry per user; `services` enforces the
/// toggle/switch rules when applying a vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub user: Uuid,
    pub kind: VoteKind,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(user: Uuid, kind: VoteKind) -> Self {
        Self {
            user,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// Net score of a vote set: upvotes minus downvotes. May be negative.
pub fn net_score(votes: &[Vote]) -> i64 {
    votes
        .iter()
        .map(|v| match v.kind {
            VoteKind::Upvote => 1,
            VoteKind::Downvote => -1,
        })
        .sum()
}

/// A single reply node. Replies nest to arbitrary depth: each node owns
/// an ordered list of children of its own type, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: Uuid,
    pub content: String,
    pub author: Uuid,
    /// `None` for top-level replies attached directly to the thread.
    pub parent_reply: Option<Uuid>,
    pub votes: Vec<Vote>,
    pub replies: Vec<Reply>,
    pub is_edited: bool,
    pub edited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Reply {
    /// Builds a new leaf reply. Fails `Validation` if the body exceeds
    /// [`MAX_REPLY_LEN`].
    pub fn new(author: Uuid, content: String, parent_reply: Option<Uuid>) -> Result<Self> {
        if content.chars().count() > MAX_REPLY_LEN {
            return Err(AppError::Validation(format!(
                "reply body exceeds {MAX_REPLY_LEN} characters"
            )));
        }
        Ok(Self {
            id: Uuid::now_v7(),
            content,
            author,
            parent_reply,
            votes: Vec::new(),
            replies: Vec::new(),
            is_edited: false,
            edited_at: None,
            created_at: Utc::now(),
        })
    }

    /// Net vote score for this reply alone.
    pub fn score(&self) -> i64 {
        net_score(&self.votes)
    }
}

/// The aggregate root: a discussion thread with its embedded reply tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Uuid,
    pub category: Uuid,
    /// Bounded set of tag references, at most [`MAX_THREAD_TAGS`].
    pub tags: Vec<Uuid>,
    /// Top-level replies in display order (insertion order, oldest first).
    pub replies: Vec<Reply>,
    pub votes: Vec<Vote>,
    pub views: u64,
    pub is_pinned: bool,
    /// A locked thread accepts no new replies.
    pub is_locked: bool,
    pub is_edited: bool,
    pub edited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Thread {
    /// Builds a fresh thread with no replies or votes yet.
    /// Fails `Validation` on any violated bound (title/body length, tag cap).
    pub fn new(
        author: Uuid,
        category: Uuid,
        title: String,
        content: String,
        tags: Vec<Uuid>,
    ) -> Result<Self> {
        let now = Utc::now();
        let mut thread = Self {
            id: Uuid::now_v7(),
            title: String::new(),
            content: String::new(),
            author,
            category,
            tags: Vec::new(),
            replies: Vec::new(),
            votes: Vec::new(),
            views: 0,
            is_pinned: false,
            is_locked: false,
            is_edited: false,
            edited_at: None,
            created_at: now,
            updated_at: now,
        };
        thread.set_title(title)?;
        thread.set_content(content)?;
        thread.set_tags(tags)?;
        Ok(thread)
    }

    /// Replaces the title, enforcing [`MAX_TITLE_LEN`].
    pub fn set_title(&mut self, title: String) -> Result<()> {
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(AppError::Validation(format!(
                "title exceeds {MAX_TITLE_LEN} characters"
            )));
        }
        self.title = title;
        Ok(())
    }

    /// Replaces the body, enforcing [`MAX_CONTENT_LEN`].
    pub fn set_content(&mut self, content: String) -> Result<()> {
        if content.chars().count() > MAX_CONTENT_LEN {
            return Err(AppError::Validation(format!(
                "body exceeds {MAX_CONTENT_LEN} characters"
            )));
        }
        self.content = content;
        Ok(())
    }

    /// Replaces the tag set, enforcing [`MAX_THREAD_TAGS`].
    pub fn set_tags(&mut self, tags: Vec<Uuid>) -> Result<()> {
        if tags.len() > MAX_THREAD_TAGS {
            return Err(AppError::Validation(format!(
                "a thread carries at most {MAX_THREAD_TAGS} tags"
            )));
        }
        self.tags = tags;
        Ok(())
    }

    /// Net vote score for the thread itself (reply votes not included).
    pub fn score(&self) -> i64 {
        net_score(&self.votes)
    }

    /// Total reply count across the whole tree, all depths included.
    pub fn reply_count(&self) -> usize {
        fn count(replies: &[Reply]) -> usize {
            replies.iter().map(|r| 1 + count(&r.replies)).sum()
        }
        count(&self.replies)
    }
}
