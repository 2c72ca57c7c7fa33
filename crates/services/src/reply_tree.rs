//! # Reply Tree Engine
//!
//! Mutation of the nested reply structure embedded in a thread aggregate.
//! Replies nest to arbitrary depth, so every operation locates its target
//! with a depth-first search by id; the caller never supplies a path.
//!
//! All operations either fully apply or leave the tree untouched. Authorship
//! checks run against the matched node only; a node that merely sits on the
//! search path can never cause a `Forbidden`.

use chrono::Utc;
use domains::error::{AppError, Result};
use domains::models::Reply;
use uuid::Uuid;

/// Depth-first lookup of a reply at any depth.
pub fn find(replies: &[Reply], reply_id: Uuid) -> Option<&Reply> {
    for reply in replies {
        if reply.id == reply_id {
            return Some(reply);
        }
        if let Some(found) = find(&reply.replies, reply_id) {
            return Some(found);
        }
    }
    None
}

/// Depth-first lookup of a reply at any depth, mutable.
pub fn find_mut(replies: &mut [Reply], reply_id: Uuid) -> Option<&mut Reply> {
    for reply in replies.iter_mut() {
        if reply.id == reply_id {
            return Some(reply);
        }
        if let Some(found) = find_mut(&mut reply.replies, reply_id) {
            return Some(found);
        }
    }
    None
}

/// Attaches `reply` to the tree.
///
/// With no parent the reply is appended to the top-level list; display order
/// is insertion order. With a parent id the reply becomes the last child of
/// the matching node, wherever it sits. A parent id that matches no node
/// fails `NotFound`; the reply is never silently dropped at top level.
pub fn insert(replies: &mut Vec<Reply>, parent_id: Option<Uuid>, reply: Reply) -> Result<()> {
    match parent_id {
        None => {
            replies.push(reply);
            Ok(())
        }
        Some(pid) => match find_mut(replies, pid) {
            Some(parent) => {
                parent.replies.push(reply);
                Ok(())
            }
            None => Err(AppError::NotFound("reply", pid)),
        },
    }
}

/// Replaces the body of the reply with `reply_id` and marks it edited.
///
/// Only the reply's author may edit it; `editor` is checked against the
/// matched node after the search completes.
pub fn update(replies: &mut [Reply], reply_id: Uuid, content: String, editor: Uuid) -> Result<()> {
    let reply = find_mut(replies, reply_id).ok_or(AppError::NotFound("reply", reply_id))?;
    if reply.author != editor {
        return Err(AppError::Forbidden(
            "only the author may edit a reply".to_string(),
        ));
    }
    reply.content = content;
    reply.is_edited = true;
    reply.edited_at = Some(Utc::now());
    Ok(())
}

/// Splices the reply with `reply_id` out of its parent's list.
///
/// Removing a node removes its entire subtree with it; descendants need no
/// separate cascade. The requester must be the author, unless privileged
/// (moderator/admin).
pub fn remove(
    replies: &mut Vec<Reply>,
    reply_id: Uuid,
    requester: Uuid,
    is_privileged: bool,
) -> Result<()> {
    for i in 0..replies.len() {
        if replies[i].id == reply_id {
            if replies[i].author != requester && !is_privileged {
                return Err(AppError::Forbidden(
                    "only the author or a moderator may delete a reply".to_string(),
                ));
            }
            replies.remove(i);
            return Ok(());
        }
        match remove(&mut replies[i].replies, reply_id, requester, is_privileged) {
            // Not in this subtree; keep scanning the current level.
            Err(AppError::NotFound(..)) => {}
            outcome => return outcome,
        }
    }
    Err(AppError::NotFound("reply", reply_id))
}
