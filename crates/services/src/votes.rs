//! # Vote Tally & Reputation
//!
//! Applies one user's vote to one votable entity and derives the author
//! reputation projection. A vote set holds at most one vote per user:
//! repeating the same kind toggles the vote off, casting the opposite kind
//! switches it in place.

use domains::error::{AppError, Result};
use domains::models::{net_score, Reply, Vote, VoteKind};
use serde::Serialize;
use uuid::Uuid;

use crate::reply_tree;

/// Reputation granted per point of net score.
const REPUTATION_PER_POINT: i64 = 10;

/// What a vote operation left behind, shaped for the response boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteOutcome {
    /// Net score of the votable entity after the operation.
    pub score: i64,
    /// The voter's standing vote: `None` after a toggle-off.
    pub user_vote: Option<VoteKind>,
}

/// Applies `voter`'s vote to a vote set and returns their resulting stance.
///
/// - no existing vote: the vote is added, stance = `kind`
/// - existing vote of the same kind: removed (toggle-off), stance = `None`
/// - existing vote of the other kind: switched in place, stance = `kind`
///
/// The set never ends up with two votes from the same user.
pub fn apply_vote(votes: &mut Vec<Vote>, voter: Uuid, kind: VoteKind) -> Option<VoteKind> {
    match votes.iter().position(|v| v.user == voter) {
        Some(i) if votes[i].kind == kind => {
            votes.remove(i);
            None
        }
        Some(i) => {
            votes[i].kind = kind;
            Some(kind)
        }
        None => {
            votes.push(Vote::new(voter, kind));
            Some(kind)
        }
    }
}

/// Derives a reputation score from a net vote score, clamped at zero.
///
/// Recomputed from scratch on every vote change rather than adjusted
/// incrementally, so a missed update can never leave drift behind.
pub fn reputation_for(net_score: i64) -> u32 {
    (net_score * REPUTATION_PER_POINT).max(0) as u32
}

/// Applies a vote to the reply with `reply_id`, wherever it sits in the tree.
pub fn vote_reply(
    replies: &mut [Reply],
    reply_id: Uuid,
    voter: Uuid,
    kind: VoteKind,
) -> Result<VoteOutcome> {
    let reply =
        reply_tree::find_mut(replies, reply_id).ok_or(AppError::NotFound("reply", reply_id))?;
    let user_vote = apply_vote(&mut reply.votes, voter, kind);
    Ok(VoteOutcome {
        score: net_score(&reply.votes),
        user_vote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::models::Reply;

    #[test]
    fn fresh_vote_is_added() {
        let voter = Uuid::now_v7();
        let mut votes = Vec::new();
        let stance = apply_vote(&mut votes, voter, VoteKind::Upvote);
        assert_eq!(stance, Some(VoteKind::Upvote));
        assert_eq!(votes.len(), 1);
        assert_eq!(net_score(&votes), 1);
    }

    #[test]
    fn same_kind_twice_toggles_off() {
        let voter = Uuid::now_v7();
        let mut votes = Vec::new();
        apply_vote(&mut votes, voter, VoteKind::Downvote);
        let stance = apply_vote(&mut votes, voter, VoteKind::Downvote);
        assert_eq!(stance, None);
        assert!(votes.is_empty());
    }

    #[test]
    fn opposite_kind_switches_in_place() {
        let voter = Uuid::now_v7();
        let mut votes = Vec::new();
        apply_vote(&mut votes, voter, VoteKind::Upvote);
        let stance = apply_vote(&mut votes, voter, VoteKind::Downvote);
        assert_eq!(stance, Some(VoteKind::Downvote));
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].kind, VoteKind::Downvote);
    }

    #[test]
    fn at_most_one_vote_per_voter() {
        let voter = Uuid::now_v7();
        let other = Uuid::now_v7();
        let mut votes = Vec::new();
        for kind in [
            VoteKind::Upvote,
            VoteKind::Downvote,
            VoteKind::Downvote,
            VoteKind::Upvote,
            VoteKind::Upvote,
        ] {
            apply_vote(&mut votes, voter, kind);
            apply_vote(&mut votes, other, kind);
            assert!(votes.iter().filter(|v| v.user == voter).count() <= 1);
            assert!(votes.iter().filter(|v| v.user == other).count() <= 1);
        }
    }

    #[test]
    fn reputation_never_negative() {
        assert_eq!(reputation_for(-7), 0);
        assert_eq!(reputation_for(0), 0);
        assert_eq!(reputation_for(3), 30);
    }

    #[test]
    fn vote_reply_reaches_nested_nodes() {
        let author = Uuid::now_v7();
        let voter = Uuid::now_v7();
        let mut top = Reply::new(author, "top".into(), None).unwrap();
        let child = Reply::new(author, "child".into(), Some(top.id)).unwrap();
        let child_id = child.id;
        top.replies.push(child);
        let mut tree = vec![top];

        let outcome = vote_reply(&mut tree, child_id, voter, VoteKind::Upvote).unwrap();
        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.user_vote, Some(VoteKind::Upvote));
        // The enclosing reply's own votes are untouched.
        assert!(tree[0].votes.is_empty());
    }

    #[test]
    fn vote_reply_unknown_id_is_not_found() {
        let mut tree = vec![Reply::new(Uuid::now_v7(), "only".into(), None).unwrap()];
        let err = vote_reply(&mut tree, Uuid::now_v7(), Uuid::now_v7(), VoteKind::Upvote)
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound("reply", _)));
    }
}
