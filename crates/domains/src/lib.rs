//! rusty-forum/crates/domains/src/lib.rs
//!
//! The central domain types and interface definitions for Rusty-Forum.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use uuid::Uuid;

    fn thread_with_tags(n: usize) -> crate::error::Result<Thread> {
        Thread::new(
            Uuid::now_v7(),
            Uuid::now_v7(),
            "Borrow checker questions".to_string(),
            "Why does this not compile?".to_string(),
            (0..n).map(|_| Uuid::now_v7()).collect(),
        )
    }

    #[test]
    fn new_thread_starts_empty() {
        let thread = thread_with_tags(2).unwrap();
        assert!(thread.replies.is_empty());
        assert!(thread.votes.is_empty());
        assert_eq!(thread.views, 0);
        assert!(!thread.is_locked);
        assert_eq!(thread.reply_count(), 0);
    }

    #[test]
    fn tag_cap_is_enforced() {
        assert!(thread_with_tags(MAX_THREAD_TAGS).is_ok());
        assert!(thread_with_tags(MAX_THREAD_TAGS + 1).is_err());
    }

    #[test]
    fn reply_count_spans_all_depths() {
        let mut thread = thread_with_tags(0).unwrap();
        let mut top = Reply::new(Uuid::now_v7(), "top".into(), None).unwrap();
        let mut mid = Reply::new(Uuid::now_v7(), "mid".into(), Some(top.id)).unwrap();
        let leaf = Reply::new(Uuid::now_v7(), "leaf".into(), Some(mid.id)).unwrap();
        mid.replies.push(leaf);
        top.replies.push(mid);
        thread.replies.push(top);
        assert_eq!(thread.reply_count(), 3);
    }

    #[test]
    fn net_score_may_go_negative() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let c = Uuid::now_v7();
        let votes = vec![
            Vote::new(a, VoteKind::Downvote),
            Vote::new(b, VoteKind::Downvote),
            Vote::new(c, VoteKind::Upvote),
        ];
        assert_eq!(net_score(&votes), -1);
    }

    #[test]
    fn aggregate_serializes_with_embedded_tree() {
        let mut thread = thread_with_tags(1).unwrap();
        let mut top = Reply::new(Uuid::now_v7(), "top".into(), None).unwrap();
        top.replies
            .push(Reply::new(Uuid::now_v7(), "child".into(), Some(top.id)).unwrap());
        thread.replies.push(top);

        // The whole tree must live inside the one document.
        let doc = serde_json::to_value(&thread).unwrap();
        assert_eq!(doc["replies"][0]["replies"][0]["content"], "child");
    }
}
